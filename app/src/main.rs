use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use user_list::view::{present, Command};
use user_list::{logging, Config, Driver, UreqTransport};
use user_list_core::UsersClient;

enum Event {
    Line(Option<String>),
    Completed,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::setup_tracing();
    info!(base_url = %config.base_url, "starting");

    let transport = UreqTransport::new(config.timeout());
    let mut driver = Driver::new(UsersClient::new(&config.base_url), transport);
    driver.mount();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut shown = None;
    loop {
        let revision = driver.state().revision();
        if shown != Some(revision) {
            println!("{}\n", present(&driver.render()));
            shown = Some(revision);
        }

        let event = tokio::select! {
            line = input.next_line() => Event::Line(line.context("reading stdin")?),
            Some(_) = driver.next_completion() => Event::Completed,
        };

        let Event::Line(line) = event else {
            continue;
        };
        let Some(line) = line else {
            break;
        };
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Render) => shown = None,
            Ok(Command::Press(action)) => {
                if let Some(notice) = driver.press(action) {
                    println!("{notice}");
                }
            }
            Err(message) => println!("{message}"),
        }
    }

    driver.unmount();
    info!("stopped");
    Ok(())
}
