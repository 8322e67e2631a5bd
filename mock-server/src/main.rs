use mock_server::User;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    let seed = ["Leanne Graham", "Ervin Howell", "Clementine Bauch"]
        .iter()
        .zip(1..)
        .map(|(name, id)| User {
            id,
            name: name.to_string(),
        })
        .collect();
    mock_server::run_with(listener, seed).await
}
