/// Initializes structured logging.
///
/// Verbosity comes from `RUST_LOG` (`RUST_LOG=user_list_core=debug` shows
/// every optimistic write and rollback). Output goes to stderr so it never
/// interleaves with the list printed on stdout.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
