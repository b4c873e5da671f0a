use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let filter = EnvFilter::from_default_env()
        .add_directive("message_etl=info".parse().expect("valid directive"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
