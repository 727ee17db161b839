mod app;
mod config;
mod credentials;
mod error;
mod export;
mod shutdown;

pub mod google_photos;

pub use app::*;
pub use config::Config;
pub use credentials::*;
pub use error::Error;
pub use export::*;
pub use shutdown::Shutdown;

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
