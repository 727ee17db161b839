use std::process::ExitCode;

use clap::Parser;
use photos_export::{Config, Context, Shutdown};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    photos_export::init_tracing();

    let mut shutdown = match Shutdown::install() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Could not install signal handlers: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match Context::new(Config::parse()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("An error occurred: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        res = photos_export::run(&ctx) => match res {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("An error occurred: {e}");
                ExitCode::FAILURE
            }
        },
        signal = shutdown.recv() => {
            tracing::info!(signal, "Exiting gracefully...");
            ExitCode::SUCCESS
        }
    }
}
