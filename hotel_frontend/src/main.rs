use std::process::ExitCode;

use clap::Parser;
use hotel_frontend::frameworks::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    hotel_frontend::init_tracing();

    let cli = Cli::parse();
    match hotel_frontend::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
