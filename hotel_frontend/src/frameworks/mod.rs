// Frameworks layer: settings, logging, CLI definition and process wiring.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::{AppError, run};
pub use cli::Cli;
pub use config::Settings;
pub use logging::init_tracing;
