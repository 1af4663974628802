#![forbid(unsafe_code)]

mod cli;
mod config;
mod constants;
mod gui;
mod overlay;
mod persistence;
mod types;

use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use config::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config_path();
    let mut config = AppConfig::load(&config_path)?;

    // First run: write the defaults out so there is something to edit
    if cli.config.is_none() && !config_path.exists() {
        match config.save(&config_path) {
            Ok(()) => info!(path = %config_path.display(), "Generated config file for user to edit"),
            Err(e) => error!(error = ?e, "Failed to save default config"),
        }
    }

    cli.apply_overrides(&mut config);
    info!("config={:#?}", config);

    gui::run_gui(config)?;
    Ok(())
}
