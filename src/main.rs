use clap::Parser;
use std::path::PathBuf;
use trustpilot_query::cli::dispatcher::Dispatcher;
use trustpilot_query::cli::main_types::Cli;
use trustpilot_query::storage::config::Config;
use trustpilot_query::utils::logging::{log_error, log_warning};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("loading config: {}", err));
            std::process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Verbose mode is enabled");

        if let Some(config_dir) = &cli.config_dir {
            eprintln!("Using config directory: {}", config_dir);
        }
    }

    let dispatcher = Dispatcher::new(config, config_path, cli.verbose);

    // Execute the command
    if let Err(e) = dispatcher.dispatch(cli.command).await {
        log_error(&format!("[{}] {}", e.severity().label(), e));
        if let Some(hint) = e.troubleshooting_hint() {
            log_warning(&hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
