//! Timed CLI entry point.

use clap::Parser;

use timed::cli::{commands, handle_error, Cli, Commands};
use timed::infrastructure::config::ConfigLoader;
use timed::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err.context("Failed to initialize logging"), cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate => commands::migrate::execute(config, cli.json).await,
        Commands::Issues(args) => commands::issues::execute(args, config, cli.json).await,
        Commands::Users(args) => commands::users::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
