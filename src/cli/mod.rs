//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::issues::IssuesArgs;
use commands::serve::ServeArgs;
use commands::users::UsersArgs;

#[derive(Parser)]
#[command(name = "timed", version, about = "Time-tracking API with GitHub and Redmine issue lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./timed.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve(ServeArgs),

    /// Apply pending database migrations
    Migrate,

    /// Look up the issues of a project's tracker
    Issues(IssuesArgs),

    /// Manage users
    Users(UsersArgs),
}

/// Print a failed command's error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
