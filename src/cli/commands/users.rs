//! `timed users`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::adapters::sqlite::SqliteUserRepository;
use crate::cli::output::{list_table, output, CommandOutput};
use crate::domain::models::{Config, PageRequest, User};
use crate::domain::ports::UserFilter;
use crate::services::UserService;

use super::open_database;

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Provision a user the authenticating proxy may forward
    Add {
        /// Username as sent in the authentication header
        username: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Create the user deactivated
        #[arg(long)]
        inactive: bool,
    },
    /// List users
    List {
        /// Filter by exact username
        #[arg(short, long)]
        username: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct UserActionOutput {
    pub success: bool,
    pub message: String,
    pub user: User,
}

impl CommandOutput for UserActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct UserListOutput {
    pub users: Vec<User>,
    pub total: u64,
}

impl CommandOutput for UserListOutput {
    fn to_human(&self) -> String {
        if self.users.is_empty() {
            return "No users found.".to_string();
        }

        let mut table = list_table(&["id", "username", "name", "email", "active"]);
        for user in &self.users {
            table.add_row(vec![
                user.id.to_string(),
                user.username.clone(),
                format!("{} {}", user.first_name, user.last_name).trim().to_string(),
                user.email.clone(),
                if user.is_active { "yes" } else { "no" }.to_string(),
            ]);
        }
        format!("{} user(s):\n{table}", self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Upper bound on users printed by `users list`.
const LIST_LIMIT: u32 = 500;

pub async fn execute(args: UsersArgs, config: Config, json_mode: bool) -> Result<()> {
    let pool = open_database(&config).await?;
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    match args.command {
        UserCommands::Add {
            username,
            first_name,
            last_name,
            email,
            inactive,
        } => {
            let mut user = User::new(username);
            user.first_name = first_name.unwrap_or_default();
            user.last_name = last_name.unwrap_or_default();
            user.email = email.unwrap_or_default();
            user.is_active = !inactive;

            let user = service.create(user).await.context("Failed to create user")?;
            let out = UserActionOutput {
                success: true,
                message: format!("User created: {} (id {})", user.username, user.id),
                user,
            };
            output(&out, json_mode);
        }

        UserCommands::List { username } => {
            let page = service
                .list(UserFilter { username }, PageRequest::new(1, LIST_LIMIT, LIST_LIMIT))
                .await
                .context("Failed to list users")?;
            let out = UserListOutput {
                total: page.count,
                users: page.results,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}
