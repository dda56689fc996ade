//! `timed migrate`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::sqlite::{all_embedded_migrations, create_pool, database_url, Migrator, PoolConfig};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct MigrateOutput {
    pub applied: usize,
    pub version: i64,
}

impl CommandOutput for MigrateOutput {
    fn to_human(&self) -> String {
        match self.applied {
            0 => format!("Database is up to date (schema version {}).", self.version),
            1 => format!("Applied 1 migration (schema version {}).", self.version),
            n => format!("Applied {n} migrations (schema version {}).", self.version),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config: Config, json_mode: bool) -> Result<()> {
    let pool = create_pool(&database_url(&config.database.path), Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;

    let migrator = Migrator::new(pool);
    let applied = migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .context("Failed to apply migrations")?;
    let version = migrator.get_current_version().await.context("Failed to read schema version")?;

    output(&MigrateOutput { applied, version }, json_mode);
    Ok(())
}
