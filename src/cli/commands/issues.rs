//! `timed issues <project_id>`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::adapters::http::issues::IssueResource;
use crate::adapters::sqlite::SqliteProjectRepository;
use crate::adapters::trackers::TrackerRegistry;
use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::models::{Config, Issue};
use crate::services::IssueService;

use super::open_database;

#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// Project ID
    pub project_id: i64,
}

/// Issues of one project. JSON output matches the API response.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct IssueListOutput {
    pub issues: Vec<IssueResource>,
}

impl From<Vec<Issue>> for IssueListOutput {
    fn from(issues: Vec<Issue>) -> Self {
        Self {
            issues: issues.into_iter().map(IssueResource::from).collect(),
        }
    }
}

impl CommandOutput for IssueListOutput {
    fn to_human(&self) -> String {
        if self.issues.is_empty() {
            return "No issues found.".to_string();
        }

        let mut table = list_table(&["id", "state", "source", "title", "url"]);
        for issue in &self.issues {
            let attributes = &issue.attributes;
            table.add_row(vec![
                issue.id.to_string(),
                attributes.state.clone(),
                attributes.source_type.to_string(),
                truncate(&attributes.title, 60),
                attributes.url.clone(),
            ]);
        }

        let count = self.issues.len();
        format!("{count} issue{}:\n{table}", if count == 1 { "" } else { "s" })
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: IssuesArgs, config: Config, json_mode: bool) -> Result<()> {
    let pool = open_database(&config).await?;
    let trackers = TrackerRegistry::from_settings(&config.trackers).context("Failed to build tracker clients")?;
    let service = IssueService::new(Arc::new(SqliteProjectRepository::new(pool)), trackers);

    let issues = service
        .get_issues(args.project_id)
        .await
        .with_context(|| format!("Failed to look up issues of project {}", args.project_id))?;

    output(&IssueListOutput::from(issues), json_mode);
    Ok(())
}
