//! Tracker URL templates.
//!
//! Templates carry named placeholders, e.g.
//! `https://api.github.com/repos/{tracker_name}/issues`. Values are
//! substituted verbatim, so a GitHub `owner/repo` keeps its slash.

pub const TRACKER_NAME: &str = "{tracker_name}";
pub const ISSUE_ID: &str = "{issue_id}";

/// Substitute `{tracker_name}` and, when given, `{issue_id}`.
///
/// Placeholders without a value are left in place.
pub fn render(template: &str, tracker_name: &str, issue_id: Option<&str>) -> String {
    let rendered = template.replace(TRACKER_NAME, tracker_name);
    match issue_id {
        Some(id) => rendered.replace(ISSUE_ID, id),
        None => rendered,
    }
}

/// Check that `template` contains every placeholder in `required`.
pub fn require_placeholders(template: &str, required: &[&str]) -> Result<(), String> {
    let missing: Vec<&str> = required.iter().copied().filter(|p| !template.contains(p)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("template '{template}' is missing {}", missing.join(", ")))
    }
}
