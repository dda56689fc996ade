//! Issue tracker kinds a project can be linked to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External issue tracker configured on a project.
///
/// Stored on the project as a two-letter code (`GH`, `RM`). Anything else,
/// including an empty value, means the project has no tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerType {
    #[serde(rename = "GH")]
    GitHub,
    #[serde(rename = "RM")]
    Redmine,
}

impl TrackerType {
    /// Code persisted on the project row.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GitHub => "GH",
            Self::Redmine => "RM",
        }
    }

    /// Parse a stored tracker code. Matching is exact; unknown, empty and
    /// padded codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GH" => Some(Self::GitHub),
            "RM" => Some(Self::Redmine),
            _ => None,
        }
    }

    /// Label reported as the `type` attribute of normalized issues.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::GitHub => "Github",
            Self::Redmine => "Redmine",
        }
    }
}

impl fmt::Display for TrackerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(TrackerType::from_code("GH"), Some(TrackerType::GitHub));
        assert_eq!(TrackerType::from_code("RM"), Some(TrackerType::Redmine));
        assert_eq!(TrackerType::from_code(""), None);
        assert_eq!(TrackerType::from_code("JI"), None);
        // Codes are case-sensitive, as stored.
        assert_eq!(TrackerType::from_code("gh"), None);
        assert_eq!(TrackerType::from_code(" GH"), None);
        assert_eq!(TrackerType::from_code("RM\n"), None);
    }

    #[test]
    fn test_code_roundtrip() {
        for kind in [TrackerType::GitHub, TrackerType::Redmine] {
            assert_eq!(TrackerType::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&TrackerType::Redmine).unwrap();
        assert_eq!(json, "\"RM\"");
        let parsed: TrackerType = serde_json::from_str("\"GH\"").unwrap();
        assert_eq!(parsed, TrackerType::GitHub);
    }
}
