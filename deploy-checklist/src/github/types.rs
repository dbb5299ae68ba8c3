//! Records handed across the repository API boundary.

use serde::Serialize;

/// The open staging deploy checklist issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingIssue {
    /// Issue number.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Browser URL of the issue.
    pub url: String,

    /// Raw Markdown body (empty if the issue has none).
    pub body: String,

    /// Names of the labels on the issue.
    pub labels: Vec<String>,
}

/// Metadata about one pull request listed on the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestMeta {
    /// Pull request number.
    pub number: u64,

    /// Browser URL of the pull request.
    pub url: String,

    /// Pull request title.
    pub title: String,

    /// Login of the user who merged it, if merged.
    pub merged_by: Option<String>,

    /// Names of the labels on the pull request.
    pub labels: Vec<String>,
}

impl PullRequestMeta {
    /// Returns true if the pull request carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|name| name == label)
    }
}
