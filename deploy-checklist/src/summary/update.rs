//! Checklist update summary.

use crate::checklist::DeployChecklist;
use serde::Serialize;
use std::collections::BTreeSet;

/// What an update run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    /// Number of the tracking issue.
    pub issue_number: u64,

    /// Checklist as it reads after regeneration.
    pub checklist: DeployChecklist,

    /// Regenerated Markdown body.
    #[serde(skip)]
    pub body: String,

    /// Internal QA assignees to notify.
    pub notify: BTreeSet<String>,

    /// Pull requests listed without metadata.
    pub missing_metadata: Vec<u64>,

    /// Whether the regenerated body differs from the current one.
    pub body_changed: bool,

    /// Whether the issue body was written back.
    pub updated: bool,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl UpdateSummary {
    /// Returns true if metadata was missing for some pull requests.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.missing_metadata.is_empty()
    }
}
