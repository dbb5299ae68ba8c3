//! Structured form of the staging deploy checklist issue.
//!
//! A [`DeployChecklist`] is a snapshot produced by
//! [`parse_checklist`](crate::parser::parse_checklist). It is never edited in
//! place; regeneration builds a fresh body from the generator inputs.

mod entry;
mod verifications;

pub use entry::EntryReference;
pub(crate) use entry::sort_by_number;
pub use verifications::Verifications;
pub(crate) use verifications::{CRASHLYTICS_MARKER, GITHUB_STATUS_MARKER, TIMING_DASHBOARD_MARKER};

use serde::{Deserialize, Serialize};

/// Parsed snapshot of a staging deploy checklist body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployChecklist {
    /// Release version, e.g. `1.2.3-4`.
    pub tag: String,

    /// Pull requests awaiting QA, ascending by number.
    pub pull_requests: Vec<EntryReference>,

    /// Pull requests QA'd internally by their merger, ascending by number.
    #[serde(rename = "internalQA")]
    pub internal_qa: Vec<EntryReference>,

    /// Issues or pull requests blocking the deploy, ascending by number.
    pub deploy_blockers: Vec<EntryReference>,

    /// Deployer verification checkboxes.
    pub verifications: Verifications,
}

impl DeployChecklist {
    /// URLs of pull requests that passed QA.
    #[must_use]
    pub fn verified_pull_requests(&self) -> Vec<String> {
        checked_urls(&self.pull_requests)
    }

    /// URLs of deploy blockers that were resolved.
    #[must_use]
    pub fn resolved_deploy_blockers(&self) -> Vec<String> {
        checked_urls(&self.deploy_blockers)
    }

    /// URLs of Internal QA pull requests that were signed off.
    #[must_use]
    pub fn resolved_internal_qa(&self) -> Vec<String> {
        checked_urls(&self.internal_qa)
    }

    /// Returns true if any deploy blocker is still open.
    #[must_use]
    pub fn has_open_deploy_blockers(&self) -> bool {
        self.deploy_blockers.iter().any(|entry| !entry.checked)
    }

    /// Returns true when every pull request, Internal QA entry, deploy
    /// blocker and verification is ticked.
    #[must_use]
    pub fn is_ready_to_deploy(&self) -> bool {
        self.pull_requests.iter().all(|entry| entry.checked)
            && self.internal_qa.iter().all(|entry| entry.checked)
            && !self.has_open_deploy_blockers()
            && self.verifications.all_checked()
    }
}

fn checked_urls(entries: &[EntryReference]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.checked)
        .map(|entry| entry.url.clone())
        .collect()
}
