//! Generator inputs and outputs.

use crate::checklist::{DeployChecklist, Verifications};
use std::collections::BTreeSet;

/// Everything the generator needs besides pull request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Release version shown in the header.
    pub tag: String,

    /// Candidate pull request URLs, in any order, duplicates allowed.
    pub pull_requests: Vec<String>,

    /// Pull request URLs that passed QA.
    pub verified_pull_requests: Vec<String>,

    /// Deploy blocker URLs (issues or pull requests).
    pub deploy_blockers: Vec<String>,

    /// Deploy blocker URLs that were resolved.
    pub resolved_deploy_blockers: Vec<String>,

    /// Internal QA pull request URLs that were signed off.
    pub resolved_internal_qa: Vec<String>,

    /// Deployer verification checkboxes.
    pub verifications: Verifications,
}

impl GenerateRequest {
    /// Creates a request for `tag` with every list empty.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Carries the state of a parsed checklist into a new request.
    ///
    /// Internal QA entries are fed back as candidate pull requests so the
    /// label partition is recomputed from fresh metadata.
    #[must_use]
    pub fn from_checklist(checklist: &DeployChecklist) -> Self {
        Self {
            tag: checklist.tag.clone(),
            pull_requests: checklist
                .pull_requests
                .iter()
                .chain(&checklist.internal_qa)
                .map(|entry| entry.url.clone())
                .collect(),
            verified_pull_requests: checklist.verified_pull_requests(),
            deploy_blockers: checklist
                .deploy_blockers
                .iter()
                .map(|entry| entry.url.clone())
                .collect(),
            resolved_deploy_blockers: checklist.resolved_deploy_blockers(),
            resolved_internal_qa: checklist.resolved_internal_qa(),
            verifications: checklist.verifications,
        }
    }
}

/// A freshly generated checklist body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChecklist {
    /// Markdown body for the tracking issue.
    pub body: String,

    /// Logins of Internal QA assignees to mention or assign.
    pub notify: BTreeSet<String>,

    /// Pull request numbers that had no metadata and were listed as-is.
    pub missing_metadata: Vec<u64>,
}
