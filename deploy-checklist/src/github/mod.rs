//! The repository API the checklist workflow talks to.
//!
//! [`RepositoryApi`] is the narrow seam between the pure parser/generator and
//! GitHub. [`OctocrabRepositoryApi`] implements it over octocrab; tests and
//! other callers can supply their own implementation.

mod error;
mod octocrab_api;
mod rate_limit;
mod types;

pub use error::ApiError;
pub use octocrab_api::OctocrabRepositoryApi;
pub use types::{PullRequestMeta, TrackingIssue};

use async_trait::async_trait;
use std::collections::BTreeSet;

/// Operations the checklist workflow needs from the hosting repository.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across concurrent comment posts.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Fetches the single open staging deploy checklist issue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if there is none and
    /// [`ApiError::Conflict`] if there is more than one.
    async fn fetch_open_tracking_issue(&self) -> Result<TrackingIssue, ApiError>;

    /// Fetches metadata for the given pull request numbers.
    ///
    /// Numbers that cannot be found are simply absent from the result.
    async fn fetch_pull_requests_by_numbers(
        &self,
        numbers: &BTreeSet<u64>,
    ) -> Result<Vec<PullRequestMeta>, ApiError>;

    /// Posts a comment on an issue or pull request of `repo`.
    async fn post_comment(&self, repo: &str, number: u64, body: &str) -> Result<(), ApiError>;

    /// Replaces the body of an issue.
    async fn update_issue_body(&self, number: u64, body: &str) -> Result<(), ApiError>;
}

/// Picks the only tracking issue out of `issues`.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] or [`ApiError::Conflict`] unless there is
/// exactly one issue.
pub fn single_tracking_issue(
    mut issues: Vec<TrackingIssue>,
    label: &str,
) -> Result<TrackingIssue, ApiError> {
    match issues.len() {
        0 => Err(ApiError::NotFound {
            label: label.to_string(),
        }),
        1 => Ok(issues.remove(0)),
        count => Err(ApiError::Conflict {
            label: label.to_string(),
            count,
        }),
    }
}
