//! Repository API error types.

use thiserror::Error;

/// Errors that can occur while talking to the repository API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No open issue carries the tracking label.
    #[error("Unable to find {label} issue")]
    NotFound { label: String },

    /// More than one open issue carries the tracking label.
    #[error("Found {count} open {label} issues, expected exactly one")]
    Conflict { label: String, count: usize },

    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
