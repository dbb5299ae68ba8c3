//! URL reference error types.

use thiserror::Error;

/// Errors that can occur while resolving a GitHub URL to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The URL does not point at a pull request.
    #[error("Provided URL {url} is not a GitHub pull request")]
    NotPullRequest { url: String },

    /// The URL does not point at an issue.
    #[error("Provided URL {url} is not a GitHub issue")]
    NotIssue { url: String },

    /// The URL points at neither an issue nor a pull request.
    #[error("Provided URL {url} is not a valid GitHub issue or pull request")]
    NotIssueOrPullRequest { url: String },
}
