//! GitHub issue and pull request URL recognition.
//!
//! Checklist entries are identified by their URL; the numeric id used for
//! ordering is always taken from the `/pull/<n>` or `/issues/<n>` suffix.

mod error;

pub use error::ReferenceError;

use regex::Regex;
use std::sync::LazyLock;

const GITHUB_BASE_URL: &str = r"https?://(?:github\.com|api\.github\.com)";

static PULL_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{GITHUB_BASE_URL}/.*/.*/pull/([0-9]+)")).expect("valid regex")
});

static ISSUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{GITHUB_BASE_URL}/.*/.*/issues/([0-9]+)")).expect("valid regex")
});

static ISSUE_OR_PULL_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{GITHUB_BASE_URL}/.*/.*/(?:pull|issues)/([0-9]+)"
    ))
    .expect("valid regex")
});

/// Which kinds of URL a checklist section accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Only `/pull/<n>` URLs.
    PullRequest,
    /// Only `/issues/<n>` URLs.
    Issue,
    /// Either of the above.
    IssueOrPullRequest,
}

impl ReferenceKind {
    /// Resolves `url` to its numeric id if it is of this kind.
    pub fn number(self, url: &str) -> Result<u64, ReferenceError> {
        match self {
            Self::PullRequest => pull_request_number(url),
            Self::Issue => issue_number(url),
            Self::IssueOrPullRequest => issue_or_pull_request_number(url),
        }
    }
}

/// Parses the pull request number from a URL.
///
/// # Errors
///
/// Returns [`ReferenceError::NotPullRequest`] if the URL is not a GitHub pull request.
pub fn pull_request_number(url: &str) -> Result<u64, ReferenceError> {
    capture_number(&PULL_REQUEST_RE, url).ok_or_else(|| ReferenceError::NotPullRequest {
        url: url.to_string(),
    })
}

/// Parses the issue number from a URL.
///
/// # Errors
///
/// Returns [`ReferenceError::NotIssue`] if the URL is not a GitHub issue.
pub fn issue_number(url: &str) -> Result<u64, ReferenceError> {
    capture_number(&ISSUE_RE, url).ok_or_else(|| ReferenceError::NotIssue {
        url: url.to_string(),
    })
}

/// Parses the issue or pull request number from a URL.
///
/// # Errors
///
/// Returns [`ReferenceError::NotIssueOrPullRequest`] if the URL is neither.
pub fn issue_or_pull_request_number(url: &str) -> Result<u64, ReferenceError> {
    capture_number(&ISSUE_OR_PULL_REQUEST_RE, url).ok_or_else(|| {
        ReferenceError::NotIssueOrPullRequest {
            url: url.to_string(),
        }
    })
}

/// Builds the URL of a pull request in the given repository.
///
/// `repository_url` is the browser URL of the repository, e.g.
/// `https://github.com/Expensify/App`.
#[must_use]
pub fn pull_request_url(repository_url: &str, number: u64) -> String {
    format!("{}/pull/{number}", repository_url.trim_end_matches('/'))
}

fn capture_number(regex: &Regex, url: &str) -> Option<u64> {
    regex
        .captures(url)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
