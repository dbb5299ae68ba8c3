//! Production release notes.

use crate::config::RepositorySettings;
use crate::references::pull_request_url;

/// Lists the given pull requests, one `- <url>` line each, CRLF separated.
#[must_use]
pub fn release_body(settings: &RepositorySettings, pull_requests: &[u64]) -> String {
    let repository_url = settings.repository_url();
    pull_requests
        .iter()
        .map(|&number| format!("- {}", pull_request_url(&repository_url, number)))
        .collect::<Vec<_>>()
        .join("\r\n")
}
