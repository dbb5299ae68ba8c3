//! Staging deploy checklist parsing.
//!
//! Turns the Markdown body of the tracking issue into a [`DeployChecklist`].
//! Only the release version is mandatory; any section that is missing or
//! malformed comes back empty, since a checklist in progress legitimately
//! has empty sections.

mod error;
mod section;

pub use error::ParseError;

use crate::checklist::{
    DeployChecklist, Verifications, CRASHLYTICS_MARKER, GITHUB_STATUS_MARKER,
    TIMING_DASHBOARD_MARKER,
};
use regex::Regex;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+(?:-[0-9]+)?").expect("version regex is valid")
});

/// Number of body characters quoted in a [`ParseError::MalformedTag`].
const EXCERPT_CHARS: usize = 80;

/// Parses a staging deploy checklist body.
///
/// Windows (`\r\n`) and Unix (`\n`) line endings are both accepted. Entries
/// in every section are sorted ascending by number; duplicates are kept.
///
/// # Errors
///
/// Returns [`ParseError::MalformedTag`] if the body contains no
/// `<major>.<minor>.<patch>` version.
pub fn parse_checklist(body: &str) -> Result<DeployChecklist, ParseError> {
    Ok(DeployChecklist {
        tag: parse_tag(body)?,
        pull_requests: section::read_section(body, &section::PULL_REQUESTS),
        internal_qa: section::read_section(body, &section::INTERNAL_QA),
        deploy_blockers: section::read_section(body, &section::DEPLOY_BLOCKERS),
        verifications: parse_verifications(body),
    })
}

/// Finds the first version-like substring of the body.
///
/// # Errors
///
/// Returns [`ParseError::MalformedTag`] if there is none.
pub fn parse_tag(body: &str) -> Result<String, ParseError> {
    VERSION_RE
        .find(body)
        .map(|m| m.as_str().replace('`', ""))
        .ok_or_else(|| ParseError::MalformedTag {
            excerpt: body.chars().take(EXCERPT_CHARS).collect(),
        })
}

/// Reads the three deployer verification checkboxes.
#[must_use]
pub fn parse_verifications(body: &str) -> Verifications {
    Verifications {
        timing_dashboard: is_marker_checked(body, TIMING_DASHBOARD_MARKER),
        crashlytics: is_marker_checked(body, CRASHLYTICS_MARKER),
        github_status: is_marker_checked(body, GITHUB_STATUS_MARKER),
    }
}

/// True if some line reads `- [x] <marker>…`.
fn is_marker_checked(body: &str, marker: &str) -> bool {
    body.lines().any(|line| {
        line.trim_start()
            .strip_prefix("- [x]")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .is_some_and(|rest| rest.trim_start().starts_with(marker))
    })
}
