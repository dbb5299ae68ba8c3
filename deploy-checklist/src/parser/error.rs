//! Checklist parsing error types.

use thiserror::Error;

/// Errors that can occur while parsing a checklist body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `<major>.<minor>.<patch>` version could be found in the body.
    #[error("Unable to find a release version in checklist body starting with {excerpt:?}")]
    MalformedTag {
        /// Leading characters of the offending body.
        excerpt: String,
    },
}
