//! Checklist generation error types.

use crate::references::ReferenceError;
use thiserror::Error;

/// Errors that abort checklist generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A pull request or deploy blocker URL has no resolvable number.
    #[error("Cannot resolve checklist entry {url}: {source}")]
    UnresolvedReference {
        url: String,
        #[source]
        source: ReferenceError,
    },
}
