//! Comment posting results.

use serde::Serialize;

/// Result of posting one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentResult {
    /// Comment posted.
    Posted {
        /// Issue or pull request number.
        number: u64,
    },

    /// Posting failed.
    Failed {
        /// Issue or pull request number.
        number: u64,
        /// Error message.
        error: String,
    },
}

/// Summary of a batch of comments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentSummary {
    /// Numbers that received the comment, ascending.
    pub posted: Vec<u64>,

    /// Numbers that failed, with the error, ascending.
    pub failed: Vec<(u64, String)>,
}

impl CommentSummary {
    /// Updates the summary with a single result.
    pub fn record_result(&mut self, result: CommentResult) {
        match result {
            CommentResult::Posted { number } => {
                let at = self.posted.partition_point(|&n| n < number);
                self.posted.insert(at, number);
            }
            CommentResult::Failed { number, error } => {
                let at = self.failed.partition_point(|(n, _)| *n < number);
                self.failed.insert(at, (number, error));
            }
        }
    }

    /// Returns true if any comment failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
