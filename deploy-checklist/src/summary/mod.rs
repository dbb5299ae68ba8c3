//! Outcome types reported back to the caller.

mod comment;
mod update;

pub use comment::{CommentResult, CommentSummary};
pub use update::UpdateSummary;
