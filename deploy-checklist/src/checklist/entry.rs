//! A single checklist line item.

use serde::{Deserialize, Serialize};

/// One `- [ ] <url>` line of the staging deploy checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReference {
    /// Canonical issue or pull request URL.
    pub url: String,

    /// Issue or pull request number taken from the URL.
    pub number: u64,

    /// Whether the checkbox is ticked.
    pub checked: bool,

    /// GitHub login mentioned after the URL (Internal QA entries only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl EntryReference {
    /// Creates an entry without an assignee.
    #[must_use]
    pub fn new(url: impl Into<String>, number: u64, checked: bool) -> Self {
        Self {
            url: url.into(),
            number,
            checked,
            assignee: None,
        }
    }

    /// Sets the assignee login.
    #[must_use]
    pub fn with_assignee(mut self, login: impl Into<String>) -> Self {
        self.assignee = Some(login.into());
        self
    }
}

/// Sorts entries ascending by number, keeping source order between equal ids.
pub(crate) fn sort_by_number(entries: &mut [EntryReference]) {
    entries.sort_by_key(|entry| entry.number);
}
