//! Deployer verification checkboxes.

use serde::{Deserialize, Serialize};

/// The three checkboxes the deployer ticks before promoting a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verifications {
    /// App Timing Dashboard was checked for performance regressions.
    pub timing_dashboard: bool,

    /// Firebase Crashlytics was checked for new crashes.
    pub crashlytics: bool,

    /// GitHub Status was checked for Actions incidents.
    pub github_status: bool,
}

impl Verifications {
    /// Returns true once every verification is ticked.
    #[must_use]
    pub fn all_checked(&self) -> bool {
        self.timing_dashboard && self.crashlytics && self.github_status
    }
}

/// Text that follows the timing dashboard checkbox.
pub(crate) const TIMING_DASHBOARD_MARKER: &str = "I checked the [App Timing Dashboard]";

/// Text that follows the crashlytics checkbox.
pub(crate) const CRASHLYTICS_MARKER: &str = "I checked [Firebase Crashlytics]";

/// Text that follows the GitHub status checkbox.
pub(crate) const GITHUB_STATUS_MARKER: &str = "I checked [GitHub Status]";
