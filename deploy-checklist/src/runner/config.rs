//! Update run configuration.

/// What an update run adds to the checklist.
#[derive(Debug, Clone, Default)]
pub struct UpdateConfig {
    /// Pull request URLs to add.
    pull_requests: Vec<String>,
    /// Deploy blocker URLs to add.
    deploy_blockers: Vec<String>,
    /// Whether to preview the new body without writing it.
    dry_run: bool,
}

impl UpdateConfig {
    /// Creates a configuration that adds nothing and writes the result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pull request URLs.
    #[must_use]
    pub fn with_pull_requests(mut self, urls: impl IntoIterator<Item = String>) -> Self {
        self.pull_requests.extend(urls);
        self
    }

    /// Adds deploy blocker URLs.
    #[must_use]
    pub fn with_deploy_blockers(mut self, urls: impl IntoIterator<Item = String>) -> Self {
        self.deploy_blockers.extend(urls);
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the pull request URLs to add.
    pub fn pull_requests(&self) -> &[String] {
        &self.pull_requests
    }

    /// Returns the deploy blocker URLs to add.
    pub fn deploy_blockers(&self) -> &[String] {
        &self.deploy_blockers
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
