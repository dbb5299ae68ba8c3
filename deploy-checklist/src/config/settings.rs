//! Repository settings deserialization.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Where the staging deploy checklist lives and how it is labelled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RepositorySettings {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Label carried by the open checklist issue.
    pub staging_deploy_label: String,

    /// Label routing a pull request to the Internal QA section.
    pub internal_qa_label: String,

    /// Team mentioned at the bottom of the checklist.
    pub deployer_team: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            owner: "Expensify".to_string(),
            repo: "App".to_string(),
            staging_deploy_label: "StagingDeployCash".to_string(),
            internal_qa_label: "Internal QA".to_string(),
            deployer_team: "@Expensify/applauseleads".to_string(),
        }
    }
}

impl RepositorySettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// Keys that are absent keep their default value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading repository settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Browser URL of the repository, e.g. `https://github.com/Expensify/App`.
    #[must_use]
    pub fn repository_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }

    /// Link comparing production with staging.
    #[must_use]
    pub fn compare_url(&self) -> String {
        format!("{}/compare/production...staging", self.repository_url())
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            key,
            message,
        };

        for (key, value) in [("owner", &self.owner), ("repo", &self.repo)] {
            if value.trim().is_empty() {
                return Err(invalid(key, "must not be empty".to_string()));
            }
            if value.contains('/') || value.contains(char::is_whitespace) {
                return Err(invalid(
                    key,
                    format!("must not contain slashes or whitespace: {value}"),
                ));
            }
        }

        for (key, value) in [
            ("staging-deploy-label", &self.staging_deploy_label),
            ("internal-qa-label", &self.internal_qa_label),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(key, "must not be empty".to_string()));
            }
        }

        if !self.deployer_team.starts_with('@') {
            return Err(invalid(
                "deployer-team",
                format!("must be an @mention: {}", self.deployer_team),
            ));
        }

        if Url::parse(&self.repository_url()).is_err() {
            return Err(invalid(
                "repo",
                format!("owner and repo do not form a valid URL: {}", self.repository_url()),
            ));
        }

        Ok(())
    }
}
