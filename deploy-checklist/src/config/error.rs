//! Repository settings errors.

use thiserror::Error;

/// Errors raised while loading a repository settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("Cannot read repository settings '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has a wrongly typed key.
    #[error("Repository settings '{path}' are not valid TOML: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A settings key holds a value that cannot be used.
    #[error("Invalid `{key}` in repository settings '{path}': {message}")]
    ValidationError {
        path: String,
        key: &'static str,
        message: String,
    },

    /// No settings file at the given path.
    #[error("Repository settings file not found: {path}")]
    MissingFile { path: String },
}
