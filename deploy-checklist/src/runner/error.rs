//! Runner error types.

/// Errors that can occur while maintaining the checklist.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Repository settings could not be loaded.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The repository API failed, or the tracking issue was missing or ambiguous.
    #[error(transparent)]
    Api(#[from] crate::github::ApiError),

    /// The tracking issue body has no release version.
    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),

    /// A checklist entry could not be resolved.
    #[error(transparent)]
    Generate(#[from] crate::generator::GenerateError),
}
