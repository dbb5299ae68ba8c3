//! Repository settings loading.
//!
//! Settings are read from a small TOML file with kebab-case keys; every key
//! has a default, so the file only needs to name what differs.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::RepositorySettings;
