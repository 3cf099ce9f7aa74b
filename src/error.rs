//! Error types for autocomment.

use std::path::PathBuf;

use thiserror::Error;

/// Crate error type.
///
/// Policy failures are not errors; they are returned as values by
/// [`crate::policy::CheckinPolicy::evaluate`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Not a git repository: {0}")]
    NotAGitRepo(PathBuf),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Policy already registered: {0}")]
    DuplicatePolicy(String),

    #[error("Policy evaluation cancelled")]
    Cancelled,
}
