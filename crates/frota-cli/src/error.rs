//! # CLI Error Types
//!
//! Everything that can stop a `frota` command before it produces a report.
//! Invalid plates and drafts are not errors here: they are reported on
//! stdout with exit code 1. These errors exit with code 2.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `--config` or `FROTA_CONFIG` names a file that does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file is not valid TOML for [`FrotaConfig`].
    ///
    /// [`FrotaConfig`]: crate::config::FrotaConfig
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // =========================================================================
    // Input / Output Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Bad search arguments and similar; not plate failures.
    #[error(transparent)]
    Core(#[from] frota_core::CoreError),
}
