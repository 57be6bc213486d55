//! Error types for relay-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving or validating [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes file path and serde_yaml context.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A setting holds a value the clients cannot work with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors from the plaintext secrets file.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No secrets file yet; the caller should run the interactive setup.
    #[error("no secrets file at {path}")]
    NotFound { path: PathBuf },

    /// The file exists but lacks a required key.
    #[error("secrets file {path} has no `{key}` entry")]
    MissingKey { key: &'static str, path: PathBuf },
}

pub(crate) fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn credential_io(path: impl Into<PathBuf>, source: std::io::Error) -> CredentialError {
    CredentialError::Io {
        path: path.into(),
        source,
    }
}
