use std::{path::PathBuf, process::ExitCode};

use thiserror::Error;

/// Failures of the on-disk registry
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read settings, please run 'sw init' first")]
    NotInitialized,

    #[error("Configuration already exists: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Failed to parse config file: {0}")]
    ParseFailure(#[from] serde_yaml::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(serde_yaml::Error),

    #[error("User name is missing. Please run 'sw init' again.")]
    MissingIdentity,

    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures of the credential exchange
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("'{0}' role not found")]
    AliasNotFound(String),

    #[error("Unable to load SDK config: {0}")]
    SdkConfigFailure(String),

    #[error("Role switching failed: {0}")]
    AssumeRoleFailure(String),
}

pub const EXIT_GENERIC: u8 = 1;
pub const EXIT_CONFIG: u8 = 3;
pub const EXIT_ALIAS_NOT_FOUND: u8 = 4;
pub const EXIT_SDK_CONFIG: u8 = 5;
pub const EXIT_ASSUME_ROLE: u8 = 6;

/// Map a command failure to the process exit code
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<ExchangeError>() {
        match e {
            ExchangeError::AliasNotFound(_) => EXIT_ALIAS_NOT_FOUND,
            ExchangeError::SdkConfigFailure(_) => EXIT_SDK_CONFIG,
            ExchangeError::AssumeRoleFailure(_) => EXIT_ASSUME_ROLE,
        }
    } else if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG
    } else {
        EXIT_GENERIC
    }
}
