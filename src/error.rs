//! Error types for spawning and config loading

use std::fmt;

/// Everything that can stop a spawn pass before any placement happens
#[derive(Debug)]
pub enum SpawnError {
    /// No shot origin was set on the spawner
    MissingOrigin,
    /// No enemy template was set on the spawner
    MissingTemplate,
    /// A configuration value is outside its accepted range
    InvalidConfig { field: &'static str, reason: String },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl SpawnError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOrigin => write!(f, "shot origin is missing"),
            Self::MissingTemplate => write!(f, "enemy template is missing"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Json(err) => write!(f, "malformed json: {err}"),
        }
    }
}

impl std::error::Error for SpawnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpawnError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SpawnError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
