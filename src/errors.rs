//! Typed error surface for the oppmap core.
//!
//! Input defects never reach this type: the parameter normalizer substitutes
//! documented defaults instead of failing (see [`crate::core::inputs`]).
//! Partial indicator-fetch failures are also recovered locally by the
//! pipeline fan-out. What remains here are the failures a caller must see:
//! external collaborators rejecting or timing out, configuration problems,
//! stage deadlines, and serialization/I-O at the edges.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input constraints that cannot be recovered by defaulting, such as a
    /// malformed input file handed to the CLI.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// A regional data source rejected the request as a whole.
    #[error("data source '{name}' failed: {message}")]
    Source { name: String, message: String },

    /// The text-generation collaborator rejected, timed out, or returned a
    /// shape the defensive parser could not accept.
    #[error("narrative service failed: {message}")]
    Narrative { message: String },

    /// Configuration file problems.
    #[error("configuration error{}: {message}", path_suffix(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A pipeline stage exceeded its deadline; the in-flight fan-out is
    /// dropped when this is raised.
    #[error("stage '{stage}' exceeded its {seconds}s deadline")]
    StageTimeout { stage: &'static str, seconds: u64 },

    #[error("report markup error: {message}")]
    Markup { message: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl AnalysisError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn source(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn narrative(message: impl Into<String>) -> Self {
        Self::Narrative {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn markup(message: impl Into<String>) -> Self {
        Self::Markup {
            message: message.into(),
        }
    }

    /// True when the failure came from an external collaborator and the
    /// caller should present a degraded/offline state rather than abort.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::Source { .. } | Self::Narrative { .. } | Self::StageTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_classification_covers_collaborator_failures() {
        assert!(AnalysisError::source("worldbank", "503").is_external());
        assert!(AnalysisError::narrative("timeout").is_external());
        assert!(AnalysisError::StageTimeout {
            stage: "diagnose",
            seconds: 10
        }
        .is_external());
        assert!(!AnalysisError::validation("bad file").is_external());
        assert!(!AnalysisError::config("missing table").is_external());
    }

    #[test]
    fn config_error_includes_path_when_present() {
        let err = AnalysisError::config_at("unreadable", "/tmp/oppmap.toml");
        assert!(err.to_string().contains("/tmp/oppmap.toml"));
    }
}
