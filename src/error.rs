//! Error types for vdl

use crate::download::classify::FailureKind;
use std::time::Duration;
use thiserror::Error;

/// Main error type for vdl operations
#[derive(Debug, Error)]
pub enum VdlError {
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("could not create output directory: {0}")]
    OutputDir(String),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("download timed out after {0:?}")]
    AttemptTimeout(Duration),

    #[error("download failed ({classification})")]
    DownloadFailed {
        classification: FailureKind,
        details: String,
    },

    #[error("interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VdlError {
    /// Check if the error aborted the run before any download attempt
    pub fn is_pre_attempt(&self) -> bool {
        matches!(
            self,
            VdlError::MissingDependency(_) | VdlError::OutputDir(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pre_attempt() {
        assert!(VdlError::MissingDependency("yt-dlp".into()).is_pre_attempt());
        assert!(VdlError::OutputDir("denied".into()).is_pre_attempt());
        assert!(!VdlError::Interrupted.is_pre_attempt());
        assert!(!VdlError::AttemptTimeout(Duration::from_secs(1)).is_pre_attempt());
    }

    #[test]
    fn test_display_includes_classification() {
        let err = VdlError::DownloadFailed {
            classification: FailureKind::TokenRequired,
            details: String::new(),
        };
        assert!(err.to_string().contains("PO Token"));
    }
}
