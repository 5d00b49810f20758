//! Failure classification from downloader diagnostics

use crate::platform::detect::Platform;
use std::fmt;

/// Stderr fragments indicating YouTube wants a PO Token
const TOKEN_MARKERS: &[&str] = &["PO Token", "po_token", "requires a GVS PO Token"];

/// Stderr fragments indicating the SABR streaming restriction
const STREAMING_MARKERS: &[&str] = &[
    "web client https formats require a GVS PO Token",
    "YouTube is forcing SABR streaming",
    "only SABR formats",
];

/// Reported cause of a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TokenRequired,
    StreamingRestricted,
    Timeout,
    OtherError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureKind::TokenRequired => "a required PO Token was missing",
            FailureKind::StreamingRestricted => "SABR streaming restriction",
            FailureKind::Timeout => "the attempt timed out",
            FailureKind::OtherError => "downloader error",
        };
        f.write_str(text)
    }
}

/// What the diagnostic text revealed about a failed attempt.
///
/// Both marker families are tracked independently: the retry policy keys on
/// `streaming_restricted` even when the *reported* kind is the
/// higher-priority `TokenRequired`, and the streaming warning is suppressed
/// in that case so one root cause produces one warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub token_required: bool,
    pub streaming_restricted: bool,
}

impl Classification {
    /// Scan captured stderr for platform-specific failure markers. Marker
    /// sets only apply to YouTube; other platforms always classify as
    /// `OtherError`.
    pub fn from_stderr(platform: Platform, stderr: &str) -> Self {
        if !platform.is_youtube() {
            return Self::default();
        }
        Self {
            token_required: TOKEN_MARKERS.iter().any(|m| stderr.contains(m)),
            streaming_restricted: STREAMING_MARKERS.iter().any(|m| stderr.contains(m)),
        }
    }

    /// Single reported cause, in priority order.
    pub fn kind(&self) -> FailureKind {
        if self.token_required {
            FailureKind::TokenRequired
        } else if self.streaming_restricted {
            FailureKind::StreamingRestricted
        } else {
            FailureKind::OtherError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_markers() {
        let c = Classification::from_stderr(
            Platform::Youtube,
            "ERROR: this video requires a GVS PO Token",
        );
        assert!(c.token_required);
        assert_eq!(c.kind(), FailureKind::TokenRequired);

        let c = Classification::from_stderr(Platform::Youtube, "missing po_token for format");
        assert!(c.token_required);
    }

    #[test]
    fn test_streaming_markers() {
        let c =
            Classification::from_stderr(Platform::Youtube, "YouTube is forcing SABR streaming");
        assert!(c.streaming_restricted);
        assert!(!c.token_required);
        assert_eq!(c.kind(), FailureKind::StreamingRestricted);

        let c = Classification::from_stderr(Platform::Youtube, "only SABR formats are available");
        assert_eq!(c.kind(), FailureKind::StreamingRestricted);
    }

    #[test]
    fn test_token_wins_priority_when_both_match() {
        // This marker belongs to both families
        let c = Classification::from_stderr(
            Platform::Youtube,
            "web client https formats require a GVS PO Token",
        );
        assert!(c.token_required);
        assert!(c.streaming_restricted);
        assert_eq!(c.kind(), FailureKind::TokenRequired);
    }

    #[test]
    fn test_unrelated_error() {
        let c = Classification::from_stderr(Platform::Youtube, "ERROR: video unavailable");
        assert_eq!(c, Classification::default());
        assert_eq!(c.kind(), FailureKind::OtherError);
    }

    #[test]
    fn test_markers_gated_to_youtube() {
        let c = Classification::from_stderr(Platform::X, "requires a GVS PO Token");
        assert_eq!(c, Classification::default());
        let c = Classification::from_stderr(Platform::Other, "only SABR formats");
        assert_eq!(c, Classification::default());
    }
}
