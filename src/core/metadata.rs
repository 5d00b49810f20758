//! Video metadata collaborator
//!
//! One `yt-dlp -j` query per invocation, parsed into the few fields the
//! output-directory naming needs. Best-effort: any failure yields an empty
//! record and a warning, never an error.

use crate::core::request::Browser;
use crate::download::runner::CommandRunner;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Subset of yt-dlp's JSON dump used for output naming
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMeta {
    pub title: Option<String>,
    pub upload_date: Option<String>,
    pub release_date: Option<String>,
}

impl VideoMeta {
    /// Title to name the output directory after
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("video")
    }

    /// Upload date wins over release date, matching yt-dlp's own precedence
    pub fn date(&self) -> Option<&str> {
        self.upload_date
            .as_deref()
            .or(self.release_date.as_deref())
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Fetch metadata for a URL via `yt-dlp -j`.
pub async fn fetch_metadata(
    runner: &dyn CommandRunner,
    program: &str,
    browser: Browser,
    url: &str,
    timeout: Duration,
) -> VideoMeta {
    let args = vec![
        "--cookies-from-browser".to_string(),
        browser.as_str().to_string(),
        "-j".to_string(),
        url.to_string(),
    ];

    let output = match runner.capture(program, &args, timeout).await {
        Ok(output) if output.success() && !output.stdout.is_empty() => output,
        _ => {
            warn!("Could not retrieve video information");
            return VideoMeta::default();
        }
    };

    match VideoMeta::from_json(&output.stdout) {
        Some(meta) => meta,
        None => {
            warn!("Could not parse video information");
            VideoMeta::default()
        }
    }
}
