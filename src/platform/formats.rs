//! Format selection strategy
//!
//! Resolves the `-f` selector handed to yt-dlp: prefer the best Premium
//! format when the account has access to one, otherwise fall back to a
//! quality-descending selector chain.

use crate::download::runner::CommandRunner;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Quality-descending selector chain used when no Premium format applies.
/// Ends in an unconstrained `best` so something always matches.
pub const DEFAULT_FORMAT_SELECTOR: &str = concat!(
    "bestvideo[height<=2160][vcodec~='^(av01|vp9|avc1)']+bestaudio/",
    "bestvideo[height<=1440][vcodec~='^(av01|vp9|avc1)']+bestaudio/",
    "bestvideo[height<=1080][vcodec~='^(av01|vp9|avc1)']+bestaudio/",
    "bestvideo[height<=720][vcodec~='^(av01|vp9|avc1)']+bestaudio/",
    "best[ext=mp4]/best"
);

/// Marker yt-dlp prints on format-listing lines of the Premium tier
const PREMIUM_MARKER: &str = "Premium";

/// Query the downloader's format listing and pick the best Premium format.
///
/// Best-effort: any failure (spawn error, non-zero exit, timeout, no
/// Premium entries) yields `None` and the caller falls back to
/// [`DEFAULT_FORMAT_SELECTOR`].
pub async fn probe_premium_selector(
    runner: &dyn CommandRunner,
    program: &str,
    cookies_browser: &str,
    url: &str,
    timeout: Duration,
) -> Option<String> {
    info!("Checking for Premium formats...");
    let args = vec![
        "--cookies-from-browser".to_string(),
        cookies_browser.to_string(),
        "-F".to_string(),
        url.to_string(),
    ];

    let output = match runner.capture(program, &args, timeout).await {
        Ok(output) if output.success() => output,
        Ok(_) | Err(_) => {
            warn!("Could not retrieve format list");
            return None;
        }
    };

    match best_premium_selector(&output.stdout) {
        Some(selector) => {
            info!("Best Premium format found: {}", selector);
            Some(selector)
        }
        None => {
            info!("No Premium formats found, using default format selector");
            None
        }
    }
}

/// Scan a `-F` format listing for Premium entries and return the selector
/// for the one with the greatest resolution height.
pub fn best_premium_selector(listing: &str) -> Option<String> {
    let id_re = Regex::new(r"^(\d+)\s+").unwrap();
    let res_re = Regex::new(r"(\d+)x(\d+)").unwrap();

    let mut best_id: Option<&str> = None;
    let mut best_height = 0u32;

    for line in listing.lines() {
        if !line.contains(PREMIUM_MARKER) {
            continue;
        }
        let Some(id_caps) = id_re.captures(line) else {
            continue;
        };
        let format_id = id_caps.get(1).unwrap().as_str();
        let height = res_re
            .captures(line)
            .and_then(|caps| caps.get(2))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);

        debug!("Premium candidate: id={} height={}", format_id, height);
        if height > best_height || best_id.is_none() {
            best_id = Some(format_id);
            best_height = height.max(best_height);
        }
    }

    best_id.map(|id| format!("{}+bestaudio/best", id))
}
