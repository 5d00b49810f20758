//! Argument assembly for yt-dlp invocations
//!
//! Building is pure: the same request, selector, and output directory
//! always produce the same token list. Extractor arguments go through
//! [`ExtractorArgs`] so one channel never serializes twice, no matter how
//! many features (client emulation, SABR delivery, PO Token provider)
//! contribute clauses.

use crate::core::request::DownloadRequest;
use crate::platform::detect::Platform;
use std::collections::BTreeMap;
use std::path::Path;

/// Subtitle languages fetched alongside the video
const SUBTITLE_LANGS: &str = "en.*";
/// Subtitle container yt-dlp converts fetched subtitles into
const SUBTITLE_FORMAT: &str = "srt";

/// Extractor-argument channels keyed by name, each holding an ordered list
/// of `key=value` clauses. Serialized once per channel as
/// `--extractor-args name:clause;clause`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorArgs {
    channels: BTreeMap<String, Vec<String>>,
}

impl ExtractorArgs {
    pub fn push(&mut self, channel: &str, clause: impl Into<String>) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .push(clause.into());
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Serialize every channel into `argv`, one flag per channel.
    pub fn append_to(&self, argv: &mut Vec<String>) {
        for (channel, clauses) in &self.channels {
            argv.push("--extractor-args".to_string());
            argv.push(format!("{}:{}", channel, clauses.join(";")));
        }
    }
}

/// Build the full yt-dlp argument vector for one attempt.
pub fn build_download_args(
    request: &DownloadRequest,
    platform: Platform,
    format_selector: &str,
    output_dir: &Path,
) -> Vec<String> {
    let mut argv: Vec<String> = vec![
        "--cookies-from-browser".into(),
        request.cookies_browser.as_str().into(),
        "-f".into(),
        format_selector.into(),
        "--write-auto-sub".into(),
        "--sub-lang".into(),
        SUBTITLE_LANGS.into(),
        "--convert-subs".into(),
        SUBTITLE_FORMAT.into(),
        // Continue when subtitle fetch or postprocessing hiccups
        "--ignore-errors".into(),
        "-P".into(),
        output_dir.to_string_lossy().into_owned(),
        "--no-mtime".into(),
        "--embed-metadata".into(),
    ];

    if request.embed_chapters {
        argv.push("--embed-chapters".into());
    }

    if platform.is_youtube() {
        if let Some(mark) = &request.sponsorblock_mark {
            argv.push("--sponsorblock-mark".into());
            argv.push(mark.clone());
        }
        if let Some(remove) = &request.sponsorblock_remove {
            argv.push("--sponsorblock-remove".into());
            argv.push(remove.clone());
        }
        if let Some(seconds) = request.sleep_interval {
            argv.push("--sleep-interval".into());
            argv.push(seconds.to_string());
        }

        let mut extractor = ExtractorArgs::default();
        if let Some(client) = request.client {
            extractor.push("youtube", format!("player-client={}", client.as_str()));
        }
        if request.enable_sabr {
            extractor.push("youtube", "formats=duplicate");
        }
        if let Some(url) = &request.pot.url {
            extractor.push("youtubepot-bgutilhttp", format!("base_url={}", url));
        }
        if let Some(script) = &request.pot.script {
            extractor.push(
                "youtubepot-bgutilscript",
                format!("script_path={}", script.display()),
            );
        }
        extractor.append_to(&mut argv);
    }

    argv.extend(request.extra_args.iter().cloned());
    argv.push(request.url.clone());
    argv
}
