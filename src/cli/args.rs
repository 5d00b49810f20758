//! Command line argument parsing

use crate::core::request::{Browser, DownloadRequest, PotOverrides};
use crate::platform::client::ClientProfile;
use crate::platform::pot::PotMode;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Download videos from YouTube, X (Twitter), and other platforms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Examples:
  vdl \"https://www.youtube.com/watch?v=VIDEO_ID\"
  vdl \"https://twitter.com/user/status/TWEET_ID\" --format \"best[height<=720]\"

Arguments after the URL are passed through to yt-dlp verbatim.")]
pub struct Args {
    /// URL to download
    pub url: String,

    /// Custom format selector (overrides the automatic choice)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Browser to extract cookies from
    #[arg(short, long, value_enum, default_value_t = Browser::Firefox)]
    pub browser: Browser,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// YouTube client to use (helps with SABR streaming issues)
    #[arg(short = 'y', long, value_enum, value_name = "CLIENT")]
    pub youtube_client: Option<ClientProfile>,

    /// Enable YouTube SABR streaming format support
    #[arg(long)]
    pub enable_sabr: bool,

    /// Disable automatic fallback to other YouTube clients
    #[arg(long)]
    pub no_fallback: bool,

    /// Disable automatic selection of Premium formats
    #[arg(long)]
    pub no_premium: bool,

    /// SponsorBlock categories to mark as chapters (e.g. "all", "sponsor,intro,outro")
    #[arg(long, value_name = "CATS")]
    pub sponsorblock_mark: Option<String>,

    /// SponsorBlock categories to remove from the video (e.g. "sponsor")
    #[arg(long, value_name = "CATS")]
    pub sponsorblock_remove: Option<String>,

    /// Embed chapter markers in the video file
    #[arg(long)]
    pub embed_chapters: bool,

    /// Sleep interval between downloads in seconds (recommended: 5-10)
    #[arg(long, value_name = "SECONDS")]
    pub sleep_interval: Option<u32>,

    /// PO Token provider mode: http (requires server) or script (no server, slower)
    #[arg(long, value_enum, value_name = "MODE")]
    pub pot_provider_mode: Option<PotMode>,

    /// Custom PO Token provider HTTP server URL (default: http://127.0.0.1:4416)
    #[arg(long, value_name = "URL")]
    pub pot_provider_url: Option<String>,

    /// Path to the PO Token provider script (for script mode)
    #[arg(long, value_name = "PATH")]
    pub pot_provider_script: Option<PathBuf>,

    /// Wall-clock limit for one download attempt (e.g. 30m, 2h)
    #[arg(long, value_name = "DURATION", default_value = "1h")]
    pub download_timeout: humantime::Duration,

    /// Extra arguments passed through to yt-dlp verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "YTDLP_ARGS")]
    pub extra_args: Vec<String>,
}

impl Args {
    /// Get the download timeout as a plain Duration
    pub fn download_timeout_duration(&self) -> Duration {
        self.download_timeout.into()
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Build the immutable request the orchestrator consumes
    pub fn to_request(&self) -> DownloadRequest {
        DownloadRequest {
            url: self.url.clone(),
            format: self.format.clone(),
            client: self.youtube_client,
            enable_sabr: self.enable_sabr,
            allow_fallback: !self.no_fallback,
            prefer_premium: !self.no_premium,
            embed_chapters: self.embed_chapters,
            sleep_interval: self.sleep_interval,
            sponsorblock_mark: self.sponsorblock_mark.clone(),
            sponsorblock_remove: self.sponsorblock_remove.clone(),
            cookies_browser: self.browser,
            pot: PotOverrides {
                mode: self.pot_provider_mode,
                url: self.pot_provider_url.clone(),
                script: self.pot_provider_script.clone(),
            },
            extra_args: self.extra_args.clone(),
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}
