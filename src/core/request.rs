//! Download request model

use crate::platform::client::ClientProfile;
use crate::platform::pot::PotMode;
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Browser the downloader extracts authentication cookies from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Browser {
    Firefox,
    Chrome,
    Safari,
}

impl Browser {
    /// Name understood by yt-dlp's `--cookies-from-browser`
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Firefox => "firefox",
            Browser::Chrome => "chrome",
            Browser::Safari => "safari",
        }
    }
}

impl Default for Browser {
    fn default() -> Self {
        Browser::Firefox
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller overrides for the PO Token provider plugin
#[derive(Debug, Clone, Default)]
pub struct PotOverrides {
    pub mode: Option<PotMode>,
    pub url: Option<String>,
    pub script: Option<PathBuf>,
}

/// Immutable input for one orchestration run.
///
/// Never mutated once built; fallback retries derive fresh requests via
/// [`DownloadRequest::for_fallback_client`] and
/// [`DownloadRequest::for_sabr_retry`].
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    /// Explicit format selector; `None` lets the strategy decide
    pub format: Option<String>,
    /// Explicit YouTube client profile; `None` lets yt-dlp pick its default
    pub client: Option<ClientProfile>,
    pub enable_sabr: bool,
    pub allow_fallback: bool,
    pub prefer_premium: bool,
    pub embed_chapters: bool,
    pub sleep_interval: Option<u32>,
    pub sponsorblock_mark: Option<String>,
    pub sponsorblock_remove: Option<String>,
    pub cookies_browser: Browser,
    pub pot: PotOverrides,
    /// Pass-through arguments forwarded to yt-dlp verbatim
    pub extra_args: Vec<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: None,
            client: None,
            enable_sabr: false,
            allow_fallback: true,
            prefer_premium: true,
            embed_chapters: false,
            sleep_interval: None,
            sponsorblock_mark: None,
            sponsorblock_remove: None,
            cookies_browser: Browser::default(),
            pot: PotOverrides::default(),
            extra_args: Vec::new(),
        }
    }

    /// The profile an attempt effectively ran with: yt-dlp defaults to the
    /// web client when none is named.
    pub fn effective_client(&self) -> ClientProfile {
        self.client.unwrap_or(ClientProfile::Web)
    }

    /// Derive a retry request for one fallback client. SABR and further
    /// fallback are forced off; stale extractor directives are stripped
    /// from the pass-through args so they cannot accumulate across retries.
    pub fn for_fallback_client(&self, client: ClientProfile) -> Self {
        Self {
            client: Some(client),
            enable_sabr: false,
            allow_fallback: false,
            extra_args: strip_extractor_args(&self.extra_args),
            ..self.clone()
        }
    }

    /// Derive the single terminal retry with SABR delivery enabled. Keeps
    /// the requested client, defaulting to `web`, and forces fallback off.
    pub fn for_sabr_retry(&self) -> Self {
        Self {
            client: Some(self.effective_client()),
            enable_sabr: true,
            allow_fallback: false,
            extra_args: strip_extractor_args(&self.extra_args),
            ..self.clone()
        }
    }
}

/// Remove `--extractor-args` directives (and their value tokens, in both
/// the split and `=`-joined spellings) from a pass-through argument list.
pub fn strip_extractor_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--extractor-args" {
            iter.next();
            continue;
        }
        if arg.starts_with("--extractor-args=") {
            continue;
        }
        out.push(arg.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_defaults() {
        let req = DownloadRequest::new("https://youtu.be/abc");
        assert!(req.allow_fallback);
        assert!(req.prefer_premium);
        assert!(!req.enable_sabr);
        assert!(!req.embed_chapters);
        assert_eq!(req.client, None);
        assert_eq!(req.cookies_browser, Browser::Firefox);
        assert!(req.extra_args.is_empty());
    }

    #[test]
    fn test_effective_client_defaults_to_web() {
        let req = DownloadRequest::new("u");
        assert_eq!(req.effective_client(), ClientProfile::Web);

        let mut req = DownloadRequest::new("u");
        req.client = Some(ClientProfile::Tv);
        assert_eq!(req.effective_client(), ClientProfile::Tv);
    }

    #[test]
    fn test_for_fallback_client_forces_flags() {
        let mut req = DownloadRequest::new("u");
        req.enable_sabr = true;
        req.extra_args = strings(&["--extractor-args", "youtube:player-client=web", "-x"]);

        let retry = req.for_fallback_client(ClientProfile::Android);
        assert_eq!(retry.client, Some(ClientProfile::Android));
        assert!(!retry.enable_sabr);
        assert!(!retry.allow_fallback);
        assert_eq!(retry.extra_args, strings(&["-x"]));
        // The original request is untouched
        assert!(req.enable_sabr);
        assert_eq!(req.extra_args.len(), 3);
    }

    #[test]
    fn test_for_sabr_retry_defaults_client_to_web() {
        let req = DownloadRequest::new("u");
        let retry = req.for_sabr_retry();
        assert_eq!(retry.client, Some(ClientProfile::Web));
        assert!(retry.enable_sabr);
        assert!(!retry.allow_fallback);
    }

    #[test]
    fn test_for_sabr_retry_keeps_requested_client() {
        let mut req = DownloadRequest::new("u");
        req.client = Some(ClientProfile::Mweb);
        let retry = req.for_sabr_retry();
        assert_eq!(retry.client, Some(ClientProfile::Mweb));
    }

    #[test]
    fn test_strip_extractor_args_split_form() {
        let stripped = strip_extractor_args(&strings(&[
            "--extractor-args",
            "youtube:player-client=tv",
            "--no-playlist",
        ]));
        assert_eq!(stripped, strings(&["--no-playlist"]));
    }

    #[test]
    fn test_strip_extractor_args_joined_form() {
        let stripped = strip_extractor_args(&strings(&[
            "--extractor-args=youtube:formats=duplicate",
            "--no-playlist",
        ]));
        assert_eq!(stripped, strings(&["--no-playlist"]));
    }

    #[test]
    fn test_strip_extractor_args_keeps_unrelated() {
        let args = strings(&["-x", "--audio-format", "mp3"]);
        assert_eq!(strip_extractor_args(&args), args);
        assert!(strip_extractor_args(&[]).is_empty());
    }

    #[test]
    fn test_browser_names() {
        assert_eq!(Browser::Firefox.as_str(), "firefox");
        assert_eq!(Browser::Chrome.as_str(), "chrome");
        assert_eq!(Browser::Safari.as_str(), "safari");
    }
}
