//! YouTube client-emulation profiles

use clap::ValueEnum;
use std::fmt;

/// Client identity presented to YouTube by yt-dlp.
///
/// The profile decides which format set and restrictions the platform
/// applies; several profiles still serve traditional (non-SABR) formats.
/// `ALL` is the fallback sweep order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ClientProfile {
    /// Web client (may be served SABR-only streams)
    Web,
    /// Android client (often still provides traditional formats)
    Android,
    /// TV client (often still provides traditional formats)
    Tv,
    /// TV client with downgraded version (avoids SABR on logged-in accounts)
    TvDowngraded,
    /// Mobile web client (recommended with a PO Token for problematic videos)
    Mweb,
    /// Music web client
    WebMusic,
    /// Music android client
    AndroidMusic,
}

impl ClientProfile {
    /// Fallback sweep order, most compatible first
    pub const ALL: [ClientProfile; 7] = [
        ClientProfile::Web,
        ClientProfile::Android,
        ClientProfile::Tv,
        ClientProfile::TvDowngraded,
        ClientProfile::Mweb,
        ClientProfile::WebMusic,
        ClientProfile::AndroidMusic,
    ];

    /// Name understood by yt-dlp's `player-client` extractor argument
    pub fn as_str(self) -> &'static str {
        match self {
            ClientProfile::Web => "web",
            ClientProfile::Android => "android",
            ClientProfile::Tv => "tv",
            ClientProfile::TvDowngraded => "tv_downgraded",
            ClientProfile::Mweb => "mweb",
            ClientProfile::WebMusic => "web_music",
            ClientProfile::AndroidMusic => "android_music",
        }
    }

    /// Profiles still worth trying after `tried` failed, in sweep order
    pub fn fallback_candidates(tried: ClientProfile) -> impl Iterator<Item = ClientProfile> {
        Self::ALL.into_iter().filter(move |c| *c != tried)
    }
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
