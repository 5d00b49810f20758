//! Platform detection from target URLs

/// Platform a URL belongs to, as far as download strategy is concerned.
///
/// Only YouTube gets special treatment (client emulation, PO Tokens,
/// SponsorBlock); X is recognized so its URLs never pick up YouTube-only
/// arguments by accident; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    X,
    Other,
}

/// Domain fragments per platform. Iteration order matters: earlier entries
/// shadow later ones when a URL matches more than one platform.
const PLATFORM_DOMAINS: &[(Platform, &[&str])] = &[
    (Platform::Youtube, &["youtube.com", "youtu.be"]),
    (Platform::X, &["twitter.com", "x.com"]),
];

impl Platform {
    /// Classify a URL by case-insensitive substring match against the
    /// domain table. Unrecognized URLs are `Other`.
    pub fn detect(url: &str) -> Platform {
        let url_lower = url.to_lowercase();
        for (platform, domains) in PLATFORM_DOMAINS {
            if domains.iter().any(|domain| url_lower.contains(domain)) {
                return *platform;
            }
        }
        Platform::Other
    }

    pub fn is_youtube(self) -> bool {
        self == Platform::Youtube
    }

    /// Human-readable platform name for log output
    pub fn name(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::X => "X",
            Platform::Other => "Other",
        }
    }
}
