//! Execution-environment probes
//!
//! Everything here is best-effort: a probe observes the machine and reports
//! one of three states; the caller decides what an `Unknown` means. Only the
//! yt-dlp dependency gate turns a probe result into a hard error.

use crate::download::runner::CommandRunner;
use crate::error::VdlError;
use crate::Result;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of an environment probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Available,
    Unavailable,
    /// The probe itself failed; nothing is known either way
    Unknown,
}

impl ProbeStatus {
    pub fn is_available(self) -> bool {
        self == ProbeStatus::Available
    }
}

/// Minimum supported yt-dlp release (date-form version)
pub const MIN_YTDLP_VERSION: (u32, u32, u32) = (2025, 10, 22);

/// JavaScript runtimes yt-dlp can use, in priority order. Only deno is
/// enabled by default in yt-dlp itself.
const JS_RUNTIMES: &[&str] = &["deno", "node", "bun", "quickjs"];

/// Locate an executable by scanning the `PATH` environment variable.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_in_paths(env::split_paths(&path_var), name)
}

fn find_in_paths(dirs: impl IntoIterator<Item = PathBuf>, name: &str) -> Option<PathBuf> {
    let file_name = if cfg!(windows) && Path::new(name).extension().is_none() {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };
    dirs.into_iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Verify the external downloader is usable: resolvable on `PATH` and at
/// least [`MIN_YTDLP_VERSION`]. This is the only fatal probe; it runs before
/// any download attempt.
pub async fn ensure_downloader(runner: &dyn CommandRunner, timeout: Duration) -> Result<PathBuf> {
    let program = find_executable("yt-dlp").ok_or_else(|| {
        VdlError::MissingDependency(
            "yt-dlp not found. Install with: uv pip install -U yt-dlp".to_string(),
        )
    })?;

    let args = vec!["--version".to_string()];
    let reported = match runner
        .capture(&program.to_string_lossy(), &args, timeout)
        .await
    {
        Ok(output) if output.success() => output.stdout.trim().to_string(),
        Ok(_) => {
            return Err(VdlError::MissingDependency(
                "yt-dlp was found but did not report a version".to_string(),
            ))
        }
        Err(e) => return Err(e),
    };

    match parse_version(&reported) {
        Some(version) if version < MIN_YTDLP_VERSION => Err(VdlError::MissingDependency(format!(
            "yt-dlp {} is too old ({}.{:02}.{:02}+ required). Upgrade with: uv pip install -U yt-dlp",
            reported, MIN_YTDLP_VERSION.0, MIN_YTDLP_VERSION.1, MIN_YTDLP_VERSION.2
        ))),
        Some(version) => {
            debug!("yt-dlp {}.{:02}.{:02} at {}", version.0, version.1, version.2, program.display());
            Ok(program)
        }
        None => {
            warn!("Could not parse yt-dlp version '{}', continuing anyway", reported);
            Ok(program)
        }
    }
}

/// Parse a date-form version string like `2025.10.22` (extra components
/// such as nightly suffixes are ignored).
pub fn parse_version(raw: &str) -> Option<(u32, u32, u32)> {
    let mut parts = raw.trim().split('.');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    Some((year, month, day))
}

/// Find the first available JavaScript runtime, if any. YouTube downloads
/// work without one but with limited format availability.
pub fn detect_js_runtime() -> Option<&'static str> {
    for runtime in JS_RUNTIMES {
        if find_executable(runtime).is_some() {
            debug!("Found JavaScript runtime: {}", runtime);
            return Some(runtime);
        }
    }
    None
}

/// Probe whether the cookie-source browser looks installed. Firefox is the
/// only browser with well-known profile locations worth checking; for the
/// rest nothing is known.
pub fn browser_presence(browser: &str) -> ProbeStatus {
    if browser != "firefox" {
        return ProbeStatus::Unknown;
    }

    let mut candidates = vec![
        PathBuf::from("/Applications/Firefox.app"),
        PathBuf::from("/usr/bin/firefox"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".mozilla/firefox"));
    }

    if candidates.iter().any(|p| p.exists()) {
        ProbeStatus::Available
    } else {
        ProbeStatus::Unavailable
    }
}
