//! Download orchestration and fallback retries
//!
//! One [`Orchestrator::download`] call handles exactly one URL to success
//! or failure. The fallback policy for YouTube streaming restrictions is an
//! explicit bounded loop: one attempt per remaining client profile, then at
//! most one SABR-enabled attempt, never more than `ClientProfile::ALL.len()
//! + 1` downloads in total. Derived retry requests always carry
//! `allow_fallback: false`, so no retry can start a sweep of its own.

use crate::cli::output::Reporter;
use crate::core::metadata::fetch_metadata;
use crate::core::request::DownloadRequest;
use crate::download::classify::{Classification, FailureKind};
use crate::download::command::build_download_args;
use crate::download::runner::{CommandRunner, RunOutput};
use crate::error::VdlError;
use crate::platform::client::ClientProfile;
use crate::platform::detect::Platform;
use crate::platform::formats::{probe_premium_selector, DEFAULT_FORMAT_SELECTOR};
use crate::platform::pot::{self, PotMode, POT_SERVER_HOST, POT_SERVER_PORT};
use crate::utils::env::{browser_presence, detect_js_runtime, ProbeStatus};
use crate::utils::outdir::{resolve_output_dir, resolve_output_dir_in};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Bounded wait periods for the child processes one invocation spawns
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// One download attempt
    pub download: Duration,
    /// Auxiliary metadata / format-listing queries
    pub aux: Duration,
    /// Advisory probes (plugin query, port check)
    pub probe: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            download: Duration::from_secs(3600),
            aux: Duration::from_secs(300),
            probe: Duration::from_secs(5),
        }
    }
}

/// Drives yt-dlp invocations for one URL, including the retry policy.
pub struct Orchestrator {
    runner: Arc<dyn CommandRunner>,
    program: String,
    timeouts: Timeouts,
    reporter: Reporter,
    output_base: Option<PathBuf>,
}

impl Orchestrator {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: "yt-dlp".to_string(),
            timeouts: Timeouts::default(),
            reporter: Reporter::default(),
            output_base: None,
        }
    }

    /// Set the downloader executable (a resolved path, usually)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.download = timeout;
        self
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Override the base directory downloads land under (defaults to the
    /// user's Downloads folder)
    pub fn with_output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.output_base = Some(base.into());
        self
    }

    /// Download one URL, applying the fallback policy on YouTube streaming
    /// restrictions.
    pub async fn download(&self, request: &DownloadRequest) -> Result<()> {
        let platform = Platform::detect(&request.url);
        info!("Detected platform: {}", platform.name());

        if platform.is_youtube() {
            self.advise_youtube_environment(request).await;
        }

        let format_selector = self.resolve_format_selector(request, platform).await;

        info!("Fetching video metadata...");
        let spinner = self.reporter.spinner("Fetching video metadata...");
        let meta = fetch_metadata(
            self.runner.as_ref(),
            &self.program,
            request.cookies_browser,
            &request.url,
            self.timeouts.aux,
        )
        .await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let output_dir = match &self.output_base {
            Some(base) => resolve_output_dir_in(base, meta.title_or_default(), meta.date())?,
            None => resolve_output_dir(meta.title_or_default(), meta.date())?,
        };
        info!("Output directory: {}", output_dir.display());

        let outcome = self
            .attempt(request, platform, &format_selector, &output_dir)
            .await?;
        if outcome.success() {
            self.reporter.success("Download completed successfully!");
            return Ok(());
        }
        if outcome.timed_out() {
            // A first-attempt timeout aborts the invocation; the fallback
            // sweep only answers classified downloader errors
            return Err(VdlError::AttemptTimeout(self.timeouts.download));
        }

        let classification = Classification::from_stderr(platform, &outcome.stderr);
        self.report_failure(&classification).await;

        let fallback_applies = platform.is_youtube()
            && request.allow_fallback
            && (classification.streaming_restricted || request.client.is_none());

        if fallback_applies {
            let tried = request.effective_client();
            for client in ClientProfile::fallback_candidates(tried) {
                info!("Trying fallback YouTube client: {}", client);
                let retry = request.for_fallback_client(client);
                let outcome = self
                    .attempt(&retry, platform, &format_selector, &output_dir)
                    .await?;
                if outcome.success() {
                    self.reporter.success("Download completed successfully!");
                    return Ok(());
                }
            }

            if classification.streaming_restricted && !request.enable_sabr {
                info!("Trying with SABR format support enabled");
                let retry = request.for_sabr_retry();
                let outcome = self
                    .attempt(&retry, platform, &format_selector, &output_dir)
                    .await?;
                if outcome.success() {
                    self.reporter.success("Download completed successfully!");
                    return Ok(());
                }
                let last = Classification::from_stderr(platform, &outcome.stderr);
                return Err(failure(&outcome, last));
            }
        }

        Err(failure(&outcome, classification))
    }

    async fn attempt(
        &self,
        request: &DownloadRequest,
        platform: Platform,
        format_selector: &str,
        output_dir: &Path,
    ) -> Result<RunOutput> {
        if let Some(client) = request.client {
            info!("Using YouTube client: {}", client);
        }
        let argv = build_download_args(request, platform, format_selector, output_dir);
        info!("Starting download...");
        self.runner
            .stream(&self.program, &argv, self.timeouts.download)
            .await
    }

    /// Resolve the `-f` selector: explicit wins, then the best Premium
    /// format when preferred, then the default chain.
    async fn resolve_format_selector(
        &self,
        request: &DownloadRequest,
        platform: Platform,
    ) -> String {
        if let Some(explicit) = &request.format {
            return explicit.clone();
        }

        if platform.is_youtube() && request.prefer_premium {
            let spinner = self.reporter.spinner("Checking for Premium formats...");
            let premium = probe_premium_selector(
                self.runner.as_ref(),
                &self.program,
                request.cookies_browser.as_str(),
                &request.url,
                self.timeouts.aux,
            )
            .await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            if let Some(selector) = premium {
                info!("Using Premium format: {}", selector);
                return selector;
            }
        }

        DEFAULT_FORMAT_SELECTOR.to_string()
    }

    /// Advisory environment checks for YouTube targets. Nothing here can
    /// fail the download; degraded setups only produce warnings and tips.
    async fn advise_youtube_environment(&self, request: &DownloadRequest) {
        if detect_js_runtime().is_none() {
            self.reporter.warning(
                "No JavaScript runtime detected. YouTube downloads may have limited \
                 format availability. Install Deno (recommended): https://deno.land/ \
                 or alternatively Node.js 20+, Bun, or QuickJS.",
            );
        }

        if browser_presence(request.cookies_browser.as_str()) == ProbeStatus::Unavailable {
            self.reporter.warning(&format!(
                "{} not found. Downloads may fail for authenticated content.",
                request.cookies_browser.as_str()
            ));
        }

        match pot::plugin_installed(self.runner.as_ref(), self.timeouts.probe).await {
            ProbeStatus::Available => {
                if request.pot.mode == Some(PotMode::Script) {
                    info!("Using PO Token provider in script mode");
                    return;
                }
                let server =
                    pot::server_reachable(POT_SERVER_HOST, POT_SERVER_PORT, Duration::from_secs(1))
                        .await;
                if server.is_available() {
                    info!("PO Token provider HTTP server detected and ready");
                } else {
                    self.reporter.warning(
                        "PO Token provider plugin installed but HTTP server not detected. \
                         Start it with: docker run --name bgutil-provider -d -p 4416:4416 \
                         --init brainicism/bgutil-ytdlp-pot-provider, or use \
                         --pot-provider-mode script (slower but no server needed).",
                    );
                }
            }
            _ => {
                self.reporter.tip(
                    "Install bgutil-ytdlp-pot-provider to bypass YouTube's bot detection: \
                     uv pip install bgutil-ytdlp-pot-provider \
                     (see https://github.com/Brainicism/bgutil-ytdlp-pot-provider)",
                );
            }
        }
    }

    /// Post-failure diagnostics. The streaming warning is suppressed when a
    /// token warning already covers the same root cause.
    async fn report_failure(&self, classification: &Classification) {
        if classification.token_required {
            let plugin = pot::plugin_installed(self.runner.as_ref(), self.timeouts.probe).await;
            if plugin.is_available() {
                self.reporter.warning(
                    "YouTube PO Token required but the provider plugin failed. Make sure \
                     the HTTP server is running, or try --pot-provider-mode script, or \
                     the mweb client: --youtube-client mweb",
                );
            } else {
                self.reporter.warning(
                    "YouTube PO Token required. Install the provider plugin: \
                     uv pip install bgutil-ytdlp-pot-provider, then start its HTTP \
                     server. Alternative: try the mweb client: --youtube-client mweb",
                );
            }
        } else if classification.streaming_restricted {
            warn!("YouTube SABR streaming issue detected");
        }
    }
}

fn failure(outcome: &RunOutput, classification: Classification) -> VdlError {
    let kind = if outcome.timed_out() {
        FailureKind::Timeout
    } else {
        classification.kind()
    };
    VdlError::DownloadFailed {
        classification: kind,
        details: diagnostic_tail(&outcome.stderr),
    }
}

/// Last few diagnostic lines, enough to show the root cause without
/// replaying the whole session
fn diagnostic_tail(stderr: &str) -> String {
    const TAIL_LINES: usize = 10;
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(TAIL_LINES);
    lines[start..].join("\n")
}
