//! PO Token provider probing
//!
//! YouTube gates some format sets behind a short-lived PO Token. The
//! `bgutil-ytdlp-pot-provider` plugin can mint those tokens, either through
//! a local HTTP server or a provider script. These probes only observe the
//! environment; they never fail the download on their own.

use crate::download::runner::CommandRunner;
use crate::utils::env::{find_executable, ProbeStatus};
use clap::ValueEnum;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// pip package implementing the PO Token provider plugin
pub const POT_PLUGIN_PACKAGE: &str = "bgutil-ytdlp-pot-provider";

/// Default bind address of the provider's HTTP server
pub const POT_SERVER_HOST: &str = "127.0.0.1";
pub const POT_SERVER_PORT: u16 = 4416;

/// How the provider plugin mints tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PotMode {
    /// Local HTTP server (default, requires the server to be running)
    Http,
    /// Provider script (slower, but no server needed)
    Script,
}

/// Check whether the provider plugin is installed in the active Python
/// environment. Prefers `uv pip show`, falls back to `python3 -m pip show`.
pub async fn plugin_installed(runner: &dyn CommandRunner, timeout: Duration) -> ProbeStatus {
    let (program, args) = if find_executable("uv").is_some() {
        ("uv", vec!["pip", "show", POT_PLUGIN_PACKAGE])
    } else {
        ("python3", vec!["-m", "pip", "show", POT_PLUGIN_PACKAGE])
    };
    let args: Vec<String> = args.into_iter().map(str::to_string).collect();

    match runner.capture(program, &args, timeout).await {
        Ok(output) if output.success() => {
            debug!("PO Token provider plugin is installed");
            ProbeStatus::Available
        }
        Ok(output) if output.timed_out() => {
            debug!("PO Token plugin query timed out");
            ProbeStatus::Unknown
        }
        Ok(_) => ProbeStatus::Unavailable,
        Err(e) => {
            debug!("Could not check PO Token plugin: {}", e);
            ProbeStatus::Unknown
        }
    }
}

/// Check whether the provider's HTTP server accepts connections.
pub async fn server_reachable(host: &str, port: u16, timeout: Duration) -> ProbeStatus {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => {
            debug!("PO Token HTTP server is running at {}:{}", host, port);
            ProbeStatus::Available
        }
        Ok(Err(e)) => {
            debug!("PO Token HTTP server check failed: {}", e);
            ProbeStatus::Unavailable
        }
        Err(_) => {
            debug!("PO Token HTTP server check timed out");
            ProbeStatus::Unknown
        }
    }
}
