//! Main entry point for the vdl CLI

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vdl::cli::args::Args;
use vdl::cli::output::Reporter;
use vdl::core::orchestrator::Orchestrator;
use vdl::download::runner::ProcessRunner;
use vdl::error::VdlError;
use vdl::utils::env::ensure_downloader;

/// Generous limit for the `--version` dependency check
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    let reporter = Reporter::new(args.verbosity_level());
    let exit_code = match run(&args, &reporter).await {
        Ok(()) => 0,
        Err(err) => {
            if matches!(err.downcast_ref::<VdlError>(), Some(VdlError::Interrupted)) {
                reporter.info("Download interrupted by user");
            } else {
                reporter.error(&format!("{err:#}"));
            }
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(args: &Args, reporter: &Reporter) -> anyhow::Result<()> {
    // Ctrl-C kills the in-flight child process and aborts without retries
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let runner = Arc::new(ProcessRunner::new(cancel));

    // The one fatal probe: everything past this point degrades gracefully
    let program = ensure_downloader(runner.as_ref(), VERSION_CHECK_TIMEOUT).await?;
    debug!("Using downloader at {}", program.display());

    if let Some(raw) = &args.pot_provider_url {
        if url::Url::parse(raw).is_err() {
            reporter.warning(&format!(
                "--pot-provider-url '{}' does not look like a valid URL",
                raw
            ));
        }
    }

    let orchestrator = Orchestrator::new(runner)
        .with_program(program.to_string_lossy())
        .with_download_timeout(args.download_timeout_duration())
        .with_reporter(reporter.clone());

    let request = args.to_request();
    orchestrator.download(&request).await?;
    Ok(())
}

/// Initialize the tracing log stream. `RUST_LOG` wins; otherwise `-v`
/// selects debug and `-q` drops to warnings.
fn init_logging(args: &Args) {
    let default_level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
