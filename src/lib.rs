//! # vdl - video download orchestrator
//!
//! Drives `yt-dlp` across YouTube, X (Twitter), and other platforms:
//! platform detection, format strategy, PO Token provider probing, and
//! bounded client-profile fallback when YouTube serves SABR-restricted
//! streams.
//!
//! ## Features
//!
//! - Premium-format detection with a quality-descending fallback chain
//! - Ordered client-emulation retries for SABR streaming restrictions
//! - PO Token provider plugin and server probing
//! - Dated, title-named output directories
//! - Cookie extraction from a local browser
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use vdl::download::runner::ProcessRunner;
//! use vdl::{DownloadRequest, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = Arc::new(ProcessRunner::new(CancellationToken::new()));
//!     let orchestrator = Orchestrator::new(runner);
//!
//!     let request = DownloadRequest::new("https://www.youtube.com/watch?v=VIDEO_ID");
//!     orchestrator.download(&request).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{DownloadRequest, Orchestrator};
pub use crate::error::VdlError;

/// Result type alias for vdl operations
pub type Result<T> = std::result::Result<T, VdlError>;
