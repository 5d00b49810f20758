//! Utility functions for vdl

pub mod env;
pub mod filename;
pub mod outdir;

pub use env::*;
pub use filename::*;
pub use outdir::*;
