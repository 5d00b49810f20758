//! Command line surface: argument parsing and user-facing output

pub mod args;
pub mod output;

pub use args::*;
pub use output::*;
