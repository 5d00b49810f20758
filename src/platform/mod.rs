//! Platform-specific knowledge: URL classification, client emulation,
//! format strategy, and PO Token provider probing

pub mod client;
pub mod detect;
pub mod formats;
pub mod pot;

pub use client::*;
pub use detect::*;
pub use formats::*;
pub use pot::*;
