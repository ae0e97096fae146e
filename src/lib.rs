//! smolsoft - a small CPU triangle rasterizer
//!
//! The [`rasterizer`] module holds the pipeline; [`assets`] loads models and
//! scene files for it.

pub mod assets;
pub mod rasterizer;

/// Crate version, shown in the window title
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
