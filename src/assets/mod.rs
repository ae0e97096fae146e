//! Asset loading: triangle-list models and RON scene files

mod model;
mod scene;

pub use model::*;
pub use scene::*;
