//! Software triangle rasterizer
//!
//! Features:
//! - Near-plane clipping with winding-preserving re-triangulation
//! - Flat-top/flat-bottom scan conversion
//! - Perspective-correct color and texture interpolation
//! - Z-buffered target with a single bound texture sampler

mod math;
mod types;
mod surface;
mod target;
mod camera;
mod clip;
mod render;

pub use math::*;
pub use types::*;
pub use surface::*;
pub use target::*;
pub use camera::*;
pub use clip::*;
pub use render::*;

/// Default frame size
pub const WIDTH: usize = 400;
pub const HEIGHT: usize = 240;
