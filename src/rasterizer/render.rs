//! Core rendering functions
//! Scan conversion of screen-space triangles and the world → screen pipeline

use super::camera::{Camera, Screen};
use super::clip::clip_near;
use super::math::{inv_lerp, lerp, remap, Mat4, Vec2};
use super::surface::Surface;
use super::target::Target;
use super::types::{Color, Model, Triangle, Vertex};

/// Divisor mapping view-space z into the depth buffer's [0, 1) range
pub const DEPTH_SCALE: f32 = 10000.0;

/// Winding order of triangles that get drawn (clockwise on a y-down screen)
pub const FRONT_FACE: i32 = 1;

/// Counters accumulated across draw calls until [`Renderer::reset_stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Model triangles handed to the pipeline
    pub triangles_submitted: usize,
    /// Triangles entirely behind the near plane
    pub triangles_clipped_away: usize,
    /// Screen-space triangles produced by the clipper
    pub triangles_rasterized: usize,
    /// Flat, back-facing or behind-camera triangles skipped by the scan converter
    pub triangles_rejected: usize,
    /// Pixels that passed the depth test
    pub pixels_written: usize,
}

/// Software renderer for 3D triangles
///
/// Holds the bound texture sampler; every pixel drawn is multiplied by a
/// sample from it until it is changed.
#[derive(Default)]
pub struct Renderer<'s> {
    sampler: Option<&'s dyn Surface>,
    stats: RenderStats,
}

impl<'s> Renderer<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change which surface textures are sampled from, if any
    pub fn set_sampler(&mut self, sampler: Option<&'s dyn Surface>) {
        self.sampler = sampler;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = RenderStats::default();
    }

    /// Draw a single screen-space triangle. `clip` is the width and height
    /// of the screen rectangle that rows and columns get clamped to.
    pub fn blit_triangle<S: Surface>(&mut self, target: &mut Target<S>, clip: Vec2, triangle: &Triangle) {
        let [a, b, c] = &triangle.vertices;
        let (ya, yb, yc) = (a.pos.y, b.pos.y, c.pos.y);

        // completely flat triangles don't get drawn
        if ya == yb && yb == yc {
            self.stats.triangles_rejected += 1;
            return;
        }

        if triangle.winding_order() != FRONT_FACE {
            self.stats.triangles_rejected += 1;
            return;
        }

        // partially behind us; clipping should have prevented this
        if a.pos.z <= 0.0 || b.pos.z <= 0.0 || c.pos.z <= 0.0 {
            self.stats.triangles_rejected += 1;
            return;
        }

        if ya != yb && yb != yc && yc != ya {
            self.split_triangle(target, clip, a, b, c);
        } else if ya != yb && yb == yc {
            self.fill_flat_triangle(target, clip, a, b, c);
        } else if ya == yb {
            // rotate so the odd vertex out comes first
            self.blit_triangle(target, clip, &Triangle::new(*c, *a, *b));
        } else {
            self.blit_triangle(target, clip, &Triangle::new(*b, *c, *a));
        }
    }

    /// Cut a triangle with no horizontal edge into two flat ones
    fn split_triangle<S: Surface>(
        &mut self,
        target: &mut Target<S>,
        clip: Vec2,
        a: &Vertex,
        b: &Vertex,
        c: &Vertex,
    ) {
        let mut sorted = [a, b, c];
        sorted.sort_by(|p, q| p.pos.y.total_cmp(&q.pos.y));
        let [v1, v2, v3] = sorted;

        // v4 sits on the long edge at v2's height
        let p = inv_lerp(v2.pos.y, v1.pos.y, v3.pos.y);
        let mut v4 = Vertex::lerp(&v1.interp(), &v3.interp(), p).restore();
        v4.pos.x = lerp(v1.pos.x, v3.pos.x, p);
        v4.pos.y = v2.pos.y;

        let order = Triangle::new(*v1, *v2, *v3).winding_order();
        if order == FRONT_FACE {
            self.blit_triangle(target, clip, &Triangle::new(*v1, *v2, v4));
            self.blit_triangle(target, clip, &Triangle::new(*v2, *v3, v4));
        } else if order == -FRONT_FACE {
            self.blit_triangle(target, clip, &Triangle::new(*v2, *v1, v4));
            self.blit_triangle(target, clip, &Triangle::new(*v3, *v2, v4));
        }
    }

    /// Fill a triangle whose last two vertices share a row. `apex` may sit
    /// above or below that base.
    fn fill_flat_triangle<S: Surface>(
        &mut self,
        target: &mut Target<S>,
        clip: Vec2,
        apex: &Vertex,
        b: &Vertex,
        c: &Vertex,
    ) {
        let y1 = apex.pos.y;
        let y2 = b.pos.y;
        let height = (y2.round() - y1.round()).abs();

        let (left, right) = if b.pos.x < c.pos.x { (b, c) } else { (c, b) };

        let apex_i = apex.interp();
        let left_i = left.interp();
        let right_i = right.interp();

        // Screen rows 0 and clip.y expressed in the apex-relative row space,
        // snapped to pixel centers
        let (top_clip, bottom_clip) = if y1 < y2 {
            (
                remap(0.0, y1, y2, 0.0, height).round() + 0.5,
                remap(clip.y, y1, y2, 0.0, height).round() - 0.5,
            )
        } else {
            (
                remap(clip.y, y1, y2, 0.0, height).round() + 0.5,
                remap(0.0, y1, y2, 0.0, height).round() - 0.5,
            )
        };

        for y in pixel_steps(top_clip.max(0.5), height.min(bottom_clip)) {
            let x1 = remap(y, 0.0, height, apex.pos.x, left.pos.x).round();
            let x2 = remap(y, 0.0, height, apex.pos.x, right.pos.x).round();

            let yp = inv_lerp(y, 0.0, height);
            let row = lerp(y1, y2, yp) as i32;

            for x in pixel_steps(x1.max(0.5), x2.min(clip.x - 0.5)) {
                let xp = if x2 > x1 { inv_lerp(x, x1, x2) } else { 0.0 };

                let vertex = Vertex::lerp(&apex_i, &Vertex::lerp(&left_i, &right_i, xp), yp).restore();

                let mut color = Color::from_vec4(vertex.color);
                if let Some(sampler) = self.sampler {
                    color = color.blend(sampler.sample(vertex.uv.x, vertex.uv.y));
                }

                if target.blit(x as i32, row, vertex.pos.z / DEPTH_SCALE, color) {
                    self.stats.pixels_written += 1;
                }
            }
        }
    }

    /// Clip a view-space triangle to the near plane, project what is left
    /// and draw it
    pub fn blit_clipped_triangle<S: Surface>(&mut self, target: &mut Target<S>, screen: &Screen, triangle: &Triangle) {
        let clip = Vec2::new(screen.width, screen.height);

        let pieces = clip_near(triangle);
        if pieces.is_empty() {
            self.stats.triangles_clipped_away += 1;
            return;
        }

        for piece in &pieces {
            self.stats.triangles_rasterized += 1;
            let projected = piece.map_positions(|p| screen.to_screen(p.xyz()));
            self.blit_triangle(target, clip, &projected);
        }
    }

    /// Draw a model-space triangle placed by `transform`
    pub fn blit_world_triangle<S: Surface>(
        &mut self,
        target: &mut Target<S>,
        camera: &Camera,
        screen: &Screen,
        triangle: &Triangle,
        transform: &Mat4,
    ) {
        let view = triangle.map_positions(|p| camera.to_view(transform.transform(p).xyz()));
        self.blit_clipped_triangle(target, screen, &view);
    }

    /// Draw every triangle of a model, in order
    pub fn blit_model<S: Surface>(
        &mut self,
        target: &mut Target<S>,
        camera: &Camera,
        screen: &Screen,
        model: &Model,
        transform: &Mat4,
    ) {
        let before = self.stats;

        for triangle in &model.triangles {
            self.stats.triangles_submitted += 1;
            self.blit_world_triangle(target, camera, screen, triangle, transform);
        }

        log::trace!(
            "model: {} triangles, {} clipped away, {} rejected, {} pixels",
            model.len(),
            self.stats.triangles_clipped_away - before.triangles_clipped_away,
            self.stats.triangles_rejected - before.triangles_rejected,
            self.stats.pixels_written - before.pixels_written,
        );
    }

    /// [`Renderer::blit_model`] without a model transform
    pub fn blit_model_identity<S: Surface>(
        &mut self,
        target: &mut Target<S>,
        camera: &Camera,
        screen: &Screen,
        model: &Model,
    ) {
        self.blit_model(target, camera, screen, model, &Mat4::IDENTITY);
    }
}

/// `start, start + 1, ...` while `<= end`. Counting instead of accumulating
/// keeps huge or non-finite bounds from looping forever.
fn pixel_steps(start: f32, end: f32) -> impl Iterator<Item = f32> {
    let count = if end >= start { ((end - start).floor() as u32).saturating_add(1) } else { 0 };
    (0..count).map(move |i| start + i as f32)
}
