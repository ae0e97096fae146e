//! Depth-buffered render target

use super::surface::{Framebuffer, Surface};
use super::types::Color;

/// Depth value of a cleared buffer (farthest)
pub const DEPTH_CLEAR: f32 = 1.0;

/// A pixel surface paired with a same-size depth buffer
///
/// Created cleared; afterwards the caller clears it once per frame with
/// [`Target::clear_depth`] and [`Target::clear_surface`].
pub struct Target<S: Surface = Framebuffer> {
    surface: S,
    depth_buffer: Vec<f32>,
}

impl<S: Surface> Target<S> {
    pub fn new(surface: S) -> Self {
        let len = surface.width() * surface.height();
        Self {
            surface,
            depth_buffer: vec![DEPTH_CLEAR; len],
        }
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    /// Write one pixel if it lies on the surface and `depth` is strictly
    /// nearer than what is stored there. Returns whether it was written.
    pub fn blit(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return false;
        }

        let idx = y * self.width() + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.surface.set_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    pub fn read(&self, x: usize, y: usize) -> Color {
        self.surface.get_pixel(x, y)
    }

    /// Stored depth, `None` off the surface
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width() && y < self.height() {
            Some(self.depth_buffer[y * self.width() + x])
        } else {
            None
        }
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    pub fn clear_surface(&mut self, color: Color) {
        self.surface.fill(color);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_target_is_cleared() {
        let target = Target::new(Framebuffer::new(8, 4));
        assert_eq!(target.depth_buffer().len(), 32);
        assert!(target.depth_buffer().iter().all(|&d| d == DEPTH_CLEAR));
    }

    #[test]
    fn test_blit_depth_test() {
        let mut target = Target::new(Framebuffer::new(4, 4));
        assert!(target.blit(1, 2, 0.5, Color::RED));
        assert!(!target.blit(1, 2, 0.7, Color::BLUE));
        assert_eq!(target.read(1, 2), Color::RED);

        assert!(target.blit(1, 2, 0.2, Color::GREEN));
        assert_eq!(target.read(1, 2), Color::GREEN);
        assert_eq!(target.depth_at(1, 2), Some(0.2));
    }

    #[test]
    fn test_blit_tie_keeps_first() {
        let mut target = Target::new(Framebuffer::new(4, 4));
        target.blit(0, 0, 0.3, Color::RED);
        assert!(!target.blit(0, 0, 0.3, Color::BLUE));
        assert_eq!(target.read(0, 0), Color::RED);
    }

    #[test]
    fn test_blit_far_plane_rejected() {
        let mut target = Target::new(Framebuffer::new(4, 4));
        assert!(!target.blit(0, 0, DEPTH_CLEAR, Color::RED));
    }

    #[test]
    fn test_blit_out_of_bounds() {
        let mut target = Target::new(Framebuffer::new(4, 4));
        assert!(!target.blit(-1, 0, 0.1, Color::RED));
        assert!(!target.blit(0, 4, 0.1, Color::RED));
        assert!(!target.blit(4, 0, 0.1, Color::RED));
        assert!(target.depth_buffer().iter().all(|&d| d == DEPTH_CLEAR));
    }

    #[test]
    fn test_clear_depth_and_surface() {
        let mut target = Target::new(Framebuffer::new(2, 2));
        target.blit(1, 1, 0.1, Color::RED);
        target.clear_depth();
        target.clear_surface(Color::BLACK);
        assert_eq!(target.depth_at(1, 1), Some(DEPTH_CLEAR));
        assert_eq!(target.read(1, 1), Color::BLACK);
        assert_eq!(target.depth_at(2, 0), None);
    }

    #[test]
    fn test_surface_access() {
        let mut target = Target::new(Framebuffer::new(3, 3));
        target.surface_mut().set_pixel(2, 2, Color::BLUE);
        assert_eq!(target.read(2, 2), Color::BLUE);
        // Drawing straight to the surface leaves depth alone
        assert_eq!(target.depth_at(2, 2), Some(DEPTH_CLEAR));
        assert_eq!(target.surface().get_pixel(2, 2), Color::BLUE);
    }
}
