//! 2D pixel surfaces
//!
//! Both the render target's backing store and texture samplers go through
//! the [`Surface`] trait.

use super::types::Color;

/// A readable/writable grid of pixels
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Opaque black outside the surface
    fn get_pixel(&self, x: usize, y: usize) -> Color;

    /// Ignored outside the surface
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);

    fn fill(&mut self, color: Color);

    /// Sample at normalized coordinates with the origin at the bottom-left
    /// (no filtering). Anything outside [0, 1] samples opaque black.
    fn sample(&self, u: f32, v: f32) -> Color {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Color::BLACK;
        }
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Color::BLACK;
        }

        let x = ((u * width as f32) as usize).min(width - 1);
        let y = (((1.0 - v) * height as f32) as usize).min(height - 1);
        self.get_pixel(x, y)
    }
}

/// RGBA framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Surface for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        } else {
            Color::BLACK
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    fn fill(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_set_get() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(3, 2, Color::GREEN);
        assert_eq!(fb.get_pixel(3, 2), Color::GREEN);
        assert_eq!(fb.get_pixel(0, 0), Color::with_alpha(0, 0, 0, 0));
    }

    #[test]
    fn test_framebuffer_out_of_bounds() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(4, 0, Color::RED);
        fb.set_pixel(0, 3, Color::RED);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.get_pixel(10, 10), Color::BLACK);
    }

    #[test]
    fn test_framebuffer_fill() {
        let mut fb = Framebuffer::new(5, 5);
        fb.fill(Color::BLUE);
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p == [0, 0, 255, 255]));
    }

    #[test]
    fn test_sample_one_by_one() {
        let mut fb = Framebuffer::new(1, 1);
        fb.fill(Color::new(128, 128, 128));
        assert_eq!(fb.sample(0.0, 0.0), Color::new(128, 128, 128));
        assert_eq!(fb.sample(1.0, 1.0), Color::new(128, 128, 128));
        assert_eq!(fb.sample(0.5, 1.01), Color::BLACK);
    }
}
