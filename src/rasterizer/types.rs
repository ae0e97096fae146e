//! Core types for the rasterizer

use serde::{Deserialize, Serialize};

use super::math::{Vec2, Vec3, Vec4};
use super::surface::Surface;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Float color on the 0-255 scale, as carried by vertices
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32)
    }

    /// Collapse a 0-255 float color to 8 bits (clamped, rounded to nearest)
    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            r: to_channel(v.x),
            g: to_channel(v.y),
            b: to_channel(v.z),
            a: to_channel(v.w),
        }
    }

    /// Multiply two colors channel-wise in normalized [0, 1] space
    pub fn blend(self, other: Color) -> Self {
        let mix = |a: u8, b: u8| (a as f32 / 255.0) * (b as f32 / 255.0) * 255.0;
        Self {
            r: to_channel(mix(self.r, other.r)),
            g: to_channel(mix(self.g, other.g)),
            b: to_channel(mix(self.b, other.b)),
            a: to_channel(mix(self.a, other.a)),
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn to_channel(c: f32) -> u8 {
    // NaN falls through `as` to 0
    c.clamp(0.0, 255.0).round() as u8
}

/// A vertex with homogeneous position, float color and texture coordinate
///
/// Outside of interpolation `pos.w` is always 1.0. [`Vertex::interp`] and
/// [`Vertex::restore`] move a vertex in and out of the 1/z space where
/// screen-space blending is perspective-correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec4,
    /// 0-255 scale per channel
    pub color: Vec4,
    /// Normalized, origin at the bottom-left of the texture
    pub uv: Vec2,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec4::new(0.0, 0.0, 0.0, 1.0),
            color: Color::WHITE.to_vec4(),
            uv: Vec2::ZERO,
        }
    }
}

impl Vertex {
    pub fn new(pos: Vec3, color: Color, uv: Vec2) -> Self {
        Self {
            pos: Vec4::from_vec3(pos, 1.0),
            color: color.to_vec4(),
            uv,
        }
    }

    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec4::new(x, y, z, 1.0),
            ..Default::default()
        }
    }

    pub fn colored(pos: Vec3, color: Color) -> Self {
        Self::new(pos, color, Vec2::ZERO)
    }

    pub fn textured(pos: Vec3, uv: Vec2) -> Self {
        Self::new(pos, Color::WHITE, uv)
    }

    /// Same attributes at a new position (w reset to 1)
    pub fn with_position(self, pos: Vec3) -> Self {
        Self {
            pos: Vec4::from_vec3(pos, 1.0),
            ..self
        }
    }

    /// Interpolation-ready form: every field scaled by 1/z, w holds 1/z
    pub fn interp(&self) -> Self {
        let w = 1.0 / self.pos.z;
        Self {
            pos: Vec4::new(self.pos.x * w, self.pos.y * w, self.pos.z * w, w),
            color: self.color * w,
            uv: self.uv * w,
        }
    }

    /// Undo [`Vertex::interp`] after blending: divide by w, reset w to 1
    pub fn restore(&self) -> Self {
        let w = self.pos.w;
        Self {
            pos: Vec4::new(self.pos.x / w, self.pos.y / w, self.pos.z / w, 1.0),
            color: self.color / w,
            uv: self.uv / w,
        }
    }

    /// Blend every field componentwise
    pub fn lerp(a: &Vertex, b: &Vertex, p: f32) -> Self {
        Self {
            pos: a.pos.lerp(b.pos, p),
            color: a.color.lerp(b.color, p),
            uv: a.uv.lerp(b.uv, p),
        }
    }
}

/// The 3 ordered vertices of a single triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Sign of the cross product of the first two edges in x/y:
    /// 1 = clockwise on a y-down screen, -1 = counter-clockwise, 0 = flat
    pub fn winding_order(&self) -> i32 {
        let p0 = self.vertices[0].pos.xyz().xy();
        let p1 = self.vertices[1].pos.xyz().xy();
        let p2 = self.vertices[2].pos.xyz().xy();

        let cross = (p1 - p0).cross(p2 - p0);
        if cross > 0.0 {
            1
        } else if cross < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Replace every position, keeping colors and texture coordinates
    pub fn map_positions(&self, f: impl Fn(Vec4) -> Vec3) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(
            a.with_position(f(a.pos)),
            b.with_position(f(b.pos)),
            c.with_position(f(c.pos)),
        )
    }
}

/// All the triangles of a 3D model, in draw order
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Simple texture (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self::solid(width, height, Color::WHITE)
    }

    pub fn solid(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
            name: String::new(),
        }
    }

    /// Load texture from an image file (png, jpeg or bmp)
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::from_image(img, name))
    }

    /// Load texture from raw encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, String> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        Ok(Self::from_image(img, name))
    }

    fn from_image(img: image::DynamicImage, name: String) -> Self {
        use image::GenericImageView;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }
}

impl Surface for Texture {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::BLACK
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}
