//! Vector math for 3D rendering
//! Small hand-rolled f32 vectors and a row-major 4x4 matrix

use std::ops::{Add, Div, Mul, Sub};
use serde::{Serialize, Deserialize};

/// Linearly interpolate between `a` and `b` by `p`
pub fn lerp(a: f32, b: f32, p: f32) -> f32 {
    a + p * (b - a)
}

/// Progress of `x` between `a` and `b`
pub fn inv_lerp(x: f32, a: f32, b: f32) -> f32 {
    (x - a) / (b - a)
}

/// Convert `x` from the range [a, b] to [c, d]
pub fn remap(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    lerp(c, d, inv_lerp(x, a, b))
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Vec2, p: f32) -> Vec2 {
        self + (other - self) * p
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, s: f32) -> Vec2 {
        Vec2::new(self.x / s, self.y / s)
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Drop z, keeping the screen-space footprint
    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Rotate about the Y axis (right-handed, angle in radians)
    pub fn rotate_y(self, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3 {
            x: self.x * c + self.z * s,
            y: self.y,
            z: -self.x * s + self.z * c,
        }
    }

    /// Rotate about the X axis (right-handed, angle in radians)
    pub fn rotate_x(self, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3 {
            x: self.x,
            y: self.y * c - self.z * s,
            z: self.y * s + self.z * c,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 4D Vector (homogeneous positions and float colors)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extend a point with the given w
    pub fn from_vec3(v: Vec3, w: f32) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn lerp(self, other: Vec4, p: f32) -> Vec4 {
        self + (other - self) * p
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, o: Vec4) -> Vec4 {
        Vec4::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, o: Vec4) -> Vec4 {
        Vec4::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        Vec4::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    fn div(self, s: f32) -> Vec4 {
        Vec4::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

/// Row-major 4x4 matrix, applied as `M * v` to column vectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = t.x;
        out.m[1][3] = t.y;
        out.m[2][3] = t.z;
        out
    }

    pub fn scale(s: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    /// Rotation about the Y axis, angle in degrees (same sense as `Vec3::rotate_y`)
    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat4 {
            m: [
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        Mat4 { m: result }
    }
}

/// Calculate barycentric coordinates for point p in triangle (v1, v2, v3)
/// Returns (u, v, w) where u + v + w = 1 if point is inside triangle
#[cfg(test)]
pub(crate) fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> Vec3 {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.abs() < 0.0001 {
        return Vec3::new(-1.0, -1.0, -1.0); // Degenerate triangle
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    Vec3::new(u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap() {
        assert!((remap(0.0, -1.0, 1.0, 0.0, 100.0) - 50.0).abs() < 0.001);
        assert!((remap(1.0, -1.0, 1.0, 240.0, 0.0)).abs() < 0.001);
        assert!((inv_lerp(15.0, 10.0, 20.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_vec2_cross() {
        let a = Vec2::new(10.0, 0.0);
        let b = Vec2::new(5.0, 10.0);
        assert!((a.cross(b) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // +Z swings onto +X
        let v = Vec3::new(0.0, 0.0, 1.0).rotate_y(90f32.to_radians());
        assert!((v.x - 1.0).abs() < 0.001);
        assert!(v.z.abs() < 0.001);
    }

    #[test]
    fn test_rotate_x_quarter_turn() {
        // +Y swings onto +Z
        let v = Vec3::new(0.0, 1.0, 0.0).rotate_x(90f32.to_radians());
        assert!((v.z - 1.0).abs() < 0.001);
        assert!(v.y.abs() < 0.001);
    }

    #[test]
    fn test_mat4_matches_vec3_rotation() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let by_mat = Mat4::rotation_y(30.0).transform(Vec4::from_vec3(p, 1.0));
        let by_vec = p.rotate_y(30f32.to_radians());
        assert!((by_mat.xyz() - by_vec).len() < 0.001);
    }

    #[test]
    fn test_mat4_translation_then_scale() {
        let m = Mat4::translation(Vec3::new(-2.0, 0.0, 2.0)) * Mat4::scale(Vec3::new(2.0, 2.0, 2.0));
        let p = m.transform(Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(p, Vec4::new(0.0, 2.0, 4.0, 1.0));
    }

    #[test]
    fn test_barycentric_inside() {
        let v1 = Vec2::new(0.0, 0.0);
        let v2 = Vec2::new(10.0, 0.0);
        let v3 = Vec2::new(5.0, 10.0);
        let p = Vec2::new(5.0, 3.0);
        let bc = barycentric(p, v1, v2, v3);
        assert!(bc.x >= 0.0 && bc.y >= 0.0 && bc.z >= 0.0);
        assert!((bc.x + bc.y + bc.z - 1.0).abs() < 0.001);
    }
}
