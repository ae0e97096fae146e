//! Near-plane clipping of view-space triangles
//!
//! Only the near plane is clipped here. Left/right/top/bottom are handled by
//! the scan bounds in the rasterizer.

use super::math::inv_lerp;
use super::types::{Triangle, Vertex};

/// Distance from the camera at which triangles get clipped
pub const CLIP_PLANE: f32 = 0.1;

/// Up to three triangles produced by clipping one triangle
#[derive(Debug, Clone, Copy)]
pub struct ClippedTriangles {
    triangles: [Triangle; 3],
    len: usize,
}

impl ClippedTriangles {
    fn empty() -> Self {
        let v = Vertex::default();
        Self {
            triangles: [Triangle::new(v, v, v); 3],
            len: 0,
        }
    }

    fn push(&mut self, triangle: Triangle) {
        self.triangles[self.len] = triangle;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> IntoIterator for &'a ClippedTriangles {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Point where the edge from `from` (behind) toward `to` crosses the plane
fn intersect(from: &Vertex, to: &Vertex) -> Vertex {
    Vertex::lerp(from, to, inv_lerp(CLIP_PLANE, from.pos.z, to.pos.z))
}

/// Clip a view-space triangle against the near plane.
///
/// Emits nothing when every vertex is behind the plane, the triangle itself
/// when none is, three triangles when one is (the remaining quad is fanned
/// around the midpoint of the far edge) and one triangle when two are.
/// Every output keeps the winding order of the input.
pub fn clip_near(triangle: &Triangle) -> ClippedTriangles {
    let verts = &triangle.vertices;
    let clipped = [
        verts[0].pos.z < CLIP_PLANE,
        verts[1].pos.z < CLIP_PLANE,
        verts[2].pos.z < CLIP_PLANE,
    ];

    let mut out = ClippedTriangles::empty();

    match clipped.iter().filter(|&&c| c).count() {
        0 => out.push(*triangle),
        1 => {
            // Rotate so the clipped vertex comes first; rotation keeps the winding
            let i = clipped.iter().position(|&c| c).unwrap_or(0);
            let a = &verts[i];
            let b = &verts[(i + 1) % 3];
            let c = &verts[(i + 2) % 3];

            let to_b = intersect(a, b);
            let to_c = intersect(a, c);
            let mid = Vertex::lerp(b, c, 0.5);

            out.push(Triangle::new(to_b, *b, mid));
            out.push(Triangle::new(to_c, to_b, mid));
            out.push(Triangle::new(to_c, mid, *c));
        }
        2 => {
            let i = clipped.iter().position(|&c| !c).unwrap_or(0);
            let c = &verts[i];
            let next = &verts[(i + 1) % 3];
            let prev = &verts[(i + 2) % 3];

            out.push(Triangle::new(*c, intersect(next, c), intersect(prev, c)));
        }
        _ => {}
    }

    out
}
