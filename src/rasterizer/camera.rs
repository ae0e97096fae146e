//! Camera pose and screen projection

use serde::{Deserialize, Serialize};

use super::math::{remap, Vec3};

/// Vertical turn limit in degrees (keeps the view from flipping over)
pub const VERTICAL_TURN_LIMIT: f32 = 89.9;

/// Camera state
///
/// View space is reached by rotating about Y by `horizontal_turn`, then
/// about X by `vertical_turn`. Both angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation about the vertical (Y) axis, unbounded
    pub horizontal_turn: f32,
    /// Rotation about the horizontal (X) axis, clamped by [`Camera::turn`]
    pub vertical_turn: f32,
}

impl Camera {
    pub fn new(position: Vec3, horizontal_turn: f32, vertical_turn: f32) -> Self {
        Self {
            position,
            horizontal_turn,
            vertical_turn,
        }
    }

    /// Turn the camera around both axes by the given amounts
    pub fn turn(&mut self, horizontal_delta: f32, vertical_delta: f32) {
        self.horizontal_turn += horizontal_delta;
        self.vertical_turn = (self.vertical_turn + vertical_delta)
            .clamp(-VERTICAL_TURN_LIMIT, VERTICAL_TURN_LIMIT);
    }

    /// Move along axes aligned with the horizontal heading only
    pub fn advance(&mut self, forward: f32, strafe: f32, ascend: f32) {
        let step = Vec3::new(strafe, ascend, forward).rotate_y(-self.horizontal_turn.to_radians());
        self.position = self.position + step;
    }

    /// Translate a world-space point into view space
    pub fn to_view(&self, pos: Vec3) -> Vec3 {
        (pos - self.position)
            .rotate_y(self.horizontal_turn.to_radians())
            .rotate_x(self.vertical_turn.to_radians())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

/// What is needed to go from view space to screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32, fov: f32) -> Self {
        Self { width, height, fov }
    }

    /// Project a view-space point onto the screen; z is kept as view depth.
    /// The square [-1, 1] frustum slice is centered horizontally, and +Y up
    /// in view space becomes +Y down on screen.
    pub fn to_screen(&self, pos: Vec3) -> Vec3 {
        let diff = self.width - self.height;
        let fov_factor = self.fov / 90.0;

        Vec3 {
            x: remap(pos.x / (pos.z * fov_factor), -1.0, 1.0, diff / 2.0, self.height + diff / 2.0),
            y: remap(pos.y / (pos.z * fov_factor), -1.0, 1.0, self.height, 0.0),
            z: pos.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).len() < 1e-4
    }

    #[test]
    fn test_to_view_identity() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        assert!(close(camera.to_view(Vec3::new(1.0, 2.0, 4.0)), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_to_view_rotation_order() {
        // Y rotation happens first, X rotation second
        let camera = Camera::new(Vec3::ZERO, 90.0, 90.0);
        let p = Vec3::new(0.0, 0.0, 1.0);
        let expected = p.rotate_y(90f32.to_radians()).rotate_x(90f32.to_radians());
        assert!(close(camera.to_view(p), expected));
        assert!(close(expected, Vec3::new(1.0, 0.0, 0.0)));

        let swapped = p.rotate_x(90f32.to_radians()).rotate_y(90f32.to_radians());
        assert!(!close(camera.to_view(p), swapped));
    }

    #[test]
    fn test_turn_clamps_vertical_only() {
        let mut camera = Camera::default();
        camera.turn(400.0, 120.0);
        assert_eq!(camera.horizontal_turn, 400.0);
        assert_eq!(camera.vertical_turn, VERTICAL_TURN_LIMIT);

        camera.turn(0.0, -500.0);
        assert_eq!(camera.vertical_turn, -VERTICAL_TURN_LIMIT);
    }

    #[test]
    fn test_advance_follows_heading() {
        let mut camera = Camera::new(Vec3::ZERO, 0.0, 30.0);
        camera.advance(1.0, 0.0, 0.0);
        assert!(close(camera.position, Vec3::new(0.0, 0.0, 1.0)));

        // Walking forward after a turn keeps the point straight ahead
        let mut camera = Camera::new(Vec3::ZERO, 45.0, 0.0);
        camera.advance(2.0, 0.0, 0.0);
        let target = Camera::new(Vec3::ZERO, 45.0, 0.0).to_view(camera.position);
        assert!(close(target, Vec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_to_screen_center_and_edges() {
        let screen = Screen::new(400.0, 240.0, 90.0);
        assert!(close(screen.to_screen(Vec3::new(0.0, 0.0, 5.0)), Vec3::new(200.0, 120.0, 5.0)));

        // x/z = -1 lands on the left edge of the centered square
        let left_top = screen.to_screen(Vec3::new(-2.0, 2.0, 2.0));
        assert!(close(left_top, Vec3::new(80.0, 0.0, 2.0)));
    }

    #[test]
    fn test_to_screen_fov_scales() {
        let narrow = Screen::new(100.0, 100.0, 45.0);
        // fov 45 halves the divisor, doubling the offset from center
        let p = narrow.to_screen(Vec3::new(0.25, 0.0, 1.0));
        assert!((p.x - 75.0).abs() < 1e-4);
    }
}
