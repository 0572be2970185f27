//! A free-flying first-person camera.

use re::math::{Mat4, Vec3};
use re_front::{Input, Key};

/// Movement speed in units per second.
const SPEED: f32 = 2.0;
/// Turning speed in radians per second.
const TURN_SPEED: f32 = 1.5;

/// A camera with a position and a heading in the XZ plane.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub pos: Vec3,
    /// Unit vector the camera is looking towards.
    pub dir: Vec3,
    /// Unit vector pointing to the camera's right.
    pub right: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
}

impl Camera {
    /// Returns a camera at `pos` looking down the negative Z axis.
    pub fn new(pos: Vec3, aspect: f32) -> Self {
        Self {
            pos,
            dir: Vec3::NEG_Z,
            right: Vec3::X,
            fov: 90f32.to_radians(),
            aspect,
        }
    }

    /// Moves and turns the camera according to the held keys.
    ///
    /// W/S move forward and back, A/D strafe, Space/Shift rise and sink,
    /// and Q/E turn left and right.
    pub fn update(&mut self, input: &Input, dt: f32) {
        let step = SPEED * dt;
        let mut delta = Vec3::ZERO;
        for (key, dir) in [
            (Key::W, self.dir),
            (Key::S, -self.dir),
            (Key::D, self.right),
            (Key::A, -self.right),
            (Key::Space, Vec3::Y),
            (Key::Shift, Vec3::NEG_Y),
        ] {
            if input.is_down(key) {
                delta += dir;
            }
        }
        self.pos += delta * step;

        let mut turn = 0.0;
        if input.is_down(Key::Q) {
            turn += TURN_SPEED * dt;
        }
        if input.is_down(Key::E) {
            turn -= TURN_SPEED * dt;
        }
        if turn != 0.0 {
            let rot = Mat4::from_rotation_y(turn);
            self.dir = rot.transform_vector3(self.dir).normalize();
            self.right = rot.transform_vector3(self.right).normalize();
        }
    }

    /// Returns the world-to-view matrix.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.pos, self.pos + self.dir, Vec3::Y)
    }

    /// Returns the view-to-clip matrix.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, 0.1, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use re::assert_approx_eq;

    use super::*;

    fn input(keys: &[Key]) -> Input {
        Input { keys: keys.to_vec() }
    }

    #[test]
    fn moves_forward_and_strafes() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0);
        cam.update(&input(&[Key::W]), 0.5);
        assert_approx_eq!(cam.pos, Vec3::new(0.0, 0.0, -1.0));
        cam.update(&input(&[Key::D, Key::Space]), 0.5);
        assert_approx_eq!(cam.pos, Vec3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn turning_left_keeps_basis_orthonormal() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0);
        cam.update(&input(&[Key::Q]), core::f32::consts::FRAC_PI_2 / TURN_SPEED);
        assert_approx_eq!(cam.dir, Vec3::NEG_X, eps = 1e-6);
        assert_approx_eq!(cam.right, Vec3::NEG_Z, eps = 1e-6);
        assert_approx_eq!(cam.dir.dot(cam.right), 0.0, eps = 1e-6);
    }
}
