use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, Vector3};

use crate::math::euler_rotation;

const MAX_PITCH: f32 = 89.0;
const MIN_DISTANCE: f32 = 0.1;

/// Camera circling around `target`, driven by mouse drag and scroll.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Degrees around the Y axis
    pub yaw: f32,
    /// Degrees above the XZ plane
    pub pitch: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Point3::origin(),
            distance: 10.0,
            yaw: 0.0,
            pitch: 30.0,
            fov_y: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eye(&self) -> Point3<f32> {
        // looking down -Z at zero yaw, tilted down by the pitch
        let rot = euler_rotation(Vector3::new(-self.pitch, self.yaw, 0.0));
        let dir = rot * Vector3::new(0.0, 0.0, -1.0);

        self.target - dir * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), self.target, Vector3::unit_y())
    }

    pub fn projection(&self, aspect_ratio: f32) -> Matrix4<f32> {
        perspective(Deg(self.fov_y), aspect_ratio, self.near, self.far)
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw) % 360.0;
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Multiplies the distance to the target, e.g. `0.9` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).max(MIN_DISTANCE);
        }
    }
}
