use cgmath::{Matrix4, Vector3, Vector4};

use crate::math::euler_rotation;

/// Transform and flat color of a drawable object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Model3D {
    pub position: Vector3<f32>,
    /// Euler angles in degrees
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub color: Vector4<f32>,
}

impl Default for Model3D {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Model3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Vector4<f32>) -> Self {
        self.color = color;
        self
    }

    /// Translation * rotation * scale.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(euler_rotation(self.rotation))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn color(&self) -> Vector4<f32> {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mat4_approx_eq;
    use cgmath::{InnerSpace, SquareMatrix, Vector4};

    #[test]
    fn default_is_identity() {
        let model = Model3D::default();

        assert!(mat4_approx_eq(
            &model.model_matrix(),
            &Matrix4::identity(),
            1e-6
        ));
        assert_eq!(model.color(), Vector4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let model = Model3D::new()
            .with_position(Vector3::new(1.0, 2.0, 3.0))
            .with_rotation(Vector3::new(0.0, 90.0, 0.0))
            .with_scale(Vector3::new(2.0, 2.0, 2.0));

        let p = model.model_matrix() * Vector4::new(0.0, 0.0, -1.0, 1.0);

        // (0, 0, -1) scaled to (0, 0, -2), yawed to (-2, 0, 0), moved by (1, 2, 3)
        assert!((p.truncate() - Vector3::new(-1.0, 2.0, 3.0)).magnitude() < 1e-5);
        assert!((p.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn color_is_kept() {
        let model = Model3D::new().with_color(Vector4::new(0.1, 0.2, 0.3, 0.4));

        assert_eq!(model.color(), Vector4::new(0.1, 0.2, 0.3, 0.4));
    }
}
