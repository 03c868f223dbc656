use cgmath::{Deg, Matrix3, Vector3};

/// Rotation from euler angles in degrees, applied as yaw (Y), pitch (X), roll (Z).
pub fn euler_rotation(rotation: Vector3<f32>) -> Matrix3<f32> {
    Matrix3::from_angle_y(Deg(rotation.y))
        * Matrix3::from_angle_x(Deg(rotation.x))
        * Matrix3::from_angle_z(Deg(rotation.z))
}

#[cfg(test)]
pub(crate) fn mat4_approx_eq(
    a: &cgmath::Matrix4<f32>,
    b: &cgmath::Matrix4<f32>,
    epsilon: f32,
) -> bool {
    let a: &[f32; 16] = a.as_ref();
    let b: &[f32; 16] = b.as_ref();

    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Matrix4, SquareMatrix};

    #[test]
    fn zero_rotation_is_identity() {
        let rot = euler_rotation(Vector3::new(0.0, 0.0, 0.0));

        assert!(mat4_approx_eq(
            &Matrix4::from(rot),
            &Matrix4::identity(),
            1e-6
        ));
    }

    #[test]
    fn yaw_turns_forward_to_the_left() {
        let rot = euler_rotation(Vector3::new(0.0, 90.0, 0.0));
        let forward = rot * Vector3::new(0.0, 0.0, -1.0);

        assert!((forward - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-6);
    }
}
