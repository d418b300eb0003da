//! Math utilities and types
//!
//! Provides fundamental math types for 3D collision detection and
//! kinematic movement resolution.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up axis. The whole engine assumes a Y-up world.
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// World down axis, used by the slope and vertical-escape policies.
pub fn down() -> Vec3 {
    Vec3::new(0.0, -1.0, 0.0)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Apply a homogeneous transform to a position vector.
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(point)).coords
}

/// Apply a homogeneous transform to a direction vector (no translation).
pub fn transform_vector(matrix: &Mat4, vector: Vec3) -> Vec3 {
    matrix.transform_vector(&vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_point_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let moved = transform_point(&matrix, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Vec3::new(2.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(5.0, 5.0, 5.0));
        let dir = transform_vector(&matrix, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(dir, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
