use glam::{Affine3A, Mat4, Quat, Vec3};

/// Local TRS transform of a single bone.
///
/// Composes to a matrix in translate * rotate * scale order. Poses are plain
/// slices of `Transform`, one entry per bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub const fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Local matrix for CPU-side hierarchy math.
    #[inline]
    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local matrix as a full 4x4.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Component-wise blend towards `other`.
    ///
    /// Position and scale are lerped, rotation is slerped. `t = 0` returns
    /// `self`, `t = 1` returns `other`.
    #[must_use]
    pub fn blend(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Transform> for Affine3A {
    fn from(transform: Transform) -> Self {
        transform.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let a = Transform::from_translation(Vec3::ZERO);
        let b = Transform::new(
            Vec3::new(4.0, 0.0, 0.0),
            Quat::from_rotation_z(1.0),
            Vec3::splat(2.0),
        );

        assert_eq!(a.blend(&b, 0.0).position, a.position);
        let end = a.blend(&b, 1.0);
        assert!((end.position - b.position).length() < 1e-5);
        assert!(end.rotation.angle_between(b.rotation) < 1e-4);
        assert!((end.scale - b.scale).length() < 1e-5);

        let mid = a.blend(&b, 0.5);
        assert!((mid.position.x - 2.0).abs() < 1e-5);
        assert!((mid.scale.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn matrix_is_translate_rotate_scale() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::splat(2.0),
        );
        // Scale, then rotate +X onto +Y, then translate.
        let p = t.to_affine().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 4.0, 3.0)).length() < 1e-5, "got {p}");
        let q = t.to_matrix().transform_point3(Vec3::X);
        assert!((p - q).length() < 1e-5);
    }
}
