use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Squared length below which a look direction counts as zero.
const ZERO_DIRECTION_SQ: f32 = 1e-12;

/// Squared cross-product length below which direction and up-hint count as
/// parallel.
const NEAR_PARALLEL_SQ: f32 = 1e-6;

/// Local position, rotation, and scale of a scene node.
///
/// Rotation is stored as a quaternion. The Euler convenience constructor
/// uses intrinsic XYZ order; see [`Transform::from_euler`].
///
/// A zero `scale` component is legal: the local matrix is degenerate but
/// well-defined, and nothing in the graph rejects or collapses it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builds a rotation-only transform from Euler angles in radians,
    /// applied in intrinsic XYZ order (rotate about X, then Y, then Z).
    #[inline]
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self {
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local matrix, composed as `Translate(position) · Rotate(rotation) ·
    /// Scale(scale)` in that fixed order.
    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Builds the orientation whose local −Z axis points from `eye` toward
/// `target`, with local +Y as close to `up_hint` as the direction allows.
///
/// Returns `None` only when `target - eye` has (near-)zero length. An
/// `up_hint` parallel to the direction is not an error: the up axis falls
/// back to world X, and to world Z when the direction lies on the X axis.
pub fn look_at_rotation(eye: Vec3, target: Vec3, up_hint: Vec3) -> Option<Quat> {
    let dir = target - eye;
    if dir.length_squared() <= ZERO_DIRECTION_SQ {
        return None;
    }

    // Camera-space basis: +Z points backward, so the view direction is −Z.
    let back = (-dir).normalize();

    let mut up = up_hint.normalize_or_zero();
    if up == Vec3::ZERO {
        up = Vec3::Y;
    }
    if up.cross(back).length_squared() < NEAR_PARALLEL_SQ {
        up = Vec3::X;
        if up.cross(back).length_squared() < NEAR_PARALLEL_SQ {
            up = Vec3::Z;
        }
    }

    let right = up.cross(back).normalize();
    let cam_up = back.cross(right);

    Some(Quat::from_mat3(&Mat3::from_cols(right, cam_up, back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ── local_matrix ──────────────────────────────────────────────────────

    #[test]
    fn local_matrix_identity_by_default() {
        assert_eq!(Transform::new().local_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn local_matrix_composes_translate_rotate_scale() {
        // Scale first, then rotate 90° about Z, then translate.
        let t = Transform::new()
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2))
            .with_scale(Vec3::splat(2.0));

        let p = t.local_matrix().transform_point3(Vec3::X);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_scale_is_degenerate_but_well_defined() {
        let t = Transform::new().with_scale(Vec3::ZERO);
        let m = t.local_matrix();
        assert!(m.is_finite());
        assert_eq!(m.transform_point3(Vec3::new(5.0, -3.0, 9.0)), Vec3::ZERO);
    }

    // ── look_at_rotation ──────────────────────────────────────────────────

    #[test]
    fn look_down_negative_z_is_identity() {
        let q = look_at_rotation(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), Vec3::Y).unwrap();
        assert_abs_diff_eq!(q.angle_between(Quat::IDENTITY), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn forward_axis_points_at_target() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(-4.0, 0.5, 7.0);
        let q = look_at_rotation(eye, target, Vec3::Y).unwrap();

        let forward = q * Vec3::NEG_Z;
        let expected = (target - eye).normalize();
        assert_abs_diff_eq!(forward.x, expected.x, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.y, expected.y, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn zero_length_direction_is_none() {
        let eye = Vec3::new(2.0, 2.0, 2.0);
        assert!(look_at_rotation(eye, eye, Vec3::Y).is_none());
    }

    #[test]
    fn up_parallel_to_direction_falls_back_to_world_x() {
        // Looking straight up with an up-hint of +Y: degenerate pair, must
        // still produce a valid basis instead of erroring.
        let q = look_at_rotation(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), Vec3::Y).unwrap();

        let forward = q * Vec3::NEG_Z;
        assert_abs_diff_eq!(forward.y, 1.0, epsilon = 1e-5);

        let right = q * Vec3::X;
        assert!(right.is_finite());
        assert_abs_diff_eq!(right.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn direction_on_x_axis_with_x_hint_falls_back_to_world_z() {
        let q = look_at_rotation(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::X).unwrap();
        let forward = q * Vec3::NEG_Z;
        assert_abs_diff_eq!(forward.x, 1.0, epsilon = 1e-5);
    }
}
