use glam::Mat4;

/// Frustum parameters for the two projection kinds.
///
/// The projection matrix is always re-derivable from these parameters plus
/// nothing else; [`Camera`](super::Camera) rebuilds its cached matrix on
/// every parameter change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees.
        fov_y_degrees: f32,
        /// Width / height of the view plane.
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// The standard OpenGL-style frustum matrix for the current parameters
    /// (clip-space z in [-1, 1]).
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y_degrees,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh_gl(left, right, bottom, top, near, far),
        }
    }

    #[inline]
    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }
}
