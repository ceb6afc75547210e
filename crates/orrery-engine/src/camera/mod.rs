//! Camera projection and orientation.
//!
//! Responsibilities:
//! - hold perspective/orthographic frustum parameters
//! - keep the cached projection matrix in sync with every parameter change
//! - maintain aspect ratio across surface resizes
//!
//! A camera is carried by a scene node
//! ([`NodePayload::Camera`](crate::scene::NodePayload)); its position and
//! orientation come from that node's world matrix.

mod projection;

use std::fmt;

use glam::{Mat4, Quat, Vec3};

pub use projection::Projection;

use crate::scene::look_at_rotation;

/// A rejected camera operation. Recoverable; the camera keeps its prior
/// parameters.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CameraError {
    /// `resize` was called with a zero-height surface; the aspect ratio
    /// would be undefined.
    InvalidAspect { width: u32, height: u32 },
    /// `look_at` with a target coinciding with the eye position.
    DegenerateLookAt,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::InvalidAspect { width, height } => {
                write!(f, "cannot derive aspect ratio from a {width}x{height} surface")
            }
            CameraError::DegenerateLookAt => {
                write!(f, "look-at direction has zero length (target equals eye)")
            }
        }
    }
}

impl std::error::Error for CameraError {}

/// Camera with a cached projection matrix.
///
/// Setters rebuild the cache eagerly, so the matrix observed by the renderer
/// never lags a parameter change.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: Projection,
    projection_matrix: Mat4,
}

impl Default for Camera {
    /// The demo-scene default: 75° vertical FOV, 16:9, near 0.1, far 100.
    fn default() -> Self {
        Self::perspective(75.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

impl Camera {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let projection = Projection::Perspective {
            fov_y_degrees,
            aspect,
            near,
            far,
        };
        Self {
            projection_matrix: projection.matrix(),
            projection,
        }
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let projection = Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
        };
        Self {
            projection_matrix: projection.matrix(),
            projection,
        }
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Projection::Perspective {
            fov_y_degrees,
            aspect,
            near,
            far,
        };
        self.update_projection_matrix();
    }

    pub fn set_orthographic(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
        };
        self.update_projection_matrix();
    }

    /// Recomputes the cached projection matrix from the current parameters.
    ///
    /// Setters and [`resize`](Self::resize) already call this; it only needs
    /// to be called directly after in-place edits through other means.
    #[inline]
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = self.projection.matrix();
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Adapts the frustum to a resized surface.
    ///
    /// Perspective cameras take `aspect = width / height`. Orthographic
    /// cameras keep their vertical extent (the configured zoom) and derive a
    /// centered horizontal extent from the new aspect ratio; an off-center
    /// horizontal extent becomes centered.
    ///
    /// Fails with [`CameraError::InvalidAspect`] on a zero-height surface,
    /// leaving the parameters unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        if height == 0 {
            return Err(CameraError::InvalidAspect { width, height });
        }
        let aspect = width as f32 / height as f32;

        match &mut self.projection {
            Projection::Perspective {
                aspect: stored, ..
            } => {
                *stored = aspect;
            }
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                ..
            } => {
                let half_width = aspect * 0.5 * (*top - *bottom);
                *left = -half_width;
                *right = half_width;
            }
        }

        self.update_projection_matrix();
        Ok(())
    }

    /// Builds the orientation whose view direction (−Z) points from `eye`
    /// toward `target`.
    ///
    /// A `target` equal to `eye` fails with
    /// [`CameraError::DegenerateLookAt`]. An `up_hint` parallel to the view
    /// direction is not an error; the up axis falls back to world X.
    pub fn look_at(eye: Vec3, target: Vec3, up_hint: Vec3) -> Result<Quat, CameraError> {
        look_at_rotation(eye, target, up_hint).ok_or(CameraError::DegenerateLookAt)
    }

    /// View matrix for a camera whose node has the given world matrix.
    #[inline]
    pub fn view_matrix(world: Mat4) -> Mat4 {
        world.inverse()
    }
}
