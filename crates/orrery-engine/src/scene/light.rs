use glam::Vec3;

/// Kind-specific light parameters.
///
/// Direction for directional and spot lights is the owning node's −Z axis in
/// world space, like any other oriented node. This core carries light data
/// only; shading is the renderer's concern.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Sky/ground gradient. `Light::color` is the sky color shining from
    /// above; `ground_color` shines from below.
    Hemisphere { ground_color: Vec3 },
    Directional,
    Point {
        /// Attenuation radius in world units.
        range: f32,
    },
    Spot {
        /// Inner cone half-angle in radians (full intensity inside).
        inner_angle: f32,
        /// Outer cone half-angle in radians (zero intensity outside).
        outer_angle: f32,
    },
    /// Rectangular area emitter spanning the node's local XY plane,
    /// emitting along −Z.
    RectArea { width: f32, height: f32 },
}

/// Light payload carried by a scene node.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    #[inline]
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    #[inline]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}
