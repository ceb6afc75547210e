use glam::Vec4;

use crate::assets::AssetHandle;

/// Minimal surface description carried by a mesh payload.
///
/// This core stores material data only; any shading model belongs to the
/// renderer collaborator. While `texture` resolves asynchronously (or after
/// it fails), renderers fall back to `base_color` as the placeholder.
#[derive(Debug, Clone)]
pub struct Material {
    /// Linear RGBA base color.
    pub base_color: Vec4,
    /// Optional texture handle from the resource-loader collaborator.
    pub texture: Option<AssetHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Vec4::ONE,
            texture: None,
        }
    }
}

impl Material {
    #[inline]
    pub fn from_color(base_color: Vec4) -> Self {
        Self {
            base_color,
            texture: None,
        }
    }

    #[inline]
    pub fn with_texture(mut self, texture: AssetHandle) -> Self {
        self.texture = Some(texture);
        self
    }
}
