use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;

/// Canonical attribute names used by the renderer collaborator.
pub const ATTR_POSITION: &str = "position";
pub const ATTR_NORMAL: &str = "normal";
pub const ATTR_COLOR: &str = "color";
pub const ATTR_UV: &str = "uv";

/// A mesh buffer that failed validation.
///
/// Construction is all-or-nothing: on error nothing is built and the
/// caller's prior state is untouched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MeshError {
    MalformedBuffer { reason: String },
}

impl MeshError {
    fn malformed(reason: impl Into<String>) -> Self {
        MeshError::MalformedBuffer {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::MalformedBuffer { reason } => {
                write!(f, "malformed mesh buffer: {reason}")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// One named per-vertex attribute: a flat `f32` array grouped into
/// `components`-sized vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    components: usize,
    data: Vec<f32>,
}

impl VertexAttribute {
    #[inline]
    pub fn new(components: usize, data: Vec<f32>) -> Self {
        Self { components, data }
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.components
    }
}

/// Accumulates attributes and indices for a [`MeshBuffer`].
///
/// Mirrors the construction order of hand-built geometry: set each attribute,
/// set the triangle indices, then validate everything at once in
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct MeshBufferBuilder {
    attributes: BTreeMap<String, VertexAttribute>,
    indices: Vec<u32>,
}

impl MeshBufferBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a named attribute, replacing any previous value under that name.
    pub fn attribute(mut self, name: impl Into<String>, components: usize, data: Vec<f32>) -> Self {
        self.attributes
            .insert(name.into(), VertexAttribute::new(components, data));
        self
    }

    /// Sets the triangle index list. Each triangle's three indices are in
    /// counter-clockwise winding as seen from the face's outward normal.
    pub fn indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Validates all invariants and builds the buffer.
    ///
    /// Checked, in order: a mandatory 3-component `position` attribute,
    /// per-attribute component/length consistency, a uniform vertex count
    /// across attributes, an index count that is a multiple of 3, and every
    /// index in range.
    pub fn build(self) -> Result<MeshBuffer, MeshError> {
        let position = self
            .attributes
            .get(ATTR_POSITION)
            .ok_or_else(|| MeshError::malformed("missing mandatory \"position\" attribute"))?;
        if position.components != 3 {
            return Err(MeshError::malformed(format!(
                "\"position\" must have 3 components, got {}",
                position.components
            )));
        }

        for (name, attribute) in &self.attributes {
            if attribute.components == 0 {
                return Err(MeshError::malformed(format!(
                    "attribute \"{name}\" has zero components"
                )));
            }
            if attribute.data.len() % attribute.components != 0 {
                return Err(MeshError::malformed(format!(
                    "attribute \"{name}\" length {} is not a multiple of its {} components",
                    attribute.data.len(),
                    attribute.components
                )));
            }
        }

        let vertex_count = position.vertex_count();
        for (name, attribute) in &self.attributes {
            if attribute.vertex_count() != vertex_count {
                return Err(MeshError::malformed(format!(
                    "attribute \"{name}\" holds {} vertices, expected {vertex_count}",
                    attribute.vertex_count()
                )));
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::malformed(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&out_of_range) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(MeshError::malformed(format!(
                "index {out_of_range} out of range for {vertex_count} vertices"
            )));
        }

        Ok(MeshBuffer {
            attributes: self.attributes,
            indices: self.indices,
            vertex_count,
        })
    }
}

/// Validated, immutable indexed-triangle geometry.
///
/// Attributes are stored once per unique vertex; triangles reference
/// vertices through the index list. The buffer never changes after
/// construction; replacing geometry means building a new buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    attributes: BTreeMap<String, VertexAttribute>,
    indices: Vec<u32>,
    vertex_count: usize,
}

impl MeshBuffer {
    /// Starts a builder.
    #[inline]
    pub fn builder() -> MeshBufferBuilder {
        MeshBufferBuilder::new()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.get(name)
    }

    /// Attribute names in deterministic (sorted) order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Raw bytes of an attribute array, for renderer upload.
    #[inline]
    pub fn attribute_bytes(&self, name: &str) -> Option<&[u8]> {
        self.attributes
            .get(name)
            .map(|attribute| bytemuck::cast_slice(&attribute.data))
    }

    /// Raw bytes of the index list, for renderer upload.
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Face-area-weighted averaged vertex normals.
    ///
    /// Each triangle's unnormalized face normal (cross product of its edge
    /// vectors, in index winding order) is accumulated into its three
    /// vertices; the sums are normalized at the end. The unnormalized cross
    /// product weighs large faces more. Vertices referenced by no triangle
    /// keep a zero normal, which is degenerate but not an error.
    pub fn computed_vertex_normals(&self) -> Vec<f32> {
        let position = self
            .attributes
            .get(ATTR_POSITION)
            .expect("validated buffers always hold a position attribute");
        let read = |index: u32| {
            let at = index as usize * 3;
            Vec3::new(
                position.data[at],
                position.data[at + 1],
                position.data[at + 2],
            )
        };

        let mut sums = vec![Vec3::ZERO; self.vertex_count];
        for triangle in self.indices.chunks_exact(3) {
            let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
            let face = (read(b) - read(a)).cross(read(c) - read(a));
            sums[a as usize] += face;
            sums[b as usize] += face;
            sums[c as usize] += face;
        }

        let mut normals = Vec::with_capacity(self.vertex_count * 3);
        for sum in sums {
            let n = sum.normalize_or_zero();
            normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
        normals
    }

    /// Returns a replacement buffer whose `normal` attribute is rebuilt from
    /// [`computed_vertex_normals`](Self::computed_vertex_normals). The
    /// original buffer is untouched.
    pub fn with_computed_normals(&self) -> MeshBuffer {
        let normals = self.computed_vertex_normals();
        let mut attributes = self.attributes.clone();
        attributes.insert(ATTR_NORMAL.to_owned(), VertexAttribute::new(3, normals));
        MeshBuffer {
            attributes,
            indices: self.indices.clone(),
            vertex_count: self.vertex_count,
        }
    }
}
