//! Mesh buffers and materials.
//!
//! Responsibilities:
//! - hold validated, immutable per-vertex attribute + index data
//! - derive vertex normals with the index buffer's winding convention
//! - generate the primitive shapes the demo scenes are built from
//!
//! Buffers are validated once at construction and never partially built; a
//! renderer can trust every index and attribute length without re-checking.

mod buffer;
mod material;

pub mod primitives;

pub use buffer::{
    ATTR_COLOR, ATTR_NORMAL, ATTR_POSITION, ATTR_UV, MeshBuffer, MeshBufferBuilder, MeshError,
    VertexAttribute,
};
pub use material::Material;
