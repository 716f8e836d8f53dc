//! Error types for mesh repair operations.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Structural violations of the mesh data model.
///
/// Loaders and the cleanup pipeline never produce these from valid input;
/// they indicate a programming error upstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepairError {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Offending face.
        face: usize,
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face references a material that does not exist.
    #[error("face {face} references material {material} (mesh has {material_count} materials)")]
    InvalidMaterial {
        /// Offending face.
        face: usize,
        /// The invalid material index.
        material: u32,
        /// Total number of materials in the mesh.
        material_count: usize,
    },
}
