//! Cleanup for freshly loaded triangle meshes.
//!
//! This crate provides:
//! - Degenerate face removal (repeated indices, near-zero area)
//! - Internal face removal (coincident faces pointing in opposite directions)
//! - Duplicate face removal
//! - Unreferenced vertex compaction
//! - Index validation
//!
//! [`clean_mesh`] runs the four removal stages in their required order. The
//! stages are also exported individually.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Face, Mesh, MeshVertex};
//! use mesh_repair::{clean_mesh, validate_indices, CleanParams};
//!
//! let mut mesh = Mesh::new("sheet");
//! mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
//! mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
//! mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
//! mesh.push_vertex(MeshVertex::from_coords(1.0, 1.0, 0.0));
//! mesh.push_face(Face::new([0, 1, 2]));
//! mesh.push_face(Face::new([0, 2, 1])); // back side of the same triangle
//! mesh.push_face(Face::new([1, 3, 2]));
//!
//! let summary = clean_mesh(&mut mesh, &CleanParams::default());
//! println!("{summary}");
//!
//! assert_eq!(summary.internal_removed, 2);
//! assert_eq!(mesh.faces.len(), 1);
//! assert!(validate_indices(&mesh).is_ok());
//! ```

#![warn(missing_docs)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod clean;
mod error;
mod params;
mod validate;

pub use clean::{
    CleanSummary, clean_mesh, remove_degenerate_faces, remove_duplicate_faces,
    remove_internal_faces, remove_unreferenced_vertices,
};
pub use error::{RepairError, RepairResult};
pub use params::CleanParams;
pub use validate::validate_indices;
