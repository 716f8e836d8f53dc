//! Core mesh types for triangle-mesh ingestion.
//!
//! This crate provides the data model shared by the loaders, the cleanup
//! pipeline and any rendering consumer:
//!
//! - [`Mesh`] - An indexed triangle mesh with materials and cached bounds
//! - [`MeshVertex`] - Position, normal and texture coordinate
//! - [`Face`] - Three vertex indices plus an optional material index
//! - [`Material`] - A simple PBR material record
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Triangle`] - A concrete triangle with resolved positions
//!
//! # Winding
//!
//! Faces are stored in the consuming renderer's front-face winding, which is
//! the reverse of the source formats' native winding. Loaders emit
//! `[v0, v2, v1]` for a source triangle listed as `[v0, v1, v2]`.
//!
//! # Read-only contract
//!
//! Renderers consume meshes through [`MeshTopology`] and [`MeshBounds`].
//! The only geometry mutations meant for them are [`Mesh::transform`] and
//! `Clone`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Face, Mesh, MeshTopology, MeshVertex};
//!
//! let mut mesh = Mesh::new("tri");
//! let a = mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
//! let b = mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
//! let c = mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
//! mesh.push_face(Face::new([a, c, b]));
//! mesh.calculate_bounds();
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod face;
mod mesh;
mod normals;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use face::{Face, Material};
pub use mesh::Mesh;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{MeshVertex, unit_or_zero};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector2, Vector3};
