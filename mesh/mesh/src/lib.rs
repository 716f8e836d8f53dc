//! Mesh ingestion toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency:
//! load STL and OBJ files into an indexed mesh, clean it up, and hand it to
//! a renderer through read-only accessors.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // Load with welding, then strip degenerate and internal faces
//! let mesh = load_mesh_with("model.stl", &LoadOptions::clean()).unwrap();
//! println!("{} faces, centered at {}", mesh.face_count(), mesh.center());
//!
//! // Or clean an already loaded mesh explicitly
//! let mut raw = load_mesh("model.stl").unwrap();
//! let summary = clean_mesh(&mut raw, &CleanParams::default());
//! println!("{summary}");
//!
//! // Save the result
//! save_stl(&raw, "cleaned.stl", true).unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `Mesh`, `MeshVertex`, `Face`, `Aabb`
//! - [`io`] - STL and OBJ loading, STL writing, vertex welding
//! - [`repair`] - Ordered mesh cleanup and index validation

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Mesh`, `MeshVertex`, `Face`, `Aabb`.
pub use mesh_types as types;

/// STL and OBJ loading, STL writing, vertex welding.
pub use mesh_io as io;

/// Ordered mesh cleanup and index validation.
pub use mesh_repair as repair;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh loading.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Face, Mesh, MeshBounds, MeshTopology, MeshVertex, Triangle};

    // I/O
    pub use mesh_io::{LoadOptions, MeshFormat, load_mesh, load_mesh_with, save_stl};

    // Repair
    pub use mesh_repair::{CleanParams, CleanSummary, clean_mesh, validate_indices};
}

// =============================================================================
// Tests
// =============================================================================
