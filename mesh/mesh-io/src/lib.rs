//! Mesh file ingestion.
//!
//! This crate turns triangle-mesh files into [`Mesh`] values ready for a
//! renderer:
//!
//! - **STL** (Stereolithography) - Binary and ASCII, auto-detected
//! - **OBJ** (Wavefront) - ASCII only
//!
//! # Pipeline
//!
//! ```text
//! bytes → encoding detection → decoder → vertex welder
//!       → normal finalization → bounds → [smooth normals] → [cleanup]
//! ```
//!
//! Every load is single-threaded and owns its own state, so independent
//! loads can run on separate threads freely.
//!
//! # Winding
//!
//! A source triangle `(v0, v1, v2)` is stored as face `[v0, v2, v1]`. The
//! per-vertex normals still carry the normal the file declared.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh_with, save_stl, LoadOptions};
//!
//! let mesh = load_mesh_with("model.stl", &LoadOptions::clean()).unwrap();
//! println!("{} vertices, {} faces", mesh.vertices.len(), mesh.faces.len());
//!
//! save_stl(&mesh, "output.stl", true).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod options;
mod pipeline;
mod sniff;
mod stl;
mod weld;

pub use error::{IoError, IoResult};
pub use obj::{decode_obj, load_obj, read_obj};
pub use options::LoadOptions;
pub use sniff::{StlEncoding, detect_stl_encoding};
pub use stl::{decode_stl, load_stl, read_stl, save_stl, write_stl_ascii, write_stl_binary};
pub use weld::{EXACT_TOLERANCE, VertexWelder};

use std::path::Path;

use mesh_types::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Supports binary and ASCII variants.
    Stl,
    /// OBJ (Wavefront) format.
    /// ASCII only.
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

/// Load a mesh with default options, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    load_mesh_with(path, &LoadOptions::default())
}

/// Load a mesh, detecting format from extension.
///
/// # Errors
///
/// Same as [`load_mesh`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_mesh_with, LoadOptions};
///
/// let opts = LoadOptions::smooth().with_merge_tolerance(1e-6);
/// let mesh = load_mesh_with("model.obj", &opts).unwrap();
/// ```
pub fn load_mesh_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> IoResult<Mesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => load_stl(path, options),
        MeshFormat::Obj => load_obj(path, options),
    }
}
