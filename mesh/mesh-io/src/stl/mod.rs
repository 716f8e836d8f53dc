//! STL (Stereolithography) file format support.
//!
//! Both encodings are read from a fully buffered byte slice. The encoding is
//! picked by [`detect_stl_encoding`](crate::detect_stl_encoding), then either
//! decoder feeds triangles through a [`VertexWelder`] into a fresh mesh.
//!
//! Every decoder stores a source triangle `(v0, v1, v2)` as face
//! `[v0, v2, v1]`. The declared facet normal is kept per vertex, unchanged
//! apart from normalization.

mod ascii;
mod binary;
mod write;

pub use write::{write_stl_ascii, write_stl_binary};

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use mesh_types::Mesh;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::options::LoadOptions;
use crate::pipeline;
use crate::sniff::{StlEncoding, detect_stl_encoding};

/// Decode an in-memory STL buffer.
///
/// `name` is used unless an ASCII `solid` line supplies one.
///
/// # Errors
///
/// Returns [`IoError::Truncated`] for a short binary buffer and
/// [`IoError::Format`] for malformed ASCII.
///
/// # Example
///
/// ```
/// use mesh_io::{decode_stl, LoadOptions};
///
/// let text = b"solid tri
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid tri
/// ";
///
/// let mesh = decode_stl(text, "fallback", &LoadOptions::default()).unwrap();
/// assert_eq!(mesh.name, "tri");
/// assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
/// ```
pub fn decode_stl(data: &[u8], name: &str, options: &LoadOptions) -> IoResult<Mesh> {
    let encoding = detect_stl_encoding(data);
    debug!(?encoding, bytes = data.len(), "Detected STL encoding");

    let mut mesh = Mesh::new(name);
    let mut welder = pipeline::welder_for(options);

    match encoding {
        StlEncoding::Binary => binary::decode(data, &mut mesh, &mut welder)?,
        StlEncoding::Ascii => ascii::decode(data, &mut mesh, &mut welder)?,
    }

    pipeline::finish(&mut mesh, options, welder.is_enabled(), options.smooth_normals);
    Ok(mesh)
}

/// Read an STL stream to its end, then decode it.
///
/// # Errors
///
/// Returns an error if reading fails or the content is not valid STL.
pub fn read_stl<R: Read>(mut reader: R, name: &str, options: &LoadOptions) -> IoResult<Mesh> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_stl(&data, name, options)
}

/// Load a mesh from an STL file.
///
/// The mesh is named after the file stem unless the file names itself.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// decoding error from [`decode_stl`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, LoadOptions};
///
/// let mesh = load_stl("model.stl", &LoadOptions::clean()).unwrap();
/// println!("Loaded {} faces", mesh.faces.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P, options: &LoadOptions) -> IoResult<Mesh> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    decode_stl(&data, &pipeline::mesh_name(path), options)
}

/// Save a mesh to an STL file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if binary {
        write_stl_binary(mesh, writer)
    } else {
        write_stl_ascii(mesh, writer)
    }
}
