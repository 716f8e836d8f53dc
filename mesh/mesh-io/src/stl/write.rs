//! STL writers.
//!
//! Stored faces use the reversed winding, so each face is flipped back to
//! the source convention on the way out. Reading a written file reproduces
//! the stored face order and winding.

use std::io::Write;

use mesh_types::{Mesh, Triangle};

use crate::error::IoResult;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header text for written binary files. Must not start with `solid`.
const HEADER_TEXT: &[u8] = b"binary STL written by mesh-io";

/// Faces as source-winding triangles, skipping any with invalid indices.
fn source_triangles(mesh: &Mesh) -> Vec<Triangle> {
    mesh.faces
        .iter()
        .filter_map(|face| {
            let [a, b, c] = face.vertices;
            let position = |i: u32| mesh.vertices.get(i as usize).map(|v| v.position);
            Some(Triangle::new(position(a)?, position(c)?, position(b)?))
        })
        .collect()
}

/// Write `mesh` as binary STL.
///
/// # Errors
///
/// Returns an error if the writer fails.
///
/// # Example
///
/// ```
/// use mesh_io::{decode_stl, write_stl_binary, LoadOptions};
/// use mesh_types::{Face, Mesh, MeshVertex};
///
/// let mut mesh = Mesh::new("tri");
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
/// mesh.push_face(Face::new([0, 2, 1]));
///
/// let mut bytes = Vec::new();
/// write_stl_binary(&mesh, &mut bytes).unwrap();
/// assert_eq!(bytes.len(), 84 + 50);
///
/// let loaded = decode_stl(&bytes, "tri", &LoadOptions::default()).unwrap();
/// assert_eq!(loaded.faces, mesh.faces);
/// ```
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> IoResult<()> {
    let triangles = source_triangles(mesh);

    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh faces are limited to u32 range
    let count = triangles.len() as u32;
    writer.write_all(&count.to_le_bytes())?;

    for tri in &triangles {
        let n = tri.normal();
        write_xyz(&mut writer, n.x, n.y, n.z)?;
        for v in [tri.v0, tri.v1, tri.v2] {
            write_xyz(&mut writer, v.x, v.y, v.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Write three `f64`s as little-endian `f32`s.
fn write_xyz<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Write `mesh` as ASCII STL.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, mut writer: W) -> IoResult<()> {
    let name = if mesh.name.trim().is_empty() {
        "mesh"
    } else {
        mesh.name.trim()
    };

    writeln!(writer, "solid {name}")?;

    for tri in source_triangles(mesh) {
        let n = tri.normal();
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in [tri.v0, tri.v1, tri.v2] {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;
    writer.flush()?;

    Ok(())
}
