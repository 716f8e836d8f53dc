//! Wavefront OBJ loading.
//!
//! Supported directives:
//!
//! - `v x y z`, `vt u v`, `vn x y z`
//! - `f` with `v`, `v/vt`, `v/vt/vn` or `v//vn` references, 1-based or
//!   negative (relative to the end of the list so far)
//! - `o name` / `g name` rename the mesh
//!
//! `mtllib`, `usemtl`, `s` and unknown directives are skipped, as is
//! everything after a `#`. Polygons are fan-triangulated and, like STL,
//! stored with reversed winding.
//!
//! Mesh vertices are shared by identical `(position, uv, normal)` reference
//! triples; the welding options do not apply.

use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{Face, Mesh, MeshVertex, unit_or_zero};
use nalgebra::{Point3, Vector2, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::options::LoadOptions;
use crate::pipeline;

/// One corner of an `f` directive, as 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct ObjData {
    positions: Vec<Point3<f64>>,
    uvs: Vec<Vector2<f64>>,
    normals: Vec<Vector3<f64>>,
    corners: HashMap<Corner, u32>,
}

impl ObjData {
    /// Mesh vertex for a corner, created on first use.
    fn vertex_for(&mut self, mesh: &mut Mesh, corner: Corner) -> u32 {
        if let Some(&index) = self.corners.get(&corner) {
            return index;
        }

        let mut vertex = MeshVertex::new(
            self.positions[corner.position],
            corner
                .normal
                .map_or_else(Vector3::zeros, |n| self.normals[n]),
        );
        if let Some(uv) = corner.uv {
            vertex = vertex.with_uv(self.uvs[uv]);
        }

        let index = mesh.push_vertex(vertex);
        self.corners.insert(corner, index);
        index
    }
}

/// Decode an in-memory OBJ file.
///
/// When the file has no `vn` records and `calculate_normals` is set, flat
/// or smooth normals are synthesized according to `smooth_normals`.
///
/// # Errors
///
/// Returns [`IoError::Format`] for malformed lines and out-of-range
/// references.
///
/// # Example
///
/// ```
/// use mesh_io::{decode_obj, LoadOptions};
///
/// let text = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let mesh = decode_obj(text, "quad", &LoadOptions::default()).unwrap();
///
/// assert_eq!(mesh.vertices.len(), 4);
/// assert_eq!(mesh.faces.len(), 2);
/// assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
/// ```
pub fn decode_obj(data: &[u8], name: &str, options: &LoadOptions) -> IoResult<Mesh> {
    let text = String::from_utf8_lossy(data);
    let mut mesh = Mesh::new(name);
    let mut obj = ObjData::default();
    let mut polygon: Vec<u32> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.split('#').next().unwrap_or_default().trim();
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut fields, line_number, keyword)?;
                obj.positions.push(Point3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&mut fields, line_number, keyword)?;
                obj.uvs.push(Vector2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&mut fields, line_number, keyword)?;
                obj.normals.push(unit_or_zero(&Vector3::new(x, y, z)));
            }
            "f" => {
                polygon.clear();
                for field in fields {
                    let corner = parse_corner(field, &obj, line_number)?;
                    polygon.push(obj.vertex_for(&mut mesh, corner));
                }
                if polygon.len() < 3 {
                    return Err(IoError::format(
                        line_number,
                        keyword,
                        "face needs at least three vertices",
                    ));
                }
                for i in 1..polygon.len() - 1 {
                    mesh.push_face(Face::new([polygon[0], polygon[i + 1], polygon[i]]));
                }
            }
            "o" | "g" => {
                let group = line[keyword.len()..].trim();
                if !group.is_empty() {
                    mesh.name = group.to_string();
                }
            }
            // "mtllib", "usemtl", "s" and anything unrecognized
            _ => {}
        }
    }

    debug!(
        positions = obj.positions.len(),
        uvs = obj.uvs.len(),
        normals = obj.normals.len(),
        "Parsed OBJ records"
    );

    if options.calculate_normals && obj.normals.is_empty() {
        if options.smooth_normals {
            mesh.compute_smooth_normals();
        } else {
            mesh.compute_flat_normals();
        }
    }

    pipeline::finish(&mut mesh, options, false, false);
    Ok(mesh)
}

/// Read an OBJ stream to its end, then decode it.
///
/// # Errors
///
/// Returns an error if reading fails or the content is not valid OBJ.
pub fn read_obj<R: Read>(mut reader: R, name: &str, options: &LoadOptions) -> IoResult<Mesh> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_obj(&data, name, options)
}

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// decoding error from [`decode_obj`].
pub fn load_obj<P: AsRef<Path>>(path: P, options: &LoadOptions) -> IoResult<Mesh> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    decode_obj(&data, &pipeline::mesh_name(path), options)
}

/// Parse the next `N` fields as floats.
fn parse_floats<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    keyword: &str,
) -> IoResult<[f64; N]> {
    let mut values = [0.0; N];
    for value in &mut values {
        let Some(field) = fields.next() else {
            return Err(IoError::format(
                line,
                keyword,
                format!("'{keyword}' needs {N} components"),
            ));
        };
        *value = field
            .parse()
            .map_err(|_| IoError::format(line, field, "invalid number"))?;
    }
    Ok(values)
}

/// Parse a face corner such as `3`, `3/1`, `3/1/2` or `3//2`.
fn parse_corner(field: &str, obj: &ObjData, line: usize) -> IoResult<Corner> {
    let mut parts = field.split('/');

    let position = match parts.next() {
        Some(p) if !p.is_empty() => resolve(p, obj.positions.len(), line)?,
        _ => return Err(IoError::format(line, field, "missing position index")),
    };
    let uv = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve(t, obj.uvs.len(), line)?),
        _ => None,
    };
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve(n, obj.normals.len(), line)?),
        _ => None,
    };

    Ok(Corner {
        position,
        uv,
        normal,
    })
}

/// Convert a 1-based or negative OBJ index to a checked 0-based one.
fn resolve(token: &str, count: usize, line: usize) -> IoResult<usize> {
    let raw: i64 = token
        .parse()
        .map_err(|_| IoError::format(line, token, "invalid index"))?;

    let resolved = match raw {
        1.. => usize::try_from(raw - 1).ok(),
        ..0 => count.checked_sub(usize::try_from(raw.unsigned_abs()).unwrap_or(usize::MAX)),
        0 => None,
    };

    resolved
        .filter(|&i| i < count)
        .ok_or_else(|| IoError::format(line, token, format!("index out of range (have {count})")))
}
