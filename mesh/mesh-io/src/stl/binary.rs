//! Binary STL decoding.
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```

use mesh_types::{Face, Mesh, unit_or_zero};
use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::error::{IoError, IoResult};
use crate::sniff::{BINARY_PREAMBLE, BINARY_RECORD, declared_binary_len};
use crate::weld::VertexWelder;

/// Decode binary STL records into `mesh`.
///
/// Bytes past the declared body are ignored with a warning.
pub(crate) fn decode(data: &[u8], mesh: &mut Mesh, welder: &mut VertexWelder) -> IoResult<()> {
    let actual = data.len() as u64;
    let Some(expected) = declared_binary_len(data) else {
        return Err(IoError::Truncated {
            expected: BINARY_PREAMBLE as u64,
            actual,
        });
    };

    if actual < expected {
        return Err(IoError::Truncated { expected, actual });
    }
    if actual > expected {
        warn!(
            trailing = actual - expected,
            "Ignoring bytes after binary STL body"
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: the body fits in `data`, so the count fits in usize
    let count = ((expected - BINARY_PREAMBLE as u64) / BINARY_RECORD as u64) as usize;
    mesh.faces.reserve(count);

    for record in data[BINARY_PREAMBLE..]
        .chunks_exact(BINARY_RECORD)
        .take(count)
    {
        let normal = unit_or_zero(&read_vector(&record[0..12]));
        let i0 = welder.insert(mesh, read_point(&record[12..24]), normal);
        let i1 = welder.insert(mesh, read_point(&record[24..36]), normal);
        let i2 = welder.insert(mesh, read_point(&record[36..48]), normal);
        mesh.push_face(Face::new([i0, i2, i1]));
    }

    Ok(())
}

/// Read three little-endian `f32`s, promoted to `f64`.
fn read_xyz(buf: &[u8]) -> [f64; 3] {
    let component = |offset: usize| {
        let bytes = [
            buf[offset],
            buf[offset + 1],
            buf[offset + 2],
            buf[offset + 3],
        ];
        f64::from(f32::from_le_bytes(bytes))
    };
    [component(0), component(4), component(8)]
}

fn read_point(buf: &[u8]) -> Point3<f64> {
    let [x, y, z] = read_xyz(buf);
    Point3::new(x, y, z)
}

fn read_vector(buf: &[u8]) -> Vector3<f64> {
    let [x, y, z] = read_xyz(buf);
    Vector3::new(x, y, z)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn push_xyz(buf: &mut Vec<u8>, xyz: [f32; 3]) {
        for c in xyz {
            buf.extend_from_slice(&c.to_le_bytes());
        }
    }

    fn binary_stl(triangles: &[([f32; 3], [[f32; 3]; 3])]) -> Vec<u8> {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for (normal, corners) in triangles {
            push_xyz(&mut data, *normal);
            for corner in corners {
                push_xyz(&mut data, *corner);
            }
            data.extend_from_slice(&0u16.to_le_bytes());
        }
        data
    }

    const TRI: ([f32; 3], [[f32; 3]; 3]) = (
        [0.0, 0.0, 1.0],
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    );

    #[test]
    fn decodes_single_triangle_with_reversed_winding() {
        let data = binary_stl(&[TRI]);
        let mut mesh = Mesh::new("t");
        decode(&data, &mut mesh, &mut VertexWelder::new(0.0)).unwrap();

        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
        assert_eq!(mesh.vertices[1].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[0].normal, Vector3::z());

        let tri = mesh.face_triangle(&mesh.faces[0]).unwrap();
        assert_relative_eq!(tri.normal(), -Vector3::z());
    }

    #[test]
    fn declared_normal_is_normalized() {
        let data = binary_stl(&[([0.0, 0.0, 5.0], TRI.1)]);
        let mut mesh = Mesh::new("t");
        decode(&data, &mut mesh, &mut VertexWelder::disabled()).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal, Vector3::z());
        }
    }

    #[test]
    fn shared_corners_are_welded() {
        let second = (
            [0.0, 0.0, 1.0],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        );
        let data = binary_stl(&[TRI, second]);

        let mut welded = Mesh::new("w");
        decode(&data, &mut welded, &mut VertexWelder::new(0.0)).unwrap();
        assert_eq!(welded.vertices.len(), 4);
        assert_eq!(welded.faces.len(), 2);

        let mut separate = Mesh::new("s");
        decode(&data, &mut separate, &mut VertexWelder::disabled()).unwrap();
        assert_eq!(separate.vertices.len(), 6);
    }

    #[test]
    fn short_header_is_truncated() {
        let err = decode(&[0u8; 40], &mut Mesh::new("t"), &mut VertexWelder::new(0.0));
        assert!(matches!(
            err,
            Err(IoError::Truncated {
                expected: 84,
                actual: 40
            })
        ));
    }

    #[test]
    fn missing_records_are_truncated() {
        let mut data = binary_stl(&[TRI, TRI]);
        data.truncate(84 + 50 + 20);

        let err = decode(&data, &mut Mesh::new("t"), &mut VertexWelder::new(0.0));
        assert!(matches!(
            err,
            Err(IoError::Truncated {
                expected: 184,
                actual: 154
            })
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = binary_stl(&[TRI]);
        data.extend_from_slice(&[0xAB; 17]);

        let mut mesh = Mesh::new("t");
        decode(&data, &mut mesh, &mut VertexWelder::new(0.0)).unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn zero_triangles() {
        let data = binary_stl(&[]);
        let mut mesh = Mesh::new("t");
        decode(&data, &mut mesh, &mut VertexWelder::new(0.0)).unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
    }
}
