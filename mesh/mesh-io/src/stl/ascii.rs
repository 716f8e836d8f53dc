//! ASCII STL decoding.
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Keywords are case-insensitive. Unknown lines are skipped.

use mesh_types::{Face, Mesh, unit_or_zero};
use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::error::{IoError, IoResult};
use crate::weld::VertexWelder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InFacet,
    InLoop,
}

/// Accumulates one facet's corners.
struct Facet {
    normal: Vector3<f64>,
    corners: Vec<u32>,
}

impl Facet {
    fn new() -> Self {
        Self {
            normal: Vector3::zeros(),
            corners: Vec::with_capacity(3),
        }
    }

    fn reset(&mut self) {
        self.normal = Vector3::zeros();
        self.corners.clear();
    }

    /// Emit the first three corners with reversed winding.
    ///
    /// Returns `false` when fewer than three corners were collected.
    fn emit(&self, mesh: &mut Mesh) -> bool {
        match self.corners.as_slice() {
            [a, b, c, ..] => {
                mesh.push_face(Face::new([*a, *c, *b]));
                true
            }
            _ => false,
        }
    }
}

/// Decode ASCII STL text into `mesh`.
///
/// The first `solid` line carrying a name renames the mesh.
pub(crate) fn decode(data: &[u8], mesh: &mut Mesh, welder: &mut VertexWelder) -> IoResult<()> {
    let text = String::from_utf8_lossy(data);
    let mut state = State::Idle;
    let mut named = false;
    let mut facet = Facet::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        let mut fields = trimmed.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" => {
                let name = trimmed[keyword.len()..].trim();
                if !named && !name.is_empty() {
                    mesh.name = name.to_string();
                    named = true;
                }
            }
            "facet" => {
                facet.reset();
                if let Some(word) = fields.next() {
                    if word.eq_ignore_ascii_case("normal") {
                        let [x, y, z] = parse_xyz(&mut fields, line_number, "facet normal")?;
                        facet.normal = unit_or_zero(&Vector3::new(x, y, z));
                    }
                }
                state = State::InFacet;
            }
            "outer" => {
                if state == State::InFacet
                    && fields.next().is_some_and(|w| w.eq_ignore_ascii_case("loop"))
                {
                    state = State::InLoop;
                }
            }
            "vertex" => {
                if state != State::InLoop {
                    return Err(IoError::format(
                        line_number,
                        keyword,
                        "vertex outside of an outer loop",
                    ));
                }
                let [x, y, z] = parse_xyz(&mut fields, line_number, "vertex")?;
                let index = welder.insert(mesh, Point3::new(x, y, z), facet.normal);
                facet.corners.push(index);
            }
            "endloop" => {
                if state == State::InLoop {
                    state = State::InFacet;
                }
            }
            "endfacet" => {
                if !facet.emit(mesh) {
                    warn!(
                        line = line_number,
                        corners = facet.corners.len(),
                        "Skipping facet with fewer than three vertices"
                    );
                }
                facet.reset();
                state = State::Idle;
            }
            // "endsolid" and anything unrecognized
            _ => {}
        }
    }

    if state != State::Idle && !facet.emit(mesh) {
        warn!(
            corners = facet.corners.len(),
            "Skipping unterminated facet with fewer than three vertices"
        );
    }

    Ok(())
}

/// Parse exactly the next three fields as floats.
fn parse_xyz<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &str,
) -> IoResult<[f64; 3]> {
    let mut xyz = [0.0; 3];
    for component in &mut xyz {
        let Some(field) = fields.next() else {
            return Err(IoError::format(
                line,
                what,
                format!("{what} needs three components"),
            ));
        };
        *component = field
            .parse()
            .map_err(|_| IoError::format(line, field, "invalid number"))?;
    }
    Ok(xyz)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unnecessary_raw_string_hashes
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn decode_str(text: &str) -> IoResult<Mesh> {
        let mut mesh = Mesh::new("default");
        decode(text.as_bytes(), &mut mesh, &mut VertexWelder::new(0.0))?;
        Ok(mesh)
    }

    const TRIANGLE: &str = r#"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"#;

    #[test]
    fn parses_single_triangle() {
        let mesh = decode_str(TRIANGLE).unwrap();

        assert_eq!(mesh.name, "test");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
        assert_eq!(mesh.vertices[0].normal, Vector3::z());
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let mesh = decode_str(&TRIANGLE.to_uppercase()).unwrap();
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.name, "TEST");
    }

    #[test]
    fn solid_without_name_keeps_default() {
        let mesh = decode_str("solid\nendsolid\n").unwrap();
        assert_eq!(mesh.name, "default");
    }

    #[test]
    fn name_is_set_once() {
        let text = format!("{TRIANGLE}\nsolid second\nendsolid second\n");
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.name, "test");
    }

    #[test]
    fn multi_word_name() {
        let mesh = decode_str("solid  my part v2 \nendsolid\n").unwrap();
        assert_eq!(mesh.name, "my part v2");
    }

    #[test]
    fn declared_normal_is_normalized() {
        let text = TRIANGLE.replace("normal 0 0 1", "normal 0 3 4");
        let mesh = decode_str(&text).unwrap();
        assert_relative_eq!(mesh.vertices[0].normal, Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn exponent_and_signed_numbers() {
        let text = TRIANGLE
            .replace("vertex 1 0 0", "vertex 1.5e+1 -0.0 +2E-1")
            .replace("normal 0 0 1", "normal 0.0e0 0 -1");
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.vertices[1].position, Point3::new(15.0, 0.0, 0.2));
        assert_eq!(mesh.vertices[1].normal, -Vector3::z());
    }

    #[test]
    fn vertex_outside_loop_is_an_error() {
        let text = "solid bad\n  facet normal 0 0 1\n    vertex 0 0 0\n";
        let err = decode_str(text).unwrap_err();
        match err {
            IoError::Format { line, token, .. } => {
                assert_eq!(line, 3);
                assert_eq!(token, "vertex");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_number_reports_line_and_token() {
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex 1 zero 0");
        match decode_str(&text).unwrap_err() {
            IoError::Format { line, token, .. } => {
                assert_eq!(line, 5);
                assert_eq!(token, "zero");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_vertex_line_is_an_error() {
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex 1 0");
        assert!(matches!(
            decode_str(&text),
            Err(IoError::Format { line: 5, .. })
        ));
    }

    #[test]
    fn bad_normal_is_an_error() {
        let text = TRIANGLE.replace("normal 0 0 1", "normal 0 0 nan?");
        assert!(matches!(
            decode_str(&text),
            Err(IoError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn facet_with_two_vertices_is_skipped() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid\n";
        let mesh = decode_str(text).unwrap();
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn extra_vertices_use_first_three() {
        let text = TRIANGLE.replace(
            "vertex 0 1 0",
            "vertex 0 1 0\n      vertex 5 5 5",
        );
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
    }

    #[test]
    fn unterminated_facet_is_accepted() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\n";
        let mesh = decode_str(text).unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn unknown_lines_and_blanks_are_ignored() {
        let text = TRIANGLE.replace("outer loop", "\n  color 1 0 0\n\n    outer loop");
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn facet_without_normal_gets_zero() {
        let text = TRIANGLE.replace("facet normal 0 0 1", "facet");
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.vertices[0].normal, Vector3::zeros());
    }

    #[test]
    fn crlf_line_endings() {
        let text = TRIANGLE.replace('\n', "\r\n");
        let mesh = decode_str(&text).unwrap();
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.name, "test");
    }
}
