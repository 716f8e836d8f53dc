//! Tolerance-based vertex welding.
//!
//! Positions are quantized to an integer grid and looked up in a hash map, so
//! float equality is never tested directly. A position whose grid key is
//! already present reuses that vertex and adds its normal to the stored one.
//! Accumulated normals are renormalized once, after decoding, by
//! [`Mesh::finalize_normals`].

use hashbrown::HashMap;
use mesh_types::{Mesh, MeshVertex};
use nalgebra::{Point3, Vector3};

/// Grid size substituted for a zero (or negative) tolerance.
pub const EXACT_TOLERANCE: f64 = 1e-12;

/// One axis of a grid key.
///
/// Coordinates whose scaled value does not fit an `i64` are keyed by their
/// exact bit pattern, so they only match bit-identical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GridCoord {
    Cell(i64),
    Exact(u64),
}

type GridKey = (GridCoord, GridCoord, GridCoord);

/// Scaled values at or beyond this magnitude do not fit an `i64` cell.
#[allow(clippy::cast_precision_loss)]
const CELL_LIMIT: f64 = i64::MAX as f64;

/// Assigns vertex indices to incoming positions, sharing coincident ones.
///
/// Owned by a single load; the map is dropped with it.
///
/// # Example
///
/// ```
/// use mesh_io::VertexWelder;
/// use mesh_types::{Mesh, Point3, Vector3};
///
/// let mut mesh = Mesh::new("m");
/// let mut welder = VertexWelder::new(1e-3);
///
/// let a = welder.insert(&mut mesh, Point3::new(1.0, 2.0, 3.0), Vector3::z());
/// let b = welder.insert(&mut mesh, Point3::new(1.0001, 2.0, 3.0), Vector3::x());
///
/// assert_eq!(a, b);
/// assert_eq!(mesh.vertices.len(), 1);
/// assert_eq!(mesh.vertices[0].normal, Vector3::new(1.0, 0.0, 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct VertexWelder {
    scale: f64,
    enabled: bool,
    keys: HashMap<GridKey, u32>,
}

impl VertexWelder {
    /// Create a welder with the given tolerance.
    ///
    /// A tolerance of `0.0` or below uses [`EXACT_TOLERANCE`].
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        let tolerance = if tolerance > 0.0 {
            tolerance
        } else {
            EXACT_TOLERANCE
        };
        Self {
            scale: 1.0 / tolerance,
            enabled: true,
            keys: HashMap::new(),
        }
    }

    /// Create a welder that never shares vertices.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            scale: 1.0 / EXACT_TOLERANCE,
            enabled: false,
            keys: HashMap::new(),
        }
    }

    /// Whether positions are being shared.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the index for `position`, appending a vertex if it is new.
    ///
    /// When an existing vertex is reused, `normal` is added to its stored
    /// normal. When welding is disabled a new vertex is always appended.
    pub fn insert(&mut self, mesh: &mut Mesh, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        if !self.enabled {
            return mesh.push_vertex(MeshVertex::new(position, normal));
        }

        let key = self.key(&position);
        if let Some(&index) = self.keys.get(&key) {
            if let Some(vertex) = mesh.vertices.get_mut(index as usize) {
                vertex.normal += normal;
            }
            return index;
        }

        let index = mesh.push_vertex(MeshVertex::new(position, normal));
        self.keys.insert(key, index);
        index
    }

    /// Number of distinct grid cells seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no positions have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn key(&self, position: &Point3<f64>) -> GridKey {
        (
            self.coord(position.x),
            self.coord(position.y),
            self.coord(position.z),
        )
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: the rounded value is checked against the i64 range first
    fn coord(&self, value: f64) -> GridCoord {
        let scaled = (value * self.scale).round();
        if scaled.is_finite() && scaled > -CELL_LIMIT && scaled < CELL_LIMIT {
            GridCoord::Cell(scaled as i64)
        } else {
            GridCoord::Exact(value.to_bits())
        }
    }
}
