//! Mesh vertex.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex with position, normal and texture coordinate.
///
/// The normal is conventionally unit length once a loader has finished, but
/// mid-pipeline it may hold an unnormalized accumulation of several face
/// normals. Texture coordinates are zero when the source has none.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshVertex, Point3, Vector3};
///
/// let v = MeshVertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::z());
/// assert_eq!(v.position.x, 1.0);
/// assert_eq!(v.normal.z, 1.0);
/// assert_eq!(v.uv.x, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshVertex {
    /// 3D position.
    pub position: Point3<f64>,
    /// Vertex normal.
    pub normal: Vector3<f64>,
    /// Texture coordinates (U, V).
    pub uv: Vector2<f64>,
}

impl Default for MeshVertex {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::zeros())
    }
}

impl MeshVertex {
    /// Create a vertex with position and normal and a zero texture coordinate.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal,
            uv: Vector2::zeros(),
        }
    }

    /// Create a vertex from raw coordinates with a zero normal.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::MeshVertex;
    ///
    /// let v = MeshVertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.z, 3.0);
    /// assert_eq!(v.normal.norm(), 0.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), Vector3::zeros())
    }

    /// Set the texture coordinate.
    #[inline]
    #[must_use]
    pub fn with_uv(mut self, uv: Vector2<f64>) -> Self {
        self.uv = uv;
        self
    }

    /// Rescale the normal to unit length.
    ///
    /// A zero-length normal stays zero; it is never divided.
    #[inline]
    pub fn normalize_normal(&mut self) {
        self.normal = unit_or_zero(&self.normal);
    }
}

/// Normalize `v`, leaving a zero vector untouched.
///
/// # Example
///
/// ```
/// use mesh_types::{Vector3, unit_or_zero};
///
/// assert_eq!(unit_or_zero(&Vector3::new(0.0, 0.0, 2.0)), Vector3::z());
/// assert_eq!(unit_or_zero(&Vector3::zeros()), Vector3::zeros());
/// ```
#[inline]
#[must_use]
pub fn unit_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}
