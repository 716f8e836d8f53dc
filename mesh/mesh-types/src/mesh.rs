//! Indexed triangle mesh.

use crate::{Aabb, Face, Material, MeshBounds, MeshTopology, MeshVertex, Triangle};
use nalgebra::Matrix4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh for one loaded asset.
///
/// # Memory Layout
///
/// - `vertices`: insertion-ordered, referenced by index from `faces`
/// - `faces`: draw-ordered triangles
/// - `materials`: referenced by [`Face::material`]
/// - `bounds`: valid only after [`Mesh::calculate_bounds`]
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshBounds, MeshVertex, Point3};
///
/// let mut mesh = Mesh::new("points");
/// mesh.push_vertex(MeshVertex::from_coords(-1.0, -2.0, -3.0));
/// mesh.push_vertex(MeshVertex::from_coords(4.0, 5.0, 6.0));
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.calculate_bounds();
///
/// assert_eq!(mesh.bounds().min, Point3::new(-1.0, -2.0, -3.0));
/// assert_eq!(mesh.bounds().max, Point3::new(4.0, 5.0, 6.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Display label, from a file directive or the file name.
    pub name: String,

    /// Vertex data.
    pub vertices: Vec<MeshVertex>,

    /// Triangle faces.
    pub faces: Vec<Face>,

    /// Materials referenced by faces.
    pub materials: Vec<Material>,

    /// Cached bounding box.
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new empty mesh.
    ///
    /// Bounds start degenerate at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty mesh with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, vertex_count: usize, face_count: usize) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            ..Self::default()
        }
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    pub fn push_vertex(&mut self, vertex: MeshVertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Append a face.
    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Resolve a face's positions.
    ///
    /// Returns `None` when an index is out of range.
    #[must_use]
    pub fn face_triangle(&self, face: &Face) -> Option<Triangle> {
        let [i0, i1, i2] = face.vertices;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }

    /// Recompute the axis-aligned bounding box from the vertices.
    ///
    /// A mesh without vertices gets degenerate bounds at the origin.
    pub fn calculate_bounds(&mut self) {
        self.bounds =
            Aabb::from_points(self.vertices.iter().map(|v| &v.position)).unwrap_or_default();
    }

    /// Apply an affine transform to the whole mesh.
    ///
    /// Every position is transformed as a point, every normal as a direction
    /// and renormalized, then the bounds are recomputed.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Matrix4, Mesh, MeshBounds, MeshVertex, Vector3};
    ///
    /// let mut mesh = Mesh::new("m");
    /// mesh.push_vertex(MeshVertex::from_coords(1.0, 1.0, 1.0));
    /// mesh.transform(&Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0)));
    ///
    /// assert_eq!(mesh.vertices[0].position.x, 2.0);
    /// assert_eq!(mesh.bounds().min.x, 2.0);
    /// ```
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            vertex.position = matrix.transform_point(&vertex.position);
            vertex.normal = matrix.transform_vector(&vertex.normal);
            vertex.normalize_normal();
        }
        self.calculate_bounds();
    }
}

impl MeshTopology for Mesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn vertex(&self, index: usize) -> Option<&MeshVertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }
}

impl MeshBounds for Mesh {
    #[inline]
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}
