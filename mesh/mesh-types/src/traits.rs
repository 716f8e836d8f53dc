//! Read-only accessors for mesh consumers.

use crate::{Aabb, Face, Material, MeshVertex, Triangle};
use nalgebra::{Point3, Vector3};

/// Read-only view of mesh geometry.
///
/// This is the whole surface a renderer needs: counts, per-vertex data,
/// per-face indices and material references.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Number of materials.
    fn material_count(&self) -> usize;

    /// Check if the mesh has no renderable geometry.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index.
    fn vertex(&self, index: usize) -> Option<&MeshVertex>;

    /// Get a face by index.
    fn face(&self, index: usize) -> Option<&Face>;

    /// Get the vertex indices of a face.
    fn face_indices(&self, index: usize) -> Option<[u32; 3]> {
        self.face(index).map(|f| f.vertices)
    }

    /// Get the material index of a face.
    ///
    /// Returns `None` for an out-of-range face or a face without material.
    fn face_material(&self, index: usize) -> Option<u32> {
        self.face(index).and_then(|f| f.material)
    }

    /// Get a material by index.
    fn material(&self, index: usize) -> Option<&Material>;

    /// Resolve a face to its vertex positions.
    ///
    /// Returns `None` if the face or any of its indices is out of range.
    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = self.face_indices(face_index)?;
        Some(Triangle::new(
            self.vertex(i0 as usize)?.position,
            self.vertex(i1 as usize)?.position,
            self.vertex(i2 as usize)?.position,
        ))
    }
}

/// Access to a mesh's axis-aligned bounds.
pub trait MeshBounds {
    /// The cached bounding box.
    fn bounds(&self) -> Aabb;

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }

    /// Dimensions of the bounding box.
    fn size(&self) -> Vector3<f64> {
        self.bounds().size()
    }
}
