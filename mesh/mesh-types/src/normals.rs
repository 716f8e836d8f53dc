//! Vertex normal synthesis.
//!
//! Two services live here:
//!
//! - **Finalization**: renormalize accumulated normals once, after a loader
//!   has finished adding face contributions to welded vertices.
//! - **Flat / smooth computation**: derive normals from face geometry when the
//!   source has none.
//!
//! Face normals are taken from the stored winding, `(v1 - v0) × (v2 - v0)`.

use nalgebra::Vector3;

use crate::Mesh;

impl Mesh {
    /// Renormalize every vertex normal to unit length.
    ///
    /// Run exactly once after all contributions have been accumulated.
    /// Zero-length normals are left as the zero vector.
    pub fn finalize_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normalize_normal();
        }
    }

    /// Assign each face's unit normal to its three vertices.
    ///
    /// There is no averaging: a vertex shared by several faces keeps the
    /// normal of the last face that touched it.
    pub fn compute_flat_normals(&mut self) {
        for face in &self.faces {
            let Some(tri) = self.face_triangle(face) else {
                continue;
            };
            let normal = tri.normal();
            for &index in &face.vertices {
                self.vertices[index as usize].normal = normal;
            }
        }
    }

    /// Compute area-weighted averaged vertex normals.
    ///
    /// All normals are reset to zero, each face's unnormalized cross product
    /// is added to its three vertices, and every vertex is renormalized once
    /// at the end. The cross product's magnitude is twice the face area, so
    /// larger faces weigh more.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Face, Mesh, MeshVertex};
    ///
    /// let mut mesh = Mesh::new("quad");
    /// for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
    ///     mesh.push_vertex(MeshVertex::from_coords(x, y, 0.0));
    /// }
    /// mesh.push_face(Face::new([0, 1, 2]));
    /// mesh.push_face(Face::new([0, 2, 3]));
    /// mesh.compute_smooth_normals();
    ///
    /// for v in &mesh.vertices {
    ///     assert!((v.normal.z - 1.0).abs() < 1e-12);
    /// }
    /// ```
    pub fn compute_smooth_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = Vector3::zeros();
        }

        for face in &self.faces {
            let Some(tri) = self.face_triangle(face) else {
                continue;
            };
            let weighted = tri.cross();
            for &index in &face.vertices {
                self.vertices[index as usize].normal += weighted;
            }
        }

        self.finalize_normals();
    }
}

#[cfg(test)]
mod tests {
    use crate::{Face, Mesh, MeshVertex};
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    /// Two faces folded 90 degrees along the shared edge (0,0,0)-(1,0,0).
    /// The floor face is four times the area of the wall face.
    fn folded_mesh() -> Mesh {
        let mut mesh = Mesh::new("fold");
        mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
        mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
        mesh.push_vertex(MeshVertex::from_coords(0.0, 4.0, 0.0));
        mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 1.0));
        mesh.push_face(Face::new([0, 1, 2])); // normal +Z, area 2
        mesh.push_face(Face::new([0, 1, 3])); // normal -Y, area 0.5
        mesh
    }

    #[test]
    fn finalize_normalizes_once() {
        let mut mesh = Mesh::new("m");
        mesh.push_vertex(MeshVertex::new(Point3::origin(), Vector3::new(0.0, 0.0, 2.0)));
        mesh.push_vertex(MeshVertex::new(Point3::origin(), Vector3::new(1.0, 1.0, 0.0)));
        mesh.push_vertex(MeshVertex::new(Point3::origin(), Vector3::zeros()));
        mesh.finalize_normals();

        assert_relative_eq!(mesh.vertices[0].normal, Vector3::z());
        assert_relative_eq!(mesh.vertices[1].normal.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(mesh.vertices[2].normal, Vector3::zeros());
    }

    #[test]
    fn flat_normals_last_face_wins() {
        let mut mesh = folded_mesh();
        mesh.compute_flat_normals();

        assert_relative_eq!(mesh.vertices[2].normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[3].normal, -Vector3::y(), epsilon = 1e-12);
        // Shared vertices carry the second face's normal, not an average.
        assert_relative_eq!(mesh.vertices[0].normal, -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[1].normal, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn smooth_normals_are_area_weighted() {
        let mut mesh = folded_mesh();
        mesh.compute_smooth_normals();

        // Unnormalized contributions: (0,0,4) and (0,-1,0).
        let expected = Vector3::new(0.0, -1.0, 4.0).normalize();
        assert_relative_eq!(mesh.vertices[0].normal, expected, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[1].normal, expected, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[2].normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[3].normal, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn smooth_normals_reset_previous_values() {
        let mut mesh = folded_mesh();
        for v in &mut mesh.vertices {
            v.normal = Vector3::new(100.0, 0.0, 0.0);
        }
        mesh.compute_smooth_normals();
        assert_relative_eq!(mesh.vertices[2].normal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn unreferenced_vertex_gets_zero_smooth_normal() {
        let mut mesh = folded_mesh();
        mesh.push_vertex(MeshVertex::new(Point3::new(9.0, 9.0, 9.0), Vector3::x()));
        mesh.compute_smooth_normals();
        assert_eq!(mesh.vertices[4].normal, Vector3::zeros());
    }
}
