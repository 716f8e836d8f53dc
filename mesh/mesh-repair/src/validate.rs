//! Structural checks on the mesh data model.

use mesh_types::Mesh;

use crate::{RepairError, RepairResult};

/// Check that every face index refers to an existing vertex and material.
///
/// Loaders and [`clean_mesh`](crate::clean_mesh) keep these invariants on
/// their own; this is for meshes assembled or edited by hand.
///
/// # Errors
///
/// Returns the first violation found, in face order.
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshVertex};
/// use mesh_repair::{validate_indices, RepairError};
///
/// let mut mesh = Mesh::new("m");
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
/// mesh.push_face(Face::new([0, 1, 2]));
///
/// assert_eq!(
///     validate_indices(&mesh),
///     Err(RepairError::InvalidIndex { face: 0, index: 2, vertex_count: 2 })
/// );
/// ```
pub fn validate_indices(mesh: &Mesh) -> RepairResult<()> {
    let vertex_count = mesh.vertices.len();
    let material_count = mesh.materials.len();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        if let Some(&index) = face
            .vertices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(RepairError::InvalidIndex {
                face: face_index,
                index,
                vertex_count,
            });
        }

        if let Some(material) = face.material {
            if material as usize >= material_count {
                return Err(RepairError::InvalidMaterial {
                    face: face_index,
                    material,
                    material_count,
                });
            }
        }
    }

    Ok(())
}
