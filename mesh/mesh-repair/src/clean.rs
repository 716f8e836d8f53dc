//! Ordered mesh cleanup.
//!
//! The pipeline runs four stages in a fixed order:
//!
//! 1. [`remove_degenerate_faces`]
//! 2. [`remove_internal_faces`]
//! 3. [`remove_duplicate_faces`]
//! 4. [`remove_unreferenced_vertices`]
//!
//! Internal-pair removal must precede duplicate removal. Duplicate removal
//! keeps the first face per vertex set, which would strip one side of an
//! opposing pair and leave the other behind.
//!
//! Every stage builds fresh face/vertex buffers and swaps them in, and every
//! stage preserves the relative order of surviving faces.

use hashbrown::{HashMap, HashSet};
use mesh_types::{Face, Mesh};
use nalgebra::Vector3;
use tracing::{debug, info, warn};

use crate::CleanParams;

/// Remove faces with a repeated vertex index or near-zero area.
///
/// A face is kept only if its three indices are distinct and its area,
/// half the edge cross product's magnitude, exceeds `area_threshold`.
/// Faces with out-of-range indices are dropped as well.
///
/// Returns the number of faces removed.
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshVertex};
/// use mesh_repair::remove_degenerate_faces;
///
/// let mut mesh = Mesh::new("collinear");
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(5.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(10.0, 0.0, 0.0));
/// mesh.push_face(Face::new([0, 1, 2]));
///
/// assert_eq!(remove_degenerate_faces(&mut mesh, 1e-10), 1);
/// assert!(mesh.faces.is_empty());
/// ```
pub fn remove_degenerate_faces(mesh: &mut Mesh, area_threshold: f64) -> usize {
    let original_count = mesh.faces.len();

    let kept: Vec<Face> = mesh
        .faces
        .iter()
        .filter(|face| {
            if face.has_repeated_index() {
                return false;
            }
            match mesh.face_triangle(face) {
                Some(tri) => tri.area() > area_threshold,
                None => {
                    warn!(indices = ?face.vertices, "Dropping face with out-of-range vertex index");
                    false
                }
            }
        })
        .copied()
        .collect();

    mesh.faces = kept;
    original_count - mesh.faces.len()
}

/// Remove coincident face pairs that face opposite directions.
///
/// Faces are grouped by their sorted vertex indices. Within a group, any two
/// faces whose unit normals have a dot product below `opposing_dot` are both
/// removed. Each face pairs at most once.
///
/// Returns the number of faces removed.
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshVertex};
/// use mesh_repair::remove_internal_faces;
///
/// let mut mesh = Mesh::new("sheet");
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
/// mesh.push_face(Face::new([0, 1, 2]));
/// mesh.push_face(Face::new([0, 2, 1]));
///
/// assert_eq!(remove_internal_faces(&mut mesh, -0.99), 2);
/// ```
pub fn remove_internal_faces(mesh: &mut Mesh, opposing_dot: f64) -> usize {
    if mesh.faces.is_empty() {
        return 0;
    }

    let mut groups: HashMap<[u32; 3], Vec<(usize, Vector3<f64>)>> = HashMap::new();
    for (index, face) in mesh.faces.iter().enumerate() {
        let normal = mesh
            .face_triangle(face)
            .map_or_else(Vector3::zeros, |tri| tri.normal());
        groups
            .entry(face.canonical_key())
            .or_default()
            .push((index, normal));
    }

    let mut remove = vec![false; mesh.faces.len()];
    for members in groups.values().filter(|members| members.len() >= 2) {
        for (position, &(i, normal_i)) in members.iter().enumerate() {
            if remove[i] {
                continue;
            }
            for &(j, normal_j) in &members[position + 1..] {
                if remove[j] {
                    continue;
                }
                if normal_i.dot(&normal_j) < opposing_dot {
                    remove[i] = true;
                    remove[j] = true;
                    break;
                }
            }
        }
    }

    let original_count = mesh.faces.len();
    mesh.faces = mesh
        .faces
        .iter()
        .zip(&remove)
        .filter(|&(_, &removed)| !removed)
        .map(|(face, _)| *face)
        .collect();

    original_count - mesh.faces.len()
}

/// Remove faces over the same vertex set as an earlier face.
///
/// Winding and starting vertex are ignored; the first occurrence is kept.
///
/// Returns the number of faces removed.
pub fn remove_duplicate_faces(mesh: &mut Mesh) -> usize {
    let original_count = mesh.faces.len();

    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(original_count);
    let kept: Vec<Face> = mesh
        .faces
        .iter()
        .filter(|face| seen.insert(face.canonical_key()))
        .copied()
        .collect();

    mesh.faces = kept;
    original_count - mesh.faces.len()
}

/// Drop vertices no face references and remap face indices.
///
/// Referenced vertices keep their relative order. A mesh without faces ends
/// up without vertices.
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshVertex};
/// use mesh_repair::remove_unreferenced_vertices;
///
/// let mut mesh = Mesh::new("m");
/// mesh.push_vertex(MeshVertex::from_coords(100.0, 100.0, 100.0)); // unreferenced
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
/// mesh.push_face(Face::new([1, 3, 2]));
///
/// remove_unreferenced_vertices(&mut mesh);
/// assert_eq!(mesh.vertices.len(), 3);
/// assert_eq!(mesh.faces[0].vertices, [0, 2, 1]);
/// ```
#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
pub fn remove_unreferenced_vertices(mesh: &mut Mesh) {
    let mut referenced = vec![false; mesh.vertices.len()];
    for face in &mesh.faces {
        for &index in &face.vertices {
            if let Some(slot) = referenced.get_mut(index as usize) {
                *slot = true;
            }
        }
    }

    let mut remap = vec![u32::MAX; mesh.vertices.len()];
    let mut vertices = Vec::with_capacity(referenced.iter().filter(|&&r| r).count());
    for (old_index, vertex) in mesh.vertices.iter().enumerate() {
        if referenced[old_index] {
            remap[old_index] = vertices.len() as u32;
            vertices.push(*vertex);
        }
    }

    let faces: Vec<Face> = mesh
        .faces
        .iter()
        .filter_map(|face| {
            let mut remapped = *face;
            for index in &mut remapped.vertices {
                match remap.get(*index as usize) {
                    Some(&new_index) if new_index != u32::MAX => *index = new_index,
                    _ => {
                        warn!(indices = ?face.vertices, "Dropping face with out-of-range vertex index");
                        return None;
                    }
                }
            }
            Some(remapped)
        })
        .collect();

    mesh.vertices = vertices;
    mesh.faces = faces;
}

/// Run the four cleanup stages in order.
///
/// Bounds are not recomputed; callers that display the mesh should call
/// [`Mesh::calculate_bounds`] afterwards.
///
/// # Example
///
/// ```
/// use mesh_types::{Face, Mesh, MeshVertex};
/// use mesh_repair::{clean_mesh, CleanParams};
///
/// let mut mesh = Mesh::new("m");
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
/// mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
/// mesh.push_face(Face::new([0, 1, 2]));
/// mesh.push_face(Face::new([0, 1, 2])); // duplicate
///
/// let summary = clean_mesh(&mut mesh, &CleanParams::default());
/// assert_eq!(summary.duplicates_removed, 1);
/// assert_eq!(summary.faces_removed(), 1);
/// ```
pub fn clean_mesh(mesh: &mut Mesh, params: &CleanParams) -> CleanSummary {
    let initial_vertices = mesh.vertices.len();
    let initial_faces = mesh.faces.len();

    let degenerates_removed = remove_degenerate_faces(mesh, params.degenerate_area_threshold);
    debug!(removed = degenerates_removed, "Removed degenerate faces");

    let internal_removed = remove_internal_faces(mesh, params.opposing_normal_dot);
    debug!(removed = internal_removed, "Removed internal face pairs");

    let duplicates_removed = remove_duplicate_faces(mesh);
    debug!(removed = duplicates_removed, "Removed duplicate faces");

    remove_unreferenced_vertices(mesh);

    let summary = CleanSummary {
        initial_vertices,
        initial_faces,
        final_vertices: mesh.vertices.len(),
        final_faces: mesh.faces.len(),
        degenerates_removed,
        internal_removed,
        duplicates_removed,
    };
    info!("{summary}");
    summary
}

/// Result of a [`clean_mesh`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Number of vertices before cleaning.
    pub initial_vertices: usize,
    /// Number of faces before cleaning.
    pub initial_faces: usize,
    /// Number of vertices after cleaning.
    pub final_vertices: usize,
    /// Number of faces after cleaning.
    pub final_faces: usize,
    /// Faces removed as degenerate.
    pub degenerates_removed: usize,
    /// Faces removed as opposing internal pairs.
    pub internal_removed: usize,
    /// Faces removed as duplicates.
    pub duplicates_removed: usize,
}

impl CleanSummary {
    /// Total faces removed across all stages.
    #[must_use]
    pub const fn faces_removed(&self) -> usize {
        self.degenerates_removed + self.internal_removed + self.duplicates_removed
    }

    /// Vertices dropped by compaction.
    #[must_use]
    pub const fn vertices_removed(&self) -> usize {
        self.initial_vertices.saturating_sub(self.final_vertices)
    }

    /// Check if cleaning changed anything.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.faces_removed() > 0 || self.vertices_removed() > 0
    }
}

impl std::fmt::Display for CleanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Clean: {} verts ({} unreferenced), {} faces ({} degenerate, {} internal, {} duplicate)",
            self.final_vertices,
            self.vertices_removed(),
            self.final_faces,
            self.degenerates_removed,
            self.internal_removed,
            self.duplicates_removed
        )
    }
}
