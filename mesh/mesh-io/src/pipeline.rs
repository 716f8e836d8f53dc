//! Steps shared by every loader once decoding is done.

use std::path::Path;

use mesh_repair::clean_mesh;
use mesh_types::Mesh;
use tracing::info;

use crate::options::LoadOptions;
use crate::weld::VertexWelder;

/// The welder a load should use.
pub(crate) fn welder_for(options: &LoadOptions) -> VertexWelder {
    if options.no_dedupe {
        VertexWelder::disabled()
    } else {
        VertexWelder::new(options.merge_tolerance)
    }
}

/// Display name for a file: its stem, or the whole path if it has none.
pub(crate) fn mesh_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

/// Finalize a freshly decoded mesh.
///
/// In order: renormalize accumulated normals (only if they were welded),
/// compute bounds, replace normals with smooth ones (if `smooth`), and run
/// the cleanup pipeline (if requested), recomputing bounds afterwards.
pub(crate) fn finish(mesh: &mut Mesh, options: &LoadOptions, welded: bool, smooth: bool) {
    if welded {
        mesh.finalize_normals();
    }

    mesh.calculate_bounds();

    if smooth {
        mesh.compute_smooth_normals();
    }

    if options.clean_mesh {
        clean_mesh(mesh, &options.clean_params);
        mesh.calculate_bounds();
    }

    info!(
        name = %mesh.name,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Loaded mesh"
    );
}
