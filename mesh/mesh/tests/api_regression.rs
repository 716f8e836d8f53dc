//! API Regression Tests for the mesh crates
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable and consistent across the mesh crates. They are organized in 3
//! tiers of increasing scope:
//!
//! - Tier 1: Foundation (mesh-types: data model, accessors, normals, transform)
//! - Tier 2: Core Operations (mesh-io loading, mesh-repair cleanup)
//! - Tier 3: Pipelines (load options end to end, file round trips)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use mesh::{io, prelude::*, repair, types};
use nalgebra::{Matrix4, Point3, Vector3};

/// The ASCII STL text of a unit square split along its diagonal.
const SQUARE_STL: &str = "solid square
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid square
";

// =============================================================================
// TIER 1: Foundation - Data Model
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = types::MeshVertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert_eq!(v.normal, Vector3::zeros());
        assert_eq!(v.uv, types::Vector2::zeros());

        let v2 = types::MeshVertex::new(Point3::new(4.0, 5.0, 6.0), Vector3::y())
            .with_uv(types::Vector2::new(0.5, 0.25));
        assert_eq!(v2.normal, Vector3::y());
        assert_eq!(v2.uv.x, 0.5);
    }

    #[test]
    fn mesh_construction_and_accessors() {
        let mut mesh = Mesh::new("tri");
        let a = mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
        let b = mesh.push_vertex(MeshVertex::from_coords(1.0, 0.0, 0.0));
        let c = mesh.push_vertex(MeshVertex::from_coords(0.0, 1.0, 0.0));
        mesh.push_face(Face::new([a, c, b]));

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.face_indices(0), Some([0, 2, 1]));
        assert_eq!(mesh.face_material(0), None);
        assert!(mesh.vertex(3).is_none());
    }

    #[test]
    fn bounds_are_exact() {
        let mut mesh = Mesh::new("b");
        mesh.push_vertex(MeshVertex::from_coords(-1.0, -2.0, -3.0));
        mesh.push_vertex(MeshVertex::from_coords(4.0, 5.0, 6.0));
        mesh.push_vertex(MeshVertex::from_coords(0.0, 0.0, 0.0));
        mesh.calculate_bounds();

        assert_eq!(mesh.bounds().min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.bounds().max, Point3::new(4.0, 5.0, 6.0));
        assert_eq!(mesh.size(), Vector3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn transform_and_clone() {
        let mut mesh = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::default()).unwrap();
        let snapshot = mesh.clone();

        mesh.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 1.0)));

        assert_eq!(mesh.bounds().max, Point3::new(2.0, 3.0, 0.0));
        assert_eq!(snapshot.bounds().max, Point3::new(1.0, 1.0, 0.0));
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn flat_and_smooth_normals() {
        let mut mesh = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::default()).unwrap();

        mesh.compute_flat_normals();
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal, -Vector3::z(), epsilon = 1e-12);
        }

        mesh.compute_smooth_normals();
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal, -Vector3::z(), epsilon = 1e-12);
        }
    }
}

// =============================================================================
// TIER 2: Core Operations - Loading and Cleanup
// =============================================================================

mod tier2_core {
    use super::*;

    #[test]
    fn decode_ascii_stl() {
        let mesh = io::decode_stl(SQUARE_STL.as_bytes(), "fallback", &LoadOptions::default()).unwrap();

        assert_eq!(mesh.name, "square");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_relative_eq!(mesh.triangle(0).unwrap().normal(), -Vector3::z());
        assert_relative_eq!(mesh.vertices[0].normal, Vector3::z());
    }

    #[test]
    fn stl_encoding_detection() {
        assert_eq!(
            io::detect_stl_encoding(SQUARE_STL.as_bytes()),
            io::StlEncoding::Ascii
        );

        let mut bytes = Vec::new();
        let mesh = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::default()).unwrap();
        io::write_stl_binary(&mesh, &mut bytes).unwrap();
        assert_eq!(io::detect_stl_encoding(&bytes), io::StlEncoding::Binary);
    }

    #[test]
    fn welder_standalone() {
        let mut mesh = Mesh::new("w");
        let mut welder = io::VertexWelder::new(0.0);
        let a = welder.insert(&mut mesh, Point3::new(1.0, 1.0, 1.0), Vector3::z());
        let b = welder.insert(&mut mesh, Point3::new(1.0, 1.0, 1.0), Vector3::z());
        assert_eq!(a, b);
        assert!(io::EXACT_TOLERANCE > 0.0);
    }

    #[test]
    fn cleanup_stages_and_summary() {
        let mut mesh = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::default()).unwrap();
        let first = mesh.faces[0];
        let [a, b, c] = first.vertices;
        mesh.push_face(Face::new([a, c, b]));
        mesh.push_face(Face::new([a, a, b]));

        let summary = clean_mesh(&mut mesh, &CleanParams::default());
        assert_eq!(summary.degenerates_removed, 1);
        assert_eq!(summary.internal_removed, 2);
        assert_eq!(summary.duplicates_removed, 0);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert!(validate_indices(&mesh).is_ok());
    }

    #[test]
    fn individual_stages_are_public() {
        let mut mesh = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::default()).unwrap();
        let dup = mesh.faces[1];
        mesh.push_face(dup);

        assert_eq!(repair::remove_degenerate_faces(&mut mesh, 1e-10), 0);
        assert_eq!(repair::remove_internal_faces(&mut mesh, -0.99), 0);
        assert_eq!(repair::remove_duplicate_faces(&mut mesh), 1);
        repair::remove_unreferenced_vertices(&mut mesh);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn validation_errors() {
        let mut mesh = Mesh::new("bad");
        mesh.push_face(Face::new([0, 1, 2]));
        assert!(matches!(
            validate_indices(&mesh),
            Err(repair::RepairError::InvalidIndex { face: 0, .. })
        ));
    }
}

// =============================================================================
// TIER 3: Pipelines - Options and Files
// =============================================================================

mod tier3_pipelines {
    use super::*;

    #[test]
    fn load_options_presets() {
        let smooth = io::decode_stl(SQUARE_STL.as_bytes(), "sq", &LoadOptions::smooth()).unwrap();
        for v in &smooth.vertices {
            assert_relative_eq!(v.normal, -Vector3::z(), epsilon = 1e-12);
        }

        let separate = io::decode_stl(
            SQUARE_STL.as_bytes(),
            "sq",
            &LoadOptions::default().with_no_dedupe(true),
        )
        .unwrap();
        assert_eq!(separate.vertex_count(), 6);
    }

    #[test]
    fn format_dispatch_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("square.stl");
        std::fs::write(&source, SQUARE_STL).unwrap();

        assert_eq!(MeshFormat::from_path(&source), Some(MeshFormat::Stl));
        let mesh = load_mesh(&source).unwrap();

        let copy_path = dir.path().join("copy.stl");
        save_stl(&mesh, &copy_path, true).unwrap();
        let copy = load_mesh_with(&copy_path, &LoadOptions::clean()).unwrap();

        assert_eq!(copy.name, "copy");
        assert_eq!(copy.faces, mesh.faces);
        assert_eq!(copy.center(), mesh.center());
    }

    #[test]
    fn obj_through_umbrella() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(&path, "o quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn unknown_extension() {
        assert!(matches!(
            load_mesh("scene.fbx"),
            Err(io::IoError::UnknownFormat { .. })
        ));
    }
}
