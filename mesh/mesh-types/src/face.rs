//! Faces and materials.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle face referencing three vertices by index.
///
/// `material` is `None` when the face has no material, otherwise an index
/// into [`Mesh::materials`](crate::Mesh::materials).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Vertex indices `[v0, v1, v2]`.
    pub vertices: [u32; 3],
    /// Material index, if any.
    pub material: Option<u32>,
}

impl Face {
    /// Create a face with no material.
    #[inline]
    #[must_use]
    pub const fn new(vertices: [u32; 3]) -> Self {
        Self {
            vertices,
            material: None,
        }
    }

    /// Create a face referencing a material.
    #[inline]
    #[must_use]
    pub const fn with_material(vertices: [u32; 3], material: u32) -> Self {
        Self {
            vertices,
            material: Some(material),
        }
    }

    /// Indices sorted ascending.
    ///
    /// Two faces over the same three vertices share this key regardless of
    /// winding or starting vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Face;
    ///
    /// assert_eq!(Face::new([2, 0, 1]).canonical_key(), [0, 1, 2]);
    /// assert_eq!(Face::new([0, 2, 1]).canonical_key(), [0, 1, 2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn canonical_key(&self) -> [u32; 3] {
        let mut key = self.vertices;
        key.sort_unstable();
        key
    }

    /// Whether any two indices are equal.
    #[inline]
    #[must_use]
    pub const fn has_repeated_index(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || a == c
    }
}

/// A PBR material record.
///
/// Meshes only reference materials by index; texture decoding happens
/// elsewhere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Display name.
    pub name: String,
    /// RGBA base color in `0..=1`.
    pub base_color: [f64; 4],
    /// 0 = dielectric, 1 = metal.
    pub metallic: f64,
    /// 0 = smooth, 1 = rough.
    pub roughness: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 0.0,
            roughness: 1.0,
        }
    }
}

impl Material {
    /// Create an opaque dielectric material with the given color.
    #[must_use]
    pub fn new(name: impl Into<String>, base_color: [f64; 4]) -> Self {
        Self {
            name: name.into(),
            base_color,
            ..Self::default()
        }
    }
}
