//! Load configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mesh_repair::CleanParams;

/// Options controlling how a mesh file is turned into a [`Mesh`](mesh_types::Mesh).
///
/// # Example
///
/// ```
/// use mesh_io::LoadOptions;
///
/// let opts = LoadOptions::default()
///     .with_merge_tolerance(1e-6)
///     .with_clean_mesh(true);
/// assert!(opts.clean_mesh);
/// assert!(!opts.no_dedupe);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct LoadOptions {
    /// Replace loaded normals with area-weighted vertex averages.
    /// Default: false
    pub smooth_normals: bool,

    /// Disable vertex welding; every triangle gets three fresh vertices.
    /// Default: false
    pub no_dedupe: bool,

    /// Run the cleanup pipeline after loading.
    /// Default: false
    pub clean_mesh: bool,

    /// Welding grid size. `0.0` selects a `1e-12` grid.
    /// Default: 0.0
    pub merge_tolerance: f64,

    /// Synthesize normals for OBJ files that carry none.
    /// Default: true
    pub calculate_normals: bool,

    /// Thresholds used when `clean_mesh` is set.
    pub clean_params: CleanParams,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            smooth_normals: false,
            no_dedupe: false,
            clean_mesh: false,
            merge_tolerance: 0.0,
            calculate_normals: true,
            clean_params: CleanParams::default(),
        }
    }
}

impl LoadOptions {
    /// Options for smooth shading.
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            smooth_normals: true,
            ..Self::default()
        }
    }

    /// Options that clean the mesh after loading.
    #[must_use]
    pub fn clean() -> Self {
        Self {
            clean_mesh: true,
            ..Self::default()
        }
    }

    /// Set whether to compute smooth normals.
    #[must_use]
    pub fn with_smooth_normals(mut self, smooth: bool) -> Self {
        self.smooth_normals = smooth;
        self
    }

    /// Set whether to skip vertex welding.
    #[must_use]
    pub fn with_no_dedupe(mut self, no_dedupe: bool) -> Self {
        self.no_dedupe = no_dedupe;
        self
    }

    /// Set whether to clean the mesh after loading.
    #[must_use]
    pub fn with_clean_mesh(mut self, clean: bool) -> Self {
        self.clean_mesh = clean;
        self
    }

    /// Set the welding tolerance.
    #[must_use]
    pub fn with_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    /// Set whether OBJ files without normals get synthesized ones.
    #[must_use]
    pub fn with_calculate_normals(mut self, calculate: bool) -> Self {
        self.calculate_normals = calculate;
        self
    }

    /// Set the cleanup thresholds.
    #[must_use]
    pub fn with_clean_params(mut self, params: CleanParams) -> Self {
        self.clean_params = params;
        self
    }
}
