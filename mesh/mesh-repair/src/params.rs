//! Parameters for mesh cleanup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds used by [`clean_mesh`](crate::clean_mesh).
///
/// # Example
///
/// ```
/// use mesh_repair::CleanParams;
///
/// let params = CleanParams::default()
///     .with_degenerate_area_threshold(1e-8);
/// assert!((params.opposing_normal_dot + 0.99).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleanParams {
    /// Faces with area at or below this are degenerate.
    /// Default: `1e-10`
    pub degenerate_area_threshold: f64,

    /// Two faces over the same vertices whose unit normals have a dot
    /// product below this are an internal pair.
    /// Default: `-0.99`
    pub opposing_normal_dot: f64,
}

impl Default for CleanParams {
    fn default() -> Self {
        Self {
            degenerate_area_threshold: 1e-10,
            opposing_normal_dot: -0.99,
        }
    }
}

impl CleanParams {
    /// Set the degenerate area threshold.
    #[must_use]
    pub fn with_degenerate_area_threshold(mut self, threshold: f64) -> Self {
        self.degenerate_area_threshold = threshold;
        self
    }

    /// Set the opposing-normal dot product threshold.
    #[must_use]
    pub fn with_opposing_normal_dot(mut self, dot: f64) -> Self {
        self.opposing_normal_dot = dot;
        self
    }
}
