//! Axis-aligned viewer bounds

use crate::error::Result;
use crate::point_cloud::AxisAttributes;
use crate::table::DataTable;
use serde::{Deserialize, Serialize};

/// Spatial limits of the 3D viewer, one `[min, max]` pair per axis.
///
/// Only the extent matters to the mesh pipeline: glyph sizes are divided by
/// the largest span so that they look the same at any data scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Default for ViewerBounds {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0), (0.0, 1.0))
    }
}

impl ViewerBounds {
    pub fn new(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> Self {
        Self {
            x_min: x.0,
            x_max: x.1,
            y_min: y.0,
            y_max: y.1,
            z_min: z.0,
            z_max: z.1,
        }
    }

    /// Same limits on all three axes
    pub fn cube(min: f64, max: f64) -> Self {
        Self::new((min, max), (min, max), (min, max))
    }

    /// Fit the bounds to the finite values of the three axis columns.
    ///
    /// An axis without any finite value falls back to `[0, 1]`.
    pub fn from_table(table: &DataTable, axes: &AxisAttributes) -> Result<Self> {
        let [x, y, z] = axes.names();
        let fit = |name: &str| -> Result<(f64, f64)> {
            Ok(table.finite_range(name)?.unwrap_or((0.0, 1.0)))
        };
        Ok(Self::new(fit(x)?, fit(y)?, fit(z)?))
    }

    /// `(min, max)` for x, y and z
    pub fn axes(&self) -> [(f64, f64); 3] {
        [
            (self.x_min, self.x_max),
            (self.y_min, self.y_max),
            (self.z_min, self.z_max),
        ]
    }

    /// Largest `|max - min|` over the three axes
    pub fn largest_span(&self) -> f64 {
        self.axes()
            .iter()
            .map(|(lo, hi)| (hi - lo).abs())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Divisor applied to glyph sizes.
    ///
    /// This is the largest span, or 1.0 when the bounds are degenerate
    /// (zero or non-finite extent).
    pub fn normalization_factor(&self) -> f64 {
        let span = self.largest_span();
        if span.is_finite() && span > 0.0 {
            span
        } else {
            tracing::warn!(span, "degenerate viewer bounds, using normalization factor 1.0");
            1.0
        }
    }
}
