//! Glyph radius and per-point size factors
//!
//! All sizes are divided by the viewer normalization factor so that glyphs
//! keep the same apparent size whatever the data units are.

use glyphview_core::{DataTable, Result, SizeMode, StyleState};

/// Value substituted for every point when the size limits coincide,
/// before the square root is taken
pub const DEGENERATE_SIZE_PROXY: f64 = 10.0;

/// Upper end of the linear size ramp, before the square root is taken
pub const SIZE_RAMP_MAX: f64 = 20.0;

/// How glyph copies are scaled relative to the template radius
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphScaling {
    /// Every copy keeps the template radius
    Uniform,
    /// One multiplier per point
    PerPoint(Vec<f64>),
}

/// Radius of the template glyph plus the per-copy scaling
#[derive(Debug, Clone, PartialEq)]
pub struct SizePlan {
    pub base_radius: f64,
    pub scaling: GlyphScaling,
}

/// `size_scaling * sqrt(fixed_size) / (10 * factor)`, with a non-finite
/// result (e.g. negative size) coerced to 0
pub fn fixed_radius(style: &StyleState, normalization_factor: f64) -> f64 {
    let radius = style.size_scaling * style.fixed_size.sqrt() / (10.0 * normalization_factor);
    if radius.is_finite() {
        radius
    } else {
        tracing::warn!(
            fixed_size = style.fixed_size,
            size_scaling = style.size_scaling,
            "non-finite glyph radius, using 0"
        );
        0.0
    }
}

/// Size values before the scaling/normalization multiplier.
///
/// Values are clipped to `[vmin, vmax]` and mapped linearly into
/// `sqrt(0..=20)`. When `vmin == vmax` every point gets `sqrt(10)`.
/// Anything that comes out as NaN is returned as 0.
pub fn ramp_sizes(values: &[f64], vmin: f64, vmax: f64) -> Vec<f64> {
    if vmin == vmax {
        tracing::debug!(vmin, "degenerate size limits, using constant size");
        return vec![DEGENERATE_SIZE_PROXY.sqrt(); values.len()];
    }

    values
        .iter()
        .map(|&v| {
            // NaN inputs collapse onto vmin here; f64::clamp would panic on vmin > vmax
            let clipped = v.max(vmin).min(vmax);
            let size = (SIZE_RAMP_MAX * (clipped - vmin) / (vmax - vmin)).sqrt();
            if size.is_nan() {
                0.0
            } else {
                size
            }
        })
        .collect()
}

/// Per-point size multipliers: [`ramp_sizes`] times
/// `size_scaling / normalization_factor`, NaN coerced to 0
pub fn mapped_sizes(
    values: &[f64],
    style: &StyleState,
    normalization_factor: f64,
) -> Vec<f64> {
    let multiplier = style.size_scaling / normalization_factor;
    ramp_sizes(values, style.size_value_min, style.size_value_max)
        .into_iter()
        .map(|size| {
            let scaled = size * multiplier;
            if scaled.is_nan() {
                0.0
            } else {
                scaled
            }
        })
        .collect()
}

/// Decide the template radius and per-copy scaling for a layer
pub fn plan_sizes(
    table: &DataTable,
    style: &StyleState,
    normalization_factor: f64,
) -> Result<SizePlan> {
    let base_radius = fixed_radius(style, normalization_factor);

    let scaling = match (style.size_mode, style.size_attribute.as_deref()) {
        (SizeMode::Mapped, Some(attribute)) => {
            let values = table.column(attribute)?;
            GlyphScaling::PerPoint(mapped_sizes(values, style, normalization_factor))
        }
        _ => GlyphScaling::Uniform,
    };

    Ok(SizePlan {
        base_radius,
        scaling,
    })
}
