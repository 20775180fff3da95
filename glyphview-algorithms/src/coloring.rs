//! Coloring directives for glyph meshes

use glyphview_core::colormap::reversed_name;
use glyphview_core::{ColoringDirective, ColormapRegistry, DataTable, Error, Result, StyleState};

/// Color limits and colormap name after ordering.
///
/// Inverted limits are swapped and the colormap name gets the reversed
/// marker, so the mapping still runs from `low` to `high`.
pub fn ordered_limits(colormap: &str, low: f64, high: f64) -> (String, f64, f64) {
    if low > high {
        (reversed_name(colormap), high, low)
    } else {
        (colormap.to_string(), low, high)
    }
}

/// Repeat each point's scalar once per glyph vertex
pub fn replicate_scalars(values: &[f64], points_per_glyph: usize) -> Vec<f32> {
    values
        .iter()
        .flat_map(|&v| std::iter::repeat(v as f32).take(points_per_glyph))
        .collect()
}

/// Coloring resolved for one layer
#[derive(Debug, Clone)]
pub struct ResolvedColoring {
    pub directive: ColoringDirective,
    /// Per-vertex scalars, present in mapped mode only
    pub scalars: Option<Vec<f32>>,
}

/// Resolve the coloring of a layer.
///
/// Fixed mode (or a missing colormap) yields one color. Mapped mode reads the
/// color attribute, replicates it over each glyph and resolves the colormap,
/// failing if the name is unknown.
pub fn resolve_coloring(
    table: &DataTable,
    style: &StyleState,
    colormaps: &ColormapRegistry,
    points_per_glyph: usize,
) -> Result<ResolvedColoring> {
    let (attribute, colormap) = match (&style.color_attribute, &style.colormap_name) {
        (Some(attribute), Some(colormap)) if !style.uses_fixed_color() => (attribute, colormap),
        (None, Some(_)) if !style.uses_fixed_color() => {
            return Err(Error::InvalidStyle(
                "mapped color mode requires a color attribute".to_string(),
            ))
        }
        _ => {
            return Ok(ResolvedColoring {
                directive: ColoringDirective::Fixed(style.parsed_fixed_color()?),
                scalars: None,
            })
        }
    };

    let values = table.column(attribute)?;
    let (name, low, high) = ordered_limits(colormap, style.color_value_min, style.color_value_max);
    let colormap = colormaps.resolve(&name)?;

    Ok(ResolvedColoring {
        directive: ColoringDirective::Mapped {
            colormap,
            low,
            high,
        },
        scalars: Some(replicate_scalars(values, points_per_glyph)),
    })
}
