//! Layer style state
//!
//! [`StyleState`] is plain data edited by the UI and read by the mesh
//! builder. Edits are detected by diffing two snapshots with
//! [`StyleState::changed_fields`], which is what drives redraws.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether glyphs share one color or are colored by an attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Fixed,
    Mapped,
}

/// Whether glyphs share one size or are sized by an attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeMode {
    #[default]
    Fixed,
    Mapped,
}

/// Individually observable style fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleField {
    ColorMode,
    ColorAttribute,
    ColorValueMin,
    ColorValueMax,
    Colormap,
    FixedColor,
    SizeMode,
    FixedSize,
    SizeAttribute,
    SizeValueMin,
    SizeValueMax,
    SizeScaling,
}

impl StyleField {
    pub const ALL: [StyleField; 12] = [
        StyleField::ColorMode,
        StyleField::ColorAttribute,
        StyleField::ColorValueMin,
        StyleField::ColorValueMax,
        StyleField::Colormap,
        StyleField::FixedColor,
        StyleField::SizeMode,
        StyleField::FixedSize,
        StyleField::SizeAttribute,
        StyleField::SizeValueMin,
        StyleField::SizeValueMax,
        StyleField::SizeScaling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleField::ColorMode => "color_mode",
            StyleField::ColorAttribute => "color_attribute",
            StyleField::ColorValueMin => "color_value_min",
            StyleField::ColorValueMax => "color_value_max",
            StyleField::Colormap => "colormap_name",
            StyleField::FixedColor => "fixed_color",
            StyleField::SizeMode => "size_mode",
            StyleField::FixedSize => "fixed_size",
            StyleField::SizeAttribute => "size_attribute",
            StyleField::SizeValueMin => "size_value_min",
            StyleField::SizeValueMax => "size_value_max",
            StyleField::SizeScaling => "size_scaling",
        }
    }
}

impl fmt::Display for StyleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display options for one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    pub color_mode: ColorMode,
    /// Color string, see [`Color::parse`]
    pub fixed_color: String,
    pub color_attribute: Option<String>,
    pub colormap_name: Option<String>,
    pub color_value_min: f64,
    pub color_value_max: f64,
    pub size_mode: SizeMode,
    pub fixed_size: f64,
    pub size_attribute: Option<String>,
    pub size_value_min: f64,
    pub size_value_max: f64,
    pub size_scaling: f64,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Fixed,
            fixed_color: "0.35".to_string(),
            color_attribute: None,
            colormap_name: Some("gray".to_string()),
            color_value_min: 0.0,
            color_value_max: 1.0,
            size_mode: SizeMode::Fixed,
            fixed_size: 3.0,
            size_attribute: None,
            size_value_min: 0.0,
            size_value_max: 1.0,
            size_scaling: 1.0,
        }
    }
}

fn same_f64(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl StyleState {
    pub fn with_fixed_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color_mode = ColorMode::Fixed;
        self.fixed_color = color.into();
        self
    }

    pub fn with_fixed_size(mut self, size: f64) -> Self {
        self.size_mode = SizeMode::Fixed;
        self.fixed_size = size;
        self
    }

    pub fn with_size_scaling(mut self, scaling: f64) -> Self {
        self.size_scaling = scaling;
        self
    }

    /// Color by `attribute` through `colormap` over `[min, max]`
    pub fn with_color_mapping<S: Into<String>>(
        mut self,
        attribute: S,
        colormap: S,
        min: f64,
        max: f64,
    ) -> Self {
        self.color_mode = ColorMode::Mapped;
        self.color_attribute = Some(attribute.into());
        self.colormap_name = Some(colormap.into());
        self.color_value_min = min;
        self.color_value_max = max;
        self
    }

    /// Size by `attribute` over `[min, max]`
    pub fn with_size_mapping<S: Into<String>>(mut self, attribute: S, min: f64, max: f64) -> Self {
        self.size_mode = SizeMode::Mapped;
        self.size_attribute = Some(attribute.into());
        self.size_value_min = min;
        self.size_value_max = max;
        self
    }

    /// True when the whole mesh gets a single color: either fixed mode was
    /// chosen or no colormap is configured.
    pub fn uses_fixed_color(&self) -> bool {
        self.color_mode == ColorMode::Fixed || self.colormap_name.is_none()
    }

    /// The fixed color, parsed
    pub fn parsed_fixed_color(&self) -> Result<Color> {
        Color::parse(&self.fixed_color)
    }

    /// Check the cross-field invariants of the current modes
    pub fn validate(&self) -> Result<()> {
        if self.uses_fixed_color() {
            self.parsed_fixed_color()?;
        } else if self.color_attribute.is_none() {
            return Err(Error::InvalidStyle(
                "mapped color mode requires a color attribute".to_string(),
            ));
        }

        if self.size_mode == SizeMode::Mapped && self.size_attribute.is_none() {
            return Err(Error::InvalidStyle(
                "mapped size mode requires a size attribute".to_string(),
            ));
        }
        Ok(())
    }

    /// Select the color attribute and reset the color limits to its finite
    /// range in `table`
    pub fn set_color_attribute(&mut self, table: &DataTable, attribute: &str) -> Result<()> {
        if let Some((lo, hi)) = table.finite_range(attribute)? {
            self.color_value_min = lo;
            self.color_value_max = hi;
        }
        self.color_attribute = Some(attribute.to_string());
        Ok(())
    }

    /// Select the size attribute and reset the size limits to its finite
    /// range in `table`
    pub fn set_size_attribute(&mut self, table: &DataTable, attribute: &str) -> Result<()> {
        if let Some((lo, hi)) = table.finite_range(attribute)? {
            self.size_value_min = lo;
            self.size_value_max = hi;
        }
        self.size_attribute = Some(attribute.to_string());
        Ok(())
    }

    /// Fields whose value differs between `previous` and `self`
    pub fn changed_fields(&self, previous: &StyleState) -> Vec<StyleField> {
        StyleField::ALL
            .into_iter()
            .filter(|field| !self.field_eq(previous, *field))
            .collect()
    }

    fn field_eq(&self, other: &StyleState, field: StyleField) -> bool {
        match field {
            StyleField::ColorMode => self.color_mode == other.color_mode,
            StyleField::ColorAttribute => self.color_attribute == other.color_attribute,
            StyleField::ColorValueMin => same_f64(self.color_value_min, other.color_value_min),
            StyleField::ColorValueMax => same_f64(self.color_value_max, other.color_value_max),
            StyleField::Colormap => self.colormap_name == other.colormap_name,
            StyleField::FixedColor => self.fixed_color == other.fixed_color,
            StyleField::SizeMode => self.size_mode == other.size_mode,
            StyleField::FixedSize => same_f64(self.fixed_size, other.fixed_size),
            StyleField::SizeAttribute => self.size_attribute == other.size_attribute,
            StyleField::SizeValueMin => same_f64(self.size_value_min, other.size_value_min),
            StyleField::SizeValueMax => same_f64(self.size_value_max, other.size_value_max),
            StyleField::SizeScaling => same_f64(self.size_scaling, other.size_scaling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid_fixed_style() {
        let style = StyleState::default();
        assert!(style.uses_fixed_color());
        style.validate().unwrap();
    }

    #[test]
    fn test_mapped_without_colormap_falls_back_to_fixed() {
        let mut style = StyleState::default();
        style.color_mode = ColorMode::Mapped;
        style.colormap_name = None;
        assert!(style.uses_fixed_color());
        style.validate().unwrap();
    }

    #[test]
    fn test_validate_reports_missing_attributes() {
        let mut style = StyleState::default();
        style.color_mode = ColorMode::Mapped;
        assert!(matches!(style.validate(), Err(Error::InvalidStyle(_))));

        let style = StyleState::default();
        let mut sized = style.clone();
        sized.size_mode = SizeMode::Mapped;
        assert!(matches!(sized.validate(), Err(Error::InvalidStyle(_))));

        let bad_color = style.with_fixed_color("chartreuse-ish");
        assert!(bad_color.validate().is_err());
    }

    #[test]
    fn test_changed_fields() {
        let before = StyleState::default();
        let after = before
            .clone()
            .with_fixed_size(9.0)
            .with_color_mapping("mass", "viridis", 0.0, 1.0);

        assert_eq!(
            after.changed_fields(&before),
            vec![
                StyleField::ColorMode,
                StyleField::ColorAttribute,
                StyleField::Colormap,
                StyleField::FixedSize,
            ]
        );
        assert!(before.changed_fields(&before.clone()).is_empty());
    }

    #[test]
    fn test_nan_limits_do_not_count_as_change() {
        let mut a = StyleState::default();
        a.size_value_min = f64::NAN;
        let b = a.clone();
        assert!(a.changed_fields(&b).is_empty());
    }

    #[test]
    fn test_attribute_selection_syncs_limits() {
        let table = DataTable::new("t")
            .with_column("mass", vec![4.0, f64::NAN, 10.0])
            .unwrap();
        let mut style = StyleState::default();
        style.set_size_attribute(&table, "mass").unwrap();
        assert_eq!(style.size_attribute.as_deref(), Some("mass"));
        assert_eq!((style.size_value_min, style.size_value_max), (4.0, 10.0));

        style.set_color_attribute(&table, "mass").unwrap();
        assert_eq!((style.color_value_min, style.color_value_max), (4.0, 10.0));

        assert!(style.set_color_attribute(&table, "missing").is_err());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(StyleField::Colormap.to_string(), "colormap_name");
        assert_eq!(StyleField::ALL.len(), 12);
    }
}
