//! Named colormaps and the registry that resolves them
//!
//! Colormaps are piecewise-linear ramps over evenly spaced stops. A name may
//! carry any number of trailing `_r` markers; each one flips the ramp, so
//! `viridis_r` is reversed viridis and `viridis_r_r` is plain viridis again.

use crate::color::Color;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Suffix marking a reversed colormap
pub const REVERSED_SUFFIX: &str = "_r";

/// Color used for scalars that are not finite
pub const NAN_COLOR: Color = Color::rgb(0.5, 0.5, 0.5);

/// A colormap for mapping scalar values to colors
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    /// Name of the colormap
    pub name: String,
    /// Color stops (positions from 0.0 to 1.0)
    stops: Vec<(f32, Color)>,
    /// Whether the colormap is reversed
    reversed: bool,
}

impl Colormap {
    /// Create a new colormap from a list of colors (evenly spaced)
    pub fn from_colors(name: impl Into<String>, colors: Vec<Color>) -> Self {
        let n = colors.len();
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f32 / (n - 1).max(1) as f32, c))
            .collect();

        Self {
            name: name.into(),
            stops,
            reversed: false,
        }
    }

    /// Reverse the colormap
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Sample the colormap at a position (0.0 to 1.0)
    pub fn sample(&self, t: f32) -> Color {
        let mut t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if self.reversed {
            t = 1.0 - t;
        }

        match self.stops.as_slice() {
            [] => Color::default(),
            [(_, only)] => *only,
            stops => {
                for pair in stops.windows(2) {
                    let (t0, c0) = pair[0];
                    let (t1, c1) = pair[1];
                    if t >= t0 && t <= t1 {
                        return Color::lerp(&c0, &c1, (t - t0) / (t1 - t0));
                    }
                }
                stops[stops.len() - 1].1
            }
        }
    }

    /// Map a scalar through the color limits `[low, high]`.
    ///
    /// Values outside the limits saturate at the ramp ends, a zero-width range
    /// maps everything to the low end and non-finite values get [`NAN_COLOR`].
    pub fn map_value(&self, value: f64, low: f64, high: f64) -> Color {
        if !value.is_finite() {
            return NAN_COLOR;
        }
        let t = if high > low {
            ((value - low) / (high - low)) as f32
        } else {
            0.0
        };
        self.sample(t)
    }
}

// Built-in colormaps

/// Get the viridis colormap (perceptually uniform, colorblind-safe)
pub fn viridis() -> Colormap {
    Colormap::from_colors(
        "viridis",
        vec![
            Color::rgb(0.267, 0.005, 0.329),
            Color::rgb(0.282, 0.141, 0.458),
            Color::rgb(0.254, 0.265, 0.530),
            Color::rgb(0.207, 0.372, 0.553),
            Color::rgb(0.164, 0.471, 0.558),
            Color::rgb(0.128, 0.567, 0.551),
            Color::rgb(0.135, 0.659, 0.518),
            Color::rgb(0.267, 0.749, 0.441),
            Color::rgb(0.478, 0.821, 0.318),
            Color::rgb(0.741, 0.873, 0.150),
            Color::rgb(0.993, 0.906, 0.144),
        ],
    )
}

pub fn plasma() -> Colormap {
    Colormap::from_colors(
        "plasma",
        vec![
            Color::rgb(0.050, 0.030, 0.528),
            Color::rgb(0.294, 0.012, 0.615),
            Color::rgb(0.494, 0.012, 0.658),
            Color::rgb(0.665, 0.138, 0.614),
            Color::rgb(0.798, 0.280, 0.470),
            Color::rgb(0.898, 0.396, 0.304),
            Color::rgb(0.973, 0.558, 0.154),
            Color::rgb(0.992, 0.748, 0.159),
            Color::rgb(0.940, 0.975, 0.131),
        ],
    )
}

pub fn inferno() -> Colormap {
    Colormap::from_colors(
        "inferno",
        vec![
            Color::rgb(0.001, 0.000, 0.014),
            Color::rgb(0.133, 0.047, 0.263),
            Color::rgb(0.341, 0.063, 0.429),
            Color::rgb(0.550, 0.161, 0.506),
            Color::rgb(0.735, 0.216, 0.330),
            Color::rgb(0.878, 0.392, 0.102),
            Color::rgb(0.978, 0.557, 0.035),
            Color::rgb(0.992, 0.772, 0.247),
            Color::rgb(0.988, 0.998, 0.645),
        ],
    )
}

pub fn magma() -> Colormap {
    Colormap::from_colors(
        "magma",
        vec![
            Color::rgb(0.001, 0.000, 0.014),
            Color::rgb(0.116, 0.042, 0.232),
            Color::rgb(0.271, 0.051, 0.404),
            Color::rgb(0.461, 0.098, 0.495),
            Color::rgb(0.665, 0.176, 0.515),
            Color::rgb(0.844, 0.295, 0.461),
            Color::rgb(0.962, 0.507, 0.454),
            Color::rgb(0.992, 0.738, 0.600),
            Color::rgb(0.987, 0.991, 0.750),
        ],
    )
}

/// Diverging blue-to-red map
pub fn coolwarm() -> Colormap {
    Colormap::from_colors(
        "coolwarm",
        vec![
            Color::rgb(0.230, 0.299, 0.754),
            Color::rgb(0.552, 0.691, 0.996),
            Color::rgb(0.865, 0.865, 0.865),
            Color::rgb(0.957, 0.647, 0.510),
            Color::rgb(0.706, 0.016, 0.150),
        ],
    )
}

pub fn gray() -> Colormap {
    Colormap::from_colors(
        "gray",
        vec![Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0)],
    )
}

/// Append the reversed marker to a colormap name
pub fn reversed_name(name: &str) -> String {
    format!("{}{}", name, REVERSED_SUFFIX)
}

/// Lookup table from colormap names to ramps
#[derive(Clone, Debug)]
pub struct ColormapRegistry {
    maps: BTreeMap<String, Colormap>,
}

impl Default for ColormapRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ColormapRegistry {
    /// Create a registry without any colormap
    pub fn empty() -> Self {
        Self {
            maps: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in colormaps
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for cmap in [viridis(), plasma(), inferno(), magma(), coolwarm(), gray()] {
            registry.register(cmap);
        }
        registry
    }

    /// Register a colormap under its own name, replacing any previous entry
    pub fn register(&mut self, colormap: Colormap) {
        self.maps.insert(colormap.name.to_lowercase(), colormap);
    }

    /// Registered base names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    /// Resolve a name, honouring trailing reversed markers.
    ///
    /// The returned colormap carries the requested name.
    pub fn resolve(&self, name: &str) -> Result<Colormap> {
        let mut base = name.trim().to_lowercase();
        let mut reversed = false;
        while let Some(stripped) = base.strip_suffix(REVERSED_SUFFIX) {
            if self.maps.contains_key(base.as_str()) {
                break;
            }
            base = stripped.to_string();
            reversed = !reversed;
        }

        let mut colormap = self
            .maps
            .get(&base)
            .cloned()
            .ok_or_else(|| Error::UnknownColormap(name.to_string()))?;
        if reversed {
            colormap = colormap.reversed();
        }
        colormap.name = name.to_string();
        Ok(colormap)
    }
}
