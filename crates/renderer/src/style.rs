//! Style configuration for heat map rendering.
//!
//! A style is a JSON document describing the colour palette (coldest
//! first), the chart layout and the legend strip. The built-in default
//! matches the published chart.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest colours a palette may have.
pub const MIN_PALETTE_SIZE: usize = 4;

/// Default palette, coldest to warmest.
pub const DEFAULT_PALETTE: [&str; 4] = ["#313695", "#74add1", "#fdae61", "#a50026"];

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Failed to read style file: {0}")]
    IoError(String),

    #[error("Failed to parse style: {0}")]
    ParseError(String),

    #[error("Style validation failed: {0}")]
    ValidationError(String),
}

/// Style configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapStyle {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Hex colours, coldest first
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub legend: Legend,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_name() -> String {
    "Monthly Global Land-Surface Temperature".to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_units() -> String {
    "°C".to_string()
}

/// Outer size and margins of the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 500.0,
            margin_top: 60.0,
            margin_right: 20.0,
            margin_bottom: 100.0,
            margin_left: 80.0,
        }
    }
}

impl Layout {
    /// Width available for cells.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available for cells.
    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

/// Legend swatch strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legend {
    pub width: f64,
    pub height: f64,
    /// Label each swatch boundary with its threshold temperature
    pub show_thresholds: bool,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 30.0,
            show_thresholds: true,
        }
    }
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: default_name(),
            palette: default_palette(),
            layout: Layout::default(),
            legend: Legend::default(),
            units: default_units(),
        }
    }
}

impl HeatmapStyle {
    /// Load style configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        serde_json::from_str(json).map_err(|e| StyleError::ParseError(e.to_string()))
    }

    /// Load style configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StyleError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if self.palette.len() < MIN_PALETTE_SIZE {
            return Err(StyleError::ValidationError(format!(
                "palette needs at least {} colours, got {}",
                MIN_PALETTE_SIZE,
                self.palette.len()
            )));
        }
        if let Some(bad) = self.palette.iter().find(|c| hex_to_rgb(c).is_none()) {
            return Err(StyleError::ValidationError(format!(
                "invalid colour '{}'",
                bad
            )));
        }

        let layout = &self.layout;
        if layout.plot_width() <= 0.0 || layout.plot_height() <= 0.0 {
            return Err(StyleError::ValidationError(
                "margins leave no room for the plot".to_string(),
            ));
        }
        if self.legend.width <= 0.0 || self.legend.height <= 0.0 {
            return Err(StyleError::ValidationError(
                "legend must have a positive size".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bucket_count(&self) -> usize {
        self.palette.len()
    }

    /// Colour token for a bucket, clamped to the warmest colour.
    pub fn color_for_bucket(&self, bucket: usize) -> &str {
        let idx = bucket.min(self.palette.len().saturating_sub(1));
        self.palette.get(idx).map(String::as_str).unwrap_or("#000000")
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#313695"), Some((0x31, 0x36, 0x95)));
        assert_eq!(hex_to_rgb("a50026"), Some((0xa5, 0x00, 0x26)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
    }

    #[test]
    fn test_default_style_is_valid() {
        let style = HeatmapStyle::default();
        style.validate().unwrap();
        assert_eq!(style.bucket_count(), 4);
        assert_eq!(style.layout.plot_width(), 1100.0);
        assert_eq!(style.layout.plot_height(), 340.0);
    }

    #[test]
    fn test_color_for_bucket_clamps() {
        let style = HeatmapStyle::default();
        assert_eq!(style.color_for_bucket(0), "#313695");
        assert_eq!(style.color_for_bucket(3), "#a50026");
        assert_eq!(style.color_for_bucket(99), "#a50026");
    }
}
