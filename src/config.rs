//! Chart configuration.
//!
//! Every field has a default, so an empty YAML document yields the stock Pokémon chart.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::{ColorMap, Rgba};
use crate::dataset::Attributes;
use crate::error::{Error, Result};
use crate::geometry::{Layout, Point};

/// Legend region settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Region width.
    pub width: f32,
    /// Region height.
    pub height: f32,
    /// Vertical distance between entries.
    pub spacing: f32,
    /// Radius of each color dot.
    pub dot_radius: f32,
    /// Center of the first dot.
    pub origin_x: f32,
    /// Center of the first dot.
    pub origin_y: f32,
    /// Horizontal distance from dot center to label.
    pub label_offset: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 400.0,
            spacing: 25.0,
            dot_radius: 7.0,
            origin_x: 10.0,
            origin_y: 20.0,
            label_offset: 20.0,
        }
    }
}

impl LegendConfig {
    /// Center of the first dot.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }
}

/// Tooltip placement and fade settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Horizontal offset from the pointer.
    pub offset_x: f32,
    /// Vertical offset from the pointer (negative is above).
    pub offset_y: f32,
    /// Fade-in/out duration in milliseconds.
    pub fade_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: -28.0,
            fade_ms: 200,
        }
    }
}

impl TooltipConfig {
    /// Fade duration.
    #[must_use]
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Location of the dataset (path or URL).
    pub data_path: String,
    /// Plot area and margins.
    pub layout: Layout,
    /// Legend region.
    pub legend: LegendConfig,
    /// Plotted stats.
    pub attributes: Attributes,
    /// Padding subtracted from the X domain floor.
    pub x_padding: f32,
    /// Radius of each mark.
    pub mark_radius: f32,
    /// Approximate number of ticks per axis.
    pub tick_count: usize,
    /// Category -> color table.
    pub colors: ColorMap,
    /// Fill for categories missing from `colors`.
    pub fallback_color: Rgba,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: "./data/pokemon.csv".to_string(),
            layout: Layout::default(),
            legend: LegendConfig::default(),
            attributes: Attributes::default(),
            x_padding: 20.0,
            mark_radius: 3.0,
            tick_count: 10,
            colors: ColorMap::default(),
            fallback_color: Rgba::FALLBACK_GRAY,
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default chart config ({}): {e}", path.display());
            Self::default()
        })
    }

    /// Reject sizes that cannot produce a chart.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for an empty plot area, [`Error::ConfigParse`] for
    /// negative radii or padding.
    pub fn validate(&self) -> Result<()> {
        if self.layout.width == 0 || self.layout.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.layout.width,
                height: self.layout.height,
            });
        }
        for (name, value) in [
            ("mark_radius", self.mark_radius),
            ("x_padding", self.x_padding),
            ("legend.dot_radius", self.legend.dot_radius),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(Error::ConfigParse {
                    line: 0,
                    message: format!("{name} must be non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Stat;

    #[test]
    fn test_config_default() {
        let config = ChartConfig::new();

        assert_eq!(config.layout.width, 500);
        assert_eq!(config.layout.height, 500);
        assert!((config.layout.margin.left - 50.0).abs() < f32::EPSILON);
        assert!((config.x_padding - 20.0).abs() < f32::EPSILON);
        assert!((config.mark_radius - 3.0).abs() < f32::EPSILON);
        assert_eq!(config.attributes.x, Stat::SpDef);
        assert_eq!(config.attributes.y, Stat::Total);
        assert_eq!(config.tooltip.fade(), Duration::from_millis(200));
        assert_eq!(config.fallback_color, Rgba::FALLBACK_GRAY);
    }

    #[test]
    fn test_config_parse_empty() {
        assert_eq!(ChartConfig::parse("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_config_parse_partial() {
        let yaml = r##"
layout:
  width: 800
attributes:
  x: Attack
  y: Sp. Atk
colors:
  Dragon: "#6F35FC"
fallback_color: "#333"
"##;

        let config = ChartConfig::parse(yaml).unwrap();

        assert_eq!(config.layout.width, 800);
        assert_eq!(config.layout.height, 500);
        assert_eq!(config.attributes.x, Stat::Attack);
        assert_eq!(config.attributes.y, Stat::SpAtk);
        assert_eq!(config.colors.len(), 1);
        assert_eq!(config.colors.get("Dragon"), Some(Rgba::rgb(0x6F, 0x35, 0xFC)));
        assert_eq!(config.fallback_color, Rgba::rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
layout:
  width: 500
  height: not_a_number
"#;

        let err = ChartConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_config_rejects_zero_width() {
        let result = ChartConfig::parse("layout:\n  width: 0\n");
        assert!(matches!(result, Err(Error::InvalidDimensions { width: 0, .. })));
    }

    #[test]
    fn test_config_rejects_negative_radius() {
        assert!(ChartConfig::parse("mark_radius: -1\n").is_err());
    }

    #[test]
    fn test_config_rejects_nan_padding() {
        let config = ChartConfig {
            x_padding: f32::NAN,
            ..ChartConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigParse { .. })));
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_load_or_default() {
        let config = ChartConfig::load_or_default("/nonexistent/path.yaml");
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.yaml");
        std::fs::write(&path, "tick_count: 5\n").unwrap();

        let config = ChartConfig::load(&path).unwrap();
        assert_eq!(config.tick_count, 5);
    }
}
