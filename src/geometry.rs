//! Geometric primitives for chart layout.
//!
//! Provides basic geometric types used for positioning chart regions and the tooltip.

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Left margin (holds the Y axis).
    pub left: f32,
    /// Right margin.
    pub right: f32,
    /// Top margin.
    pub top: f32,
    /// Bottom margin (holds the X axis).
    pub bottom: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 20.0,
            top: 10.0,
            bottom: 50.0,
        }
    }
}

/// Plot area size plus margins.
///
/// `width` and `height` are the inner plot area; the scales map onto them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Inner plot width in pixels.
    pub width: u32,
    /// Inner plot height in pixels.
    pub height: u32,
    /// Outer margins.
    pub margin: Margin,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            margin: Margin::default(),
        }
    }
}

impl Layout {
    /// Width of the whole chart region, margins included.
    #[must_use]
    pub fn outer_width(&self) -> f32 {
        self.width as f32 + self.margin.left + self.margin.right
    }

    /// Height of the whole chart region, margins included.
    #[must_use]
    pub fn outer_height(&self) -> f32 {
        self.height as f32 + self.margin.top + self.margin.bottom
    }

    /// Translation applied to the plot group.
    #[must_use]
    pub fn plot_origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(100.0, 100.0).offset(0.0, -28.0);
        assert_eq!(p, Point::new(100.0, 72.0));
    }

    #[test]
    fn test_default_layout_outer_size() {
        let layout = Layout::default();
        assert!((layout.outer_width() - 570.0).abs() < f32::EPSILON);
        assert!((layout.outer_height() - 560.0).abs() < f32::EPSILON);
        assert_eq!(layout.plot_origin(), Point::new(50.0, 10.0));
    }
}
