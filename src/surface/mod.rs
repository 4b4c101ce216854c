//! Drawing surfaces.
//!
//! A [`Surface`] is the host environment the chart draws into: a chart region, a legend
//! region, two selection controls, and a single tooltip. The chart only ever populates or
//! draws into these; it never creates the regions themselves.
//!
//! [`SceneSurface`] keeps everything in memory and is driven directly by tests. Under the
//! `wasm` feature, `DomSurface` binds the same contract to a live HTML document.

mod scene;

pub use scene::SceneSurface;

use crate::config::TooltipConfig;
use crate::error::Result;
use crate::filter::{Control, Selection};
use crate::geometry::Point;
use crate::output::SvgElement;
use crate::render::Mark;

/// The two drawing regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Axes, labels and marks.
    Chart,
    /// Category legend.
    Legend,
}

impl Region {
    /// Id of the host element backing this region.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Chart => "vis",
            Self::Legend => "legend",
        }
    }
}

/// Size of a region's drawing and the translation of its inner group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Drawing width.
    pub width: f32,
    /// Drawing height.
    pub height: f32,
    /// Translation applied to everything drawn in the region.
    pub origin: Point,
}

impl Frame {
    /// `transform` attribute for the inner group.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate({},{})", self.origin.x, self.origin.y)
    }
}

/// Host environment for one chart.
pub trait Surface {
    /// Draw static elements into `region`, sized and translated by `frame`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Surface`] if the region is unavailable.
    fn draw_furniture(&mut self, region: Region, frame: Frame, elements: Vec<SvgElement>)
        -> Result<()>;

    /// Replace the options of `control`; the first option becomes selected.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Surface`] if the control is unavailable.
    fn populate_control(&mut self, control: Control, options: &[String]) -> Result<()>;

    /// Currently selected value of `control`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Surface`] if the control is unavailable or has no selection.
    fn control_value(&self, control: Control) -> Result<Selection>;

    /// Remove every mark from the chart region.
    fn clear_marks(&mut self);

    /// Append `marks` to the chart region.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Surface`] if the chart region has not been drawn.
    fn draw_marks(&mut self, marks: &[Mark]) -> Result<()>;

    /// Bind pointer enter/leave on the marks just drawn to the shared tooltip.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Surface`] if the tooltip cannot be created.
    fn attach_hover(&mut self, marks: &[Mark], config: &TooltipConfig) -> Result<()>;

    /// Number of marks currently in the chart region.
    fn mark_count(&self) -> usize;
}
