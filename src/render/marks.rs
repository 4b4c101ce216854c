//! Data marks.

use crate::chart::ChartContext;
use crate::color::Rgba;
use crate::dataset::Record;
use crate::interaction::TooltipContent;
use crate::output::SvgElement;

/// One plotted record.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Center x in plot coordinates.
    pub cx: f32,
    /// Center y in plot coordinates.
    pub cy: f32,
    /// Radius.
    pub r: f32,
    /// Fill resolved from the record's primary type.
    pub fill: Rgba,
    /// Primary type, carried as the mark's legend attribute.
    pub category: String,
    /// What hovering this mark shows.
    pub tooltip: TooltipContent,
}

impl Mark {
    /// SVG circle for this mark.
    #[must_use]
    pub fn to_svg(&self) -> SvgElement {
        SvgElement::Circle {
            cx: self.cx,
            cy: self.cy,
            r: self.r,
            fill: self.fill,
            class: Some("mark".to_string()),
            legend: Some(self.category.clone()),
        }
    }
}

/// One mark per visible record, in record order.
///
/// [`ChartContext::new`] rejects records lacking a plotted stat, so every record of the
/// context has a position.
#[must_use]
pub fn build_marks(visible: &[&Record], ctx: &ChartContext) -> Vec<Mark> {
    visible
        .iter()
        .filter_map(|record| {
            let center = ctx.position(record)?;
            Some(Mark {
                cx: center.x,
                cy: center.y,
                r: ctx.config().mark_radius,
                fill: ctx.fill_for(&record.primary_type),
                category: record.primary_type.clone(),
                tooltip: TooltipContent::from_record(record),
            })
        })
        .collect()
}
