//! Chart rendering.
//!
//! Turns a [`ChartContext`] into [`SvgElement`] trees: the static furniture (axes, axis
//! labels, legend) drawn once, and the [`Mark`]s redrawn on every filter change.

mod axis;
mod legend;
mod marks;

pub use axis::{axis, AxisOrientation, TICK_PADDING, TICK_SIZE};
pub use legend::legend;
pub use marks::{build_marks, Mark};

use crate::chart::ChartContext;
use crate::color::Rgba;
use crate::output::{FontSize, SvgElement, TextAnchor};

/// Axis label font size.
const LABEL_SIZE: FontSize = FontSize::Pt(10.0);

/// Both axes and their labels, in plot coordinates.
#[must_use]
pub fn chart_furniture(ctx: &ChartContext) -> Vec<SvgElement> {
    let tick_count = ctx.config().tick_count;
    let height = ctx.config().layout.height as f32;

    let mut elements = vec![
        SvgElement::group(
            Some(format!("translate(0,{height})")),
            vec![axis(ctx.x_scale(), AxisOrientation::Bottom, tick_count)],
        ),
        axis(ctx.y_scale(), AxisOrientation::Left, tick_count),
    ];
    elements.extend(axis_labels(ctx));
    elements
}

/// The X label under the plot and the rotated Y label left of it.
#[must_use]
pub fn axis_labels(ctx: &ChartContext) -> Vec<SvgElement> {
    let layout = &ctx.config().layout;
    let attributes = ctx.config().attributes;

    let x_label = SvgElement::Text {
        x: layout.width as f32 / 3.0,
        y: layout.height as f32 + 30.0,
        text: attributes.x.column().to_string(),
        font_size: LABEL_SIZE,
        fill: Rgba::BLACK,
        anchor: TextAnchor::Start,
        dy: None,
        transform: None,
    };

    let y_label = SvgElement::Text {
        x: 10.0,
        y: -50.0,
        text: attributes.y.column().to_string(),
        font_size: LABEL_SIZE,
        fill: Rgba::BLACK,
        anchor: TextAnchor::Start,
        dy: None,
        transform: Some("translate(15, 300) rotate(-90)".to_string()),
    };

    vec![x_label, y_label]
}

/// Legend entries for the chart's color map.
#[must_use]
pub fn chart_legend(ctx: &ChartContext) -> Vec<SvgElement> {
    legend(&ctx.config().colors, &ctx.config().legend)
}
