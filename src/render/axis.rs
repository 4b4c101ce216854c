//! Bottom and left axes.

use crate::color::Rgba;
use crate::output::{FontSize, SvgElement, TextAnchor};
use crate::scale::{format_tick, LinearScale, Scale};

/// Length of tick lines.
pub const TICK_SIZE: f32 = 6.0;

/// Gap between a tick line and its label.
pub const TICK_PADDING: f32 = 3.0;

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Horizontal axis, ticks pointing down.
    Bottom,
    /// Vertical axis, ticks pointing left.
    Left,
}

/// Build an axis for `scale` at the origin of its parent group.
///
/// Positions are offset by half a pixel so one-pixel lines land on pixel centers.
#[must_use]
pub fn axis(scale: &LinearScale, orientation: AxisOrientation, tick_count: usize) -> SvgElement {
    let (r0, r1) = scale.range();
    let step = scale.tick_step(tick_count);

    let domain = match orientation {
        AxisOrientation::Bottom => {
            format!("M{},{TICK_SIZE}V0.5H{}V{TICK_SIZE}", r0 + 0.5, r1 + 0.5)
        }
        AxisOrientation::Left => {
            format!("M-{TICK_SIZE},{}H0.5V{}H-{TICK_SIZE}", r0 + 0.5, r1 + 0.5)
        }
    };

    let mut children = vec![SvgElement::Path {
        d: domain,
        fill: None,
        stroke: Some(Rgba::BLACK),
        stroke_width: 1.0,
    }];

    for value in scale.ticks(tick_count) {
        let pos = scale.scale(value) + 0.5;
        let label = format_tick(value, step);
        let (transform, line, text) = match orientation {
            AxisOrientation::Bottom => (
                format!("translate({pos},0)"),
                SvgElement::Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2: 0.0,
                    y2: TICK_SIZE,
                    stroke: Rgba::BLACK,
                    stroke_width: 1.0,
                },
                SvgElement::Text {
                    x: 0.0,
                    y: TICK_SIZE + TICK_PADDING,
                    text: label,
                    font_size: FontSize::Px(10.0),
                    fill: Rgba::BLACK,
                    anchor: TextAnchor::Middle,
                    dy: Some("0.71em".to_string()),
                    transform: None,
                },
            ),
            AxisOrientation::Left => (
                format!("translate(0,{pos})"),
                SvgElement::Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2: -TICK_SIZE,
                    y2: 0.0,
                    stroke: Rgba::BLACK,
                    stroke_width: 1.0,
                },
                SvgElement::Text {
                    x: -(TICK_SIZE + TICK_PADDING),
                    y: 0.0,
                    text: label,
                    font_size: FontSize::Px(10.0),
                    fill: Rgba::BLACK,
                    anchor: TextAnchor::End,
                    dy: Some("0.32em".to_string()),
                    transform: None,
                },
            ),
        };
        children.push(SvgElement::Group {
            transform: Some(transform),
            class: Some("tick".to_string()),
            children: vec![line, text],
        });
    }

    let class = match orientation {
        AxisOrientation::Bottom => "axis axis-x",
        AxisOrientation::Left => "axis axis-y",
    };
    SvgElement::Group {
        transform: None,
        class: Some(class.to_string()),
        children,
    }
}
