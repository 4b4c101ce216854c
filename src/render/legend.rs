//! Category legend.

use crate::color::{ColorMap, Rgba};
use crate::config::LegendConfig;
use crate::output::{FontSize, SvgElement, TextAnchor};

/// One dot and one label per color-map entry, stacked vertically in map order.
#[must_use]
pub fn legend(colors: &ColorMap, config: &LegendConfig) -> Vec<SvgElement> {
    let origin = config.origin();
    let row_y = |i: usize| origin.y + i as f32 * config.spacing;

    let dots = colors.iter().enumerate().map(|(i, (category, fill))| SvgElement::Circle {
        cx: origin.x,
        cy: row_y(i),
        r: config.dot_radius,
        fill,
        class: Some("legend-dot".to_string()),
        legend: Some(category.to_string()),
    });

    let labels = colors.iter().enumerate().map(|(i, (category, _))| SvgElement::Text {
        x: origin.x + config.label_offset,
        y: row_y(i),
        text: category.to_string(),
        font_size: FontSize::Px(12.0),
        fill: Rgba::BLACK,
        anchor: TextAnchor::Start,
        dy: Some("0.35em".to_string()),
        transform: None,
    });

    dots.chain(labels).collect()
}
