//! SVG element model and serializer.
//!
//! The renderer describes chart furniture and marks as [`SvgElement`] trees. The same tree
//! is serialized to markup by [`SvgEncoder`] and, under the `wasm` feature, turned into live
//! DOM nodes, so both paths share [`SvgElement::tag`] and [`SvgElement::attributes`].

use std::fmt::{self, Write as FmtWrite};

use crate::color::Rgba;

/// SVG encoder for a fixed-size drawing region.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: f32,
    /// SVG height
    height: f32,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// Font size with its CSS unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Unitless user-space size.
    Px(f32),
    /// Points.
    Pt(f32),
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}"),
            Self::Pt(v) => write!(f, "{v}pt"),
        }
    }
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Group, optionally translated/rotated
    Group {
        transform: Option<String>,
        class: Option<String>,
        children: Vec<SvgElement>,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        class: Option<String>,
        /// Category, written as `data-legend`
        legend: Option<String>,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: FontSize,
        fill: Rgba,
        anchor: TextAnchor,
        /// Baseline shift such as `0.71em`
        dy: Option<String>,
        transform: Option<String>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl SvgElement {
    /// Group with a transform.
    #[must_use]
    pub fn group(transform: Option<String>, children: Vec<SvgElement>) -> Self {
        Self::Group {
            transform,
            class: None,
            children,
        }
    }

    /// Element name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group { .. } => "g",
            Self::Circle { .. } => "circle",
            Self::Line { .. } => "line",
            Self::Path { .. } => "path",
            Self::Text { .. } => "text",
        }
    }

    /// Attribute name/value pairs, in output order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        match self {
            Self::Group {
                transform, class, ..
            } => {
                if let Some(t) = transform {
                    attrs.push(("transform", t.clone()));
                }
                if let Some(c) = class {
                    attrs.push(("class", c.clone()));
                }
            }
            Self::Circle {
                cx,
                cy,
                r,
                fill,
                class,
                legend,
            } => {
                attrs.push(("cx", cx.to_string()));
                attrs.push(("cy", cy.to_string()));
                attrs.push(("r", r.to_string()));
                attrs.push(("fill", fill.to_hex()));
                if let Some(c) = class {
                    attrs.push(("class", c.clone()));
                }
                if let Some(l) = legend {
                    attrs.push(("data-legend", l.clone()));
                }
            }
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                attrs.push(("x1", x1.to_string()));
                attrs.push(("y1", y1.to_string()));
                attrs.push(("x2", x2.to_string()));
                attrs.push(("y2", y2.to_string()));
                attrs.push(("stroke", stroke.to_hex()));
                attrs.push(("stroke-width", stroke_width.to_string()));
            }
            Self::Path {
                d,
                fill,
                stroke,
                stroke_width,
            } => {
                attrs.push(("d", d.clone()));
                attrs.push(("fill", fill.map_or_else(|| "none".to_string(), Rgba::to_hex)));
                if let Some(s) = stroke {
                    attrs.push(("stroke", s.to_hex()));
                    attrs.push(("stroke-width", stroke_width.to_string()));
                }
            }
            Self::Text {
                x,
                y,
                font_size,
                fill,
                anchor,
                dy,
                transform,
                ..
            } => {
                attrs.push(("x", x.to_string()));
                attrs.push(("y", y.to_string()));
                if let Some(dy) = dy {
                    attrs.push(("dy", dy.clone()));
                }
                if let Some(t) = transform {
                    attrs.push(("transform", t.clone()));
                }
                attrs.push(("font-size", font_size.to_string()));
                attrs.push(("fill", fill.to_hex()));
                attrs.push(("text-anchor", anchor.as_str().to_string()));
                attrs.push(("font-family", "sans-serif".to_string()));
            }
        }
        attrs
    }

    /// Text content, for `<text>` only.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Child elements, for `<g>` only.
    #[must_use]
    pub fn children(&self) -> &[SvgElement] {
        match self {
            Self::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Count elements with the given tag in this subtree, self included.
    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        usize::from(self.tag() == tag) + self.children().iter().map(|c| c.count(tag)).sum::<usize>()
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Add an element.
    #[must_use]
    pub fn element(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}px" height="{}px" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Escape XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_element(out: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    let attrs: String = element
        .attributes()
        .into_iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_xml(&v)))
        .collect();
    let tag = element.tag();

    if let Some(text) = element.text_content() {
        let _ = writeln!(out, "{indent}<{tag}{attrs}>{}</{tag}>", escape_xml(text));
    } else if element.children().is_empty() {
        let _ = writeln!(out, "{indent}<{tag}{attrs}/>");
    } else {
        let _ = writeln!(out, "{indent}<{tag}{attrs}>");
        for child in element.children() {
            write_element(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}</{tag}>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(cx: f32, cy: f32) -> SvgElement {
        SvgElement::Circle {
            cx,
            cy,
            r: 3.0,
            fill: Rgba::rgb(0x4E, 0x79, 0xA7),
            class: Some("mark".to_string()),
            legend: Some("Bug".to_string()),
        }
    }

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(570.0, 560.0).render();

        assert!(svg.contains("width=\"570px\""));
        assert!(svg.contains("height=\"560px\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_circle_with_legend() {
        let svg = SvgEncoder::new(100.0, 100.0).element(circle(50.0, 25.5)).render();

        assert!(svg.contains("<circle"));
        assert!(svg.contains("cx=\"50\""));
        assert!(svg.contains("cy=\"25.5\""));
        assert!(svg.contains("r=\"3\""));
        assert!(svg.contains("fill=\"#4E79A7\""));
        assert!(svg.contains("data-legend=\"Bug\""));
    }

    #[test]
    fn test_svg_group_nests_children() {
        let group = SvgElement::group(
            Some("translate(50, 10)".to_string()),
            vec![circle(1.0, 1.0), circle(2.0, 2.0)],
        );
        assert_eq!(group.count("circle"), 2);
        assert_eq!(group.count("g"), 1);

        let svg = SvgEncoder::new(100.0, 100.0).element(group).render();
        assert!(svg.contains("<g transform=\"translate(50, 10)\">"));
        assert!(svg.contains("</g>"));
    }

    #[test]
    fn test_svg_line() {
        let svg = SvgEncoder::new(100.0, 100.0)
            .element(SvgElement::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: 6.0,
                stroke: Rgba::BLACK,
                stroke_width: 1.0,
            })
            .render();

        assert!(svg.contains("<line"));
        assert!(svg.contains("y2=\"6\""));
        assert!(svg.contains("stroke=\"#000000\""));
    }

    #[test]
    fn test_svg_path_without_fill() {
        let svg = SvgEncoder::new(100.0, 100.0)
            .element(SvgElement::Path {
                d: "M0.5,6V0.5H500.5V6".to_string(),
                fill: None,
                stroke: Some(Rgba::BLACK),
                stroke_width: 1.0,
            })
            .render();

        assert!(svg.contains("d=\"M0.5,6V0.5H500.5V6\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_svg_text_units_and_escaping() {
        let svg = SvgEncoder::new(100.0, 100.0)
            .element(SvgElement::Text {
                x: 10.0,
                y: 50.0,
                text: "<script>\"Sp. Def\" & more".to_string(),
                font_size: FontSize::Pt(10.0),
                fill: Rgba::BLACK,
                anchor: TextAnchor::Start,
                dy: None,
                transform: None,
            })
            .render();

        assert!(svg.contains("font-size=\"10pt\""));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("&amp;"));
        assert!(svg.contains("&quot;"));
    }

    #[test]
    fn test_text_anchor_default() {
        assert_eq!(TextAnchor::default(), TextAnchor::Start);
        assert_eq!(TextAnchor::End.as_str(), "end");
    }

    #[test]
    fn test_font_size_display() {
        assert_eq!(FontSize::Px(10.0).to_string(), "10");
        assert_eq!(FontSize::Pt(10.0).to_string(), "10pt");
    }
}
