//! Output encoders (SVG).

mod svg;

pub use svg::{escape_xml, FontSize, SvgElement, SvgEncoder, TextAnchor};
