//! Hover tooltip.
//!
//! Exactly one [`Tooltip`] exists per chart. Hovering a mark overwrites its content and
//! position and fades it in; leaving a mark fades it out but leaves the content in place
//! until the next hover replaces it.

use std::time::Duration;

use crate::config::TooltipConfig;
use crate::dataset::Record;
use crate::geometry::Point;
use crate::output::escape_xml;

/// What the tooltip says about one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    /// Display name.
    pub name: String,
    /// Primary type.
    pub category: String,
    /// Secondary type, if any.
    pub subcategory: Option<String>,
}

impl TooltipContent {
    /// Content for `record`.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            category: record.primary_type.clone(),
            subcategory: record.secondary_type.clone(),
        }
    }

    /// Three lines of escaped HTML; a missing subcategory is an empty line.
    #[must_use]
    pub fn html(&self) -> String {
        format!(
            "<p>{}<br />{}<br />{}</p>",
            escape_xml(&self.name),
            escape_xml(&self.category),
            escape_xml(self.subcategory.as_deref().unwrap_or_default())
        )
    }
}

/// An opacity transition toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Final opacity (0.0 or 1.0).
    pub target: f32,
    /// Transition length.
    pub duration: Duration,
}

/// The single tooltip element's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    position: Point,
    fade: Fade,
    config: TooltipConfig,
}

impl Tooltip {
    /// A hidden, empty tooltip.
    #[must_use]
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            content: None,
            position: Point::ORIGIN,
            fade: Fade {
                target: 0.0,
                duration: Duration::ZERO,
            },
            config,
        }
    }

    /// Pointer entered a mark: replace content, move next to the pointer, fade in.
    pub fn show(&mut self, content: TooltipContent, pointer: Point) {
        log::debug!("tooltip: {}", content.name);
        self.content = Some(content);
        self.position = pointer.offset(self.config.offset_x, self.config.offset_y);
        self.fade = Fade {
            target: 1.0,
            duration: self.config.fade(),
        };
    }

    /// Pointer left a mark: fade out, keep content.
    pub fn hide(&mut self) {
        self.fade = Fade {
            target: 0.0,
            duration: self.config.fade(),
        };
    }

    /// Current content.
    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Page position of the tooltip's top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The transition most recently started.
    #[must_use]
    pub fn fade(&self) -> Fade {
        self.fade
    }

    /// Whether the tooltip is fading in or shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.fade.target > 0.0
    }

    /// Current HTML, empty before the first hover.
    #[must_use]
    pub fn html(&self) -> String {
        self.content.as_ref().map(TooltipContent::html).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(name: &str, sub: Option<&str>) -> TooltipContent {
        TooltipContent {
            name: name.to_string(),
            category: "Grass".to_string(),
            subcategory: sub.map(str::to_string),
        }
    }

    #[test]
    fn test_new_tooltip_is_hidden_and_empty() {
        let tooltip = Tooltip::new(TooltipConfig::default());
        assert!(!tooltip.is_visible());
        assert!(tooltip.content().is_none());
        assert_eq!(tooltip.html(), "");
    }

    #[test]
    fn test_show_positions_above_pointer() {
        let mut tooltip = Tooltip::new(TooltipConfig::default());
        tooltip.show(content("Bulbasaur", Some("Poison")), Point::new(120.0, 300.0));

        assert!(tooltip.is_visible());
        assert_eq!(tooltip.position(), Point::new(120.0, 272.0));
        assert_eq!(tooltip.fade().duration, Duration::from_millis(200));
        assert_eq!(tooltip.html(), "<p>Bulbasaur<br />Grass<br />Poison</p>");
    }

    #[test]
    fn test_hide_keeps_content() {
        let mut tooltip = Tooltip::new(TooltipConfig::default());
        tooltip.show(content("Bulbasaur", None), Point::ORIGIN);
        tooltip.hide();

        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.content().map(|c| c.name.as_str()), Some("Bulbasaur"));
        assert!((tooltip.fade().target - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_second_hover_replaces_content_entirely() {
        let mut tooltip = Tooltip::new(TooltipConfig::default());
        tooltip.show(content("Bulbasaur", Some("Poison")), Point::ORIGIN);
        tooltip.show(content("Oddish", None), Point::new(5.0, 5.0));

        let html = tooltip.html();
        assert_eq!(html, "<p>Oddish<br />Grass<br /></p>");
        assert!(!html.contains("Bulbasaur"));
        assert!(!html.contains("Poison"));
    }

    #[test]
    fn test_missing_subcategory_is_empty_line() {
        assert_eq!(content("Charmander", None).html(), "<p>Charmander<br />Grass<br /></p>");
    }

    #[test]
    fn test_html_is_escaped() {
        let html = content("Mr. <Mime>", None).html();
        assert!(html.contains("Mr. &lt;Mime&gt;"));
    }

    #[test]
    fn test_from_record() {
        let record = Record::builder("Pikachu", "Electric").build();
        let c = TooltipContent::from_record(&record);
        assert_eq!(c.name, "Pikachu");
        assert_eq!(c.category, "Electric");
        assert_eq!(c.subcategory, None);
    }
}
