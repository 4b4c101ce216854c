//! In-memory surface.

use std::collections::HashMap;

use crate::config::TooltipConfig;
use crate::error::{Error, Result};
use crate::filter::{Control, Selection};
use crate::geometry::Point;
use crate::interaction::Tooltip;
use crate::output::{SvgElement, SvgEncoder};
use crate::render::Mark;

use super::{Frame, Region, Surface};

#[derive(Debug, Clone)]
struct ControlState {
    options: Vec<String>,
    selected: usize,
}

#[derive(Debug, Clone)]
struct SceneMark {
    mark: Mark,
    hoverable: bool,
}

#[derive(Debug, Clone)]
struct SceneRegion {
    frame: Frame,
    elements: Vec<SvgElement>,
}

/// A surface held entirely in memory.
///
/// Events are injected with [`SceneSurface::select`], [`SceneSurface::pointer_enter`] and
/// [`SceneSurface::pointer_leave`]; the drawing can be serialized with
/// [`SceneSurface::chart_svg`] and [`SceneSurface::legend_svg`].
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    regions: HashMap<Region, SceneRegion>,
    controls: HashMap<Control, ControlState>,
    marks: Vec<SceneMark>,
    tooltip: Option<Tooltip>,
    tooltips_created: usize,
    clears: usize,
}

impl SceneSurface {
    /// An empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the selected option of `control`, as a user would.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] if the control is not populated or lacks `value`.
    pub fn select(&mut self, control: Control, value: &str) -> Result<()> {
        let state = self.controls.get_mut(&control).ok_or_else(|| {
            Error::Surface(format!("control #{} not populated", control.element_id()))
        })?;
        let index = state.options.iter().position(|o| o == value).ok_or_else(|| {
            Error::Surface(format!(
                "control #{} has no option {value:?}",
                control.element_id()
            ))
        })?;
        state.selected = index;
        Ok(())
    }

    /// Options currently offered by `control`.
    #[must_use]
    pub fn options(&self, control: Control) -> &[String] {
        self.controls
            .get(&control)
            .map_or(&[], |state| state.options.as_slice())
    }

    /// Pointer entered mark `index` at page position `pointer`.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] if no hoverable mark has that index.
    pub fn pointer_enter(&mut self, index: usize, pointer: Point) -> Result<()> {
        let content = self.hoverable(index)?.tooltip.clone();
        let tooltip = self
            .tooltip
            .as_mut()
            .ok_or_else(|| Error::Surface("tooltip not created".to_string()))?;
        tooltip.show(content, pointer);
        Ok(())
    }

    /// Pointer left mark `index`.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] if no hoverable mark has that index.
    pub fn pointer_leave(&mut self, index: usize) -> Result<()> {
        self.hoverable(index)?;
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide();
        }
        Ok(())
    }

    fn hoverable(&self, index: usize) -> Result<&Mark> {
        match self.marks.get(index) {
            Some(m) if m.hoverable => Ok(&m.mark),
            Some(_) => Err(Error::Surface(format!("mark {index} has no hover handlers"))),
            None => Err(Error::Surface(format!("no mark {index}"))),
        }
    }

    /// Marks currently drawn, in draw order.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().map(|m| &m.mark)
    }

    /// The shared tooltip, once hover has been attached.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// How many tooltip elements were ever created.
    #[must_use]
    pub fn tooltips_created(&self) -> usize {
        self.tooltips_created
    }

    /// How many times the marks were cleared.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Whether `region` has been drawn.
    #[must_use]
    pub fn has_region(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    /// Chart region as SVG markup: furniture followed by marks.
    #[must_use]
    pub fn chart_svg(&self) -> Option<String> {
        let marks = self.marks.iter().map(|m| m.mark.to_svg());
        self.region_svg(Region::Chart, marks)
    }

    /// Legend region as SVG markup.
    #[must_use]
    pub fn legend_svg(&self) -> Option<String> {
        self.region_svg(Region::Legend, std::iter::empty())
    }

    fn region_svg(
        &self,
        region: Region,
        extra: impl Iterator<Item = SvgElement>,
    ) -> Option<String> {
        let scene = self.regions.get(&region)?;
        let children = scene.elements.iter().cloned().chain(extra).collect();
        let svg = SvgEncoder::new(scene.frame.width, scene.frame.height)
            .element(SvgElement::group(Some(scene.frame.transform()), children))
            .render();
        Some(svg)
    }
}

impl Surface for SceneSurface {
    fn draw_furniture(
        &mut self,
        region: Region,
        frame: Frame,
        elements: Vec<SvgElement>,
    ) -> Result<()> {
        self.regions
            .insert(region, SceneRegion { frame, elements });
        Ok(())
    }

    fn populate_control(&mut self, control: Control, options: &[String]) -> Result<()> {
        self.controls.insert(
            control,
            ControlState {
                options: options.to_vec(),
                selected: 0,
            },
        );
        Ok(())
    }

    fn control_value(&self, control: Control) -> Result<Selection> {
        self.controls
            .get(&control)
            .and_then(|state| state.options.get(state.selected))
            .map(|raw| Selection::parse(raw))
            .ok_or_else(|| {
                Error::Surface(format!("control #{} has no selection", control.element_id()))
            })
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
        self.clears += 1;
    }

    fn draw_marks(&mut self, marks: &[Mark]) -> Result<()> {
        if !self.has_region(Region::Chart) {
            return Err(Error::Surface("chart region not drawn".to_string()));
        }
        self.marks.extend(marks.iter().map(|mark| SceneMark {
            mark: mark.clone(),
            hoverable: false,
        }));
        Ok(())
    }

    fn attach_hover(&mut self, marks: &[Mark], config: &TooltipConfig) -> Result<()> {
        if self.tooltip.is_none() {
            self.tooltip = Some(Tooltip::new(*config));
            self.tooltips_created += 1;
        }
        // Marks are appended by draw_marks, so the ones just drawn are the tail.
        let start = self.marks.len().saturating_sub(marks.len());
        for scene_mark in &mut self.marks[start..] {
            scene_mark.hoverable = true;
        }
        Ok(())
    }

    fn mark_count(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::interaction::TooltipContent;

    fn mark(name: &str) -> Mark {
        Mark {
            cx: 1.0,
            cy: 2.0,
            r: 3.0,
            fill: Rgba::BLACK,
            category: "Normal".to_string(),
            tooltip: TooltipContent {
                name: name.to_string(),
                category: "Normal".to_string(),
                subcategory: None,
            },
        }
    }

    fn chart_frame() -> Frame {
        Frame {
            width: 570.0,
            height: 560.0,
            origin: Point::new(50.0, 10.0),
        }
    }

    #[test]
    fn test_controls_default_to_first_option() {
        let mut surface = SceneSurface::new();
        let options = vec!["All".to_string(), "1".to_string()];
        surface.populate_control(Control::Generation, &options).unwrap();

        assert_eq!(surface.control_value(Control::Generation).unwrap(), Selection::All);
        surface.select(Control::Generation, "1").unwrap();
        assert_eq!(
            surface.control_value(Control::Generation).unwrap(),
            Selection::Value("1".to_string())
        );
    }

    #[test]
    fn test_select_unknown_option_fails() {
        let mut surface = SceneSurface::new();
        surface
            .populate_control(Control::Legendary, &["All".to_string()])
            .unwrap();
        assert!(surface.select(Control::Legendary, "Maybe").is_err());
        assert!(surface.select(Control::Generation, "All").is_err());
    }

    #[test]
    fn test_marks_require_chart_region() {
        let mut surface = SceneSurface::new();
        assert!(surface.draw_marks(&[mark("a")]).is_err());

        surface
            .draw_furniture(Region::Chart, chart_frame(), Vec::new())
            .unwrap();
        surface.draw_marks(&[mark("a")]).unwrap();
        assert_eq!(surface.mark_count(), 1);
    }

    #[test]
    fn test_hover_needs_attach() {
        let mut surface = SceneSurface::new();
        surface
            .draw_furniture(Region::Chart, chart_frame(), Vec::new())
            .unwrap();
        let marks = [mark("a")];
        surface.draw_marks(&marks).unwrap();

        assert!(surface.pointer_enter(0, Point::ORIGIN).is_err());
        surface.attach_hover(&marks, &TooltipConfig::default()).unwrap();
        surface.pointer_enter(0, Point::ORIGIN).unwrap();
        assert!(surface.tooltip().unwrap().is_visible());
    }

    #[test]
    fn test_tooltip_created_once() {
        let mut surface = SceneSurface::new();
        surface
            .draw_furniture(Region::Chart, chart_frame(), Vec::new())
            .unwrap();
        for _ in 0..3 {
            surface.clear_marks();
            let marks = [mark("a"), mark("b")];
            surface.draw_marks(&marks).unwrap();
            surface.attach_hover(&marks, &TooltipConfig::default()).unwrap();
        }
        assert_eq!(surface.tooltips_created(), 1);
        assert_eq!(surface.clears(), 3);
        assert_eq!(surface.mark_count(), 2);
    }

    #[test]
    fn test_chart_svg_contains_marks() {
        let mut surface = SceneSurface::new();
        assert!(surface.chart_svg().is_none());

        surface
            .draw_furniture(Region::Chart, chart_frame(), Vec::new())
            .unwrap();
        surface.draw_marks(&[mark("a"), mark("b")]).unwrap();
        let svg = surface.chart_svg().unwrap();

        assert!(svg.contains(r#"width="570px""#));
        assert!(svg.contains(r#"transform="translate(50,10)""#));
        assert_eq!(svg.matches("<circle").count(), 2);
    }
}
