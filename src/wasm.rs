//! WebAssembly bindings for the browser.
//!
//! Binds the chart to a live HTML document. The page provides the regions; this module only
//! draws into them:
//!
//! ```html
//! <select id="generation"></select>
//! <select id="legendary"></select>
//! <div id="vis"></div>
//! <div id="legend"></div>
//! <script type="module">
//!   import init, { start } from './pokeviz.js';
//!   await init();
//!   await start();
//! </script>
//! ```
//!
//! The tooltip `<div class="tooltip">` is the one element created here, appended to the
//! body on first hover setup and reused for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, HtmlElement, HtmlSelectElement, MouseEvent, Response};

use crate::chart::ChartApp;
use crate::config::{ChartConfig, TooltipConfig};
use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::filter::{Control, Selection};
use crate::geometry::Point;
use crate::interaction::{Fade, Tooltip};
use crate::output::SvgElement;
use crate::render::Mark;
use crate::surface::{Frame, Region, Surface};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

fn js_error(value: JsValue) -> Error {
    Error::Surface(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Text a rejected promise carries to JavaScript.
fn error_message(error: &Error) -> String {
    error.to_string()
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error_message(&error))
    }
}

// ============================================================================
// Data source
// ============================================================================

/// A table fetched over HTTP with `window.fetch`.
#[derive(Debug, Clone)]
pub struct FetchSource {
    url: String,
}

impl FetchSource {
    /// Create a source for `url`, resolved against the page.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl DataSource for FetchSource {
    fn locator(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> Result<String> {
        let fetch_error = |value: JsValue| Error::Fetch(format!("{}: {value:?}", self.url));

        let window = web_sys::window().ok_or_else(|| Error::Fetch("no window".to_string()))?;
        let request: Promise = window.fetch_with_str(&self.url);
        let response: Response = JsFuture::from(request)
            .await
            .map_err(fetch_error)?
            .dyn_into()
            .map_err(fetch_error)?;

        if !response.ok() {
            return Err(Error::Fetch(format!(
                "{}: HTTP {}",
                self.url,
                response.status()
            )));
        }

        let text = JsFuture::from(response.text().map_err(fetch_error)?)
            .await
            .map_err(fetch_error)?;
        text.as_string()
            .ok_or_else(|| Error::Fetch(format!("{}: body is not text", self.url)))
    }
}

// ============================================================================
// DOM surface
// ============================================================================

struct DomMark {
    element: Element,
    // Dropped together with the element on clear.
    _handlers: Vec<MouseHandler>,
}

/// Surface backed by the page's DOM.
pub struct DomSurface {
    document: Document,
    plot: Option<Element>,
    marks: Vec<DomMark>,
    tooltip: Option<(HtmlElement, Rc<RefCell<Tooltip>>)>,
}

impl DomSurface {
    /// Bind to the current document.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] outside a browser window.
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Surface("no document".to_string()))?;
        Ok(Self {
            document,
            plot: None,
            marks: Vec::new(),
            tooltip: None,
        })
    }

    fn by_id(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| Error::Surface(format!("missing element #{id}")))
    }

    fn select(&self, control: Control) -> Result<HtmlSelectElement> {
        self.by_id(control.element_id())?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| Error::Surface(format!("#{} is not a <select>", control.element_id())))
    }

    fn create_node(&self, element: &SvgElement) -> Result<Element> {
        let node = self
            .document
            .create_element_ns(Some(SVG_NS), element.tag())
            .map_err(js_error)?;
        for (name, value) in element.attributes() {
            node.set_attribute(name, &value).map_err(js_error)?;
        }
        if let Some(text) = element.text_content() {
            node.set_text_content(Some(text));
        }
        for child in element.children() {
            let child_node = self.create_node(child)?;
            node.append_child(&child_node).map_err(js_error)?;
        }
        Ok(node)
    }

    fn tooltip(&mut self, config: &TooltipConfig) -> Result<(HtmlElement, Rc<RefCell<Tooltip>>)> {
        if let Some((div, state)) = &self.tooltip {
            return Ok((div.clone(), Rc::clone(state)));
        }

        let div: HtmlElement = self
            .document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| Error::Surface("tooltip is not an HTML element".to_string()))?;
        div.set_class_name("tooltip");
        let style = div.style();
        style.set_property("position", "absolute").map_err(js_error)?;
        style.set_property("pointer-events", "none").map_err(js_error)?;
        style.set_property("opacity", "0").map_err(js_error)?;

        let body = self
            .document
            .body()
            .ok_or_else(|| Error::Surface("document has no body".to_string()))?;
        body.append_child(&div).map_err(js_error)?;

        let state = Rc::new(RefCell::new(Tooltip::new(*config)));
        self.tooltip = Some((div.clone(), Rc::clone(&state)));
        log::debug!("tooltip created");
        Ok((div, state))
    }
}

fn transition_css(fade: Fade) -> String {
    format!("opacity {}ms", fade.duration.as_millis())
}

fn px(value: f32) -> String {
    format!("{value}px")
}

fn apply_fade(div: &HtmlElement, tooltip: &Tooltip) -> std::result::Result<(), JsValue> {
    let style = div.style();
    let fade = tooltip.fade();
    style.set_property("transition", &transition_css(fade))?;
    style.set_property("opacity", &fade.target.to_string())
}

fn show_tooltip(div: &HtmlElement, tooltip: &Tooltip) -> std::result::Result<(), JsValue> {
    let position = tooltip.position();
    div.set_inner_html(&tooltip.html());
    let style = div.style();
    style.set_property("left", &px(position.x))?;
    style.set_property("top", &px(position.y))?;
    apply_fade(div, tooltip)
}

impl Surface for DomSurface {
    fn draw_furniture(
        &mut self,
        region: Region,
        frame: Frame,
        elements: Vec<SvgElement>,
    ) -> Result<()> {
        let container = self.by_id(region.element_id())?;

        let svg = self
            .document
            .create_element_ns(Some(SVG_NS), "svg")
            .map_err(js_error)?;
        svg.set_attribute("width", &frame.width.to_string())
            .map_err(js_error)?;
        svg.set_attribute("height", &frame.height.to_string())
            .map_err(js_error)?;

        let group = self.create_node(&SvgElement::group(Some(frame.transform()), elements))?;
        svg.append_child(&group).map_err(js_error)?;
        container.append_child(&svg).map_err(js_error)?;

        if region == Region::Chart {
            self.plot = Some(group);
        }
        Ok(())
    }

    fn populate_control(&mut self, control: Control, options: &[String]) -> Result<()> {
        let select = self.select(control)?;
        select.set_inner_html("");
        for option in options {
            let node = self.document.create_element("option").map_err(js_error)?;
            node.set_attribute("value", option).map_err(js_error)?;
            node.set_text_content(Some(option));
            select.append_child(&node).map_err(js_error)?;
        }
        select.set_selected_index(0);
        Ok(())
    }

    fn control_value(&self, control: Control) -> Result<Selection> {
        Ok(Selection::parse(&self.select(control)?.value()))
    }

    fn clear_marks(&mut self) {
        for mark in self.marks.drain(..) {
            mark.element.remove();
        }
    }

    fn draw_marks(&mut self, marks: &[Mark]) -> Result<()> {
        let plot = self
            .plot
            .clone()
            .ok_or_else(|| Error::Surface("chart region not drawn".to_string()))?;
        for mark in marks {
            let element = self.create_node(&mark.to_svg())?;
            plot.append_child(&element).map_err(js_error)?;
            self.marks.push(DomMark {
                element,
                _handlers: Vec::new(),
            });
        }
        Ok(())
    }

    fn attach_hover(&mut self, marks: &[Mark], config: &TooltipConfig) -> Result<()> {
        let (div, state) = self.tooltip(config)?;
        let start = self.marks.len().saturating_sub(marks.len());

        for (dom_mark, mark) in self.marks[start..].iter_mut().zip(marks) {
            let content = mark.tooltip.clone();
            let enter = {
                let (div, state) = (div.clone(), Rc::clone(&state));
                Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    let pointer = Point::new(event.page_x() as f32, event.page_y() as f32);
                    let mut tooltip = state.borrow_mut();
                    tooltip.show(content.clone(), pointer);
                    if let Err(e) = show_tooltip(&div, &tooltip) {
                        log::warn!("tooltip update failed: {e:?}");
                    }
                })
            };
            let leave = {
                let (div, state) = (div.clone(), Rc::clone(&state));
                Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
                    let mut tooltip = state.borrow_mut();
                    tooltip.hide();
                    if let Err(e) = apply_fade(&div, &tooltip) {
                        log::warn!("tooltip update failed: {e:?}");
                    }
                })
            };

            dom_mark
                .element
                .add_event_listener_with_callback("mouseover", enter.as_ref().unchecked_ref())
                .map_err(js_error)?;
            dom_mark
                .element
                .add_event_listener_with_callback("mouseout", leave.as_ref().unchecked_ref())
                .map_err(js_error)?;
            dom_mark._handlers = vec![enter, leave];
        }
        Ok(())
    }

    fn mark_count(&self) -> usize {
        self.marks.len()
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Load the dataset and build the chart with the default configuration.
///
/// # Errors
///
/// Rejects with the error message if the dataset cannot be loaded or the page lacks a
/// required element. A failed load is terminal; reload the page to retry.
#[wasm_bindgen]
pub async fn start() -> std::result::Result<(), JsValue> {
    init_logging();
    run(ChartConfig::default()).await.map_err(report)
}

/// Like [`start`], with a YAML chart configuration.
///
/// # Errors
///
/// Rejects if `yaml` is not a valid configuration, or as [`start`].
#[wasm_bindgen(js_name = startWithConfig)]
pub async fn start_with_config(yaml: String) -> std::result::Result<(), JsValue> {
    init_logging();
    let config = ChartConfig::parse(&yaml).map_err(report)?;
    run(config).await.map_err(report)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn report(error: Error) -> JsValue {
    log::error!("chart failed: {error}");
    error.into()
}

async fn run(config: ChartConfig) -> Result<()> {
    let source = FetchSource::new(config.data_path.clone());
    let app = ChartApp::bootstrap(&source, config, DomSurface::new()?).await?;
    let app = Rc::new(RefCell::new(app));

    for control in Control::BOTH {
        let select = app.borrow().surface().select(control)?;
        let handler = {
            let app = Rc::clone(&app);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Err(e) = app.borrow_mut().on_filter_change() {
                    log::error!("redraw failed: {e}");
                }
            })
        };
        select
            .add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Listeners live as long as the page.
        handler.forget();
    }

    log::info!("chart ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fetch_source_locator() {
        let source = FetchSource::new("./data/pokemon.csv");
        assert_eq!(source.locator(), "./data/pokemon.csv");
    }

    #[test]
    fn test_error_message_is_display_text() {
        let error = Error::MissingColumn("Sp. Def".to_string());
        assert_eq!(error_message(&error), "Missing column: Sp. Def");

        let error = Error::Fetch("./data/pokemon.csv: HTTP 404".to_string());
        assert_eq!(error_message(&error), "Fetch error: ./data/pokemon.csv: HTTP 404");
    }

    #[test]
    fn test_tooltip_style_values() {
        let fade = Fade {
            target: 1.0,
            duration: Duration::from_millis(200),
        };
        assert_eq!(transition_css(fade), "opacity 200ms");
        assert_eq!(px(72.0), "72px");
        assert_eq!(px(-3.5), "-3.5px");
    }
}
