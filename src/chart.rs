//! Chart context and redraw pipeline.
//!
//! [`ChartContext`] is built once, after the dataset has loaded, and never changes: it owns
//! the configuration, the complete record set and the two scales. [`ChartApp`] pairs it
//! with a [`Surface`] and runs the pipeline:
//!
//! 1. [`ChartApp::bootstrap`] awaits the dataset; nothing touches the surface before that.
//! 2. Axes, labels and legend are drawn once.
//! 3. Both controls are populated.
//! 4. [`ChartApp::on_filter_change`] draws the initial marks and runs again on every
//!    control change: read both controls, filter the full record set, clear the marks,
//!    draw the visible ones, attach hover.

use std::collections::BTreeSet;

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::dataset::{DataSource, Dataset, Record};
use crate::error::{Error, Result};
use crate::filter::{apply_filter, Control, FilterOptions, FilterState};
use crate::geometry::Point;
use crate::render::{build_marks, chart_furniture, chart_legend};
use crate::scale::{compute_scales, LinearScale, Scale};
use crate::surface::{Frame, Region, SceneSurface, Surface};

/// Everything rendering needs, fixed for the lifetime of a chart.
#[derive(Debug, Clone)]
pub struct ChartContext {
    config: ChartConfig,
    records: Vec<Record>,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl ChartContext {
    /// Validate `config` and derive the scales from the full record set.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`ChartConfig::validate`], [`Error::EmptyData`] for an
    /// empty record set, and [`Error::InvalidNumber`] for a record missing a plotted stat.
    pub fn new(config: ChartConfig, records: Vec<Record>) -> Result<Self> {
        config.validate()?;
        if records.is_empty() {
            return Err(Error::EmptyData);
        }

        // Every record must be placeable, so each visible record gets exactly one mark.
        for (i, record) in records.iter().enumerate() {
            for stat in [config.attributes.x, config.attributes.y] {
                if record.stat(stat).is_none() {
                    return Err(Error::InvalidNumber {
                        row: i + 1,
                        column: stat.column().to_string(),
                        value: String::new(),
                    });
                }
            }
        }

        let (x_scale, y_scale) = compute_scales(
            &records,
            config.attributes.x,
            config.attributes.y,
            config.layout.width,
            config.layout.height,
            config.x_padding,
        )?;

        let unmapped: BTreeSet<&str> = records
            .iter()
            .map(|r| r.primary_type.as_str())
            .filter(|category| config.colors.get(category).is_none())
            .collect();
        if !unmapped.is_empty() {
            log::warn!(
                "no color for {}; using {}",
                unmapped.into_iter().collect::<Vec<_>>().join(", "),
                config.fallback_color.to_hex()
            );
        }

        Ok(Self {
            config,
            records,
            x_scale,
            y_scale,
        })
    }

    /// Chart configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The complete record set, in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// X scale.
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Y scale (inverted range).
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Fill for `category`, falling back to the configured color.
    #[must_use]
    pub fn fill_for(&self, category: &str) -> Rgba {
        self.config
            .colors
            .resolve(category, self.config.fallback_color)
    }

    /// Plot position of `record`, if it carries both plotted stats.
    #[must_use]
    pub fn position(&self, record: &Record) -> Option<Point> {
        let x = record.stat(self.config.attributes.x)?;
        let y = record.stat(self.config.attributes.y)?;
        Some(Point::new(self.x_scale.scale(x), self.y_scale.scale(y)))
    }

    /// Frame of the chart region.
    #[must_use]
    pub fn chart_frame(&self) -> Frame {
        let layout = &self.config.layout;
        Frame {
            width: layout.outer_width(),
            height: layout.outer_height(),
            origin: layout.plot_origin(),
        }
    }

    /// Frame of the legend region.
    #[must_use]
    pub fn legend_frame(&self) -> Frame {
        Frame {
            width: self.config.legend.width,
            height: self.config.legend.height,
            origin: Point::ORIGIN,
        }
    }
}

/// A live chart bound to a surface.
#[derive(Debug)]
pub struct ChartApp<S: Surface> {
    context: ChartContext,
    options: FilterOptions,
    surface: S,
    visible: usize,
}

impl<S: Surface> ChartApp<S> {
    /// Load the dataset from `source`, then build the chart on `surface`.
    ///
    /// A failed load is logged and returned before the surface is touched.
    ///
    /// # Errors
    ///
    /// Any load, configuration, scale or surface error.
    pub async fn bootstrap<D: DataSource>(
        source: &D,
        config: ChartConfig,
        surface: S,
    ) -> Result<Self> {
        let dataset = Dataset::load(source, config.attributes)
            .await
            .map_err(|e| {
                log::error!("failed to load {}: {e}", source.locator());
                e
            })?;
        Self::from_records(config, dataset.into_records(), surface)
    }

    /// Build the chart from records already in memory.
    ///
    /// # Errors
    ///
    /// Any configuration, scale or surface error.
    pub fn from_records(config: ChartConfig, records: Vec<Record>, mut surface: S) -> Result<Self> {
        let context = ChartContext::new(config, records)?;

        surface.draw_furniture(Region::Chart, context.chart_frame(), chart_furniture(&context))?;
        surface.draw_furniture(Region::Legend, context.legend_frame(), chart_legend(&context))?;

        let options = FilterOptions::from_records(context.records());
        for control in Control::BOTH {
            surface.populate_control(control, options.options(control))?;
        }

        let mut app = Self {
            context,
            options,
            surface,
            visible: 0,
        };
        app.on_filter_change()?;
        Ok(app)
    }

    /// Redraw the marks for the current control values. Returns how many are visible.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] if a control cannot be read or marks cannot be drawn.
    pub fn on_filter_change(&mut self) -> Result<usize> {
        let state = FilterState {
            generation: self.surface.control_value(Control::Generation)?,
            legendary: self.surface.control_value(Control::Legendary)?,
        };

        let visible = apply_filter(self.context.records(), &state);
        let marks = build_marks(&visible, &self.context);

        self.surface.clear_marks();
        self.surface.draw_marks(&marks)?;
        self.surface
            .attach_hover(&marks, &self.context.config().tooltip)?;

        log::debug!(
            "filter generation={} legendary={}: {} marks",
            state.generation,
            state.legendary,
            marks.len()
        );
        self.visible = marks.len();
        Ok(self.visible)
    }

    /// The immutable chart context.
    #[must_use]
    pub fn context(&self) -> &ChartContext {
        &self.context
    }

    /// Control option lists.
    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Number of marks drawn by the last redraw.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, mutably, for injecting events.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl ChartApp<SceneSurface> {
    /// Select `value` on `control` and redraw, as a change event would.
    ///
    /// # Errors
    ///
    /// [`Error::Surface`] if the control has no such option.
    pub fn change_control(&mut self, control: Control, value: &str) -> Result<usize> {
        self.surface.select(control, value)?;
        self.on_filter_change()
    }
}
