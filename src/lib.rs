//! # Pokeviz
//!
//! Interactive, filterable scatterplot of Pokémon statistics.
//!
//! One circle per Pokémon, positioned by two numeric stats (Sp. Def and Total by default)
//! and colored by primary type. Two dropdowns filter by generation and legendary status;
//! hovering a circle shows a tooltip with the name and both types.
//!
//! ## Pipeline
//!
//! 1. **Load**: [`dataset::Dataset::load`] awaits a [`dataset::DataSource`] and parses the
//!    CSV table into typed records, rejecting rows with non-numeric plotted values.
//! 2. **Scale**: [`scale::compute_scales`] maps both stat domains onto the plot area.
//! 3. **Render**: [`render`] builds axes, labels, legend and marks as SVG element trees.
//! 4. **Filter**: [`filter::apply_filter`] recomputes the visible set from the complete
//!    record set on every control change.
//! 5. **Redraw**: [`chart::ChartApp::on_filter_change`] clears and redraws the marks and
//!    reattaches the single [`interaction::Tooltip`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pokeviz::prelude::*;
//!
//! let source = FileSource::new("data/pokemon.csv");
//! let mut app = pollster::block_on(ChartApp::bootstrap(
//!     &source,
//!     ChartConfig::default(),
//!     SceneSurface::new(),
//! ))?;
//!
//! app.change_control(Control::Generation, "2")?;
//! println!("{}", app.surface().chart_svg().unwrap_or_default());
//! ```
//!
//! ## Feature Flags
//!
//! - `wasm`: browser DOM surface, `fetch` data source and the `start` entry point

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA colors and the category color table.
pub mod color;

/// Points, margins and plot layout.
pub mod geometry;

/// Linear scales and axis ticks.
pub mod scale;

/// Chart configuration (YAML).
pub mod config;

// ============================================================================
// Data Modules
// ============================================================================

/// Pokémon table loading.
pub mod dataset;

/// Generation / legendary filtering.
pub mod filter;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Axes, labels, legend and marks.
pub mod render;

/// SVG element model and encoder.
pub mod output;

/// Drawing surfaces (in-memory and DOM).
pub mod surface;

/// Hover tooltip.
pub mod interaction;

/// Chart context and redraw pipeline.
pub mod chart;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for pokeviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use pokeviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{ChartApp, ChartContext};
    pub use crate::color::{ColorMap, Rgba};
    pub use crate::config::ChartConfig;
    pub use crate::dataset::{Attributes, DataSource, Dataset, FileSource, Record, Stat, TextSource};
    pub use crate::error::{Error, Result};
    pub use crate::filter::{apply_filter, Control, FilterOptions, FilterState, Selection};
    pub use crate::geometry::{Layout, Margin, Point};
    pub use crate::interaction::{Tooltip, TooltipContent};
    pub use crate::render::Mark;
    pub use crate::scale::{LinearScale, Scale};
    pub use crate::surface::{SceneSurface, Surface};
}
