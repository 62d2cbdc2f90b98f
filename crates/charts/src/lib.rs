//! # Sales Chart Rendering
//!
//! Renders the four fixed report charts as PNG files.
//!
//! The drawing itself sits behind the `ChartRenderer` trait, which only knows
//! about labelled categories and values. `render_charts` turns a `SalesTable`
//! and its `SalesReport` into those inputs, so the mapping from report to chart
//! can be tested without touching a rendering backend.

pub mod error;
pub mod plotters_renderer;
pub mod views;

pub use error::ChartError;
pub use plotters_renderer::{PlottersRenderer, fonts_available};
pub use views::{ChartSet, render_charts};

use std::path::PathBuf;

pub const PRODUCT_CHART_FILE: &str = "total_sales_by_product.png";
pub const REGION_CHART_FILE: &str = "total_sales_by_region.png";
pub const TIMELINE_CHART_FILE: &str = "total_sales_over_time.png";
pub const DISTRIBUTION_CHART_FILE: &str = "average_sales_per_transaction.png";

/// How bars are coloured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarPalette {
    /// Every bar in the same colour.
    #[default]
    Uniform,
    /// One palette colour per category.
    PerCategory,
}

/// Title, axis labels and destination of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub path: PathBuf,
    /// Only used by bar charts.
    pub palette: BarPalette,
}

/// One bar or one point on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

/// The raw observations behind one box.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySamples {
    pub label: String,
    pub samples: Vec<f64>,
}

/// A minimal charting backend.
///
/// Each call draws one complete image at `spec.path`, replacing any existing
/// file. Categories are drawn in the order given.
pub trait ChartRenderer {
    fn bar_chart(&self, spec: &ChartSpec, bars: &[CategoryValue]) -> Result<(), ChartError>;

    fn line_chart(&self, spec: &ChartSpec, points: &[CategoryValue]) -> Result<(), ChartError>;

    fn box_plot(&self, spec: &ChartSpec, groups: &[CategorySamples]) -> Result<(), ChartError>;
}
