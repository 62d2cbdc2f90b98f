use crate::error::ChartError;
use crate::{
    BarPalette, CategorySamples, CategoryValue, ChartRenderer, ChartSpec, DISTRIBUTION_CHART_FILE,
    PRODUCT_CHART_FILE, REGION_CHART_FILE, TIMELINE_CHART_FILE,
};
use analytics::{Groups, Rollup, SalesReport};
use core_types::SalesTable;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::path::{Path, PathBuf};

/// Paths of the four rendered charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub by_product: PathBuf,
    pub by_region: PathBuf,
    pub over_time: PathBuf,
    pub per_transaction: PathBuf,
}

impl ChartSet {
    /// The expected chart paths inside `dir`, whether or not they exist yet.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            by_product: dir.join(PRODUCT_CHART_FILE),
            by_region: dir.join(REGION_CHART_FILE),
            over_time: dir.join(TIMELINE_CHART_FILE),
            per_transaction: dir.join(DISTRIBUTION_CHART_FILE),
        }
    }

    /// Product, region, over-time, per-transaction.
    pub fn paths(&self) -> [&Path; 4] {
        [
            &self.by_product,
            &self.by_region,
            &self.over_time,
            &self.per_transaction,
        ]
    }
}

/// Renders all four charts into `out_dir`, creating it if needed.
///
/// Any failure aborts the remaining charts.
pub fn render_charts(
    table: &SalesTable,
    report: &SalesReport,
    renderer: &dyn ChartRenderer,
    out_dir: &Path,
) -> Result<ChartSet, ChartError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ChartError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let charts = ChartSet::in_dir(out_dir);

    renderer.bar_chart(
        &spec("Total Sales by Product", "Product", &charts.by_product),
        &values(&report.sales_by_product),
    )?;
    renderer.bar_chart(
        &ChartSpec {
            palette: BarPalette::PerCategory,
            ..spec("Total Sales by Region", "Region", &charts.by_region)
        },
        &values(&report.sales_by_region),
    )?;
    renderer.line_chart(
        &spec("Total Sales Over Time", "Month", &charts.over_time),
        &values(&report.sales_by_month),
    )?;
    renderer.box_plot(
        &spec("Average Sales per Transaction by Product", "Product", &charts.per_transaction),
        &product_distributions(table),
    )?;

    tracing::info!(dir = %out_dir.display(), "Rendered 4 charts");
    Ok(charts)
}

fn spec(title: &str, x_label: &str, path: &Path) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: "Total Sales".to_string(),
        path: path.to_path_buf(),
        palette: BarPalette::Uniform,
    }
}

fn values(rollup: &Rollup) -> Vec<CategoryValue> {
    rollup
        .entries
        .iter()
        .map(|e| CategoryValue { label: e.key.clone(), value: to_f64(e.value) })
        .collect()
}

/// Per-transaction totals grouped by product, products in first-seen order.
fn product_distributions(table: &SalesTable) -> Vec<CategorySamples> {
    let groups = Groups::collect(table.records(), |tx| tx.product.label(), |tx| tx.total());
    groups
        .values()
        .map(|(label, totals)| CategorySamples {
            label: label.to_string(),
            samples: totals.iter().copied().map(to_f64).collect(),
        })
        .collect()
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
