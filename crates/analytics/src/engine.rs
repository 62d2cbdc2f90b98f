use crate::error::AnalyticsError;
use crate::grouping::{Groups, checked_mean, checked_sum, sort_descending};
use crate::report::{Dimension, Measure, Rollup, SalesReport};
use core_types::{SalesTable, Transaction};
use rust_decimal::Decimal;
use std::hash::Hash;

/// Runs the default engine over `table`.
pub fn analyze(table: &SalesTable) -> Result<SalesReport, AnalyticsError> {
    AnalyticsEngine::new().analyze(table)
}

/// A stateless calculator for deriving summary figures from a sales table.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the report.
    ///
    /// # Arguments
    ///
    /// * `table` - The full transaction table. No rows are filtered out.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SalesReport` or an `AnalyticsError`.
    pub fn analyze(&self, table: &SalesTable) -> Result<SalesReport, AnalyticsError> {
        let mut report = SalesReport::new();

        if table.is_empty() {
            // Means are left as None rather than dividing by zero.
            tracing::warn!("Sales table is empty; returning a zeroed report");
            return Ok(report);
        }

        self.calculate_key_metrics(table.records(), &mut report)?;
        self.calculate_rollups(table.records(), &mut report)?;

        tracing::info!(
            transactions = report.transaction_count,
            total_sales = %report.total_sales,
            products = report.sales_by_product.len(),
            regions = report.sales_by_region.len(),
            months = report.sales_by_month.len(),
            "Sales analysis complete"
        );

        Ok(report)
    }

    /// Overall sums and means.
    fn calculate_key_metrics(
        &self,
        records: &[Transaction],
        report: &mut SalesReport,
    ) -> Result<(), AnalyticsError> {
        let totals: Vec<Decimal> = records.iter().map(Transaction::total).collect();

        report.transaction_count = records.len();
        report.total_sales = checked_sum(&totals, "total_sales")?;
        report.average_sales = Some(checked_mean(report.total_sales, records.len(), "average_sales")?);

        report.total_quantity = records.iter().map(|tx| u64::from(tx.quantity)).sum();
        report.average_quantity = Some(checked_mean(
            Decimal::from(report.total_quantity),
            records.len(),
            "average_quantity",
        )?);

        Ok(())
    }

    fn calculate_rollups(
        &self,
        records: &[Transaction],
        report: &mut SalesReport,
    ) -> Result<(), AnalyticsError> {
        let by_product = Groups::collect(records, |tx| tx.product.label(), |tx| tx.total());
        report.sales_by_product = ranked(Dimension::Product, Measure::Sum, by_product.sums()?);
        report.average_sales_by_product = ranked(Dimension::Product, Measure::Mean, by_product.means()?);

        let by_region = Groups::collect(records, |tx| tx.region.label(), |tx| tx.total());
        report.sales_by_region = ranked(Dimension::Region, Measure::Sum, by_region.sums()?);
        report.average_sales_by_region = ranked(Dimension::Region, Measure::Mean, by_region.means()?);

        // "YYYY-MM" keys sort lexicographically in calendar order.
        let by_month = Groups::collect(records, |tx| tx.month(), |tx| tx.total());
        let mut monthly = by_month.sums()?;
        monthly.sort_by(|a, b| a.0.cmp(&b.0));
        report.sales_by_month = Rollup::new(Dimension::Month, Measure::Sum, monthly);

        Ok(())
    }
}

/// Builds a rollup sorted by value, largest first, ties in first-seen order.
fn ranked<K>(dimension: Dimension, measure: Measure, mut entries: Vec<(K, Decimal)>) -> Rollup
where
    K: Eq + Hash + ToString,
{
    sort_descending(&mut entries);
    Rollup::new(
        dimension,
        measure,
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    )
}
