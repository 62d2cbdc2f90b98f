use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The categorical column a rollup is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Product,
    Region,
    Month,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Product => "Product",
            Dimension::Region => "Region",
            Dimension::Month => "Month",
        }
    }
}

/// How the `total` values inside a group are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    Sum,
    Mean,
}

impl Measure {
    /// Column heading for the aggregated value.
    pub fn label(&self) -> &'static str {
        match self {
            Measure::Sum => "Total Sales",
            Measure::Mean => "Average Sales",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupEntry {
    pub key: String,
    pub value: Decimal,
}

/// Total sales aggregated per distinct value of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup {
    pub dimension: Dimension,
    pub measure: Measure,
    pub entries: Vec<RollupEntry>,
}

impl Rollup {
    pub fn new(dimension: Dimension, measure: Measure, entries: Vec<(String, Decimal)>) -> Self {
        Self {
            dimension,
            measure,
            entries: entries
                .into_iter()
                .map(|(key, value)| RollupEntry { key, value })
                .collect(),
        }
    }

    pub fn empty(dimension: Dimension, measure: Measure) -> Self {
        Self { dimension, measure, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Sum of the aggregated values across all groups.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.value).sum()
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }
}

/// The summary of one sales table.
///
/// This struct is the final output of the `AnalyticsEngine` and the only thing
/// the chart and export stages need besides the table itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    // I. Key Metrics
    pub transaction_count: usize,
    pub total_sales: Decimal,
    pub average_sales: Option<Decimal>, // None when there are no transactions
    pub total_quantity: u64,
    pub average_quantity: Option<Decimal>, // None when there are no transactions

    // II. Rollups, sorted by value descending
    pub sales_by_product: Rollup,
    pub average_sales_by_product: Rollup,
    pub sales_by_region: Rollup,
    pub average_sales_by_region: Rollup,

    // III. Rollup in month order
    pub sales_by_month: Rollup,
}

impl SalesReport {
    /// Creates a zeroed-out report with empty rollups.
    /// This is what an empty table produces.
    pub fn new() -> Self {
        Self {
            transaction_count: 0,
            total_sales: Decimal::ZERO,
            average_sales: None,
            total_quantity: 0,
            average_quantity: None,
            sales_by_product: Rollup::empty(Dimension::Product, Measure::Sum),
            average_sales_by_product: Rollup::empty(Dimension::Product, Measure::Mean),
            sales_by_region: Rollup::empty(Dimension::Region, Measure::Sum),
            average_sales_by_region: Rollup::empty(Dimension::Region, Measure::Mean),
            sales_by_month: Rollup::empty(Dimension::Month, Measure::Sum),
        }
    }

    /// The rollups in the order they appear in the exported sheet.
    pub fn rollups(&self) -> [&Rollup; 5] {
        [
            &self.sales_by_product,
            &self.average_sales_by_product,
            &self.sales_by_region,
            &self.average_sales_by_region,
            &self.sales_by_month,
        ]
    }
}

impl Default for SalesReport {
    fn default() -> Self {
        Self::new()
    }
}
