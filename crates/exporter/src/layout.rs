use analytics::{Dimension, Measure, Rollup, SalesReport};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Integer(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Block title, e.g. "Key Metrics".
    Title,
    /// Column headings of a rollup block.
    Header,
    Data,
    /// Separator between blocks.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    fn title(text: &str) -> Self {
        Self { kind: RowKind::Title, cells: vec![Cell::Text(text.to_string())] }
    }

    fn header(first: &str, second: &str) -> Self {
        Self {
            kind: RowKind::Header,
            cells: vec![Cell::Text(first.to_string()), Cell::Text(second.to_string())],
        }
    }

    fn data(label: &str, value: Cell) -> Self {
        Self { kind: RowKind::Data, cells: vec![Cell::Text(label.to_string()), value] }
    }

    fn blank() -> Self {
        Self { kind: RowKind::Blank, cells: Vec::new() }
    }
}

/// Lays out the report sheet: the key metrics block followed by one block per
/// rollup, blocks separated by a single blank row.
pub fn build_layout(report: &SalesReport) -> Vec<SheetRow> {
    let mut rows = vec![
        SheetRow::title("Key Metrics"),
        SheetRow::data("Total Sales", Cell::Number(report.total_sales)),
        SheetRow::data("Average Sales per Transaction", optional(report.average_sales)),
        SheetRow::data("Total Quantity Sold", Cell::Integer(report.total_quantity)),
        SheetRow::data("Average Quantity Sold per Transaction", optional(report.average_quantity)),
    ];

    for rollup in report.rollups() {
        rows.push(SheetRow::blank());
        rows.push(SheetRow::title(block_title(rollup)));
        rows.push(SheetRow::header(rollup.dimension.label(), rollup.measure.label()));
        rows.extend(
            rollup
                .entries
                .iter()
                .map(|e| SheetRow::data(&e.key, Cell::Number(e.value))),
        );
    }

    rows
}

fn block_title(rollup: &Rollup) -> &'static str {
    match (rollup.dimension, rollup.measure) {
        (Dimension::Product, Measure::Sum) => "Sales by Product",
        (Dimension::Product, Measure::Mean) => "Average Sales by Product",
        (Dimension::Region, Measure::Sum) => "Sales by Region",
        (Dimension::Region, Measure::Mean) => "Average Sales by Region",
        (Dimension::Month, Measure::Sum) => "Sales Over Time",
        (Dimension::Month, Measure::Mean) => "Average Sales Over Time",
    }
}

/// Undefined metrics are written as "N/A", never as NaN.
fn optional(value: Option<Decimal>) -> Cell {
    match value {
        Some(v) => Cell::Number(v),
        None => Cell::Text("N/A".to_string()),
    }
}
