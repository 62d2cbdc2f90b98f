use crate::error::ExportError;
use crate::layout::{Cell, RowKind, SheetRow, build_layout};
use analytics::SalesReport;
use charts::ChartSet;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Image, Workbook};
use std::path::{Path, PathBuf};

pub const SHEET_NAME: &str = "Sales Data Analysis";

/// A fixed cell an image is anchored at (zero-based row and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub cell: &'static str,
    pub row: u32,
    pub col: u16,
}

/// Column G, 18 rows apart, to the right of the metric and rollup blocks.
/// Matches the order of `ChartSet::paths`.
pub const IMAGE_ANCHORS: [Anchor; 4] = [
    Anchor { cell: "G2", row: 1, col: 6 },
    Anchor { cell: "G20", row: 19, col: 6 },
    Anchor { cell: "G38", row: 37, col: 6 },
    Anchor { cell: "G56", row: 55, col: 6 },
];

/// The two workbooks written by `ReportExporter::export`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    pub workbook: PathBuf,
    pub workbook_with_charts: PathBuf,
}

/// Writes the report sheet to `.xlsx`.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    image_scale: f64,
}

impl ReportExporter {
    /// `image_scale` is applied to both dimensions of every embedded chart.
    pub fn new(image_scale: f64) -> Self {
        Self { image_scale }
    }

    /// Writes the data-only workbook, then the same sheet with the charts embedded.
    ///
    /// Every chart in `charts` must already exist on disk; a missing one fails
    /// the second workbook with `ExportError::MissingChart`.
    pub fn export(
        &self,
        report: &SalesReport,
        charts: &ChartSet,
        workbook_path: &Path,
        workbook_with_charts_path: &Path,
    ) -> Result<ExportOutput, ExportError> {
        let layout = build_layout(report);

        self.write_workbook(&layout, None, workbook_path)?;
        tracing::info!(path = %workbook_path.display(), rows = layout.len(), "Saved report workbook");

        self.write_workbook(&layout, Some(charts), workbook_with_charts_path)?;
        tracing::info!(
            path = %workbook_with_charts_path.display(),
            images = IMAGE_ANCHORS.len(),
            "Saved report workbook with charts"
        );

        Ok(ExportOutput {
            workbook: workbook_path.to_path_buf(),
            workbook_with_charts: workbook_with_charts_path.to_path_buf(),
        })
    }

    /// Builds the sheet in memory from `layout`, inserts the chart images when
    /// given, and saves it in one go.
    pub fn write_workbook(
        &self,
        layout: &[SheetRow],
        charts: Option<&ChartSet>,
        path: &Path,
    ) -> Result<(), ExportError> {
        let images = match charts {
            Some(charts) => self.load_images(charts)?,
            None => Vec::new(),
        };

        let bold = Format::new().set_bold();
        let money = Format::new().set_num_format("#,##0.00");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        worksheet.set_column_width(0, 38)?;
        worksheet.set_column_width(1, 16)?;

        for (row, line) in (0u32..).zip(layout) {
            for (col, cell) in (0u16..).zip(&line.cells) {
                match (line.kind, cell) {
                    (RowKind::Title | RowKind::Header, Cell::Text(text)) => {
                        worksheet.write_string_with_format(row, col, text, &bold)?;
                    }
                    (_, Cell::Text(text)) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    (_, Cell::Number(value)) => {
                        worksheet.write_number_with_format(row, col, to_f64(*value), &money)?;
                    }
                    (_, Cell::Integer(value)) => {
                        worksheet.write_number(row, col, *value as f64)?;
                    }
                }
            }
        }

        for (anchor, image) in IMAGE_ANCHORS.iter().zip(&images) {
            worksheet.insert_image(anchor.row, anchor.col, image)?;
            tracing::debug!(cell = anchor.cell, "Embedded chart image");
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        workbook.save(path)?;
        Ok(())
    }

    fn load_images(&self, charts: &ChartSet) -> Result<Vec<Image>, ExportError> {
        charts
            .paths()
            .into_iter()
            .map(|path| {
                if !path.is_file() {
                    return Err(ExportError::MissingChart(path.to_path_buf()));
                }
                let image = Image::new(path)?
                    .set_scale_width(self.image_scale)
                    .set_scale_height(self.image_scale);
                Ok(image)
            })
            .collect()
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(0.55)
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{Dimension, Measure, Rollup};
    use rust_decimal_macros::dec;

    // Smallest valid PNG: a single transparent pixel.
    const PIXEL_PNG: [u8; 67] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn report() -> SalesReport {
        SalesReport {
            transaction_count: 1,
            total_sales: dec!(42.50),
            average_sales: Some(dec!(42.50)),
            total_quantity: 2,
            average_quantity: Some(dec!(2)),
            sales_by_product: Rollup::new(Dimension::Product, Measure::Sum, vec![("Product B".into(), dec!(42.50))]),
            sales_by_month: Rollup::new(Dimension::Month, Measure::Sum, vec![("2023-09".into(), dec!(42.50))]),
            ..SalesReport::new()
        }
    }

    fn write_charts(dir: &Path) -> ChartSet {
        let charts = ChartSet::in_dir(dir);
        for path in charts.paths() {
            std::fs::write(path, PIXEL_PNG).unwrap();
        }
        charts
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn anchors_are_column_g_18_rows_apart() {
        let cells: Vec<_> = IMAGE_ANCHORS.iter().map(|a| a.cell).collect();
        assert_eq!(cells, vec!["G2", "G20", "G38", "G56"]);
        for pair in IMAGE_ANCHORS.windows(2) {
            assert_eq!(pair[1].row - pair[0].row, 18);
            assert_eq!(pair[0].col, 6);
        }
    }

    #[test]
    fn writes_both_workbooks() {
        let dir = tempfile::tempdir().unwrap();
        let charts = write_charts(dir.path());
        let plain = dir.path().join("Sales_Data_Analysis.xlsx");
        let with_charts = dir.path().join("Sales_Data_Analysis_with_Visualizations.xlsx");

        let output = ReportExporter::default()
            .export(&report(), &charts, &plain, &with_charts)
            .unwrap();
        assert_eq!(output.workbook, plain);
        assert_eq!(output.workbook_with_charts, with_charts);

        let plain_bytes = std::fs::read(&plain).unwrap();
        let chart_bytes = std::fs::read(&with_charts).unwrap();
        assert!(plain_bytes.starts_with(b"PK"));
        assert!(chart_bytes.starts_with(b"PK"));
        assert!(!contains(&plain_bytes, b"xl/media/"));
        assert!(contains(&chart_bytes, b"xl/media/image1.png"));
        assert!(contains(&chart_bytes, b"xl/drawings/drawing1.xml"));
    }

    #[test]
    fn missing_chart_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let charts = write_charts(dir.path());
        std::fs::remove_file(&charts.over_time).unwrap();

        let with_charts = dir.path().join("with_charts.xlsx");
        let err = ReportExporter::default()
            .export(&report(), &charts, &dir.path().join("plain.xlsx"), &with_charts)
            .unwrap_err();

        match err {
            ExportError::MissingChart(path) => assert_eq!(path, charts.over_time),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!with_charts.exists());
    }
}
