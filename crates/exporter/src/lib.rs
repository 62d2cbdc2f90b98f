//! # Spreadsheet Report Export
//!
//! Writes the key metrics and rollups of a `SalesReport` into a single sheet,
//! once as a data-only workbook and once with the four chart images embedded.
//!
//! The row layout is built by `build_layout` as plain data before any
//! spreadsheet is touched, so its content can be checked directly.

pub mod error;
pub mod layout;
pub mod workbook;

pub use error::ExportError;
pub use layout::{Cell, RowKind, SheetRow, build_layout};
pub use workbook::{Anchor, ExportOutput, IMAGE_ANCHORS, ReportExporter};
