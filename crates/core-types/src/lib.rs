//! Shared data model for the sales report workspace.
//!
//! Every other crate speaks in terms of these types: the generator produces a
//! `SalesTable`, the analytics engine reads it, and the chart and export stages
//! consume both the table and the derived report.

pub mod enums;
pub mod error;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::{Product, Region};
pub use error::CoreError;
pub use table::{SalesTable, Transaction};
