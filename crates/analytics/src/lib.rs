//! # Sales Analytics Engine
//!
//! This crate turns a `SalesTable` into the fixed bundle of summary figures and
//! rollups the report is built from.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of charts, spreadsheets or the filesystem. It
//!   depends only on `core-types`, so every figure can be tested without a
//!   rendering backend.
//! - **Stateless calculation:** `AnalyticsEngine` reads the table and returns a
//!   fresh `SalesReport`. Running it twice on the same table yields equal reports.
//! - **Explicit ordering:** groups appear in first-encountered order, and value
//!   rollups use a stable descending sort, so ties keep that order.
//!
//! ## Public API
//!
//! - `AnalyticsEngine` / `analyze`: the calculation entry points.
//! - `SalesReport`, `Rollup`, `RollupEntry`: the results.
//! - `Groups`: the group-by-key primitive the rollups are built on.
//! - `AnalyticsError`: the errors that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod grouping;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, analyze};
pub use error::AnalyticsError;
pub use grouping::Groups;
pub use report::{Dimension, Measure, Rollup, RollupEntry, SalesReport};
