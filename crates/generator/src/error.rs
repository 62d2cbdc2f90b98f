use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid date range: {end} is before {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to build a transaction: {0}")]
    Record(#[from] core_types::CoreError),
}
