use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Calculation error: arithmetic overflow while computing '{0}'")]
    Overflow(String),

    #[error("Calculation error: Division by zero encountered in metric '{0}'")]
    DivisionByZero(String),
}
