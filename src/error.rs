//! Error types for the stockcast library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during aggregation, forecasting, evaluation or
/// optimization.
///
/// All variants are recoverable at the caller boundary; a host service
/// typically maps them to 4xx responses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Fewer history points than the operation requires.
    #[error("insufficient data: need at least {required}, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Forecast period outside the supported 1..=365 day range.
    #[error("invalid forecast period: {0} (must be 1-365 days)")]
    InvalidPeriod(u32),

    /// Confidence level is not one of the supported 90/95/99 percent.
    #[error("invalid confidence level: {0} (must be 90, 95 or 99)")]
    InvalidConfidenceLevel(u32),

    /// Accuracy was requested before the forecast window elapsed.
    #[error("forecast period has not completed yet: ends {end_date}, today is {today}")]
    ForecastNotComplete { end_date: NaiveDate, today: NaiveDate },

    /// A demand series violated its ordering or contiguity invariants.
    #[error("invalid demand series: {0}")]
    InvalidSeries(String),
}
