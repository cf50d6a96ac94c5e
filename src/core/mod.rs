//! Core data structures: demand series and forecast results.

mod forecast;
mod series;

pub use forecast::{
    AccuracyAssessment, ConfidenceLevel, DailyForecastPoint, ForecastResult, ModelTag,
};
pub use series::{DailyDemandPoint, DemandSeries, SaleRecord};
