//! JSON wire contract shared with the external ML forecasting service.
//!
//! Both the external service and the in-process statistical engine must be
//! interchangeable to callers, so the engine's results convert losslessly
//! into the service's snake_case payload shape and back. Transport (HTTP
//! client, timeouts, retries) belongs to the host service; this module
//! only pins the shapes and endpoint constants.

use crate::core::{
    ConfidenceLevel, DailyForecastPoint, DemandSeries, ForecastResult, ModelTag, SaleRecord,
};
use crate::error::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default base URL of the external forecasting service.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5001";

/// Request timeout the host service applies to external calls.
pub const SERVICE_TIMEOUT_SECS: u64 = 30;

/// Service endpoint paths.
pub mod endpoints {
    pub const PREDICT_SALES: &str = "/predict-sales";
    pub const OPTIMIZE_INVENTORY: &str = "/optimize-inventory";
    pub const DETECT_ANOMALIES: &str = "/detect-anomalies";
    pub const TRAIN_MODEL: &str = "/train-model";
}

/// One day of projected demand on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDailyDemand {
    pub date: NaiveDate,
    pub demand: u32,
}

/// One day of observed sales sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSalesPoint {
    pub date: NaiveDate,
    pub quantity: u32,
}

/// Body of a `/predict-sales` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictSalesRequest {
    pub product_id: String,
    pub sales_data: Vec<WireSalesPoint>,
    pub days: u32,
}

impl PredictSalesRequest {
    /// Build a request from an aggregated demand series.
    pub fn from_series(product_id: impl Into<String>, series: &DemandSeries, days: u32) -> Self {
        Self {
            product_id: product_id.into(),
            sales_data: series
                .points()
                .iter()
                .map(|p| WireSalesPoint {
                    date: p.date,
                    quantity: p.quantity,
                })
                .collect(),
            days,
        }
    }
}

/// A forecast in the service's response shape.
///
/// `end_date` on the wire is the last forecast day (inclusive), unlike
/// [`ForecastResult::end_date`] which is the exclusive iteration bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireForecast {
    pub product_id: String,
    pub period: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_demand: u32,
    pub average_daily_demand: f64,
    pub confidence_level: u32,
    pub lower_bound: u32,
    pub upper_bound: u32,
    pub daily_forecast: Vec<WireDailyDemand>,
    pub model: String,
}

impl WireForecast {
    /// Convert an engine result to the wire shape.
    pub fn from_result(product_id: impl Into<String>, forecast: &ForecastResult) -> Self {
        Self {
            product_id: product_id.into(),
            period: forecast.period,
            start_date: forecast.start_date,
            end_date: forecast.end_date - Duration::days(1),
            total_demand: forecast.total_demand,
            average_daily_demand: round2(forecast.average_daily_demand),
            confidence_level: forecast.confidence_level.percent(),
            lower_bound: forecast.lower_bound,
            upper_bound: forecast.upper_bound,
            daily_forecast: forecast
                .daily
                .iter()
                .map(|day| WireDailyDemand {
                    date: day.date,
                    demand: day.forecast,
                })
                .collect(),
            model: forecast.model.as_str().to_string(),
        }
    }

    /// Convert a wire forecast back into the engine's result type.
    ///
    /// Daily interval bounds are not carried on the wire; they are
    /// reconstructed by scaling the aggregate bounds to each day's share
    /// of total demand, the same projection the engine applies.
    pub fn into_result(self) -> Result<ForecastResult> {
        let level = ConfidenceLevel::from_percent(self.confidence_level)?;
        let total = self.total_demand;
        let daily = self
            .daily_forecast
            .iter()
            .map(|day| {
                let (lower, upper) = if total == 0 {
                    (0, 0)
                } else {
                    let share = day.demand as f64 / total as f64;
                    (
                        (self.lower_bound as f64 * share).round() as u32,
                        (self.upper_bound as f64 * share).round() as u32,
                    )
                };
                DailyForecastPoint {
                    date: day.date,
                    forecast: day.demand,
                    lower_bound: lower,
                    upper_bound: upper,
                }
            })
            .collect();

        Ok(ForecastResult {
            period: self.period,
            start_date: self.start_date,
            end_date: self.start_date + Duration::days(self.period as i64),
            total_demand: total,
            average_daily_demand: self.average_daily_demand,
            confidence_level: level,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
            daily,
            model: ModelTag::from_wire(&self.model),
            accuracy: None,
            assessment: None,
        })
    }
}

/// The service's uniform error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub status: String,
    pub message: String,
}

/// Either a forecast payload or the service's error shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Forecast(WireForecast),
    Error(WireError),
}

impl ServiceResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Timestamped sale records serialized for the service.
pub fn sales_payload(records: &[SaleRecord]) -> Vec<WireSalesPoint> {
    records
        .iter()
        .map(|r| WireSalesPoint {
            date: r.timestamp.date_naive(),
            quantity: r.quantity,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
