//! Reorder-point inventory optimization.
//!
//! Consumes a forecast's average daily demand plus live product stock
//! parameters and emits reorder recommendations. Recommendations are a
//! derived view, recomputed on every call and never mutated in place.

use crate::config::{require_history, EngineConfig, OptimizerConfig, MIN_FORECAST_POINTS};
use crate::core::{ConfidenceLevel, DemandSeries, ForecastResult};
use crate::engine::ForecastEngine;
use crate::error::Result;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Forecast horizon used for each product in a batch optimization run.
const BATCH_FORECAST_PERIOD: u32 = 30;

/// Live stock state for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockParameters {
    pub current_stock: u32,
    /// Days between placing a reorder and stock arriving.
    pub lead_time_days: u32,
    /// Buffer quantity held against demand variability.
    pub safety_stock: u32,
}

/// Reorder recommendation for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: String,
    pub average_daily_demand: f64,
    pub lead_time_days: u32,
    pub current_stock: u32,
    pub safety_stock: u32,
    /// Stock level at which a new order should be placed.
    pub reorder_point: f64,
    pub recommended_order_quantity: u32,
    /// True exactly when current stock sits below the reorder point.
    pub stockout_risk: bool,
    /// Days until depletion at the forecast rate; `None` when demand is
    /// zero and stock never depletes.
    pub days_of_supply_remaining: Option<f64>,
}

/// One product's input to a batch optimization run.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub product_id: String,
    pub params: StockParameters,
    /// Raw sale history for the product, as supplied by the caller.
    pub history: DemandSeries,
}

/// Per-product outcome of a batch run. Failures for one product never
/// abort the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Recommended(Recommendation),
    Failed { product_id: String, message: String },
}

impl BatchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn product_id(&self) -> &str {
        match self {
            Self::Recommended(rec) => &rec.product_id,
            Self::Failed { product_id, .. } => product_id,
        }
    }
}

/// Derive a reorder recommendation from a forecast and stock parameters.
pub fn optimize(
    product_id: impl Into<String>,
    params: StockParameters,
    forecast: &ForecastResult,
    config: &OptimizerConfig,
) -> Recommendation {
    let avg = forecast.average_daily_demand;
    let reorder_point =
        avg * params.lead_time_days as f64 + params.safety_stock as f64;
    let stockout_risk = (params.current_stock as f64) < reorder_point;

    let days_of_supply_remaining = if avg > 0.0 {
        Some(params.current_stock as f64 / avg)
    } else {
        None
    };

    let buffer_days = config.period_buffer.unwrap_or(params.lead_time_days);
    let recommended_order_quantity = (reorder_point + avg * buffer_days as f64
        - params.current_stock as f64)
        .max(0.0)
        .ceil() as u32;

    Recommendation {
        product_id: product_id.into(),
        average_daily_demand: avg,
        lead_time_days: params.lead_time_days,
        current_stock: params.current_stock,
        safety_stock: params.safety_stock,
        reorder_point,
        recommended_order_quantity,
        stockout_risk,
        days_of_supply_remaining,
    }
}

/// Optimize a batch of products, forecasting each independently.
///
/// Each product gets a 30-day forecast from its own history; a product
/// with insufficient history (or any other per-item failure) yields a
/// [`BatchOutcome::Failed`] marker while the rest of the batch proceeds.
/// Output order matches input order.
pub fn optimize_batch<R: Rng + ?Sized>(
    requests: &[BatchRequest],
    engine_config: &EngineConfig,
    optimizer_config: &OptimizerConfig,
    start_date: NaiveDate,
    rng: &mut R,
) -> Vec<BatchOutcome> {
    let engine = ForecastEngine::with_config(*engine_config);

    requests
        .iter()
        .map(|request| {
            match optimize_one(&engine, request, optimizer_config, start_date, rng) {
                Ok(rec) => BatchOutcome::Recommended(rec),
                Err(err) => {
                    log::warn!(
                        "optimization failed for product {}: {}",
                        request.product_id,
                        err
                    );
                    BatchOutcome::Failed {
                        product_id: request.product_id.clone(),
                        message: err.to_string(),
                    }
                }
            }
        })
        .collect()
}

fn optimize_one<R: Rng + ?Sized>(
    engine: &ForecastEngine,
    request: &BatchRequest,
    config: &OptimizerConfig,
    start_date: NaiveDate,
    rng: &mut R,
) -> Result<Recommendation> {
    require_history(MIN_FORECAST_POINTS, request.history.len())?;

    let forecast = engine.forecast_with_rng(
        &request.history,
        BATCH_FORECAST_PERIOD,
        ConfidenceLevel::default(),
        start_date,
        rng,
    )?;

    Ok(optimize(
        request.product_id.clone(),
        request.params,
        &forecast,
        config,
    ))
}
