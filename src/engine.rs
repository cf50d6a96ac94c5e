//! The statistical forecast engine.
//!
//! Estimates average daily demand and its variance over a trailing basis
//! window, then projects cumulative demand with z-score confidence bounds
//! and a per-day series carrying uniform jitter.

use crate::config::EngineConfig;
use crate::core::{
    ConfidenceLevel, DailyForecastPoint, DemandSeries, ForecastResult, ModelTag,
};
use crate::error::{ForecastError, Result};
use crate::stats;
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

/// Moving-average demand forecaster with confidence intervals.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    /// Create an engine with the default configuration (30-day basis
    /// window, +/-20% daily jitter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate a forecast starting today, drawing jitter from the thread
    /// RNG.
    pub fn forecast(
        &self,
        series: &DemandSeries,
        period: u32,
        level: ConfidenceLevel,
    ) -> Result<ForecastResult> {
        self.forecast_with_rng(
            series,
            period,
            level,
            Utc::now().date_naive(),
            &mut rand::thread_rng(),
        )
    }

    /// Generate a forecast with an explicit start date and RNG.
    ///
    /// The aggregate fields (`total_demand`, bounds, average) are fully
    /// deterministic given the series, period and level; only the per-day
    /// values depend on the RNG, so tests pass a seeded `StdRng`.
    pub fn forecast_with_rng<R: Rng + ?Sized>(
        &self,
        series: &DemandSeries,
        period: u32,
        level: ConfidenceLevel,
        start_date: NaiveDate,
        rng: &mut R,
    ) -> Result<ForecastResult> {
        if !(1..=365).contains(&period) {
            return Err(ForecastError::InvalidPeriod(period));
        }
        if series.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        log::debug!(
            "forecasting {} days at {} from {} history points",
            period,
            level,
            series.len()
        );

        // Basis window: the trailing month of observed demand.
        let basis: Vec<f64> = series
            .tail(self.config.basis_window)
            .iter()
            .map(|p| p.quantity as f64)
            .collect();

        let average_daily_demand = stats::mean(&basis);
        let std_dev = stats::std_dev(&basis);
        let z = level.z_score();

        let total_demand = (average_daily_demand * period as f64).round();
        let margin_of_error = z * std_dev / (period as f64).sqrt();

        let lower_bound = (total_demand - margin_of_error).round().max(0.0) as u32;
        let upper_bound = (total_demand + margin_of_error).round() as u32;
        let total_demand = total_demand as u32;

        let daily = self.project_daily(
            start_date,
            period,
            average_daily_demand,
            total_demand,
            lower_bound,
            upper_bound,
            rng,
        );

        Ok(ForecastResult {
            period,
            start_date,
            end_date: start_date + Duration::days(period as i64),
            total_demand,
            average_daily_demand,
            confidence_level: level,
            lower_bound,
            upper_bound,
            daily,
            model: ModelTag::MovingAverageCi,
            accuracy: None,
            assessment: None,
        })
    }

    /// Project the per-day series for the forecast window.
    ///
    /// Each day draws an independent uniform jitter and scales the
    /// aggregate bounds by that day's share of the projected total. A
    /// zero total forces all daily bounds to 0.
    #[allow(clippy::too_many_arguments)]
    fn project_daily<R: Rng + ?Sized>(
        &self,
        start_date: NaiveDate,
        period: u32,
        average_daily_demand: f64,
        total_demand: u32,
        lower_bound: u32,
        upper_bound: u32,
        rng: &mut R,
    ) -> Vec<DailyForecastPoint> {
        let jitter = self.config.daily_jitter;

        (0..period)
            .map(|offset| {
                let date = start_date + Duration::days(offset as i64);
                let variation = if jitter > 0.0 {
                    rng.gen_range(-jitter..jitter)
                } else {
                    0.0
                };
                let demand = (average_daily_demand * (1.0 + variation))
                    .round()
                    .max(0.0) as u32;

                let (day_lower, day_upper) = if total_demand == 0 {
                    (0, 0)
                } else {
                    let share = demand as f64 / total_demand as f64;
                    (
                        (lower_bound as f64 * share).round().max(0.0) as u32,
                        (upper_bound as f64 * share).round() as u32,
                    )
                };

                DailyForecastPoint {
                    date,
                    forecast: demand,
                    lower_bound: day_lower,
                    upper_bound: day_upper,
                }
            })
            .collect()
    }
}
