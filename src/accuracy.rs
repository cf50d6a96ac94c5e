//! Retrospective forecast accuracy evaluation.
//!
//! Once a forecast window has elapsed, the evaluator compares the
//! projection against observed demand and writes the resulting accuracy
//! percentage back onto the forecast.

use crate::core::{AccuracyAssessment, DemandSeries, ForecastResult};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Per-day comparison of projected versus observed demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyComparison {
    pub date: NaiveDate,
    pub forecast_demand: u32,
    pub actual_demand: u32,
    /// `actual - forecast`; negative when the forecast overshot.
    pub difference: i64,
    /// Absolute error relative to the forecast, 0 when the forecast was 0.
    pub percentage_error: f64,
}

/// Accuracy metrics for a completed forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    /// Observed demand over the forecast window.
    pub actual_total: u32,
    /// Observed mean daily demand over the window.
    pub actual_average_daily: f64,
    /// `|actual_total - total_demand|`.
    pub forecast_error: u32,
    pub percentage_error: f64,
    /// `clamp(100 - percentage_error, 0, 100)`.
    pub accuracy: f64,
    /// Whether the observed total fell inside the confidence interval.
    pub within_confidence_interval: bool,
    pub daily_comparison: Vec<DailyComparison>,
    pub assessment_date: NaiveDate,
}

/// Evaluate a completed forecast against observed demand.
///
/// Fails with [`ForecastError::ForecastNotComplete`] while the window is
/// still open. Writes `accuracy` and the assessment metadata back onto the
/// forecast; re-evaluation overwrites the previous assessment.
pub fn evaluate(
    forecast: &mut ForecastResult,
    actual: &DemandSeries,
    today: NaiveDate,
) -> Result<AccuracyReport> {
    if !forecast.is_complete(today) {
        return Err(ForecastError::ForecastNotComplete {
            end_date: forecast.end_date,
            today,
        });
    }

    let actual_total = actual.window_total(forecast.start_date, forecast.end_date);
    let forecast_error = actual_total.abs_diff(forecast.total_demand);

    let percentage_error = if forecast.total_demand == 0 {
        if actual_total == 0 {
            0.0
        } else {
            100.0
        }
    } else {
        forecast_error as f64 / forecast.total_demand as f64 * 100.0
    };
    let accuracy = (100.0 - percentage_error).clamp(0.0, 100.0);

    let within_confidence_interval =
        actual_total >= forecast.lower_bound && actual_total <= forecast.upper_bound;

    let daily_comparison = forecast
        .daily
        .iter()
        .map(|day| {
            let actual_demand = actual.quantity_on(day.date);
            let difference = actual_demand as i64 - day.forecast as i64;
            let percentage_error = if day.forecast == 0 {
                0.0
            } else {
                difference.unsigned_abs() as f64 / day.forecast as f64 * 100.0
            };
            DailyComparison {
                date: day.date,
                forecast_demand: day.forecast,
                actual_demand,
                difference,
                percentage_error,
            }
        })
        .collect();

    forecast.accuracy = Some(accuracy);
    forecast.assessment = Some(AccuracyAssessment {
        forecast_error,
        percentage_error,
        within_confidence_interval,
        assessment_date: today,
    });

    Ok(AccuracyReport {
        actual_total,
        actual_average_daily: actual_total as f64 / forecast.period as f64,
        forecast_error,
        percentage_error,
        accuracy,
        within_confidence_interval,
        daily_comparison,
        assessment_date: today,
    })
}
