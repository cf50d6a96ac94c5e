//! Demand anomaly detection.
//!
//! Flags days whose demand deviates from a trailing rolling mean by more
//! than a z-score threshold, e.g. bulk orders or data-entry errors that
//! would otherwise skew a forecast's basis window.

use crate::config::{require_history, MIN_FORECAST_POINTS};
use crate::core::DemandSeries;
use crate::error::Result;
use crate::stats;
use chrono::NaiveDate;

/// Configuration for rolling z-score anomaly detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyConfig {
    /// Absolute z-score above which a day is flagged.
    pub threshold: f64,
    /// Rolling baseline length in days.
    pub window: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            window: 7,
        }
    }
}

impl AnomalyConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }
}

/// A flagged demand anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub quantity: u32,
    /// Rolling baseline mean, i.e. the demand that was expected.
    pub expected: f64,
    pub z_score: f64,
}

/// Detect anomalous days in a demand series.
///
/// Each point is scored against the rolling mean and standard deviation
/// of the up-to-`window` days preceding it (shorter at the head of the
/// series; the first day has no baseline and is never flagged). Scoring
/// against the preceding days rather than a window containing the point
/// itself keeps a lone spike from suppressing its own score. A zero
/// rolling deviation is replaced by 1 so flat stretches never divide by
/// zero.
pub fn detect_anomalies(series: &DemandSeries, config: &AnomalyConfig) -> Result<Vec<Anomaly>> {
    require_history(MIN_FORECAST_POINTS, series.len())?;

    let quantities = series.quantities();
    let mut anomalies = Vec::new();

    for (i, point) in series.points().iter().enumerate().skip(1) {
        let start = i.saturating_sub(config.window);
        let baseline = &quantities[start..i];

        let rolling_mean = stats::mean(baseline);
        let mut rolling_std = stats::std_dev(baseline);
        if rolling_std == 0.0 {
            rolling_std = 1.0;
        }

        let z_score = (point.quantity as f64 - rolling_mean) / rolling_std;
        if z_score.abs() > config.threshold {
            anomalies.push(Anomaly {
                date: point.date,
                quantity: point.quantity,
                expected: rolling_mean,
                z_score,
            });
        }
    }

    Ok(anomalies)
}
