//! Engine and optimizer configuration.
//!
//! All tunables are passed explicitly into the components instead of
//! living as module-level constants, so tests can override them.

use crate::error::{ForecastError, Result};

/// Minimum number of daily history points required to generate a forecast.
pub const MIN_FORECAST_POINTS: usize = 10;

/// Minimum number of daily history points required for training-style
/// operations (model fitting on the external path).
pub const MIN_TRAINING_POINTS: usize = 30;

/// Check a history-size precondition before invoking the engine.
///
/// Callers enforce this with [`MIN_FORECAST_POINTS`] or
/// [`MIN_TRAINING_POINTS`]; the aggregator itself accepts any input size.
pub fn require_history(required: usize, available: usize) -> Result<()> {
    if available < required {
        return Err(ForecastError::InsufficientData {
            required,
            available,
        });
    }
    Ok(())
}

/// Configuration for the statistical forecast engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Number of trailing daily observations used to estimate average
    /// demand and variance ("last month").
    pub basis_window: usize,
    /// Half-width of the uniform per-day jitter applied to the projected
    /// daily demand, as a fraction of the average (0.2 = +/-20%).
    pub daily_jitter: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            basis_window: 30,
            daily_jitter: 0.2,
        }
    }
}

impl EngineConfig {
    /// Override the basis window size.
    pub fn with_basis_window(mut self, window: usize) -> Self {
        self.basis_window = window;
        self
    }

    /// Override the daily jitter fraction. Zero disables jitter entirely.
    pub fn with_daily_jitter(mut self, jitter: f64) -> Self {
        self.daily_jitter = jitter;
        self
    }
}

/// Configuration for the inventory optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptimizerConfig {
    /// Extra days of demand cover included in the recommended order
    /// quantity. `None` uses the product's lead time.
    pub period_buffer: Option<u32>,
}

impl OptimizerConfig {
    /// Use a fixed buffer of extra cover days instead of the lead time.
    pub fn with_period_buffer(mut self, days: u32) -> Self {
        self.period_buffer = Some(days);
        self
    }
}
