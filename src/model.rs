//! Model strategy interface and fallback composition.
//!
//! The external ML service and the in-process statistical engine share one
//! result schema, so callers pick a path by model tag and compose an
//! explicit fallback around the external call. The external client itself
//! lives in the host service; anything implementing [`DemandModel`] can be
//! the primary here.

use crate::config::EngineConfig;
use crate::core::{ConfidenceLevel, DemandSeries, ForecastResult, ModelTag};
use crate::engine::ForecastEngine;
use crate::error::Result;
use chrono::{NaiveDate, Utc};

/// Parameters of one forecast invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub period: u32,
    pub level: ConfidenceLevel,
    /// First day of the window; `None` means today.
    pub start_date: Option<NaiveDate>,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            period: 30,
            level: ConfidenceLevel::default(),
            start_date: None,
        }
    }
}

impl ForecastRequest {
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    pub fn with_level(mut self, level: ConfidenceLevel) -> Self {
        self.level = level;
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    fn resolved_start(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Common interface for demand forecasting strategies.
///
/// Object-safe; use `BoxedModel` for heterogeneous collections.
pub trait DemandModel {
    /// The tag stamped onto produced forecasts.
    fn tag(&self) -> ModelTag;

    /// Produce a forecast for the given history.
    fn forecast(&self, series: &DemandSeries, request: &ForecastRequest)
        -> Result<ForecastResult>;
}

/// Type alias for boxed model trait objects.
pub type BoxedModel = Box<dyn DemandModel>;

/// The in-process statistical path: moving average with z-score intervals.
#[derive(Debug, Clone, Default)]
pub struct MovingAverageCi {
    engine: ForecastEngine,
}

impl MovingAverageCi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: ForecastEngine::with_config(config),
        }
    }
}

impl DemandModel for MovingAverageCi {
    fn tag(&self) -> ModelTag {
        ModelTag::MovingAverageCi
    }

    fn forecast(
        &self,
        series: &DemandSeries,
        request: &ForecastRequest,
    ) -> Result<ForecastResult> {
        self.engine.forecast_with_rng(
            series,
            request.period,
            request.level,
            request.resolved_start(),
            &mut rand::thread_rng(),
        )
    }
}

/// Try a primary model, falling back to a secondary on failure.
///
/// This is the try/catch/fall-back composition the calling layer wraps
/// around the external ML path: the fallback only runs when the primary
/// errors, and the produced forecast keeps whichever model's tag made it.
pub struct FallbackModel<P, F> {
    primary: P,
    fallback: F,
}

impl<P: DemandModel, F: DemandModel> FallbackModel<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: DemandModel, F: DemandModel> DemandModel for FallbackModel<P, F> {
    fn tag(&self) -> ModelTag {
        self.primary.tag()
    }

    fn forecast(
        &self,
        series: &DemandSeries,
        request: &ForecastRequest,
    ) -> Result<ForecastResult> {
        match self.primary.forecast(series, request) {
            Ok(forecast) => Ok(forecast),
            Err(err) => {
                log::warn!(
                    "model {} failed ({}), falling back to {}",
                    self.primary.tag(),
                    err,
                    self.fallback.tag()
                );
                self.fallback.forecast(series, request)
            }
        }
    }
}
