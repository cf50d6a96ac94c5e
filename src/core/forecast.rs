//! Forecast result structures.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target probability that actual cumulative demand falls within the
/// reported bounds. Only the three tabulated levels are supported; the
/// engine fails loudly on anything else rather than defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    /// Parse a percentage value, rejecting anything but 90/95/99.
    pub fn from_percent(percent: u32) -> Result<Self> {
        match percent {
            90 => Ok(Self::Ninety),
            95 => Ok(Self::NinetyFive),
            99 => Ok(Self::NinetyNine),
            other => Err(ForecastError::InvalidConfidenceLevel(other)),
        }
    }

    /// The confidence level as a percentage.
    pub fn percent(self) -> u32 {
        match self {
            Self::Ninety => 90,
            Self::NinetyFive => 95,
            Self::NinetyNine => 99,
        }
    }

    /// Standard-normal critical value for this level.
    pub fn z_score(self) -> f64 {
        match self {
            Self::Ninety => 1.645,
            Self::NinetyFive => 1.96,
            Self::NinetyNine => 2.576,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Tag identifying the algorithm that produced a forecast.
///
/// Foreign tags from the external ML service pass through opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelTag {
    /// The in-process moving-average engine with z-score intervals.
    MovingAverageCi,
    /// A tag reported by the external ML service (e.g. "random_forest").
    External(String),
}

impl ModelTag {
    /// The wire representation of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MovingAverageCi => "moving-average-ci",
            Self::External(tag) => tag,
        }
    }

    /// Parse a wire tag, mapping unknown strings to `External`.
    pub fn from_wire(tag: &str) -> Self {
        if tag == "moving-average-ci" {
            Self::MovingAverageCi
        } else {
            Self::External(tag.to_string())
        }
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projected demand for one day of the forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecastPoint {
    pub date: NaiveDate,
    pub forecast: u32,
    pub lower_bound: u32,
    pub upper_bound: u32,
}

/// Retrospective assessment metadata written by the accuracy evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyAssessment {
    pub forecast_error: u32,
    pub percentage_error: f64,
    pub within_confidence_interval: bool,
    pub assessment_date: NaiveDate,
}

/// An N-day-ahead demand forecast.
///
/// Immutable once created except for the evaluator's write-once population
/// of `accuracy` and `assessment` (re-evaluation overwrites both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Days requested, 1..=365.
    pub period: u32,
    /// First day of the forecast window.
    pub start_date: NaiveDate,
    /// `start_date + period` days; exclusive upper bound when iterating.
    pub end_date: NaiveDate,
    /// Projected cumulative demand over the window.
    pub total_demand: u32,
    /// Historical mean daily demand over the basis window.
    pub average_daily_demand: f64,
    pub confidence_level: ConfidenceLevel,
    /// Interval bounds on `total_demand` at the chosen confidence level.
    pub lower_bound: u32,
    pub upper_bound: u32,
    /// One entry per day in the window; `daily.len() == period`.
    pub daily: Vec<DailyForecastPoint>,
    pub model: ModelTag,
    /// Retrospective accuracy percentage, populated by the evaluator.
    pub accuracy: Option<f64>,
    pub assessment: Option<AccuracyAssessment>,
}

impl ForecastResult {
    /// Check whether a date falls inside the forecast window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }

    /// Check whether the forecast window has fully elapsed.
    pub fn is_complete(&self, today: NaiveDate) -> bool {
        today >= self.end_date
    }
}
