//! Daily demand series and the transaction aggregator.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single sale transaction as supplied by the persistence layer.
///
/// Records may arrive unordered and several may share a calendar date;
/// the aggregator groups them by day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Transaction timestamp. Time-of-day is discarded during aggregation.
    pub timestamp: DateTime<Utc>,
    /// Units sold.
    pub quantity: u32,
}

impl SaleRecord {
    pub fn new(timestamp: DateTime<Utc>, quantity: u32) -> Self {
        Self {
            timestamp,
            quantity,
        }
    }
}

/// Observed demand for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDemandPoint {
    pub date: NaiveDate,
    pub quantity: u32,
}

impl DailyDemandPoint {
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self { date, quantity }
    }
}

/// A dense, date-ordered daily demand series.
///
/// Invariants: points are ascending by date, one point per calendar day,
/// with no gaps between the first and last date. Days without sales carry
/// quantity 0 rather than being dropped, so trailing-window variance
/// estimates count quiet days instead of silently skipping them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandSeries {
    points: Vec<DailyDemandPoint>,
}

impl DemandSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from pre-aggregated points, validating the ordering
    /// and contiguity invariants.
    pub fn from_points(points: Vec<DailyDemandPoint>) -> Result<Self> {
        for pair in points.windows(2) {
            let gap = pair[1].date - pair[0].date;
            if gap < Duration::days(1) {
                return Err(ForecastError::InvalidSeries(format!(
                    "dates must be strictly increasing: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
            if gap > Duration::days(1) {
                return Err(ForecastError::InvalidSeries(format!(
                    "missing day between {} and {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Aggregate raw sale transactions into a dense daily series.
    ///
    /// Groups records by calendar date (UTC), sums quantities within each
    /// date, and fills every date between the earliest and latest record
    /// with an explicit zero when no sale matched.
    pub fn aggregate(records: &[SaleRecord]) -> Self {
        if records.is_empty() {
            return Self::new();
        }

        let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for record in records {
            *by_date.entry(record.timestamp.date_naive()).or_insert(0) +=
                record.quantity;
        }

        // BTreeMap iteration is already date-ordered; walk the full range
        // so transaction-free days appear as zeros.
        let first = *by_date.keys().next().unwrap();
        let last = *by_date.keys().next_back().unwrap();

        let mut points = Vec::new();
        let mut date = first;
        while date <= last {
            let quantity = by_date.get(&date).copied().unwrap_or(0);
            points.push(DailyDemandPoint::new(date, quantity));
            date = date + Duration::days(1);
        }

        Self { points }
    }

    /// Number of daily points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in date order.
    pub fn points(&self) -> &[DailyDemandPoint] {
        &self.points
    }

    /// Quantities as floats, in date order.
    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity as f64).collect()
    }

    /// The trailing `n` points (all points if fewer are available).
    pub fn tail(&self, n: usize) -> &[DailyDemandPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// First date in the series.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last date in the series.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Observed quantity on a date, 0 if the date is outside the series.
    pub fn quantity_on(&self, date: NaiveDate) -> u32 {
        let first = match self.start_date() {
            Some(d) => d,
            None => return 0,
        };
        if date < first {
            return 0;
        }
        let offset = (date - first).num_days() as usize;
        self.points.get(offset).map(|p| p.quantity).unwrap_or(0)
    }

    /// Total demand over `[start, end)`.
    pub fn window_total(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        self.points
            .iter()
            .filter(|p| p.date >= start && p.date < end)
            .map(|p| p.quantity)
            .sum()
    }
}
