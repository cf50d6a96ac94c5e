//! Property-based tests for the forecasting engine.
//!
//! These verify invariants that should hold for all valid inputs, using
//! randomly generated demand histories.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockcast::config::EngineConfig;
use stockcast::core::{ConfidenceLevel, DailyDemandPoint, DemandSeries};
use stockcast::engine::ForecastEngine;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn make_series(quantities: &[u32]) -> DemandSeries {
    let points: Vec<DailyDemandPoint> = quantities
        .iter()
        .enumerate()
        .map(|(i, &q)| DailyDemandPoint::new(start() + Duration::days(i as i64), q))
        .collect();
    DemandSeries::from_points(points).unwrap()
}

/// Strategy for daily demand histories of 1 to 120 days.
fn history_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..500, 1..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn bounds_bracket_total_demand(
        quantities in history_strategy(),
        period in 1u32..=365,
        seed in any::<u64>(),
    ) {
        let series = make_series(&quantities);
        let mut rng = StdRng::seed_from_u64(seed);
        let forecast = ForecastEngine::new()
            .forecast_with_rng(&series, period, ConfidenceLevel::NinetyFive, start(), &mut rng)
            .unwrap();

        prop_assert!(forecast.lower_bound <= forecast.total_demand);
        prop_assert!(forecast.total_demand <= forecast.upper_bound);
        prop_assert!(forecast.average_daily_demand >= 0.0);
    }

    #[test]
    fn daily_series_length_equals_period(
        quantities in history_strategy(),
        period in 1u32..=365,
        seed in any::<u64>(),
    ) {
        let series = make_series(&quantities);
        let mut rng = StdRng::seed_from_u64(seed);
        let forecast = ForecastEngine::new()
            .forecast_with_rng(&series, period, ConfidenceLevel::NinetyFive, start(), &mut rng)
            .unwrap();

        prop_assert_eq!(forecast.daily.len(), period as usize);
        prop_assert_eq!(forecast.end_date, start() + Duration::days(period as i64));
    }

    #[test]
    fn confidence_widens_monotonically(
        quantities in history_strategy(),
        period in 1u32..=365,
    ) {
        let series = make_series(&quantities);
        let engine = ForecastEngine::new();

        let mut widths = Vec::new();
        for level in [
            ConfidenceLevel::Ninety,
            ConfidenceLevel::NinetyFive,
            ConfidenceLevel::NinetyNine,
        ] {
            let mut rng = StdRng::seed_from_u64(0);
            let f = engine
                .forecast_with_rng(&series, period, level, start(), &mut rng)
                .unwrap();
            widths.push(f.upper_bound - f.lower_bound);
        }

        prop_assert!(widths[0] <= widths[1]);
        prop_assert!(widths[1] <= widths[2]);
    }

    #[test]
    fn zero_variance_collapses_interval(
        value in 0u32..200,
        len in 1usize..60,
        period in 1u32..=365,
    ) {
        let series = make_series(&vec![value; len]);
        let mut rng = StdRng::seed_from_u64(1);
        let forecast = ForecastEngine::new()
            .forecast_with_rng(&series, period, ConfidenceLevel::NinetyNine, start(), &mut rng)
            .unwrap();

        let expected = (value as f64 * period as f64).round() as u32;
        prop_assert_eq!(forecast.total_demand, expected);
        prop_assert_eq!(forecast.lower_bound, expected);
        prop_assert_eq!(forecast.upper_bound, expected);
    }

    #[test]
    fn jitter_never_goes_negative(
        quantities in history_strategy(),
        seed in any::<u64>(),
    ) {
        let config = EngineConfig::default().with_daily_jitter(0.9);
        let series = make_series(&quantities);
        let mut rng = StdRng::seed_from_u64(seed);
        let forecast = ForecastEngine::with_config(config)
            .forecast_with_rng(&series, 60, ConfidenceLevel::NinetyFive, start(), &mut rng)
            .unwrap();

        // u32 already enforces this at the type level; the check documents
        // that the floor applies before the cast.
        for day in &forecast.daily {
            prop_assert!(day.lower_bound <= day.upper_bound);
        }
    }

    #[test]
    fn aggregate_totals_are_rng_independent(
        quantities in history_strategy(),
        period in 1u32..=365,
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
    ) {
        let series = make_series(&quantities);
        let engine = ForecastEngine::new();

        let mut rng_a = StdRng::seed_from_u64(seed_a);
        let mut rng_b = StdRng::seed_from_u64(seed_b);
        let a = engine
            .forecast_with_rng(&series, period, ConfidenceLevel::NinetyFive, start(), &mut rng_a)
            .unwrap();
        let b = engine
            .forecast_with_rng(&series, period, ConfidenceLevel::NinetyFive, start(), &mut rng_b)
            .unwrap();

        prop_assert_eq!(a.total_demand, b.total_demand);
        prop_assert_eq!(a.lower_bound, b.lower_bound);
        prop_assert_eq!(a.upper_bound, b.upper_bound);
    }
}
