//! End-to-end pipeline tests: raw transactions through aggregation,
//! forecasting, retrospective evaluation and reorder optimization.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockcast::accuracy::evaluate;
use stockcast::config::{require_history, EngineConfig, OptimizerConfig, MIN_FORECAST_POINTS};
use stockcast::core::{ConfidenceLevel, DemandSeries, SaleRecord};
use stockcast::engine::ForecastEngine;
use stockcast::optimize::{optimize, optimize_batch, BatchOutcome, BatchRequest, StockParameters};
use stockcast::ForecastError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three weeks of sales: two transactions most days, none on Sundays.
/// Jan 1 2024 is a Monday; the skipped Sundays are Jan 7, 14 and 21.
fn sample_transactions() -> Vec<SaleRecord> {
    let mut records = Vec::new();
    for day in 0..21 {
        let when = date(2024, 1, 1) + Duration::days(day);
        if when.weekday() == chrono::Weekday::Sun {
            continue;
        }
        let morning = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap() + Duration::days(day);
        let evening = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap() + Duration::days(day);
        records.push(SaleRecord::new(morning, 4));
        records.push(SaleRecord::new(evening, 2));
    }
    records
}

#[test]
fn full_cycle_from_transactions_to_recommendation() {
    let records = sample_transactions();
    let series = DemandSeries::aggregate(&records);

    // Dense from Jan 1 through Jan 20 (the trailing Sunday never traded,
    // so the range ends on the 20th); interior Sundays appear as zeros.
    assert_eq!(series.len(), 20);
    assert_eq!(series.quantity_on(date(2024, 1, 7)), 0);
    assert_eq!(series.quantity_on(date(2024, 1, 8)), 6);

    require_history(MIN_FORECAST_POINTS, series.len()).unwrap();

    let engine = ForecastEngine::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut forecast = engine
        .forecast_with_rng(
            &series,
            14,
            ConfidenceLevel::NinetyFive,
            date(2024, 1, 22),
            &mut rng,
        )
        .unwrap();

    // 18 selling days of 6 units over a 20-day dense series.
    let expected_avg = 18.0 * 6.0 / 20.0;
    assert!((forecast.average_daily_demand - expected_avg).abs() < 1e-9);
    assert_eq!(forecast.daily.len(), 14);
    assert!(forecast.lower_bound <= forecast.total_demand);
    assert!(forecast.total_demand <= forecast.upper_bound);

    // The window elapses; actual demand ran at the same rhythm.
    let actual = DemandSeries::aggregate(
        &sample_transactions()
            .iter()
            .map(|r| SaleRecord::new(r.timestamp + Duration::days(21), r.quantity))
            .collect::<Vec<_>>(),
    );
    let report = evaluate(&mut forecast, &actual, date(2024, 2, 10)).unwrap();

    assert!(report.accuracy > 80.0, "accuracy was {}", report.accuracy);
    assert_eq!(report.daily_comparison.len(), 14);
    assert_eq!(forecast.accuracy, Some(report.accuracy));

    // And stock is thin enough to trigger a reorder.
    let params = StockParameters {
        current_stock: 20,
        lead_time_days: 7,
        safety_stock: 10,
    };
    let rec = optimize("sku-1", params, &forecast, &OptimizerConfig::default());
    assert!(rec.stockout_risk);
    assert!(rec.recommended_order_quantity > 0);
    assert!(rec.days_of_supply_remaining.unwrap() < 7.0);
}

#[test]
fn forecast_gate_rejects_short_history() {
    let records: Vec<SaleRecord> = (0..5)
        .map(|day| {
            SaleRecord::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day),
                3,
            )
        })
        .collect();
    let series = DemandSeries::aggregate(&records);

    assert_eq!(
        require_history(MIN_FORECAST_POINTS, series.len()),
        Err(ForecastError::InsufficientData {
            required: 10,
            available: 5
        })
    );
}

#[test]
fn accuracy_is_gated_on_window_completion() {
    let series = DemandSeries::aggregate(&sample_transactions());
    let mut rng = StdRng::seed_from_u64(7);
    let mut forecast = ForecastEngine::new()
        .forecast_with_rng(
            &series,
            30,
            ConfidenceLevel::NinetyFive,
            date(2024, 1, 22),
            &mut rng,
        )
        .unwrap();

    let err = evaluate(&mut forecast, &series, date(2024, 2, 1)).unwrap_err();
    assert_eq!(
        err,
        ForecastError::ForecastNotComplete {
            end_date: date(2024, 2, 21),
            today: date(2024, 2, 1),
        }
    );
}

#[test]
fn batch_optimization_mixes_successes_and_failures() {
    let healthy = DemandSeries::aggregate(&sample_transactions());
    let sparse = DemandSeries::aggregate(
        &sample_transactions().into_iter().take(4).collect::<Vec<_>>(),
    );

    let params = StockParameters {
        current_stock: 15,
        lead_time_days: 5,
        safety_stock: 10,
    };
    let requests = vec![
        BatchRequest {
            product_id: "sku-a".to_string(),
            params,
            history: healthy.clone(),
        },
        BatchRequest {
            product_id: "sku-b".to_string(),
            params,
            history: sparse,
        },
        BatchRequest {
            product_id: "sku-c".to_string(),
            params,
            history: healthy,
        },
    ];

    let mut rng = StdRng::seed_from_u64(3);
    let outcomes = optimize_batch(
        &requests,
        &EngineConfig::default(),
        &OptimizerConfig::default(),
        date(2024, 1, 22),
        &mut rng,
    );

    assert_eq!(outcomes.len(), 3);
    assert!(!outcomes[0].is_failure());
    assert!(outcomes[1].is_failure());
    assert!(!outcomes[2].is_failure());

    match &outcomes[1] {
        BatchOutcome::Failed { product_id, message } => {
            assert_eq!(product_id, "sku-b");
            assert!(message.contains("insufficient data"));
        }
        BatchOutcome::Recommended(_) => unreachable!(),
    }
}
