//! # stockcast
//!
//! Statistical demand forecasting and inventory optimization for stock
//! management systems.
//!
//! Given a product's sale history, the crate aggregates transactions into
//! a dense daily demand series, projects demand over a future horizon with
//! moving-average point estimates and z-score confidence bounds, grades
//! past forecasts against observed sales, and derives reorder-point
//! recommendations. A strategy trait lets an external ML service act as
//! the primary path with the statistical engine as the fallback.
//!
//! All components are pure, synchronous functions over in-memory data:
//! fetching history and persisting results belong to the host service.
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use stockcast::prelude::*;
//!
//! let points: Vec<DailyDemandPoint> = (0..14)
//!     .map(|i| DailyDemandPoint::new(
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i),
//!         10,
//!     ))
//!     .collect();
//! let series = DemandSeries::from_points(points).unwrap();
//!
//! let engine = ForecastEngine::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let forecast = engine
//!     .forecast_with_rng(
//!         &series,
//!         30,
//!         ConfidenceLevel::NinetyFive,
//!         NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//!         &mut rng,
//!     )
//!     .unwrap();
//!
//! assert_eq!(forecast.total_demand, 300);
//! assert_eq!(forecast.daily.len(), 30);
//! ```

pub mod accuracy;
pub mod config;
pub mod core;
pub mod detection;
pub mod engine;
pub mod error;
pub mod model;
pub mod optimize;
pub mod stats;
pub mod wire;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::accuracy::{evaluate, AccuracyReport};
    pub use crate::config::{EngineConfig, OptimizerConfig};
    pub use crate::core::{
        ConfidenceLevel, DailyDemandPoint, DemandSeries, ForecastResult, ModelTag, SaleRecord,
    };
    pub use crate::engine::ForecastEngine;
    pub use crate::error::{ForecastError, Result};
    pub use crate::model::{DemandModel, ForecastRequest};
    pub use crate::optimize::{optimize, Recommendation, StockParameters};
}
