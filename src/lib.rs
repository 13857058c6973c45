#![forbid(unsafe_code)]

//! Carbon-footprint estimation: per-category CO2 contributions from static
//! coefficient tables, domain totals, and savings against alternative choices.

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod error;
pub mod footprint;
pub mod guard;
pub mod logging;
pub mod nutrition;
pub mod reduction;
pub mod report;
pub mod scenario;
pub mod table;

pub use aggregator::{
    compute_contribution, compute_result, compute_savings, compute_total, EmissionResult,
    EmissionsAggregator, QuantityMap,
};
pub use config::{DomainConfig, FootprintConfig};
pub use domain::{Domain, GRAMS_PER_SERVING};
pub use error::FootprintError;
pub use footprint::{DailyFootprint, DomainSummary};
pub use guard::QuantityGuard;
pub use nutrition::{Macros, NutritionTable};
pub use reduction::{
    lifestyle_savings, LifestyleOption, ReductionCatalog, ReductionPlan, ReductionProfile,
};
pub use report::round2;
pub use scenario::{Alternative, DomainInput, Scenario};
pub use table::{CoefficientTable, Discrepancy};
