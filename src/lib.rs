//! Property Forecast - financial calculation engine for rental property investments
//!
//! This library provides:
//! - Fixed-rate loan amortization
//! - Year-by-year projections of income, expenses, debt and equity
//! - IRR over the projected cash flows (Newton-Raphson)
//! - A ten-point investment quality score
//! - Target-yield rent recommendations
//! - Batch scenario runs

pub mod config;
pub mod error;
pub mod params;
pub mod projection;
pub mod rent;
pub mod report;
pub mod scenario;
pub mod scoring;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use params::{AnalysisInput, ParameterSet, PropertyProfile, PropertyType};
pub use projection::{ProjectionEngine, ProjectionSeries, YearlyProjection};
pub use report::{Analyzer, ProjectionReport};
pub use scenario::ScenarioRunner;
