//! Investment quality scoring

mod metrics;
mod rubric;

pub use metrics::SummaryMetrics;
pub use rubric::{CategoryScore, InvestmentScore, Rationale, RiskLevel, ScoreCategory, ScoringEngine};
