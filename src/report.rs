//! Full analysis: projection, IRR, score and rent recommendation in one report

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::params::{AnalysisInput, ParameterSet, PropertyProfile};
use crate::projection::{
    monthly_payment, solve_irr, IrrStatus, ProjectionConfig, ProjectionEngine, YearlyProjection,
};
use crate::rent::{RentRecommendation, RentRecommender};
use crate::scoring::{InvestmentScore, ScoringEngine, SummaryMetrics};

/// Output of one analysis. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub property: PropertyProfile,
    pub params: ParameterSet,

    pub total_investment: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,

    pub series: Vec<YearlyProjection>,

    pub irr_pct: f64,
    pub irr_status: IrrStatus,

    pub metrics: SummaryMetrics,
    pub score: InvestmentScore,

    pub suggested_rent: f64,
    pub rent_recommendation: RentRecommendation,
}

impl ProjectionReport {
    pub fn final_year(&self) -> Option<&YearlyProjection> {
        self.series.last()
    }
}

/// Runs the calculation chain for an [`AnalysisInput`]
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate the input, then build the report
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult<ProjectionReport> {
        self.config.validate()?;
        input.params.validate()?;
        Ok(self.build_report(&input.property, &input.params))
    }

    /// Build the report for parameters the caller has already validated
    pub fn build_report(&self, property: &PropertyProfile, params: &ParameterSet) -> ProjectionReport {
        let loan_amount = params.loan_amount();
        let total_investment = params.total_investment(self.config.dld_fee_pct);
        let payment = monthly_payment(loan_amount, params.interest_rate_pct, params.loan_term_years);

        let engine = ProjectionEngine::new(ProjectionConfig {
            horizon_years: self.config.horizon_years,
        });
        let series = engine.generate(params, total_investment);

        let irr = solve_irr(&series.cash_flows(total_investment), &self.config.irr);

        let metrics = SummaryMetrics::from_params(params, payment, total_investment);
        let score = ScoringEngine::new().score(&metrics);

        let rent_recommendation =
            RentRecommender::new(self.config.target_net_yield_pct, &self.config.rent_premiums)
                .recommend(params, property);

        log::info!(
            "Analyzed '{}': IRR {:.2}% ({:?}), score {}/{} ({} risk), suggested rent {:.2}",
            property.name,
            irr.irr_pct,
            irr.status,
            score.total,
            score.max_total,
            score.risk_level.as_str(),
            rent_recommendation.suggested_rent
        );

        ProjectionReport {
            property: property.clone(),
            params: params.clone(),
            total_investment,
            loan_amount,
            monthly_payment: payment,
            series: series.years,
            irr_pct: irr.irr_pct,
            irr_status: irr.status,
            metrics,
            score,
            suggested_rent: rent_recommendation.suggested_rent,
            rent_recommendation,
        }
    }
}

/// Format an amount for display, e.g. `AED 1,234,567.89`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}AED {}.{:02}", sign, grouped, fraction)
}
