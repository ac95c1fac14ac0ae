//! Ten-point investment quality rubric
//!
//! All thresholds are strict comparisons: a ratio sitting exactly on a
//! threshold does not earn the point.

use serde::{Deserialize, Serialize};

use super::metrics::SummaryMetrics;

const COC_GOOD_PCT: f64 = 6.0;
const COC_EXCELLENT_PCT: f64 = 10.0;
const NET_YIELD_GOOD_PCT: f64 = 5.0;
const NET_YIELD_EXCELLENT_PCT: f64 = 7.0;
const GROSS_YIELD_GOOD_PCT: f64 = 8.0;
const DEBT_TO_EQUITY_LIMIT_PCT: f64 = 80.0;
const EXPENSE_RATIO_LIMIT_PCT: f64 = 30.0;
const APPRECIATION_GOOD_PCT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    CashFlow,
    Yield,
    Risk,
    Growth,
}

impl ScoreCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::CashFlow => "Cash Flow",
            ScoreCategory::Yield => "Yield",
            ScoreCategory::Risk => "Risk",
            ScoreCategory::Growth => "Growth",
        }
    }

    pub fn max_points(&self) -> u32 {
        match self {
            ScoreCategory::CashFlow => 4,
            ScoreCategory::Yield => 3,
            ScoreCategory::Risk => 2,
            ScoreCategory::Growth => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_total(total: u32) -> Self {
        if total >= 8 {
            RiskLevel::Low
        } else if total >= 6 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// One rubric check and the text shown for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rationale {
    pub passed: bool,
    pub points: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub points: u32,
    pub max_points: u32,
    pub rationale: Vec<Rationale>,
}

impl CategoryScore {
    fn new(category: ScoreCategory) -> Self {
        Self {
            category,
            points: 0,
            max_points: category.max_points(),
            rationale: Vec::new(),
        }
    }

    fn check(&mut self, passed: bool, points: u32, pass_text: &str, fail_text: &str) {
        if passed {
            self.points += points;
        }
        self.rationale.push(Rationale {
            passed,
            points: if passed { points } else { 0 },
            text: (if passed { pass_text } else { fail_text }).to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentScore {
    pub total: u32,
    pub max_total: u32,
    pub risk_level: RiskLevel,
    pub categories: Vec<CategoryScore>,
}

impl InvestmentScore {
    pub fn category(&self, category: ScoreCategory) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Stateless scorer over [`SummaryMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, metrics: &SummaryMetrics) -> InvestmentScore {
        let categories = vec![
            self.score_cash_flow(metrics),
            self.score_yield(metrics),
            self.score_risk(metrics),
            self.score_growth(metrics),
        ];

        let total = categories.iter().map(|c| c.points).sum();
        let max_total = categories.iter().map(|c| c.max_points).sum();

        InvestmentScore {
            total,
            max_total,
            risk_level: RiskLevel::from_total(total),
            categories,
        }
    }

    fn score_cash_flow(&self, m: &SummaryMetrics) -> CategoryScore {
        let mut score = CategoryScore::new(ScoreCategory::CashFlow);
        score.check(
            m.monthly_cash_flow > 0.0,
            2,
            "Positive monthly cash flow",
            "Negative monthly cash flow",
        );
        score.check(
            m.cash_on_cash_return > COC_GOOD_PCT,
            1,
            "Cash-on-cash return above 6%",
            "Cash-on-cash return not above 6%",
        );
        score.check(
            m.cash_on_cash_return > COC_EXCELLENT_PCT,
            1,
            "Cash-on-cash return above 10%",
            "Cash-on-cash return not above 10%",
        );
        score
    }

    fn score_yield(&self, m: &SummaryMetrics) -> CategoryScore {
        let mut score = CategoryScore::new(ScoreCategory::Yield);
        score.check(
            m.net_yield > NET_YIELD_GOOD_PCT,
            1,
            "Net yield above 5%",
            "Net yield not above 5%",
        );
        score.check(
            m.net_yield > NET_YIELD_EXCELLENT_PCT,
            1,
            "Net yield above 7%",
            "Net yield not above 7%",
        );
        score.check(
            m.gross_yield > GROSS_YIELD_GOOD_PCT,
            1,
            "Gross yield above 8%",
            "Gross yield not above 8%",
        );
        score
    }

    fn score_risk(&self, m: &SummaryMetrics) -> CategoryScore {
        let mut score = CategoryScore::new(ScoreCategory::Risk);
        score.check(
            m.debt_to_equity_ratio < DEBT_TO_EQUITY_LIMIT_PCT,
            1,
            "Debt-to-equity ratio below 80%",
            "Debt-to-equity ratio not below 80%",
        );
        score.check(
            m.monthly_expense_ratio < EXPENSE_RATIO_LIMIT_PCT,
            1,
            "Expense ratio below 30% of rent",
            "Expense ratio not below 30% of rent",
        );
        score
    }

    fn score_growth(&self, m: &SummaryMetrics) -> CategoryScore {
        let mut score = CategoryScore::new(ScoreCategory::Growth);
        score.check(
            m.appreciation_rate_pct > APPRECIATION_GOOD_PCT,
            1,
            "Appreciation above 3% per year",
            "Appreciation not above 3% per year",
        );
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SummaryMetrics {
        SummaryMetrics {
            gross_annual_rent: 96_000.0,
            effective_annual_income: 86_400.0,
            annual_expenses: 13_700.0,
            net_operating_income: 72_700.0,
            annual_debt_service: 50_024.92,
            annual_cash_flow: 22_675.08,
            monthly_cash_flow: 1_889.59,
            cash_on_cash_return: 9.07,
            gross_yield: 9.6,
            net_yield: 7.27,
            cap_rate: 7.27,
            debt_to_equity_ratio: 75.0,
            monthly_expense_ratio: 14.27,
            appreciation_rate_pct: 4.0,
        }
    }

    fn points(score: &InvestmentScore, category: ScoreCategory) -> u32 {
        score.category(category).map(|c| c.points).unwrap_or(0)
    }

    #[test]
    fn test_reference_scenario_score() {
        let score = ScoringEngine::new().score(&metrics());

        assert_eq!(points(&score, ScoreCategory::CashFlow), 3);
        assert_eq!(points(&score, ScoreCategory::Yield), 3);
        assert_eq!(points(&score, ScoreCategory::Risk), 2);
        assert_eq!(points(&score, ScoreCategory::Growth), 1);
        assert_eq!(score.total, 9);
        assert_eq!(score.max_total, 10);
        assert_eq!(score.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_positive_cash_flow_worth_two_points() {
        let engine = ScoringEngine::new();
        let negative = SummaryMetrics { monthly_cash_flow: -150.0, ..metrics() };
        let positive = SummaryMetrics { monthly_cash_flow: 150.0, ..metrics() };

        let before = points(&engine.score(&negative), ScoreCategory::CashFlow);
        let after = points(&engine.score(&positive), ScoreCategory::CashFlow);
        assert_eq!(after - before, 2);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let at_threshold = SummaryMetrics {
            monthly_cash_flow: 0.0,
            cash_on_cash_return: 6.0,
            net_yield: 5.0,
            gross_yield: 8.0,
            debt_to_equity_ratio: 80.0,
            monthly_expense_ratio: 30.0,
            appreciation_rate_pct: 3.0,
            ..metrics()
        };
        let score = ScoringEngine::new().score(&at_threshold);

        assert_eq!(score.total, 0);
        assert_eq!(score.risk_level, RiskLevel::High);
        assert!(score.categories.iter().flat_map(|c| &c.rationale).all(|r| !r.passed));
    }

    #[test]
    fn test_excellent_cash_on_cash_earns_both_points() {
        let strong = SummaryMetrics { cash_on_cash_return: 10.5, ..metrics() };
        let score = ScoringEngine::new().score(&strong);
        assert_eq!(points(&score, ScoreCategory::CashFlow), 4);
        assert_eq!(score.total, 10);
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_total(10), RiskLevel::Low);
        assert_eq!(RiskLevel::from_total(8), RiskLevel::Low);
        assert_eq!(RiskLevel::from_total(7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_total(6), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_total(5), RiskLevel::High);
        assert_eq!(RiskLevel::from_total(0), RiskLevel::High);
    }

    #[test]
    fn test_rationale_text() {
        let weak = SummaryMetrics {
            monthly_cash_flow: -10.0,
            appreciation_rate_pct: 1.0,
            ..metrics()
        };
        let score = ScoringEngine::new().score(&weak);

        let cash_flow = score.category(ScoreCategory::CashFlow).unwrap();
        assert_eq!(cash_flow.rationale.len(), 3);
        assert_eq!(cash_flow.rationale[0].text, "Negative monthly cash flow");
        assert_eq!(cash_flow.rationale[1].text, "Cash-on-cash return above 6%");

        let growth = score.category(ScoreCategory::Growth).unwrap();
        assert_eq!(growth.rationale[0].text, "Appreciation not above 3% per year");
        assert_eq!(growth.points, 0);
    }
}
