//! Summary ratios derived from the purchase-time rent structure

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// Ratios the rubric scores against. Percentages are in percent.
///
/// Computed from the input rent and insurance, before any growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub gross_annual_rent: f64,
    pub effective_annual_income: f64,
    pub annual_expenses: f64,
    pub net_operating_income: f64,
    pub annual_debt_service: f64,
    pub annual_cash_flow: f64,
    pub monthly_cash_flow: f64,

    pub cash_on_cash_return: f64,
    pub gross_yield: f64,
    pub net_yield: f64,
    pub cap_rate: f64,

    /// Loan amount as a share of the purchase price
    pub debt_to_equity_ratio: f64,
    /// Monthly operating expenses as a share of monthly rent
    pub monthly_expense_ratio: f64,
    pub appreciation_rate_pct: f64,
}

impl SummaryMetrics {
    pub fn from_params(params: &ParameterSet, monthly_payment: f64, total_investment: f64) -> Self {
        let gross_annual_rent = params.monthly_rent * 12.0;
        let effective_annual_income = params.annual_income_at(params.monthly_rent);
        let annual_expenses = params.annual_expenses_at(params.monthly_rent, params.insurance_annual);
        let net_operating_income = effective_annual_income - annual_expenses;
        let annual_debt_service = monthly_payment * 12.0;
        let annual_cash_flow = net_operating_income - annual_debt_service;

        let cash_on_cash_return = if total_investment > 0.0 {
            annual_cash_flow / total_investment * 100.0
        } else {
            0.0
        };

        let monthly_expense_ratio = if params.monthly_rent > 0.0 {
            annual_expenses / 12.0 / params.monthly_rent * 100.0
        } else {
            f64::INFINITY
        };

        Self {
            gross_annual_rent,
            effective_annual_income,
            annual_expenses,
            net_operating_income,
            annual_debt_service,
            annual_cash_flow,
            monthly_cash_flow: annual_cash_flow / 12.0,
            cash_on_cash_return,
            gross_yield: gross_annual_rent / params.price * 100.0,
            net_yield: net_operating_income / params.price * 100.0,
            cap_rate: net_operating_income / params.price * 100.0,
            debt_to_equity_ratio: params.loan_amount() / params.price * 100.0,
            monthly_expense_ratio,
            appreciation_rate_pct: params.appreciation_rate_pct,
        }
    }
}
