//! Core projection engine for yearly rental property forecasts

use crate::params::ParameterSet;
use super::amortization::{amortize_year, monthly_payment};
use super::cashflows::{ProjectionSeries, YearlyProjection};
use super::state::ProjectionState;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub horizon_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: crate::config::DEFAULT_HORIZON_YEARS,
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the property year by year.
    ///
    /// Each year's remaining debt and cumulative cash depend on the previous
    /// year's values, so rows are produced strictly in order.
    pub fn generate(&self, params: &ParameterSet, total_investment: f64) -> ProjectionSeries {
        let payment = monthly_payment(
            params.loan_amount(),
            params.interest_rate_pct,
            params.loan_term_years,
        );

        let mut series = ProjectionSeries::new();
        let mut state = ProjectionState::from_params(params);

        for _year in 1..=self.config.horizon_years {
            state.advance_year(params);

            let row = self.calculate_year(params, payment, total_investment, &mut state);
            log::debug!(
                "year {}: net cash flow {:.2}, remaining debt {:.2}, equity {:.2}",
                row.year,
                row.net_cash_flow,
                row.remaining_debt,
                row.equity
            );
            series.add_year(row);
        }

        series
    }

    /// Calculate one year from the already-advanced state
    fn calculate_year(
        &self,
        params: &ParameterSet,
        monthly_payment: f64,
        total_investment: f64,
        state: &mut ProjectionState,
    ) -> YearlyProjection {
        let year = state.year;

        // Income and expenses at this year's grown rent and insurance
        let total_income = params.annual_income_at(state.running_rent);
        let annual_expenses = params.annual_expenses_at(state.running_rent, state.running_insurance);

        let annual_debt_service = monthly_payment * 12.0;
        let net_cash_flow = total_income - annual_expenses - annual_debt_service;

        state.remaining_debt = amortize_year(state.remaining_debt, monthly_payment, params.interest_rate_pct);
        // The final payment settles any rounding residue left by the annuity
        if year >= params.loan_term_years {
            state.remaining_debt = 0.0;
        }

        // Direct exponentiation from the purchase price
        let property_value = params.price * (1.0 + params.appreciation_rate_pct / 100.0).powi(year as i32);

        let equity = (property_value - state.remaining_debt).max(0.0);
        state.cumulative_cash += net_cash_flow;

        let total_return_pct = if total_investment != 0.0 {
            (state.cumulative_cash + equity - total_investment) / total_investment * 100.0
        } else {
            0.0
        };

        let dscr = if annual_debt_service == 0.0 {
            f64::INFINITY
        } else {
            (total_income - annual_expenses) / annual_debt_service
        };

        YearlyProjection {
            year,
            monthly_rent: state.running_rent,
            total_income,
            annual_expenses,
            annual_debt_service,
            net_cash_flow,
            property_value,
            remaining_debt: state.remaining_debt,
            equity,
            cumulative_cash: state.cumulative_cash,
            total_return_pct,
            dscr,
        }
    }
}
