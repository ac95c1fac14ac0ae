//! Running state carried from one projection year to the next

use crate::params::ParameterSet;

/// Values that compound or accumulate across projection years
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first advance)
    pub year: u32,

    /// Monthly rent after this year's growth
    pub running_rent: f64,

    /// Annual insurance after this year's inflation
    pub running_insurance: f64,

    /// Loan balance at the end of the current year
    pub remaining_debt: f64,

    /// Sum of net cash flows to date
    pub cumulative_cash: f64,
}

impl ProjectionState {
    /// Initial state at purchase, before any growth is applied
    pub fn from_params(params: &ParameterSet) -> Self {
        Self {
            year: 0,
            running_rent: params.monthly_rent,
            running_insurance: params.insurance_annual,
            remaining_debt: params.loan_amount(),
            cumulative_cash: 0.0,
        }
    }

    /// Move to the next year and compound rent and insurance.
    ///
    /// Growth applies to last year's grown value. The management base fee and
    /// other expenses are left flat.
    pub fn advance_year(&mut self, params: &ParameterSet) {
        self.year += 1;
        self.running_rent *= 1.0 + params.rent_growth_pct / 100.0;
        self.running_insurance *= 1.0 + params.expense_inflation_pct / 100.0;
    }
}
