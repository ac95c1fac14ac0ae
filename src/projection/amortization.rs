//! Fixed-rate loan amortization

use serde::{Deserialize, Serialize};

/// Monthly payment on a fixed-rate, fully amortizing loan.
///
/// A zero interest rate takes the straight-line branch (`loan / n`) since the
/// annuity formula is 0/0 there.
pub fn monthly_payment(loan_amount: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    // Clamp so the month count always fits the `powi` exponent
    let n = term_years.saturating_mul(12).min(i32::MAX as u32);

    if n == 0 {
        return 0.0;
    }

    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powi(n as i32);
        if growth.is_infinite() {
            // Limit of the annuity as the term grows: interest only
            return loan_amount * monthly_rate;
        }
        loan_amount * monthly_rate * growth / (growth - 1.0)
    } else {
        loan_amount / n as f64
    }
}

/// Run twelve monthly payments against an opening balance.
/// Returns the closing balance, never below zero.
pub fn amortize_year(opening_balance: f64, monthly_payment: f64, annual_rate_pct: f64) -> f64 {
    amortize_year_detailed(opening_balance, monthly_payment, annual_rate_pct).closing_balance
}

/// One year of amortization with the interest/principal split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearAmortization {
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
}

/// Same monthly recurrence as [`amortize_year`], keeping the totals.
///
/// Once the balance hits zero, later months pay no interest and retire no
/// further principal.
pub fn amortize_year_detailed(
    opening_balance: f64,
    monthly_payment: f64,
    annual_rate_pct: f64,
) -> YearAmortization {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let mut balance = opening_balance;
    let mut interest_paid = 0.0;

    for _month in 0..12 {
        let interest = balance * monthly_rate;
        let principal = monthly_payment - interest;
        let next = (balance - principal).max(0.0);

        if balance > 0.0 {
            interest_paid += interest;
        }
        balance = next;
    }

    YearAmortization {
        opening_balance,
        closing_balance: balance,
        interest_paid,
        principal_paid: opening_balance - balance,
    }
}
