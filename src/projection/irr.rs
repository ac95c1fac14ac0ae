//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson over the yearly cash flows of a projection. The solver
//! never fails: when Newton stops without converging, bisection over
//! [0%, 1000%] recovers the root, and a series whose NPV stays negative is
//! reported as 0%.

use serde::{Deserialize, Serialize};

/// Upper end of the bracketing search as a decimal rate (1000%)
const BRACKET_UPPER_RATE: f64 = 10.0;
const BRACKET_STEPS: u32 = 100;
const BISECTION_TOLERANCE: f64 = 1e-10;
const BISECTION_MAX_ITERATIONS: u32 = 200;

/// Newton-Raphson settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSettings {
    /// Starting rate as a decimal (0.10 = 10%)
    pub initial_guess: f64,
    /// Stop when the step, or the NPV derivative, falls below this
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-4,
            max_iterations: 100,
        }
    }
}

/// How the solver finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrStatus {
    /// Step size fell below tolerance
    Converged,
    /// NPV derivative too close to zero to take another step
    FlatDerivative,
    /// Iteration limit reached
    MaxIterations,
    /// The next step left the domain of the NPV function
    Diverged,
    /// The series has no inflow or no outflow, so no rate can zero the NPV
    NoSignChange,
    /// NPV is negative at every non-negative rate, so the IRR is reported as 0%
    NegativeReturn,
}

impl IrrStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, IrrStatus::Converged)
    }
}

/// Result of an IRR solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrOutcome {
    /// Annual IRR in percent, floored at 0
    pub irr_pct: f64,
    /// Unclamped rate as a decimal, when the solver produced one
    pub raw_rate: Option<f64>,
    pub iterations: u32,
    pub status: IrrStatus,
}

impl IrrOutcome {
    fn from_rate(rate: f64, iterations: u32, status: IrrStatus) -> Self {
        Self {
            irr_pct: (rate * 100.0).max(0.0),
            raw_rate: Some(rate),
            iterations,
            status,
        }
    }

    fn floored(iterations: u32, status: IrrStatus) -> Self {
        Self {
            irr_pct: 0.0,
            raw_rate: None,
            iterations,
            status,
        }
    }
}

/// Solve for the IRR of yearly cash flows (`flows[0]` at time zero)
pub fn solve_irr(cash_flows: &[f64], settings: &IrrSettings) -> IrrOutcome {
    let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return IrrOutcome::floored(0, IrrStatus::NoSignChange);
    }

    // One sign change means NPV is decreasing in the rate, so a negative
    // undiscounted total puts the only root below zero.
    if sign_changes(cash_flows) == 1 && cash_flows[0] < 0.0 && cash_flows.iter().sum::<f64>() < 0.0 {
        return IrrOutcome::floored(0, IrrStatus::NegativeReturn);
    }

    let tolerance = settings.tolerance;
    let mut guess = settings.initial_guess;

    for iteration in 0..settings.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cash_flows, guess);

        if dnpv.abs() < tolerance {
            return settle_unconverged(cash_flows, guess, iteration, IrrStatus::FlatDerivative);
        }

        let next = guess - npv / dnpv;
        if !next.is_finite() || next <= -1.0 {
            log::warn!("IRR step left the valid range at iteration {}; last guess {:.6}", iteration, guess);
            return settle_unconverged(cash_flows, guess, iteration, IrrStatus::Diverged);
        }

        if (next - guess).abs() < tolerance {
            return IrrOutcome::from_rate(next, iteration + 1, IrrStatus::Converged);
        }

        guess = next;
    }

    log::warn!(
        "IRR did not converge within {} iterations; last guess {:.6}",
        settings.max_iterations,
        guess
    );
    settle_unconverged(cash_flows, guess, settings.max_iterations, IrrStatus::MaxIterations)
}

/// Resolve a Newton run that stopped early.
///
/// A root bracketed in [0, BRACKET_UPPER_RATE] wins over the last guess. With
/// no root there and a negative NPV at 0%, the NPV is negative at every rate
/// searched and the IRR is 0%.
fn settle_unconverged(cash_flows: &[f64], guess: f64, iterations: u32, status: IrrStatus) -> IrrOutcome {
    match bracket_root(cash_flows) {
        Some(rate) => {
            log::debug!("IRR recovered by bisection: {:.6}", rate);
            IrrOutcome::from_rate(rate, iterations, status)
        }
        None if npv_at_rate(cash_flows, 0.0) < 0.0 => {
            IrrOutcome::floored(iterations, IrrStatus::NegativeReturn)
        }
        None => IrrOutcome::from_rate(guess, iterations, status),
    }
}

/// Lowest non-negative root of the NPV, found by scanning for a sign change
/// and bisecting that interval
fn bracket_root(cash_flows: &[f64]) -> Option<f64> {
    let step = BRACKET_UPPER_RATE / BRACKET_STEPS as f64;
    let mut low = 0.0;
    let mut npv_low = npv_at_rate(cash_flows, low);

    for i in 1..=BRACKET_STEPS {
        if npv_low == 0.0 {
            return Some(low);
        }
        let high = step * i as f64;
        let npv_high = npv_at_rate(cash_flows, high);
        if npv_low * npv_high < 0.0 {
            return Some(bisect(cash_flows, low, high, npv_low));
        }
        low = high;
        npv_low = npv_high;
    }

    if npv_low == 0.0 {
        Some(low)
    } else {
        None
    }
}

fn bisect(cash_flows: &[f64], mut low: f64, mut high: f64, mut npv_low: f64) -> f64 {
    for _ in 0..BISECTION_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cash_flows, mid);

        if npv_mid == 0.0 || (high - low) / 2.0 < BISECTION_TOLERANCE {
            return mid;
        }

        if npv_low * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    (low + high) / 2.0
}

/// IRR in percent with the default settings
pub fn calculate_irr_pct(cash_flows: &[f64]) -> f64 {
    solve_irr(cash_flows, &IrrSettings::default()).irr_pct
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Calculate NPV at a given rate
pub fn npv_at_rate(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn sign_changes(cash_flows: &[f64]) -> usize {
    let signs: Vec<bool> = cash_flows
        .iter()
        .filter(|cf| **cf != 0.0)
        .map(|cf| *cf > 0.0)
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_period_irr() {
        // Invest 1000, receive 1100 a year later
        let outcome = solve_irr(&[-1000.0, 1100.0], &IrrSettings::default());
        assert!(outcome.status.is_converged());
        assert_abs_diff_eq!(outcome.irr_pct, 10.0, epsilon = 0.01);
    }

    #[test]
    fn test_two_period_irr() {
        let irr = calculate_irr_pct(&[-1000.0, 0.0, 1100.0]);
        assert_abs_diff_eq!(irr, 4.8809, epsilon = 0.01);
    }

    #[test]
    fn test_level_annuity() {
        // 1000 repaid by five payments of 263.80 is a 10% loan
        let flows = [-1000.0, 263.80, 263.80, 263.80, 263.80, 263.80];
        let outcome = solve_irr(&flows, &IrrSettings::default());
        assert_abs_diff_eq!(outcome.irr_pct, 10.0, epsilon = 0.01);
        assert_abs_diff_eq!(npv_at_rate(&flows, outcome.raw_rate.unwrap()), 0.0, epsilon = 0.5);
    }

    #[test]
    fn test_deterministic() {
        let flows = [-250_000.0, 24_941.0, 27_276.0, 29_681.0, 32_158.0, 400_000.0];
        let first = calculate_irr_pct(&flows);
        let second = calculate_irr_pct(&flows);
        assert_abs_diff_eq!(first, second, epsilon = 1e-4);
    }

    #[test]
    fn test_losing_investment_clamped_to_zero() {
        // NPV is negative at every non-negative rate
        let outcome = solve_irr(&[-1000.0, 100.0, 100.0], &IrrSettings::default());
        assert_eq!(outcome.irr_pct, 0.0);
        assert_eq!(outcome.status, IrrStatus::NegativeReturn);
    }

    #[test]
    fn test_all_outflows_is_zero() {
        let outcome = solve_irr(&[-1000.0, -100.0, -100.0], &IrrSettings::default());
        assert_eq!(outcome.irr_pct, 0.0);
        assert_eq!(outcome.status, IrrStatus::NoSignChange);
    }

    #[test]
    fn test_empty_series() {
        let outcome = solve_irr(&[], &IrrSettings::default());
        assert_eq!(outcome.irr_pct, 0.0);
    }

    #[test]
    fn test_iteration_limit_falls_back_to_bisection() {
        let settings = IrrSettings {
            max_iterations: 1,
            ..Default::default()
        };
        // Doubling over four years: 2^(1/4) - 1
        let outcome = solve_irr(&[-1000.0, 0.0, 0.0, 0.0, 2000.0], &settings);
        assert_eq!(outcome.status, IrrStatus::MaxIterations);
        assert_eq!(outcome.iterations, 1);
        assert_abs_diff_eq!(outcome.irr_pct, 18.9207115, epsilon = 1e-4);
    }

    #[test]
    fn test_npv_negative_everywhere_is_zero() {
        // Two sign changes and no real root: NPV peaks at -100
        let flows = [-1000.0, 3000.0, -2500.0];
        let outcome = solve_irr(&flows, &IrrSettings::default());
        assert_eq!(outcome.irr_pct, 0.0);
        assert_eq!(outcome.status, IrrStatus::NegativeReturn);
        assert_eq!(outcome.raw_rate, None);
    }

    #[test]
    fn test_bracket_root_finds_lowest_root() {
        // Roots at 15% and 25%
        let flows = [-1000.0, 2400.0, -1437.5];
        let rate = bracket_root(&flows).unwrap();
        assert_abs_diff_eq!(rate, 0.15, epsilon = 1e-8);
        assert_eq!(bracket_root(&[-1000.0, 3000.0, -2500.0]), None);
    }
}
