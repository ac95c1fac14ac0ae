//! Amortization, yearly projection and IRR

mod amortization;
mod cashflows;
mod engine;
mod irr;
mod state;

pub use amortization::{amortize_year, amortize_year_detailed, monthly_payment, YearAmortization};
pub use cashflows::{ProjectionSeries, YearlyProjection};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use irr::{calculate_irr_pct, npv_at_rate, solve_irr, IrrOutcome, IrrSettings, IrrStatus};
pub use state::ProjectionState;
