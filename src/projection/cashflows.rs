//! Yearly projection rows and the series they form

use serde::{Deserialize, Serialize};

/// One projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,

    // Operating figures
    pub monthly_rent: f64,
    pub total_income: f64,
    pub annual_expenses: f64,
    pub annual_debt_service: f64,
    pub net_cash_flow: f64,

    // Balance sheet
    pub property_value: f64,
    pub remaining_debt: f64,
    pub equity: f64,

    // Returns
    pub cumulative_cash: f64,
    pub total_return_pct: f64,

    /// Net operating income over debt service; `f64::INFINITY` for a cash purchase
    #[serde(with = "unbounded_ratio")]
    pub dscr: f64,
}

impl YearlyProjection {
    pub fn net_operating_income(&self) -> f64 {
        self.total_income - self.annual_expenses
    }

    /// DSCR as an option, `None` when there is no debt service to cover
    pub fn dscr_defined(&self) -> Option<f64> {
        if self.dscr.is_finite() {
            Some(self.dscr)
        } else {
            None
        }
    }
}

/// Year-by-year projection output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub years: Vec<YearlyProjection>,
}

impl ProjectionSeries {
    pub fn new() -> Self {
        Self { years: Vec::new() }
    }

    pub fn add_year(&mut self, row: YearlyProjection) {
        self.years.push(row);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn final_year(&self) -> Option<&YearlyProjection> {
        self.years.last()
    }

    pub fn total_net_cash_flow(&self) -> f64 {
        self.years.iter().map(|r| r.net_cash_flow).sum()
    }

    /// Cash flows for the IRR: the initial investment as an outflow, each
    /// year's net cash flow, and the remaining equity received in the final
    /// year. Exit cap rate and selling costs are not applied to the sale.
    pub fn cash_flows(&self, total_investment: f64) -> Vec<f64> {
        let mut flows = Vec::with_capacity(self.years.len() + 1);
        flows.push(-total_investment);
        flows.extend(self.years.iter().map(|r| r.net_cash_flow));

        if let Some(last_year) = self.years.last() {
            if let Some(last_flow) = flows.last_mut() {
                *last_flow += last_year.equity;
            }
        }

        flows
    }
}

/// JSON has no infinity, so unbounded ratios are written as `null`
mod unbounded_ratio {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u32, net_cash_flow: f64, equity: f64) -> YearlyProjection {
        YearlyProjection {
            year,
            monthly_rent: 0.0,
            total_income: 0.0,
            annual_expenses: 0.0,
            annual_debt_service: 0.0,
            net_cash_flow,
            property_value: equity,
            remaining_debt: 0.0,
            equity,
            cumulative_cash: 0.0,
            total_return_pct: 0.0,
            dscr: f64::INFINITY,
        }
    }

    #[test]
    fn test_cash_flows_add_terminal_equity() {
        let mut series = ProjectionSeries::new();
        series.add_year(row(1, 100.0, 900.0));
        series.add_year(row(2, 120.0, 950.0));

        assert_eq!(series.cash_flows(500.0), vec![-500.0, 100.0, 1070.0]);
        assert_eq!(series.total_net_cash_flow(), 220.0);
    }

    #[test]
    fn test_empty_series_cash_flows() {
        let series = ProjectionSeries::new();
        assert_eq!(series.cash_flows(500.0), vec![-500.0]);
        assert!(series.final_year().is_none());
    }

    #[test]
    fn test_infinite_dscr_serializes_as_null() {
        let r = row(1, 100.0, 900.0);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["dscr"].is_null());
        assert_eq!(r.dscr_defined(), None);

        let back: YearlyProjection = serde_json::from_value(json).unwrap();
        assert!(back.dscr.is_infinite());
    }
}
