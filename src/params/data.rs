//! Parameter set and property descriptors supplied by the input layer

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Longest loan term accepted by validation
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Property type, used for rent premiums and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Townhouse,
    Penthouse,
    Studio,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Penthouse => "Penthouse",
            PropertyType::Studio => "Studio",
        }
    }

    /// Parse the labels used in scenario files (case-insensitive)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "apartment" => Some(PropertyType::Apartment),
            "villa" => Some(PropertyType::Villa),
            "townhouse" => Some(PropertyType::Townhouse),
            "penthouse" => Some(PropertyType::Penthouse),
            "studio" => Some(PropertyType::Studio),
            _ => None,
        }
    }
}

/// Descriptive information about the property being analysed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PropertyProfile {
    /// Free-text name shown on reports
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub property_type: PropertyType,

    /// Area / community name, matched against premium-location keywords
    #[serde(default)]
    pub area: String,
}

/// Property and financing assumptions for one analysis
///
/// All percentage fields are expressed in percent (4.5 means 4.5%), and all
/// money fields in the same currency unit. Fixed monthly amounts are
/// `monthly_rent`, `additional_income` and `management_base_fee`; the
/// remaining expense amounts are annual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub price: f64,
    pub down_payment_pct: f64,
    pub loan_term_years: u32,
    pub interest_rate_pct: f64,

    pub monthly_rent: f64,
    #[serde(default)]
    pub additional_income: f64,
    #[serde(default)]
    pub vacancy_rate_pct: f64,

    #[serde(default)]
    pub maintenance_rate_pct: f64,
    #[serde(default)]
    pub management_fee_pct: f64,
    #[serde(default)]
    pub management_base_fee: f64,
    #[serde(default)]
    pub insurance_annual: f64,
    #[serde(default)]
    pub other_expenses_annual: f64,

    #[serde(default)]
    pub rent_growth_pct: f64,
    #[serde(default)]
    pub appreciation_rate_pct: f64,
    #[serde(default)]
    pub expense_inflation_pct: f64,

    /// Carried for display; not consumed by the projection or IRR
    #[serde(default)]
    pub exit_cap_rate_pct: f64,
    /// Carried for display; not consumed by the projection or IRR
    #[serde(default)]
    pub selling_costs_pct: f64,
    #[serde(default)]
    pub agent_fee_pct: f64,
    #[serde(default)]
    pub dld_fee_included: bool,
}

impl ParameterSet {
    /// Loan principal after the down payment
    pub fn loan_amount(&self) -> f64 {
        self.price * (1.0 - self.down_payment_pct / 100.0)
    }

    pub fn down_payment(&self) -> f64 {
        self.price - self.loan_amount()
    }

    pub fn agent_fee(&self) -> f64 {
        self.price * self.agent_fee_pct / 100.0
    }

    /// Land department transfer fee, charged only when included in the deal
    pub fn dld_fee(&self, dld_fee_pct: f64) -> f64 {
        if self.dld_fee_included {
            self.price * dld_fee_pct / 100.0
        } else {
            0.0
        }
    }

    /// Cash put in at acquisition: down payment plus transaction fees
    pub fn total_investment(&self, dld_fee_pct: f64) -> f64 {
        self.down_payment() + self.agent_fee() + self.dld_fee(dld_fee_pct)
    }

    /// Annual operating expenses at a given monthly rent and insurance amount.
    ///
    /// Maintenance and management scale with rent; the management base fee and
    /// other expenses are fixed amounts.
    pub fn annual_expenses_at(&self, monthly_rent: f64, insurance_annual: f64) -> f64 {
        monthly_rent * self.maintenance_rate_pct / 100.0 * 12.0
            + monthly_rent * self.management_fee_pct / 100.0 * 12.0
            + self.management_base_fee * 12.0
            + insurance_annual
            + self.other_expenses_annual
    }

    /// Annual income after vacancy at a given monthly rent
    pub fn annual_income_at(&self, monthly_rent: f64) -> f64 {
        let effective_rent = monthly_rent * (1.0 - self.vacancy_rate_pct / 100.0);
        effective_rent * 12.0 + self.additional_income * 12.0
    }

    /// Every floating-point field with its name, in declaration order
    pub fn numeric_fields(&self) -> [(&'static str, f64); 17] {
        [
            ("price", self.price),
            ("down_payment_pct", self.down_payment_pct),
            ("interest_rate_pct", self.interest_rate_pct),
            ("monthly_rent", self.monthly_rent),
            ("additional_income", self.additional_income),
            ("vacancy_rate_pct", self.vacancy_rate_pct),
            ("maintenance_rate_pct", self.maintenance_rate_pct),
            ("management_fee_pct", self.management_fee_pct),
            ("management_base_fee", self.management_base_fee),
            ("insurance_annual", self.insurance_annual),
            ("other_expenses_annual", self.other_expenses_annual),
            ("rent_growth_pct", self.rent_growth_pct),
            ("appreciation_rate_pct", self.appreciation_rate_pct),
            ("expense_inflation_pct", self.expense_inflation_pct),
            ("exit_cap_rate_pct", self.exit_cap_rate_pct),
            ("selling_costs_pct", self.selling_costs_pct),
            ("agent_fee_pct", self.agent_fee_pct),
        ]
    }

    /// Check the invariants the calculation core relies on
    pub fn validate(&self) -> AnalysisResult<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(AnalysisError::invalid(field, "must be a finite number"));
            }
        }

        if self.price <= 0.0 {
            return Err(AnalysisError::invalid("price", "must be greater than zero"));
        }
        if !(0.0..=100.0).contains(&self.down_payment_pct) {
            return Err(AnalysisError::invalid(
                "down_payment_pct",
                "must be between 0 and 100",
            ));
        }
        if self.loan_term_years == 0 || self.loan_term_years > MAX_LOAN_TERM_YEARS {
            return Err(AnalysisError::invalid(
                "loan_term_years",
                format!("must be between 1 and {}", MAX_LOAN_TERM_YEARS),
            ));
        }

        let rates = [
            ("interest_rate_pct", self.interest_rate_pct),
            ("vacancy_rate_pct", self.vacancy_rate_pct),
            ("maintenance_rate_pct", self.maintenance_rate_pct),
            ("management_fee_pct", self.management_fee_pct),
            ("rent_growth_pct", self.rent_growth_pct),
            ("appreciation_rate_pct", self.appreciation_rate_pct),
            ("expense_inflation_pct", self.expense_inflation_pct),
            ("exit_cap_rate_pct", self.exit_cap_rate_pct),
            ("selling_costs_pct", self.selling_costs_pct),
            ("agent_fee_pct", self.agent_fee_pct),
        ];
        for (field, value) in rates {
            if value < 0.0 {
                return Err(AnalysisError::invalid(field, "must not be negative"));
            }
        }

        Ok(())
    }
}

impl Default for ParameterSet {
    /// A mid-market leveraged apartment purchase
    fn default() -> Self {
        Self {
            price: 1_000_000.0,
            down_payment_pct: 25.0,
            loan_term_years: 25,
            interest_rate_pct: 4.5,
            monthly_rent: 8_000.0,
            additional_income: 0.0,
            vacancy_rate_pct: 10.0,
            maintenance_rate_pct: 2.0,
            management_fee_pct: 8.0,
            management_base_fee: 200.0,
            insurance_annual: 1_500.0,
            other_expenses_annual: 200.0,
            rent_growth_pct: 3.0,
            appreciation_rate_pct: 4.0,
            expense_inflation_pct: 2.5,
            exit_cap_rate_pct: 0.0,
            selling_costs_pct: 0.0,
            agent_fee_pct: 0.0,
            dld_fee_included: false,
        }
    }
}

/// Everything the presentation layer hands over for one "Analyze" action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisInput {
    #[serde(default)]
    pub property: PropertyProfile,
    pub params: ParameterSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_acquisition_amounts() {
        let params = ParameterSet {
            agent_fee_pct: 2.0,
            dld_fee_included: true,
            ..Default::default()
        };

        assert_relative_eq!(params.loan_amount(), 750_000.0);
        assert_relative_eq!(params.down_payment(), 250_000.0);
        assert_relative_eq!(params.agent_fee(), 20_000.0);
        assert_relative_eq!(params.dld_fee(4.0), 40_000.0);
        assert_relative_eq!(params.total_investment(4.0), 310_000.0);
    }

    #[test]
    fn test_dld_fee_excluded() {
        let params = ParameterSet::default();
        assert_eq!(params.dld_fee(4.0), 0.0);
        assert_relative_eq!(params.total_investment(4.0), 250_000.0);
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(ParameterSet::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let zero_price = ParameterSet { price: 0.0, ..Default::default() };
        assert!(matches!(
            zero_price.validate(),
            Err(AnalysisError::InvalidInput { ref field, .. }) if field == "price"
        ));

        let over_down = ParameterSet { down_payment_pct: 120.0, ..Default::default() };
        assert!(over_down.validate().is_err());

        let no_term = ParameterSet { loan_term_years: 0, ..Default::default() };
        assert!(no_term.validate().is_err());

        let endless_term = ParameterSet { loan_term_years: 400_000_000, ..Default::default() };
        assert!(matches!(
            endless_term.validate(),
            Err(AnalysisError::InvalidInput { ref field, .. }) if field == "loan_term_years"
        ));
        let longest = ParameterSet { loan_term_years: MAX_LOAN_TERM_YEARS, ..Default::default() };
        assert!(longest.validate().is_ok());

        let negative_rate = ParameterSet { vacancy_rate_pct: -1.0, ..Default::default() };
        assert!(negative_rate.validate().is_err());

        let nan_rent = ParameterSet { monthly_rent: f64::NAN, ..Default::default() };
        assert!(nan_rent.validate().is_err());
    }

    #[test]
    fn test_property_type_parse() {
        assert_eq!(PropertyType::parse("Villa"), Some(PropertyType::Villa));
        assert_eq!(PropertyType::parse(" penthouse "), Some(PropertyType::Penthouse));
        assert_eq!(PropertyType::parse("castle"), None);
    }
}
