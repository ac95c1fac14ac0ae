//! Target-yield rent recommendation
//!
//! The required rent is found in one step: operating expenses are taken at
//! the input rent, not re-solved for the recommended rent. Maintenance and
//! management scale with rent, so the result slightly understates the rent
//! needed to actually hit the target yield.

use serde::{Deserialize, Serialize};

use crate::config::RentPremiums;
use crate::params::{ParameterSet, PropertyProfile, PropertyType};

/// A multiplicative premium applied to the base rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPremium {
    pub label: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRecommendation {
    pub target_net_yield_pct: f64,
    /// Annual rent needed for the target yield at the input expense structure
    pub required_annual_rent: f64,
    /// Monthly rent before premiums
    pub base_rent: f64,
    pub applied_premiums: Vec<AppliedPremium>,
    /// Monthly rent after premiums
    pub suggested_rent: f64,
    /// Suggested rent minus the input rent
    pub difference_from_current: f64,
}

pub struct RentRecommender<'a> {
    target_net_yield_pct: f64,
    premiums: &'a RentPremiums,
}

impl<'a> RentRecommender<'a> {
    pub fn new(target_net_yield_pct: f64, premiums: &'a RentPremiums) -> Self {
        Self {
            target_net_yield_pct,
            premiums,
        }
    }

    pub fn recommend(&self, params: &ParameterSet, property: &PropertyProfile) -> RentRecommendation {
        let annual_expenses = params.annual_expenses_at(params.monthly_rent, params.insurance_annual);
        let required_annual_rent = self.target_net_yield_pct / 100.0 * params.price + annual_expenses;
        let base_rent = required_annual_rent / 12.0;

        let applied_premiums = self.premiums_for(property);
        let suggested_rent = applied_premiums
            .iter()
            .fold(base_rent, |rent, premium| rent * premium.factor);

        RentRecommendation {
            target_net_yield_pct: self.target_net_yield_pct,
            required_annual_rent,
            base_rent,
            applied_premiums,
            suggested_rent,
            difference_from_current: suggested_rent - params.monthly_rent,
        }
    }

    fn premiums_for(&self, property: &PropertyProfile) -> Vec<AppliedPremium> {
        let mut applied = Vec::new();

        match property.property_type {
            PropertyType::Villa => applied.push(AppliedPremium {
                label: "Villa".to_string(),
                factor: self.premiums.villa,
            }),
            PropertyType::Penthouse => applied.push(AppliedPremium {
                label: "Penthouse".to_string(),
                factor: self.premiums.penthouse,
            }),
            _ => {}
        }

        if let Some(keyword) = self.matching_location(&property.area) {
            applied.push(AppliedPremium {
                label: format!("Premium location ({})", keyword),
                factor: self.premiums.premium_location,
            });
        }

        applied
    }

    fn matching_location(&self, area: &str) -> Option<&str> {
        let area = area.to_lowercase();
        if area.trim().is_empty() {
            return None;
        }
        self.premiums
            .premium_locations
            .iter()
            .find(|keyword| area.contains(&keyword.to_lowercase()))
            .map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn profile(property_type: PropertyType, area: &str) -> PropertyProfile {
        PropertyProfile {
            name: "Test".to_string(),
            property_type,
            area: area.to_string(),
        }
    }

    #[test]
    fn test_base_rent_for_target_yield() {
        let premiums = RentPremiums::default();
        let recommender = RentRecommender::new(6.0, &premiums);
        let rec = recommender.recommend(&ParameterSet::default(), &profile(PropertyType::Apartment, "JVC"));

        // 6% of 1,000,000 plus 13,700 of expenses, over twelve months
        assert_relative_eq!(rec.required_annual_rent, 73_700.0, max_relative = 1e-12);
        assert_relative_eq!(rec.base_rent, 6_141.666666666667, max_relative = 1e-12);
        assert!(rec.applied_premiums.is_empty());
        assert_eq!(rec.suggested_rent, rec.base_rent);
        assert_relative_eq!(rec.difference_from_current, 6_141.666666666667 - 8_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_premiums_stack_multiplicatively() {
        let premiums = RentPremiums::default();
        let recommender = RentRecommender::new(6.0, &premiums);
        let params = ParameterSet::default();

        let villa = recommender.recommend(&params, &profile(PropertyType::Villa, "Arabian Ranches"));
        assert_relative_eq!(villa.suggested_rent, villa.base_rent * 1.15, max_relative = 1e-12);

        let penthouse = recommender.recommend(&params, &profile(PropertyType::Penthouse, "Palm Jumeirah"));
        assert_eq!(penthouse.applied_premiums.len(), 2);
        assert_relative_eq!(penthouse.suggested_rent, penthouse.base_rent * 1.25 * 1.20, max_relative = 1e-12);
    }

    #[test]
    fn test_location_match_is_case_insensitive() {
        let premiums = RentPremiums::default();
        let recommender = RentRecommender::new(6.0, &premiums);
        let rec = recommender.recommend(
            &ParameterSet::default(),
            &profile(PropertyType::Apartment, "marina gate, dubai marina"),
        );

        assert_eq!(rec.applied_premiums.len(), 1);
        assert_eq!(rec.applied_premiums[0].label, "Premium location (Dubai Marina)");
    }

    #[test]
    fn test_expenses_taken_at_input_rent() {
        // Doubling the input rent raises the percentage-based expenses, and
        // therefore the recommendation, even though the target is unchanged.
        let premiums = RentPremiums::default();
        let recommender = RentRecommender::new(6.0, &premiums);
        let low = recommender.recommend(&ParameterSet::default(), &PropertyProfile::default());
        let high = recommender.recommend(
            &ParameterSet { monthly_rent: 16_000.0, ..Default::default() },
            &PropertyProfile::default(),
        );

        // 10% of the extra 8,000/month, annualised, spread back over twelve months
        assert_relative_eq!(high.base_rent - low.base_rent, 800.0, max_relative = 1e-9);
    }
}
