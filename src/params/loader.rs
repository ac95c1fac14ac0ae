//! Load analysis inputs from JSON files and scenario CSV files
//!
//! A scenario CSV holds one analysis per row. Column headers follow the
//! labels of the input form (`Price`, `DownPaymentPct`, ...); optional
//! columns may be left blank.

use super::{AnalysisInput, ParameterSet, PropertyProfile, PropertyType};
use crate::error::{AnalysisError, AnalysisResult};
use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "PropertyType", default)]
    property_type: String,
    #[serde(rename = "Area", default)]
    area: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "DownPaymentPct")]
    down_payment_pct: f64,
    #[serde(rename = "LoanTermYears")]
    loan_term_years: u32,
    #[serde(rename = "InterestRatePct")]
    interest_rate_pct: f64,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "AdditionalIncome", default)]
    additional_income: Option<f64>,
    #[serde(rename = "VacancyRatePct", default)]
    vacancy_rate_pct: Option<f64>,
    #[serde(rename = "MaintenanceRatePct", default)]
    maintenance_rate_pct: Option<f64>,
    #[serde(rename = "ManagementFeePct", default)]
    management_fee_pct: Option<f64>,
    #[serde(rename = "ManagementBaseFee", default)]
    management_base_fee: Option<f64>,
    #[serde(rename = "InsuranceAnnual", default)]
    insurance_annual: Option<f64>,
    #[serde(rename = "OtherExpensesAnnual", default)]
    other_expenses_annual: Option<f64>,
    #[serde(rename = "RentGrowthPct", default)]
    rent_growth_pct: Option<f64>,
    #[serde(rename = "AppreciationRatePct", default)]
    appreciation_rate_pct: Option<f64>,
    #[serde(rename = "ExpenseInflationPct", default)]
    expense_inflation_pct: Option<f64>,
    #[serde(rename = "ExitCapRatePct", default)]
    exit_cap_rate_pct: Option<f64>,
    #[serde(rename = "SellingCostsPct", default)]
    selling_costs_pct: Option<f64>,
    #[serde(rename = "AgentFeePct", default)]
    agent_fee_pct: Option<f64>,
    #[serde(rename = "DldFeeIncluded", default)]
    dld_fee_included: String,
}

impl CsvRow {
    fn into_input(self) -> AnalysisResult<AnalysisInput> {
        let property_type = if self.property_type.trim().is_empty() {
            PropertyType::default()
        } else {
            PropertyType::parse(&self.property_type).ok_or_else(|| {
                AnalysisError::invalid(
                    "PropertyType",
                    format!("unknown property type: {}", self.property_type),
                )
            })?
        };

        let dld_fee_included = match self.dld_fee_included.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" | "n" => false,
            "1" | "true" | "yes" | "y" => true,
            other => {
                return Err(AnalysisError::invalid(
                    "DldFeeIncluded",
                    format!("expected a yes/no value, got: {}", other),
                ))
            }
        };

        let params = ParameterSet {
            price: self.price,
            down_payment_pct: self.down_payment_pct,
            loan_term_years: self.loan_term_years,
            interest_rate_pct: self.interest_rate_pct,
            monthly_rent: self.monthly_rent,
            additional_income: self.additional_income.unwrap_or(0.0),
            vacancy_rate_pct: self.vacancy_rate_pct.unwrap_or(0.0),
            maintenance_rate_pct: self.maintenance_rate_pct.unwrap_or(0.0),
            management_fee_pct: self.management_fee_pct.unwrap_or(0.0),
            management_base_fee: self.management_base_fee.unwrap_or(0.0),
            insurance_annual: self.insurance_annual.unwrap_or(0.0),
            other_expenses_annual: self.other_expenses_annual.unwrap_or(0.0),
            rent_growth_pct: self.rent_growth_pct.unwrap_or(0.0),
            appreciation_rate_pct: self.appreciation_rate_pct.unwrap_or(0.0),
            expense_inflation_pct: self.expense_inflation_pct.unwrap_or(0.0),
            exit_cap_rate_pct: self.exit_cap_rate_pct.unwrap_or(0.0),
            selling_costs_pct: self.selling_costs_pct.unwrap_or(0.0),
            agent_fee_pct: self.agent_fee_pct.unwrap_or(0.0),
            dld_fee_included,
        };

        Ok(AnalysisInput {
            property: PropertyProfile {
                name: self.name,
                property_type,
                area: self.area,
            },
            params,
        })
    }
}

/// Load a single analysis input from a JSON file
pub fn load_input_json(path: &Path) -> AnalysisResult<AnalysisInput> {
    let file = File::open(path)?;
    let input: AnalysisInput = serde_json::from_reader(file)?;
    Ok(input)
}

/// Load scenarios from a CSV file
pub fn load_scenarios_csv(path: &Path) -> AnalysisResult<Vec<AnalysisInput>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any CSV reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> AnalysisResult<Vec<AnalysisInput>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let input = row.into_input()?;
        input.params.validate().map_err(|e| match e {
            AnalysisError::InvalidInput { field, reason } => AnalysisError::InvalidInput {
                field: format!("row {}: {}", row_idx + 1, field),
                reason,
            },
            other => other,
        })?;
        inputs.push(input);
    }

    log::info!("Loaded {} scenarios", inputs.len());
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,PropertyType,Area,Price,DownPaymentPct,LoanTermYears,InterestRatePct,MonthlyRent,VacancyRatePct,DldFeeIncluded\n";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{}Marina flat,Apartment,Dubai Marina,1000000,25,25,4.5,8000,10,yes\nCash villa,Villa,Arabian Ranches,2500000,100,1,0,15000,,\n",
            HEADER
        );

        let inputs = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 2);

        assert_eq!(inputs[0].property.name, "Marina flat");
        assert_eq!(inputs[0].params.loan_term_years, 25);
        assert_eq!(inputs[0].params.vacancy_rate_pct, 10.0);
        assert!(inputs[0].params.dld_fee_included);

        assert_eq!(inputs[1].property.property_type, PropertyType::Villa);
        assert_eq!(inputs[1].params.vacancy_rate_pct, 0.0);
        assert!(!inputs[1].params.dld_fee_included);
    }

    #[test]
    fn test_unknown_property_type_rejected() {
        let data = format!("{}X,Castle,Somewhere,1000000,25,25,4.5,8000,10,no\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[test]
    fn test_invalid_row_reports_row_number() {
        let data = format!("{}X,Villa,Somewhere,0,25,25,4.5,8000,10,no\n", HEADER);
        match load_scenarios_from_reader(data.as_bytes()) {
            Err(AnalysisError::InvalidInput { field, .. }) => assert_eq!(field, "row 1: price"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = format!("{}X,Villa,Somewhere,abc,25,25,4.5,8000,10,no\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::Csv(_)));
    }
}
