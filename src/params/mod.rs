//! Parameter sets, property descriptors and input loading

mod data;
pub mod loader;

pub use data::{AnalysisInput, ParameterSet, PropertyProfile, PropertyType, MAX_LOAN_TERM_YEARS};
pub use loader::{load_input_json, load_scenarios_csv, load_scenarios_from_reader};
