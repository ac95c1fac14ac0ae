//! Scenario runner for batch analyses
//!
//! Holds one configuration and runs many inputs against it. Batches run in
//! parallel; each analysis is independent and shares no state.

use rayon::prelude::*;
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::params::{AnalysisInput, PropertyType};
use crate::report::{Analyzer, ProjectionReport};

/// Default number of reports `run_cached` keeps before starting over
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Exact identity of an input: the bit pattern of every numeric field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    property_type: PropertyType,
    area: String,
    numeric_bits: Vec<u64>,
    loan_term_years: u32,
    dld_fee_included: bool,
}

impl CacheKey {
    fn from_input(input: &AnalysisInput) -> Self {
        let params = &input.params;
        Self {
            name: input.property.name.clone(),
            property_type: input.property.property_type,
            area: input.property.area.clone(),
            numeric_bits: params
                .numeric_fields()
                .iter()
                .map(|(_, value)| value.to_bits())
                .collect(),
            loan_term_years: params.loan_term_years,
            dld_fee_included: params.dld_fee_included,
        }
    }
}

/// Runner with an optional memo of previously analysed inputs
///
/// # Example
/// ```ignore
/// let mut runner = ScenarioRunner::new();
///
/// for rate in [3.5, 4.5, 5.5] {
///     let mut input = base.clone();
///     input.params.interest_rate_pct = rate;
///     let report = runner.run_cached(&input)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    analyzer: Analyzer,
    cache: HashMap<CacheKey, ProjectionReport>,
    cache_capacity: usize,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            analyzer: Analyzer::new(config),
            cache: HashMap::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Limit the memo to `capacity` reports; it is emptied when full
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Run a single analysis, always recomputing
    pub fn run(&self, input: &AnalysisInput) -> AnalysisResult<ProjectionReport> {
        self.analyzer.analyze(input)
    }

    /// Run a single analysis, reusing the report for a bit-identical earlier input
    pub fn run_cached(&mut self, input: &AnalysisInput) -> AnalysisResult<ProjectionReport> {
        let key = CacheKey::from_input(input);
        if let Some(report) = self.cache.get(&key) {
            log::debug!("Cache hit for '{}'", input.property.name);
            return Ok(report.clone());
        }

        let report = self.analyzer.analyze(input)?;
        if self.cache_capacity == 0 {
            return Ok(report);
        }
        if self.cache.len() >= self.cache_capacity {
            log::debug!("Report cache full at {} entries; clearing", self.cache.len());
            self.cache.clear();
        }
        self.cache.insert(key, report.clone());
        Ok(report)
    }

    /// Run many inputs in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[AnalysisInput]) -> Vec<AnalysisResult<ProjectionReport>> {
        inputs
            .par_iter()
            .map(|input| self.analyzer.analyze(input))
            .collect()
    }

    /// Run one input under several configurations
    pub fn run_scenarios(
        &self,
        input: &AnalysisInput,
        configs: &[AnalysisConfig],
    ) -> Vec<AnalysisResult<ProjectionReport>> {
        configs
            .iter()
            .map(|config| Analyzer::new(config.clone()).analyze(input))
            .collect()
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.analyzer.config()
    }

    pub fn cached_reports(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
