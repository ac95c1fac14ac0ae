//! Analyse every scenario in a CSV file
//!
//! Runs the scenarios in parallel and prints one summary line per scenario,
//! or a JSON document with --json.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use property_forecast::params::load_scenarios_csv;
use property_forecast::{AnalysisConfig, ScenarioRunner};

#[derive(Parser)]
#[command(name = "run_batch", version, about = "Analyse a CSV of property scenarios")]
struct Args {
    /// Scenario CSV, one property per row
    #[arg(long)]
    input: PathBuf,

    /// Optional JSON configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BatchResponse {
    generated_at: chrono::DateTime<Utc>,
    scenario_count: usize,
    failed_count: usize,
    execution_time_ms: u64,
    results: Vec<ScenarioSummary>,
}

#[derive(Serialize, Default)]
struct ScenarioSummary {
    row: usize,
    name: String,
    total_investment: f64,
    monthly_payment: f64,
    year_one_cash_flow: f64,
    irr_pct: f64,
    score: u32,
    risk_level: String,
    suggested_rent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let start = Instant::now();
    let inputs = load_scenarios_csv(&args.input)
        .with_context(|| format!("Failed to load scenarios from {}", args.input.display()))?;
    log::info!("Loaded {} scenarios in {:?}", inputs.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(config);
    let results = runner.run_batch(&inputs);

    let summaries: Vec<ScenarioSummary> = inputs
        .iter()
        .zip(results)
        .enumerate()
        .map(|(idx, (input, result))| match result {
            Ok(report) => ScenarioSummary {
                row: idx + 1,
                name: input.property.name.clone(),
                total_investment: report.total_investment,
                monthly_payment: report.monthly_payment,
                year_one_cash_flow: report.series.first().map(|y| y.net_cash_flow).unwrap_or(0.0),
                irr_pct: report.irr_pct,
                score: report.score.total,
                risk_level: report.score.risk_level.as_str().to_string(),
                suggested_rent: report.suggested_rent,
                error: None,
            },
            Err(e) => ScenarioSummary {
                row: idx + 1,
                name: input.property.name.clone(),
                error: Some(e.to_string()),
                ..Default::default()
            },
        })
        .collect();

    let failed_count = summaries.iter().filter(|s| s.error.is_some()).count();
    let elapsed = start.elapsed();

    if args.json {
        let response = BatchResponse {
            generated_at: Utc::now(),
            scenario_count: summaries.len(),
            failed_count,
            execution_time_ms: elapsed.as_millis() as u64,
            results: summaries,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{:>4} {:<28} {:>14} {:>12} {:>14} {:>8} {:>6} {:<7} {:>12}",
        "Row", "Name", "Investment", "Payment", "Y1 Cash Flow", "IRR %", "Score", "Risk", "Sugg. Rent");
    println!("{}", "-".repeat(115));
    for s in &summaries {
        match &s.error {
            Some(e) => println!("{:>4} {:<28} ERROR: {}", s.row, s.name, e),
            None => println!("{:>4} {:<28} {:>14.2} {:>12.2} {:>14.2} {:>8.2} {:>6} {:<7} {:>12.2}",
                s.row,
                s.name,
                s.total_investment,
                s.monthly_payment,
                s.year_one_cash_flow,
                s.irr_pct,
                s.score,
                s.risk_level,
                s.suggested_rent,
            ),
        }
    }

    println!("\n{} scenarios ({} failed) in {:?}", summaries.len(), failed_count, elapsed);
    Ok(())
}
