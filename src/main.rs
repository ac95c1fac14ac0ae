//! Property Forecast CLI
//!
//! Command-line interface for analysing a single property

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use property_forecast::params::{load_input_json, MAX_LOAN_TERM_YEARS};
use property_forecast::projection::{amortize_year_detailed, monthly_payment};
use property_forecast::report::format_currency;
use property_forecast::{AnalysisConfig, Analyzer, ProjectionReport, YearlyProjection};

/// Rental property forecasts, IRR and investment scores
#[derive(Parser)]
#[command(name = "property_forecast", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one property from a JSON input file
    Analyze {
        /// Path to the JSON input (property + params)
        #[arg(long)]
        input: PathBuf,

        /// Optional JSON configuration overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Also write the yearly series to this CSV file
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Print a yearly amortization schedule for a loan
    Schedule {
        #[arg(long)]
        loan: f64,

        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,

        /// Term in years
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_LOAN_TERM_YEARS as i64))]
        years: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Csv,
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    generated_at: chrono::DateTime<Utc>,
    report: &'a ProjectionReport,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            output,
            csv_out,
        } => run_analyze(input, config, output, csv_out),
        Commands::Schedule { loan, rate, years } => {
            print_schedule(loan, rate, years);
            Ok(())
        }
    }
}

fn run_analyze(
    input_path: PathBuf,
    config_path: Option<PathBuf>,
    output: OutputFormat,
    csv_out: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AnalysisConfig::from_json_path(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let input = load_input_json(&input_path)
        .with_context(|| format!("Failed to load input from {}", input_path.display()))?;

    let report = Analyzer::new(config)
        .analyze(&input)
        .context("Analysis rejected the input")?;

    match output {
        OutputFormat::Json => {
            let envelope = JsonEnvelope {
                generated_at: Utc::now(),
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Table => print_report(&report),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            write_series(&mut writer, &report.series)?;
        }
    }

    if let Some(path) = csv_out {
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        write_series(&mut writer, &report.series)?;
        println!("\nYearly series written to: {}", path.display());
    }

    Ok(())
}

fn write_series<W: std::io::Write>(writer: &mut csv::Writer<W>, series: &[YearlyProjection]) -> Result<()> {
    for row in series {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_report(report: &ProjectionReport) {
    let title = if report.property.name.is_empty() {
        "Property"
    } else {
        report.property.name.as_str()
    };

    println!("{} ({}, {})", title, report.property.property_type.as_str(), report.property.area);
    println!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    println!("{}", "=".repeat(60));
    println!("  Price:            {}", format_currency(report.params.price));
    println!("  Total investment: {}", format_currency(report.total_investment));
    println!("  Loan amount:      {}", format_currency(report.loan_amount));
    println!("  Monthly payment:  {}", format_currency(report.monthly_payment));
    println!();

    println!("{:>4} {:>16} {:>16} {:>16} {:>16} {:>8} {:>10}",
        "Year", "Net CF", "Cumulative", "Debt", "Equity", "DSCR", "Return %");
    println!("{}", "-".repeat(92));
    for row in &report.series {
        let dscr = row
            .dscr_defined()
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "n/a".to_string());
        println!("{:>4} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>8} {:>10.2}",
            row.year,
            row.net_cash_flow,
            row.cumulative_cash,
            row.remaining_debt,
            row.equity,
            dscr,
            row.total_return_pct,
        );
    }

    println!();
    println!("IRR: {:.2}% ({:?})", report.irr_pct, report.irr_status);
    println!();

    println!("Score: {}/{} ({} risk)", report.score.total, report.score.max_total, report.score.risk_level.as_str());
    for category in &report.score.categories {
        println!("  {} {}/{}", category.category.label(), category.points, category.max_points);
        for item in &category.rationale {
            let mark = if item.passed { "+" } else { "-" };
            println!("    {} {}", mark, item.text);
        }
    }

    println!();
    let rec = &report.rent_recommendation;
    println!("Suggested rent: {} / month (target net yield {:.1}%)",
        format_currency(rec.suggested_rent), rec.target_net_yield_pct);
    println!("  Base rent:      {}", format_currency(rec.base_rent));
    for premium in &rec.applied_premiums {
        println!("  {} x{:.2}", premium.label, premium.factor);
    }
    println!("  vs current:     {}", format_currency(rec.difference_from_current));
}

fn print_schedule(loan: f64, rate: f64, years: u32) {
    let payment = monthly_payment(loan, rate, years);
    println!("Monthly payment: {}", format_currency(payment));
    println!("{:>4} {:>16} {:>16} {:>16} {:>16}", "Year", "Opening", "Interest", "Principal", "Closing");
    println!("{}", "-".repeat(72));

    let mut balance = loan;
    for year in 1..=years {
        let y = amortize_year_detailed(balance, payment, rate);
        println!("{:>4} {:>16.2} {:>16.2} {:>16.2} {:>16.2}",
            year, y.opening_balance, y.interest_paid, y.principal_paid, y.closing_balance);
        balance = y.closing_balance;
    }
}
