//! Caveat CLI
//!
//! Command-line interface for contract risk analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a contract file
//! caveat analyze --input lease.txt
//!
//! # Pipe from stdin, JSON report
//! cat lease.txt | caveat analyze --format json
//!
//! # Per-clause explanations and template alternatives
//! caveat analyze --input lease.txt --explain
//!
//! # Composite score from pre-computed clause scores
//! echo '["High", 0.4, "Low"]' | caveat score
//!
//! # Explain a single clause
//! echo 'The Supplier shall indemnify the Buyer.' | caveat explain
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Low risk
//! - 1: Medium risk
//! - 2: High risk
//! - 3: Error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use caveat_core::{composite, risk, summary, ClauseScore, ContractReport, ReportOptions, RiskLabel};

/// Caveat: contract risk analysis at the command line
#[derive(Parser)]
#[command(name = "caveat")]
#[command(version)]
#[command(about = "Analyze contracts for risky clauses and obligations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a contract and produce a full report
    Analyze {
        /// Path to the contract text (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Keep at most this many clauses in the report
        #[arg(long)]
        max_clauses: Option<usize>,

        /// Number of sentences in the extractive summary
        #[arg(long, default_value_t = 6)]
        summary_sentences: usize,

        /// Include per-clause explanations and suggested alternatives
        #[arg(long)]
        explain: bool,

        /// Explicit timestamp for deterministic reports (ISO 8601 / RFC 3339).
        /// Use for reproducible results in golden tests, audits, or debugging.
        /// Example: --analyzed-at 2025-12-20T00:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        analyzed_at: Option<DateTime<Utc>>,
    },

    /// Fold pre-computed clause scores into a composite score
    Score {
        /// Path to a JSON array of clause scores; entries may be labels,
        /// bare severities, or full assessments (reads from stdin if not
        /// provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Explain a single clause and suggest an alternative
    Explain {
        /// Path to the clause text (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse ISO 8601 / RFC 3339 datetime string to DateTime<Utc>.
/// Supports both "2025-12-20T00:00:00Z" and "2025-12-20T00:00:00+00:00" formats.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected ISO 8601/RFC 3339 (e.g., 2025-12-20T00:00:00Z)", e))
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            max_clauses,
            summary_sentences,
            explain,
            analyzed_at,
        } => analyze_command(
            input,
            format,
            max_clauses,
            summary_sentences,
            explain,
            analyzed_at,
        ),

        Commands::Score { input, format } => score_command(input, format),

        Commands::Explain { input, format } => explain_command(input, format),
    }
}

fn analyze_command(
    input: Option<PathBuf>,
    format: OutputFormat,
    max_clauses: Option<usize>,
    summary_sentences: usize,
    explain: bool,
    analyzed_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let text = read_input(input)?;
    tracing::debug!(bytes = text.len(), "read contract text");

    let options = ReportOptions {
        max_clauses,
        summary_sentences,
        explained_clauses: if explain { usize::MAX } else { 0 },
    };

    // Analyze with explicit timestamp if provided, otherwise use current time
    let report = match analyzed_at {
        Some(timestamp) => caveat_core::analyze_with_options_at(&text, &options, timestamp),
        None => caveat_core::analyze_with_options(&text, &options),
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_text_report(&report, explain);
        }
    }

    Ok(exit_code_for(report.risk_label()))
}

fn score_command(input: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let raw = read_input(input)?;
    let entries: Vec<ClauseScore> = serde_json::from_str(&raw)
        .context("Failed to parse clause scores as a JSON array")?;

    let scores: BTreeMap<usize, ClauseScore> = entries
        .into_iter()
        .enumerate()
        .map(|(i, score)| (i + 1, score))
        .collect();
    tracing::debug!(clauses = scores.len(), "folding clause scores");
    let composite = composite::contract_score(&scores);
    let label = RiskLabel::from_severity(composite / 100.0);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "composite_score": composite,
                "risk_label": label,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Composite score: {:.1}", composite);
            println!("Risk label: {}", label);
        }
    }

    Ok(exit_code_for(label))
}

fn explain_command(input: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let raw = read_input(input)?;
    let clause = raw.trim();

    let assessment = risk::score_clause(clause);
    let explanation = summary::explain_clause(clause);
    let suggestion = summary::suggest_alternative(clause);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "assessment": &assessment,
                "explanation": explanation,
                "suggestion": suggestion,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Risk: {} (severity {:.3})", assessment.label, assessment.severity);
            println!();
            println!("{}", explanation);
            println!();
            println!("Alternative: {}", suggestion);
        }
    }

    Ok(ExitCode::from(0))
}

fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input from {:?}", path)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn print_text_report(report: &ContractReport, explain: bool) {
    println!("Contract type: {}", report.contract_type.label);
    println!(
        "Composite score: {:.1} ({} risk)",
        report.composite_score,
        report.risk_label()
    );
    println!();

    if !report.summary.is_empty() {
        println!("Summary:");
        for sentence in &report.summary {
            println!("  - {}", truncate(sentence, 120));
        }
        println!();
    }

    if !report.entities.is_empty() {
        println!("Entities:");
        print_entity_list("Parties", &report.entities.parties);
        print_entity_list("Dates", &report.entities.dates);
        print_entity_list("Amounts", &report.entities.amounts);
        print_entity_list("Jurisdiction", &report.entities.jurisdiction);
        println!();
    }

    if !report.clauses.is_empty() {
        println!("Clauses:");
        for scored in &report.clauses {
            println!(
                "  {}. [{} {:.3}] {}",
                scored.clause.index,
                scored.assessment.label,
                scored.assessment.severity,
                truncate(&scored.clause.text, 100)
            );
            if explain {
                if let Some(explanation) = &scored.explanation {
                    println!("     {}", explanation);
                }
                if let Some(suggestion) = &scored.suggestion {
                    println!("     Alternative: {}", suggestion);
                }
            }
        }
        println!();
    }

    println!(
        "Obligations: {} | Prohibitions: {} | Rights: {} | Neutral: {}",
        report.obligations.obligations.len(),
        report.obligations.prohibitions.len(),
        report.obligations.rights.len(),
        report.obligations.neutral.len()
    );
}

fn print_entity_list(name: &str, values: &[String]) {
    if !values.is_empty() {
        println!("  {}: {}", name, values.join("; "));
    }
}

/// Collapse whitespace and cap the text at `max_chars` characters.
fn truncate(text: &str, max_chars: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= max_chars {
        normalized
    } else {
        let cut: String = normalized.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

fn exit_code_for(label: RiskLabel) -> ExitCode {
    match label {
        RiskLabel::Low => ExitCode::from(0),
        RiskLabel::Medium => ExitCode::from(1),
        RiskLabel::High => ExitCode::from(2),
    }
}
