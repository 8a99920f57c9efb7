//! Deterministic contract risk analysis.
//!
//! `caveat-core` turns raw contract text into a structured
//! [`ContractReport`]: the contract type, an extractive summary, the
//! extracted entities, per-clause risk assessments with optional
//! explanations, an obligation breakdown, and a composite score on a
//! 0 to 100 scale.
//!
//! ## Key Guarantees
//!
//! - **Total.** Analysis never fails. Empty, unstructured, or
//!   non-contract text produces an empty but well-formed report.
//! - **Deterministic.** The same text, options, and timestamp always
//!   produce an identical report. No randomness, no I/O, no hidden
//!   state.
//! - **Ordered.** Clauses, summary sentences, entities, and obligation
//!   units preserve document order wherever ranking does not dictate
//!   otherwise.
//!
//! ```
//! use caveat_core::analyze;
//!
//! let report = analyze(
//!     "1. The Supplier shall indemnify the Buyer against claims.\n\
//!      2. Payment is due monthly.",
//! );
//! assert_eq!(report.clauses.len(), 2);
//! assert!(report.composite_score > 0.0);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

pub mod classify;
pub mod composite;
pub mod entities;
pub mod obligations;
pub mod risk;
pub mod segment;
pub mod summary;
pub mod types;

pub use types::{
    ClassificationResult, Clause, ClauseScore, ContractReport, EntitySet, ObligationKind,
    ObligationSummary, ReportOptions, RiskAssessment, RiskLabel, ScoredClause, TaggedUnit,
    UNKNOWN_CONTRACT_TYPE,
};

/// Analyze a contract with default options, timestamped now.
pub fn analyze(text: &str) -> ContractReport {
    analyze_with_options_at(text, &ReportOptions::default(), Utc::now())
}

/// Analyze a contract with default options and an explicit timestamp.
///
/// Reports produced with the same text and timestamp compare equal,
/// which makes this the entry point of choice for snapshot-style
/// comparisons.
pub fn analyze_at(text: &str, analyzed_at: DateTime<Utc>) -> ContractReport {
    analyze_with_options_at(text, &ReportOptions::default(), analyzed_at)
}

/// Analyze a contract with explicit options, timestamped now.
pub fn analyze_with_options(text: &str, options: &ReportOptions) -> ContractReport {
    analyze_with_options_at(text, options, Utc::now())
}

/// Analyze a contract.
///
/// Runs the full pipeline: classification, summarization, entity
/// extraction, and obligation tagging over the whole text, then clause
/// segmentation with per-clause risk scoring. The composite score is
/// folded from the per-clause risk labels.
///
/// # Arguments
///
/// * `text` - Raw contract text.
/// * `options` - Output shaping: clause cap, summary length, and how
///   many leading clauses receive explanations.
/// * `analyzed_at` - Timestamp recorded on the report.
///
/// # Returns
///
/// A fully populated [`ContractReport`]. This function has no failure
/// modes.
pub fn analyze_with_options_at(
    text: &str,
    options: &ReportOptions,
    analyzed_at: DateTime<Utc>,
) -> ContractReport {
    let contract_type = classify::classify_contract(text);
    let summary = summary::summarize_contract(text, options.summary_sentences);
    let entities = entities::extract_entities(text);
    let units = obligations::tag_obligations(text);
    let obligations = obligations::summarize_obligations(&units);

    let mut clauses = segment::split_into_clauses(text);
    if let Some(max) = options.max_clauses {
        clauses.truncate(max);
    }

    let clauses: Vec<ScoredClause> = clauses
        .into_iter()
        .map(|clause| {
            let assessment = risk::score_clause(&clause.text);
            let explain = clause.index <= options.explained_clauses;
            let explanation = explain.then(|| summary::explain_clause(&clause.text).to_string());
            let suggestion =
                explain.then(|| summary::suggest_alternative(&clause.text).to_string());
            ScoredClause {
                clause,
                assessment,
                explanation,
                suggestion,
            }
        })
        .collect();

    let scores: BTreeMap<usize, ClauseScore> = clauses
        .iter()
        .map(|scored| (scored.clause.index, ClauseScore::from(scored.assessment.label)))
        .collect();
    let composite_score = composite::contract_score(&scores);

    ContractReport {
        contract_type,
        summary,
        entities,
        clauses,
        obligations,
        composite_score,
        analyzed_at,
    }
}
