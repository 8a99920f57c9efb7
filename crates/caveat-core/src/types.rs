//! Core types for contract risk analysis.
//!
//! These types are the data structures shared across the pipeline:
//! clauses, per-clause risk assessments, obligation tags, classification
//! and entity results, and the assembled report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Label used when no contract category scores a single keyword hit.
pub const UNKNOWN_CONTRACT_TYPE: &str = "Unknown";

/// Risk band for a clause or a whole contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    High,
    Medium,
    Low,
}

impl RiskLabel {
    /// Severity at or above which a clause is labeled High.
    pub const HIGH_THRESHOLD: f64 = 0.6;

    /// Severity at or above which a clause is labeled Medium.
    pub const MEDIUM_THRESHOLD: f64 = 0.25;

    /// Derive the label from a normalized severity in [0, 1].
    ///
    /// The mapping is exhaustive: at or above 0.6 is High, at or above
    /// 0.25 is Medium, everything below is Low.
    pub fn from_severity(severity: f64) -> Self {
        if severity >= Self::HIGH_THRESHOLD {
            RiskLabel::High
        } else if severity >= Self::MEDIUM_THRESHOLD {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }

    /// Contribution of this label to the composite score, before the
    /// final scaling to [0, 100].
    pub fn weight(&self) -> f64 {
        match self {
            RiskLabel::High => 1.0,
            RiskLabel::Medium => 0.5,
            RiskLabel::Low => 0.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::High => "High",
            RiskLabel::Medium => "Medium",
            RiskLabel::Low => "Low",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskLabel::High)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segmented unit of contract text.
///
/// Clauses are 1-indexed in appearance order and immutable once produced;
/// they live for a single analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clause {
    /// Position in the contract, starting at 1.
    pub index: usize,

    /// The trimmed clause text.
    pub text: String,
}

/// Result of scoring a single clause against the weighted pattern tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// Risk band derived from `severity` via the fixed thresholds.
    pub label: RiskLabel,

    /// Number of High-tier patterns that matched.
    pub high_hits: usize,

    /// Number of Medium-tier patterns that matched.
    pub medium_hits: usize,

    /// Number of Low-tier patterns that matched.
    pub low_hits: usize,

    /// Normalized severity in [0, 1], rounded to 3 decimals.
    pub severity: f64,
}

/// Semantic tag for a text unit, based on modal-verb pattern matching.
///
/// Tags are mutually exclusive. The tagger checks Prohibition before
/// Obligation before Right, and anything unmatched is Neutral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ObligationKind {
    Obligation,
    Prohibition,
    Right,
    Neutral,
}

impl ObligationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObligationKind::Obligation => "Obligation",
            ObligationKind::Prohibition => "Prohibition",
            ObligationKind::Right => "Right",
            ObligationKind::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text unit with its obligation tag and the patterns that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaggedUnit {
    /// The trimmed unit text.
    pub text: String,

    /// The winning tag.
    pub kind: ObligationKind,

    /// Identifiers of the matching patterns from the winning rule group.
    /// Empty for Neutral units.
    pub matches: Vec<String>,
}

/// Tagged units grouped by kind, preserving input order within each group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObligationSummary {
    pub obligations: Vec<String>,
    pub prohibitions: Vec<String>,
    pub rights: Vec<String>,
    pub neutral: Vec<String>,
}

impl ObligationSummary {
    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
            && self.prohibitions.is_empty()
            && self.rights.is_empty()
            && self.neutral.is_empty()
    }
}

/// Contract type decision plus the full per-category hit counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Winning category, or [`UNKNOWN_CONTRACT_TYPE`] when nothing matched.
    pub label: String,

    /// Raw keyword-hit count for every known category.
    pub counts: BTreeMap<String, usize>,
}

impl ClassificationResult {
    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_CONTRACT_TYPE
    }
}

/// Entities pulled from the raw text, grouped into four fixed categories.
///
/// Each list is de-duplicated and keeps first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EntitySet {
    pub parties: Vec<String>,
    pub dates: Vec<String>,
    pub amounts: Vec<String>,
    pub jurisdiction: Vec<String>,
}

impl EntitySet {
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
            && self.dates.is_empty()
            && self.amounts.is_empty()
            && self.jurisdiction.is_empty()
    }
}

/// Per-clause input to the composite scorer.
///
/// Callers may supply any of three shapes without pre-normalizing: a full
/// assessment, a bare severity number, or a raw label string. The untagged
/// serde representation accepts the same three JSON shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ClauseScore {
    /// A full per-clause assessment; its severity field is used.
    Assessment(RiskAssessment),

    /// A bare severity, or any caller-supplied number.
    Severity(f64),

    /// A label string; unrecognized labels contribute the Low weight.
    Label(String),
}

impl From<RiskAssessment> for ClauseScore {
    fn from(assessment: RiskAssessment) -> Self {
        ClauseScore::Assessment(assessment)
    }
}

impl From<f64> for ClauseScore {
    fn from(severity: f64) -> Self {
        ClauseScore::Severity(severity)
    }
}

impl From<RiskLabel> for ClauseScore {
    fn from(label: RiskLabel) -> Self {
        ClauseScore::Label(label.as_str().to_string())
    }
}

impl From<&str> for ClauseScore {
    fn from(label: &str) -> Self {
        ClauseScore::Label(label.to_string())
    }
}

impl From<String> for ClauseScore {
    fn from(label: String) -> Self {
        ClauseScore::Label(label)
    }
}

/// A clause with its risk assessment and optional advisory text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredClause {
    pub clause: Clause,

    pub assessment: RiskAssessment,

    /// Plain-language explanation, populated for the leading clauses up to
    /// [`ReportOptions::explained_clauses`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Suggested alternative wording, populated alongside `explanation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Host-tunable caps for report assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportOptions {
    /// Score at most this many clauses; unlimited when None.
    #[serde(default)]
    pub max_clauses: Option<usize>,

    /// Number of top-ranked sentences in the extractive summary.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Number of leading clauses that get explanation and suggestion text.
    #[serde(default = "default_explained_clauses")]
    pub explained_clauses: usize,
}

fn default_summary_sentences() -> usize {
    6
}

fn default_explained_clauses() -> usize {
    20
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_clauses: None,
            summary_sentences: default_summary_sentences(),
            explained_clauses: default_explained_clauses(),
        }
    }
}

/// Full analysis of one contract text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractReport {
    /// Best-guess contract type with per-category keyword counts.
    pub contract_type: ClassificationResult,

    /// Top-ranked summary sentences, highest score first.
    pub summary: Vec<String>,

    /// Parties, dates, amounts, and jurisdiction phrases from the raw text.
    pub entities: EntitySet,

    /// Scored clauses in appearance order.
    pub clauses: Vec<ScoredClause>,

    /// Tagged obligation units grouped by kind.
    pub obligations: ObligationSummary,

    /// Contract-level risk score in [0, 100].
    pub composite_score: f64,

    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

impl ContractReport {
    /// Contract-level risk band, derived from the composite score with the
    /// same thresholds used per clause.
    pub fn risk_label(&self) -> RiskLabel {
        RiskLabel::from_severity(self.composite_score / 100.0)
    }
}
