//! Clause risk scoring.
//!
//! Scores a single clause against three weighted keyword tiers and
//! collapses the result into a saturating `[0.0, 1.0]` severity. Weights
//! accumulate per tier hit:
//!
//! | Tier   | Examples                          | Weights |
//! |--------|-----------------------------------|---------|
//! | High   | indemnity, penalty, breach        | 2.0-4.0 |
//! | Medium | auto-renewal, non-compete         | 2.0     |
//! | Low    | notice period, payment, renewal   | 1.0     |
//!
//! The risk label is derived from severity alone, so enough low-tier
//! accumulation can still label a clause `High`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{RiskAssessment, RiskLabel};

/// Total accumulated weight at which severity saturates to 1.0.
pub const SEVERITY_SATURATION_WEIGHT: f64 = 6.0;

fn pattern(weight: f64, source: &str) -> (f64, Regex) {
    (weight, Regex::new(&format!("(?i){source}")).unwrap())
}

lazy_static! {
    // Stem forms so inflections count once per pattern: "indemnif"
    // covers indemnify, indemnified, indemnification.
    static ref HIGH_PATTERNS: Vec<(f64, Regex)> = vec![
        pattern(3.0, "indemnif"),
        pattern(3.0, "liabilit"),
        pattern(3.0, "penalt"),
        pattern(3.0, "forfeit"),
        pattern(3.0, "breach"),
        pattern(4.0, "unilateral termination"),
        pattern(3.0, "irrevoc"),
        pattern(2.0, "assign"),
        pattern(2.0, "security"),
        pattern(3.0, "default"),
        pattern(2.0, "guarantee"),
        pattern(3.0, "personal guarant"),
    ];

    static ref MEDIUM_PATTERNS: Vec<(f64, Regex)> = vec![
        pattern(2.0, "auto-?renew"),
        pattern(2.0, "lock-?in"),
        pattern(2.0, "non-?compete"),
        pattern(2.0, "confidential"),
        pattern(2.0, "arbitration"),
        pattern(2.0, "jurisdiction"),
        pattern(2.0, "late fee"),
        pattern(2.0, "pre-?payment"),
    ];

    static ref LOW_PATTERNS: Vec<(f64, Regex)> = vec![
        pattern(1.0, "notice period"),
        pattern(1.0, "renewal"),
        pattern(1.0, "payment"),
        pattern(1.0, "deliverable"),
        pattern(1.0, "performance"),
        pattern(1.0, "interest"),
        pattern(1.0, "repay"),
    ];
}

/// Score one clause.
///
/// Each pattern contributes its weight at most once regardless of how
/// many times it occurs in the clause. Severity is the accumulated
/// weight divided by [`SEVERITY_SATURATION_WEIGHT`], clamped to 1.0 and
/// rounded to three decimals; the label is read off the severity
/// thresholds.
pub fn score_clause(text: &str) -> RiskAssessment {
    let (high_hits, high_weight) = tier_hits(text, &HIGH_PATTERNS);
    let (medium_hits, medium_weight) = tier_hits(text, &MEDIUM_PATTERNS);
    let (low_hits, low_weight) = tier_hits(text, &LOW_PATTERNS);

    let total = high_weight + medium_weight + low_weight;
    let severity = round3((total / SEVERITY_SATURATION_WEIGHT).min(1.0));

    RiskAssessment {
        label: RiskLabel::from_severity(severity),
        high_hits,
        medium_hits,
        low_hits,
        severity,
    }
}

fn tier_hits(text: &str, patterns: &[(f64, Regex)]) -> (usize, f64) {
    let mut hits = 0;
    let mut weight = 0.0;
    for (w, re) in patterns {
        if re.is_match(text) {
            hits += 1;
            weight += w;
        }
    }
    (hits, weight)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_clause_scores_low() {
        let assessment = score_clause("The parties will meet quarterly to review progress.");

        assert_eq!(assessment.label, RiskLabel::Low);
        assert_eq!(assessment.high_hits, 0);
        assert_eq!(assessment.medium_hits, 0);
        assert_eq!(assessment.low_hits, 0);
        assert_eq!(assessment.severity, 0.0);
    }

    #[test]
    fn test_single_high_keyword() {
        let assessment = score_clause("The Supplier shall indemnify the Buyer against claims.");

        assert_eq!(assessment.high_hits, 1);
        assert_eq!(assessment.severity, 0.5);
        assert_eq!(assessment.label, RiskLabel::Medium);
    }

    #[test]
    fn test_unilateral_termination_alone_is_high() {
        let assessment = score_clause("Either party may effect unilateral termination at will.");

        // Weight 4.0 of 6.0 crosses the 0.6 threshold on its own.
        assert_eq!(assessment.severity, 0.667);
        assert_eq!(assessment.label, RiskLabel::High);
    }

    #[test]
    fn test_severity_saturates_at_one() {
        let assessment = score_clause(
            "Breach triggers a penalty, forfeiture of the deposit, and unlimited liability; \
             the defaulting party shall indemnify the other.",
        );

        assert!(assessment.high_hits >= 4);
        assert_eq!(assessment.severity, 1.0);
        assert_eq!(assessment.label, RiskLabel::High);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let once = score_clause("A penalty applies.");
        let thrice = score_clause("A penalty, another penalty, and a third penalty apply.");

        assert_eq!(once.high_hits, thrice.high_hits);
        assert_eq!(once.severity, thrice.severity);
    }

    #[test]
    fn test_low_tier_accumulation_can_reach_high_label() {
        let assessment = score_clause(
            "Payment of interest on renewal is a deliverable tied to performance; \
             the notice period lets the borrower repay early.",
        );

        assert_eq!(assessment.low_hits, 7);
        assert_eq!(assessment.high_hits, 0);
        assert_eq!(assessment.medium_hits, 0);
        assert_eq!(assessment.severity, 1.0);
        assert_eq!(assessment.label, RiskLabel::High);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lower = score_clause("the supplier shall indemnify the buyer.");
        let upper = score_clause("THE SUPPLIER SHALL INDEMNIFY THE BUYER.");

        assert_eq!(lower.high_hits, 1);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_hyphen_variants_match_medium_tier() {
        let hyphenated = score_clause("This lease shall auto-renew for one year.");
        let fused = score_clause("This lease shall autorenew for one year.");

        assert_eq!(hyphenated.medium_hits, 1);
        assert_eq!(fused.medium_hits, 1);
    }

    #[test]
    fn test_stemmed_patterns_cover_inflections() {
        for text in [
            "The Vendor indemnifies the Client.",
            "Indemnification is capped at fees paid.",
            "This licence is irrevocable.",
        ] {
            let assessment = score_clause(text);
            assert!(assessment.high_hits >= 1, "no high hit in {text:?}");
        }
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(RiskLabel::from_severity(0.0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_severity(0.249), RiskLabel::Low);
        assert_eq!(RiskLabel::from_severity(0.25), RiskLabel::Medium);
        assert_eq!(RiskLabel::from_severity(0.599), RiskLabel::Medium);
        assert_eq!(RiskLabel::from_severity(0.6), RiskLabel::High);
        assert_eq!(RiskLabel::from_severity(1.0), RiskLabel::High);
    }

    #[test]
    fn test_severity_is_rounded_to_three_decimals() {
        // One high hit of weight 2.0: 2/6 = 0.3333...
        let assessment = score_clause("The tenant may not assign the lease.");

        assert_eq!(assessment.severity, 0.333);
        assert_eq!(assessment.label, RiskLabel::Medium);
    }
}
