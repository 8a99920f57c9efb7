//! Composite contract scoring.
//!
//! Folds per-clause scores into a single `0.0..=100.0` figure. Input is
//! deliberately heterogeneous so callers can feed whatever they have:
//! full [`RiskAssessment`](crate::types::RiskAssessment)s, bare
//! severities, or just labels. Each entry
//! contributes a `[0.0, 1.0]` weight and the composite is the mean of
//! the contributions scaled to 100.

use std::collections::BTreeMap;

use crate::types::{ClauseScore, RiskLabel};

/// Contribution of a label that is none of `High`, `Medium`, or `Low`.
pub const UNKNOWN_LABEL_WEIGHT: f64 = 0.1;

/// Fold clause scores into a composite score, rounded to one decimal.
///
/// An empty map scores 0.0. Keys only fix the clause order; the mean is
/// unweighted.
pub fn contract_score(scores: &BTreeMap<usize, ClauseScore>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.values().map(contribution).sum();
    round1(total / scores.len() as f64 * 100.0)
}

/// Weight of a single clause score on the `[0.0, 1.0]` scale.
///
/// Assessments contribute their severity, numbers stand for themselves,
/// and labels are mapped through [`RiskLabel::weight`]. Non-finite
/// numbers contribute 0.0.
pub fn contribution(score: &ClauseScore) -> f64 {
    match score {
        ClauseScore::Assessment(assessment) => assessment.severity,
        ClauseScore::Severity(severity) if severity.is_finite() => *severity,
        ClauseScore::Severity(_) => 0.0,
        ClauseScore::Label(label) => label_weight(label),
    }
}

fn label_weight(label: &str) -> f64 {
    match label {
        "High" => RiskLabel::High.weight(),
        "Medium" => RiskLabel::Medium.weight(),
        "Low" => RiskLabel::Low.weight(),
        _ => UNKNOWN_LABEL_WEIGHT,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::score_clause;

    fn scores(entries: Vec<ClauseScore>) -> BTreeMap<usize, ClauseScore> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, score)| (i + 1, score))
            .collect()
    }

    #[test]
    fn test_empty_scores_yield_zero() {
        assert_eq!(contract_score(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_uniform_labels() {
        let high = scores(vec![ClauseScore::from("High"), ClauseScore::from("High")]);
        let medium = scores(vec![ClauseScore::from("Medium")]);
        let low = scores(vec![ClauseScore::from("Low"), ClauseScore::from("Low")]);

        assert_eq!(contract_score(&high), 100.0);
        assert_eq!(contract_score(&medium), 50.0);
        assert_eq!(contract_score(&low), 10.0);
    }

    #[test]
    fn test_unrecognized_label_contributes_low_weight() {
        let map = scores(vec![ClauseScore::from("Catastrophic")]);

        assert_eq!(contract_score(&map), 10.0);
    }

    #[test]
    fn test_mixed_score_shapes_average_together() {
        let assessment = score_clause("The Supplier shall indemnify the Buyer.");
        assert_eq!(assessment.severity, 0.5);

        let map = scores(vec![
            ClauseScore::from(RiskLabel::High),
            ClauseScore::from(0.45),
            ClauseScore::from(assessment),
        ]);

        // (1.0 + 0.45 + 0.5) / 3 * 100
        assert_eq!(contract_score(&map), 65.0);
    }

    #[test]
    fn test_non_finite_severity_contributes_zero() {
        let map = scores(vec![
            ClauseScore::from(f64::NAN),
            ClauseScore::from(f64::INFINITY),
            ClauseScore::from(RiskLabel::High),
        ]);

        // (0.0 + 0.0 + 1.0) / 3 * 100
        assert_eq!(contract_score(&map), 33.3);
    }

    #[test]
    fn test_composite_is_rounded_to_one_decimal() {
        let map = scores(vec![
            ClauseScore::from(RiskLabel::High),
            ClauseScore::from(RiskLabel::Medium),
            ClauseScore::from(RiskLabel::Low),
        ]);

        // (1.0 + 0.5 + 0.1) / 3 * 100 = 53.333...
        assert_eq!(contract_score(&map), 53.3);
    }

    #[test]
    fn test_heterogeneous_json_scores_deserialize() {
        let parsed: Vec<ClauseScore> = serde_json::from_str(
            r#"["High", 0.45, {"label": "Medium", "high_hits": 1, "medium_hits": 0, "low_hits": 0, "severity": 0.5}]"#,
        )
        .unwrap();

        assert_eq!(parsed[0], ClauseScore::from("High"));
        assert_eq!(parsed[1], ClauseScore::from(0.45));
        assert!(matches!(&parsed[2], ClauseScore::Assessment(a) if a.severity == 0.5));
    }

    #[test]
    fn test_keys_do_not_weight_the_mean() {
        let mut sparse = BTreeMap::new();
        sparse.insert(3, ClauseScore::from("High"));
        sparse.insert(90, ClauseScore::from("Low"));

        assert_eq!(contract_score(&sparse), 55.0);
    }
}
