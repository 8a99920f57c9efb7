//! Obligation, prohibition, and right tagging.
//!
//! Splits text into sentence-like units and tags each unit with the
//! first rule group that matches. Prohibitions are checked before
//! obligations so "shall not" never degrades to a bare "shall", and
//! rights are checked last. A unit matching nothing is `Neutral`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::segment::split_after;
use crate::types::{ObligationKind, ObligationSummary, TaggedUnit};

fn rule(id: &'static str, source: &str) -> (&'static str, Regex) {
    (id, Regex::new(&format!(r"(?i)\b{source}\b")).unwrap())
}

lazy_static! {
    // Units end at sentence punctuation, semicolons, colons, or line
    // breaks, keeping the terminator with the unit.
    static ref UNIT_BOUNDARY: Regex = Regex::new(r"[.;:\n]\s+").unwrap();

    // Group order is match priority.
    static ref RULE_GROUPS: Vec<(ObligationKind, Vec<(&'static str, Regex)>)> = vec![
        (
            ObligationKind::Prohibition,
            vec![
                rule("shall not", "shall not"),
                rule("must not", "must not"),
                rule("prohibit", r"prohibit(?:ed|s)?"),
                rule("forbidden", "forbidden"),
                rule("may not", "may not"),
            ],
        ),
        (
            ObligationKind::Obligation,
            vec![
                rule("shall", "shall"),
                rule("must", "must"),
                rule("will", "will"),
                rule("is required to", "is required to"),
                rule("agrees to", "agrees to"),
                rule("undertakes to", "undertakes to"),
                rule("is obliged to", "is obliged to"),
            ],
        ),
        (
            ObligationKind::Right,
            vec![
                rule("is entitled to", "is entitled to"),
                rule("has the right to", "has the right to"),
                rule("may exercise", "may exercise"),
            ],
        ),
    ];
}

/// Split `text` into units and tag each one.
///
/// Units preserve appearance order and keep their terminating
/// punctuation. Empty input yields no units.
pub fn tag_obligations(text: &str) -> Vec<TaggedUnit> {
    split_after(text, &UNIT_BOUNDARY)
        .into_iter()
        .map(tag_unit)
        .collect()
}

/// Tag a single unit with the first rule group that matches it,
/// recording every matching rule id within that group.
fn tag_unit(text: &str) -> TaggedUnit {
    for (kind, rules) in RULE_GROUPS.iter() {
        let matches: Vec<String> = rules
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(id, _)| (*id).to_string())
            .collect();
        if !matches.is_empty() {
            return TaggedUnit {
                text: text.to_string(),
                kind: *kind,
                matches,
            };
        }
    }
    TaggedUnit {
        text: text.to_string(),
        kind: ObligationKind::Neutral,
        matches: Vec::new(),
    }
}

/// Bucket tagged units by kind, preserving unit order within each
/// bucket.
pub fn summarize_obligations(units: &[TaggedUnit]) -> ObligationSummary {
    let mut summary = ObligationSummary::default();
    for unit in units {
        let bucket = match unit.kind {
            ObligationKind::Obligation => &mut summary.obligations,
            ObligationKind::Prohibition => &mut summary.prohibitions,
            ObligationKind::Right => &mut summary.rights,
            ObligationKind::Neutral => &mut summary.neutral,
        };
        bucket.push(unit.text.clone());
    }
    summary
}
