//! Lightweight entity extraction.
//!
//! Pulls parties, dates, monetary amounts, and jurisdiction mentions
//! out of contract text with anchored regular expressions. Matches are
//! deduplicated per field while preserving first-appearance order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::EntitySet;

lazy_static! {
    // "between X and Y" introduces the contracting parties.
    static ref PARTY_PATTERN: Regex =
        Regex::new(r"(?i)between\s+([^,\n]+?)\s+and\s+([^,\n]+?)(?:[.,\n]|$)").unwrap();

    // Numeric day/month/year, ISO, and month-name date forms.
    static ref DATE_PATTERN: Regex = Regex::new(
        r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b|\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2},?\s+\d{4}\b",
    )
    .unwrap();

    // Currency-code prefixed, symbol prefixed, and code suffixed
    // amounts. No \b before the symbol branch: currency symbols are
    // non-word characters, so a leading boundary would never match.
    static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:rs\.?|inr|usd|eur|gbp)\s?[0-9][0-9,]*(?:\.[0-9]{1,2})?\b|[$₹€£]\s?[0-9][0-9,]*(?:\.[0-9]{1,2})?\b|\b[0-9][0-9,]*(?:\.[0-9]{1,2})?\s?(?:inr|rs|usd|eur|gbp)\b",
    )
    .unwrap();

    static ref JURISDICTION_PATTERN: Regex =
        Regex::new(r"(?i)\b(governed by|jurisdiction of|subject to the laws of)\s+([^\n,.]+)")
            .unwrap();
}

/// Extract every recognized entity from `text`.
///
/// Fields are independent: a date inside a party name is still reported
/// as a date. Text without recognizable entities yields an empty set.
pub fn extract_entities(text: &str) -> EntitySet {
    let mut entities = EntitySet::default();

    for caps in PARTY_PATTERN.captures_iter(text) {
        for group in 1..=2 {
            if let Some(m) = caps.get(group) {
                push_unique(&mut entities.parties, m.as_str().trim());
            }
        }
    }
    for m in DATE_PATTERN.find_iter(text) {
        push_unique(&mut entities.dates, m.as_str());
    }
    for m in AMOUNT_PATTERN.find_iter(text) {
        push_unique(&mut entities.amounts, m.as_str());
    }
    for caps in JURISDICTION_PATTERN.captures_iter(text) {
        if let Some(m) = caps.get(2) {
            push_unique(&mut entities.jurisdiction, m.as_str().trim());
        }
    }

    entities
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
