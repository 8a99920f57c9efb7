//! Contract type classification.
//!
//! Tallies category keyword hits over the lowercased text and picks the
//! highest-scoring category. Multi-word keywords count every substring
//! occurrence; single-word keywords match on word boundaries and count
//! at most once, so "rent" never fires inside "current". Ties go to the
//! category listed first, and a contract with no hits at all classifies
//! as [`UNKNOWN_CONTRACT_TYPE`].

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ClassificationResult, UNKNOWN_CONTRACT_TYPE};

lazy_static! {
    // Order doubles as tie-break priority.
    static ref CONTRACT_CATEGORIES: Vec<(&'static str, Vec<&'static str>)> = vec![
        (
            "Employment Agreement",
            vec![
                "employee",
                "employer",
                "salary",
                "probation",
                "notice period",
                "termination",
                "joining",
            ],
        ),
        (
            "Vendor/Procurement Contract",
            vec![
                "delivery",
                "supplier",
                "vendor",
                "purchase order",
                "invoice",
                "goods",
                "services provided",
            ],
        ),
        (
            "Lease Agreement",
            vec![
                "lease",
                "rent",
                "tenant",
                "landlord",
                "premises",
                "renewal",
                "security deposit",
            ],
        ),
        (
            "Partnership Deed",
            vec![
                "partners",
                "partnership",
                "profit share",
                "capital contribution",
                "partner",
            ],
        ),
        (
            "Service Agreement",
            vec![
                "service",
                "statement of work",
                "sow",
                "service level",
                "sla",
                "performance",
            ],
        ),
    ];

    // Word-boundary matchers for every single-word keyword above.
    static ref SINGLE_WORD_MATCHERS: HashMap<&'static str, Regex> = {
        let mut matchers = HashMap::new();
        for (_, keywords) in CONTRACT_CATEGORIES.iter() {
            for keyword in keywords {
                if !keyword.contains(' ') {
                    let re = Regex::new(&format!(r"\b{}\b", regex::escape(keyword))).unwrap();
                    matchers.insert(*keyword, re);
                }
            }
        }
        matchers
    };
}

/// Classify a contract by keyword evidence.
///
/// The returned counts cover every category, including those that
/// scored zero.
pub fn classify_contract(text: &str) -> ClassificationResult {
    let lower = text.to_lowercase();

    let mut counts = BTreeMap::new();
    let mut label = UNKNOWN_CONTRACT_TYPE;
    let mut best = 0;
    for (category, keywords) in CONTRACT_CATEGORIES.iter() {
        let count: usize = keywords.iter().map(|kw| keyword_hits(&lower, kw)).sum();
        if count > best {
            best = count;
            label = *category;
        }
        counts.insert((*category).to_string(), count);
    }

    ClassificationResult {
        label: label.to_string(),
        counts,
    }
}

fn keyword_hits(lower: &str, keyword: &str) -> usize {
    match SINGLE_WORD_MATCHERS.get(keyword) {
        Some(re) => usize::from(re.is_match(lower)),
        None => lower.matches(keyword).count(),
    }
}
