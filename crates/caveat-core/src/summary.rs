//! Extractive summarization and clause explanations.
//!
//! The summarizer ranks sentences by keyword hits plus a small length
//! bonus and returns the top few in rank order; ties keep document
//! order. Explanations and suggested alternatives come from a fixed
//! topic table checked in priority order, with generic fallbacks for
//! clauses that match no topic.

use crate::segment::split_sentences;

static SUMMARY_KEYWORDS: &[&str] = &[
    "termination",
    "indemnity",
    "penalty",
    "arbitration",
    "jurisdiction",
    "confidential",
    "renewal",
    "non-compete",
    "ip",
    "ownership",
];

struct ClauseTopic {
    markers: &'static [&'static str],
    /// When set, every marker must appear; otherwise any one suffices.
    requires_all: bool,
    explanation: &'static str,
    alternative: Option<&'static str>,
}

impl ClauseTopic {
    fn matches(&self, low: &str) -> bool {
        if self.requires_all {
            self.markers.iter().all(|marker| low.contains(marker))
        } else {
            self.markers.iter().any(|marker| low.contains(marker))
        }
    }
}

// Checked top to bottom; the first match wins.
static CLAUSE_TOPICS: &[ClauseTopic] = &[
    ClauseTopic {
        markers: &["indemn"],
        requires_all: false,
        explanation: "This clause requires one party to compensate the other for specified \
                      losses. Mitigation: Limit the scope, carve out indirect losses, and add \
                      a monetary cap with notice and defence rights.",
        alternative: Some(
            "The indemnifying party's liability is limited to direct damages and capped at \
             the total fees paid under this Agreement in the preceding 12 months. Indirect \
             or consequential losses are excluded.",
        ),
    },
    ClauseTopic {
        markers: &["non-compete", "non compete"],
        requires_all: false,
        explanation: "Restricts commercial activity after termination. Mitigation: Narrow the \
                      duration, geographic scope and restricted activities; prefer a \
                      non-solicit over a broad non-compete.",
        alternative: Some(
            "The restricted period shall not exceed 6 months and is limited to the agreed \
             territory; restrictions apply to direct competition only.",
        ),
    },
    ClauseTopic {
        markers: &["auto", "renew"],
        requires_all: true,
        explanation: "The contract renews automatically unless notice is given. Mitigation: \
                      Add a clear notice window and a maximum number of renewal terms.",
        alternative: Some(
            "The Agreement shall automatically renew for successive 1-year terms unless \
             either party provides 60 days' prior written notice of non-renewal.",
        ),
    },
    ClauseTopic {
        markers: &["termination"],
        requires_all: false,
        explanation: "Defines how the parties may end the agreement. Mitigation: Check notice \
                      periods, cure rights for breaches, and whether termination triggers \
                      penalties.",
        alternative: Some(
            "Either party may terminate for material breach if the breaching party fails to \
             remedy the breach within 30 days of written notice; termination does not \
             relieve accrued payment obligations.",
        ),
    },
    ClauseTopic {
        markers: &["confidential", "nda"],
        requires_all: false,
        explanation: "Protects confidential information. Mitigation: Keep the duration \
                      reasonable and carve out prior and independently developed information.",
        alternative: Some(
            "Confidential information shall be protected for 3 years post-termination; \
             obligations do not apply to information independently developed or publicly \
             available.",
        ),
    },
    ClauseTopic {
        markers: &["arbitrat", "jurisdiction"],
        requires_all: false,
        explanation: "Sets the dispute resolution forum and governing law. Mitigation: Check \
                      that the forum is neutral and whether arbitration is mandatory; \
                      consider carve-outs for injunctive relief.",
        alternative: None,
    },
];

static GENERIC_EXPLANATION: &str =
    "This clause sets obligations or rights. Mitigation: Clarify ambiguous terms, add \
     limits and timelines, and consider caps on liability.";

static GENERIC_ALTERNATIVE: &str =
    "No template suggestion available; consider clarifying obligations and adding limits \
     or timelines.";

/// Return up to `max_sentences` sentences ranked by keyword evidence.
///
/// Each sentence scores one point per summary keyword it contains plus
/// a length bonus of one point per 30 words, capped at two. Sentences
/// with equal scores keep their document order.
pub fn summarize_contract(text: &str, max_sentences: usize) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = split_sentences(text)
        .into_iter()
        .map(|sentence| (sentence_score(sentence), sentence))
        .collect();
    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    scored
        .into_iter()
        .take(max_sentences)
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}

fn sentence_score(sentence: &str) -> usize {
    let low = sentence.to_lowercase();
    let hits = SUMMARY_KEYWORDS
        .iter()
        .filter(|keyword| low.contains(*keyword))
        .count();
    hits + (sentence.split_whitespace().count() / 30).min(2)
}

/// Explain a clause in plain language, with mitigation advice.
pub fn explain_clause(clause: &str) -> &'static str {
    let low = clause.trim().to_lowercase();
    CLAUSE_TOPICS
        .iter()
        .find(|topic| topic.matches(&low))
        .map(|topic| topic.explanation)
        .unwrap_or(GENERIC_EXPLANATION)
}

/// Suggest a template alternative for a risky clause.
///
/// Falls back to a generic note when no topic with a template matches.
pub fn suggest_alternative(clause: &str) -> &'static str {
    let low = clause.trim().to_lowercase();
    CLAUSE_TOPICS
        .iter()
        .filter(|topic| topic.alternative.is_some())
        .find(|topic| topic.matches(&low))
        .and_then(|topic| topic.alternative)
        .unwrap_or(GENERIC_ALTERNATIVE)
}
