//! Clause segmentation.
//!
//! Splits raw contract text into ordered, trimmed clause strings. The
//! primary pass cuts at heading markers anchored at line starts ("1.",
//! "2)", "Section 3", "Clause 4"), keeping each marker attached to the
//! text that follows it. Blocks are then divided at blank lines.
//! Markerless prose has no such boundaries and is kept whole; only
//! input the two passes reduce to nothing falls back to sentence
//! granularity.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Clause;

lazy_static! {
    // A heading marker opening a clause. Only meaningful right after a
    // newline; the same token in running text does not start a clause.
    static ref CLAUSE_MARKER: Regex =
        Regex::new(r"\n\s*((?:\d+[.)])|(?i:section|clause)\s+\d+)").unwrap();

    static ref BLANK_LINE: Regex = Regex::new(r"\n{2,}").unwrap();

    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Segment a contract into ordered, non-empty clauses.
///
/// Clauses are trimmed, 1-indexed, and preserve appearance order.
/// Markerless text without blank-line structure is kept whole as a
/// single clause. Empty or whitespace-only input yields an empty
/// sequence.
pub fn split_into_clauses(text: &str) -> Vec<Clause> {
    let mut parts: Vec<&str> = Vec::new();
    for block in split_at_markers(text) {
        for piece in BLANK_LINE.split(block) {
            let piece = piece.trim();
            if !piece.is_empty() {
                parts.push(piece);
            }
        }
    }

    // Nothing survived the marker and blank-line passes: fall back to
    // sentences.
    if parts.is_empty() {
        parts = split_sentences(text);
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Clause {
            index: i + 1,
            text: text.to_string(),
        })
        .collect()
}

/// Split `text` before each clause marker, keeping the marker with the
/// block it opens. Returns at least one block.
fn split_at_markers(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut last = 0;
    for caps in CLAUSE_MARKER.captures_iter(text) {
        if let Some(marker) = caps.get(1) {
            blocks.push(&text[last..marker.start()]);
            last = marker.start();
        }
    }
    blocks.push(&text[last..]);
    blocks
}

/// Split `text` into trimmed sentences at `.`, `!`, or `?` followed by
/// whitespace, keeping the punctuation with the preceding sentence.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    split_after(text, &SENTENCE_BOUNDARY)
}

/// Split `text` on `boundary` matches, cutting after the first byte of
/// each match so the boundary punctuation stays with the preceding piece.
/// Pieces are trimmed and empties dropped.
///
/// The boundary pattern must start with a single ASCII punctuation or
/// newline byte followed by whitespace.
pub(crate) fn split_after<'t>(text: &'t str, boundary: &Regex) -> Vec<&'t str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in boundary.find_iter(text) {
        let cut = m.start() + 1;
        let piece = text[last..cut].trim();
        if !piece.is_empty() {
            pieces.push(piece);
        }
        last = m.end();
    }
    let tail = text[last..].trim();
    if !tail.is_empty() {
        pieces.push(tail);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(clauses: &[Clause]) -> Vec<&str> {
        clauses.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_numbered_markers_split_clauses() {
        let text = "1. The Supplier shall deliver goods.\n2. The Buyer shall pay on time.\n3) Late payment accrues interest.";
        let clauses = split_into_clauses(text);

        assert_eq!(
            texts(&clauses),
            vec![
                "1. The Supplier shall deliver goods.",
                "2. The Buyer shall pay on time.",
                "3) Late payment accrues interest.",
            ]
        );
        assert_eq!(
            clauses.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_section_and_clause_headings_split_case_insensitively() {
        let text = "Section 1 Definitions\nTerms keep their stated meaning.\nSECTION 2 Term\nThe term is one year.\nclause 3 Payment\nFees are due monthly.";
        let clauses = split_into_clauses(text);

        assert_eq!(clauses.len(), 3);
        assert!(clauses[0].text.starts_with("Section 1"));
        assert!(clauses[1].text.starts_with("SECTION 2"));
        assert!(clauses[2].text.starts_with("clause 3"));
    }

    #[test]
    fn test_blank_lines_split_within_a_numbered_section() {
        let text = "1. Scope of work.\n\nThe Supplier shall deliver weekly reports.\n2. Payment terms.";
        let clauses = split_into_clauses(text);

        assert_eq!(
            texts(&clauses),
            vec![
                "1. Scope of work.",
                "The Supplier shall deliver weekly reports.",
                "2. Payment terms.",
            ]
        );
    }

    #[test]
    fn test_marker_in_running_text_does_not_split() {
        let text = "1. The fee is 1. 5 percent per annum.\n2. Payment is due monthly.";
        let clauses = split_into_clauses(text);

        assert_eq!(
            texts(&clauses),
            vec![
                "1. The fee is 1. 5 percent per annum.",
                "2. Payment is due monthly.",
            ]
        );
    }

    #[test]
    fn test_markerless_paragraph_stays_one_clause() {
        let text = "This Agreement is made between Acme Pvt Ltd and Zenith LLP. \
                    The Supplier shall deliver goods within 30 days. The Buyer may \
                    cancel the order. The Contractor must not assign this Agreement. \
                    The agreement is governed by the laws of India.";
        let clauses = split_into_clauses(text);

        assert_eq!(texts(&clauses), vec![text]);
    }

    #[test]
    fn test_single_numbered_clause_is_not_sentence_split() {
        let text = "1. The Supplier shall deliver goods. Defects must be reported.";
        let clauses = split_into_clauses(text);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, text);
    }

    #[test]
    fn test_unpunctuated_text_yields_the_whole_input() {
        let clauses = split_into_clauses("entire agreement of the parties");

        assert_eq!(texts(&clauses), vec!["entire agreement of the parties"]);
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_no_clauses() {
        assert!(split_into_clauses("").is_empty());
        assert!(split_into_clauses("   \n\n  \t ").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "1. First clause.\r\n2. Second clause.";
        let clauses = split_into_clauses(text);

        assert_eq!(texts(&clauses), vec!["1. First clause.", "2. Second clause."]);
    }

    #[test]
    fn test_clauses_are_trimmed_and_ordered() {
        let text = "  1. First.  \n\n\n   2. Second.   \n3. Third.";
        let clauses = split_into_clauses(text);

        for (i, clause) in clauses.iter().enumerate() {
            assert_eq!(clause.index, i + 1);
            assert_eq!(clause.text, clause.text.trim());
            assert!(!clause.text.is_empty());
        }
        assert_eq!(texts(&clauses), vec!["1. First.", "2. Second.", "3. Third."]);
    }

    #[test]
    fn test_split_after_keeps_punctuation_with_preceding_piece() {
        let boundary = Regex::new(r"[.;:\n]\s+").unwrap();
        let pieces = split_after("First item; second item: third item.\nFourth item", &boundary);

        assert_eq!(
            pieces,
            vec!["First item;", "second item:", "third item.", "Fourth item"]
        );
    }
}
