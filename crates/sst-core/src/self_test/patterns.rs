//! Detection patterns for self-examination heuristics.
//!
//! All matching is case-insensitive and anchored on word boundaries so that
//! "all" does not fire inside "small" and "never" does not fire inside
//! "nevertheless".

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // CLAUSE / SENTENCE SEGMENTATION
    // =========================================================================

    /// Clause boundaries: hard punctuation, a period or comma followed by
    /// whitespace (so "2.5" survives), and coordinating conjunctions.
    pub static ref CLAUSE_BOUNDARY: Regex = Regex::new(
        r"(?i)[;:!?]+|[.,](?:\s+|$)|\s+(?:and|but|because|so|while|whereas|therefore)\s+"
    ).unwrap();

    /// A sentence with its terminating punctuation, if any.
    pub static ref SENTENCE: Regex = Regex::new(
        r"[^.!?]+(?:[.!?]+|$)"
    ).unwrap();

    // =========================================================================
    // ASSUMPTION INDICATORS
    // =========================================================================

    /// Universal quantifiers, modal necessity and explicit presupposition.
    pub static ref ASSUMPTION_PATTERN: Regex = Regex::new(
        r"(?i)\b(always|all|never|assum(?:e|es|ed|ing)|every(?:one|thing|body)?|none|no one|must|should|obviously|clearly|certainly|definitely|given that|provided that)\b"
    ).unwrap();

    // =========================================================================
    // UNCERTAINTY / HEDGING
    // =========================================================================

    pub static ref UNCERTAINTY_PATTERN: Regex = Regex::new(
        r"(?i)\b(might|may|could|perhaps|possibly|probably|seems?|appears?|suggests?|indicates?|uncertain|unknown|unclear|ambiguous|questionable)\b"
    ).unwrap();

    /// Hedging reduces how crisp (and therefore how testable) a claim is.
    pub static ref HEDGING_PATTERN: Regex = Regex::new(
        r"(?i)\b(some|many|few|often|sometimes|usually|generally|typically|tends to|in some cases)\b"
    ).unwrap();

    /// Vague quantities that fail the clarity check.
    pub static ref AMBIGUOUS_QUANTITY_PATTERN: Regex = Regex::new(
        r"(?i)\b(some|many|few|often|sometimes|usually)\b"
    ).unwrap();

    /// Copulas and locatives that mark a verifiable assertion.
    pub static ref TESTABLE_PATTERN: Regex = Regex::new(
        r"(?i)\b(is|are|was|were|has|have|at|in)\b"
    ).unwrap();

    // =========================================================================
    // CONTRADICTIONS
    // =========================================================================

    /// Word pairs whose co-occurrence suggests internal contradiction.
    pub static ref CONTRADICTORY_PAIRS: Vec<(&'static str, &'static str, Regex, Regex)> = [
        ("always", "never"),
        ("all", "none"),
        ("increase", "decrease"),
        ("more", "less"),
        ("true", "false"),
    ]
    .iter()
    .map(|(a, b)| (*a, *b, word(a), word(b)))
    .collect();

    // =========================================================================
    // SOURCE QUALITY
    // =========================================================================

    pub static ref ACADEMIC_SOURCE_PATTERN: Regex = Regex::new(
        r"(?i)\b(journal|universit(?:y|ies)|research|stud(?:y|ies)|handbook|database|institute|academy|proceedings|nist)\b"
    ).unwrap();
}

fn word(w: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w))).unwrap()
}

/// Check if text carries assumptive language.
pub fn contains_assumption_marker(text: &str) -> bool {
    ASSUMPTION_PATTERN.is_match(text)
}

/// Check if text carries uncertainty markers or is a question.
pub fn contains_uncertainty(text: &str) -> bool {
    text.contains('?') || UNCERTAINTY_PATTERN.is_match(text)
}

/// Number of hedging phrases in text.
pub fn count_hedges(text: &str) -> usize {
    HEDGING_PATTERN.find_iter(text).count()
}

/// Check if a source label looks academic or institutional.
pub fn is_academic_source(label: &str) -> bool {
    ACADEMIC_SOURCE_PATTERN.is_match(label)
}
