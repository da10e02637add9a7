//! The self-test analyzer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::patterns::{
    contains_assumption_marker, contains_uncertainty, count_hedges, CLAUSE_BOUNDARY,
    CONTRADICTORY_PAIRS, SENTENCE,
};
use crate::InvalidInputError;

/// Lowest accepted coherence score.
pub const MIN_COHERENCE: f64 = 0.0;

/// Highest accepted coherence score.
pub const MAX_COHERENCE: f64 = 100.0;

/// Statements longer than this earn a specificity bonus.
const SPECIFICITY_LENGTH: usize = 50;

/// Validate a caller-supplied coherence score.
pub fn validate_coherence(score: f64) -> Result<f64, InvalidInputError> {
    if score.is_nan() || !(MIN_COHERENCE..=MAX_COHERENCE).contains(&score) {
        return Err(InvalidInputError::CoherenceOutOfRange(score));
    }
    Ok(score)
}

/// A pair of words found together in one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub first: String,
    pub second: String,
}

/// Everything the analyzer can say about one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementAnalysis {
    pub statement: String,
    pub assumptions: Vec<String>,
    pub unknowns: Vec<String>,
    pub contradictions: Vec<Contradiction>,
    pub hedge_count: usize,
    /// Advisory heuristic coherence in [0, 100]
    pub estimated_coherence: f64,
    pub proposed_questions: Vec<String>,
}

impl StatementAnalysis {
    pub fn has_uncertainty(&self) -> bool {
        !self.unknowns.is_empty()
    }
}

/// Pattern-based self-examination of claims.
///
/// Stateless; every method is a pure function of its input.
pub struct SelfTest;

impl SelfTest {
    pub fn new() -> Self {
        Self
    }

    /// Extract clauses that carry implicit assumptions.
    ///
    /// The statement is split on clause boundaries and every clause holding
    /// a quantifier or modal keyword is kept, in order and without
    /// duplicates. Returns an empty list when nothing matches.
    pub fn extract_assumptions(&self, statement: &str) -> Vec<String> {
        let mut assumptions: Vec<String> = Vec::new();

        for clause in CLAUSE_BOUNDARY.split(statement) {
            let clause = clause.trim();
            if clause.is_empty() || !contains_assumption_marker(clause) {
                continue;
            }
            if !assumptions.iter().any(|a| a == clause) {
                tracing::trace!(clause, "assumption extracted");
                assumptions.push(clause.to_string());
            }
        }

        assumptions
    }

    /// Sentences that are questions or carry uncertainty markers.
    pub fn identify_unknowns(&self, statement: &str) -> Vec<String> {
        SENTENCE
            .find_iter(statement)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty() && contains_uncertainty(s))
            .map(|s| s.trim_end_matches(['.', '!']).to_string())
            .collect()
    }

    /// Contradictory word pairs that both occur in `text`.
    pub fn find_contradictions(&self, text: &str) -> Vec<Contradiction> {
        CONTRADICTORY_PAIRS
            .iter()
            .filter(|(_, _, first, second)| first.is_match(text) && second.is_match(text))
            .map(|(a, b, _, _)| Contradiction {
                first: a.to_string(),
                second: b.to_string(),
            })
            .collect()
    }

    /// Heuristic coherence estimate in [0, 100].
    ///
    /// Starts at 100; each hedge costs 10, each contradictory pair costs 30,
    /// and a statement longer than 50 characters earns 10 back.
    pub fn estimate_coherence(&self, statement: &str) -> f64 {
        if statement.trim().is_empty() {
            return MIN_COHERENCE;
        }

        let mut score = MAX_COHERENCE;
        score -= count_hedges(statement) as f64 * 10.0;
        score -= self.find_contradictions(statement).len() as f64 * 30.0;
        if statement.chars().count() > SPECIFICITY_LENGTH {
            score += 10.0;
        }

        score.clamp(MIN_COHERENCE, MAX_COHERENCE)
    }

    /// Socratic questions probing the given assumptions and unknowns.
    pub fn propose_questions(&self, assumptions: &[String], unknowns: &[String]) -> Vec<String> {
        let mut questions = Vec::with_capacity(assumptions.len() * 2 + unknowns.len());

        for assumption in assumptions {
            questions.push(format!("How do we know that {}?", assumption));
            questions.push(format!("What if it were not the case that {}?", assumption));
        }

        for unknown in unknowns {
            questions.push(format!(
                "What would clarify whether {}?",
                unknown.trim_end_matches('?')
            ));
        }

        questions
    }

    /// Order assumptions by their criteria score, highest first.
    ///
    /// Assumptions missing from `criteria` score 0. Ties keep their input
    /// order.
    pub fn establish_priorities(
        &self,
        assumptions: &[String],
        criteria: &HashMap<String, f64>,
    ) -> Vec<String> {
        let priority = |a: &String| criteria.get(a).copied().unwrap_or(0.0);
        let mut ordered = assumptions.to_vec();
        ordered.sort_by(|a, b| priority(b).total_cmp(&priority(a)));
        ordered
    }

    /// Run every heuristic on one statement.
    pub fn analyze(&self, statement: &str) -> StatementAnalysis {
        let assumptions = self.extract_assumptions(statement);
        let unknowns = self.identify_unknowns(statement);
        let proposed_questions = self.propose_questions(&assumptions, &unknowns);

        StatementAnalysis {
            statement: statement.to_string(),
            contradictions: self.find_contradictions(statement),
            hedge_count: count_hedges(statement),
            estimated_coherence: self.estimate_coherence(statement),
            assumptions,
            unknowns,
            proposed_questions,
        }
    }
}

impl Default for SelfTest {
    fn default() -> Self {
        Self::new()
    }
}
