//! The claim under examination.

use serde::{Deserialize, Serialize};

use crate::classification::EpistemicState;
use crate::InvalidInputError;

/// A claim moving through the protocol.
///
/// The statement is fixed at construction. Everything else is filled in by
/// the protocol steps in order; `classification` and `confidence` stay
/// `None` until steps 5 and 6 have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    statement: String,
    sources: Vec<String>,
    coherence_score: Option<f64>,
    assumptions: Vec<String>,
    classification: Option<EpistemicState>,
    confidence: Option<f64>,
}

impl Claim {
    /// Create a claim. The statement must contain non-whitespace text.
    pub fn new(statement: impl Into<String>) -> Result<Self, InvalidInputError> {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(InvalidInputError::EmptyStatement);
        }

        Ok(Self {
            statement,
            sources: Vec::new(),
            coherence_score: None,
            assumptions: Vec::new(),
            classification: None,
            confidence: None,
        })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn coherence_score(&self) -> Option<f64> {
        self.coherence_score
    }

    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }

    pub fn classification(&self) -> Option<EpistemicState> {
        self.classification
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// True once steps 5 and 6 have both run.
    pub fn is_scored(&self) -> bool {
        self.classification.is_some() && self.confidence.is_some()
    }

    pub(crate) fn set_assumptions(&mut self, assumptions: Vec<String>) {
        self.assumptions = assumptions;
    }

    pub(crate) fn set_sources(&mut self, sources: Vec<String>) {
        self.sources = sources;
    }

    pub(crate) fn set_coherence(&mut self, coherence: f64) {
        self.coherence_score = Some(coherence);
    }

    pub(crate) fn set_classification(&mut self, state: EpistemicState) {
        self.classification = Some(state);
    }

    pub(crate) fn set_confidence(&mut self, confidence: f64) {
        self.confidence = Some(confidence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claim_is_unscored() {
        let claim = Claim::new("The sky is blue.").unwrap();
        assert_eq!(claim.statement(), "The sky is blue.");
        assert!(claim.sources().is_empty());
        assert_eq!(claim.coherence_score(), None);
        assert_eq!(claim.classification(), None);
        assert_eq!(claim.confidence(), None);
        assert!(!claim.is_scored());
    }

    #[test]
    fn test_blank_statement_rejected() {
        assert_eq!(Claim::new(""), Err(InvalidInputError::EmptyStatement));
        assert_eq!(Claim::new(" \n\t"), Err(InvalidInputError::EmptyStatement));
    }

    #[test]
    fn test_scored_after_both_fields() {
        let mut claim = Claim::new("x is y").unwrap();
        claim.set_classification(EpistemicState::Hyp);
        assert!(!claim.is_scored());
        claim.set_confidence(55.0);
        assert!(claim.is_scored());
    }
}
