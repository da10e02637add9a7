//! Threshold classification into FACT / HYP / UNK.
//!
//! The rules are fixed, evaluated in this order:
//! 1. No sources, or coherence below 40 → UNK
//! 2. Coherence at least 85 (with a source) → FACT
//! 3. Otherwise → HYP
//!
//! UNK is checked first, so a highly coherent claim with nothing backing
//! it is still UNK.

mod state;
mod tracker;

pub use state::EpistemicState;
pub use tracker::{
    Classification, SelfTestEvaluation, StateTransition, TransitionError, LOW_COHERENCE_REASON,
    LOW_ESTIMATED_COHERENCE, UNCERTAINTY_REASON,
};

use crate::self_test::validate_coherence;
use crate::InvalidInputError;

/// Minimum coherence (inclusive) for FACT.
pub const FACT_MIN_COHERENCE: f64 = 85.0;

/// Coherence strictly below this is UNK.
pub const UNK_BELOW_COHERENCE: f64 = 40.0;

/// Sources required for anything above UNK.
pub const MIN_SOURCES: usize = 1;

/// Classify a claim from its source count and coherence score.
///
/// Coherence must already be within [0, 100]; anything else is rejected
/// rather than clamped.
pub fn classify(sources_count: usize, coherence_score: f64) -> Result<EpistemicState, InvalidInputError> {
    let coherence = validate_coherence(coherence_score)?;

    let state = if sources_count < MIN_SOURCES || coherence < UNK_BELOW_COHERENCE {
        EpistemicState::Unk
    } else if coherence >= FACT_MIN_COHERENCE {
        EpistemicState::Fact
    } else {
        EpistemicState::Hyp
    };

    tracing::trace!(sources_count, coherence, label = %state, "classified");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_at_threshold() {
        assert_eq!(classify(1, 85.0).unwrap(), EpistemicState::Fact);
        assert_eq!(classify(3, 100.0).unwrap(), EpistemicState::Fact);
    }

    #[test]
    fn test_just_below_fact_is_hyp() {
        assert_eq!(classify(2, 84.99).unwrap(), EpistemicState::Hyp);
    }

    #[test]
    fn test_unk_boundary_is_exclusive() {
        assert_eq!(classify(1, 40.0).unwrap(), EpistemicState::Hyp);
        assert_eq!(classify(1, 39.99).unwrap(), EpistemicState::Unk);
    }

    #[test]
    fn test_no_sources_takes_precedence() {
        assert_eq!(classify(0, 90.0).unwrap(), EpistemicState::Unk);
        assert_eq!(classify(0, 50.0).unwrap(), EpistemicState::Unk);
        assert_eq!(classify(0, 0.0).unwrap(), EpistemicState::Unk);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            classify(1, 150.0),
            Err(InvalidInputError::CoherenceOutOfRange(_))
        ));
        assert!(classify(1, -0.5).is_err());
        assert!(classify(1, f64::NAN).is_err());
    }
}
