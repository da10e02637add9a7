//! Stateful classification with transition history.
//!
//! The pure [`classify`](super::classify) function decides a state from
//! thresholds. `Classification` records how a claim moved between states:
//! every change keeps `from`, `to` and a reason, and downgrades keep their
//! reason separately so a report can cite them.
//!
//! [`Classification::evaluate_with_self_test`] drives the tracker from the
//! threshold classification and the self-test heuristics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{classify, EpistemicState};
use crate::self_test::{SelfTest, StatementAnalysis};
use crate::InvalidInputError;

/// Heuristic coherence below this triggers a downgrade.
pub const LOW_ESTIMATED_COHERENCE: f64 = 50.0;

pub const UNCERTAINTY_REASON: &str = "Contains uncertainty indicators";
pub const LOW_COHERENCE_REASON: &str = "Low coherence score";

/// Errors from state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Current state is not set")]
    Unset,
}

/// One recorded state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: EpistemicState,
    pub to: EpistemicState,
    pub reason: String,
}

/// Tracks the current epistemic state of a claim and how it got there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    current: Option<EpistemicState>,
    history: Vec<StateTransition>,
    downgrade_reasons: Vec<String>,
}

/// Outcome of [`Classification::evaluate_with_self_test`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfTestEvaluation {
    pub statement: String,
    pub coherence_score: f64,
    /// State from the source and coherence thresholds alone
    pub initial_state: EpistemicState,
    /// State after the self-test downgrades
    pub final_state: EpistemicState,
    pub history: Vec<StateTransition>,
    pub downgrade_reasons: Vec<String>,
    pub analysis: StatementAnalysis,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state directly.
    ///
    /// The first assignment is not a transition. Re-setting the same
    /// state records nothing.
    pub fn set_state(&mut self, state: EpistemicState, reason: impl Into<String>) {
        if let Some(previous) = self.current {
            if previous != state {
                self.history.push(StateTransition {
                    from: previous,
                    to: state,
                    reason: reason.into(),
                });
            }
        }
        self.current = Some(state);
    }

    /// Move one level down (FACT → HYP → UNK).
    pub fn downgrade(&mut self, reason: Option<&str>) -> Result<EpistemicState, TransitionError> {
        let previous = self.current.ok_or(TransitionError::Unset)?;
        Ok(self.downgrade_from(previous, reason))
    }

    fn downgrade_from(&mut self, previous: EpistemicState, reason: Option<&str>) -> EpistemicState {
        let next = previous.downgrade();

        if next != previous {
            self.history.push(StateTransition {
                from: previous,
                to: next,
                reason: reason.unwrap_or("downgrade").to_string(),
            });
            if let Some(reason) = reason {
                self.downgrade_reasons.push(reason.to_string());
            }
        }

        self.current = Some(next);
        next
    }

    /// Move one level up (UNK → HYP → FACT).
    pub fn upgrade(&mut self, reason: Option<&str>) -> Result<EpistemicState, TransitionError> {
        let previous = self.current.ok_or(TransitionError::Unset)?;
        let next = previous.upgrade();

        if next != previous {
            self.history.push(StateTransition {
                from: previous,
                to: next,
                reason: reason.unwrap_or("upgrade").to_string(),
            });
        }

        self.current = Some(next);
        Ok(next)
    }

    pub fn current(&self) -> Option<EpistemicState> {
        self.current
    }

    /// Numeric code of the current state.
    pub fn state_value(&self) -> Result<i8, TransitionError> {
        self.current.map(|s| s.code()).ok_or(TransitionError::Unset)
    }

    pub fn description(&self) -> &'static str {
        self.current
            .map(|s| s.description())
            .unwrap_or("Not yet classified")
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    pub fn downgrade_reasons(&self) -> &[String] {
        &self.downgrade_reasons
    }

    /// Classify a claim, then let the self-test pull the verdict down.
    ///
    /// The starting state comes from [`classify`]. Each of these then costs
    /// one level, in order:
    /// 1. the statement carries uncertainty markers or is a question
    /// 2. the heuristic coherence estimate is below 50
    ///
    /// A FACT is never left without sources: `classify` already answers UNK
    /// when there are none. Transitions accumulate on `self`, so the
    /// returned history includes any earlier ones.
    pub fn evaluate_with_self_test(
        &mut self,
        statement: &str,
        sources: &[String],
        coherence_score: f64,
    ) -> Result<SelfTestEvaluation, InvalidInputError> {
        if statement.trim().is_empty() {
            return Err(InvalidInputError::EmptyStatement);
        }

        let initial_state = classify(sources.len(), coherence_score)?;
        self.set_state(initial_state, "threshold classification");

        let analysis = SelfTest::new().analyze(statement);
        let mut state = initial_state;

        if analysis.has_uncertainty() {
            state = self.downgrade_from(state, Some(UNCERTAINTY_REASON));
        }
        if analysis.estimated_coherence < LOW_ESTIMATED_COHERENCE {
            state = self.downgrade_from(state, Some(LOW_COHERENCE_REASON));
        }

        tracing::debug!(
            initial = %initial_state,
            final_state = %state,
            downgrades = self.downgrade_reasons.len(),
            "self-test evaluation complete"
        );

        Ok(SelfTestEvaluation {
            statement: statement.to_string(),
            coherence_score,
            initial_state,
            final_state: state,
            history: self.history.clone(),
            downgrade_reasons: self.downgrade_reasons.clone(),
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_state_rejects_transitions() {
        let mut clf = Classification::new();
        assert_eq!(clf.downgrade(None), Err(TransitionError::Unset));
        assert_eq!(clf.upgrade(None), Err(TransitionError::Unset));
        assert_eq!(clf.state_value(), Err(TransitionError::Unset));
        assert_eq!(clf.description(), "Not yet classified");
    }

    #[test]
    fn test_first_set_is_not_a_transition() {
        let mut clf = Classification::new();
        clf.set_state(EpistemicState::Hyp, "initial");
        assert!(clf.history().is_empty());
        assert_eq!(clf.state_value(), Ok(0));
    }

    #[test]
    fn test_downgrade_records_reason() {
        let mut clf = Classification::new();
        clf.set_state(EpistemicState::Fact, "initial");

        let next = clf.downgrade(Some("Contains uncertainty indicators")).unwrap();
        assert_eq!(next, EpistemicState::Hyp);
        assert_eq!(clf.history().len(), 1);
        assert_eq!(clf.history()[0].from, EpistemicState::Fact);
        assert_eq!(clf.history()[0].to, EpistemicState::Hyp);
        assert_eq!(clf.downgrade_reasons(), ["Contains uncertainty indicators"]);
    }

    #[test]
    fn test_saturated_downgrade_records_nothing() {
        let mut clf = Classification::new();
        clf.set_state(EpistemicState::Unk, "initial");

        assert_eq!(clf.downgrade(Some("Low coherence")).unwrap(), EpistemicState::Unk);
        assert!(clf.history().is_empty());
        assert!(clf.downgrade_reasons().is_empty());
    }

    #[test]
    fn test_upgrade_path() {
        let mut clf = Classification::new();
        clf.set_state(EpistemicState::Unk, "initial");
        clf.upgrade(None).unwrap();
        clf.upgrade(Some("second source")).unwrap();

        assert_eq!(clf.current(), Some(EpistemicState::Fact));
        assert_eq!(clf.history().len(), 2);
        assert_eq!(clf.history()[0].reason, "upgrade");
        assert_eq!(clf.history()[1].reason, "second source");
        assert!(clf.downgrade_reasons().is_empty());
    }

    #[test]
    fn test_manual_set_records_change() {
        let mut clf = Classification::new();
        clf.set_state(EpistemicState::Hyp, "initial");
        clf.set_state(EpistemicState::Hyp, "same");
        clf.set_state(EpistemicState::Fact, "manual_set");

        assert_eq!(clf.history().len(), 1);
        assert_eq!(clf.history()[0].reason, "manual_set");
    }

    fn sources(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_self_test_keeps_clean_fact() {
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("Water boils at 100°C at sea level.", &sources(&["NIST", "CRC"]), 90.0)
            .unwrap();

        assert_eq!(eval.initial_state, EpistemicState::Fact);
        assert_eq!(eval.final_state, EpistemicState::Fact);
        assert!(eval.history.is_empty());
        assert!(eval.downgrade_reasons.is_empty());
        assert_eq!(clf.current(), Some(EpistemicState::Fact));
    }

    #[test]
    fn test_uncertainty_downgrades_one_level() {
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("Coffee might improve focus.", &sources(&["Trial"]), 90.0)
            .unwrap();

        assert_eq!(eval.initial_state, EpistemicState::Fact);
        assert_eq!(eval.final_state, EpistemicState::Hyp);
        assert_eq!(eval.downgrade_reasons, vec![UNCERTAINTY_REASON.to_string()]);
        assert_eq!(eval.history.len(), 1);
        assert_eq!(eval.history[0].reason, UNCERTAINTY_REASON);
    }

    #[test]
    fn test_low_estimated_coherence_downgrades() {
        // three hedges, one contradictory pair: 100 - 30 - 30 = 40
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("Some always, never, often, usually.", &sources(&["Survey"]), 90.0)
            .unwrap();

        assert_eq!(eval.analysis.estimated_coherence, 40.0);
        assert_eq!(eval.final_state, EpistemicState::Hyp);
        assert_eq!(eval.downgrade_reasons, vec![LOW_COHERENCE_REASON.to_string()]);
    }

    #[test]
    fn test_downgrades_stack_in_order() {
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("Some always, never, often, usually?", &sources(&["Survey"]), 90.0)
            .unwrap();

        assert_eq!(eval.final_state, EpistemicState::Unk);
        assert_eq!(
            eval.downgrade_reasons,
            vec![UNCERTAINTY_REASON.to_string(), LOW_COHERENCE_REASON.to_string()]
        );
        assert_eq!(clf.state_value(), Ok(-1));
    }

    #[test]
    fn test_unsourced_claim_saturates_at_unknown() {
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("It might rain tomorrow.", &[], 95.0)
            .unwrap();

        assert_eq!(eval.initial_state, EpistemicState::Unk);
        assert_eq!(eval.final_state, EpistemicState::Unk);
        assert!(eval.history.is_empty());
        assert!(eval.downgrade_reasons.is_empty());
    }

    #[test]
    fn test_self_test_rejects_invalid_input() {
        let mut clf = Classification::new();
        assert_eq!(
            clf.evaluate_with_self_test("  ", &sources(&["NIST"]), 90.0),
            Err(InvalidInputError::EmptyStatement)
        );
        assert!(matches!(
            clf.evaluate_with_self_test("Cats are mammals", &sources(&["NIST"]), 150.0),
            Err(InvalidInputError::CoherenceOutOfRange(_))
        ));
        assert_eq!(clf.current(), None);
    }

    #[test]
    fn test_self_test_serializes_history() {
        let mut clf = Classification::new();
        let eval = clf
            .evaluate_with_self_test("Coffee might improve focus.", &sources(&["Trial"]), 90.0)
            .unwrap();
        let value = serde_json::to_value(&eval).unwrap();

        assert_eq!(value["final_state"], "HYP");
        assert_eq!(value["history"][0]["from"], "FACT");
        assert_eq!(value["downgrade_reasons"][0], UNCERTAINTY_REASON);
    }
}
