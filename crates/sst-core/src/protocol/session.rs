//! Interactive deep-ask dialogue.
//!
//! A session walks the caller through four stages, one prompt at a time,
//! and only runs classification, scoring and reporting once the last
//! stage is answered. The session is a plain state object: it holds the
//! pending stage and advances only when [`DialogueSession::submit_answer`]
//! is called.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::orchestrator::{RunInput, SstProtocol};
use super::report::Report;
use crate::claim::Claim;
use crate::prompts::deep_ask::{format_questions, STAGE_PROMPTS, STAGE_QUESTIONS, STAGE_TITLES};
use crate::prompts::render;
use crate::self_test::{validate_coherence, SelfTest};
use crate::{InvalidInputError, SstError};

/// Errors from driving a dialogue session out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Dialogue is incomplete; pending stage: {pending_stage}")]
    Incomplete { pending_stage: DialogueStage },

    #[error("Dialogue is already complete")]
    AlreadyComplete,
}

/// The interactive stages, matching protocol steps 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStage {
    Clarify,
    Assumptions,
    Sources,
    Coherence,
}

impl DialogueStage {
    pub const ALL: [DialogueStage; 4] = [
        Self::Clarify,
        Self::Assumptions,
        Self::Sources,
        Self::Coherence,
    ];

    fn index(&self) -> usize {
        match self {
            Self::Clarify => 0,
            Self::Assumptions => 1,
            Self::Sources => 2,
            Self::Coherence => 3,
        }
    }

    /// Protocol step this stage refines.
    pub fn step_number(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn title(&self) -> &'static str {
        STAGE_TITLES[self.index()]
    }

    pub fn questions(&self) -> &'static [&'static str] {
        STAGE_QUESTIONS[self.index()]
    }
}

impl fmt::Display for DialogueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A prompt waiting for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPrompt {
    pub stage: DialogueStage,
    pub text: String,
    pub questions: Vec<String>,
}

/// One answered stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueExchange {
    pub stage: DialogueStage,
    pub answer: String,
}

/// Record of a finished dialogue, attached to its report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTranscript {
    pub original_statement: String,
    pub reformulated: bool,
    pub exchanges: Vec<DialogueExchange>,
}

/// A caller-driven deep-ask dialogue.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    protocol: SstProtocol,
    original_statement: String,
    statement: String,
    added_assumptions: Vec<String>,
    sources: Vec<String>,
    coherence_score: Option<f64>,
    pending: usize,
    exchanges: Vec<DialogueExchange>,
}

impl DialogueSession {
    pub(crate) fn new(protocol: SstProtocol, statement: &str) -> Result<Self, SstError> {
        let claim = Claim::new(statement)?;

        tracing::debug!(statement = claim.statement(), "dialogue session started");

        Ok(Self {
            protocol,
            original_statement: claim.statement().to_string(),
            statement: claim.statement().to_string(),
            added_assumptions: Vec::new(),
            sources: Vec::new(),
            coherence_score: None,
            pending: 0,
            exchanges: Vec::new(),
        })
    }

    /// Stage awaiting an answer, or `None` once all four are answered.
    pub fn pending_stage(&self) -> Option<DialogueStage> {
        DialogueStage::ALL.get(self.pending).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.pending_stage().is_none()
    }

    /// The statement as currently formulated.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn coherence_score(&self) -> Option<f64> {
        self.coherence_score
    }

    /// Extracted assumptions followed by those the caller added.
    pub fn assumptions(&self) -> Vec<String> {
        let mut assumptions = SelfTest::new().extract_assumptions(&self.statement);
        for extra in &self.added_assumptions {
            if !assumptions.contains(extra) {
                assumptions.push(extra.clone());
            }
        }
        assumptions
    }

    /// Questions for the pending stage.
    pub fn current_questions(&self) -> Vec<String> {
        self.pending_stage()
            .map(|stage| stage.questions().iter().map(|q| q.to_string()).collect())
            .unwrap_or_default()
    }

    /// The rendered prompt for the pending stage.
    pub fn current_prompt(&self) -> Option<SessionPrompt> {
        let stage = self.pending_stage()?;
        let assumptions = self.assumptions();

        let text = render(
            STAGE_PROMPTS[stage.index()],
            &[
                ("title", stage.title().to_string()),
                ("statement", self.statement.clone()),
                ("assumptions", join_or_none(&assumptions)),
                ("sources", join_or_none(&self.sources)),
                ("questions", format_questions(stage.questions())),
            ],
        );

        Some(SessionPrompt {
            stage,
            text,
            questions: self.current_questions(),
        })
    }

    /// Record an answer for the pending stage and return the next prompt.
    ///
    /// Returns `Ok(None)` when the last stage has been answered. An
    /// unusable coherence answer is rejected and the session stays on the
    /// coherence stage.
    pub fn submit_answer(&mut self, answer: &str) -> Result<Option<SessionPrompt>, SstError> {
        let stage = self.pending_stage().ok_or(SessionError::AlreadyComplete)?;

        match stage {
            DialogueStage::Clarify => {
                let reformulated = answer.trim();
                if !reformulated.is_empty() {
                    self.statement = reformulated.to_string();
                }
            }
            DialogueStage::Assumptions => {
                for line in non_blank_lines(answer) {
                    if !self.added_assumptions.contains(&line) {
                        self.added_assumptions.push(line);
                    }
                }
            }
            DialogueStage::Sources => {
                self.sources.extend(non_blank_lines(answer));
            }
            DialogueStage::Coherence => {
                let parsed: f64 = answer
                    .trim()
                    .trim_end_matches('%')
                    .parse()
                    .map_err(|_| InvalidInputError::InvalidCoherenceAnswer(answer.trim().to_string()))?;
                self.coherence_score = Some(validate_coherence(parsed)?);
            }
        }

        tracing::debug!(stage = %stage, "dialogue stage answered");
        self.exchanges.push(DialogueExchange {
            stage,
            answer: answer.to_string(),
        });
        self.pending += 1;

        Ok(self.current_prompt())
    }

    pub fn exchanges(&self) -> &[DialogueExchange] {
        &self.exchanges
    }

    /// Run steps 5-7 with the refined inputs.
    pub fn finish(self) -> Result<Report, SstError> {
        if let Some(pending_stage) = self.pending_stage() {
            return Err(SessionError::Incomplete { pending_stage }.into());
        }
        let coherence_score = self
            .coherence_score
            .ok_or(SessionError::Incomplete {
                pending_stage: DialogueStage::Coherence,
            })?;

        let transcript = DialogueTranscript {
            reformulated: self.statement != self.original_statement,
            original_statement: self.original_statement,
            exchanges: self.exchanges,
        };

        self.protocol.execute(RunInput {
            statement: self.statement,
            extra_assumptions: self.added_assumptions,
            sources: self.sources,
            coherence_score,
            dialogue: Some(transcript),
        })
    }
}

fn non_blank_lines(answer: &str) -> Vec<String> {
    answer
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::EpistemicState;
    use crate::prompts::Mode;

    fn session(statement: &str) -> DialogueSession {
        SstProtocol::with_mode(Mode::DeepAsk)
            .start_interactive_session(statement)
            .unwrap()
    }

    #[test]
    fn test_blank_statement_rejected() {
        let result = SstProtocol::with_mode(Mode::DeepAsk).start_interactive_session("");
        assert!(matches!(
            result,
            Err(SstError::InvalidInput(InvalidInputError::EmptyStatement))
        ));
    }

    #[test]
    fn test_prompts_follow_stage_order() {
        let mut s = session("The bridge can hold 40 tonnes.");
        assert_eq!(s.current_prompt().unwrap().stage, DialogueStage::Clarify);

        let next = s.submit_answer("").unwrap().unwrap();
        assert_eq!(next.stage, DialogueStage::Assumptions);
        assert!(next.text.contains("STEP 2: ASSUMPTION EXCAVATION"));

        let next = s.submit_answer("load is static").unwrap().unwrap();
        assert_eq!(next.stage, DialogueStage::Sources);

        let next = s.submit_answer("Engineering survey 2023").unwrap().unwrap();
        assert_eq!(next.stage, DialogueStage::Coherence);
        assert!(next.text.contains("STEP 4: COHERENCE EXAMINATION"));
        assert_eq!(s.sources(), ["Engineering survey 2023".to_string()]);

        assert_eq!(s.submit_answer("70").unwrap(), None);
        assert!(s.is_complete());
        assert!(s.current_questions().is_empty());
    }

    #[test]
    fn test_blank_clarification_keeps_statement() {
        let mut s = session("Rust is fast.");
        s.submit_answer("   ").unwrap();
        assert_eq!(s.statement(), "Rust is fast.");
    }

    #[test]
    fn test_reformulation_replaces_statement() {
        let mut s = session("Rust is fast.");
        s.submit_answer("Rust programs always run faster than Python programs.")
            .unwrap();
        assert_eq!(
            s.statement(),
            "Rust programs always run faster than Python programs."
        );
        assert_eq!(s.assumptions().len(), 1);
    }

    #[test]
    fn test_invalid_coherence_answer_keeps_stage() {
        let mut s = session("Rust is fast.");
        s.submit_answer("").unwrap();
        s.submit_answer("").unwrap();
        s.submit_answer("benchmarks game").unwrap();

        assert!(matches!(
            s.submit_answer("very"),
            Err(SstError::InvalidInput(InvalidInputError::InvalidCoherenceAnswer(_)))
        ));
        assert!(matches!(
            s.submit_answer("101"),
            Err(SstError::InvalidInput(InvalidInputError::CoherenceOutOfRange(_)))
        ));
        assert_eq!(s.pending_stage(), Some(DialogueStage::Coherence));

        s.submit_answer("88%").unwrap();
        assert_eq!(s.coherence_score(), Some(88.0));
    }

    #[test]
    fn test_finish_before_complete_fails() {
        let mut s = session("Rust is fast.");
        s.submit_answer("").unwrap();
        let err = s.finish().unwrap_err();
        assert!(matches!(
            err,
            SstError::Session(SessionError::Incomplete {
                pending_stage: DialogueStage::Assumptions
            })
        ));
    }

    #[test]
    fn test_submit_after_complete_fails() {
        let mut s = session("Rust is fast.");
        for answer in ["", "", "", "50"] {
            s.submit_answer(answer).unwrap();
        }
        assert!(matches!(
            s.submit_answer("more"),
            Err(SstError::Session(SessionError::AlreadyComplete))
        ));
    }

    #[test]
    fn test_finish_uses_refined_inputs() {
        let mut s = session("The bridge can hold 40 tonnes.");
        s.submit_answer("").unwrap();
        s.submit_answer("load is static\nsteel is not corroded").unwrap();
        s.submit_answer("Engineering survey 2023\n\nCity inspection report").unwrap();
        s.submit_answer("90").unwrap();

        let report = s.finish().unwrap();
        assert_eq!(report.mode, Mode::DeepAsk);
        assert_eq!(report.label(), EpistemicState::Fact);
        assert_eq!(report.confidence(), 83.0);
        assert_eq!(report.sources().len(), 2);
        assert_eq!(
            report.assumptions().to_vec(),
            vec!["load is static".to_string(), "steel is not corroded".to_string()]
        );

        let dialogue = report.dialogue.as_ref().unwrap();
        assert!(!dialogue.reformulated);
        assert_eq!(dialogue.exchanges.len(), 4);
        assert!(report.reasoning.contains("KEY ASSUMPTIONS IDENTIFIED"));
    }
}
