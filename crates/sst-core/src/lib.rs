//! # sst-core
//!
//! Socratic Stress Test engine.
//!
//! Every claim passes through the same seven steps: formulate the
//! statement, extract its assumptions, attach sources, test coherence,
//! classify it as FACT, HYP or UNK, score confidence and assemble a
//! report. Three modes share the scoring and differ only in how the
//! report is phrased and what is attached to it:
//! - `basic`: direct questions
//! - `deep-ask`: a staged dialogue answered by a human
//! - `deep-auto`: an automated deep analysis appended to the report
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same inputs always produce the same report
//! 2. **Mode-independent scoring**: Mode never changes label or confidence
//! 3. **All or nothing**: Invalid input aborts a run before any report exists
//!
//! ## Example
//!
//! ```rust,ignore
//! use sst_core::{EpistemicState, SstProtocol};
//!
//! let protocol = SstProtocol::new("basic")?;
//! let report = protocol.run_full_protocol(
//!     "Water boils at 100°C at sea level.",
//!     ["CRC Handbook", "NIST"],
//!     90.0,
//! )?;
//!
//! assert_eq!(report.label(), EpistemicState::Fact);
//! assert_eq!(report.confidence(), 83.0);
//! ```

pub mod claim;
pub mod classification;
pub mod confidence;
pub mod config;
pub mod prompts;
pub mod protocol;
pub mod self_test;

// Re-export main types at crate root
pub use claim::Claim;
pub use classification::{
    classify, Classification, EpistemicState, SelfTestEvaluation, StateTransition, TransitionError,
};
pub use confidence::ConfidenceBreakdown;
pub use config::{ConfigError, ProtocolConfig};
pub use prompts::Mode;
pub use protocol::{
    AutoAnalysis, AutoAnalyzer, DialogueSession, DialogueStage, DialogueTranscript, FullAnalysis,
    Report, SessionError, SessionPrompt, SstProtocol, Step,
};
pub use self_test::{SelfTest, StatementAnalysis};

use thiserror::Error;

/// Rejected caller input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("Coherence score must be within 0-100, got {0}")]
    CoherenceOutOfRange(f64),

    #[error("Statement must not be empty")]
    EmptyStatement,

    #[error("Unsupported mode: {0} (expected basic, deep-ask or deep-auto)")]
    UnsupportedMode(String),

    #[error("Source quality weight must be within 0-1, got {0}")]
    InvalidSourceWeight(f64),

    #[error("Coherence answer is not a number: {0:?}")]
    InvalidCoherenceAnswer(String),

    #[error("Unknown epistemic state: {0}")]
    UnknownState(String),
}

/// Errors that can occur while running the protocol.
#[derive(Error, Debug)]
pub enum SstError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{operation} requires {required} mode, protocol is in {actual} mode")]
    ModeMismatch {
        operation: &'static str,
        required: Mode,
        actual: Mode,
    },
}

/// Run the full protocol in basic mode.
///
/// Shorthand for `SstProtocol::with_mode(Mode::Basic).run_full_protocol(..)`.
pub fn evaluate<I, S>(statement: &str, sources: I, coherence_score: f64) -> Result<Report, SstError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SstProtocol::with_mode(Mode::Basic).run_full_protocol(statement, sources, coherence_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_uses_basic_mode() {
        let report = evaluate("Water boils at 100°C at sea level.", ["NIST"], 90.0).unwrap();
        assert_eq!(report.mode, Mode::Basic);
        assert_eq!(report.label(), EpistemicState::Fact);
        assert_eq!(report.confidence(), 73.0);
    }

    #[test]
    fn test_error_messages() {
        let err: SstError = InvalidInputError::CoherenceOutOfRange(150.0).into();
        assert_eq!(
            err.to_string(),
            "Invalid input: Coherence score must be within 0-100, got 150"
        );

        let err = SstError::ModeMismatch {
            operation: "run_auto_analysis",
            required: Mode::DeepAuto,
            actual: Mode::Basic,
        };
        assert_eq!(
            err.to_string(),
            "run_auto_analysis requires deep-auto mode, protocol is in basic mode"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: SstError = ProtocolConfig::from_yaml("mode: socratic").unwrap_err().into();
        assert!(matches!(err, SstError::Config(ConfigError::SchemaError(_))));
    }
}
