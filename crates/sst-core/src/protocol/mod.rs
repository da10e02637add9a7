//! The seven-step protocol, its report and the mode-specific extensions.

mod auto;
mod orchestrator;
mod report;
mod session;
mod steps;

pub use auto::{
    AssumptionInventory, AutoAnalysis, AutoAnalyzer, CoherenceChecks, CriterionCheck,
    SourceAssessment, SourceQuality, SourceRecommendation, StatementQuality,
};
pub use orchestrator::SstProtocol;
pub use report::Report;
pub use session::{
    DialogueExchange, DialogueSession, DialogueStage, DialogueTranscript, SessionError,
    SessionPrompt,
};
pub use steps::{
    limiting_factors, AssumptionStep, ClassificationStep, CoherenceStep, ConfidenceStep,
    FullAnalysis, SourceStep, StatementStep, Step,
};
