//! The seven-step protocol orchestrator.
//!
//! Steps run strictly in order against one [`Claim`]:
//! 1. Formulate statement
//! 2. Extract assumptions
//! 3. Attach sources
//! 4. Test coherence
//! 5. Classify
//! 6. Score confidence
//! 7. Assemble report
//!
//! A failure in steps 1-4 aborts the run; no partial report exists.

use crate::claim::Claim;
use crate::classification::classify;
use crate::config::ProtocolConfig;
use crate::confidence::{breakdown, DEFAULT_SOURCE_QUALITY_WEIGHT};
use crate::prompts::{render, Mode, TemplateSet};
use crate::self_test::{validate_coherence, SelfTest};
use crate::SstError;

use super::auto::{AutoAnalysis, AutoAnalyzer};
use super::report::Report;
use super::session::{DialogueSession, DialogueTranscript};
use super::steps::{
    limiting_factors, AssumptionStep, ClassificationStep, CoherenceStep, ConfidenceStep,
    FullAnalysis, SourceStep, StatementStep, Step,
};

/// Inputs to one run after any dialogue refinement.
pub(crate) struct RunInput {
    pub statement: String,
    pub extra_assumptions: Vec<String>,
    pub sources: Vec<String>,
    pub coherence_score: f64,
    pub dialogue: Option<DialogueTranscript>,
}

/// Runs the Socratic Stress Test protocol in one mode.
///
/// Holds only its configuration; every run is independent.
#[derive(Debug, Clone)]
pub struct SstProtocol {
    mode: Mode,
    source_quality_weight: f64,
}

impl SstProtocol {
    /// Create a protocol from a mode name: `basic`, `deep-ask` or `deep-auto`.
    pub fn new(mode: &str) -> Result<Self, SstError> {
        let mode: Mode = mode.parse()?;
        Ok(Self::with_mode(mode))
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            source_quality_weight: DEFAULT_SOURCE_QUALITY_WEIGHT,
        }
    }

    pub fn from_config(config: &ProtocolConfig) -> Result<Self, SstError> {
        config.validate()?;
        Ok(Self {
            mode: config.mode,
            source_quality_weight: config.source_quality_weight,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source_quality_weight(&self) -> f64 {
        self.source_quality_weight
    }

    pub fn templates(&self) -> &'static TemplateSet {
        self.mode.templates()
    }

    /// Run steps 1-7 and return the report.
    pub fn run_full_protocol<I, S>(
        &self,
        statement: &str,
        sources: I,
        coherence_score: f64,
    ) -> Result<Report, SstError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute(RunInput {
            statement: statement.to_string(),
            extra_assumptions: Vec::new(),
            sources: sources.into_iter().map(Into::into).collect(),
            coherence_score,
            dialogue: None,
        })
    }

    /// Start a maieutic dialogue for `statement`. Deep-ask mode only.
    pub fn start_interactive_session(&self, statement: &str) -> Result<DialogueSession, SstError> {
        self.require_mode(Mode::DeepAsk, "start_interactive_session")?;
        DialogueSession::new(self.clone(), statement)
    }

    /// Run the protocol with the automated deep analysis attached.
    /// Deep-auto mode only.
    pub fn run_auto_analysis<I, S>(
        &self,
        statement: &str,
        sources: I,
        coherence_score: f64,
    ) -> Result<Report, SstError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.require_mode(Mode::DeepAuto, "run_auto_analysis")?;
        self.run_full_protocol(statement, sources, coherence_score)
    }

    fn require_mode(&self, required: Mode, operation: &'static str) -> Result<(), SstError> {
        if self.mode != required {
            return Err(SstError::ModeMismatch {
                operation,
                required,
                actual: self.mode,
            });
        }
        Ok(())
    }

    pub(crate) fn execute(&self, input: RunInput) -> Result<Report, SstError> {
        let result = self.run_steps(input);
        if let Err(e) = &result {
            tracing::warn!(mode = %self.mode, error = %e, "protocol run aborted");
        }
        result
    }

    fn run_steps(&self, input: RunInput) -> Result<Report, SstError> {
        let self_test = SelfTest::new();
        let mut completed: Vec<String> = Vec::with_capacity(Step::ALL.len());

        // Step 1
        let mut claim = Claim::new(input.statement)?;
        let step1 = StatementStep {
            step: Step::FormulateStatement.number(),
            name: Step::FormulateStatement.name().to_string(),
            statement: claim.statement().to_string(),
            is_valid: true,
        };
        mark(&mut completed, Step::FormulateStatement);

        // Step 2
        let mut assumptions = self_test.extract_assumptions(claim.statement());
        for extra in input.extra_assumptions {
            if !assumptions.contains(&extra) {
                assumptions.push(extra);
            }
        }
        claim.set_assumptions(assumptions);
        let step2 = AssumptionStep {
            step: Step::ExtractAssumptions.number(),
            name: Step::ExtractAssumptions.name().to_string(),
            assumptions: claim.assumptions().to_vec(),
            unknowns: self_test.identify_unknowns(claim.statement()),
        };
        mark(&mut completed, Step::ExtractAssumptions);

        // Step 3
        claim.set_sources(input.sources);
        let step3 = SourceStep {
            step: Step::AttachSources.number(),
            name: Step::AttachSources.name().to_string(),
            sources: claim.sources().to_vec(),
            source_count: claim.sources().len(),
            has_sources: !claim.sources().is_empty(),
        };
        mark(&mut completed, Step::AttachSources);

        // Step 4
        let coherence = validate_coherence(input.coherence_score)?;
        claim.set_coherence(coherence);
        let step4 = CoherenceStep {
            step: Step::TestCoherence.number(),
            name: Step::TestCoherence.name().to_string(),
            coherence_score: coherence,
        };
        mark(&mut completed, Step::TestCoherence);

        // Step 5
        let source_count = claim.sources().len();
        let state = classify(source_count, coherence)?;
        claim.set_classification(state);
        let step5 = ClassificationStep {
            step: Step::Classify.number(),
            name: Step::Classify.name().to_string(),
            label: state,
            code: state.code(),
            description: state.description().to_string(),
            limiting_factors: limiting_factors(source_count, coherence),
        };
        mark(&mut completed, Step::Classify);

        // Step 6
        let scored = breakdown(coherence, source_count, self.source_quality_weight);
        claim.set_confidence(scored.confidence);
        let step6 = ConfidenceStep {
            step: Step::ScoreConfidence.number(),
            name: Step::ScoreConfidence.name().to_string(),
            confidence: scored.confidence,
            coherence_component: scored.coherence_component,
            source_component: scored.source_component,
            source_quality_weight: self.source_quality_weight,
        };
        mark(&mut completed, Step::ScoreConfidence);

        // Step 7
        let full_analysis = FullAnalysis {
            step1,
            step2,
            step3,
            step4,
            step5,
            step6,
        };
        let auto_analysis = match self.mode {
            Mode::DeepAuto => Some(AutoAnalyzer::new().analyze(
                claim.statement(),
                claim.sources(),
                coherence,
            )),
            Mode::Basic | Mode::DeepAsk => None,
        };
        let reasoning_chain = self.reasoning_chain(&full_analysis);
        let reasoning = self.render_report(
            &full_analysis,
            &reasoning_chain,
            &self_test,
            auto_analysis.as_ref(),
        );
        mark(&mut completed, Step::AssembleReport);

        debug_assert!(claim.is_scored());
        tracing::debug!(
            mode = %self.mode,
            label = %state,
            confidence = scored.confidence,
            sources = source_count,
            "protocol run complete"
        );

        Ok(Report {
            step: Step::AssembleReport.number(),
            name: Step::AssembleReport.name().to_string(),
            claim: claim.statement().to_string(),
            mode: self.mode,
            steps_completed: completed,
            full_analysis,
            reasoning_chain,
            reasoning,
            status: "completed".to_string(),
            auto_analysis,
            dialogue: input.dialogue,
        })
    }

    /// One line per step 1-6, phrased by the mode's template table.
    fn reasoning_chain(&self, analysis: &FullAnalysis) -> Vec<String> {
        let vars = step_vars(analysis);
        self.templates()
            .chain
            .iter()
            .map(|line| render(line, &vars))
            .collect()
    }

    fn render_report(
        &self,
        analysis: &FullAnalysis,
        chain: &[String],
        self_test: &SelfTest,
        auto: Option<&AutoAnalysis>,
    ) -> String {
        let templates = self.templates();
        let questions =
            self_test.propose_questions(&analysis.step2.assumptions, &analysis.step2.unknowns);

        let mut vars = step_vars(analysis);
        vars.extend([
            ("mode_description", templates.description.to_string()),
            ("sources_list", templates.format_sources(&analysis.step3.sources)),
            ("assumptions_list", templates.format_items(&analysis.step2.assumptions)),
            ("questions_list", templates.format_items(&questions)),
            ("chain", templates.format_items(chain)),
        ]);

        if let Some(auto) = auto {
            vars.extend([
                ("statement_score", format!("{:.1}", auto.statement_quality.score)),
                ("source_quality", format!("{:.1}", auto.source_quality.average)),
                ("recommendation", auto.source_quality.recommendation.to_string()),
                ("issues_list", templates.format_items(&auto.coherence.issues)),
                ("strengths_list", templates.format_items(&auto.strengths)),
            ]);
        }

        render(templates.report, &vars)
    }
}

fn mark(completed: &mut Vec<String>, step: Step) {
    tracing::trace!(step = step.number(), name = step.name(), "step completed");
    completed.push(step.key().to_string());
}

/// Placeholder values shared by the chain lines and the report.
fn step_vars(analysis: &FullAnalysis) -> Vec<(&'static str, String)> {
    vec![
        ("statement", analysis.step1.statement.clone()),
        ("assumption_count", analysis.step2.assumptions.len().to_string()),
        ("assumptions", join_or_none(&analysis.step2.assumptions, "; ")),
        ("source_count", analysis.step3.source_count.to_string()),
        ("sources", join_or_none(&analysis.step3.sources, ", ")),
        ("coherence", format!("{:.1}", analysis.step4.coherence_score)),
        ("label", analysis.step5.label.to_string()),
        ("code", analysis.step5.code.to_string()),
        ("description", analysis.step5.description.clone()),
        ("confidence", format!("{:.1}", analysis.step6.confidence)),
        ("coherence_component", format!("{:.1}", analysis.step6.coherence_component)),
        ("source_component", format!("{:.1}", analysis.step6.source_component)),
    ]
}

fn join_or_none(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(sep)
    }
}
