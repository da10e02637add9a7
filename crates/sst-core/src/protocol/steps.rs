//! The seven protocol steps and their outputs.

use serde::{Deserialize, Serialize};

use crate::classification::{EpistemicState, FACT_MIN_COHERENCE, UNK_BELOW_COHERENCE};

/// The seven steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FormulateStatement,
    ExtractAssumptions,
    AttachSources,
    TestCoherence,
    Classify,
    ScoreConfidence,
    AssembleReport,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Self::FormulateStatement,
        Self::ExtractAssumptions,
        Self::AttachSources,
        Self::TestCoherence,
        Self::Classify,
        Self::ScoreConfidence,
        Self::AssembleReport,
    ];

    /// 1-based position.
    pub fn number(&self) -> u8 {
        match self {
            Self::FormulateStatement => 1,
            Self::ExtractAssumptions => 2,
            Self::AttachSources => 3,
            Self::TestCoherence => 4,
            Self::Classify => 5,
            Self::ScoreConfidence => 6,
            Self::AssembleReport => 7,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FormulateStatement => "Statement Formulation",
            Self::ExtractAssumptions => "Assumption Extraction",
            Self::AttachSources => "Source Identification",
            Self::TestCoherence => "Coherence Testing",
            Self::Classify => "Classification",
            Self::ScoreConfidence => "Confidence Quantification",
            Self::AssembleReport => "Reporting",
        }
    }

    /// Identifier recorded in `steps_completed`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FormulateStatement => "step1_formulate_statement",
            Self::ExtractAssumptions => "step2_extract_assumptions",
            Self::AttachSources => "step3_identify_sources",
            Self::TestCoherence => "step4_test_coherence",
            Self::Classify => "step5_classify_claim",
            Self::ScoreConfidence => "step6_quantify_confidence",
            Self::AssembleReport => "step7_generate_report",
        }
    }
}

/// Step 1 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementStep {
    pub step: u8,
    pub name: String,
    pub statement: String,
    pub is_valid: bool,
}

/// Step 2 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionStep {
    pub step: u8,
    pub name: String,
    pub assumptions: Vec<String>,
    /// Uncertain or interrogative parts of the statement
    pub unknowns: Vec<String>,
}

/// Step 3 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStep {
    pub step: u8,
    pub name: String,
    pub sources: Vec<String>,
    pub source_count: usize,
    pub has_sources: bool,
}

/// Step 4 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceStep {
    pub step: u8,
    pub name: String,
    pub coherence_score: f64,
}

/// Step 5 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStep {
    pub step: u8,
    pub name: String,
    pub label: EpistemicState,
    pub code: i8,
    pub description: String,
    /// Why the claim did not rank higher; empty for FACT
    pub limiting_factors: Vec<String>,
}

/// Step 6 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStep {
    pub step: u8,
    pub name: String,
    pub confidence: f64,
    pub coherence_component: f64,
    pub source_component: f64,
    pub source_quality_weight: f64,
}

/// Outputs of steps 1 through 6, keyed `step1`..`step6`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    pub step1: StatementStep,
    pub step2: AssumptionStep,
    pub step3: SourceStep,
    pub step4: CoherenceStep,
    pub step5: ClassificationStep,
    pub step6: ConfidenceStep,
}

/// Reasons a claim with these inputs falls short of FACT.
pub fn limiting_factors(source_count: usize, coherence: f64) -> Vec<String> {
    let mut factors = Vec::new();

    if source_count == 0 {
        factors.push("no sources attached".to_string());
    }

    if coherence < UNK_BELOW_COHERENCE {
        factors.push(format!(
            "coherence {:.1} is below {:.0}",
            coherence, UNK_BELOW_COHERENCE
        ));
    } else if coherence < FACT_MIN_COHERENCE {
        factors.push(format!(
            "coherence {:.1} is below the FACT threshold of {:.0}",
            coherence, FACT_MIN_COHERENCE
        ));
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_numbered_in_order() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.number() as usize, i + 1);
            assert!(step.key().starts_with(&format!("step{}_", i + 1)));
        }
    }

    #[test]
    fn test_limiting_factors() {
        assert!(limiting_factors(2, 90.0).is_empty());
        assert_eq!(limiting_factors(0, 90.0), vec!["no sources attached".to_string()]);
        assert_eq!(
            limiting_factors(1, 60.0),
            vec!["coherence 60.0 is below the FACT threshold of 85".to_string()]
        );
        assert_eq!(limiting_factors(0, 10.0).len(), 2);
    }
}
