//! Deep-auto analysis.
//!
//! Annotates a report with automated audits of the statement, its
//! assumptions, its sources and its internal consistency. None of these
//! scores feed back into classification or confidence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::self_test::patterns::{
    is_academic_source, AMBIGUOUS_QUANTITY_PATTERN, TESTABLE_PATTERN,
};
use crate::self_test::{Contradiction, SelfTest};

/// Points awarded per statement-quality criterion when it passes.
const CRITERION_FULL: f64 = 25.0;

/// Points awarded when a criterion only partially passes.
const CRITERION_PARTIAL: f64 = 10.0;

/// Statements at or below this length are not specific.
const SPECIFIC_MIN_LENGTH: usize = 20;

/// Words longer than this are treated as terms needing definition.
const TERM_MIN_LENGTH: usize = 6;

const ACADEMIC_SOURCE_QUALITY: f64 = 80.0;
const BASE_SOURCE_QUALITY: f64 = 50.0;
const ADEQUATE_SOURCE_QUALITY: f64 = 60.0;

/// Penalty per contradiction in the internal consistency score.
const CONTRADICTION_PENALTY: f64 = 25.0;

/// Caller coherence this far from the heuristic estimate is flagged.
const COHERENCE_DIVERGENCE: f64 = 30.0;

/// One pass/fail check with its contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub criterion: String,
    pub passed: bool,
    pub points: f64,
    pub finding: String,
}

impl CriterionCheck {
    fn new(criterion: &str, passed: bool, points: f64, finding: impl Into<String>) -> Self {
        Self {
            criterion: criterion.to_string(),
            passed,
            points,
            finding: finding.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementQuality {
    /// Sum of criterion points, 0 to 100
    pub score: f64,
    pub checks: Vec<CriterionCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionInventory {
    /// Category-tagged premises, e.g. `[EMPIRICAL] ...`
    pub categorized: Vec<String>,
    /// Clauses extracted from the statement
    pub extracted: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAssessment {
    pub label: String,
    pub academic: bool,
    pub quality: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceRecommendation {
    RequiresSources,
    Adequate,
    NeedsImprovement,
}

impl fmt::Display for SourceRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RequiresSources => "REQUIRES SOURCES",
            Self::Adequate => "ADEQUATE",
            Self::NeedsImprovement => "NEEDS IMPROVEMENT",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuality {
    pub assessments: Vec<SourceAssessment>,
    /// Mean quality, 0 when there are no sources
    pub average: f64,
    pub recommendation: SourceRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceChecks {
    pub contradictions: Vec<Contradiction>,
    /// 100 minus 25 per contradiction
    pub consistency_score: f64,
    /// Advisory heuristic, see [`SelfTest::estimate_coherence`]
    pub estimated_coherence: f64,
    pub issues: Vec<String>,
}

/// Everything the deep-auto pass found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoAnalysis {
    pub statement_quality: StatementQuality,
    pub assumptions: AssumptionInventory,
    pub source_quality: SourceQuality,
    pub coherence: CoherenceChecks,
    pub strengths: Vec<String>,
}

/// Runs the deep-auto audits.
pub struct AutoAnalyzer {
    self_test: SelfTest,
}

impl AutoAnalyzer {
    pub fn new() -> Self {
        Self {
            self_test: SelfTest::new(),
        }
    }

    pub fn analyze(&self, statement: &str, sources: &[String], coherence_score: f64) -> AutoAnalysis {
        let statement_quality = self.statement_quality(statement);
        let assumptions = self.assumption_inventory(statement);
        let source_quality = self.source_quality(sources);
        let coherence = self.coherence_checks(statement, coherence_score);
        let strengths = self.strengths(&statement_quality, &source_quality, &coherence);

        tracing::debug!(
            statement_score = statement_quality.score,
            source_quality = source_quality.average,
            issues = coherence.issues.len(),
            "auto analysis complete"
        );

        AutoAnalysis {
            statement_quality,
            assumptions,
            source_quality,
            coherence,
            strengths,
        }
    }

    /// Clarity, specificity, testability and completeness, 25 points each.
    pub fn statement_quality(&self, statement: &str) -> StatementQuality {
        let ambiguous = AMBIGUOUS_QUANTITY_PATTERN.is_match(statement);
        let specific = statement.chars().count() > SPECIFIC_MIN_LENGTH;
        let testable = TESTABLE_PATTERN.is_match(statement);
        let complete = !statement.trim_end().ends_with("...") && !statement.contains('?');

        let checks = vec![
            if ambiguous {
                CriterionCheck::new("clarity", false, 0.0, "ambiguous language detected")
            } else {
                CriterionCheck::new("clarity", true, CRITERION_FULL, "no vague quantifiers")
            },
            if specific {
                CriterionCheck::new("specificity", true, CRITERION_FULL, "specific enough to evaluate")
            } else {
                CriterionCheck::new("specificity", false, CRITERION_PARTIAL, "could be more specific")
            },
            if testable {
                CriterionCheck::new("testability", true, CRITERION_FULL, "contains a verifiable assertion")
            } else {
                CriterionCheck::new("testability", false, CRITERION_PARTIAL, "not easily verifiable")
            },
            if complete {
                CriterionCheck::new("completeness", true, CRITERION_FULL, "statement is complete")
            } else {
                CriterionCheck::new("completeness", false, CRITERION_PARTIAL, "incomplete or interrogative statement")
            },
        ];

        StatementQuality {
            score: checks.iter().map(|c| c.points).sum(),
            checks,
        }
    }

    /// Definitional, contextual and empirical premises plus extracted clauses.
    pub fn assumption_inventory(&self, statement: &str) -> AssumptionInventory {
        let mut categorized = Vec::new();

        let terms: Vec<&str> = statement
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.chars().count() > TERM_MIN_LENGTH)
            .take(3)
            .collect();
        if !terms.is_empty() {
            categorized.push(format!(
                "[DEFINITIONAL] Terms assumed understood: {}",
                terms.join(", ")
            ));
        }
        categorized.push("[CONTEXTUAL] Statement context is assumed to be clear".to_string());
        categorized.push("[EMPIRICAL] Empirical basis is assumed verifiable".to_string());

        let extracted = self.self_test.extract_assumptions(statement);

        AssumptionInventory {
            count: categorized.len() + extracted.len(),
            categorized,
            extracted,
        }
    }

    /// Rate each source label; academic or institutional labels score higher.
    pub fn source_quality(&self, sources: &[String]) -> SourceQuality {
        if sources.is_empty() {
            return SourceQuality {
                assessments: Vec::new(),
                average: 0.0,
                recommendation: SourceRecommendation::RequiresSources,
            };
        }

        let assessments: Vec<SourceAssessment> = sources
            .iter()
            .map(|label| {
                let academic = is_academic_source(label);
                SourceAssessment {
                    label: label.clone(),
                    academic,
                    quality: if academic {
                        ACADEMIC_SOURCE_QUALITY
                    } else {
                        BASE_SOURCE_QUALITY
                    },
                }
            })
            .collect();

        let average = assessments.iter().map(|a| a.quality).sum::<f64>() / assessments.len() as f64;
        let recommendation = if average >= ADEQUATE_SOURCE_QUALITY {
            SourceRecommendation::Adequate
        } else {
            SourceRecommendation::NeedsImprovement
        };

        SourceQuality {
            assessments,
            average,
            recommendation,
        }
    }

    /// Internal consistency, hedging and divergence from the heuristic.
    pub fn coherence_checks(&self, statement: &str, coherence_score: f64) -> CoherenceChecks {
        let analysis = self.self_test.analyze(statement);
        let mut issues = Vec::new();

        for c in &analysis.contradictions {
            issues.push(format!("Potential contradiction: '{}' and '{}'", c.first, c.second));
        }
        if analysis.hedge_count > 0 {
            issues.push(format!("Hedging language ({} occurrence(s))", analysis.hedge_count));
        }
        for unknown in &analysis.unknowns {
            issues.push(format!("Unresolved uncertainty: {}", unknown));
        }
        if (coherence_score - analysis.estimated_coherence).abs() >= COHERENCE_DIVERGENCE {
            issues.push(format!(
                "Supplied coherence {:.1} differs from heuristic estimate {:.1}",
                coherence_score, analysis.estimated_coherence
            ));
        }

        let consistency_score =
            (100.0 - analysis.contradictions.len() as f64 * CONTRADICTION_PENALTY).max(0.0);

        CoherenceChecks {
            contradictions: analysis.contradictions,
            consistency_score,
            estimated_coherence: analysis.estimated_coherence,
            issues,
        }
    }

    fn strengths(
        &self,
        quality: &StatementQuality,
        sources: &SourceQuality,
        coherence: &CoherenceChecks,
    ) -> Vec<String> {
        let mut strengths = Vec::new();

        for check in quality.checks.iter().filter(|c| c.passed) {
            strengths.push(format!("Statement passes {}: {}", check.criterion, check.finding));
        }
        if sources.assessments.iter().any(|a| a.academic) {
            strengths.push("Backed by academic or institutional sources".to_string());
        }
        if coherence.contradictions.is_empty() {
            strengths.push("No internal contradictions detected".to_string());
        }

        strengths
    }
}

impl Default for AutoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_statement_scores_full() {
        let quality = AutoAnalyzer::new().statement_quality("Water boils at 100°C at sea level.");
        assert_eq!(quality.score, 100.0);
        assert!(quality.checks.iter().all(|c| c.passed));
    }

    #[test]
    fn test_vague_question_scores_low() {
        let quality = AutoAnalyzer::new().statement_quality("Some do?");
        // clarity 0, specificity 10, testability 10, completeness 10
        assert_eq!(quality.score, 30.0);
    }

    #[test]
    fn test_definitional_terms_limited_to_three() {
        let inventory = AutoAnalyzer::new()
            .assumption_inventory("Photosynthesis converts electromagnetic radiation into chemical energy.");
        assert_eq!(
            inventory.categorized[0],
            "[DEFINITIONAL] Terms assumed understood: Photosynthesis, converts, electromagnetic"
        );
        assert_eq!(inventory.count, 3);
    }

    #[test]
    fn test_no_sources_requires_sources() {
        let quality = AutoAnalyzer::new().source_quality(&[]);
        assert_eq!(quality.recommendation, SourceRecommendation::RequiresSources);
        assert_eq!(quality.average, 0.0);
    }

    #[test]
    fn test_source_quality_average() {
        let quality = AutoAnalyzer::new()
            .source_quality(&["CRC Handbook".to_string(), "a forum post".to_string()]);
        assert_eq!(quality.average, 65.0);
        assert_eq!(quality.recommendation, SourceRecommendation::Adequate);

        let weak = AutoAnalyzer::new().source_quality(&["a forum post".to_string()]);
        assert_eq!(weak.recommendation, SourceRecommendation::NeedsImprovement);
    }

    #[test]
    fn test_contradiction_issues() {
        let checks = AutoAnalyzer::new().coherence_checks("Prices always rise and never fall", 70.0);
        assert_eq!(checks.contradictions.len(), 1);
        assert_eq!(checks.consistency_score, 75.0);
        assert!(checks.issues[0].contains("'always' and 'never'"));
    }

    #[test]
    fn test_divergent_coherence_flagged() {
        let checks = AutoAnalyzer::new().coherence_checks("Cats are mammals", 20.0);
        assert!(checks
            .issues
            .iter()
            .any(|i| i.starts_with("Supplied coherence 20.0")));
    }
}
