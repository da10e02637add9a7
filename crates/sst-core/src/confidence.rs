//! Confidence scoring.
//!
//! Coherence dominates the score. Each independent source adds a fixed
//! amount scaled by source quality, saturating after three sources:
//!
//! ```text
//! confidence = clamp(0, 100, coherence * 0.7 + min(sources, 3) * 10 * quality)
//! ```
//!
//! The result is rounded to two decimal places.

use serde::{Deserialize, Serialize};

/// Weight of the coherence score.
pub const COHERENCE_WEIGHT: f64 = 0.7;

/// Points contributed by each counted source at full quality.
pub const POINTS_PER_SOURCE: f64 = 10.0;

/// Sources beyond this add nothing.
pub const MAX_COUNTED_SOURCES: usize = 3;

/// Source quality weight used when the caller does not supply one.
pub const DEFAULT_SOURCE_QUALITY_WEIGHT: f64 = 1.0;

/// The parts that make up a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// `coherence * 0.7`
    pub coherence_component: f64,
    /// `min(sources, 3) * 10 * quality`
    pub source_component: f64,
    /// Clamped and rounded total
    pub confidence: f64,
}

/// Score a claim from 0 to 100.
///
/// Inputs are expected to be validated: coherence in [0, 100] and a
/// non-negative quality weight.
pub fn score(coherence_score: f64, source_count: usize, source_quality_weight: f64) -> f64 {
    breakdown(coherence_score, source_count, source_quality_weight).confidence
}

/// Score with the default source quality weight.
pub fn score_default(coherence_score: f64, source_count: usize) -> f64 {
    score(coherence_score, source_count, DEFAULT_SOURCE_QUALITY_WEIGHT)
}

/// Score a claim and keep the individual components.
pub fn breakdown(coherence_score: f64, source_count: usize, source_quality_weight: f64) -> ConfidenceBreakdown {
    let coherence_component = round2(coherence_score * COHERENCE_WEIGHT);
    let counted = source_count.min(MAX_COUNTED_SOURCES) as f64;
    let source_component = round2(counted * POINTS_PER_SOURCE * source_quality_weight);

    let confidence = round2(coherence_component + source_component).clamp(0.0, 100.0);

    ConfidenceBreakdown {
        coherence_component,
        source_component,
        confidence,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        // 90 * 0.7 + 2 * 10
        assert_eq!(score_default(90.0, 2), 83.0);
    }

    #[test]
    fn test_sources_saturate_at_three() {
        assert_eq!(score_default(50.0, 3), score_default(50.0, 10));
        assert_eq!(score_default(50.0, 3), 65.0);
    }

    #[test]
    fn test_clamped_to_hundred() {
        assert_eq!(score_default(100.0, 3), 100.0);
        assert_eq!(score(100.0, 3, 1.0), 100.0);
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(score_default(0.0, 0), 0.0);
    }

    #[test]
    fn test_quality_weight_scales_sources() {
        let b = breakdown(60.0, 2, 0.5);
        assert_eq!(b.coherence_component, 42.0);
        assert_eq!(b.source_component, 10.0);
        assert_eq!(b.confidence, 52.0);
    }

    #[test]
    fn test_zero_weight_ignores_sources() {
        assert_eq!(score(70.0, 3, 0.0), score_default(70.0, 0));
    }
}
