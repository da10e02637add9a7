//! Socratic self-examination of claims.
//!
//! Extracts implicit assumptions, flags uncertainty and contradictions, and
//! validates the caller's coherence score. Everything here is heuristic
//! text matching; nothing attempts to understand the claim.

mod analyzer;
pub mod patterns;

pub use analyzer::{
    validate_coherence, Contradiction, SelfTest, StatementAnalysis, MAX_COHERENCE, MIN_COHERENCE,
};
