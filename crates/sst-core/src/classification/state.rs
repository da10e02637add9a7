//! The three epistemic states a claim can land in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidInputError;

/// Epistemic state of a claim.
///
/// Ordered from least to most trusted, so `Unk < Hyp < Fact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EpistemicState {
    /// Unknown: insufficient evidence to classify
    Unk,
    /// Hypothesis: plausible but unverified
    Hyp,
    /// Fact: high coherence backed by at least one source
    Fact,
}

impl EpistemicState {
    /// All states, lowest first.
    pub const ALL: [EpistemicState; 3] = [Self::Unk, Self::Hyp, Self::Fact];

    /// Numeric code: 1 for FACT, 0 for HYP, -1 for UNK.
    pub fn code(&self) -> i8 {
        match self {
            Self::Fact => 1,
            Self::Hyp => 0,
            Self::Unk => -1,
        }
    }

    /// Report label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fact => "FACT",
            Self::Hyp => "HYP",
            Self::Unk => "UNK",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fact => "Verified fact with high confidence",
            Self::Hyp => "Hypothesis - plausible but needs verification",
            Self::Unk => "Unknown - insufficient evidence to classify",
        }
    }

    /// One level down, saturating at UNK.
    pub fn downgrade(&self) -> Self {
        match self {
            Self::Fact => Self::Hyp,
            Self::Hyp | Self::Unk => Self::Unk,
        }
    }

    /// One level up, saturating at FACT.
    pub fn upgrade(&self) -> Self {
        match self {
            Self::Unk => Self::Hyp,
            Self::Hyp | Self::Fact => Self::Fact,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Self::Fact),
            0 => Some(Self::Hyp),
            -1 => Some(Self::Unk),
            _ => None,
        }
    }

    pub fn is_fact(&self) -> bool {
        matches!(self, Self::Fact)
    }

    pub fn is_hyp(&self) -> bool {
        matches!(self, Self::Hyp)
    }

    pub fn is_unk(&self) -> bool {
        matches!(self, Self::Unk)
    }
}

impl fmt::Display for EpistemicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EpistemicState {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FACT" => Ok(Self::Fact),
            "HYP" => Ok(Self::Hyp),
            "UNK" => Ok(Self::Unk),
            other => Err(InvalidInputError::UnknownState(other.to_string())),
        }
    }
}
