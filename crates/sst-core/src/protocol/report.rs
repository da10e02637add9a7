//! The protocol report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::auto::AutoAnalysis;
use super::session::DialogueTranscript;
use super::steps::FullAnalysis;
use crate::classification::EpistemicState;
use crate::prompts::Mode;

/// Output of one complete protocol run (step 7).
///
/// Serialized key names are stable: callers address fields by path, e.g.
/// `full_analysis.step5.label` or `full_analysis.step6.confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub step: u8,
    pub name: String,
    pub claim: String,
    pub mode: Mode,
    pub steps_completed: Vec<String>,
    pub full_analysis: FullAnalysis,

    /// One explanation line per analysis step, phrased by the mode
    pub reasoning_chain: Vec<String>,

    /// The full report text rendered from the mode's template
    pub reasoning: String,

    pub status: String,

    /// Present for deep-auto runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_analysis: Option<AutoAnalysis>,

    /// Present for reports produced by a deep-ask session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<DialogueTranscript>,
}

impl Report {
    pub fn label(&self) -> EpistemicState {
        self.full_analysis.step5.label
    }

    pub fn code(&self) -> i8 {
        self.full_analysis.step5.code
    }

    pub fn confidence(&self) -> f64 {
        self.full_analysis.step6.confidence
    }

    pub fn assumptions(&self) -> &[String] {
        &self.full_analysis.step2.assumptions
    }

    pub fn sources(&self) -> &[String] {
        &self.full_analysis.step3.sources
    }

    /// Look up a value by dotted key path.
    ///
    /// Object keys are matched by name; array elements by index, so
    /// `full_analysis.step3.sources.0` is the first source.
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = serde_json::to_value(self).ok()?;

        let mut current = &root;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current.clone())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
