//! Mode templates.
//!
//! A mode only changes how the reasoning text is phrased; it never touches
//! classification or confidence. Each mode maps to one static
//! [`TemplateSet`]:
//! 1. `basic` - direct, terse statements
//! 2. `deep-ask` - maieutic dialogue framing, plus the questions the
//!    interactive session walks through
//! 3. `deep-auto` - automated audit framing with an executive summary
//!
//! Templates use `{name}` placeholders filled by [`render`].

pub mod basic;
pub mod deep_ask;
pub mod deep_auto;

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::InvalidInputError;

lazy_static! {
    /// A `{name}` placeholder.
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// Protocol mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Direct questioning
    #[default]
    Basic,
    /// Maieutic questioning with human answers
    DeepAsk,
    /// Self-administered deep analysis
    DeepAuto,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Self::Basic, Self::DeepAsk, Self::DeepAuto];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::DeepAsk => "deep-ask",
            Self::DeepAuto => "deep-auto",
        }
    }

    /// The template table for this mode.
    pub fn templates(&self) -> &'static TemplateSet {
        match self {
            Self::Basic => &basic::TEMPLATES,
            Self::DeepAsk => &deep_ask::TEMPLATES,
            Self::DeepAuto => &deep_auto::TEMPLATES,
        }
    }

    /// One-line summary shown in the report header.
    pub fn description(&self) -> &'static str {
        self.templates().description
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InvalidInputError::UnsupportedMode(s.to_string()))
    }
}

/// The phrasing used by one mode.
#[derive(Debug)]
pub struct TemplateSet {
    pub mode: Mode,
    pub description: &'static str,

    /// One explanation line per analysis step (1 through 6)
    pub chain: [&'static str; 6],

    /// Final report layout (step 7)
    pub report: &'static str,

    /// Prefix for list items in the report
    pub bullet: &'static str,

    /// Shown in place of an empty source list
    pub no_sources: &'static str,

    /// Shown in place of any other empty list
    pub no_items: &'static str,
}

impl TemplateSet {
    /// Render a list with this mode's bullet, or the placeholder text when
    /// the list is empty.
    pub fn format_list(&self, items: &[String], empty: &str) -> String {
        if items.is_empty() {
            return format!("{} {}", self.bullet, empty);
        }
        items
            .iter()
            .map(|item| format!("{} {}", self.bullet, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_sources(&self, sources: &[String]) -> String {
        self.format_list(sources, self.no_sources)
    }

    pub fn format_items(&self, items: &[String]) -> String {
        self.format_list(items, self.no_items)
    }
}

/// Fill `{name}` placeholders in one pass over `template`.
///
/// Substituted values are copied verbatim and never scanned again, so
/// braces inside a statement or source label survive. Unknown placeholders
/// are left untouched.
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            vars.iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
