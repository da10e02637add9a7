//! Deep-auto mode: automated audit phrasing.

use super::{Mode, TemplateSet};

pub static TEMPLATES: TemplateSet = TemplateSet {
    mode: Mode::DeepAuto,
    description: "Self-administered automated deep analysis",
    chain: [
        "[1] Statement analyzed: \"{statement}\"",
        "[2] Hidden premise count: {assumption_count} ({assumptions})",
        "[3] Sources evaluated: {source_count} ({sources})",
        "[4] Coherence score: {coherence}/100",
        "[5] Classification logic: {label} (code {code}) - {description}",
        "[6] Final confidence: {confidence}% = {coherence_component} coherence + {source_component} sources",
    ],
    report: r#"+--------------------------------------------------------------+
|                  DEEP-AUTO ANALYSIS REPORT                   |
+--------------------------------------------------------------+
  {mode_description}

CLAIM ANALYZED:
   "{statement}"

EXECUTIVE SUMMARY
   CLASSIFICATION:    {label}
   CONFIDENCE:        {confidence}%
   SOURCES:           {source_count}
   ASSUMPTIONS:       {assumption_count}

DETAILED SCORES
   Statement quality: {statement_score}/100
   Source quality:    {source_quality}/100 ({recommendation})
   Coherence:         {coherence}/100

SOURCES:
{sources_list}

KEY ASSUMPTIONS:
{assumptions_list}

POTENTIAL ISSUES:
{issues_list}

STRENGTHS:
{strengths_list}

ANALYSIS TRACE:
{chain}
"#,
    bullet: "   -",
    no_sources: "No sources provided",
    no_items: "(none identified)",
};
