//! Basic mode: direct statements, no framing.

use super::{Mode, TemplateSet};

pub static TEMPLATES: TemplateSet = TemplateSet {
    mode: Mode::Basic,
    description: "Direct questioning for straightforward claim evaluation",
    chain: [
        "Statement: \"{statement}\"",
        "Assumptions found: {assumption_count} ({assumptions})",
        "Sources attached: {source_count} ({sources})",
        "Coherence: {coherence}/100",
        "Classification: {label} (code {code}) - {description}",
        "Confidence: {confidence}% = {coherence_component} from coherence + {source_component} from sources",
    ],
    report: r#"=== SOCRATIC STRESS TEST REPORT (BASIC) ===
{mode_description}

Claim: {statement}
Classification: {label}
Confidence: {confidence}%

Sources ({source_count}):
{sources_list}

Reasoning:
{chain}
"#,
    bullet: "  -",
    no_sources: "(no sources provided)",
    no_items: "(none)",
};
