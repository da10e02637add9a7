//! Deep-ask mode: the maieutic method.
//!
//! The protocol poses questions and a human answers them. Besides the
//! report phrasing, this module holds the prompts for the four interactive
//! stages of a [`DialogueSession`](crate::protocol::DialogueSession).

use super::{Mode, TemplateSet};

pub static TEMPLATES: TemplateSet = TemplateSet {
    mode: Mode::DeepAsk,
    description: "Maieutic questioning with human guidance",
    chain: [
        "You stated: \"{statement}\"",
        "Beneath it we uncovered {assumption_count} assumption(s): {assumptions}",
        "You traced it to {source_count} source(s): {sources}",
        "You judged its coherence at {coherence}/100",
        "Our dialogue places it as {label} - {description}",
        "Our certainty stands at {confidence}% ({coherence_component} from coherence, {source_component} from sources)",
    ],
    report: r#"==============================================================
        SOCRATIC STRESS TEST REPORT (DEEP-ASK)
        {mode_description}
==============================================================

CLAIM EXAMINED:
   "{statement}"

CLASSIFICATION: {label}
CONFIDENCE: {confidence}%

SOURCES CONSULTED ({source_count}):
{sources_list}

KEY ASSUMPTIONS IDENTIFIED:
{assumptions_list}

QUESTIONS RAISED:
{questions_list}

DIALOGUE:
{chain}
==============================================================
"#,
    bullet: "   *",
    no_sources: "(no sources provided - a significant concern)",
    no_items: "(none identified)",
};

/// Interactive stages, in the order a session asks them.
pub const STAGE_TITLES: [&str; 4] = [
    "STATEMENT CLARIFICATION",
    "ASSUMPTION EXCAVATION",
    "SOURCE EXAMINATION",
    "COHERENCE EXAMINATION",
];

/// Prompt body per stage. Placeholders: `{statement}`, `{sources}`,
/// `{assumptions}`, `{questions}`.
pub const STAGE_PROMPTS: [&str; 4] = [
    r#"STEP 1: {title}

You have stated: "{statement}"

Reflect on the following:
{questions}

Answer with a reformulation of the claim, or leave blank to keep it."#,
    r#"STEP 2: {title}

Regarding: "{statement}"
Assumptions found so far: {assumptions}

{questions}

Answer with one assumption per line."#,
    r#"STEP 3: {title}

For the claim: "{statement}"
Current sources: {sources}

{questions}

Answer with one source per line."#,
    r#"STEP 4: {title}

Testing the claim: "{statement}"

{questions}

Answer with a coherence score from 0 to 100."#,
];

pub const STAGE_QUESTIONS: [&[&str]; 4] = [
    &[
        "What exactly do you mean by this claim?",
        "Can you express it in different words?",
        "What would it look like if this claim were false?",
        "Is there any ambiguity in the formulation?",
    ],
    &[
        "What must you already believe for this to be true?",
        "What concepts are you taking for granted?",
        "Could someone reasonably reject these premises?",
    ],
    &[
        "How do you know this to be true?",
        "Who else has verified this claim?",
        "Could your sources be mistaken?",
        "Is there a primary source?",
    ],
    &[
        "Does this contradict anything you already know?",
        "Can you think of a counterexample?",
        "Is there a simpler explanation?",
    ],
];

/// Number questions for display, starting at 1.
pub fn format_questions(questions: &[&str]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("  {}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_questions() {
        for questions in STAGE_QUESTIONS {
            assert!(!questions.is_empty());
        }
    }

    #[test]
    fn test_stage_prompts_reference_statement() {
        for prompt in STAGE_PROMPTS {
            assert!(prompt.contains("{statement}"));
            assert!(prompt.contains("{questions}"));
        }
    }

    #[test]
    fn test_format_questions_numbered() {
        let out = format_questions(&["Why?", "How?"]);
        assert_eq!(out, "  1. Why?\n  2. How?");
    }
}
