//! Review agent: the second pass that critiques a generated structure.
//!
//! With an LLM configured the structure is rendered and sent through the
//! review prompt; any failure degrades to the rule-based substitute, which
//! flags missing acceptance criteria, vague wording, and absent environment
//! details. The review never mutates the structure.

use std::fmt;

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::extract::prompts;
use crate::markdown;
use crate::model::TicketStructure;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Words the rule-based review treats as too vague for a ticket.
const VAGUE_WORDS: [&str; 6] = ["user-friendly", "fast", "robust", "good", "nice", "clean"];

/// Findings from a review pass.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ReviewReport {
    /// Missing information in existing records.
    #[serde(default)]
    pub gaps: Vec<String>,
    /// Vague or underspecified wording.
    #[serde(default)]
    pub ambiguities: Vec<String>,
    /// Work the structure should contain but does not.
    #[serde(default)]
    pub missing_tasks: Vec<String>,
    /// Questions to put to the requester.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Non-blocking improvement ideas.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Operational risks worth addressing before shipping.
    #[serde(default)]
    pub production_readiness_concerns: Vec<String>,
}

impl ReviewReport {
    /// Returns `true` when the review found anything actionable.
    ///
    /// Suggestions and production-readiness concerns are advisory and do
    /// not count.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.gaps.is_empty()
            || !self.ambiguities.is_empty()
            || !self.missing_tasks.is_empty()
            || !self.questions.is_empty()
    }
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;

        write_section(f, "Gaps", &self.gaps, &mut wrote_any)?;
        write_section(f, "Ambiguities", &self.ambiguities, &mut wrote_any)?;
        write_section(f, "Suggested missing tasks", &self.missing_tasks, &mut wrote_any)?;

        if !self.questions.is_empty() {
            if wrote_any {
                writeln!(f)?;
            }
            wrote_any = true;
            writeln!(f, "Questions for clarification:")?;
            for (i, question) in self.questions.iter().enumerate() {
                writeln!(f, "  {}. {question}", i + 1)?;
            }
        }

        write_section(f, "Suggestions", &self.suggestions, &mut wrote_any)?;
        write_section(
            f,
            "Production readiness concerns",
            &self.production_readiness_concerns,
            &mut wrote_any,
        )?;

        if !wrote_any {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[String],
    wrote_any: &mut bool,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    if *wrote_any {
        writeln!(f)?;
    }
    *wrote_any = true;
    writeln!(f, "{title}:")?;
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

/// Reviews a ticket structure for completeness and quality.
pub struct ReviewAgent<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewAgent<'a> {
    /// Creates a review agent over the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reviews the structure. Never fails: LLM problems degrade to the
    /// rule-based substitute.
    pub async fn review(&self, structure: &TicketStructure) -> ReviewReport {
        match &self.ctx.llm {
            Some(llm) => match self.review_with_llm(llm.as_ref(), structure).await {
                Ok(report) => report,
                Err(reason) => {
                    tracing::warn!(reason = %reason, "LLM review failed, using rule-based review");
                    rule_based(structure)
                }
            },
            None => rule_based(structure),
        }
    }

    async fn review_with_llm(
        &self,
        llm: &dyn LlmClient,
        structure: &TicketStructure,
    ) -> Result<ReviewReport, String> {
        let request = CompletionRequest {
            prompt: prompts::review_prompt(&markdown::render(structure)),
            max_tokens: 4096,
            temperature: Some(0.5),
        };

        let response = llm
            .complete(&request)
            .await
            .map_err(|e| format!("completion request failed: {e}"))?;

        serde_json::from_str(response.text.trim())
            .map_err(|e| format!("response was not the expected JSON: {e}"))
    }
}

/// Rule-based review substitute used when no LLM is available.
fn rule_based(structure: &TicketStructure) -> ReviewReport {
    let mut report = ReviewReport::default();

    for epic in &structure.epics {
        for task in &epic.tasks {
            if task.acceptance_criteria.is_empty() {
                report.gaps.push(format!("Task '{}' has no acceptance criteria", task.title));
                report
                    .questions
                    .push(format!("What are the success criteria for '{}'?", task.title));
            } else if task.acceptance_criteria.len() < 3 {
                report.gaps.push(format!(
                    "Task '{}' has only {} acceptance criteria (recommend 3 or more)",
                    task.title,
                    task.acceptance_criteria.len()
                ));
                report.questions.push(format!(
                    "Can you provide more detailed acceptance criteria for '{}'?",
                    task.title
                ));
            }

            let description = task.description.to_lowercase();
            for word in VAGUE_WORDS {
                if description.contains(word) {
                    report
                        .gaps
                        .push(format!("Task '{}' contains vague term '{word}'", task.title));
                    report.questions.push(format!(
                        "Can you be more specific about '{word}' in '{}'?",
                        task.title
                    ));
                }
            }
        }
    }

    for bug in &structure.bugs {
        if bug.reproduction_steps.len() < 3 {
            report.gaps.push(format!(
                "Bug '{}' needs detailed reproduction steps (3 or more)",
                bug.summary
            ));
            report
                .questions
                .push(format!("What are the exact steps to reproduce '{}'?", bug.summary));
        }
        if bug.environment.browser.is_none() && bug.environment.os.is_none() {
            report.gaps.push(format!("Bug '{}' missing environment details", bug.summary));
            report
                .questions
                .push(format!("What browser/OS/device was '{}' found on?", bug.summary));
        }
    }

    for story in &structure.stories {
        if story.acceptance_criteria.len() < 3 {
            report.gaps.push(format!(
                "Story '{}' needs detailed acceptance criteria (3 or more)",
                story.title
            ));
            report
                .questions
                .push(format!("What are the acceptance criteria for '{}'?", story.title));
        }
    }

    if !structure.epics.is_empty() {
        report.suggestions.extend([
            "Consider adding error handling tasks for each feature".to_string(),
            "Consider adding unit/integration testing tasks".to_string(),
            "Consider adding monitoring/logging tasks for production".to_string(),
        ]);
    }

    report
}
