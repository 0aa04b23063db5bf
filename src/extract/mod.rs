//! Extraction agent: unstructured text to a ticket structure.
//!
//! With an LLM configured the agent asks for a JSON structure and validates
//! it; any failure along the way — transport, malformed JSON, validation —
//! is an ordinary `Err` value that selects the deterministic fallback. The
//! fallback needs no network and always produces a single epic/task pair
//! from the input text.

pub(crate) mod prompts;

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::model::{Bug, Epic, IssueType, Priority, Task, TicketStructure, UserStory};
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Extracts structured tickets from free-form text.
pub struct ExtractionAgent<'a> {
    ctx: &'a ServiceContext,
    issue_type: IssueType,
}

/// The JSON shape the extraction prompts ask for.
#[derive(Debug, Default, Deserialize)]
struct ExtractionPayload {
    #[serde(default)]
    epics: Vec<Epic>,
    #[serde(default)]
    bugs: Vec<Bug>,
    #[serde(default)]
    stories: Vec<UserStory>,
}

impl<'a> ExtractionAgent<'a> {
    /// Creates an agent producing records of the given kind.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, issue_type: IssueType) -> Self {
        Self { ctx, issue_type }
    }

    /// Extracts a structure from `text`.
    ///
    /// Uses the configured LLM when available, falling back to the
    /// deterministic local extraction when no LLM is configured or the LLM
    /// path fails for any reason.
    ///
    /// # Errors
    ///
    /// Returns an error only when even the fallback cannot build a valid
    /// structure (bad project key, or input without usable text).
    pub async fn extract(&self, text: &str, project_key: &str) -> Result<TicketStructure, String> {
        match &self.ctx.llm {
            Some(llm) => match self.extract_with_llm(llm.as_ref(), text, project_key).await {
                Ok(structure) => Ok(structure),
                Err(reason) => {
                    tracing::warn!(reason = %reason, "LLM extraction failed, using fallback");
                    self.fallback(text, project_key)
                }
            },
            None => self.fallback(text, project_key),
        }
    }

    async fn extract_with_llm(
        &self,
        llm: &dyn LlmClient,
        text: &str,
        project_key: &str,
    ) -> Result<TicketStructure, String> {
        let request = CompletionRequest {
            prompt: prompts::extraction_prompt(self.issue_type, text, project_key),
            max_tokens: 4096,
            temperature: Some(0.3),
        };

        let response = llm
            .complete(&request)
            .await
            .map_err(|e| format!("completion request failed: {e}"))?;

        let payload: ExtractionPayload = serde_json::from_str(response.text.trim())
            .map_err(|e| format!("response was not the expected JSON: {e}"))?;

        let mut structure =
            TicketStructure::new(project_key, self.issue_type).map_err(|e| e.to_string())?;
        match self.issue_type {
            IssueType::Task | IssueType::EpicOnly => structure.epics = payload.epics,
            IssueType::Bug => structure.bugs = payload.bugs,
            IssueType::Story => structure.stories = payload.stories,
        }

        structure
            .validate()
            .map_err(|e| format!("generated structure failed validation: {e}"))?;
        Ok(structure)
    }

    /// Deterministic extraction without an LLM: one epic from the first
    /// line and leading text, one implementation task under it.
    ///
    /// The pair is task-shaped, so the structure is tagged `task` whatever
    /// kind was requested — the tag must match the populated sequence.
    fn fallback(&self, text: &str, project_key: &str) -> Result<TicketStructure, String> {
        let first_line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");

        let epic_title = if first_line.chars().count() >= 5 {
            clamp_chars(first_line, 200)
        } else {
            "Extracted Feature".to_string()
        };
        let task_title = if first_line.is_empty() {
            "Implementation task".to_string()
        } else {
            format!("Implement {}", clamp_chars(first_line, 150))
        };

        let epic = Epic {
            title: epic_title,
            description: clamp_chars(text, 1000),
            business_value: Some("To be refined".to_string()),
            priority: Priority::Medium,
            tasks: vec![Task {
                title: task_title,
                description: clamp_chars(text, 500),
                acceptance_criteria: vec![
                    "Feature works as described".to_string(),
                    "Tests pass".to_string(),
                    "Documentation updated".to_string(),
                ],
                technical_notes: None,
                priority: Priority::Medium,
                estimated_effort: None,
            }],
        }
        .validated()
        .map_err(|e| format!("fallback extraction produced an invalid epic: {e}"))?;

        let mut structure =
            TicketStructure::new(project_key, IssueType::Task).map_err(|e| e.to_string())?;
        structure.epics.push(epic);
        Ok(structure)
    }
}

fn clamp_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
