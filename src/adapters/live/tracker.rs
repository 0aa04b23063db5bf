//! Live Jira adapter for the `IssueTracker` port.
//!
//! Talks to the Jira Cloud REST API v3 with basic auth (email + API token).
//! Descriptions are Atlassian document format bodies assembled from the
//! record's fields.

use std::fmt::Write as _;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::model::{Bug, Epic, Task, UserStory};
use crate::ports::tracker::{IssueTracker, TrackerFuture};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Client for the Jira REST API.
pub struct JiraClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Creates a client for the given Jira instance.
    #[must_use]
    pub fn new(jira_url: &str, email: &str, api_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: jira_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_token: api_token.to_string(),
        }
    }

    /// Checks that the credentials work by fetching the current user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn test_connection(&self) -> Result<(), BoxError> {
        let response = self
            .client
            .get(format!("{}/rest/api/3/myself", self.base_url))
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| -> BoxError { format!("Jira request failed: {e}").into() })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("Jira connection check failed ({})", status.as_u16()).into())
        }
    }

    async fn create_issue(&self, payload: Value) -> Result<String, BoxError> {
        let response = self
            .client
            .post(format!("{}/rest/api/3/issue", self.base_url))
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| -> BoxError { format!("Jira request failed: {e}").into() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| -> BoxError { format!("Failed to read Jira response: {e}").into() })?;

        if !status.is_success() {
            return Err(format!("Failed to create issue ({}): {text}", status.as_u16()).into());
        }

        let created: CreatedIssue = serde_json::from_str(&text)
            .map_err(|e| -> BoxError { format!("Failed to parse Jira response: {e}").into() })?;
        Ok(created.key)
    }
}

#[derive(Deserialize)]
struct CreatedIssue {
    key: String,
}

/// Wraps plain text in an Atlassian document format body.
fn adf_document(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [{ "type": "text", "text": text }]
            }
        ]
    })
}

fn issue_payload(
    project_key: &str,
    summary: &str,
    description: &str,
    kind: &str,
    priority: &str,
) -> Value {
    json!({
        "fields": {
            "project": { "key": project_key },
            "summary": summary,
            "description": adf_document(description),
            "issuetype": { "name": kind },
            "priority": { "name": priority }
        }
    })
}

fn epic_body(epic: &Epic) -> String {
    let mut body = epic.description.clone();
    if let Some(value) = &epic.business_value {
        let _ = write!(body, "\n\n**Business Value**: {value}");
    }
    body
}

fn task_body(task: &Task) -> String {
    let mut body = task.description.clone();
    if !task.acceptance_criteria.is_empty() {
        body.push_str("\n\n**Acceptance Criteria**:");
        for criterion in &task.acceptance_criteria {
            let _ = write!(body, "\n- {criterion}");
        }
    }
    if let Some(notes) = &task.technical_notes {
        let _ = write!(body, "\n\n**Technical Notes**: {notes}");
    }
    body
}

fn bug_body(bug: &Bug) -> String {
    let mut body = bug.description.clone();

    body.push_str("\n\n**Reproduction Steps**:");
    for (i, step) in bug.reproduction_steps.iter().enumerate() {
        let _ = write!(body, "\n{}. {step}", i + 1);
    }

    if !bug.environment.is_empty() {
        body.push_str("\n\n**Environment**:");
        let env = &bug.environment;
        for (key, value) in [
            ("Browser", &env.browser),
            ("OS", &env.os),
            ("Device", &env.device),
        ] {
            if let Some(value) = value {
                let _ = write!(body, "\n- {key}: {value}");
            }
        }
    }

    if let Some(error) = bug.technical_details.as_ref().and_then(|t| t.error_message.as_ref()) {
        let _ = write!(body, "\n\n**Error**: {error}");
    }

    if !bug.acceptance_criteria.is_empty() {
        body.push_str("\n\n**Fix Verification**:");
        for criterion in &bug.acceptance_criteria {
            let _ = write!(body, "\n- {criterion}");
        }
    }

    body
}

fn story_body(story: &UserStory) -> String {
    let mut body = format!(
        "**As a**: {}\n**I want to**: {}\n**So that**: {}",
        story.as_a, story.i_want_to, story.so_that
    );
    if !story.acceptance_criteria.is_empty() {
        body.push_str("\n\n**Acceptance Criteria**:");
        for criterion in &story.acceptance_criteria {
            let _ = write!(body, "\n- {criterion}");
        }
    }
    body
}

impl IssueTracker for JiraClient {
    fn create_epic(&self, project_key: &str, epic: &Epic) -> TrackerFuture<'_> {
        let payload = issue_payload(
            project_key,
            &epic.title,
            &epic_body(epic),
            "Epic",
            epic.priority.as_str(),
        );
        Box::pin(async move { self.create_issue(payload).await })
    }

    fn create_task(
        &self,
        project_key: &str,
        task: &Task,
        parent_key: Option<&str>,
    ) -> TrackerFuture<'_> {
        let mut payload = issue_payload(
            project_key,
            &task.title,
            &task_body(task),
            "Task",
            task.priority.as_str(),
        );
        if let Some(parent) = parent_key {
            payload["fields"]["parent"] = json!({ "key": parent });
        }
        Box::pin(async move { self.create_issue(payload).await })
    }

    fn create_bug(&self, project_key: &str, bug: &Bug) -> TrackerFuture<'_> {
        let payload = issue_payload(
            project_key,
            &bug.summary,
            &bug_body(bug),
            "Bug",
            bug.priority.as_str(),
        );
        Box::pin(async move { self.create_issue(payload).await })
    }

    fn create_story(&self, project_key: &str, story: &UserStory) -> TrackerFuture<'_> {
        let payload = issue_payload(
            project_key,
            &story.title,
            &story_body(story),
            "Story",
            story.priority.as_str(),
        );
        Box::pin(async move { self.create_issue(payload).await })
    }
}
