//! Record types and the container structure.

use serde::{Deserialize, Serialize};

use super::enums::{Effort, IssueType, Priority, Severity};
use super::error::ValidationError;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_range(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = char_len(value);
    if len < min || len > max {
        return Err(ValidationError::LengthOutOfRange { field, min, max, len });
    }
    Ok(())
}

fn check_min(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    let len = char_len(value);
    if len < min {
        return Err(ValidationError::TooShort { field, min, len });
    }
    Ok(())
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// An actionable work item owned by exactly one [`Epic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Title, 5-200 characters.
    pub title: String,
    /// What to build and why.
    pub description: String,
    /// Testable completion criteria; may be empty.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Implementation hints (APIs, schemas, dependencies).
    #[serde(default)]
    pub technical_notes: Option<String>,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Rough size estimate.
    #[serde(default)]
    pub estimated_effort: Option<Effort>,
}

impl Task {
    /// Checks the task's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the title is outside 5-200
    /// characters or the description is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("task title", &self.title, 5, 200)?;
        check_non_empty("task description", &self.description)
    }

    /// Consumes the task, returning it only if valid.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Task::validate`].
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}

/// A high-level feature or initiative owning zero or more tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    /// Title, 5-200 characters.
    pub title: String,
    /// Why this matters.
    pub description: String,
    /// Who benefits and what value is delivered.
    #[serde(default)]
    pub business_value: Option<String>,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Owned tasks, in order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Epic {
    /// Checks the epic's invariants, including every owned task.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the title is outside 5-200
    /// characters, the description is empty, or any task is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("epic title", &self.title, 5, 200)?;
        check_non_empty("epic description", &self.description)?;
        for task in &self.tasks {
            task.validate()?;
        }
        Ok(())
    }

    /// Consumes the epic, returning it only if valid.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Epic::validate`].
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}

/// Where a bug was observed. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Browser name/version.
    #[serde(default)]
    pub browser: Option<String>,
    /// Operating system.
    #[serde(default)]
    pub os: Option<String>,
    /// Device type.
    #[serde(default)]
    pub device: Option<String>,
    /// Application version.
    #[serde(default)]
    pub version: Option<String>,
    /// Role or permissions of the affected user.
    #[serde(default)]
    pub user_role: Option<String>,
    /// Data preconditions for the bug to appear.
    #[serde(default)]
    pub data_conditions: Option<String>,
}

impl Environment {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.browser.is_none()
            && self.os.is_none()
            && self.device.is_none()
            && self.version.is_none()
            && self.user_role.is_none()
            && self.data_conditions.is_none()
    }
}

/// Diagnostic material attached to a bug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDetails {
    /// Exact error message text.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Stack trace.
    #[serde(default)]
    pub stack_trace: Option<String>,
    /// Console output.
    #[serde(default)]
    pub console_logs: Option<String>,
    /// File/line or component affected.
    #[serde(default)]
    pub affected_code: Option<String>,
    /// Failing network requests.
    #[serde(default)]
    pub api_calls: Option<String>,
    /// Relevant database state.
    #[serde(default)]
    pub database_state: Option<String>,
}

impl TechnicalDetails {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_message.is_none()
            && self.stack_trace.is_none()
            && self.console_logs.is_none()
            && self.affected_code.is_none()
            && self.api_calls.is_none()
            && self.database_state.is_none()
    }
}

/// A bug report. Invariant: at least three reproduction steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    /// One-line summary, 10-200 characters.
    pub summary: String,
    /// Problem statement, at least 20 characters.
    pub description: String,
    /// Impact severity.
    #[serde(default)]
    pub severity: Severity,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Numbered steps to reproduce; minimum three.
    pub reproduction_steps: Vec<String>,
    /// Where the bug occurs.
    #[serde(default)]
    pub environment: Environment,
    /// Diagnostic material, when available.
    #[serde(default)]
    pub technical_details: Option<TechnicalDetails>,
    /// How to verify the fix; may be empty.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Proposed remedy.
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

impl Bug {
    /// Checks the bug's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the summary is outside 10-200
    /// characters, the description is shorter than 20 characters, or there
    /// are fewer than three reproduction steps.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("bug summary", &self.summary, 10, 200)?;
        check_min("bug description", &self.description, 20)?;
        if self.reproduction_steps.len() < 3 {
            return Err(ValidationError::TooFewReproductionSteps {
                got: self.reproduction_steps.len(),
            });
        }
        Ok(())
    }

    /// Consumes the bug, returning it only if valid.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Bug::validate`].
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}

/// An agile user story. Invariant: at least three acceptance criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    /// Title, 10-200 characters.
    pub title: String,
    /// Role or persona, at least 5 characters.
    pub as_a: String,
    /// Desired action or feature, at least 10 characters.
    pub i_want_to: String,
    /// Business value or benefit, at least 10 characters.
    pub so_that: String,
    /// Testable criteria; minimum three.
    pub acceptance_criteria: Vec<String>,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Rough size estimate.
    #[serde(default)]
    pub estimated_effort: Option<Effort>,
    /// Implementation hints.
    #[serde(default)]
    pub technical_notes: Option<String>,
}

impl UserStory {
    /// Checks the story's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the title is outside 10-200
    /// characters, any of the as-a / i-want-to / so-that clauses is below
    /// its minimum length, or there are fewer than three acceptance
    /// criteria.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("story title", &self.title, 10, 200)?;
        check_min("as_a", &self.as_a, 5)?;
        check_min("i_want_to", &self.i_want_to, 10)?;
        check_min("so_that", &self.so_that, 10)?;
        if self.acceptance_criteria.len() < 3 {
            return Err(ValidationError::TooFewAcceptanceCriteria {
                got: self.acceptance_criteria.len(),
            });
        }
        Ok(())
    }

    /// Consumes the story, returning it only if valid.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserStory::validate`].
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}

/// Container for every record extracted from one input.
///
/// The `issue_type` tag determines which of the three sequences is
/// populated; the serializer and parser only read/write the matching one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketStructure {
    /// Jira project key, e.g. `PROJ`. Must match `[A-Z][A-Z0-9]{1,9}`.
    pub project_key: String,
    /// Which record kind this structure carries.
    #[serde(default)]
    pub issue_type: IssueType,
    /// Epics (populated for `task` / `epic-only`).
    #[serde(default)]
    pub epics: Vec<Epic>,
    /// Bugs (populated for `bug`).
    #[serde(default)]
    pub bugs: Vec<Bug>,
    /// User stories (populated for `story`).
    #[serde(default)]
    pub stories: Vec<UserStory>,
}

impl TicketStructure {
    /// Creates an empty structure for the given project and kind.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProjectKey`] when the key does not
    /// match the required pattern.
    pub fn new(project_key: &str, issue_type: IssueType) -> Result<Self, ValidationError> {
        check_project_key(project_key)?;
        Ok(Self {
            project_key: project_key.to_string(),
            issue_type,
            epics: Vec::new(),
            bugs: Vec::new(),
            stories: Vec::new(),
        })
    }

    /// Returns `true` when any of the three sequences is non-empty.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.epics.is_empty() || !self.bugs.is_empty() || !self.stories.is_empty()
    }

    /// Total record count: epics, their tasks, bugs, and stories.
    #[must_use]
    pub fn count_total_items(&self) -> usize {
        let epic_tasks: usize = self.epics.iter().map(|e| e.tasks.len()).sum();
        self.epics.len() + epic_tasks + self.bugs.len() + self.stories.len()
    }

    /// Checks the project key and every contained record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_project_key(&self.project_key)?;
        for epic in &self.epics {
            epic.validate()?;
        }
        for bug in &self.bugs {
            bug.validate()?;
        }
        for story in &self.stories {
            story.validate()?;
        }
        Ok(())
    }
}

/// Checks the `[A-Z][A-Z0-9]{1,9}` project-key pattern.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidProjectKey`] on mismatch.
pub(crate) fn check_project_key(key: &str) -> Result<(), ValidationError> {
    let mut chars = key.chars();
    let lead_ok = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let rest: Vec<char> = chars.collect();
    let rest_ok = (1..=9).contains(&rest.len())
        && rest.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if lead_ok && rest_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidProjectKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bug(steps: usize) -> Bug {
        Bug {
            summary: "Login fails on Safari".to_string(),
            description: "Button does nothing on tap, no error shown".to_string(),
            severity: Severity::High,
            priority: Priority::High,
            reproduction_steps: (0..steps).map(|i| format!("Step {i}")).collect(),
            environment: Environment::default(),
            technical_details: None,
            acceptance_criteria: Vec::new(),
            suggested_fix: None,
        }
    }

    #[test]
    fn bug_with_two_steps_never_constructs() {
        let err = sample_bug(2).validated().unwrap_err();
        assert_eq!(err, ValidationError::TooFewReproductionSteps { got: 2 });
    }

    #[test]
    fn bug_with_three_steps_is_valid() {
        assert!(sample_bug(3).validated().is_ok());
    }

    #[test]
    fn bug_short_description_rejected() {
        let mut bug = sample_bug(3);
        bug.description = "too short".to_string();
        assert!(matches!(
            bug.validate(),
            Err(ValidationError::TooShort { field: "bug description", .. })
        ));
    }

    #[test]
    fn story_needs_three_criteria() {
        let story = UserStory {
            title: "User can reset password".to_string(),
            as_a: "registered user".to_string(),
            i_want_to: "reset my forgotten password".to_string(),
            so_that: "I can regain account access".to_string(),
            acceptance_criteria: vec!["one".to_string(), "two".to_string()],
            priority: Priority::Medium,
            estimated_effort: None,
            technical_notes: None,
        };
        assert_eq!(
            story.validated().unwrap_err(),
            ValidationError::TooFewAcceptanceCriteria { got: 2 }
        );
    }

    #[test]
    fn task_title_bounds_are_chars_not_bytes() {
        let task = Task {
            title: "héllo".to_string(),
            description: "does a thing".to_string(),
            acceptance_criteria: Vec::new(),
            technical_notes: None,
            priority: Priority::Medium,
            estimated_effort: None,
        };
        assert!(task.validate().is_ok());
    }

    #[test]
    fn epic_validates_owned_tasks() {
        let epic = Epic {
            title: "Authentication".to_string(),
            description: "Secure login flows".to_string(),
            business_value: None,
            priority: Priority::High,
            tasks: vec![Task {
                title: "x".to_string(),
                description: "short title".to_string(),
                acceptance_criteria: Vec::new(),
                technical_notes: None,
                priority: Priority::Medium,
                estimated_effort: None,
            }],
        };
        assert!(matches!(
            epic.validate(),
            Err(ValidationError::LengthOutOfRange { field: "task title", .. })
        ));
    }

    #[test]
    fn project_key_pattern() {
        assert!(check_project_key("PROJ").is_ok());
        assert!(check_project_key("A1").is_ok());
        assert!(check_project_key("ABCDEFGHIJ").is_ok());
        assert!(check_project_key("A").is_err());
        assert!(check_project_key("proj").is_err());
        assert!(check_project_key("1ABC").is_err());
        assert!(check_project_key("ABCDEFGHIJK").is_err());
        assert!(check_project_key("").is_err());
    }

    #[test]
    fn count_total_items_includes_nested_tasks() {
        let mut structure = TicketStructure::new("PROJ", IssueType::Task).unwrap();
        structure.epics.push(Epic {
            title: "Feature work".to_string(),
            description: "desc".to_string(),
            business_value: None,
            priority: Priority::Medium,
            tasks: vec![
                Task {
                    title: "First task".to_string(),
                    description: "d".to_string(),
                    acceptance_criteria: Vec::new(),
                    technical_notes: None,
                    priority: Priority::Medium,
                    estimated_effort: None,
                },
                Task {
                    title: "Second task".to_string(),
                    description: "d".to_string(),
                    acceptance_criteria: Vec::new(),
                    technical_notes: None,
                    priority: Priority::Medium,
                    estimated_effort: None,
                },
            ],
        });
        assert_eq!(structure.count_total_items(), 3);
        assert!(structure.has_content());
    }

    #[test]
    fn empty_structure_has_no_content() {
        let structure = TicketStructure::new("PROJ", IssueType::Bug).unwrap();
        assert!(!structure.has_content());
        assert_eq!(structure.count_total_items(), 0);
    }

    #[test]
    fn llm_payload_deserializes_with_defaults() {
        let json = r#"{
            "title": "Implement login endpoint",
            "description": "POST /api/auth/login with JWT"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.acceptance_criteria.is_empty());
        assert!(task.estimated_effort.is_none());
    }
}
