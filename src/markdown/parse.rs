//! Parser: markdown text back to a ticket structure.
//!
//! The input may have been hand-edited, so the parser tolerates optional
//! sections, inconsistent spacing, and reordered fields. Recovery is
//! best-effort: a record that fails validation is dropped from the result
//! (with a diagnostic) rather than aborting the document; only a missing
//! project key aborts the whole parse, because no partial document is
//! usable without it.

use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use crate::model::{
    Bug, Effort, Environment, Epic, IssueType, Priority, Severity, Task, TechnicalDetails,
    TicketStructure, UserStory, ValidationError,
};

use super::{HEADER_SCAN_LINES, ISSUE_TYPE_LABEL, TITLE_MARKER};

/// The document could not be parsed at all.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No `# JIRA Tickets - <KEY>` line within the header.
    #[error("document is missing the project key header")]
    MissingProjectKey,
    /// The issue-type line named a kind outside the closed set.
    #[error("unsupported issue type {0:?}")]
    UnsupportedIssueType(String),
    /// The recovered header failed validation (bad project key).
    #[error("invalid document header: {0}")]
    InvalidHeader(#[from] ValidationError),
}

/// A record section omitted from the result by the partial-recovery policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// The section heading (kind and title) the diagnostic refers to.
    pub heading: String,
    /// Why the record did not construct.
    pub reason: ValidationError,
}

/// The outcome of a successful parse: the structure plus any skipped
/// sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// The recovered structure.
    pub structure: TicketStructure,
    /// Sections dropped because their records failed validation.
    pub skipped: Vec<SkippedRecord>,
}

/// Parses a markdown document back into a [`TicketStructure`].
///
/// # Errors
///
/// Returns [`ParseError::MissingProjectKey`] when no project-key line is
/// found in the first few lines, [`ParseError::UnsupportedIssueType`] for an
/// unknown issue-type tag, and [`ParseError::InvalidHeader`] when the
/// recovered project key fails the key pattern. Malformed record sections
/// never fail the parse; they appear in [`ParsedDocument::skipped`].
pub fn parse(content: &str) -> Result<ParsedDocument, ParseError> {
    let mut project_key: Option<&str> = None;
    let mut issue_type = IssueType::default();

    for line in content.lines().take(HEADER_SCAN_LINES) {
        if let Some(rest) = line.strip_prefix(TITLE_MARKER) {
            project_key = Some(rest.trim());
        } else if let Some(rest) = line.strip_prefix(ISSUE_TYPE_LABEL) {
            issue_type = rest
                .trim()
                .parse()
                .map_err(|_| ParseError::UnsupportedIssueType(rest.trim().to_string()))?;
        }
    }

    let project_key = project_key.ok_or(ParseError::MissingProjectKey)?;
    let mut structure = TicketStructure::new(project_key, issue_type)?;
    let mut skipped = Vec::new();

    match issue_type {
        IssueType::Task | IssueType::EpicOnly => {
            structure.epics = parse_epics(content, &mut skipped);
        }
        IssueType::Bug => structure.bugs = parse_bugs(content, &mut skipped),
        IssueType::Story => structure.stories = parse_stories(content, &mut skipped),
    }

    Ok(ParsedDocument { structure, skipped })
}

fn heading_regex(kind: &str) -> Regex {
    Regex::new(&format!(r"\n## {kind} \d+:")).expect("heading pattern is valid")
}

/// First line of a section chunk, i.e. the trailing text of its heading.
fn section_title(chunk: &str) -> String {
    chunk.trim().lines().next().unwrap_or("").trim().to_string()
}

/// Strips a single-character bullet marker and the following space.
///
/// Exactly the first two characters are removed, matching the serializer's
/// `- ` prefix; anything else a hand edit produced is the item's problem.
fn bullet_text(line: &str) -> String {
    line.trim().get(2..).unwrap_or("").to_string()
}

/// Splits a `<left> | **<label>**: <right>` combined line. Returns the
/// left-hand value and, when the pipe and label are present, the right-hand
/// value.
fn split_combined(rest: &str, right_label: &str) -> (String, Option<String>) {
    let rest = rest.trim();
    match rest.split_once('|') {
        Some((left, right)) => {
            let right_value =
                right.split(right_label).nth(1).map(|v| v.trim().to_string());
            (left.trim().to_string(), right_value)
        }
        None => (rest.to_string(), None),
    }
}

fn parse_or_default<T>(raw: Option<String>) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError> + Default,
{
    match raw {
        Some(value) => value.parse(),
        None => Ok(T::default()),
    }
}

// --- Epics and tasks ---

fn parse_epics(content: &str, skipped: &mut Vec<SkippedRecord>) -> Vec<Epic> {
    let epic_re = heading_regex("Epic");
    let task_re = Regex::new(r"\n#### Task \d+\.\d+:").expect("heading pattern is valid");
    let mut epics = Vec::new();

    for section in epic_re.split(content).skip(1) {
        // Epic fields live in the chunk before the first task heading;
        // scanning the whole section would let task labels clobber them.
        let mut chunks = task_re.split(section);
        let head = chunks.next().unwrap_or("");

        let mut tasks = Vec::new();
        for chunk in chunks {
            match build_task(chunk) {
                Ok(task) => tasks.push(task),
                Err(reason) => skipped.push(SkippedRecord {
                    heading: format!("Task: {}", section_title(chunk)),
                    reason,
                }),
            }
        }

        match build_epic(head, tasks) {
            Ok(epic) => epics.push(epic),
            Err(reason) => skipped.push(SkippedRecord {
                heading: format!("Epic: {}", section_title(head)),
                reason,
            }),
        }
    }

    epics
}

fn build_epic(head: &str, tasks: Vec<Task>) -> Result<Epic, ValidationError> {
    let lines: Vec<&str> = head.trim().lines().collect();
    let title = lines.first().map_or(String::new(), |l| l.trim().to_string());

    let mut description = String::new();
    let mut business_value = None;
    let mut priority_raw = None;

    for line in lines.iter().skip(1) {
        if let Some(rest) = line.strip_prefix("**Description**:") {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("**Business Value**:") {
            business_value = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("**Priority**:") {
            let (value, _) = split_combined(rest, "**Effort**:");
            priority_raw = Some(value);
        }
    }

    Epic {
        title,
        description,
        business_value,
        priority: parse_or_default(priority_raw)?,
        tasks,
    }
    .validated()
}

fn build_task(chunk: &str) -> Result<Task, ValidationError> {
    let lines: Vec<&str> = chunk.trim().lines().collect();
    let title = lines.first().map_or(String::new(), |l| l.trim().to_string());

    let mut description = String::new();
    let mut priority_raw = None;
    let mut effort_raw = None;
    let mut acceptance_criteria = Vec::new();
    let mut technical_notes = None;

    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];
        if let Some(rest) = line.strip_prefix("**Description**:") {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("**Priority**:") {
            let (priority, effort) = split_combined(rest, "**Effort**:");
            priority_raw = Some(priority);
            effort_raw = effort;
        } else if line.starts_with("**Acceptance Criteria**:") {
            i += 1;
            while i < lines.len() && lines[i].trim().starts_with('-') {
                acceptance_criteria.push(bullet_text(lines[i]));
                i += 1;
            }
            i -= 1; // back up so the outer scan sees the next label
        } else if let Some(rest) = line.strip_prefix("**Technical Notes**:") {
            technical_notes = Some(rest.trim().to_string());
        }
        i += 1;
    }

    Task {
        title,
        description,
        acceptance_criteria,
        technical_notes,
        priority: parse_or_default(priority_raw)?,
        estimated_effort: effort_raw.map(|e| e.parse::<Effort>()).transpose()?,
    }
    .validated()
}

// --- Bugs ---

fn parse_bugs(content: &str, skipped: &mut Vec<SkippedRecord>) -> Vec<Bug> {
    let bug_re = heading_regex("Bug");
    let mut bugs = Vec::new();

    for section in bug_re.split(content).skip(1) {
        match build_bug(section) {
            Ok(bug) => bugs.push(bug),
            Err(reason) => skipped.push(SkippedRecord {
                heading: format!("Bug: {}", section_title(section)),
                reason,
            }),
        }
    }

    bugs
}

fn build_bug(section: &str) -> Result<Bug, ValidationError> {
    let step_prefix = Regex::new(r"^\d+\.\s*").expect("step pattern is valid");
    let lines: Vec<&str> = section.trim().lines().collect();
    let summary = lines.first().map_or(String::new(), |l| l.trim().to_string());

    let mut description = String::new();
    let mut severity_raw = None;
    let mut priority_raw = None;
    let mut reproduction_steps = Vec::new();
    let mut environment = Environment::default();
    let mut technical_details: Option<TechnicalDetails> = None;
    let mut acceptance_criteria = Vec::new();
    let mut suggested_fix = None;

    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];
        if let Some(rest) = line.strip_prefix("**Description**:") {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("**Severity**:") {
            let (severity, priority) = split_combined(rest, "**Priority**:");
            severity_raw = Some(severity);
            priority_raw = priority;
        } else if line.starts_with("**Reproduction Steps**:") {
            i += 1;
            while i < lines.len() && step_prefix.is_match(lines[i].trim()) {
                reproduction_steps
                    .push(step_prefix.replace(lines[i].trim(), "").into_owned());
                i += 1;
            }
            i -= 1;
        } else if line.starts_with("**Environment**:") {
            i += 1;
            while i < lines.len() && lines[i].trim().starts_with('-') {
                apply_environment_entry(&mut environment, &bullet_text(lines[i]));
                i += 1;
            }
            i -= 1;
        } else if line.starts_with("**Technical Details**:") {
            let details = technical_details.get_or_insert_with(TechnicalDetails::default);
            i += 1;
            while i < lines.len() && lines[i].trim().starts_with('-') {
                apply_technical_entry(details, &bullet_text(lines[i]));
                i += 1;
            }
            i -= 1;
        } else if line.starts_with("**Fix Verification Criteria**:") {
            i += 1;
            while i < lines.len() && lines[i].trim().starts_with('-') {
                acceptance_criteria.push(bullet_text(lines[i]));
                i += 1;
            }
            i -= 1;
        } else if let Some(rest) = line.strip_prefix("**Suggested Fix**:") {
            suggested_fix = Some(rest.trim().to_string());
        }
        i += 1;
    }

    Bug {
        summary,
        description,
        severity: parse_or_default::<Severity>(severity_raw)?,
        priority: parse_or_default::<Priority>(priority_raw)?,
        reproduction_steps,
        environment,
        technical_details,
        acceptance_criteria,
        suggested_fix,
    }
    .validated()
}

/// Applies one `Key: value` environment bullet. Keys match the field names
/// case-insensitively with spaces mapped to underscores; unknown keys from
/// hand edits are ignored.
fn apply_environment_entry(environment: &mut Environment, entry: &str) {
    let Some((key, value)) = entry.split_once(':') else {
        return;
    };
    let value = Some(value.trim().to_string());
    match key.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
        "browser" => environment.browser = value,
        "os" => environment.os = value,
        "device" => environment.device = value,
        "version" => environment.version = value,
        "user_role" => environment.user_role = value,
        "data_conditions" => environment.data_conditions = value,
        _ => {}
    }
}

/// Applies one technical-details bullet. Short labels (`Error`, `Console`,
/// `Code`, `API`) map onto the long field names.
fn apply_technical_entry(details: &mut TechnicalDetails, entry: &str) {
    let Some((key, value)) = entry.split_once(':') else {
        return;
    };
    let value = Some(value.trim().to_string());
    match key.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
        "error" | "error_message" => details.error_message = value,
        "stack_trace" => details.stack_trace = value,
        "console" | "console_logs" => details.console_logs = value,
        "code" | "affected_code" => details.affected_code = value,
        "api" | "api_calls" => details.api_calls = value,
        "database_state" => details.database_state = value,
        _ => {}
    }
}

// --- Stories ---

fn parse_stories(content: &str, skipped: &mut Vec<SkippedRecord>) -> Vec<UserStory> {
    let story_re = heading_regex("Story");
    let mut stories = Vec::new();

    for section in story_re.split(content).skip(1) {
        match build_story(section) {
            Ok(story) => stories.push(story),
            Err(reason) => skipped.push(SkippedRecord {
                heading: format!("Story: {}", section_title(section)),
                reason,
            }),
        }
    }

    stories
}

fn build_story(section: &str) -> Result<UserStory, ValidationError> {
    let lines: Vec<&str> = section.trim().lines().collect();
    let title = lines.first().map_or(String::new(), |l| l.trim().to_string());

    let mut as_a = String::new();
    let mut i_want_to = String::new();
    let mut so_that = String::new();
    let mut priority_raw = None;
    let mut effort_raw = None;
    let mut acceptance_criteria = Vec::new();
    let mut technical_notes = None;

    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];
        // The user-story clauses arrive as bullets under the **User Story**
        // label, so they are matched anywhere in the line.
        if let Some(rest) = line.split("**As a**:").nth(1) {
            as_a = rest.trim().to_string();
        } else if let Some(rest) = line.split("**I want to**:").nth(1) {
            i_want_to = rest.trim().to_string();
        } else if let Some(rest) = line.split("**So that**:").nth(1) {
            so_that = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("**Priority**:") {
            let (priority, effort) = split_combined(rest, "**Effort**:");
            priority_raw = Some(priority);
            effort_raw = effort;
        } else if line.starts_with("**Acceptance Criteria**:") {
            i += 1;
            while i < lines.len() && lines[i].trim().starts_with('-') {
                acceptance_criteria.push(bullet_text(lines[i]));
                i += 1;
            }
            i -= 1;
        } else if let Some(rest) = line.strip_prefix("**Technical Notes**:") {
            technical_notes = Some(rest.trim().to_string());
        }
        i += 1;
    }

    UserStory {
        title,
        as_a,
        i_want_to,
        so_that,
        acceptance_criteria,
        priority: parse_or_default(priority_raw)?,
        estimated_effort: effort_raw.map(|e| e.parse::<Effort>()).transpose()?,
        technical_notes,
    }
    .validated()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUG_DOC: &str = "\
# JIRA Tickets - PROJ

**Issue Type**: bug

---

## Bug 1: Login fails on Safari

**Description**: Button does nothing on tap

**Severity**: High | **Priority**: High

**Reproduction Steps**:
1. Open Safari
2. Tap login
3. Observe no response

---
";

    #[test]
    fn parses_the_safari_bug_document() {
        let parsed = parse(BUG_DOC).unwrap();
        assert_eq!(parsed.structure.project_key, "PROJ");
        assert_eq!(parsed.structure.issue_type, IssueType::Bug);
        assert_eq!(parsed.structure.bugs.len(), 1);
        assert!(parsed.skipped.is_empty());

        let bug = &parsed.structure.bugs[0];
        assert_eq!(bug.summary, "Login fails on Safari");
        assert_eq!(bug.severity, Severity::High);
        assert_eq!(bug.priority, Priority::High);
        assert_eq!(
            bug.reproduction_steps,
            vec!["Open Safari", "Tap login", "Observe no response"]
        );
    }

    #[test]
    fn missing_project_key_aborts() {
        let doc = "**Issue Type**: bug\n\n## Bug 1: Something is quite broken\n";
        assert!(matches!(parse(doc), Err(ParseError::MissingProjectKey)));
    }

    #[test]
    fn missing_project_key_aborts_even_with_well_formed_body() {
        let doc = BUG_DOC.replace("# JIRA Tickets - PROJ\n", "");
        assert!(matches!(parse(&doc), Err(ParseError::MissingProjectKey)));
    }

    #[test]
    fn unknown_issue_type_aborts() {
        let doc = "# JIRA Tickets - PROJ\n\n**Issue Type**: incident\n";
        assert!(matches!(parse(doc), Err(ParseError::UnsupportedIssueType(_))));
    }

    #[test]
    fn bad_project_key_aborts() {
        let doc = BUG_DOC.replace("PROJ", "proj");
        assert!(matches!(parse(&doc), Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn missing_issue_type_defaults_to_task() {
        let doc = "# JIRA Tickets - PROJ\n";
        let parsed = parse(doc).unwrap();
        assert_eq!(parsed.structure.issue_type, IssueType::Task);
        assert!(!parsed.structure.has_content());
    }

    #[test]
    fn bug_without_enough_steps_is_dropped_not_fatal() {
        let doc = format!(
            "{BUG_DOC}
## Bug 2: Dashboard chart renders blank

**Description**: The revenue chart shows an empty frame

**Severity**: Medium | **Priority**: Low

---
"
        );
        let parsed = parse(&doc).unwrap();
        assert_eq!(parsed.structure.bugs.len(), 1);
        assert_eq!(parsed.structure.bugs[0].summary, "Login fails on Safari");
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(
            parsed.skipped[0].reason,
            ValidationError::TooFewReproductionSteps { got: 0 }
        );
        assert!(parsed.skipped[0].heading.contains("Dashboard chart"));
    }

    #[test]
    fn unknown_enum_value_drops_the_record() {
        let doc = BUG_DOC.replace("**Severity**: High", "**Severity**: Catastrophic");
        let parsed = parse(&doc).unwrap();
        assert!(parsed.structure.bugs.is_empty());
        assert_eq!(
            parsed.skipped[0].reason,
            ValidationError::UnknownValue {
                what: "severity",
                value: "Catastrophic".to_string()
            }
        );
    }

    #[test]
    fn missing_severity_line_defaults_to_medium() {
        let doc = BUG_DOC.replace("**Severity**: High | **Priority**: High\n\n", "");
        let parsed = parse(&doc).unwrap();
        let bug = &parsed.structure.bugs[0];
        assert_eq!(bug.severity, Severity::Medium);
        assert_eq!(bug.priority, Priority::Medium);
    }

    /// The fixture with extra blocks inserted before the closing separator.
    fn bug_doc_with(extra: &str) -> String {
        format!("{}{extra}", BUG_DOC.trim_end_matches("---\n"))
    }

    #[test]
    fn environment_and_technical_bullets_are_recovered() {
        let doc = bug_doc_with(
            "**Environment**:
- Browser: Safari 17
- OS: iOS 17
- Data Conditions: Valid credentials

**Technical Details**:
- Error: TypeError in LoginForm
- Stack Trace: at submit (LoginForm.tsx)

---
",
        );
        let parsed = parse(&doc).unwrap();
        let bug = &parsed.structure.bugs[0];
        assert_eq!(bug.environment.browser.as_deref(), Some("Safari 17"));
        assert_eq!(bug.environment.os.as_deref(), Some("iOS 17"));
        assert_eq!(
            bug.environment.data_conditions.as_deref(),
            Some("Valid credentials")
        );
        let tech = bug.technical_details.as_ref().unwrap();
        assert_eq!(tech.error_message.as_deref(), Some("TypeError in LoginForm"));
        assert_eq!(
            tech.stack_trace.as_deref(),
            Some("at submit (LoginForm.tsx)")
        );
        assert!(tech.console_logs.is_none());
    }

    #[test]
    fn unknown_environment_keys_are_ignored() {
        let doc = bug_doc_with(
            "**Environment**:
- Browser: Safari 17
- Locale: en-US

---
",
        );
        let parsed = parse(&doc).unwrap();
        let bug = &parsed.structure.bugs[0];
        assert_eq!(bug.environment.browser.as_deref(), Some("Safari 17"));
        assert!(bug.environment.user_role.is_none());
    }

    #[test]
    fn bullet_run_ends_at_next_label() {
        // The Suggested Fix label directly follows the criteria bullets;
        // the cursor must back up so the label is not skipped.
        let doc = bug_doc_with(
            "**Fix Verification Criteria**:
- Login works on Safari
- Regression test added
**Suggested Fix**: Add touchend handler

---
",
        );
        let parsed = parse(&doc).unwrap();
        let bug = &parsed.structure.bugs[0];
        assert_eq!(bug.acceptance_criteria.len(), 2);
        assert_eq!(bug.suggested_fix.as_deref(), Some("Add touchend handler"));
    }

    #[test]
    fn continuation_lines_are_ignored() {
        let doc = BUG_DOC.replace(
            "**Description**: Button does nothing on tap\n",
            "**Description**: Button does nothing on tap\nthis continuation line is dropped\n",
        );
        let parsed = parse(&doc).unwrap();
        assert_eq!(
            parsed.structure.bugs[0].description,
            "Button does nothing on tap"
        );
    }

    const EPIC_DOC: &str = "\
# JIRA Tickets - WEB

**Issue Type**: task

---

## Epic 1: User authentication

**Description**: Secure login and account management

**Business Value**: Enables personalized access

**Priority**: High

### Tasks (2)

#### Task 1.1: Build login endpoint

**Description**: POST /api/auth/login returning JWT tokens

**Priority**: High | **Effort**: Medium

**Acceptance Criteria**:
- Returns access and refresh tokens
- Rejects invalid credentials with 401

**Technical Notes**: Use httpOnly cookies

---

#### Task 1.2: Password reset flow

**Description**: Email-based reset with expiring token

**Priority**: Medium

---
";

    #[test]
    fn epic_fields_are_not_clobbered_by_task_fields() {
        let parsed = parse(EPIC_DOC).unwrap();
        let epic = &parsed.structure.epics[0];
        assert_eq!(epic.title, "User authentication");
        assert_eq!(epic.description, "Secure login and account management");
        assert_eq!(epic.business_value.as_deref(), Some("Enables personalized access"));
        assert_eq!(epic.priority, Priority::High);
    }

    #[test]
    fn nested_tasks_are_recovered_in_order() {
        use crate::model::Effort;
        let parsed = parse(EPIC_DOC).unwrap();
        let epic = &parsed.structure.epics[0];
        assert_eq!(epic.tasks.len(), 2);

        let first = &epic.tasks[0];
        assert_eq!(first.title, "Build login endpoint");
        assert_eq!(first.priority, Priority::High);
        assert_eq!(first.estimated_effort, Some(Effort::Medium));
        assert_eq!(first.acceptance_criteria.len(), 2);
        assert_eq!(first.technical_notes.as_deref(), Some("Use httpOnly cookies"));

        let second = &epic.tasks[1];
        assert_eq!(second.title, "Password reset flow");
        assert!(second.estimated_effort.is_none());
        assert!(second.acceptance_criteria.is_empty());
    }

    #[test]
    fn invalid_task_is_dropped_but_epic_survives() {
        let doc = EPIC_DOC.replace(
            "#### Task 1.2: Password reset flow\n\n**Description**: Email-based reset with expiring token\n",
            "#### Task 1.2: Password reset flow\n",
        );
        let parsed = parse(&doc).unwrap();
        let epic = &parsed.structure.epics[0];
        assert_eq!(epic.tasks.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(parsed.skipped[0].heading.starts_with("Task:"));
    }

    const STORY_DOC: &str = "\
# JIRA Tickets - APP

**Issue Type**: story

---

## Story 1: User can reset a forgotten password

**User Story**:
- **As a**: registered user who forgot their password
- **I want to**: receive a reset link via email
- **So that**: I can regain access to my account

**Priority**: High | **Effort**: Medium

**Acceptance Criteria**:
- Reset form is reachable from the login page
- Reset link arrives within five minutes
- Expired links show a clear error

---
";

    #[test]
    fn story_clauses_and_criteria_are_recovered() {
        use crate::model::Effort;
        let parsed = parse(STORY_DOC).unwrap();
        let story = &parsed.structure.stories[0];
        assert_eq!(story.title, "User can reset a forgotten password");
        assert_eq!(story.as_a, "registered user who forgot their password");
        assert_eq!(story.i_want_to, "receive a reset link via email");
        assert_eq!(story.so_that, "I can regain access to my account");
        assert_eq!(story.priority, Priority::High);
        assert_eq!(story.estimated_effort, Some(Effort::Medium));
        assert_eq!(story.acceptance_criteria.len(), 3);
    }

    #[test]
    fn hand_edited_spacing_is_tolerated() {
        let doc = STORY_DOC
            .replace("**Priority**: High | **Effort**: Medium", "**Priority**:   High |  **Effort**:  Medium")
            .replace("- **As a**: registered", "- **As a**:    registered");
        let parsed = parse(&doc).unwrap();
        let story = &parsed.structure.stories[0];
        assert_eq!(story.priority, Priority::High);
        assert_eq!(story.as_a, "registered user who forgot their password");
    }

    #[test]
    fn story_with_two_criteria_is_dropped() {
        let doc = STORY_DOC.replace("- Expired links show a clear error\n", "");
        let parsed = parse(&doc).unwrap();
        assert!(parsed.structure.stories.is_empty());
        assert_eq!(
            parsed.skipped[0].reason,
            ValidationError::TooFewAcceptanceCriteria { got: 2 }
        );
    }
}
