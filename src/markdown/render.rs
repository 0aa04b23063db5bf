//! Serializer: ticket structure to markdown text.

use std::fmt::Write as _;

use crate::model::{Bug, Epic, IssueType, TicketStructure, UserStory};

use super::{ISSUE_TYPE_LABEL, TITLE_MARKER};

/// Renders a structure as a markdown document.
///
/// Deterministic and total over valid structures: the same structure always
/// produces byte-identical text, and nothing in the document depends on the
/// wall clock (the generated-at stamp lives in the filename instead). Only
/// the sequence matching `issue_type` is rendered.
#[must_use]
pub fn render(structure: &TicketStructure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE_MARKER}{}", structure.project_key);
    out.push('\n');
    let _ = writeln!(out, "{ISSUE_TYPE_LABEL} {}", structure.issue_type);
    out.push('\n');
    push_separator(&mut out);

    match structure.issue_type {
        IssueType::Task | IssueType::EpicOnly => render_epics(&mut out, &structure.epics),
        IssueType::Bug => render_bugs(&mut out, &structure.bugs),
        IssueType::Story => render_stories(&mut out, &structure.stories),
    }

    out
}

fn push_separator(out: &mut String) {
    out.push_str("---\n\n");
}

fn push_labeled(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "**{label}**: {value}");
    out.push('\n');
}

fn push_bullets(out: &mut String, label: &str, items: &[String]) {
    let _ = writeln!(out, "**{label}**:");
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
    out.push('\n');
}

fn render_epics(out: &mut String, epics: &[Epic]) {
    for (i, epic) in epics.iter().enumerate() {
        let n = i + 1;
        let _ = writeln!(out, "## Epic {n}: {}", epic.title);
        out.push('\n');
        push_labeled(out, "Description", &epic.description);
        if let Some(value) = &epic.business_value {
            push_labeled(out, "Business Value", value);
        }
        push_labeled(out, "Priority", epic.priority.as_str());

        if epic.tasks.is_empty() {
            push_separator(out);
            continue;
        }

        let _ = writeln!(out, "### Tasks ({})", epic.tasks.len());
        out.push('\n');
        for (j, task) in epic.tasks.iter().enumerate() {
            let _ = writeln!(out, "#### Task {n}.{}: {}", j + 1, task.title);
            out.push('\n');
            push_labeled(out, "Description", &task.description);
            match task.estimated_effort {
                Some(effort) => {
                    let _ = writeln!(
                        out,
                        "**Priority**: {} | **Effort**: {effort}",
                        task.priority
                    );
                    out.push('\n');
                }
                None => push_labeled(out, "Priority", task.priority.as_str()),
            }
            if !task.acceptance_criteria.is_empty() {
                push_bullets(out, "Acceptance Criteria", &task.acceptance_criteria);
            }
            if let Some(notes) = &task.technical_notes {
                push_labeled(out, "Technical Notes", notes);
            }
            push_separator(out);
        }
    }
}

fn render_bugs(out: &mut String, bugs: &[Bug]) {
    for (i, bug) in bugs.iter().enumerate() {
        let _ = writeln!(out, "## Bug {}: {}", i + 1, bug.summary);
        out.push('\n');
        push_labeled(out, "Description", &bug.description);
        let _ = writeln!(out, "**Severity**: {} | **Priority**: {}", bug.severity, bug.priority);
        out.push('\n');

        let _ = writeln!(out, "**Reproduction Steps**:");
        for (k, step) in bug.reproduction_steps.iter().enumerate() {
            let _ = writeln!(out, "{}. {step}", k + 1);
        }
        out.push('\n');

        if !bug.environment.is_empty() {
            let env = &bug.environment;
            let _ = writeln!(out, "**Environment**:");
            push_field_bullet(out, "Browser", env.browser.as_deref());
            push_field_bullet(out, "OS", env.os.as_deref());
            push_field_bullet(out, "Device", env.device.as_deref());
            push_field_bullet(out, "Version", env.version.as_deref());
            push_field_bullet(out, "User Role", env.user_role.as_deref());
            push_field_bullet(out, "Data Conditions", env.data_conditions.as_deref());
            out.push('\n');
        }

        if let Some(tech) = &bug.technical_details {
            let _ = writeln!(out, "**Technical Details**:");
            push_field_bullet(out, "Error", tech.error_message.as_deref());
            push_field_bullet(out, "Stack Trace", tech.stack_trace.as_deref());
            push_field_bullet(out, "Console", tech.console_logs.as_deref());
            push_field_bullet(out, "Code", tech.affected_code.as_deref());
            push_field_bullet(out, "API", tech.api_calls.as_deref());
            push_field_bullet(out, "Database State", tech.database_state.as_deref());
            out.push('\n');
        }

        if !bug.acceptance_criteria.is_empty() {
            push_bullets(out, "Fix Verification Criteria", &bug.acceptance_criteria);
        }

        if let Some(fix) = &bug.suggested_fix {
            push_labeled(out, "Suggested Fix", fix);
        }

        push_separator(out);
    }
}

fn push_field_bullet(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "- {key}: {value}");
    }
}

fn render_stories(out: &mut String, stories: &[UserStory]) {
    for (i, story) in stories.iter().enumerate() {
        let _ = writeln!(out, "## Story {}: {}", i + 1, story.title);
        out.push('\n');

        let _ = writeln!(out, "**User Story**:");
        let _ = writeln!(out, "- **As a**: {}", story.as_a);
        let _ = writeln!(out, "- **I want to**: {}", story.i_want_to);
        let _ = writeln!(out, "- **So that**: {}", story.so_that);
        out.push('\n');

        match story.estimated_effort {
            Some(effort) => {
                let _ =
                    writeln!(out, "**Priority**: {} | **Effort**: {effort}", story.priority);
                out.push('\n');
            }
            None => push_labeled(out, "Priority", story.priority.as_str()),
        }

        if !story.acceptance_criteria.is_empty() {
            push_bullets(out, "Acceptance Criteria", &story.acceptance_criteria);
        }

        if let Some(notes) = &story.technical_notes {
            push_labeled(out, "Technical Notes", notes);
        }

        push_separator(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Environment, Priority, Severity};

    fn safari_bug_structure() -> TicketStructure {
        let mut structure = TicketStructure::new("PROJ", IssueType::Bug).unwrap();
        structure.bugs.push(
            Bug {
                summary: "Login fails on Safari".to_string(),
                description: "Button does nothing on tap".to_string(),
                severity: Severity::High,
                priority: Priority::High,
                reproduction_steps: vec![
                    "Open Safari".to_string(),
                    "Tap login".to_string(),
                    "Observe no response".to_string(),
                ],
                environment: Environment::default(),
                technical_details: None,
                acceptance_criteria: Vec::new(),
                suggested_fix: None,
            }
            .validated()
            .unwrap(),
        );
        structure
    }

    #[test]
    fn bug_document_contains_required_lines() {
        let doc = render(&safari_bug_structure());
        assert!(doc.starts_with("# JIRA Tickets - PROJ\n"));
        assert!(doc.contains("**Issue Type**: bug\n"));
        assert!(doc.contains("## Bug 1: Login fails on Safari\n"));
        assert!(doc.contains("**Severity**: High | **Priority**: High\n"));
        assert!(doc.contains("1. Open Safari\n"));
        assert!(doc.contains("2. Tap login\n"));
        assert!(doc.contains("3. Observe no response\n"));
        // Exactly three numbered step lines.
        let steps = doc
            .lines()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(steps, 3);
    }

    #[test]
    fn empty_environment_emits_no_line() {
        let doc = render(&safari_bug_structure());
        assert!(!doc.contains("**Environment**:"));
    }

    #[test]
    fn absent_optional_fields_emit_nothing() {
        let doc = render(&safari_bug_structure());
        assert!(!doc.contains("**Technical Details**:"));
        assert!(!doc.contains("**Suggested Fix**:"));
        assert!(!doc.contains("**Fix Verification Criteria**:"));
    }

    #[test]
    fn task_effort_shares_the_priority_line() {
        use crate::model::{Effort, Task};
        let mut structure = TicketStructure::new("PROJ", IssueType::Task).unwrap();
        structure.epics.push(Epic {
            title: "Authentication".to_string(),
            description: "Login flows".to_string(),
            business_value: None,
            priority: Priority::High,
            tasks: vec![Task {
                title: "Build login endpoint".to_string(),
                description: "POST /api/auth/login".to_string(),
                acceptance_criteria: vec!["Returns JWT".to_string()],
                technical_notes: None,
                priority: Priority::High,
                estimated_effort: Some(Effort::Medium),
            }],
        });
        let doc = render(&structure);
        assert!(doc.contains("#### Task 1.1: Build login endpoint\n"));
        assert!(doc.contains("**Priority**: High | **Effort**: Medium\n"));
        assert!(doc.contains("### Tasks (1)\n"));
    }

    #[test]
    fn epic_without_tasks_still_gets_a_separator() {
        let mut structure = TicketStructure::new("PROJ", IssueType::EpicOnly).unwrap();
        structure.epics.push(Epic {
            title: "Platform hardening".to_string(),
            description: "Reliability work".to_string(),
            business_value: Some("Fewer outages".to_string()),
            priority: Priority::Medium,
            tasks: Vec::new(),
        });
        let doc = render(&structure);
        assert!(doc.contains("## Epic 1: Platform hardening\n"));
        assert!(doc.contains("**Business Value**: Fewer outages\n"));
        assert!(!doc.contains("### Tasks"));
        assert!(doc.trim_end().ends_with("---"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let structure = safari_bug_structure();
        assert_eq!(render(&structure), render(&structure));
    }
}
