//! Prompt templates for the extraction and review passes.
//!
//! Each template carries `{text}` / `{project_key}` / `{structure}`
//! placeholders filled by the agents. The replies are requested as JSON
//! matching the record model's serde shapes.

use crate::model::IssueType;

const EPIC_EXTRACTION_PROMPT: &str = r#"You are a technical product manager extracting first-class Jira tickets from text.

Text:
{text}

Project Key: {project_key}

Extract ALL of the following:

1. EPICS (high-level features/initiatives): clear title (5-200 chars), detailed
   description (why this matters), business value (who benefits), priority.
2. TASKS (actionable work items under epics): specific title, detailed
   description with technical context, 5+ acceptance criteria covering
   functional, security, performance, edge cases and testing, technical notes
   (APIs, schemas, dependencies), priority, estimated effort.
3. IMPLICIT REQUIREMENTS, added even when not mentioned: error handling and
   validation, security, performance, testing, migrations, monitoring,
   documentation.

Quality bar: acceptance criteria must be specific and testable; include exact
technologies, error messages, and metrics; separate software modules go to
separate tickets.

Return as JSON:
{
  "epics": [
    {
      "title": "User Authentication System",
      "description": "Secure user authentication with email/password and password reset",
      "business_value": "Enables account management and secure access control",
      "priority": "High",
      "tasks": [
        {
          "title": "Implement login endpoint with JWT authentication",
          "description": "Create POST /api/auth/login that validates credentials and returns JWT tokens",
          "acceptance_criteria": [
            "Functional: accepts email and password, returns access + refresh tokens",
            "Security: rate limiting of 5 attempts per minute per IP",
            "Error: invalid credentials return 401 with message 'Invalid email or password'",
            "Performance: login completes within 200ms",
            "Testing: unit tests for token generation and validation"
          ],
          "technical_notes": "jsonwebtoken library; access token 15min, refresh 7 days; httpOnly cookies",
          "priority": "High",
          "estimated_effort": "Medium"
        }
      ]
    }
  ]
}

CRITICAL: use EXACT values for priority ("Critical", "High", "Medium", "Low")
and estimated_effort ("Small", "Medium", "Large"). Return valid JSON only."#;

const BUG_EXTRACTION_PROMPT: &str = r#"You are a QA engineer extracting first-class bug reports from text.

Text:
{text}

Project Key: {project_key}

For every bug extract: a clear summary (what is broken, where, when); a
description covering current behavior, expected behavior, and impact; exact
numbered reproduction steps (at least 3, reproducible by any developer);
environment (browser, os, device, version, user_role, data_conditions);
severity and priority; technical details when mentioned (error messages,
stack traces, console logs, affected code, failing API calls, database
state); acceptance criteria that verify the fix; a suggested fix when one is
apparent.

Return as JSON:
{
  "bugs": [
    {
      "summary": "Login button does nothing when clicked on Safari iOS",
      "description": "Clicking login on Safari iOS 15+ has no effect. Expected: form submits and redirects to dashboard. Impact: iOS users cannot access the platform.",
      "severity": "High",
      "priority": "High",
      "reproduction_steps": [
        "Open Safari on iOS 15.0+",
        "Navigate to the login page and enter valid credentials",
        "Click the Login button",
        "Observe: no action, no error"
      ],
      "environment": { "browser": "Safari iOS 15.0+", "os": "iOS 15.0-17.0" },
      "technical_details": { "console_logs": "Uncaught TypeError: Cannot read property 'submit' of null" },
      "acceptance_criteria": [
        "Login button submits the form on Safari iOS 15+",
        "Regression: works on Chrome, Firefox, Safari desktop",
        "Works with keyboard Enter submission"
      ],
      "suggested_fix": "Add touchend event handler for iOS compatibility"
    }
  ]
}

CRITICAL: use EXACT values for severity and priority ("Critical", "High",
"Medium", "Low"). Return valid JSON only."#;

const STORY_EXTRACTION_PROMPT: &str = r#"You are an agile product owner extracting user stories from text.

Text:
{text}

Project Key: {project_key}

Each story follows the "As a / I want to / So that" format with at least 3
specific, testable acceptance criteria (Given/When/Then, covering the happy
path, validation, and error scenarios) plus technical notes for
implementation hints.

Return as JSON:
{
  "stories": [
    {
      "title": "User can reset forgotten password via email",
      "as_a": "registered user who forgot their password",
      "i_want_to": "receive a password reset link via email",
      "so_that": "I can regain access to my account securely",
      "acceptance_criteria": [
        "Given I am on the login page, when I click 'Forgot Password', then I see a reset form",
        "Given I enter my registered email, when I submit, then I receive a reset link within 5 minutes",
        "Given the reset link is over 1 hour old, when I click it, then I see a 'Link expired' error"
      ],
      "priority": "High",
      "estimated_effort": "Medium",
      "technical_notes": "Secure token with 1-hour expiry, sent via the email service, invalidated after use"
    }
  ]
}

CRITICAL: use EXACT values for priority ("Critical", "High", "Medium", "Low")
and estimated_effort ("Small", "Medium", "Large"). Return valid JSON only."#;

pub(crate) const REVIEW_PROMPT: &str = r#"You are a senior software architect conducting a thorough quality review of Jira tickets.

Current structure:
{structure}

Review for:
1. COMPLETENESS: does each record have at least 3 detailed acceptance
   criteria covering success and failure? Clear input/output specs? Edge
   cases? Performance and security requirements?
2. AMBIGUITY: flag vague wording ("should work well", "fast", "robust"),
   missing specifics, undefined success conditions, unspecified error
   handling.
3. CRITICAL MISSING TASKS: migrations, environment configuration, failure
   handling for external APIs, authentication/authorization, input
   sanitization, rate limiting, data validation, backward compatibility,
   unit/integration/performance tests, monitoring, rollback procedures.
4. CLARIFICATION QUESTIONS: specific questions about technical requirements,
   business logic, performance expectations, and error handling.

Return as JSON:
{
  "gaps": ["Task 'X' missing acceptance criteria for error cases"],
  "ambiguities": ["'fast response' in Task 2 - what is the target latency?"],
  "missing_tasks": ["Add rate limiting for the login endpoint"],
  "questions": ["Should login sessions use JWT tokens or server-side sessions?"],
  "suggestions": ["Recommend bcrypt for password hashing"],
  "production_readiness_concerns": ["No rollback plan if authentication breaks"]
}

Quality bar: each ticket should be complete enough that a developer can
implement it without asking questions. Return valid JSON only."#;

/// Builds the extraction prompt for the requested record kind.
pub(crate) fn extraction_prompt(issue_type: IssueType, text: &str, project_key: &str) -> String {
    let template = match issue_type {
        IssueType::Bug => BUG_EXTRACTION_PROMPT,
        IssueType::Story => STORY_EXTRACTION_PROMPT,
        IssueType::Task | IssueType::EpicOnly => EPIC_EXTRACTION_PROMPT,
    };
    template.replace("{text}", text).replace("{project_key}", project_key)
}

/// Builds the review prompt around a rendered structure.
pub(crate) fn review_prompt(structure_text: &str) -> String {
    REVIEW_PROMPT.replace("{structure}", structure_text)
}
