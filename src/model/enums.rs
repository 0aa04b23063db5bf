//! Closed enum sets used across record kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Priority of an epic, task, bug, or story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Must be addressed immediately.
    Critical,
    /// Important, schedule soon.
    High,
    /// Normal priority.
    #[default]
    Medium,
    /// Nice to have.
    Low,
}

impl Priority {
    /// The canonical label used in markup and Jira payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Critical" => Ok(Self::Critical),
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(ValidationError::UnknownValue {
                what: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Severity of a bug. Same closed set as [`Priority`] but semantically
/// distinct: severity measures impact, priority measures scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// System down, data loss, security breach.
    Critical,
    /// Major feature broken.
    High,
    /// Minor feature broken, low impact.
    #[default]
    Medium,
    /// Cosmetic.
    Low,
}

impl Severity {
    /// The canonical label used in markup and Jira payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Critical" => Ok(Self::Critical),
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(ValidationError::UnknownValue {
                what: "severity",
                value: other.to_string(),
            }),
        }
    }
}

/// Estimated effort for a task or story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    /// Hours to a day.
    Small,
    /// A few days.
    Medium,
    /// A week or more.
    Large,
}

impl Effort {
    /// The canonical label used in markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Small" => Ok(Self::Small),
            "Medium" => Ok(Self::Medium),
            "Large" => Ok(Self::Large),
            other => Err(ValidationError::UnknownValue {
                what: "effort",
                value: other.to_string(),
            }),
        }
    }
}

/// Which record kind a [`super::TicketStructure`] carries.
///
/// The tag determines which of the three record sequences the serializer
/// and parser read or write; the other two stay empty by convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    /// Epics with sub-tasks for feature development.
    #[default]
    Task,
    /// Bug / problem reports.
    Bug,
    /// Agile user stories.
    Story,
    /// High-level epics without sub-tasks.
    EpicOnly,
}

impl IssueType {
    /// The lowercase tag as it appears in documents and filenames.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Story => "story",
            Self::EpicOnly => "epic-only",
        }
    }

    /// Returns `true` when the tag selects the epics sequence.
    #[must_use]
    pub fn is_epic_kind(self) -> bool {
        matches!(self, Self::Task | Self::EpicOnly)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "bug" => Ok(Self::Bug),
            "story" => Ok(Self::Story),
            "epic-only" => Ok(Self::EpicOnly),
            other => Err(ValidationError::UnknownValue {
                what: "issue type",
                value: other.to_string(),
            }),
        }
    }
}
