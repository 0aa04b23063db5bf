//! Record model for ticket structures.
//!
//! Defines the typed representation of epics, tasks, bugs, and user stories,
//! plus the [`TicketStructure`] container. Construction goes through the
//! `validated()` constructors so that invariants (length bounds, minimum
//! step/criteria counts, the project-key pattern) hold for every instance
//! handed to the serializer or the upload client.

mod enums;
mod error;
mod records;

pub use enums::{Effort, IssueType, Priority, Severity};
pub use error::ValidationError;
pub use records::{Bug, Environment, Epic, Task, TechnicalDetails, TicketStructure, UserStory};
