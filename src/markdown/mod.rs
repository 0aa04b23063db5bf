//! The markdown document format — the durable interface of the tool.
//!
//! A [`crate::model::TicketStructure`] is rendered to a human-editable
//! markdown document, persisted, possibly hand-edited, and parsed back for
//! upload. [`render`] and [`parse`] agree on the grammar below precisely
//! enough that an edit-and-reimport cycle never silently corrupts data:
//!
//! ```text
//! # JIRA Tickets - PROJ
//!
//! **Issue Type**: bug
//!
//! ---
//!
//! ## Bug 1: Login fails on Safari
//!
//! **Description**: Button does nothing on tap
//!
//! **Severity**: High | **Priority**: High
//!
//! **Reproduction Steps**:
//! 1. Open Safari
//! 2. Tap login
//! 3. Observe no response
//!
//! ---
//! ```
//!
//! Scalar fields are `**Label**: value` lines; sequence fields are a label
//! line followed by one `- ` bullet or `1.` numbered line per element.
//! Absent optional fields produce no line at all. Both functions are pure;
//! callers do the file I/O.

mod files;
mod parse;
mod render;

pub use files::{document_filename, latest_document, list_documents, DocumentEntry};
pub use parse::{parse, ParseError, ParsedDocument, SkippedRecord};
pub use render::render;

/// First header line: this marker followed by the project key.
pub(crate) const TITLE_MARKER: &str = "# JIRA Tickets - ";

/// Header line carrying the issue-type tag.
pub(crate) const ISSUE_TYPE_LABEL: &str = "**Issue Type**:";

/// How many leading lines the parser scans for the header markers.
pub(crate) const HEADER_SCAN_LINES: usize = 10;
