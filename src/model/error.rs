//! Validation failures raised by record constructors.

use thiserror::Error;

/// A record failed one of its structural invariants.
///
/// Validation errors are never coerced away: the record either is not
/// constructed (the markdown parser drops it and records a diagnostic) or
/// the error propagates to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A bounded string field is outside its character range.
    #[error("{field} must be {min}-{max} characters, got {len}")]
    LengthOutOfRange {
        /// Field name.
        field: &'static str,
        /// Inclusive minimum length in characters.
        min: usize,
        /// Inclusive maximum length in characters.
        max: usize,
        /// Observed length in characters.
        len: usize,
    },

    /// A string field is shorter than its minimum.
    #[error("{field} must be at least {min} characters, got {len}")]
    TooShort {
        /// Field name.
        field: &'static str,
        /// Inclusive minimum length in characters.
        min: usize,
        /// Observed length in characters.
        len: usize,
    },

    /// A required string field is empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },

    /// A bug carried fewer than the minimum three reproduction steps.
    #[error("bug needs at least 3 reproduction steps, got {got}")]
    TooFewReproductionSteps {
        /// Observed step count.
        got: usize,
    },

    /// A user story carried fewer than the minimum three acceptance criteria.
    #[error("user story needs at least 3 acceptance criteria, got {got}")]
    TooFewAcceptanceCriteria {
        /// Observed criteria count.
        got: usize,
    },

    /// A value outside one of the closed enum sets.
    #[error("unknown {what}: {value:?}")]
    UnknownValue {
        /// Which enum the value was parsed for.
        what: &'static str,
        /// The offending input.
        value: String,
    },

    /// A project key that does not match `[A-Z][A-Z0-9]{1,9}`.
    #[error("project key {0:?} must be an uppercase letter followed by 1-9 uppercase alphanumerics")]
    InvalidProjectKey(String),
}
