//! # Error Types
//!
//! Every failure produced by strict decoding and constraint validation is a
//! [`SchemaError`]. Each variant carries a single human-readable message;
//! callers map the variant (see [`ErrorKind`]) onto their own response
//! surface.
//!
//! Constraint failures are collected into [`Violations`] so that a single
//! call reports every offending field, not just the first.

use std::fmt;

use thiserror::Error;

use crate::schema::Constraint;

/// Error returned by the strict decoder and the constraint validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The payload stream could not be read to the end.
    #[error("failed to read request body")]
    BodyRead(#[source] std::io::Error),

    /// The payload is not a JSON object.
    #[error("invalid JSON format: {0}")]
    MalformedPayload(String),

    /// A top-level key is not accepted by the schema (unknown or mis-cased).
    #[error("invalid field name or incorrect casing: {0}")]
    UnknownField(String),

    /// A field value has the wrong JSON type for its declared kind.
    #[error("{field} should be a {expected}")]
    TypeMismatch {
        /// Dotted wire path of the offending field.
        field: String,
        /// Name of the expected type.
        expected: String,
    },

    /// One or more declared constraints failed.
    #[error("validation failed: {0}")]
    ConstraintViolation(Violations),

    /// The payload passed the field checks but serde rejected it.
    #[error("{0}")]
    Decode(String),

    /// A schema references a custom rule that was never registered.
    #[error("no validation rule registered as '{0}'")]
    UnregisteredRule(&'static str),

    /// The value could not be serialized for constraint evaluation.
    #[error("failed to serialize value for validation: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BodyRead,
    MalformedPayload,
    UnknownField,
    TypeMismatch,
    ConstraintViolation,
    Decode,
    UnregisteredRule,
    Serialization,
}

impl SchemaError {
    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BodyRead(_) => ErrorKind::BodyRead,
            Self::MalformedPayload(_) => ErrorKind::MalformedPayload,
            Self::UnknownField(_) => ErrorKind::UnknownField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::Decode(_) => ErrorKind::Decode,
            Self::UnregisteredRule(_) => ErrorKind::UnregisteredRule,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// The individual violations, if this is a constraint failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::ConstraintViolation(v) => Some(v),
            _ => None,
        }
    }
}

/// A single failed constraint on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Lower-cased field identifier, as used in messages.
    pub field: String,
    /// Dotted wire path of the field (e.g. `address.zip`).
    pub path: String,
    /// The constraint that failed.
    pub constraint: Constraint,
    /// Violation suffix, e.g. `is required`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Ordered collection of violations from one validation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if any violation names the given field identifier.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
