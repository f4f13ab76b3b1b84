//! # Schema Descriptions
//!
//! A [`SchemaDescription`] is a statically declared field table for one
//! payload shape: the Rust identifier of each field, its wire name, the JSON
//! kind it must carry, and the constraints evaluated after decoding.
//!
//! Tables are `static` items built with `const fn` builders, so they are
//! created once at compile time and shared by every call:
//!
//! ```
//! use reqguard_core::{Constraint, FieldKind, FieldSpec, Schema, SchemaDescription};
//!
//! #[derive(serde::Deserialize)]
//! struct Login {
//!     #[serde(rename = "userName")]
//!     user_name: String,
//! }
//!
//! static LOGIN: SchemaDescription = SchemaDescription::record(
//!     "Login",
//!     &[FieldSpec::new("user_name")
//!         .rename("userName")
//!         .kind(FieldKind::String)
//!         .constraints(&[Constraint::Required])],
//! );
//!
//! impl Schema for Login {
//!     fn schema() -> &'static SchemaDescription {
//!         &LOGIN
//!     }
//! }
//! ```
//!
//! The table must agree with the type's serde attributes: the wire name of a
//! field is the name serde reads and writes.

use std::fmt;

// ---------------------------------------------------------------------------
// Field metadata
// ---------------------------------------------------------------------------

/// How a field appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    /// The field is read and written under this exact name.
    Named(&'static str),
    /// The field never crosses the wire (`#[serde(skip)]`).
    Skip,
}

/// The JSON kind a field value must have.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    /// A JSON number without a fractional part.
    Integer,
    /// Any JSON number.
    Float,
    Bool,
    /// A nested record with its own field table.
    Record(&'static SchemaDescription),
    List,
    /// No kind check.
    Any,
}

impl FieldKind {
    /// Human-readable name used in type-mismatch messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "whole number",
            Self::Float => "number",
            Self::Bool => "boolean",
            Self::Record(_) => "JSON object",
            Self::List => "list",
            Self::Any => "value",
        }
    }
}

/// A declarative per-field constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// The value must not be zero (`null`, `""`, `0`, `false`, empty).
    Required,
    /// Stop evaluating the field when its value is zero.
    OmitEmpty,
    /// Lower bound: value for numbers, length for strings and lists.
    Min(f64),
    /// Upper bound: value for numbers, length for strings and lists.
    Max(f64),
    /// RFC 5322 style email address.
    Email,
    /// E.164 international phone number.
    E164,
    /// A named rule looked up in the validator's rule registry.
    Rule(&'static str),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::OmitEmpty => f.write_str("omitempty"),
            Self::Min(n) => write!(f, "min={n}"),
            Self::Max(n) => write!(f, "max={n}"),
            Self::Email => f.write_str("email"),
            Self::E164 => f.write_str("e164"),
            Self::Rule(name) => f.write_str(name),
        }
    }
}

/// One entry of a schema's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Wire name, or skipped.
    pub tag: FieldTag,
    /// Declared JSON kind.
    pub kind: FieldKind,
    /// Constraints, evaluated in order.
    pub constraints: &'static [Constraint],
}

impl FieldSpec {
    /// A field whose wire name equals its identifier, with no kind check
    /// and no constraints.
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            tag: FieldTag::Named(ident),
            kind: FieldKind::Any,
            constraints: &[],
        }
    }

    /// Use a different wire name (`#[serde(rename = "...")]`).
    pub const fn rename(self, name: &'static str) -> Self {
        Self {
            tag: FieldTag::Named(name),
            ..self
        }
    }

    /// Mark the field as never crossing the wire.
    pub const fn skip(self) -> Self {
        Self {
            tag: FieldTag::Skip,
            ..self
        }
    }

    pub const fn kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    /// Shorthand for `kind(FieldKind::Record(schema))`.
    pub const fn record(self, schema: &'static SchemaDescription) -> Self {
        Self {
            kind: FieldKind::Record(schema),
            ..self
        }
    }

    pub const fn constraints(self, constraints: &'static [Constraint]) -> Self {
        Self {
            constraints,
            ..self
        }
    }

    /// The wire name, unless the field is skipped.
    pub fn wire_name(&self) -> Option<&'static str> {
        match self.tag {
            FieldTag::Named(name) => Some(name),
            FieldTag::Skip => None,
        }
    }

    /// The nested field table, for record fields.
    pub fn nested(&self) -> Option<&'static SchemaDescription> {
        match self.kind {
            FieldKind::Record(schema) => Some(schema),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema descriptions
// ---------------------------------------------------------------------------

/// The shape of a schema description.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A structured record with a field table.
    Record(&'static [FieldSpec]),
    /// Anything else (strings, numbers, free-form values). Accepts no keys.
    Scalar,
}

/// Static description of one payload shape.
#[derive(Debug, Clone, Copy)]
pub struct SchemaDescription {
    /// Type name, for diagnostics.
    pub name: &'static str,
    pub shape: Shape,
}

impl SchemaDescription {
    /// A record description with the given field table.
    pub const fn record(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            shape: Shape::Record(fields),
        }
    }

    /// A non-record description.
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Scalar,
        }
    }

    /// The field table, or an empty slice for non-record shapes.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self.shape {
            Shape::Record(fields) => fields,
            Shape::Scalar => &[],
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.shape, Shape::Record(_))
    }

    /// Look up a field by its wire name (exact case).
    pub fn field(&self, wire_name: &str) -> Option<&'static FieldSpec> {
        self.fields()
            .iter()
            .find(|f| f.wire_name() == Some(wire_name))
    }
}

// ---------------------------------------------------------------------------
// Schema trait
// ---------------------------------------------------------------------------

/// Types that carry a static schema description.
///
/// References and boxes delegate to the pointee, so one level of
/// indirection is always unwrapped.
pub trait Schema {
    fn schema() -> &'static SchemaDescription;
}

impl<T: Schema + ?Sized> Schema for &T {
    fn schema() -> &'static SchemaDescription {
        T::schema()
    }
}

impl<T: Schema + ?Sized> Schema for &mut T {
    fn schema() -> &'static SchemaDescription {
        T::schema()
    }
}

impl<T: Schema + ?Sized> Schema for Box<T> {
    fn schema() -> &'static SchemaDescription {
        T::schema()
    }
}

static STRING: SchemaDescription = SchemaDescription::scalar("String");
static VALUE: SchemaDescription = SchemaDescription::scalar("Value");

impl Schema for String {
    fn schema() -> &'static SchemaDescription {
        &STRING
    }
}

impl Schema for serde_json::Value {
    fn schema() -> &'static SchemaDescription {
        &VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static INNER: SchemaDescription = SchemaDescription::record(
        "Inner",
        &[FieldSpec::new("code").kind(FieldKind::Integer)],
    );

    static OUTER: SchemaDescription = SchemaDescription::record(
        "Outer",
        &[
            FieldSpec::new("display_name")
                .rename("displayName")
                .kind(FieldKind::String)
                .constraints(&[Constraint::Required, Constraint::Rule("notblank")]),
            FieldSpec::new("cache").skip(),
            FieldSpec::new("inner").record(&INNER),
        ],
    );

    #[test]
    fn builder_sets_tag_kind_and_constraints() {
        let field = OUTER.field("displayName").unwrap();
        assert_eq!(field.ident, "display_name");
        assert_eq!(field.tag, FieldTag::Named("displayName"));
        assert_eq!(field.kind.expected(), "string");
        assert_eq!(
            field.constraints,
            &[Constraint::Required, Constraint::Rule("notblank")]
        );
    }

    #[test]
    fn lookup_is_case_exact() {
        assert!(OUTER.field("displayName").is_some());
        assert!(OUTER.field("DisplayName").is_none());
        assert!(OUTER.field("display_name").is_none());
    }

    #[test]
    fn skipped_fields_have_no_wire_name() {
        let cache = &OUTER.fields()[1];
        assert_eq!(cache.tag, FieldTag::Skip);
        assert!(cache.wire_name().is_none());
        assert!(OUTER.field("cache").is_none());
    }

    #[test]
    fn record_fields_expose_nested_table() {
        let inner = OUTER.field("inner").unwrap().nested().unwrap();
        assert_eq!(inner.name, "Inner");
        assert_eq!(inner.fields().len(), 1);
        assert!(OUTER.field("displayName").unwrap().nested().is_none());
    }

    #[test]
    fn scalar_has_no_fields() {
        assert!(!String::schema().is_record());
        assert!(String::schema().fields().is_empty());
        assert!(serde_json::Value::schema().fields().is_empty());
    }

    #[test]
    fn constraint_display() {
        assert_eq!(Constraint::Min(10.0).to_string(), "min=10");
        assert_eq!(Constraint::Max(99999.0).to_string(), "max=99999");
        assert_eq!(Constraint::Rule("notblank").to_string(), "notblank");
    }
}
