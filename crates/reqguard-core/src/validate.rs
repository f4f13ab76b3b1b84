//! # Constraint Validator
//!
//! Evaluates the declared per-field constraints of a decoded value and
//! aggregates every failure into one [`SchemaError::ConstraintViolation`].
//!
//! ## Evaluation
//!
//! The value is serialized to JSON and walked alongside its field table, in
//! declaration order. For each field the constraints run in order; the first
//! one that fails is recorded and the rest of that field's constraints are
//! skipped. `OmitEmpty` ends evaluation of a zero-valued field without a
//! failure. Record fields that pass their own constraints and hold a
//! non-zero object are validated recursively against their nested table.
//!
//! Zero values are `null`, `""`, `0`, `false`, empty lists, and objects
//! whose members are all zero. This is what `Required` rejects.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{SchemaError, Violation, Violations};
use crate::rules::{self, RuleRegistry};
use crate::schema::{Constraint, FieldSpec, Schema, SchemaDescription};

/// Constraint evaluator with an immutable rule registry.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(RuleRegistry::with_builtins())
    }

    /// A validator consulting the given registry for named rules.
    pub fn with_rules(rules: RuleRegistry) -> Self {
        Self { rules }
    }

    /// Process-wide validator with the built-in rules, built on first use.
    pub fn global() -> &'static Validator {
        static GLOBAL: OnceLock<Validator> = OnceLock::new();
        GLOBAL.get_or_init(Validator::new)
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Validate a value against the field table of its type.
    pub fn validate<T: Schema + Serialize + ?Sized>(&self, value: &T) -> Result<(), SchemaError> {
        let json =
            serde_json::to_value(value).map_err(|e| SchemaError::Serialization(e.to_string()))?;
        self.validate_value(T::schema(), &json)
    }

    /// Validate an already-serialized value against a description.
    ///
    /// Non-record descriptions, or values that are not objects, carry no
    /// field constraints and always pass.
    pub fn validate_value(
        &self,
        schema: &SchemaDescription,
        value: &Value,
    ) -> Result<(), SchemaError> {
        let mut violations = Violations::new();
        if let Value::Object(members) = value {
            self.check_record(schema, members, "", &mut violations)?;
        }

        if violations.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            schema = schema.name,
            count = violations.len(),
            "constraint validation failed"
        );
        Err(SchemaError::ConstraintViolation(violations))
    }

    fn check_record(
        &self,
        schema: &SchemaDescription,
        members: &Map<String, Value>,
        prefix: &str,
        violations: &mut Violations,
    ) -> Result<(), SchemaError> {
        for field in schema.fields() {
            let Some(wire_name) = field.wire_name() else {
                continue;
            };
            let value = members.get(wire_name).unwrap_or(&Value::Null);
            let path = join_path(prefix, wire_name);

            match self.check_field(field, value)? {
                FieldOutcome::Failed(constraint, message) => violations.push(Violation {
                    field: field.ident.to_lowercase(),
                    path,
                    constraint,
                    message,
                }),
                FieldOutcome::Omitted => {}
                FieldOutcome::Passed => {
                    if let (Some(nested), Value::Object(inner)) = (field.nested(), value) {
                        if !is_zero(value) {
                            self.check_record(nested, inner, &path, violations)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_field(&self, field: &FieldSpec, value: &Value) -> Result<FieldOutcome, SchemaError> {
        for constraint in field.constraints {
            let failure = match *constraint {
                Constraint::OmitEmpty => {
                    if is_zero(value) {
                        return Ok(FieldOutcome::Omitted);
                    }
                    None
                }
                Constraint::Required => is_zero(value).then(|| "is required".to_string()),
                Constraint::Min(bound) => measure(value)
                    .is_some_and(|m| m < bound)
                    .then(|| format!("must be at least {bound}")),
                Constraint::Max(bound) => measure(value)
                    .is_some_and(|m| m > bound)
                    .then(|| format!("must be at most {bound}")),
                Constraint::Email => (!value.as_str().is_some_and(rules::is_email))
                    .then(|| "must be a valid email address".to_string()),
                Constraint::E164 => (!value.as_str().is_some_and(rules::is_e164))
                    .then(|| "must be a valid E.164 phone number".to_string()),
                Constraint::Rule(name) => {
                    let rule = self
                        .rules
                        .get(name)
                        .ok_or(SchemaError::UnregisteredRule(name))?;
                    (!(rule.check)(value)).then(|| rule.message.to_string())
                }
            };
            if let Some(message) = failure {
                return Ok(FieldOutcome::Failed(*constraint, message));
            }
        }
        Ok(FieldOutcome::Passed)
    }
}

enum FieldOutcome {
    Passed,
    Omitted,
    Failed(Constraint, String),
}

/// Validate a value with the process-wide [`Validator`].
pub fn enforce_schema_rules<T: Schema + Serialize + ?Sized>(value: &T) -> Result<(), SchemaError> {
    Validator::global().validate(value)
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Whether a JSON value is the zero value of its type.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.values().all(is_zero),
    }
}

/// Quantity compared by `Min`/`Max`. Booleans have none.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(_) => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(members) => Some(members.len() as f64),
    }
}
