//! # Strict Decoder
//!
//! Decodes a JSON request body into a schema type, rejecting the payload
//! before decoding if any top-level key is not one of the schema's wire
//! names with exact case.
//!
//! ## Sequence
//!
//! 1. Buffer the body once; the request stays readable afterwards.
//! 2. Parse the payload as a JSON object (`MalformedPayload` on failure).
//!    A bare `null` counts as an empty object.
//! 3. Derive the accepted field set from the schema.
//! 4. Reject the first key outside the set (`UnknownField`).
//! 5. Check present values against their declared kinds (`TypeMismatch`).
//!    `null` values are dropped so the field keeps its default.
//! 6. Decode into the target type. Wrong types and out-of-range values
//!    found by serde (list elements, narrow integers) become `TypeMismatch`
//!    at their path; any other serde failure is passed through verbatim
//!    (`Decode`).

use http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use serde_json::{Map, Value};

use crate::body::RequestBody;
use crate::error::SchemaError;
use crate::fields::accepted_fields;
use crate::schema::{FieldKind, Schema, SchemaDescription};
use crate::validate::enforce_schema_rules;

/// Strictly decode the body of `request` into `T`.
///
/// The body is read exactly once and is left replayable, so later consumers
/// of the request see the original bytes whatever the outcome.
pub fn check_schema<T>(request: &mut Request<RequestBody>) -> Result<T, SchemaError>
where
    T: Schema + DeserializeOwned,
{
    let bytes = request.body_mut().buffer().map_err(SchemaError::BodyRead)?;
    decode_strict(&bytes)
}

/// Strictly decode then validate the body of `request`.
pub fn validate_request<T>(request: &mut Request<RequestBody>) -> Result<T, SchemaError>
where
    T: Schema + DeserializeOwned + Serialize,
{
    let value: T = check_schema(request)?;
    enforce_schema_rules(&value)?;
    Ok(value)
}

/// Strictly decode an in-memory payload into `T`.
pub fn decode_strict<T>(bytes: &[u8]) -> Result<T, SchemaError>
where
    T: Schema + DeserializeOwned,
{
    let parsed: Option<Map<String, Value>> = serde_json::from_slice(bytes)
        .map_err(|e| SchemaError::MalformedPayload(e.to_string()))?;
    let mut payload = parsed.unwrap_or_default();

    let accepted = accepted_fields::<T>();
    if let Some(key) = payload.keys().find(|key| !accepted.contains(key.as_str())) {
        tracing::debug!(schema = T::schema().name, field = %key, "rejected unknown field");
        return Err(SchemaError::UnknownField(key.clone()));
    }

    check_kinds(T::schema(), &mut payload, "")?;

    serde_path_to_error::deserialize(Value::Object(payload)).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        match expected_type(&inner) {
            Some(expected) if path != "." => {
                tracing::debug!(field = %path, %expected, "type mismatch");
                SchemaError::TypeMismatch {
                    field: path,
                    expected,
                }
            }
            _ => SchemaError::Decode(inner.to_string()),
        }
    })
}

/// The expected type named by a serde "invalid type" or "invalid value"
/// error, without its leading article.
fn expected_type(err: &serde_json::Error) -> Option<String> {
    if err.classify() != Category::Data {
        return None;
    }
    let message = err.to_string();
    if !message.starts_with("invalid type: ") && !message.starts_with("invalid value: ") {
        return None;
    }
    let (_, expected) = message.rsplit_once(", expected ")?;
    let expected = expected
        .strip_prefix("an ")
        .or_else(|| expected.strip_prefix("a "))
        .unwrap_or(expected);
    Some(expected.to_string())
}

/// Check every present value against its declared kind, dropping `null`s.
///
/// Only keys known to `schema` are inspected; nested records recurse.
fn check_kinds(
    schema: &SchemaDescription,
    members: &mut Map<String, Value>,
    prefix: &str,
) -> Result<(), SchemaError> {
    members.retain(|_, value| !value.is_null());

    for (key, value) in members.iter_mut() {
        let Some(field) = schema.field(key) else {
            continue;
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let matches = match field.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Float => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::List => value.is_array(),
            FieldKind::Any => true,
            FieldKind::Record(nested) => match value {
                Value::Object(inner) => {
                    check_kinds(nested, inner, &path)?;
                    true
                }
                _ => false,
            },
        };

        if !matches {
            tracing::debug!(field = %path, expected = field.kind.expected(), "type mismatch");
            return Err(SchemaError::TypeMismatch {
                field: path,
                expected: field.kind.expected().to_string(),
            });
        }
    }
    Ok(())
}
