//! # reqguard-core — Strict JSON Request Validation
//!
//! Validates incoming JSON payloads against statically declared schema
//! tables in three steps:
//!
//! 1. **Field extraction** ([`fields`]): the set of wire names a schema
//!    accepts, case-sensitive, skipped fields excluded.
//! 2. **Strict decoding** ([`decode`]): reject any payload carrying a key
//!    outside that set, check value kinds, then decode with serde. The
//!    request body is buffered once and stays re-readable.
//! 3. **Constraint validation** ([`validate`]): evaluate `required`,
//!    `min`/`max`, email, E.164 and named rules (see [`rules`]) on the
//!    decoded value, aggregating every failure into one error.
//!
//! ```
//! use http::Request;
//! use reqguard_core::{
//!     validate_request, Constraint, FieldKind, FieldSpec, RequestBody, Schema, SchemaDescription,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Signup {
//!     email: String,
//! }
//!
//! static SIGNUP: SchemaDescription = SchemaDescription::record(
//!     "Signup",
//!     &[FieldSpec::new("email")
//!         .kind(FieldKind::String)
//!         .constraints(&[Constraint::Required, Constraint::Email])],
//! );
//!
//! impl Schema for Signup {
//!     fn schema() -> &'static SchemaDescription {
//!         &SIGNUP
//!     }
//! }
//!
//! let mut request = Request::new(RequestBody::from(r#"{"Email":"a@b.co"}"#));
//! let err = validate_request::<Signup>(&mut request).unwrap_err();
//! assert_eq!(err.to_string(), "invalid field name or incorrect casing: Email");
//! ```
//!
//! ## Crate Policy
//!
//! - Synchronous and free of shared mutable state; every call is
//!   self-contained. The only process-wide value is the read-only
//!   [`Validator::global`].
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod body;
pub mod decode;
pub mod error;
pub mod fields;
pub mod rules;
pub mod schema;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use body::RequestBody;
pub use decode::{check_schema, decode_strict, validate_request};
pub use error::{ErrorKind, SchemaError, Violation, Violations};
pub use fields::{accepted_fields, accepted_fields_in, accepted_fields_of, AcceptedFields};
pub use rules::{Rule, RuleFn, RuleRegistry, NOT_BLANK};
pub use schema::{Constraint, FieldKind, FieldSpec, FieldTag, Schema, SchemaDescription, Shape};
pub use validate::{enforce_schema_rules, Validator};
