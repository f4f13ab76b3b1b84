//! # User Registration API
//!
//! - **POST `/v1/users`** — Register a user. Strict decoding plus
//!   constraint validation; echoes the accepted record with `201 Created`.
//! - **POST `/v1/users/check`** — Strict decoding only; echoes the decoded
//!   record. Constraints are not evaluated, so an empty object is accepted.
//! - **POST `/v1/users/preview`** — Dry run. Never rejects; reports whether
//!   the payload would pass strict decoding and how many bytes were
//!   forwarded after the check.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqguard_core::{
    Constraint, FieldKind, FieldSpec, Schema, SchemaDescription, SchemaError, NOT_BLANK,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{check_request, StrictJson, ValidatedJson};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Postal address of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: String,
    pub zip: i64,
}

/// Request to register a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    /// Display name; must contain a non-whitespace character.
    pub name: String,
    pub email: String,
    /// Age in years, 10 to 20 inclusive.
    pub age: i64,
    /// Optional phone number in E.164 form.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub address: Address,
}

static ADDRESS: SchemaDescription = SchemaDescription::record(
    "Address",
    &[
        FieldSpec::new("city")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required]),
        FieldSpec::new("zip").kind(FieldKind::Integer).constraints(&[
            Constraint::Required,
            Constraint::Min(10000.0),
            Constraint::Max(99999.0),
        ]),
    ],
);

static CREATE_USER: SchemaDescription = SchemaDescription::record(
    "CreateUserRequest",
    &[
        FieldSpec::new("name")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required, Constraint::Rule(NOT_BLANK)]),
        FieldSpec::new("email")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required, Constraint::Email]),
        FieldSpec::new("age").kind(FieldKind::Integer).constraints(&[
            Constraint::Required,
            Constraint::Min(10.0),
            Constraint::Max(20.0),
        ]),
        FieldSpec::new("phone")
            .kind(FieldKind::String)
            .constraints(&[Constraint::OmitEmpty, Constraint::E164]),
        FieldSpec::new("address")
            .record(&ADDRESS)
            .constraints(&[Constraint::Required]),
    ],
);

impl Schema for Address {
    fn schema() -> &'static SchemaDescription {
        &ADDRESS
    }
}

impl Schema for CreateUserRequest {
    fn schema() -> &'static SchemaDescription {
        &CREATE_USER
    }
}

/// Outcome of a dry run.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Size of the body left on the request after the check.
    pub forwarded_bytes: usize,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/users", post(create_user))
        .route("/v1/users/check", post(check_user))
        .route("/v1/users/preview", post(preview_user))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/users — Register a user.
async fn create_user(
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> (StatusCode, Json<CreateUserRequest>) {
    tracing::info!(name = %req.name, "user registered");
    (StatusCode::CREATED, Json(req))
}

/// POST /v1/users/check — Strict decoding without constraint evaluation.
async fn check_user(
    StrictJson(req): StrictJson<CreateUserRequest>,
) -> Json<CreateUserRequest> {
    Json(req)
}

/// POST /v1/users/preview — Report the strict-decoding outcome without rejecting.
async fn preview_user(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<PreviewResponse>, AppError> {
    let (req, result) = check_request::<CreateUserRequest>(req, state.config.body_limit).await;
    let forwarded = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| AppError::from(SchemaError::BodyRead(std::io::Error::other(e))))?;
    Ok(Json(PreviewResponse {
        accepted: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
        forwarded_bytes: forwarded.len(),
    }))
}
