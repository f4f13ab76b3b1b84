//! # Strict JSON Extractors
//!
//! Axum extractors that run request bodies through `reqguard-core` before a
//! handler sees them:
//!
//! - [`StrictJson<T>`] rejects unknown or mis-cased keys and mistyped
//!   values, then decodes.
//! - [`ValidatedJson<T>`] additionally evaluates the schema's declared
//!   constraints.
//!
//! Both reject with [`AppError`], so handlers can return it directly.
//! [`check_request`] is the non-consuming variant for middleware-style use:
//! it hands the request back with its body restored.

use std::io;

use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use reqguard_core::{decode_strict, enforce_schema_rules, Schema, SchemaError};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppError;

/// JSON body decoded with strict field matching.
///
/// ```ignore
/// async fn handler(StrictJson(req): StrictJson<CreateUserRequest>) -> impl IntoResponse {
///     // req carried only declared keys with matching value kinds
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

/// JSON body decoded with strict field matching and checked against the
/// schema's constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: Schema + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(from_bytes_rejection)?;
        Ok(Self(decode_strict(&bytes)?))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Schema + DeserializeOwned + Serialize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let StrictJson(value) = StrictJson::<T>::from_request(req, state).await?;
        enforce_schema_rules(&value)?;
        Ok(Self(value))
    }
}

/// Map a body-buffering failure, keeping the limit overflow distinct.
fn from_bytes_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(rejection.body_text());
    }
    AppError::from(SchemaError::BodyRead(io::Error::other(rejection.body_text())))
}

/// Strictly decode the body of `req` without consuming the request.
///
/// Reads at most `limit` bytes. The request is returned rebuilt around the
/// bytes that were read, so it can be forwarded to the next handler
/// whatever the outcome. On a read failure the returned body is empty.
pub async fn check_request<T>(req: Request, limit: usize) -> (Request, Result<T, SchemaError>)
where
    T: Schema + DeserializeOwned,
{
    let (parts, body) = req.into_parts();
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => {
            let result = decode_strict(&bytes);
            (Request::from_parts(parts, Body::from(bytes)), result)
        }
        Err(err) => {
            tracing::debug!(error = %err, "failed to buffer request body");
            let result = Err(SchemaError::BodyRead(io::Error::other(err)));
            (Request::from_parts(parts, Body::empty()), result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use reqguard_core::{Constraint, ErrorKind, FieldKind, FieldSpec, SchemaDescription};
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Ping {
        message: String,
        count: i64,
    }

    static PING: SchemaDescription = SchemaDescription::record(
        "Ping",
        &[
            FieldSpec::new("message")
                .kind(FieldKind::String)
                .constraints(&[Constraint::Required]),
            FieldSpec::new("count")
                .kind(FieldKind::Integer)
                .constraints(&[Constraint::Max(3.0)]),
        ],
    );

    impl Schema for Ping {
        fn schema() -> &'static SchemaDescription {
            &PING
        }
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/ping")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(req: Request) -> String {
        let bytes = req.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn strict_json_decodes_declared_keys() {
        let req = request(r#"{"message":"hi","count":2}"#);
        let StrictJson(ping) = StrictJson::<Ping>::from_request(req, &()).await.unwrap();
        assert_eq!(ping.message, "hi");
        assert_eq!(ping.count, 2);
    }

    #[tokio::test]
    async fn strict_json_rejects_unknown_key() {
        let err = StrictJson::<Ping>::from_request(request(r#"{"Message":"hi"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "invalid field name or incorrect casing: Message");
    }

    #[tokio::test]
    async fn strict_json_skips_constraints() {
        let StrictJson(ping) = StrictJson::<Ping>::from_request(request(r#"{"count":9}"#), &())
            .await
            .unwrap();
        assert_eq!(ping.count, 9);
    }

    #[tokio::test]
    async fn validated_json_reports_violations() {
        let err = ValidatedJson::<Ping>::from_request(request(r#"{"count":9}"#), &())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: message is required, count must be at most 3"
        );
    }

    #[tokio::test]
    async fn check_request_restores_body() {
        let raw = r#"{"message":"hi","extra":true}"#;
        let (req, result) = check_request::<Ping>(request(raw), 1024).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnknownField);
        assert_eq!(req.uri(), "/ping");
        assert_eq!(body_string(req).await, raw);
    }

    #[tokio::test]
    async fn check_request_over_limit_is_a_read_failure() {
        let (req, result) = check_request::<Ping>(request(r#"{"message":"hello"}"#), 4).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::BodyRead);
        assert_eq!(body_string(req).await, "");
    }
}
