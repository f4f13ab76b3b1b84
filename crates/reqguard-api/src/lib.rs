//! # reqguard-api — Axum Integration for Strict Request Validation
//!
//! Wires `reqguard-core` into an Axum service: extractors that reject
//! unknown or mis-cased JSON keys, mistyped values and constraint
//! violations, plus the mapping of those failures to HTTP responses.
//!
//! ## API Surface
//!
//! | Route                    | Module             | Behavior                         |
//! |--------------------------|--------------------|----------------------------------|
//! | `GET /health/liveness`   | this crate         | Always `ok`                      |
//! | `GET /health/readiness`  | this crate         | Always `ready`                   |
//! | `POST /v1/users`         | [`routes::users`]  | Strict decode + constraints      |
//! | `POST /v1/users/check`   | [`routes::users`]  | Strict decode only               |
//! | `POST /v1/users/preview` | [`routes::users`]  | Dry run, never rejects           |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    let api = Router::new()
        .merge(routes::users::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
