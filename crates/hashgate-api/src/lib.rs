//! # hashgate-api — Axum Gateway for the Hashstore
//!
//! The orchestration layer above the resolution and authorization
//! cores. Translates their data results into transport responses:
//! missing references become 404s, denied reads become 401s with the
//! decision attached, and everything else streams back to the caller.
//!
//! ## API Surface
//!
//! | Route                        | Module             | Behavior            |
//! |------------------------------|--------------------|---------------------|
//! | `GET /store/info/{pid}`      | [`routes::store`]  | resolution report   |
//! | `GET /store/metadata/{pid}`  | [`routes::store`]  | sysmeta XML         |
//! | `GET /store/object/{pid}`    | [`routes::store`]  | authorized download |
//! | `GET /store/policy/{pid}`    | [`routes::store`]  | parsed allow rules  |
//! | `GET /health/*`              | here               | probes              |
//! | `GET /openapi.json`          | [`openapi`]        | generated spec      |

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router.
///
/// Health probes are mounted alongside the store routes; nothing on
/// this surface requires gateway-level authentication — read access is
/// decided per object by the authorization engine.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::store::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
