//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the gateway surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hashgate — Hashstore Resolution Gateway",
        version = "0.2.1",
        description = "Resolves persistent identifiers to content-addressed object locations and serves objects subject to read authorization.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::store::info,
        crate::routes::store::metadata,
        crate::routes::store::object,
        crate::routes::store::policy,
    ),
    components(schemas(
        crate::routes::store::InfoReport,
        crate::routes::store::PolicyReport,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "store", description = "PID resolution, metadata, and object access"),
    )
)]
pub struct ApiDoc;

/// Router serving the generated spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
