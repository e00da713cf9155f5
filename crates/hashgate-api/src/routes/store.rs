//! # Hashstore Routes
//!
//! The gateway's public surface: the resolution report, the system
//! metadata document, the authorized object download, and the
//! access-policy inspection endpoint.
//!
//! All routes take the PID as a wildcard capture — PIDs routinely
//! contain `/` (e.g. `doi:10.5072/FK2/ABC`), so a plain path parameter
//! would truncate them. Axum percent-decodes the capture.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio_util::io::ReaderStream;
use utoipa::ToSchema;

use hashgate_authz::{is_public, ReadDecision};
use hashgate_core::ShardedPath;
use hashgate_store::{AllowRule, ResolveError};

use crate::error::{AppError, ErrorBody, ErrorDetail};
use crate::state::AppState;

/// Build the hashstore router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/store/info/*pid", get(info))
        .route("/store/metadata/*pid", get(metadata))
        .route("/store/object/*pid", get(object))
        .route("/store/policy/*pid", get(policy))
}

/// The `Authorization` header value forwarded verbatim to the
/// coordinating node; empty string when absent.
fn forwarded_token(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// ── GET /store/info/{pid} ───────────────────────────────────────────

/// Resolution report for a PID: every derived path, the reference-file
/// contents, and the authorization decision.
///
/// On a missing reference the report is returned as far as resolution
/// got, with `message` explaining the failure, under a 404 status.
#[derive(Debug, Serialize, ToSchema)]
pub struct InfoReport {
    /// The PID as presented.
    pub pid: String,
    /// Sharded PID digest segments.
    #[schema(value_type = Vec<String>)]
    pub pid_hash: ShardedPath,
    /// Path of the pid-reference file.
    pub pid_path: String,
    /// Path of the system metadata document.
    pub meta_path: String,
    /// Contents of the pid-reference file: the hex CID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_data: Option<String>,
    /// Path of the cid-reference entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_path: Option<String>,
    /// Contents of the cid-reference entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_data: Option<String>,
    /// Path of the object bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_path: Option<String>,
    /// The read-authorization decision for this request's token.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub authorized: Option<ReadDecision>,
    /// Failure description when resolution stopped early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /store/info/{pid} — Resolution report.
#[utoipa::path(
    get,
    path = "/store/info/{pid}",
    params(("pid" = String, Path, description = "Persistent identifier (may contain slashes)")),
    responses(
        (status = 200, description = "Full resolution report", body = InfoReport),
        (status = 404, description = "A reference file is missing; partial report", body = InfoReport),
    ),
    tag = "store"
)]
pub async fn info(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let layout = state.resolver.layout().clone();
    let mut report = InfoReport {
        pid_hash: layout.pid_shards(&pid),
        pid_path: layout.pid_ref_path(&pid).display().to_string(),
        meta_path: layout.metadata_path(&pid).display().to_string(),
        pid: pid.clone(),
        pid_data: None,
        cid_path: None,
        cid_data: None,
        object_path: None,
        authorized: None,
        message: None,
    };

    let cid = match state.resolver.read_pid_ref(&pid).await {
        Ok(cid) => cid,
        Err(e @ ResolveError::RefNotFound { .. }) => {
            report.message = Some(e.to_string());
            return Ok((StatusCode::NOT_FOUND, Json(report)).into_response());
        }
        Err(e) => return Err(e.into()),
    };
    report.pid_data = Some(cid.to_hex());
    report.cid_path = Some(layout.cid_ref_path(&cid).display().to_string());

    match state.resolver.read_cid_ref(&cid).await {
        Ok(value) => report.cid_data = Some(value.trim().to_string()),
        Err(e @ ResolveError::RefNotFound { .. }) => {
            report.message = Some(e.to_string());
            return Ok((StatusCode::NOT_FOUND, Json(report)).into_response());
        }
        Err(e) => return Err(e.into()),
    }
    report.object_path = Some(layout.object_path(&cid).display().to_string());

    report.authorized = Some(state.engine.authorize(forwarded_token(&headers), &pid).await);
    Ok(Json(report).into_response())
}

// ── GET /store/metadata/{pid} ───────────────────────────────────────

/// GET /store/metadata/{pid} — Raw system metadata document.
#[utoipa::path(
    get,
    path = "/store/metadata/{pid}",
    params(("pid" = String, Path, description = "Persistent identifier")),
    responses(
        (status = 200, description = "System metadata XML", body = String, content_type = "application/xml"),
        (status = 404, description = "No system metadata for this PID", body = ErrorBody),
    ),
    tag = "store"
)]
pub async fn metadata(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state
        .metadata
        .read_sysmeta(&pid)
        .await
        .ok_or_else(|| AppError::NotFound(format!("system metadata not found for {pid}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{pid}_meta.xml\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ── GET /store/object/{pid} ─────────────────────────────────────────

/// GET /store/object/{pid} — The object bytes, after authorization.
#[utoipa::path(
    get,
    path = "/store/object/{pid}",
    params(("pid" = String, Path, description = "Persistent identifier")),
    responses(
        (status = 200, description = "Object bytes", body = String, content_type = "application/octet-stream"),
        (status = 401, description = "Read denied; decision in details", body = ErrorBody),
        (status = 404, description = "PID not in the store", body = ErrorBody),
    ),
    tag = "store"
)]
pub async fn object(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let cid = state.resolver.read_pid_ref(&pid).await?;

    let decision = state.engine.authorize(forwarded_token(&headers), &pid).await;
    if !decision.authorized {
        tracing::info!(pid, status = ?decision.status, "object read denied");
        let body = ErrorBody {
            error: ErrorDetail {
                code: "UNAUTHORIZED".to_string(),
                message: format!("not authorized for read on {pid}"),
                details: serde_json::to_value(&decision).ok(),
            },
        };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }

    let path = state.resolver.layout().object_path(&cid);
    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("object not found for {pid}"))
        } else {
            AppError::Internal(format!("failed to open {}: {e}", path.display()))
        }
    })?;

    // TODO: derive the content type from the sysmeta formatId instead
    // of serving everything as octet-stream.
    let stream = ReaderStream::new(file);
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(stream),
    )
        .into_response())
}

// ── GET /store/policy/{pid} ─────────────────────────────────────────

/// Parsed access policy for a PID.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyReport {
    /// The PID as presented.
    pub pid: String,
    /// Whether the object is publicly readable. True when no metadata
    /// document exists (default-open).
    pub public: bool,
    /// Allow rules in document order; empty when metadata is absent or
    /// carries no policy.
    #[schema(value_type = Vec<Object>)]
    pub rules: Vec<AllowRule>,
}

/// GET /store/policy/{pid} — Parsed allow rules and public flag.
#[utoipa::path(
    get,
    path = "/store/policy/{pid}",
    params(("pid" = String, Path, description = "Persistent identifier")),
    responses(
        (status = 200, description = "Parsed access policy", body = PolicyReport),
    ),
    tag = "store"
)]
pub async fn policy(State(state): State<AppState>, Path(pid): Path<String>) -> Json<PolicyReport> {
    let doc = state.metadata.read_parsed(&pid).await;
    let public = is_public(doc.as_ref());
    let rules = doc.map(|d| d.allow_rules().to_vec()).unwrap_or_default();
    Json(PolicyReport { pid, public, rules })
}
