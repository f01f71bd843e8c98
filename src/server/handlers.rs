use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::{AuthError, Role};
use crate::registry::{Parcel, ParcelCounts, ParcelSummary, RegistryError};
use crate::route::{RouteError, RouteResult};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match e {
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };
        api_error(status, e.to_string())
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        let status = match e {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Duplicate(_) => StatusCode::CONFLICT,
            RegistryError::BadImport { .. } => StatusCode::BAD_REQUEST,
        };
        api_error(status, e.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(e: RouteError) -> Self {
        api_error(StatusCode::NOT_FOUND, e.to_string())
    }
}

// ─── Authorization ───────────────────────────────────────────────

/// Resolve the bearer token to a role and check it against the
/// endpoint's requirement. The role is decided here, once, and never
/// re-derived inside a handler.
fn require_role(state: &AppState, headers: &HeaderMap, required: Role) -> Result<Role, ApiError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let held = state.tokens.authorize(raw)?;
    if !held.allows(required) {
        return Err(AuthError::Forbidden { held, required }.into());
    }
    Ok(held)
}

// ─── Reply bodies ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageReply {
    pub message: String,
}

fn message(msg: &str) -> Json<MessageReply> {
    Json(MessageReply { message: msg.to_string() })
}

#[derive(Serialize)]
pub struct ImportReply {
    pub message: String,
    pub imported: usize,
}

// ─── GET /parcels ────────────────────────────────────────────────

pub async fn list_parcels(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ParcelSummary>>, ApiError> {
    require_role(&state, &headers, Role::Viewer)?;
    let registry = state.registry.lock().unwrap();
    Ok(Json(registry.list()))
}

// ─── GET /parcels/{tracking} ─────────────────────────────────────

pub async fn get_parcel(
    State(state): State<Arc<AppState>>,
    Path(tracking): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Parcel>, ApiError> {
    require_role(&state, &headers, Role::Viewer)?;
    let registry = state.registry.lock().unwrap();
    let parcel = registry.get(&tracking)?;
    Ok(Json(parcel.clone()))
}

// ─── POST /parcels ───────────────────────────────────────────────

pub async fn create_parcel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(parcel): Json<Parcel>,
) -> Result<(StatusCode, Json<MessageReply>), ApiError> {
    require_role(&state, &headers, Role::Staff)?;
    let tracking = parcel.tracking_number.clone();
    {
        let mut registry = state.registry.lock().unwrap();
        registry.create(parcel)?;
    }
    eprintln!(
        "[{}] POST /parcels -> {} created",
        Utc::now().format("%H:%M:%S"),
        tracking,
    );
    Ok((StatusCode::CREATED, message("Parcel created")))
}

// ─── PUT /parcels/{tracking} ─────────────────────────────────────

pub async fn update_parcel(
    State(state): State<Arc<AppState>>,
    Path(tracking): Path<String>,
    headers: HeaderMap,
    Json(updated): Json<Parcel>,
) -> Result<Json<MessageReply>, ApiError> {
    require_role(&state, &headers, Role::Staff)?;
    let mut registry = state.registry.lock().unwrap();
    registry.update(&tracking, updated)?;
    Ok(message("Parcel updated"))
}

// ─── DELETE /parcels/{tracking} ──────────────────────────────────

pub async fn delete_parcel(
    State(state): State<Arc<AppState>>,
    Path(tracking): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageReply>, ApiError> {
    require_role(&state, &headers, Role::Admin)?;
    let mut registry = state.registry.lock().unwrap();
    registry.delete(&tracking)?;
    Ok(message("Parcel deleted"))
}

// ─── GET /parcels/{tracking}/route ───────────────────────────────

pub async fn parcel_route(
    State(state): State<Arc<AppState>>,
    Path(tracking): Path<String>,
    headers: HeaderMap,
) -> Result<Json<RouteResult>, ApiError> {
    require_role(&state, &headers, Role::Viewer)?;
    let start = Instant::now();

    let result = state.resolver.resolve(&tracking)?;

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /parcels/{}/route -> {} km ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        tracking,
        result.distance_km,
        elapsed.as_secs_f64() * 1000.0,
    );
    Ok(Json(result))
}

// ─── GET /parcels/stats/counts ───────────────────────────────────

pub async fn parcel_counts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ParcelCounts>, ApiError> {
    require_role(&state, &headers, Role::Staff)?;
    let registry = state.registry.lock().unwrap();
    Ok(Json(registry.counts()))
}

// ─── POST /parcels/import ────────────────────────────────────────

pub async fn import_parcels(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportReply>, ApiError> {
    require_role(&state, &headers, Role::Admin)?;
    let start = Instant::now();

    let imported = {
        let mut registry = state.registry.lock().unwrap();
        registry.import_csv(&body)?
    };

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] POST /parcels/import -> {} parcels ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        imported,
        elapsed.as_secs_f64() * 1000.0,
    );
    Ok(Json(ImportReply {
        message: "Parcels imported".to_string(),
        imported,
    }))
}
