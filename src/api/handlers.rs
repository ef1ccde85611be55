//! HTTP request handlers

use super::types::{
    ErrorResponse, EventResponse, GrantAccessRequest, InboundEvent, OutboundReply,
    StatusResponse, UpdatePreferencesRequest,
};
use super::AppState;
use crate::access::AccessGrant;
use crate::preferences::{PreferenceUpdate, Preferences};
use crate::session::{SessionStore, UserId, UserSession};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Request, State,
    },
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Header carrying the shared transport secret
pub const BOT_TOKEN_HEADER: &str = "x-bot-token";

/// Longest grant accepted through the API
const MAX_GRANT_DAYS: i64 = 3650;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Chat events
        .route("/api/users/:id/events", post(post_event))
        // Session inspection
        .route("/api/users/:id/session", get(get_session))
        .route("/api/users/:id/status", get(get_status))
        // Access grants
        .route("/api/users/:id/access", post(grant_access))
        // Preferences
        .route(
            "/api/users/:id/preferences",
            get(get_preferences)
                .put(update_preferences)
                .delete(reset_preferences),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bot_token,
        ));

    Router::new()
        .merge(api)
        .route("/version", get(get_version))
        .with_state(state)
}

async fn require_bot_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(BOT_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented != Some(&*state.bot_token) {
        tracing::warn!(path = %request.uri().path(), "Rejected request without valid bot token");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

// ============================================================
// Extraction
// ============================================================

type UserPath = Result<Path<i64>, PathRejection>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn user_id(path: UserPath) -> Result<UserId, AppError> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(UserId(id))
}

fn body<T>(json: JsonBody<T>) -> Result<T, AppError> {
    let Json(value) = json.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(value)
}

// ============================================================
// Chat Events
// ============================================================

async fn post_event(
    State(state): State<AppState>,
    path: UserPath,
    json: JsonBody<InboundEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let user_id = user_id(path)?;
    let inbound = body(json)?;
    tracing::debug!(user_id = %user_id, event = ?inbound, "Inbound event");

    let replies = state.runtime.handle_event(user_id, inbound.into()).await;
    Ok(Json(EventResponse {
        replies: replies.into_iter().map(OutboundReply::from).collect(),
    }))
}

// ============================================================
// Session & Access
// ============================================================

async fn get_session(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Json<UserSession>, AppError> {
    let user_id = user_id(path)?;
    state
        .runtime
        .store()
        .get(user_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No session for user {user_id}")))
}

async fn get_status(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Json<StatusResponse>, AppError> {
    let user_id = user_id(path)?;
    Ok(Json(StatusResponse {
        has_access: state.access.has_access(user_id).await,
        status: state.access.status_text(user_id).await,
    }))
}

async fn grant_access(
    State(state): State<AppState>,
    path: UserPath,
    json: JsonBody<GrantAccessRequest>,
) -> Result<Json<AccessGrant>, AppError> {
    let user_id = user_id(path)?;
    let req = body(json)?;
    let days = req.days.unwrap_or_else(|| req.tier.default_days());
    if !(1..=MAX_GRANT_DAYS).contains(&days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {MAX_GRANT_DAYS}"
        )));
    }

    let grant = state.access.grant_access(user_id, req.tier, days).await;
    Ok(Json(grant))
}

// ============================================================
// Preferences
// ============================================================

async fn get_preferences(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Json<Preferences>, AppError> {
    let user_id = user_id(path)?;
    Ok(Json(state.preferences.get_preferences(user_id).await))
}

async fn update_preferences(
    State(state): State<AppState>,
    path: UserPath,
    json: JsonBody<UpdatePreferencesRequest>,
) -> Result<Json<Preferences>, AppError> {
    let user_id = user_id(path)?;
    let req = body(json)?;
    let updates: Vec<PreferenceUpdate> = req
        .departure_airport
        .map(PreferenceUpdate::Airport)
        .into_iter()
        .chain(req.priority.map(PreferenceUpdate::Priority))
        .collect();
    if updates.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    Ok(Json(state.preferences.update(user_id, updates).await))
}

async fn reset_preferences(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Json<Preferences>, AppError> {
    let user_id = user_id(path)?;
    Ok(Json(state.preferences.reset_preferences(user_id).await))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("tripcheck-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid bot token".to_string(),
            ),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
