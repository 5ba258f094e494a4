use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::{
    dto::admin::{PlayerListResponse, RoundSummary},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin-only endpoints for inspecting the roster and driving the round
/// lifecycle.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/players", get(list_players))
        .route("/admin/round/reset", post(reset_round))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Retrieve the current round's roster, sorted ascending by player number.
#[utoipa::path(
    get,
    path = "/admin/players",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token from the server configuration")),
    responses(
        (status = 200, description = "Current roster", body = PlayerListResponse),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<PlayerListResponse>, AppError> {
    // The middleware already vouched for the caller.
    Ok(Json(admin_service::list_players(&state, true).await?))
}

/// Discard the current round and start the next one.
#[utoipa::path(
    post,
    path = "/admin/round/reset",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token from the server configuration")),
    responses(
        (status = 200, description = "New round number", body = RoundSummary),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
pub async fn reset_round(State(state): State<SharedState>) -> Result<Json<RoundSummary>, AppError> {
    Ok(Json(admin_service::reset_round(&state).await))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    match state.config().admin_token.as_deref() {
        Some(token) if token == provided => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid admin token".into())),
        None => Err(AppError::Unauthorized("admin token not configured".into())),
    }
}
