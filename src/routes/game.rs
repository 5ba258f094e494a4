use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::game::{ConfirmRequest, ConfirmationResponse, RegisterRequest, RegistrationResponse},
    error::AppError,
    services::registration_service,
    state::SharedState,
};

/// Routes handling player registration and confirmation.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/register", post(register))
        .route("/game/confirm", post(confirm))
}

/// Register a user for the current round, assigning the lowest free number.
#[utoipa::path(
    post,
    path = "/game/register",
    tag = "game",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration result", body = RegistrationResponse),
        (status = 409, description = "Round is full")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    payload.validate()?;
    let response =
        registration_service::register(&state, payload.user_id, &payload.display_name).await?;
    Ok(Json(response))
}

/// Confirm a registered user's participation in the current round.
#[utoipa::path(
    post,
    path = "/game/confirm",
    tag = "game",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Confirmation result", body = ConfirmationResponse),
        (status = 404, description = "User is not registered"),
        (status = 409, description = "Round is full")
    )
)]
pub async fn confirm(
    State(state): State<SharedState>,
    Json(payload): Json<ConfirmRequest>,
) -> Result<Json<ConfirmationResponse>, AppError> {
    let response = registration_service::confirm(&state, payload.user_id).await?;
    Ok(Json(response))
}
