use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::chat::{ChatCommandRequest, ChatReply},
    services::command_service,
    state::SharedState,
};

/// Webhook consumed by the chat transport adapter.
pub fn router() -> Router<SharedState> {
    Router::new().route("/chat/command", post(chat_command))
}

/// Process one inbound chat message and return the reply to send, if any.
#[utoipa::path(
    post,
    path = "/chat/command",
    tag = "chat",
    request_body = ChatCommandRequest,
    responses((status = 200, description = "Rendered reply, or null for ignored messages", body = ChatReply))
)]
pub async fn chat_command(
    State(state): State<SharedState>,
    Json(payload): Json<ChatCommandRequest>,
) -> Json<ChatReply> {
    Json(command_service::handle_command(&state, payload).await)
}
