//! DTOs for the chat webhook bridging a messaging platform to the game.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::round::UserId;

/// Inbound chat message forwarded by the platform transport.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatCommandRequest {
    /// Chat platform identifier of the sender.
    pub user_id: UserId,
    /// Sender's username without the leading `@`, when they have one.
    #[serde(default)]
    pub username: Option<String>,
    /// Sender's full profile name, when available.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Raw message text, for example `/start` or `/players@KnockoutBot`.
    pub text: String,
}

/// Reply to send back into the chat, if the message warranted one.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    /// Rendered reply text; `null` when the message is ignored.
    pub reply: Option<String>,
}
