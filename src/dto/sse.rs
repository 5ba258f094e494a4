use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Serialized JSON payload placed in the SSE data field.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream.
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a new player registers for the current round.
pub struct PlayerRegisteredEvent {
    /// Number assigned to the player.
    pub number: u32,
    /// Round the player registered for.
    pub round: u32,
    /// Players registered for the round so far.
    pub total_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a registered player confirms participation.
pub struct PlayerConfirmedEvent {
    /// Number held by the confirmed player.
    pub number: u32,
    /// Round the confirmation applies to.
    pub round: u32,
    /// Players confirmed for the round so far.
    pub confirmed_players: u32,
    /// Players registered for the round.
    pub total_players: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the round rolls over and all registrations are discarded.
pub struct RoundResetEvent {
    /// Round now accepting registrations.
    pub round: u32,
}
