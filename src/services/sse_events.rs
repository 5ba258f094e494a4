use serde::Serialize;
use tracing::warn;

use crate::{
    dto::sse::{PlayerConfirmedEvent, PlayerRegisteredEvent, RoundResetEvent, ServerEvent},
    state::{
        SharedState,
        round::{Confirmation, Registration},
    },
};

const EVENT_PLAYER_REGISTERED: &str = "player.registered";
const EVENT_PLAYER_CONFIRMED: &str = "player.confirmed";
const EVENT_ROUND_RESET: &str = "round.reset";

/// Broadcast that a new player registered for the current round.
pub fn broadcast_player_registered(state: &SharedState, registration: &Registration) {
    let payload = PlayerRegisteredEvent {
        number: registration.player.number,
        round: registration.player.round,
        total_players: registration.total_players,
        capacity: registration.capacity,
    };
    send_public_event(state, EVENT_PLAYER_REGISTERED, &payload);
}

/// Broadcast that a registered player confirmed participation.
pub fn broadcast_player_confirmed(state: &SharedState, confirmation: &Confirmation) {
    let payload = PlayerConfirmedEvent {
        number: confirmation.player.number,
        round: confirmation.player.round,
        confirmed_players: confirmation.confirmed_players,
        total_players: confirmation.total_players,
    };
    send_public_event(state, EVENT_PLAYER_CONFIRMED, &payload);
}

/// Broadcast that the round rolled over.
pub fn broadcast_round_reset(state: &SharedState, round: u32) {
    let payload = RoundResetEvent { round };
    send_public_event(state, EVENT_ROUND_RESET, &payload);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
