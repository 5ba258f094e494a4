//! Business logic powering the admin routes: read-consistent roster
//! snapshots and the round lifecycle controls.
//!
//! Authorization is decided by the caller (HTTP token middleware or the chat
//! adapter's identity comparison); these helpers only receive the verdict.

use tracing::info;

use crate::{
    dto::admin::{PlayerListResponse, RoundSummary},
    error::ServiceError,
    services::sse_events,
    state::SharedState,
};

/// Return the current round's roster sorted ascending by number.
///
/// The snapshot is taken under the round read lock, so it can never observe a
/// half-applied registration or reset.
pub async fn list_players(
    state: &SharedState,
    authorized: bool,
) -> Result<PlayerListResponse, ServiceError> {
    if !authorized {
        return Err(ServiceError::Unauthorized(
            "player listing is restricted to the admin".into(),
        ));
    }

    let round = state.round().read().await;
    info!(
        round = round.round(),
        total_players = round.total_players(),
        "admin requested player list"
    );

    Ok(PlayerListResponse {
        round: round.round(),
        total_players: round.total_players(),
        capacity: round.capacity(),
        players: round.roster().into_iter().map(Into::into).collect(),
    })
}

/// Discard the current round and start the next one.
pub async fn reset_round(state: &SharedState) -> RoundSummary {
    let round = {
        let mut guard = state.round().write().await;
        guard.reset()
    };

    info!(round, "round reset");
    sse_events::broadcast_round_reset(state, round);

    RoundSummary { round }
}
