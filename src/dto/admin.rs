//! DTO definitions used by the admin REST API and documentation layer.

use serde::Serialize;
use utoipa::ToSchema;

use crate::state::round::Player;

/// One roster line of the admin player list.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerEntry {
    /// Number assigned to the player for this round.
    pub number: u32,
    /// Display name recorded at registration time.
    pub display_name: String,
    /// Whether the player confirmed participation as a contestant.
    pub confirmed: bool,
}

impl From<Player> for PlayerEntry {
    fn from(player: Player) -> Self {
        Self {
            number: player.number,
            display_name: player.display_name,
            confirmed: player.confirmed,
        }
    }
}

/// Consistent snapshot of the current round's roster, sorted by number.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerListResponse {
    /// Round the snapshot was taken from.
    pub round: u32,
    /// Players registered for the round.
    pub total_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
    /// Roster entries in ascending number order.
    pub players: Vec<PlayerEntry>,
}

/// Round counter returned by lifecycle operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundSummary {
    /// Round currently accepting registrations.
    pub round: u32,
}
