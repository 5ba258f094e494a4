use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::validate_display_name,
    state::round::{Confirmation, Registration, UserId},
};

/// Payload used to register a user for the current round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Chat platform identifier of the user.
    pub user_id: UserId,
    /// Display name to record for the round.
    pub display_name: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.display_name) {
            errors.add("display_name", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload used to confirm a registered user's participation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    /// Chat platform identifier of the user.
    pub user_id: UserId,
}

/// Result of a registration attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    /// Number assigned to the player for this round.
    pub number: u32,
    /// Round the player is registered for.
    pub round: u32,
    /// Players registered for the round so far.
    pub total_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
    /// `false` when the user was already registered and nothing changed.
    pub newly_registered: bool,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            number: registration.player.number,
            round: registration.player.round,
            total_players: registration.total_players,
            capacity: registration.capacity,
            newly_registered: registration.newly_registered,
        }
    }
}

/// Result of a confirmation attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmationResponse {
    /// Number held by the confirmed player.
    pub number: u32,
    /// Round the confirmation applies to.
    pub round: u32,
    /// Players registered for the round.
    pub total_players: u32,
    /// Players confirmed for the round.
    pub confirmed_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
    /// `false` when the player had already confirmed and nothing changed.
    pub just_confirmed: bool,
}

impl From<Confirmation> for ConfirmationResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            number: confirmation.player.number,
            round: confirmation.player.round,
            total_players: confirmation.total_players,
            confirmed_players: confirmation.confirmed_players,
            capacity: confirmation.capacity,
            just_confirmed: confirmation.just_confirmed,
        }
    }
}
