//! Business logic for the player-facing registration commands. These helpers
//! serialise every state change through the round write lock and fan out SSE
//! notifications once the change has committed.

use tracing::{debug, info};

use crate::{
    dto::game::{ConfirmationResponse, RegistrationResponse},
    error::ServiceError,
    services::sse_events,
    state::{SharedState, round::UserId},
};

/// Register `user_id` for the current round, assigning the lowest unused
/// number.
///
/// Calling again in the same round returns the existing record unchanged.
pub async fn register(
    state: &SharedState,
    user_id: UserId,
    display_name: &str,
) -> Result<RegistrationResponse, ServiceError> {
    let registration = {
        let mut round = state.round().write().await;
        round.register(user_id, display_name)?
    };

    if registration.newly_registered {
        info!(
            user_id,
            number = registration.player.number,
            round = registration.player.round,
            total_players = registration.total_players,
            "player registered"
        );
        sse_events::broadcast_player_registered(state, &registration);
    } else {
        debug!(
            user_id,
            number = registration.player.number,
            "player repeated registration"
        );
    }

    Ok(registration.into())
}

/// Confirm `user_id`'s participation as an active contestant.
///
/// When the confirmation completes the round (every slot confirmed) and the
/// auto-reset policy is enabled, the round rolls over before the lock is
/// released, so no other command can slip in between.
pub async fn confirm(
    state: &SharedState,
    user_id: UserId,
) -> Result<ConfirmationResponse, ServiceError> {
    let (confirmation, next_round) = {
        let mut round = state.round().write().await;
        let confirmation = round.confirm(user_id)?;

        let next_round = if confirmation.just_confirmed
            && confirmation.round_complete()
            && state.config().auto_reset_on_full
        {
            Some(round.reset())
        } else {
            None
        };

        (confirmation, next_round)
    };

    if confirmation.just_confirmed {
        info!(
            user_id,
            number = confirmation.player.number,
            round = confirmation.player.round,
            confirmed_players = confirmation.confirmed_players,
            "player confirmed participation"
        );
        sse_events::broadcast_player_confirmed(state, &confirmation);
    } else {
        debug!(
            user_id,
            number = confirmation.player.number,
            "player repeated confirmation"
        );
    }

    if let Some(round) = next_round {
        info!(round, "all slots confirmed; starting next round");
        sse_events::broadcast_round_reset(state, round);
    }

    Ok(confirmation.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn test_state(max_players: u32) -> SharedState {
        AppState::new(AppConfig {
            max_players,
            admin_username: Some("@host".into()),
            admin_token: None,
            auto_reset_on_full: false,
        })
    }

    #[tokio::test]
    async fn concurrent_registrations_get_distinct_numbers() {
        let state = test_state(64);

        let mut handles = Vec::new();
        for user_id in 0..64 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                register(&state, user_id, "player").await
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            numbers.push(response.number);
        }

        numbers.sort_unstable();
        assert_eq!(numbers, (1..=64).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn concurrent_race_for_last_slot_has_one_winner() {
        let state = test_state(3);
        register(&state, 1, "A").await.unwrap();
        register(&state, 2, "B").await.unwrap();

        let first = tokio::spawn({
            let state = state.clone();
            async move { register(&state, 3, "C").await }
        });
        let second = tokio::spawn({
            let state = state.clone();
            async move { register(&state, 4, "D").await }
        });

        let outcomes = [first.await.unwrap(), second.await.unwrap()];
        let winners: Vec<_> = outcomes.iter().filter(|o| o.is_ok()).collect();
        assert_eq!(winners.len(), 1, "exactly one registrant may take the last slot");
        assert_eq!(winners[0].as_ref().unwrap().number, 3);

        let loser = outcomes.iter().find(|o| o.is_err()).unwrap();
        assert!(matches!(
            loser.as_ref().unwrap_err(),
            ServiceError::RoundFull {
                round: 1,
                capacity: 3
            }
        ));
    }

    #[tokio::test]
    async fn repeated_registration_returns_same_number() {
        let state = test_state(10);
        let first = register(&state, 7, "Grace").await.unwrap();
        let again = register(&state, 7, "Grace").await.unwrap();

        assert!(first.newly_registered);
        assert!(!again.newly_registered);
        assert_eq!(again.number, first.number);
        assert_eq!(again.total_players, 1);
    }

    #[tokio::test]
    async fn confirm_requires_registration() {
        let state = test_state(10);
        let err = confirm(&state, 42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotRegistered(42)));
    }

    #[tokio::test]
    async fn confirm_is_idempotent() {
        let state = test_state(10);
        register(&state, 1, "A").await.unwrap();

        let first = confirm(&state, 1).await.unwrap();
        assert!(first.just_confirmed);
        assert_eq!(first.confirmed_players, 1);

        let again = confirm(&state, 1).await.unwrap();
        assert!(!again.just_confirmed);
        assert_eq!(again.confirmed_players, 1);
    }

    #[tokio::test]
    async fn full_confirmation_keeps_round_without_policy() {
        let state = test_state(2);
        register(&state, 1, "A").await.unwrap();
        register(&state, 2, "B").await.unwrap();
        confirm(&state, 1).await.unwrap();
        confirm(&state, 2).await.unwrap();

        // Policy disabled: the completed round stays live.
        let round = state.round().read().await;
        assert_eq!(round.round(), 1);
        assert_eq!(round.total_players(), 2);
    }

    #[tokio::test]
    async fn full_confirmation_rolls_over_with_policy() {
        let state = AppState::new(AppConfig {
            max_players: 2,
            admin_username: None,
            admin_token: None,
            auto_reset_on_full: true,
        });
        register(&state, 1, "A").await.unwrap();
        register(&state, 2, "B").await.unwrap();
        confirm(&state, 1).await.unwrap();
        let last = confirm(&state, 2).await.unwrap();
        assert!(last.just_confirmed);
        assert_eq!(last.round, 1);

        let round = state.round().read().await;
        assert_eq!(round.round(), 2);
        assert_eq!(round.total_players(), 0);
    }
}
