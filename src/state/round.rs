use indexmap::IndexMap;
use thiserror::Error;

use crate::state::allocator::NumberAllocator;

/// Identifier assigned to a user by the chat platform.
pub type UserId = i64;

/// A registered participant's record for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Chat platform identifier of the participant.
    pub user_id: UserId,
    /// Display name captured at registration time.
    pub display_name: String,
    /// Unique number assigned for this round.
    pub number: u32,
    /// Round the player registered for.
    pub round: u32,
    /// Whether the player has confirmed participation as a contestant.
    pub confirmed: bool,
}

/// Outcome of a registration attempt that found or created a player.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The player's record as it stands after the call.
    pub player: Player,
    /// `false` when the user was already registered and the existing record
    /// was returned unchanged.
    pub newly_registered: bool,
    /// Players registered for the round after the call.
    pub total_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
}

/// Outcome of a confirmation attempt on a registered player.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// The player's record as it stands after the call.
    pub player: Player,
    /// `false` when the player had already confirmed and nothing changed.
    pub just_confirmed: bool,
    /// Players registered for the round after the call.
    pub total_players: u32,
    /// Players confirmed for the round after the call.
    pub confirmed_players: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
}

impl Confirmation {
    /// Whether every slot of the round is now held by a confirmed player.
    ///
    /// Acting on this (for example rolling the round over) is the caller's
    /// policy; the round state itself never resets on its own.
    pub fn round_complete(&self) -> bool {
        self.confirmed_players >= self.capacity
    }
}

/// Error returned when the current round cannot accept another participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("round {round} is full ({capacity} players)")]
pub struct RoundFull {
    /// Round that ran out of slots.
    pub round: u32,
    /// Maximum number of players the round can hold.
    pub capacity: u32,
}

/// Errors that can occur when confirming participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmError {
    /// The round has no remaining slots for new participants.
    #[error(transparent)]
    RoundFull(#[from] RoundFull),
    /// The user has no registration in the current round.
    #[error("user {0} is not registered for the current round")]
    NotRegistered(UserId),
}

/// Mutable state of the round currently accepting registrations.
///
/// Exactly one `RoundState` is live at a time. All mutation goes through
/// [`register`](Self::register), [`confirm`](Self::confirm), and
/// [`reset`](Self::reset); the surrounding [`AppState`](crate::state::AppState)
/// serialises callers behind a single lock so each call observes and produces
/// a consistent round.
#[derive(Debug)]
pub struct RoundState {
    round: u32,
    players: IndexMap<UserId, Player>,
    allocator: NumberAllocator,
}

impl RoundState {
    /// Start round 1 with every slot free.
    pub fn new(capacity: u32) -> Self {
        Self {
            round: 1,
            players: IndexMap::new(),
            allocator: NumberAllocator::new(capacity),
        }
    }

    /// Number of the round currently accepting registrations.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Maximum number of players the round can hold.
    pub fn capacity(&self) -> u32 {
        self.allocator.capacity()
    }

    /// Players registered for the current round.
    pub fn total_players(&self) -> u32 {
        self.players.len() as u32
    }

    /// Players that have confirmed participation in the current round.
    pub fn confirmed_players(&self) -> u32 {
        self.players.values().filter(|p| p.confirmed).count() as u32
    }

    /// Register `user_id` for the current round, assigning the lowest unused
    /// number.
    ///
    /// Re-registration is idempotent: an existing player is returned
    /// unchanged with `newly_registered = false`. The existence check,
    /// capacity check, number allocation, and insertion happen under the one
    /// `&mut self` borrow, so no interleaving can exceed capacity or
    /// duplicate a number.
    pub fn register(
        &mut self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Registration, RoundFull> {
        if let Some(player) = self.players.get(&user_id) {
            return Ok(Registration {
                player: player.clone(),
                newly_registered: false,
                total_players: self.total_players(),
                capacity: self.capacity(),
            });
        }

        // The allocator holds exactly one number per registered player, so
        // running out of numbers is the capacity check.
        let number = self.allocator.allocate().ok_or(RoundFull {
            round: self.round,
            capacity: self.capacity(),
        })?;

        let player = Player {
            user_id,
            display_name: display_name.to_owned(),
            number,
            round: self.round,
            confirmed: false,
        };
        self.players.insert(user_id, player.clone());

        Ok(Registration {
            player,
            newly_registered: true,
            total_players: self.total_players(),
            capacity: self.capacity(),
        })
    }

    /// Mark `user_id` as a confirmed contestant for the current round.
    ///
    /// Confirmation is idempotent: a second call returns the player unchanged
    /// with `just_confirmed = false`. A registered player can always confirm;
    /// an unregistered user gets [`ConfirmError::RoundFull`] when no slot is
    /// left and [`ConfirmError::NotRegistered`] otherwise.
    pub fn confirm(&mut self, user_id: UserId) -> Result<Confirmation, ConfirmError> {
        let capacity = self.capacity();
        let at_capacity = self.allocator.is_full();

        let Some(player) = self.players.get_mut(&user_id) else {
            if at_capacity {
                return Err(RoundFull {
                    round: self.round,
                    capacity,
                }
                .into());
            }
            return Err(ConfirmError::NotRegistered(user_id));
        };

        let just_confirmed = !player.confirmed;
        player.confirmed = true;
        let player = player.clone();

        Ok(Confirmation {
            player,
            just_confirmed,
            total_players: self.total_players(),
            confirmed_players: self.confirmed_players(),
            capacity,
        })
    }

    /// Discard the current round entirely and start the next one.
    ///
    /// Increments the round number by exactly one, drops every player record,
    /// and reclaims every number. Returns the new round number.
    pub fn reset(&mut self) -> u32 {
        self.round += 1;
        self.players.clear();
        self.allocator.reset();
        self.round
    }

    /// Snapshot of the current roster sorted ascending by number.
    pub fn roster(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_key(|player| player.number);
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_with_sequential_numbers() {
        let mut round = RoundState::new(10);

        let first = round.register(100, "Alice").unwrap();
        assert!(first.newly_registered);
        assert_eq!(first.player.number, 1);
        assert_eq!(first.player.round, 1);
        assert!(!first.player.confirmed);

        let second = round.register(200, "Bob").unwrap();
        assert_eq!(second.player.number, 2);
        assert_eq!(second.total_players, 2);
    }

    #[test]
    fn registration_is_idempotent() {
        let mut round = RoundState::new(10);
        let first = round.register(100, "Alice").unwrap();
        let again = round.register(100, "Alice").unwrap();

        assert!(!again.newly_registered);
        assert_eq!(again.player.number, first.player.number);
        assert_eq!(again.total_players, 1);
    }

    #[test]
    fn rejects_registration_beyond_capacity() {
        let mut round = RoundState::new(2);
        round.register(1, "A").unwrap();
        round.register(2, "B").unwrap();

        let err = round.register(3, "C").unwrap_err();
        assert_eq!(
            err,
            RoundFull {
                round: 1,
                capacity: 2
            }
        );
        // The failed attempt must not leave any trace.
        assert_eq!(round.total_players(), 2);
        assert!(round.roster().iter().all(|p| p.user_id != 3));
    }

    #[test]
    fn numbers_are_unique_within_a_round() {
        let mut round = RoundState::new(50);
        for user_id in 0..50 {
            round.register(user_id, "player").unwrap();
        }

        let mut numbers: Vec<u32> = round.roster().iter().map(|p| p.number).collect();
        numbers.dedup();
        assert_eq!(numbers, (1..=50).collect::<Vec<u32>>());
    }

    #[test]
    fn confirm_flips_status_once() {
        let mut round = RoundState::new(10);
        round.register(100, "Alice").unwrap();

        let first = round.confirm(100).unwrap();
        assert!(first.just_confirmed);
        assert!(first.player.confirmed);
        assert_eq!(first.confirmed_players, 1);

        let again = round.confirm(100).unwrap();
        assert!(!again.just_confirmed);
        assert_eq!(again.confirmed_players, 1);
    }

    #[test]
    fn confirm_unregistered_user_does_not_mutate() {
        let mut round = RoundState::new(10);
        round.register(100, "Alice").unwrap();

        let err = round.confirm(999).unwrap_err();
        assert_eq!(err, ConfirmError::NotRegistered(999));
        assert_eq!(round.total_players(), 1);
        assert_eq!(round.confirmed_players(), 0);
    }

    #[test]
    fn confirm_unregistered_user_in_full_round_reports_full() {
        let mut round = RoundState::new(1);
        round.register(100, "Alice").unwrap();

        let err = round.confirm(999).unwrap_err();
        assert_eq!(
            err,
            ConfirmError::RoundFull(RoundFull {
                round: 1,
                capacity: 1
            })
        );
    }

    #[test]
    fn registered_player_can_confirm_in_full_round() {
        let mut round = RoundState::new(2);
        round.register(1, "A").unwrap();
        round.register(2, "B").unwrap();

        let confirmation = round.confirm(1).unwrap();
        assert!(confirmation.just_confirmed);

        let last = round.confirm(2).unwrap();
        assert!(last.just_confirmed);
        assert!(last.round_complete());
    }

    #[test]
    fn reset_starts_a_fresh_round() {
        let mut round = RoundState::new(10);
        round.register(100, "Alice").unwrap();
        round.confirm(100).unwrap();

        assert_eq!(round.reset(), 2);
        assert_eq!(round.round(), 2);
        assert_eq!(round.total_players(), 0);
        assert!(round.roster().is_empty());

        // Numbers start over and the old confirmation is gone.
        let again = round.register(100, "Alice").unwrap();
        assert!(again.newly_registered);
        assert_eq!(again.player.number, 1);
        assert_eq!(again.player.round, 2);
        assert!(!again.player.confirmed);
    }

    #[test]
    fn full_round_lifecycle_with_three_slots() {
        let mut round = RoundState::new(3);

        assert_eq!(round.register(1, "A").unwrap().player.number, 1);
        assert_eq!(round.register(2, "B").unwrap().player.number, 2);
        let c = round.register(3, "C").unwrap();
        assert_eq!(c.player.number, 3);
        assert_eq!(c.total_players, 3);

        assert_eq!(
            round.register(4, "D").unwrap_err(),
            RoundFull {
                round: 1,
                capacity: 3
            }
        );

        let confirmed = round.confirm(1).unwrap();
        assert_eq!(confirmed.player.number, 1);
        assert_eq!(confirmed.total_players, 3);

        let new_round = round.reset();
        assert_eq!(new_round, 2);
        assert!(round.roster().is_empty());

        let again = round.register(1, "A").unwrap();
        assert_eq!(again.player.number, 1);
        assert_eq!(again.player.round, new_round);
    }

    #[test]
    fn roster_is_sorted_by_number() {
        let mut round = RoundState::new(10);
        round.register(30, "C").unwrap();
        round.register(10, "A").unwrap();
        round.register(20, "B").unwrap();

        let numbers: Vec<u32> = round.roster().iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
