//! Chat command adapter. Parses the raw text of an inbound chat message,
//! resolves the sender's display name, dispatches to the round operations,
//! and renders the structured outcome into the reply text sent back to the
//! chat.
//!
//! Everything identity- and presentation-related lives here so the round
//! state itself only ever sees a user id, a display name, and an
//! authorization verdict.

use tracing::warn;

use crate::{
    dto::{
        admin::PlayerListResponse,
        chat::{ChatCommandRequest, ChatReply},
        game::{ConfirmationResponse, RegistrationResponse},
    },
    error::ServiceError,
    services::{admin_service, registration_service},
    state::{SharedState, round::UserId},
};

const REPLY_ROUND_FULL: &str = "🚨 ROUND FULL! Next round starts soon";
const REPLY_NOT_REGISTERED: &str = "You must /start to register first.";
const REPLY_NOT_AUTHORIZED: &str = "❌ You are not authorized to use this command.";
const REPLY_ERROR: &str = "⚠️ An error occurred. Please try again later.";

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// `/start`: register for the current round.
    Start,
    /// `/join`: confirm participation as a contestant.
    Join,
    /// `/players`: admin-only roster listing.
    Players,
}

/// Handle one inbound chat message end to end.
///
/// Messages that do not carry a known command are ignored (no reply), which
/// mirrors how a chat bot leaves ordinary conversation alone. Recoverable
/// command failures are rendered as reply text; they never bubble up as
/// errors.
pub async fn handle_command(state: &SharedState, request: ChatCommandRequest) -> ChatReply {
    let Some(command) = parse_command(&request.text) else {
        return ChatReply { reply: None };
    };

    let name = display_name(
        request.full_name.as_deref(),
        request.username.as_deref(),
        request.user_id,
    );

    let reply = match command {
        ChatCommand::Start => {
            match registration_service::register(state, request.user_id, &name).await {
                Ok(registration) => render_registered(&registration, &name),
                Err(ServiceError::RoundFull { .. }) => REPLY_ROUND_FULL.to_string(),
                Err(err) => render_failure(command, &err),
            }
        }
        ChatCommand::Join => {
            match registration_service::confirm(state, request.user_id).await {
                Ok(confirmation) => render_confirmed(&confirmation),
                Err(ServiceError::RoundFull { .. }) => REPLY_ROUND_FULL.to_string(),
                Err(ServiceError::NotRegistered(_)) => REPLY_NOT_REGISTERED.to_string(),
                Err(err) => render_failure(command, &err),
            }
        }
        ChatCommand::Players => {
            let authorized = is_admin(
                state.config().admin_username.as_deref(),
                request.username.as_deref(),
            );
            match admin_service::list_players(state, authorized).await {
                Ok(list) => render_player_list(&list),
                Err(ServiceError::Unauthorized(_)) => REPLY_NOT_AUTHORIZED.to_string(),
                Err(err) => render_failure(command, &err),
            }
        }
    };

    ChatReply { reply: Some(reply) }
}

/// Extract the command from the first token of a message, accepting the
/// `/command@BotName` form used in group chats.
pub fn parse_command(text: &str) -> Option<ChatCommand> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);

    match name {
        "start" => Some(ChatCommand::Start),
        "join" => Some(ChatCommand::Join),
        "players" => Some(ChatCommand::Players),
        _ => None,
    }
}

/// Resolve the name shown for a sender: full profile name, else `@username`,
/// else a fallback built from the platform id.
pub fn display_name(full_name: Option<&str>, username: Option<&str>, user_id: UserId) -> String {
    if let Some(full_name) = full_name.filter(|name| !name.trim().is_empty()) {
        return full_name.to_owned();
    }
    if let Some(username) = username.filter(|name| !name.trim().is_empty()) {
        return format!("@{username}");
    }
    format!("ID:{user_id}")
}

/// Compare the sender's username against the configured admin identity,
/// ignoring any leading `@` on either side.
pub fn is_admin(admin_username: Option<&str>, username: Option<&str>) -> bool {
    let (Some(admin), Some(sender)) = (admin_username, username) else {
        return false;
    };

    let admin = admin.trim_start_matches('@');
    let sender = sender.trim_start_matches('@');
    !admin.is_empty() && admin == sender
}

fn render_registered(registration: &RegistrationResponse, name: &str) -> String {
    format!(
        "💀 PLAYER {:03} REGISTERED 💀\n\
         Welcome {name}!\n\
         Round: {}\n\
         Players: {}/{}\n\
         Type /join to confirm",
        registration.number, registration.round, registration.total_players, registration.capacity,
    )
}

fn render_confirmed(confirmation: &ConfirmationResponse) -> String {
    format!(
        "✅ CONFIRMED!\n\
         Number: #{:03}\n\
         Status: Active contestant\n\
         Players: {}/{}",
        confirmation.number, confirmation.total_players, confirmation.capacity,
    )
}

fn render_player_list(list: &PlayerListResponse) -> String {
    let mut lines = vec![
        format!("👥 PLAYERS (Round {})", list.round),
        format!("Total: {}/{}", list.total_players, list.capacity),
        String::new(),
    ];
    for player in &list.players {
        lines.push(format!("{:03}: {}", player.number, player.display_name));
    }
    lines.join("\n")
}

fn render_failure(command: ChatCommand, err: &ServiceError) -> String {
    warn!(?command, error = %err, "chat command failed");
    REPLY_ERROR.to_string()
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

    fn message(user_id: UserId, username: Option<&str>, text: &str) -> ChatCommandRequest {
        ChatCommandRequest {
            user_id,
            username: username.map(str::to_owned),
            full_name: None,
            text: text.to_owned(),
        }
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("/start"), Some(ChatCommand::Start));
        assert_eq!(parse_command("/join extra words"), Some(ChatCommand::Join));
        assert_eq!(
            parse_command("/players@KnockoutBot"),
            Some(ChatCommand::Players)
        );
    }

    #[test]
    fn ignores_unknown_text() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("/quit"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("start"), None);
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(display_name(Some("Ada Lovelace"), Some("ada"), 7), "Ada Lovelace");
        assert_eq!(display_name(None, Some("ada"), 7), "@ada");
        assert_eq!(display_name(Some("  "), None, 7), "ID:7");
    }

    #[test]
    fn admin_comparison_ignores_at_prefix() {
        assert!(is_admin(Some("@host"), Some("host")));
        assert!(is_admin(Some("host"), Some("host")));
        assert!(!is_admin(Some("@host"), Some("guest")));
        assert!(!is_admin(Some("@host"), None));
        assert!(!is_admin(None, Some("host")));
        assert!(!is_admin(Some("@"), Some("")));
    }

    #[tokio::test]
    async fn start_command_registers_and_renders() {
        let state = test_state(3);
        let reply = handle_command(&state, message(1, Some("ada"), "/start"))
            .await
            .reply
            .unwrap();

        assert!(reply.contains("PLAYER 001 REGISTERED"));
        assert!(reply.contains("Welcome @ada!"));
        assert!(reply.contains("Round: 1"));
        assert!(reply.contains("Players: 1/3"));
        assert!(reply.contains("Type /join to confirm"));
    }

    #[tokio::test]
    async fn start_command_reports_full_round() {
        let state = test_state(1);
        handle_command(&state, message(1, None, "/start")).await;

        let reply = handle_command(&state, message(2, None, "/start"))
            .await
            .reply
            .unwrap();
        assert_eq!(reply, REPLY_ROUND_FULL);
    }

    #[tokio::test]
    async fn join_before_start_prompts_registration() {
        let state = test_state(3);
        let reply = handle_command(&state, message(1, None, "/join"))
            .await
            .reply
            .unwrap();
        assert_eq!(reply, REPLY_NOT_REGISTERED);
    }

    #[tokio::test]
    async fn join_renders_confirmation() {
        let state = test_state(3);
        handle_command(&state, message(1, None, "/start")).await;

        let reply = handle_command(&state, message(1, None, "/join"))
            .await
            .reply
            .unwrap();
        assert!(reply.contains("✅ CONFIRMED!"));
        assert!(reply.contains("Number: #001"));
        assert!(reply.contains("Players: 1/3"));
    }

    #[tokio::test]
    async fn players_command_requires_admin() {
        let state = test_state(3);
        let reply = handle_command(&state, message(1, Some("guest"), "/players"))
            .await
            .reply
            .unwrap();
        assert_eq!(reply, REPLY_NOT_AUTHORIZED);
    }

    #[tokio::test]
    async fn players_command_lists_roster_for_admin() {
        let state = test_state(3);
        handle_command(&state, message(1, Some("ada"), "/start")).await;
        handle_command(&state, message(2, Some("bob"), "/start")).await;

        let reply = handle_command(&state, message(9, Some("host"), "/players"))
            .await
            .reply
            .unwrap();
        assert!(reply.contains("👥 PLAYERS (Round 1)"));
        assert!(reply.contains("Total: 2/3"));
        assert!(reply.contains("001: @ada"));
        assert!(reply.contains("002: @bob"));
    }

    #[tokio::test]
    async fn plain_chatter_gets_no_reply() {
        let state = test_state(3);
        let reply = handle_command(&state, message(1, None, "good luck everyone")).await;
        assert!(reply.reply.is_none());
    }
}
