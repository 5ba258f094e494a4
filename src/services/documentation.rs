use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Knockout Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::game::register,
        crate::routes::game::confirm,
        crate::routes::chat::chat_command,
        crate::routes::admin::list_players,
        crate::routes::admin::reset_round,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::RegisterRequest,
            crate::dto::game::ConfirmRequest,
            crate::dto::game::RegistrationResponse,
            crate::dto::game::ConfirmationResponse,
            crate::dto::admin::PlayerEntry,
            crate::dto::admin::PlayerListResponse,
            crate::dto::admin::RoundSummary,
            crate::dto::chat::ChatCommandRequest,
            crate::dto::chat::ChatReply,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Player registration and confirmation"),
        (name = "chat", description = "Chat transport webhook"),
        (name = "admin", description = "Admin roster and round lifecycle operations"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;
