/// Admin service for roster queries and round lifecycle operations.
pub mod admin_service;
/// Chat command parsing and reply rendering.
pub mod command_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Registration and confirmation operations against the shared round.
pub mod registration_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
