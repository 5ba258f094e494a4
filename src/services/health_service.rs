use crate::dto::health::HealthResponse;

/// Respond with a static health payload.
///
/// The service keeps all state in memory, so reaching this handler at all
/// means the process is healthy.
pub fn health_status() -> HealthResponse {
    HealthResponse::ok()
}
