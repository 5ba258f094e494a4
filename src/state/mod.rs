pub mod allocator;
pub mod round;
mod sse;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::AppConfig, state::round::RoundState};

pub use self::sse::SseHub;

/// Cheaply cloneable handle to the shared application state.
pub type SharedState = Arc<AppState>;

/// Channel capacity for the public SSE stream.
const PUBLIC_SSE_CAPACITY: usize = 16;

/// Central application state guarding the live round and the event fan-out.
///
/// The round behind the lock is the only mutable shared resource: writers
/// (`register`, `confirm`, `reset`) hold the write half for their entire
/// read-check-write sequence, readers take a consistent snapshot through the
/// read half. No operation acquires anything else while holding it.
pub struct AppState {
    config: AppConfig,
    round: RwLock<RoundState>,
    sse: SseHub,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        let round = RoundState::new(config.max_players);
        Arc::new(Self {
            config,
            round: RwLock::new(round),
            sse: SseHub::new(PUBLIC_SSE_CAPACITY),
        })
    }

    /// Immutable runtime configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lock guarding the live round.
    pub fn round(&self) -> &RwLock<RoundState> {
        &self.round
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.sse
    }
}
