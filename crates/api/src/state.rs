use std::sync::Arc;

use yahub_core::moderation::ModerationFilter;
use yahub_db::store::ContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Where users, news, comments and notes live.
    pub store: Arc<dyn ContentStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Comment moderation filter built from `config.banned_words`.
    pub moderation: Arc<ModerationFilter>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: ServerConfig) -> Self {
        let moderation = Arc::new(ModerationFilter::new(&config.banned_words));
        Self {
            store,
            config: Arc::new(config),
            moderation,
        }
    }
}
