pub mod challenge;
pub mod coerce;
mod countdown;
pub mod engine;
pub mod session;

use std::sync::Arc;

use crate::{config::AppConfig, dao::kv_store::KeyValueStore};

pub use self::engine::SessionEngine;

/// Shared handle passed to every handler.
pub type SharedState = Arc<AppState>;

/// Central application state: the session engine and the store it mirrors into.
pub struct AppState {
    engine: SessionEngine,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Build the engine over `store` using the catalog and interval from `config`.
    ///
    /// The engine starts idle; call [`SessionEngine::resume`] to pick up a
    /// session left in the store.
    pub fn new(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> SharedState {
        let engine = SessionEngine::new(
            store.clone(),
            Arc::new(config.challenges().clone()),
            config.tick_interval(),
        );
        Arc::new(Self { engine, store })
    }

    /// The session engine.
    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    /// Store backing the engine, exposed for health checks.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
