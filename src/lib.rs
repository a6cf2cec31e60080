pub mod api;
pub mod config;
pub mod db;
pub mod session;

use config::Config;
use std::sync::Arc;

use crate::db::{MemStorage, Storage};
use crate::session::{MemorySessionStore, SessionStore};

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            storage,
            sessions,
        }
    }

    /// In-memory storage and sessions, seeded when the config asks for it
    pub fn in_memory(config: Config) -> Self {
        let storage = if config.storage.seed_sample_data {
            MemStorage::with_sample_data()
        } else {
            MemStorage::new()
        };
        Self::new(
            config,
            Arc::new(storage),
            Arc::new(MemorySessionStore::new()),
        )
    }
}
