//! Application state shared across HTTP handlers

use crate::auth::{Enforcer, JwtHandler};
use crate::config::Config;
use crate::services::MenuService;
use crate::storage::Database;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is cheap to clone; actix hands one copy to each worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration (shared read-only)
    pub config: Arc<Config>,
    /// Database connection and entity operations
    pub db: Arc<Database>,
    /// Policy engine over the database store
    pub enforcer: Enforcer,
    /// Bearer token verification
    pub jwt: Arc<JwtHandler>,
    /// Menu tree operations
    pub menus: MenuService,
}

impl AppState {
    /// Assemble state from its parts. The enforcer must already be backed by `db`.
    pub fn new(config: Config, db: Arc<Database>, enforcer: Enforcer) -> Self {
        let jwt = JwtHandler::new(&config.auth);
        Self {
            config: Arc::new(config),
            menus: MenuService::new(Arc::clone(&db)),
            db,
            enforcer,
            jwt: Arc::new(jwt),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
