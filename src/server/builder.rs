//! Application assembly and `run_server`

use crate::auth::{Enforcer, PolicyStore};
use crate::config::{Config, warn_insecure_config};
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::{Database, seed};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Connect, migrate and seed according to `config`, then assemble [`AppState`]
pub async fn build_state(config: Config) -> Result<AppState> {
    let db = Arc::new(Database::new(&config.storage.database).await?);

    if config.storage.database.auto_migrate {
        db.migrate().await?;
    } else {
        info!("Automatic migrations disabled");
    }

    state_from_database(config, db).await
}

/// Assemble [`AppState`] over an already connected and migrated database
pub async fn state_from_database(config: Config, db: Arc<Database>) -> Result<AppState> {
    let store: Arc<dyn PolicyStore> = db.clone();
    let enforcer = Enforcer::load(store).await?;

    if config.auth.rbac.seed_defaults {
        seed::seed_defaults(&db, &enforcer).await?;
    }

    warn_insecure_config(&config.auth);

    Ok(AppState::new(config, db, enforcer))
}

/// Build state from `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting rbac-admin {}", env!("CARGO_PKG_VERSION"));

    let state = build_state(config).await?;
    let server = HttpServer::new(state);
    info!("API endpoints:");
    info!("   GET  /health");
    info!("   *    /casbin-rules");
    info!("   *    /menus");
    info!("   GET  /roles");

    server.start().await
}
