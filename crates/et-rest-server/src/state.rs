//! Server state management

use crate::auth::AuthConfig;
use crate::config::ServerConfig;
use et_local_db::Database;
use std::sync::Arc;
use std::time::Instant;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: Arc<Database>,

    /// Server configuration
    pub config: ServerConfig,

    /// JWT configuration
    pub auth: AuthConfig,

    /// Process start, for the health endpoint's uptime
    pub started_at: Instant,
}

impl AppState {
    /// Create new app state
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let db = if config.database_path == ":memory:" {
            Arc::new(Database::open_in_memory()?)
        } else {
            Arc::new(Database::open(&config.database_path)?)
        };

        let auth = AuthConfig::new(config.jwt_secret.clone());

        Ok(Self {
            db,
            config,
            auth,
            started_at: Instant::now(),
        })
    }

    /// Get database reference
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
