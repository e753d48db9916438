use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    // Arc-wrapped because the connection itself is only Clone when the
    // mock feature is disabled; call sites deref to &DatabaseConnection.
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}
