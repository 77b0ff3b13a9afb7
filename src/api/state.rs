use tokio_rusqlite::Connection;

use crate::auth::AdminGate;
use crate::calendar::feed;
use crate::core::AppConfig;

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    pub gate: AdminGate,
    // Shared client so feed fetches reuse connections and carry the
    // fetch timeout
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        let gate = AdminGate::new(config.admin_pin.clone());
        Self {
            db,
            config,
            gate,
            http: feed::feed_client(),
        }
    }
}
