//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use mamy_dashboard::api::AppState;
use mamy_dashboard::api::app;
use mamy_dashboard::core::AppConfig;
use mamy_dashboard::core::db::{async_db, initialize_db};

/// PIN configured for every test app.
pub const TEST_PIN: &str = "4321";

/// Config with no calendar feed configured. Tests that need a feed set
/// `ical_url` to a mockito server URL.
pub fn test_config() -> AppConfig {
    AppConfig {
        admin_pin: TEST_PIN.to_string(),
        ical_url: String::new(),
        db_path: String::new(),
        dev_mode: false,
        timezone: chrono_tz::Europe::Paris,
    }
}

/// Creates a test application router over a fresh temporary database.
pub async fn test_app() -> Router {
    test_app_with_config(test_config()).await
}

pub async fn test_app_with_config(mut config: AppConfig) -> Router {
    // Unique directory per test so runs never share a database
    let dir = tempfile::tempdir()
        .expect("Failed to create temp dir")
        .keep();
    config.db_path = dir.join("dashboard.db").display().to_string();

    let db = async_db(&config.db_path)
        .await
        .expect("Failed to connect to db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    let app_state = AppState::new(db, config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Collect a response body into a string.
#[allow(dead_code)]
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
