use std::env;

use chrono_tz::Tz;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Shared secret checked against the `X-Admin-Pin` header.
    pub admin_pin: String,
    /// iCal feed URL. Empty means the calendar is not configured.
    pub ical_url: String,
    pub db_path: String,
    pub dev_mode: bool,
    /// Timezone used for the clock and for converting UTC feed timestamps.
    pub timezone: Tz,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("DASHBOARD_STORAGE_PATH").unwrap_or("./".to_string());
        let admin_pin = env::var("DASHBOARD_ADMIN_PIN").unwrap_or_else(|_| "1234".to_string());
        let ical_url = env::var("DASHBOARD_ICAL_URL").unwrap_or_default();
        let db_path = env::var("DASHBOARD_DB_PATH")
            .unwrap_or_else(|_| format!("{}/dashboard.db", storage_path));
        let dev_mode = env::var("DASHBOARD_DEV_MODE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let timezone = env::var("DASHBOARD_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Paris".to_string())
            .parse()
            .expect("Invalid DASHBOARD_TIMEZONE");

        Self {
            admin_pin,
            ical_url,
            db_path,
            dev_mode,
            timezone,
        }
    }
}
