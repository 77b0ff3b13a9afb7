//! Public types for the time API
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    /// Long-form localized date, e.g. "vendredi 15 mars 2024"
    pub date: String,
    /// Clock display, e.g. "14h05"
    pub time: String,
    /// Coarse moment of day shown next to the clock
    pub moment: String,
    pub is_dark_mode: bool,
    pub dev_mode: bool,
}
