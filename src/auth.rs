//! Admin authorization gate.
//!
//! Validates the shared `X-Admin-Pin` secret and tracks failed attempts
//! per client IP. Five consecutive failures ban the IP for 24 hours.
//! State is in-memory only and resets on restart, which is fine for a
//! single low-value household secret.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

use axum::extract::{ConnectInfo, FromRequestParts};
use chrono::{Duration, NaiveDateTime};
use http::request::Parts;
use thiserror::Error;

/// Failures allowed before an IP is banned.
pub const MAX_ATTEMPTS: u32 = 5;

/// How long a ban lasts.
pub const BAN_HOURS: i64 = 24;

/// Used when neither a forwarded-for header nor a peer address is known.
pub const UNKNOWN_IP: &str = "unknown";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Code incorrect, tentative {attempt}/{max}")]
    WrongPin { attempt: u32, max: u32 },

    #[error("Trop de tentatives. Accès bloqué pendant {BAN_HOURS}h")]
    TooManyAttempts,

    #[error("Trop de tentatives. Réessayez dans {hours}h{minutes:02}")]
    Banned { hours: i64, minutes: i64 },
}

#[derive(Debug, Default, Clone)]
struct RateLimitEntry {
    failed_count: u32,
    banned_until: Option<NaiveDateTime>,
}

/// Per-IP brute-force protection around the admin PIN. Owned by the app
/// state so tests can build isolated instances and drive the clock.
#[derive(Debug)]
pub struct AdminGate {
    pin: String,
    attempts: Mutex<HashMap<String, RateLimitEntry>>,
}

impl AdminGate {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check the presented PIN for a client IP.
    ///
    /// A missing PIN counts as a failed attempt. A rejected request from
    /// a banned IP does not. A correct PIN clears the IP's entry
    /// entirely, whatever its prior state.
    pub fn authorize(
        &self,
        ip: &str,
        presented: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<(), AuthError> {
        let mut attempts = self.attempts.lock().unwrap();

        let banned_until = attempts.get(ip).and_then(|entry| entry.banned_until);
        if let Some(banned_until) = banned_until {
            if now < banned_until {
                let remaining = banned_until - now;
                return Err(AuthError::Banned {
                    hours: remaining.num_hours(),
                    minutes: remaining.num_minutes() % 60,
                });
            }
            // Ban lapsed: back to normal validation
            attempts.remove(ip);
        }

        if presented == Some(self.pin.as_str()) {
            attempts.remove(ip);
            return Ok(());
        }

        let entry = attempts.entry(ip.to_string()).or_default();
        entry.failed_count += 1;
        if entry.failed_count >= MAX_ATTEMPTS {
            entry.banned_until = Some(now + Duration::hours(BAN_HOURS));
            tracing::warn!(ip, "Too many failed admin attempts, banning");
            return Err(AuthError::TooManyAttempts);
        }

        Err(AuthError::WrongPin {
            attempt: entry.failed_count,
            max: MAX_ATTEMPTS,
        })
    }
}

/// Client IP as the gate keys it: first `X-Forwarded-For` entry, else
/// the transport peer address, else [`UNKNOWN_IP`].
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.0.ip().to_string())
            })
            .unwrap_or_else(|| UNKNOWN_IP.to_string());

        Ok(ClientIp(ip))
    }
}
