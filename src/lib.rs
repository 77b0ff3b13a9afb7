pub mod api;
pub mod auth;
pub mod calendar;
pub mod cli;
pub mod core;
