#![allow(non_snake_case)]

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod runtime;
pub mod service;

/// The assistant operates in one fixed timezone; "now" lookups, day bounds,
/// parsed times, and event bodies all use it.
pub const LOCAL_TZ: chrono_tz::Tz = chrono_tz::Asia::Kolkata;
