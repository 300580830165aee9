//! Core module: domain models, the row validator and everything built on it

pub mod config;
pub mod history;
pub mod locale;
pub mod models;
pub mod report;
pub mod validator;
pub mod warnings;

/// Returns the current version of the `sogrim` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
