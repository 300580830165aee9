//! CLI command handlers for `sogrim`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗`
//! lines for the user and log failures through the crate logger.

pub mod check;
pub mod config;
pub mod report;
pub mod validate;
pub mod warnings;
