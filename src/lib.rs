//! `sogrim` degree-tracking library
//!
//! Validates and normalizes the course rows a student enters per semester,
//! keeps them in a course history, classifies degree warnings and renders
//! history reports. The `sogrim` binary in `src/cli` drives all of it.

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
