//! Degree-status warnings
//!
//! The degree-status computation returns a list of free-text messages. Those
//! starting with a disqualification or warning marker are shown to the
//! student; everything else is informational and dropped here.

use crate::core::locale::Locale;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Marker of a message that disqualifies the degree plan
pub const ERROR_MARKER: &str = "פסילה: ";

/// Marker of a warning message
pub const WARNING_MARKER: &str = "אזהרה: ";

static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{4}").expect("year range pattern is valid"));

/// How serious a degree message is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The plan does not satisfy the catalog
    Error,
    /// The plan may not satisfy the catalog
    Warning,
}

/// A message to display, with its marker removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeWarning {
    /// Severity taken from the marker
    pub severity: Severity,
    /// Message text without the marker
    pub text: String,
}

/// Keep the marked messages and strip their marker.
///
/// A message carrying both markers counts as an error.
#[must_use]
pub fn classify_messages<S: AsRef<str>>(messages: &[S]) -> Vec<DegreeWarning> {
    messages
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|msg| {
            if msg.contains(ERROR_MARKER) {
                Some(DegreeWarning {
                    severity: Severity::Error,
                    text: msg.replacen(ERROR_MARKER, "", 1),
                })
            } else if msg.contains(WARNING_MARKER) {
                Some(DegreeWarning {
                    severity: Severity::Warning,
                    text: msg.replacen(WARNING_MARKER, "", 1),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Catalog name without its academic-year range ("CS 2022-2023" -> "CS")
#[must_use]
pub fn display_catalog_name(name: &str) -> String {
    YEAR_RANGE_RE.replacen(name, 1, "").trim().to_string()
}

/// Title of the warnings section for a catalog
#[must_use]
pub fn warnings_heading(catalog_name: &str, locale: Locale) -> String {
    let name = display_catalog_name(catalog_name);
    match locale {
        Locale::He => format!("אזהרות - {name}"),
        Locale::En => format!("Warnings - {name}"),
    }
}

/// Read degree messages from a file, one per non-empty line
///
/// # Errors
/// Returns an error if the file cannot be read
pub fn read_messages<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
