//! Course history export: CSV for people, JSON for the degree-status backend

use super::CourseHistory;
use crate::core::models::{CourseStatus, GradeVocabulary};
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// CSV header written by [`render_history_csv`]
pub const CSV_HEADER: &str = "Semester,Course Number,Name,Credit,Grade,Type,State";

/// Render a history as CSV, one row per course
#[must_use]
pub fn render_history_csv(history: &CourseHistory) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for row in history.rows() {
        let grade = row
            .grade
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{}",
            escape_field(&row.period),
            escape_field(&row.course_number),
            escape_field(&row.name),
            row.credit,
            escape_field(&grade),
            escape_field(row.r#type.as_deref().unwrap_or_default()),
            row.state
        );
    }

    csv
}

/// Write a history as CSV
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn export_history_csv(history: &CourseHistory, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, render_history_csv(history))?;
    Ok(())
}

/// Write a history as the JSON list of course statuses the backend stores
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn export_history_json(
    history: &CourseHistory,
    vocabulary: &GradeVocabulary,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let statuses: Vec<CourseStatus> = history
        .rows()
        .iter()
        .map(|row| CourseStatus::from_row(row, vocabulary))
        .collect();
    fs::write(path, serde_json::to_string_pretty(&statuses)?)?;
    Ok(())
}

/// Quote a field if it contains a comma, quote or line break, or has
/// surrounding whitespace that an unquoted field would lose
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) || value.trim() != value {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
