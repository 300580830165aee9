//! Validate command handler
//!
//! Checks a single row the way the course form does on save, optionally
//! against the rows of an existing history file.

use crate::args::RowArgs;
use sogrim::config::Config;
use sogrim::core::history::{parse_history_csv, CourseHistory};
use sogrim::core::models::{CourseRow, RawCourseRow};
use sogrim::core::validator::{self, ValidationOutcome};
use sogrim::{debug, error, info, warn};
use std::path::Path;

/// Run the validate command. Returns `false` when the row was rejected or
/// the history could not be loaded.
pub fn run(row: &RowArgs, history_file: Option<&Path>, edit: bool, json: bool, config: &Config) -> bool {
    let rules = config.validation_rules();
    let locale = config.locale();
    let raw = to_raw(row);

    let existing = match history_file {
        Some(path) => match load_semester(path, &raw.period, config) {
            Ok(rows) => rows,
            Err(err) => {
                error!("Failed to load history {}: {err}", path.display());
                eprintln!("✗ Failed to load {}: {err}", path.display());
                return false;
            }
        },
        None => Vec::new(),
    };
    debug!(
        "Validating {} against {} rows of '{}' (new: {})",
        raw.course_number,
        existing.len(),
        raw.period,
        !edit
    );

    if !raw.r#type.is_empty() && !rules.is_known_bank(&raw.r#type) {
        warn!("Unknown category '{}' for course {}", raw.r#type, raw.course_number);
    }

    let result = validator::validate(&raw, &existing, !edit, &rules);
    let accepted = result.is_ok();
    if let Err(err) = &result {
        info!("Rejected {} ({}): {err}", raw.course_number, err.field());
    }

    if json {
        let outcome = ValidationOutcome::from_result(result, locale);
        match serde_json::to_string_pretty(&outcome) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("✗ Failed to serialize result: {err}");
                return false;
            }
        }
    } else {
        match result {
            Ok(row) => print_row(&row, config),
            Err(err) => eprintln!("✗ {}", err.message(locale)),
        }
    }

    accepted
}

fn to_raw(row: &RowArgs) -> RawCourseRow {
    RawCourseRow::new(row.period.as_str(), row.number.as_str())
        .with_name(row.name.as_str())
        .with_credit(row.credit.as_str())
        .with_grade(row.grade.as_str())
        .with_type(row.bank.as_str())
}

/// Rows of `period` from a history file, rejected rows left out
fn load_semester(path: &Path, period: &str, config: &Config) -> Result<Vec<CourseRow>, String> {
    let raws = parse_history_csv(path).map_err(|e| e.to_string())?;
    let (history, rejections) = CourseHistory::replay(&raws, &config.validation_rules());
    if !rejections.is_empty() {
        warn!(
            "{} rows of {} were rejected and ignored",
            rejections.len(),
            path.display()
        );
    }
    Ok(history.rows_for(period))
}

fn print_row(row: &CourseRow, config: &Config) {
    let locale = config.locale();
    println!("✓ {} {}", row.course_number, row.name);
    println!("  period: {}", row.period);
    println!("  credit: {}", row.credit);
    println!(
        "  grade:  {}",
        row.grade
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string)
    );
    println!("  type:   {}", row.r#type.as_deref().unwrap_or("-"));
    println!("  state:  {}", row.state.label(locale));
}
