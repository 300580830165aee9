//! Course history: a student's normalized rows grouped by semester
//!
//! Saving a row runs the validator against the rows of the row's semester and,
//! only if it passes, appends the row (new) or replaces the edited one.

pub mod csv_parser;
pub mod export;

pub use csv_parser::{parse_history_csv, parse_history_str};
pub use export::{export_history_csv, export_history_json, render_history_csv};

use crate::core::models::{CourseRow, Credit, RawCourseRow};
use crate::core::validator::{self, CourseNumberProblem, ValidationError, ValidationRules};
use serde::Serialize;
use thiserror::Error;

/// Failure to save a row into a history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The row did not pass validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The edited row does not exist
    #[error("no course {course_number} in semester '{period}'")]
    UnknownRow {
        /// Semester searched
        period: String,
        /// Course number searched
        course_number: String,
    },
}

/// A row rejected while replaying raw input into a history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the row in the replayed input
    pub index: usize,
    /// The rejected row
    pub row: RawCourseRow,
    /// Why it was rejected
    pub error: ValidationError,
}

/// All course rows of one student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseHistory {
    rows: Vec<CourseRow>,
}

impl CourseHistory {
    /// Create an empty history
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Wrap rows that were already normalized
    #[must_use]
    pub const fn from_rows(rows: Vec<CourseRow>) -> Self {
        Self { rows }
    }

    /// Build a history by saving every raw row as a new row, in order.
    ///
    /// Rejected rows are skipped and reported.
    #[must_use]
    pub fn replay(raws: &[RawCourseRow], rules: &ValidationRules) -> (Self, Vec<Rejection>) {
        let mut history = Self::new();
        let mut rejections = Vec::new();

        for (index, raw) in raws.iter().enumerate() {
            let semester_rows = history.rows_for(&raw.period);
            match validator::validate(raw, &semester_rows, true, rules) {
                Ok(row) => history.rows.push(row),
                Err(error) => rejections.push(Rejection {
                    index,
                    row: raw.clone(),
                    error,
                }),
            }
        }

        (history, rejections)
    }

    /// All rows, in insertion order
    #[must_use]
    pub fn rows(&self) -> &[CourseRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the history has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Semesters in the order they first appear
    #[must_use]
    pub fn periods(&self) -> Vec<&str> {
        let mut periods: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !periods.contains(&row.period.as_str()) {
                periods.push(&row.period);
            }
        }
        periods
    }

    /// Rows of one semester
    #[must_use]
    pub fn rows_for(&self, period: &str) -> Vec<CourseRow> {
        self.rows
            .iter()
            .filter(|row| row.period == period)
            .cloned()
            .collect()
    }

    /// Validate a row and store it.
    ///
    /// With `edit_of = None` the row is new: it must not duplicate a course
    /// number of its semester and is appended. With `Some(number)` the row
    /// replaces the row with that number in the same semester. An edit may
    /// change the course number, but not to one another row of the semester
    /// already has, so course numbers stay unique within a semester.
    ///
    /// # Errors
    /// [`HistoryError::Invalid`] if validation fails or an edit renumbers the
    /// row onto a taken number, [`HistoryError::UnknownRow`] if the edited row
    /// does not exist. The history is unchanged on error.
    pub fn save_row(
        &mut self,
        raw: &RawCourseRow,
        edit_of: Option<&str>,
        rules: &ValidationRules,
    ) -> Result<&CourseRow, HistoryError> {
        let semester_rows = self.rows_for(&raw.period);

        let Some(original_number) = edit_of else {
            let row = validator::validate(raw, &semester_rows, true, rules)?;
            self.rows.push(row);
            return Ok(&self.rows[self.rows.len() - 1]);
        };

        let index = self
            .position(&raw.period, original_number)
            .ok_or_else(|| HistoryError::UnknownRow {
                period: raw.period.clone(),
                course_number: original_number.to_string(),
            })?;
        let row = validator::validate(raw, &semester_rows, false, rules)?;
        if row.course_number != original_number
            && semester_rows
                .iter()
                .any(|other| other.course_number == row.course_number)
        {
            return Err(ValidationError::InvalidCourseNumber {
                value: row.course_number,
                problem: CourseNumberProblem::Duplicate,
            }
            .into());
        }
        self.rows[index] = row;
        Ok(&self.rows[index])
    }

    /// Remove the row with this course number from a semester, returning it
    pub fn remove_row(&mut self, period: &str, course_number: &str) -> Option<CourseRow> {
        self.position(period, course_number)
            .map(|index| self.rows.remove(index))
    }

    /// Credit points of the completed courses of one semester
    #[must_use]
    pub fn completed_credit(&self, period: &str) -> Credit {
        self.rows
            .iter()
            .filter(|row| row.period == period && row.is_completed())
            .map(|row| row.credit)
            .sum()
    }

    /// Credit points of all completed courses
    #[must_use]
    pub fn total_completed_credit(&self) -> Credit {
        self.rows
            .iter()
            .filter(|row| row.is_completed())
            .map(|row| row.credit)
            .sum()
    }

    fn position(&self, period: &str, course_number: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.period == period && row.course_number == course_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseState;

    fn raw(period: &str, number: &str, credit: &str, grade: &str) -> RawCourseRow {
        RawCourseRow::new(period, number)
            .with_credit(credit)
            .with_grade(grade)
    }

    #[test]
    fn test_save_new_rows() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();

        history
            .save_row(&raw("Winter", "104031", "5.5", "90"), None, &rules)
            .unwrap();
        history
            .save_row(&raw("Winter", "234114", "4", ""), None, &rules)
            .unwrap();
        history
            .save_row(&raw("Spring", "104031", "5.5", "40"), None, &rules)
            .unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.periods(), vec!["Winter", "Spring"]);
        assert_eq!(history.rows_for("Winter").len(), 2);
    }

    #[test]
    fn test_duplicate_new_row_rejected() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();
        history
            .save_row(&raw("Winter", "104031", "5.5", "90"), None, &rules)
            .unwrap();

        let err = history
            .save_row(&raw("Winter", "104031", "5.5", "70"), None, &rules)
            .unwrap_err();
        assert!(matches!(err, HistoryError::Invalid(_)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_edit_replaces_row() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();
        history
            .save_row(&raw("Winter", "104031", "5.5", "40"), None, &rules)
            .unwrap();

        let saved = history
            .save_row(&raw("Winter", "104031", "5.5", "75"), Some("104031"), &rules)
            .unwrap();
        assert_eq!(saved.state, CourseState::Completed);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_edit_unknown_row() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();
        let err = history
            .save_row(&raw("Winter", "104031", "5.5", "75"), Some("104031"), &rules)
            .unwrap_err();
        assert_eq!(
            err,
            HistoryError::UnknownRow {
                period: "Winter".to_string(),
                course_number: "104031".to_string(),
            }
        );
    }

    #[test]
    fn test_edit_cannot_take_an_existing_number() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();
        for number in ["104031", "234114"] {
            history
                .save_row(&raw("Winter", number, "4", ""), None, &rules)
                .unwrap();
        }

        let err = history
            .save_row(&raw("Winter", "234114", "4", "90"), Some("104031"), &rules)
            .unwrap_err();
        assert_eq!(
            err,
            HistoryError::Invalid(ValidationError::InvalidCourseNumber {
                value: "234114".to_string(),
                problem: CourseNumberProblem::Duplicate,
            })
        );
        assert_eq!(history.rows()[0].course_number, "104031");

        let renumbered = history
            .save_row(&raw("Winter", "104166", "4", "90"), Some("104031"), &rules)
            .unwrap();
        assert_eq!(renumbered.course_number, "104166");
        assert!(history.remove_row("Winter", "104166").is_some());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_completed_credit() {
        let rules = ValidationRules::default();
        let raws = vec![
            raw("Winter", "104031", "5.5", "90"),
            raw("Winter", "234114", "4", "50"),
            raw("Spring", "234124", "4", "עבר"),
        ];
        let (history, rejections) = CourseHistory::replay(&raws, &rules);

        assert!(rejections.is_empty());
        assert_eq!(history.completed_credit("Winter"), Credit::from_half_units(11));
        assert_eq!(history.total_completed_credit(), Credit::from_half_units(19));
    }

    #[test]
    fn test_replay_reports_rejections() {
        let rules = ValidationRules::default();
        let raws = vec![
            raw("Winter", "104031", "5.5", "90"),
            raw("Winter", "10403", "5.5", "90"),
            raw("Winter", "104031", "5.5", "80"),
        ];
        let (history, rejections) = CourseHistory::replay(&raws, &rules);

        assert_eq!(history.len(), 1);
        assert_eq!(rejections.len(), 2);
        assert_eq!(rejections[0].index, 1);
        assert_eq!(rejections[1].index, 2);
    }

    #[test]
    fn test_remove_row() {
        let rules = ValidationRules::default();
        let mut history = CourseHistory::new();
        history
            .save_row(&raw("Winter", "104031", "5.5", "90"), None, &rules)
            .unwrap();

        assert!(history.remove_row("Spring", "104031").is_none());
        assert!(history.remove_row("Winter", "104031").is_some());
        assert!(history.is_empty());
    }
}
