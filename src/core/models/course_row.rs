//! Course row models: the raw row as typed by the student and its normalized form

use super::{Credit, Grade, GradeVocabulary};
use crate::core::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion state of a course, always derived from its grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseState {
    /// The grade completes the course
    Completed,
    /// No grade, or a grade that does not complete the course
    #[default]
    NotCompleted,
}

impl CourseState {
    /// Derive the state from an optional grade
    #[must_use]
    pub fn from_grade(grade: Option<&Grade>, vocabulary: &GradeVocabulary) -> Self {
        if grade.is_some_and(|g| g.completes(vocabulary)) {
            Self::Completed
        } else {
            Self::NotCompleted
        }
    }

    /// Label shown to the student
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Completed, Locale::He) => "הושלם",
            (Self::NotCompleted, Locale::He) => "לא הושלם",
            (Self::Completed, Locale::En) => "completed",
            (Self::NotCompleted, Locale::En) => "not completed",
        }
    }
}

impl fmt::Display for CourseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::NotCompleted => f.write_str("not-completed"),
        }
    }
}

/// A course row exactly as entered: every field is the text of an input box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCourseRow {
    /// Course name (free text)
    #[serde(default)]
    pub name: String,
    /// Course number, expected to be 6 digits
    #[serde(default)]
    pub course_number: String,
    /// Semester the row belongs to
    #[serde(default)]
    pub period: String,
    /// Credit points
    #[serde(default)]
    pub credit: String,
    /// Grade: empty, `-`, a number or a grade token
    #[serde(default)]
    pub grade: String,
    /// Category (bank) name; empty or `-` when unset
    #[serde(default, rename = "type")]
    pub r#type: String,
}

impl RawCourseRow {
    /// Start a raw row for a course number in a period
    #[must_use]
    pub fn new(period: impl Into<String>, course_number: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            course_number: course_number.into(),
            ..Self::default()
        }
    }

    /// Set the course name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the credit text
    #[must_use]
    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.credit = credit.into();
        self
    }

    /// Set the grade text
    #[must_use]
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Set the category text
    #[must_use]
    pub fn with_type(mut self, r#type: impl Into<String>) -> Self {
        self.r#type = r#type.into();
        self
    }
}

impl From<&CourseRow> for RawCourseRow {
    fn from(row: &CourseRow) -> Self {
        Self {
            name: row.name.clone(),
            course_number: row.course_number.clone(),
            period: row.period.clone(),
            credit: row.credit.to_string(),
            grade: row.grade.as_ref().map(ToString::to_string).unwrap_or_default(),
            r#type: row.r#type.clone().unwrap_or_default(),
        }
    }
}

/// A validated, normalized course row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    /// Course name
    pub name: String,
    /// 6-digit course number
    pub course_number: String,
    /// Semester the row belongs to
    pub period: String,
    /// Credit points
    pub credit: Credit,
    /// Grade, absent when none was recorded
    pub grade: Option<Grade>,
    /// Completion state derived from the grade
    pub state: CourseState,
    /// Category (bank) name
    #[serde(rename = "type")]
    pub r#type: Option<String>,
}

impl CourseRow {
    /// Whether the course is completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == CourseState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_grade() {
        let vocab = GradeVocabulary::default();
        assert_eq!(
            CourseState::from_grade(None, &vocab),
            CourseState::NotCompleted
        );
        assert_eq!(
            CourseState::from_grade(Some(&Grade::Numeric(90)), &vocab),
            CourseState::Completed
        );
        assert_eq!(
            CourseState::from_grade(Some(&Grade::Token("נכשל".into())), &vocab),
            CourseState::NotCompleted
        );
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(CourseState::Completed.label(Locale::He), "הושלם");
        assert_eq!(CourseState::NotCompleted.label(Locale::En), "not completed");
        assert_eq!(CourseState::NotCompleted.to_string(), "not-completed");
    }

    #[test]
    fn test_raw_from_normalized() {
        let row = CourseRow {
            name: "Calculus 1M".to_string(),
            course_number: "104031".to_string(),
            period: "Winter 2022-2023".to_string(),
            credit: Credit::from_half_units(11),
            grade: None,
            state: CourseState::NotCompleted,
            r#type: Some("חובה".to_string()),
        };

        let raw = RawCourseRow::from(&row);
        assert_eq!(raw.credit, "5.5");
        assert_eq!(raw.grade, "");
        assert_eq!(raw.r#type, "חובה");
    }

    #[test]
    fn test_row_json_uses_type_key() {
        let raw = RawCourseRow::new("Spring", "234114").with_type("חובה");
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["type"], "חובה");
        assert_eq!(json["course_number"], "234114");
    }
}
