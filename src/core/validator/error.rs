//! Validation rejection reasons and their localized messages

use crate::core::locale::Locale;
use std::fmt;
use thiserror::Error;

/// Why a course number was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseNumberProblem {
    /// Not exactly 6 digits
    Format,
    /// Another row in the same semester already has this number
    Duplicate,
}

impl fmt::Display for CourseNumberProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => f.write_str("a course number must be exactly 6 digits"),
            Self::Duplicate => {
                f.write_str("the same course cannot be taken twice in one semester")
            }
        }
    }
}

/// A rejected course row. Each variant names the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Bad format, or a duplicate within the semester for a new row
    #[error("invalid course number '{value}': {problem}")]
    InvalidCourseNumber {
        /// Entered course number
        value: String,
        /// Violated constraint
        problem: CourseNumberProblem,
    },

    /// Not a number, negative, or not a multiple of 0.5
    #[error("invalid credit '{0}': credit must be a number greater than or equal to 0, in steps of 0.5")]
    InvalidCredit(String),

    /// Not a whole number in 0..=100 and not a grade token
    #[error("invalid grade '{value}': a grade must be a whole number between 0 and 100 or one of the non-numeric options ({})", .allowed.join(", "))]
    InvalidGrade {
        /// Entered grade
        value: String,
        /// Accepted non-numeric grade tokens
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// Message to show the student
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::He => self.hebrew_message(),
        }
    }

    fn hebrew_message(&self) -> String {
        match self {
            Self::InvalidCourseNumber {
                problem: CourseNumberProblem::Format,
                ..
            } => "מספר הקורס שהוזן אינו תקין. מס׳ קורס חייב להכיל 6 ספרות בלבד.".to_string(),
            Self::InvalidCourseNumber {
                problem: CourseNumberProblem::Duplicate,
                ..
            } => "מספר הקורס שהוזן אינו תקין. אי אפשר לקחת פעמיים קורס באותו הסמסטר.".to_string(),
            Self::InvalidCredit(_) => "נק״ז חייב להיות מספר גדול שווה מאפס, ובקפיצות של 0.5".to_string(),
            Self::InvalidGrade { allowed, .. } => format!(
                "ציון חייב להיות מספר בין 0 ל-100 או אחת מהאופציות הלא מספריות ({})",
                allowed.join(", ")
            ),
        }
    }

    /// Name of the rejected field
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidCourseNumber { .. } => "course_number",
            Self::InvalidCredit(_) => "credit",
            Self::InvalidGrade { .. } => "grade",
        }
    }
}
