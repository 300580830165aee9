//! Course row validator
//!
//! Decides whether a row a student entered is acceptable and, if so, turns it
//! into a normalized [`CourseRow`]. The checks run in a fixed order and the
//! first failure wins:
//!
//! 1. course number: exactly 6 ASCII digits, unique in the semester for new rows
//! 2. credit: a number >= 0 in steps of 0.5
//! 3. grade: empty, `0` or `-` (absent), a vocabulary token, or a whole number in 0..=100
//!
//! Validation is pure: nothing is logged and the caller's rows are never touched.

pub mod error;

pub use error::{CourseNumberProblem, ValidationError};

use crate::core::locale::Locale;
use crate::core::models::{
    CourseRow, CourseState, Credit, Grade, GradeVocabulary, RawCourseRow,
};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Placeholder the UI shows for an unset select box
pub const PLACEHOLDER: &str = "-";

/// Required length of a course number
pub const COURSE_NUMBER_LEN: usize = 6;

static COURSE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("course number pattern is valid"));

/// Externally supplied vocabularies the validator checks against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Accepted non-numeric grade tokens
    pub grades: GradeVocabulary,
    /// Known category (bank) names
    pub banks: Vec<String>,
}

impl ValidationRules {
    /// Create rules from a grade vocabulary and a list of bank names
    #[must_use]
    pub const fn new(grades: GradeVocabulary, banks: Vec<String>) -> Self {
        Self { grades, banks }
    }

    /// Whether `name` is one of the configured banks.
    ///
    /// An empty bank list knows every name.
    #[must_use]
    pub fn is_known_bank(&self, name: &str) -> bool {
        self.banks.is_empty() || self.banks.iter().any(|bank| bank == name)
    }
}

/// Validate and normalize a course row.
///
/// `existing_rows` are the other rows of the same semester; they are only
/// consulted for the duplicate check, which runs when `is_new_row` is set.
///
/// # Errors
/// Returns the first failed check as a [`ValidationError`].
pub fn validate(
    row: &RawCourseRow,
    existing_rows: &[CourseRow],
    is_new_row: bool,
    rules: &ValidationRules,
) -> Result<CourseRow, ValidationError> {
    let course_number = check_course_number(&row.course_number, existing_rows, is_new_row)?;
    let credit = check_credit(&row.credit)?;
    let grade = check_grade(&row.grade, &rules.grades)?;
    let state = CourseState::from_grade(grade.as_ref(), &rules.grades);

    Ok(CourseRow {
        name: row.name.clone(),
        course_number,
        period: row.period.clone(),
        credit,
        grade,
        state,
        r#type: normalize_type(&row.r#type),
    })
}

/// Check a course number's format and, for new rows, its uniqueness.
///
/// # Errors
/// [`ValidationError::InvalidCourseNumber`] on a bad format or a duplicate.
pub fn check_course_number(
    value: &str,
    existing_rows: &[CourseRow],
    is_new_row: bool,
) -> Result<String, ValidationError> {
    let reject = |problem| ValidationError::InvalidCourseNumber {
        value: value.to_string(),
        problem,
    };

    if value.len() != COURSE_NUMBER_LEN || !COURSE_NUMBER_RE.is_match(value) {
        return Err(reject(CourseNumberProblem::Format));
    }
    if is_new_row && existing_rows.iter().any(|r| r.course_number == value) {
        return Err(reject(CourseNumberProblem::Duplicate));
    }
    Ok(value.to_string())
}

/// Parse credit points.
///
/// # Errors
/// [`ValidationError::InvalidCredit`] unless the value is a number >= 0 in steps of 0.5.
pub fn check_credit(value: &str) -> Result<Credit, ValidationError> {
    Credit::parse(value).ok_or_else(|| ValidationError::InvalidCredit(value.to_string()))
}

/// Parse a grade. `Ok(None)` means no grade is recorded.
///
/// Every numeric zero counts as absent, the same as an empty entry.
///
/// # Errors
/// [`ValidationError::InvalidGrade`] for unknown tokens and numbers that are
/// fractional or outside 0..=100.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn check_grade(
    value: &str,
    vocabulary: &GradeVocabulary,
) -> Result<Option<Grade>, ValidationError> {
    if value.is_empty() || value == "0" || value == PLACEHOLDER {
        return Ok(None);
    }

    let reject = || ValidationError::InvalidGrade {
        value: value.to_string(),
        allowed: vocabulary.labels().into_iter().map(str::to_string).collect(),
    };

    match parse_number(value) {
        None => vocabulary
            .find(value)
            .map(|token| Some(Grade::Token(token.label.clone())))
            .ok_or_else(reject),
        Some(number) if number.fract() == 0.0 && (0.0..=100.0).contains(&number) => {
            if number == 0.0 {
                Ok(None)
            } else {
                Ok(Some(Grade::Numeric(number as u8)))
            }
        }
        Some(_) => Err(reject()),
    }
}

/// Numeric reading of a grade entry; `None` when it is not a number
fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| !number.is_nan())
}

fn normalize_type(value: &str) -> Option<String> {
    if value.is_empty() || value == PLACEHOLDER {
        None
    } else {
        Some(value.to_string())
    }
}

/// Serializable validation result handed back to a UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Whether the row was rejected
    pub error: bool,
    /// The normalized row when accepted
    pub row: Option<CourseRow>,
    /// Localized rejection message; empty when accepted
    pub msg: String,
}

impl ValidationOutcome {
    /// Wrap a validation result, localizing the rejection message
    #[must_use]
    pub fn from_result(result: Result<CourseRow, ValidationError>, locale: Locale) -> Self {
        match result {
            Ok(row) => Self {
                error: false,
                row: Some(row),
                msg: String::new(),
            },
            Err(err) => Self {
                error: true,
                row: None,
                msg: err.message(locale),
            },
        }
    }
}
