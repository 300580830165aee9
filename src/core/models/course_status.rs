//! Course status as stored by the degree-status backend
//!
//! This is the payload shape the remote update call expects for each course
//! a student took. It is produced from normalized rows on export.

use super::{CourseRow, Grade, GradeVocabulary, TokenKind};
use serde::{Deserialize, Serialize};

/// Catalog entry of a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    /// Course number
    #[serde(rename = "_id")]
    pub id: String,
    /// Credit points
    pub credit: f64,
    /// Course name
    pub name: String,
}

/// Backend completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusState {
    /// Course completed
    Complete,
    /// Course not completed
    NotComplete,
}

/// Backend grade representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusGrade {
    /// Numeric grade
    Grade(u8),
    /// Pass/fail grade
    Binary(bool),
    /// Exempt without credit points
    ExemptionWithoutCredit,
    /// Exempt with credit points
    ExemptionWithCredit,
}

impl StatusGrade {
    /// Map a validated grade to the backend form.
    ///
    /// Tokens missing from the vocabulary have no backend form.
    #[must_use]
    pub fn from_grade(grade: &Grade, vocabulary: &GradeVocabulary) -> Option<Self> {
        match grade {
            Grade::Numeric(value) => Some(Self::Grade(*value)),
            Grade::Token(label) => vocabulary.find(label).map(|token| match token.kind {
                TokenKind::Pass => Self::Binary(true),
                TokenKind::Fail | TokenKind::NotCompleted => Self::Binary(false),
                TokenKind::ExemptWithoutCredit => Self::ExemptionWithoutCredit,
                TokenKind::ExemptWithCredit => Self::ExemptionWithCredit,
            }),
        }
    }
}

/// A course a student took, in backend form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStatus {
    /// The course itself
    pub course: CatalogCourse,
    /// Completion state
    pub state: Option<StatusState>,
    /// Semester the course was taken in
    pub semester: Option<String>,
    /// Grade received
    pub grade: Option<StatusGrade>,
    /// Bank the course is counted toward
    pub r#type: Option<String>,
}

impl CourseStatus {
    /// Build the backend form of a normalized row
    #[must_use]
    pub fn from_row(row: &CourseRow, vocabulary: &GradeVocabulary) -> Self {
        Self {
            course: CatalogCourse {
                id: row.course_number.clone(),
                credit: row.credit.points(),
                name: row.name.clone(),
            },
            state: Some(if row.is_completed() {
                StatusState::Complete
            } else {
                StatusState::NotComplete
            }),
            semester: Some(row.period.clone()).filter(|p| !p.is_empty()),
            grade: row
                .grade
                .as_ref()
                .and_then(|g| StatusGrade::from_grade(g, vocabulary)),
            r#type: row.r#type.clone(),
        }
    }

    /// Whether the grade completes the course
    #[must_use]
    pub fn passed(&self) -> bool {
        match &self.grade {
            Some(StatusGrade::Grade(value)) => *value >= super::PASSING_GRADE,
            Some(StatusGrade::Binary(value)) => *value,
            Some(StatusGrade::ExemptionWithoutCredit | StatusGrade::ExemptionWithCredit) => true,
            None => false,
        }
    }
}
