//! Data models for `sogrim`

pub mod course_row;
pub mod course_status;
pub mod credit;
pub mod grade;

pub use course_row::{CourseRow, CourseState, RawCourseRow};
pub use course_status::{CatalogCourse, CourseStatus, StatusGrade, StatusState};
pub use credit::Credit;
pub use grade::{Grade, GradeToken, GradeVocabulary, TokenKind, PASSING_GRADE};
