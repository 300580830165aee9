//! Course history reports
//!
//! Renders a student's course history, semester by semester, together with
//! the degree warnings of their catalog, as Markdown or HTML.

pub mod formats;

use crate::core::history::CourseHistory;
use crate::core::locale::Locale;
use crate::core::models::Credit;
use crate::core::warnings::{self, DegreeWarning, Severity};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Rows to report on
    pub history: &'a CourseHistory,
    /// Classified degree warnings
    pub warnings: &'a [DegreeWarning],
    /// Catalog the student is registered to, if known
    pub catalog_name: Option<&'a str>,
    /// Language for labels
    pub locale: Locale,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        history: &'a CourseHistory,
        warnings: &'a [DegreeWarning],
        catalog_name: Option<&'a str>,
        locale: Locale,
    ) -> Self {
        Self {
            history,
            warnings,
            catalog_name,
            locale,
        }
    }

    /// Report title
    #[must_use]
    pub fn title(&self) -> String {
        let base = match self.locale {
            Locale::He => "היסטוריית קורסים",
            Locale::En => "Course history",
        };
        self.catalog_name.map_or_else(
            || base.to_string(),
            |name| format!("{base} - {}", warnings::display_catalog_name(name)),
        )
    }

    /// Heading of the warnings section
    #[must_use]
    pub fn warnings_heading(&self) -> String {
        match (self.catalog_name, self.locale) {
            (Some(name), locale) => warnings::warnings_heading(name, locale),
            (None, Locale::He) => "אזהרות".to_string(),
            (None, Locale::En) => "Warnings".to_string(),
        }
    }

    /// Number of completed courses
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.history
            .rows()
            .iter()
            .filter(|row| row.is_completed())
            .count()
    }

    /// Credit points of all completed courses
    #[must_use]
    pub fn total_completed_credit(&self) -> Credit {
        self.history.total_completed_credit()
    }

    /// Number of disqualifying messages
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.severity == Severity::Error)
            .count()
    }

    /// Column labels of the course table
    #[must_use]
    pub const fn column_labels(&self) -> [&'static str; 6] {
        match self.locale {
            Locale::He => ["מס׳ קורס", "שם", "נק״ז", "ציון", "קטגוריה", "סטטוס"],
            Locale::En => ["Number", "Name", "Credit", "Grade", "Type", "State"],
        }
    }

    /// Labels of the summary: course count, completed count, completed credit
    #[must_use]
    pub const fn summary_labels(&self) -> [&'static str; 3] {
        match self.locale {
            Locale::He => ["קורסים", "קורסים שהושלמו", "נק״ז שהושלמו"],
            Locale::En => ["Courses", "Completed courses", "Completed credit"],
        }
    }

    /// Label of a per-semester completed-credit line
    #[must_use]
    pub const fn completed_credit_label(&self) -> &'static str {
        match self.locale {
            Locale::He => "נק״ז שהושלמו",
            Locale::En => "Completed credit",
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Fill `{{key}}` placeholders in one pass over `template`.
///
/// Inserted values are never scanned again, so text that looks like a
/// placeholder inside a value is kept as is. Unknown placeholders are left
/// untouched.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after_open[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..start + end + 4]),
        }
        rest = &after_open[end + 2..];
    }
    output.push_str(rest);
    output
}
