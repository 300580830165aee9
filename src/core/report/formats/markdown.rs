//! Markdown report generator
//!
//! One table per semester followed by the degree warnings. Renders well in
//! GitHub, GitLab and VS Code.

use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use crate::core::warnings::Severity;
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let [courses_label, completed_label, credit_label] = ctx.summary_labels();

        let title = ctx.title();
        let course_count = ctx.history.len().to_string();
        let completed_count = ctx.completed_count().to_string();
        let total_credit = ctx.total_completed_credit().to_string();
        let semesters = Self::generate_semester_tables(ctx);
        let warnings = Self::generate_warnings(ctx);

        fill_template(
            MARKDOWN_TEMPLATE,
            &[
                ("title", title.as_str()),
                ("courses_label", courses_label),
                ("completed_label", completed_label),
                ("credit_label", credit_label),
                ("course_count", course_count.as_str()),
                ("completed_count", completed_count.as_str()),
                ("total_credit", total_credit.as_str()),
                ("semesters", semesters.as_str()),
                ("warnings", warnings.as_str()),
            ],
        )
    }

    /// Generate one course table per semester
    fn generate_semester_tables(ctx: &ReportContext) -> String {
        let mut tables = String::new();
        let [number, name, credit, grade, kind, state] = ctx.column_labels();

        for period in ctx.history.periods() {
            let _ = writeln!(tables, "## {period}\n");
            let _ = writeln!(
                tables,
                "| {number} | {name} | {credit} | {grade} | {kind} | {state} |"
            );
            tables.push_str("|---|---|---|---|---|---|\n");

            for row in ctx.history.rows_for(period) {
                let grade = row
                    .grade
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                let _ = writeln!(
                    tables,
                    "| {} | {} | {} | {grade} | {} | {} |",
                    row.course_number,
                    escape_cell(&row.name),
                    row.credit,
                    escape_cell(row.r#type.as_deref().unwrap_or("-")),
                    row.state.label(ctx.locale)
                );
            }

            let _ = writeln!(
                tables,
                "\n{}: {}\n",
                ctx.completed_credit_label(),
                ctx.history.completed_credit(period)
            );
        }

        tables
    }

    /// Generate the warnings section; empty when there are none
    fn generate_warnings(ctx: &ReportContext) -> String {
        if ctx.warnings.is_empty() {
            return String::new();
        }

        let mut section = String::new();
        let _ = writeln!(section, "## {}\n", ctx.warnings_heading());
        for warning in ctx.warnings {
            let marker = match warning.severity {
                Severity::Error => "⛔",
                Severity::Warning => "⚠️",
            };
            let _ = writeln!(section, "- {marker} {}", warning.text);
        }
        section
    }
}

/// Pipes would split a table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
