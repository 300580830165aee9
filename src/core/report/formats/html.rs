//! HTML report generator
//!
//! Generates a self-contained page with embedded CSS. Hebrew reports are laid
//! out right-to-left.

use crate::core::locale::Locale;
use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use crate::core::warnings::Severity;
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let [courses_label, completed_label, credit_label] = ctx.summary_labels();
        let dir = match ctx.locale {
            Locale::He => "rtl",
            Locale::En => "ltr",
        };

        let title = escape_html(&ctx.title());
        let course_count = ctx.history.len().to_string();
        let completed_count = ctx.completed_count().to_string();
        let total_credit = ctx.total_completed_credit().to_string();
        let semesters = Self::generate_semester_tables(ctx);
        let warnings = Self::generate_warnings(ctx);

        fill_template(
            HTML_TEMPLATE,
            &[
                ("lang", ctx.locale.code()),
                ("dir", dir),
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

    fn generate_semester_tables(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for period in ctx.history.periods() {
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(period));
            let _ = writeln!(html, "<table>");
            html.push_str("  <tr>");
            for label in ctx.column_labels() {
                let _ = write!(html, "<th>{label}</th>");
            }
            html.push_str("</tr>\n");

            for row in ctx.history.rows_for(period) {
                let class = if row.is_completed() { " class=\"completed\"" } else { "" };
                let grade = row
                    .grade
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                let _ = writeln!(
                    html,
                    "  <tr{class}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    row.course_number,
                    escape_html(&row.name),
                    row.credit,
                    escape_html(&grade),
                    escape_html(row.r#type.as_deref().unwrap_or("-")),
                    row.state.label(ctx.locale)
                );
            }

            let _ = writeln!(html, "</table>");
            let _ = writeln!(
                html,
                "<div class=\"credit\">{}: {}</div>",
                ctx.completed_credit_label(),
                ctx.history.completed_credit(period)
            );
        }

        html
    }

    fn generate_warnings(ctx: &ReportContext) -> String {
        if ctx.warnings.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(&ctx.warnings_heading()));
        let _ = writeln!(html, "<ul>");
        for warning in ctx.warnings {
            let class = match warning.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let _ = writeln!(
                html,
                "  <li class=\"{class}\">{}</li>",
                escape_html(&warning.text)
            );
        }
        let _ = writeln!(html, "</ul>");
        html
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::CourseHistory;
    use crate::core::models::RawCourseRow;
    use crate::core::validator::ValidationRules;
    use crate::core::warnings::classify_messages;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_render_hebrew_rtl() {
        let rules = ValidationRules::default();
        let raws = vec![RawCourseRow::new("חורף תשפ\"ג", "234114")
            .with_name("מבוא למדעי המחשב <מ>")
            .with_credit("4")
            .with_grade("עבר")];
        let (history, _) = CourseHistory::replay(&raws, &rules);
        let warnings = classify_messages(&["פסילה: לא הושלם קורס חובה"]);
        let ctx = ReportContext::new(&history, &warnings, None, Locale::He);

        let html = HtmlReporter::new().render(&ctx).unwrap();
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("<tr class=\"completed\">"));
        assert!(html.contains("מבוא למדעי המחשב &lt;מ&gt;"));
        assert!(html.contains("<li class=\"error\">לא הושלם קורס חובה</li>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_placeholder_text_in_course_name() {
        let rules = ValidationRules::default();
        let raws = vec![RawCourseRow::new("Winter", "104031")
            .with_name("{{warnings}} {{title}}")
            .with_credit("5.5")];
        let (history, _) = CourseHistory::replay(&raws, &rules);
        let warnings = classify_messages(&["פסילה: לא הושלם קורס חובה"]);
        let ctx = ReportContext::new(&history, &warnings, None, Locale::En);

        let html = HtmlReporter::new().render(&ctx).unwrap();
        assert!(html.contains("<td>{{warnings}} {{title}}</td>"));
        assert_eq!(html.matches("<li class=\"error\">").count(), 1);
    }
}
