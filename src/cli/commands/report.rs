//! Report command handler
//!
//! Renders a course history, with optional degree warnings, as a Markdown or
//! HTML report.

use sogrim::config::Config;
use sogrim::core::history::{parse_history_csv, CourseHistory};
use sogrim::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use sogrim::core::warnings::{classify_messages, read_messages, DegreeWarning};
use sogrim::{error, info, warn};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command. Returns `false` on failure.
pub fn run(
    input_file: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    warnings_file: Option<&Path>,
    catalog: Option<&str>,
    config: &Config,
) -> bool {
    match generate_report(input_file, output_file, format_str, warnings_file, catalog, config) {
        Ok(()) => true,
        Err(err) => {
            error!(
                "Report generation failed for {}: {err}",
                input_file.display()
            );
            eprintln!("{err}");
            false
        }
    }
}

fn load_history(input_file: &Path, config: &Config) -> Result<CourseHistory, String> {
    let raws = parse_history_csv(input_file).map_err(|e| {
        error!("Failed to load history {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;
    info!("History loaded: {}", input_file.display());

    let (history, rejections) = CourseHistory::replay(&raws, &config.validation_rules());
    if !rejections.is_empty() {
        warn!(
            "{} rows of {} were rejected and left out of the report",
            rejections.len(),
            input_file.display()
        );
    }
    Ok(history)
}

fn load_warnings(warnings_file: Option<&Path>) -> Result<Vec<DegreeWarning>, String> {
    let Some(path) = warnings_file else {
        return Ok(Vec::new());
    };
    let messages = read_messages(path)
        .map_err(|e| format!("✗ Failed to read warnings {}: {e}", path.display()))?;
    Ok(classify_messages(&messages))
}

fn generate_report(
    input_file: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    warnings_file: Option<&Path>,
    catalog: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown or html"))?;

    let history = load_history(input_file, config)?;
    let warnings = load_warnings(warnings_file)?;

    let final_output_path: PathBuf = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;

        let filename = input_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("history");
        reports_dir.join(format!("{filename}_report.{}", format.extension()))
    };

    let ctx = ReportContext::new(&history, &warnings, catalog, config.locale());
    let written = match format {
        ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &final_output_path),
        ReportFormat::Html => HtmlReporter::new().generate(&ctx, &final_output_path),
    };
    written.map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    println!("✓ Report generated: {}", final_output_path.display());
    info!("Report exported to: {}", final_output_path.display());

    println!("\n=== Summary ===");
    println!("{}", ctx.title());
    println!("Courses: {}", history.len());
    println!("Completed: {}", ctx.completed_count());
    println!("Completed credit: {}", ctx.total_completed_credit());
    if ctx.error_count() > 0 {
        println!("⛔ {} disqualifying messages", ctx.error_count());
    }

    Ok(())
}
