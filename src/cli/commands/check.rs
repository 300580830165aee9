//! Check command handler
//!
//! Replays course history CSV files through the validator, reports every
//! rejected row and exports the rows that were kept.

use crate::args::ExportFormat;
use sogrim::config::Config;
use sogrim::core::history::{
    export_history_csv, export_history_json, parse_history_csv, CourseHistory, Rejection,
};
use sogrim::core::locale::Locale;
use sogrim::{error, info, verbose, warn};
use std::path::{Path, PathBuf};

/// Run the check command for one or more input files.
///
/// Returns `false` if any file failed to load or had rejected rows.
pub fn run(
    input_files: &[PathBuf],
    output_files: &[PathBuf],
    format: ExportFormat,
    no_export: bool,
    config: &Config,
    verbose: bool,
) -> bool {
    if input_files.is_empty() {
        eprintln!("✗ No input files provided.");
        return false;
    }

    if !output_files.is_empty() && output_files.len() != input_files.len() {
        eprintln!(
            "✗ When using -o/--output, provide one output path per input file ({} inputs, {} outputs).",
            input_files.len(),
            output_files.len()
        );
        return false;
    }

    let mut all_clean = true;
    for (idx, input_file) in input_files.iter().enumerate() {
        let output_file = output_files.get(idx).map(PathBuf::as_path);
        match check_single(input_file, output_file, format, no_export, config, verbose) {
            Ok(clean) => all_clean &= clean,
            Err(err) => {
                error!("Check failed for {}: {err}", input_file.display());
                eprintln!("{err}");
                all_clean = false;
            }
        }
    }
    all_clean
}

/// Check one file. `Ok(false)` means some rows were rejected.
fn check_single(
    input_file: &Path,
    output_file: Option<&Path>,
    format: ExportFormat,
    no_export: bool,
    config: &Config,
    verbose: bool,
) -> Result<bool, String> {
    let raws = parse_history_csv(input_file).map_err(|e| {
        error!("Failed to load history {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;

    if verbose {
        println!(
            "✓ History loaded from: {} ({} rows)",
            input_file.display(),
            raws.len()
        );
    } else {
        info!("History loaded: {} ({} rows)", input_file.display(), raws.len());
    }

    let rules = config.validation_rules();
    let (history, rejections) = CourseHistory::replay(&raws, &rules);

    for raw in &raws {
        if !raw.r#type.is_empty() && !rules.is_known_bank(&raw.r#type) {
            warn!(
                "{}: unknown category '{}' for course {}",
                input_file.display(),
                raw.r#type,
                raw.course_number
            );
        }
    }

    print_rejections(input_file, &rejections, config.locale());
    println!(
        "{} {}: {} rows kept, {} rejected",
        if rejections.is_empty() { "✓" } else { "✗" },
        input_file.display(),
        history.len(),
        rejections.len()
    );

    if verbose {
        for period in history.periods() {
            verbose!(
                "  {period}: {} rows, {} credit completed",
                history.rows_for(period).len(),
                history.completed_credit(period)
            );
        }
        verbose!("  total completed credit: {}", history.total_completed_credit());
    }

    if !no_export {
        let output_path = resolve_output_path(input_file, output_file, format, config)?;
        let result = match format {
            ExportFormat::Csv => export_history_csv(&history, &output_path),
            ExportFormat::Json => export_history_json(&history, &rules.grades, &output_path),
        };
        result.map_err(|e| {
            format!(
                "✗ Failed to export history to {}: {e}",
                output_path.display()
            )
        })?;
        println!("✓ Normalized history exported to: {}", output_path.display());
        info!("Exported normalized history to: {}", output_path.display());
    }

    Ok(rejections.is_empty())
}

fn print_rejections(input_file: &Path, rejections: &[Rejection], locale: Locale) {
    for rejection in rejections {
        let position = rejection.index + 1;
        info!(
            "{} row {position}: rejected {} ({})",
            input_file.display(),
            rejection.row.course_number,
            rejection.error
        );
        eprintln!(
            "  row {position} [{}] {}: {}",
            rejection.row.period,
            rejection.row.course_number,
            rejection.error.message(locale)
        );
    }
}

fn resolve_output_path(
    input_file: &Path,
    output_file: Option<&Path>,
    format: ExportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let out_dir = PathBuf::from(&config.paths.out_dir);
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let filename = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("history");
    Ok(out_dir.join(format!("{filename}_normalized.{}", format.extension())))
}
