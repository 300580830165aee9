//! Warnings command handler

use sogrim::config::Config;
use sogrim::core::warnings::{classify_messages, read_messages, warnings_heading, Severity};
use sogrim::{error, info};
use std::path::Path;

/// Print the classified degree messages of a file.
///
/// Returns `false` if the file could not be read.
pub fn run(input_file: &Path, catalog: Option<&str>, config: &Config) -> bool {
    let messages = match read_messages(input_file) {
        Ok(messages) => messages,
        Err(err) => {
            error!("Failed to read messages {}: {err}", input_file.display());
            eprintln!("✗ Failed to read {}: {err}", input_file.display());
            return false;
        }
    };

    let warnings = classify_messages(&messages);
    info!(
        "Classified {} messages from {}",
        warnings.len(),
        input_file.display()
    );

    if let Some(name) = catalog {
        println!("\n=== {} ===\n", warnings_heading(name, config.locale()));
    }

    if warnings.is_empty() {
        println!("✓ No warnings");
        return true;
    }

    for warning in &warnings {
        let marker = match warning.severity {
            Severity::Error => "⛔",
            Severity::Warning => "⚠️ ",
        };
        println!("{marker} {}", warning.text);
    }
    true
}
