//! Integration tests for course histories: loading, saving, exporting

use sogrim::core::history::{
    export_history_csv, export_history_json, parse_history_csv, CourseHistory, HistoryError,
    Rejection,
};
use sogrim::core::locale::Locale;
use sogrim::core::models::{CourseState, Credit, RawCourseRow};
use sogrim::core::report::{HtmlReporter, MarkdownReporter, ReportContext, ReportGenerator};
use sogrim::core::validator::{CourseNumberProblem, ValidationError, ValidationRules};
use sogrim::core::warnings::{classify_messages, read_messages, Severity};
use std::path::PathBuf;
use tempfile::TempDir;

const WINTER: &str = "חורף 2022-2023";
const SPRING: &str = "אביב 2023";

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

fn load_sample() -> (CourseHistory, Vec<Rejection>) {
    let raws = parse_history_csv(sample("history.csv")).expect("sample should parse");
    CourseHistory::replay(&raws, &ValidationRules::default())
}

#[test]
fn sample_history_replays_with_expected_rejections() {
    let (history, rejections) = load_sample();

    assert_eq!(history.len(), 7);
    assert_eq!(history.periods(), vec![WINTER, SPRING]);

    let rejected: Vec<(usize, &str)> = rejections
        .iter()
        .map(|r| (r.index, r.error.field()))
        .collect();
    assert_eq!(
        rejected,
        vec![(3, "course_number"), (7, "course_number"), (9, "grade")]
    );
    assert!(matches!(
        rejections[0].error,
        ValidationError::InvalidCourseNumber {
            problem: CourseNumberProblem::Duplicate,
            ..
        }
    ));
}

#[test]
fn completed_credit_per_semester() {
    let (history, _) = load_sample();

    assert_eq!(history.completed_credit(WINTER), Credit::from_half_units(19));
    assert_eq!(history.completed_credit(SPRING), Credit::from_half_units(16));
    assert_eq!(history.total_completed_credit().to_string(), "17.5");
    assert_eq!(history.completed_credit("קיץ 2023"), Credit::ZERO);
}

#[test]
fn save_edit_and_remove() {
    let rules = ValidationRules::default();
    let (mut history, _) = load_sample();

    let edit = RawCourseRow::new(WINTER, "104166")
        .with_name("אלגברה אמ'")
        .with_credit("5")
        .with_grade("70")
        .with_type("חובה");
    let saved = history
        .save_row(&edit, Some("104166"), &rules)
        .expect("edit should be accepted");
    assert_eq!(saved.state, CourseState::Completed);
    assert_eq!(history.len(), 7);

    let duplicate = RawCourseRow::new(WINTER, "104166").with_credit("5");
    assert!(matches!(
        history.save_row(&duplicate, None, &rules),
        Err(HistoryError::Invalid(ValidationError::InvalidCourseNumber { .. }))
    ));

    let bad_edit = edit.clone().with_credit("0.25");
    assert!(history.save_row(&bad_edit, Some("104166"), &rules).is_err());
    assert_eq!(
        history.rows_for(WINTER)[2].grade.as_ref().map(ToString::to_string),
        Some("70".to_string())
    );

    let removed = history.remove_row(WINTER, "394800").expect("row exists");
    assert_eq!(removed.course_number, "394800");
    assert_eq!(history.len(), 6);
    assert!(history.remove_row(WINTER, "394800").is_none());
}

#[test]
fn exported_csv_replays_to_the_same_history() {
    let (history, _) = load_sample();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("normalized.csv");

    export_history_csv(&history, &path).expect("export should succeed");
    let raws = parse_history_csv(&path).expect("exported CSV should parse");
    let (replayed, rejections) = CourseHistory::replay(&raws, &ValidationRules::default());

    assert!(rejections.is_empty());
    assert_eq!(replayed, history);
}

#[test]
fn exported_csv_keeps_names_verbatim() {
    let rules = ValidationRules::default();
    let raws = vec![
        RawCourseRow::new(WINTER, "104031")
            .with_name("Calc\nM")
            .with_credit("5.5")
            .with_grade("90"),
        RawCourseRow::new(WINTER, "104166")
            .with_name(" Calculus ")
            .with_credit("5")
            .with_grade("עבר"),
        RawCourseRow::new(SPRING, "234114")
            .with_name("Line\r\nbreak, \"quoted\"")
            .with_credit("4"),
    ];
    let (history, rejections) = CourseHistory::replay(&raws, &rules);
    assert!(rejections.is_empty());

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("names.csv");
    export_history_csv(&history, &path).expect("export should succeed");

    let reparsed = parse_history_csv(&path).expect("exported CSV should parse");
    assert_eq!(reparsed.len(), 3);
    let (replayed, rejections) = CourseHistory::replay(&reparsed, &rules);
    assert!(rejections.is_empty());
    assert_eq!(replayed, history);
    assert_eq!(replayed.rows_for(WINTER)[0].name, "Calc\nM");
    assert_eq!(replayed.rows_for(WINTER)[1].name, " Calculus ");
}

#[test]
fn exported_json_uses_status_wire_form() {
    let (history, _) = load_sample();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("statuses.json");

    export_history_json(&history, &ValidationRules::default().grades, &path)
        .expect("export should succeed");
    let content = std::fs::read_to_string(&path).expect("Failed to read export");
    let statuses: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");

    let statuses = statuses.as_array().expect("a list of statuses");
    assert_eq!(statuses.len(), history.len());
    assert!(content.contains("\"_id\": \"104031\""));
}

#[test]
fn sample_messages_classify() {
    let messages = read_messages(sample("messages.txt")).expect("sample should read");
    let warnings = classify_messages(&messages);

    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].severity, Severity::Error);
    assert_eq!(warnings[0].text, "לא הושלמו כל קורסי החובה");
    assert_eq!(warnings[1].severity, Severity::Warning);
}

#[test]
fn reports_written_to_disk() {
    let (history, _) = load_sample();
    let warnings = classify_messages(&read_messages(sample("messages.txt")).unwrap());
    let ctx = ReportContext::new(
        &history,
        &warnings,
        Some("מדעי המחשב 2022-2023"),
        Locale::He,
    );
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let md_path = temp_dir.path().join("report.md");
    MarkdownReporter::new()
        .generate(&ctx, &md_path)
        .expect("markdown report");
    let markdown = std::fs::read_to_string(&md_path).unwrap();
    assert!(markdown.contains("## אזהרות - מדעי המחשב"));
    assert!(markdown.contains("17.5"));

    let html_path = temp_dir.path().join("report.html");
    HtmlReporter::new()
        .generate(&ctx, &html_path)
        .expect("html report");
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("lang=\"he\""));
    assert_eq!(ctx.error_count(), 1);
}
