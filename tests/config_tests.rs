//! Integration tests for configuration management

use sogrim::config::{Config, ConfigOverrides};
use sogrim::core::locale::Locale;
use sogrim::core::models::{GradeToken, GradeVocabulary, TokenKind};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty());
    assert!(!config.paths.out_dir.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert!(!config.validation.banks.is_empty());
    assert_eq!(config.grades.labels().len(), 5);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
out_dir = "./out"
reports_dir = "./reports"

[validation]
locale = "en"
banks = ["Mandatory", "Elective"]

[[grades.tokens]]
label = "Pass"
kind = "pass"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./out");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.locale(), Locale::En);
    assert_eq!(config.validation.banks, vec!["Mandatory", "Elective"]);
    assert_eq!(
        config.grades,
        GradeVocabulary::new(vec![GradeToken::new("Pass", TokenKind::Pass)])
    );
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert!(config.paths.out_dir.is_empty());
    assert!(config.validation.banks.is_empty());
    assert!(config.grades.is_empty());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$SOGRIM/test.log"

[paths]
out_dir = "$SOGRIM/out"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("sogrim"));
    assert!(!config.logging.file.contains("$SOGRIM"));
    assert!(config.paths.out_dir.ends_with("out"));
    assert!(!config.paths.out_dir.contains("$SOGRIM"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);
    assert!(config.set("verbose", "maybe").is_err());

    config.set("locale", "English").expect("Failed to set locale");
    assert_eq!(config.get("locale").unwrap(), "en");
    assert!(config.set("locale", "fr").is_err());

    config
        .set("banks", "Mandatory, Elective,,")
        .expect("Failed to set banks");
    assert_eq!(config.validation.banks, vec!["Mandatory", "Elective"]);
    assert_eq!(config.get("banks").unwrap(), "Mandatory,Elective");

    assert!(config.get("grades").unwrap().contains("עבר"));
    assert!(config.set("grades", "A,B").is_err());

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "info").expect("Failed to set level");
    config.set("banks", "Only").expect("Failed to set banks");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("banks", &defaults)
        .expect("Failed to unset banks");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.validation.banks, defaults.validation.banks);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("locale", "en").expect("Failed to set locale");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.locale(), Locale::En);
    assert_eq!(loaded.grades, config.grades);
    assert_eq!(loaded.validation.banks, config.validation.banks);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        out_dir: Some("./custom_out".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        locale: Some("en".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./custom_out");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.locale(), Locale::En);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.out_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before);
}

#[test]
fn test_validation_rules_follow_config() {
    let mut config = Config::from_defaults();
    config.set("banks", "Mandatory").expect("Failed to set banks");

    let rules = config.validation_rules();
    assert!(rules.is_known_bank("Mandatory"));
    assert!(!rules.is_known_bank("Sports"));
    assert!(rules.grades.find("פטור עם ניקוד").is_some());
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[validation]"));
    assert!(display_str.contains("[grades]"));
    assert!(display_str.contains("locale"));
    assert!(display_str.contains("לא השלים"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
out_dir = ""
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
    assert_eq!(config.validation.locale, defaults.validation.locale);
    assert_eq!(config.grades, defaults.grades);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[validation]
locale = "en"
banks = []
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.locale(), Locale::En);
    assert!(config.validation.banks.is_empty());
}

#[test]
fn test_get_sogrim_dir() {
    let dir = Config::get_sogrim_dir();

    assert!(dir.to_string_lossy().contains("sogrim"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path_str = Config::get_config_file_path().to_string_lossy().to_string();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
