//! CSV parser for course history files
//!
//! The first non-empty record is the header. Columns are matched by name,
//! case-insensitively, so their order is free and unknown columns are ignored.

use crate::core::models::RawCourseRow;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Header names recognized for each field
const PERIOD_HEADERS: &[&str] = &["semester", "period"];
const NUMBER_HEADERS: &[&str] = &["course number", "number"];
const NAME_HEADERS: &[&str] = &["name", "course name"];
const CREDIT_HEADERS: &[&str] = &["credit", "credits"];
const GRADE_HEADERS: &[&str] = &["grade"];
const TYPE_HEADERS: &[&str] = &["type", "bank"];

/// Parse a course history CSV file into raw rows
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or has no usable header
pub fn parse_history_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawCourseRow>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_history_str(&content)
}

/// Parse course history CSV content into raw rows
///
/// # Errors
/// Returns an error if there is no header or it lacks a course number column
pub fn parse_history_str(content: &str) -> Result<Vec<RawCourseRow>, Box<dyn Error>> {
    let mut records = split_csv_records(content.trim_start_matches('\u{feff}'))
        .into_iter()
        .filter(|fields| !is_blank_record(fields));

    let headers = records.next().ok_or("Empty course history: no header found")?;

    if column(&headers, NUMBER_HEADERS).is_none() {
        return Err("No 'Course Number' column found in header".into());
    }

    Ok(records
        .map(|fields| RawCourseRow {
            name: get_field(&fields, &headers, NAME_HEADERS),
            course_number: get_field(&fields, &headers, NUMBER_HEADERS),
            period: get_field(&fields, &headers, PERIOD_HEADERS),
            credit: get_field(&fields, &headers, CREDIT_HEADERS),
            grade: get_field(&fields, &headers, GRADE_HEADERS),
            r#type: get_field(&fields, &headers, TYPE_HEADERS),
        })
        .collect())
}

/// Split CSV content into records of fields.
///
/// Double-quoted fields may hold commas, doubled quotes and line breaks, and
/// keep their text verbatim. Unquoted fields are trimmed.
fn split_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
            continue;
        }
        match c {
            // Whitespace before the opening quote is not part of the field
            '"' if !quoted && current.trim().is_empty() => {
                current.clear();
                quoted = true;
                in_quotes = true;
            }
            '"' => in_quotes = true,
            ',' => fields.push(finish_field(&mut current, &mut quoted)),
            '\n' => {
                fields.push(finish_field(&mut current, &mut quoted));
                records.push(std::mem::take(&mut fields));
            }
            '\r' => {}
            _ if quoted && c.is_whitespace() => {}
            _ => current.push(c),
        }
    }
    if !current.is_empty() || quoted || !fields.is_empty() {
        fields.push(finish_field(&mut current, &mut quoted));
        records.push(fields);
    }
    records
}

fn finish_field(current: &mut String, quoted: &mut bool) -> String {
    let field = std::mem::take(current);
    if std::mem::take(quoted) {
        field
    } else {
        field.trim().to_string()
    }
}

/// A record holding nothing but one empty unquoted field, i.e. a blank line
fn is_blank_record(fields: &[String]) -> bool {
    matches!(fields, [only] if only.is_empty())
}

/// Index of the first header matching one of `names`
fn column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
}

/// Field value by header name; empty when the column or field is missing
fn get_field(fields: &[String], headers: &[String], names: &[&str]) -> String {
    column(headers, names)
        .and_then(|idx| fields.get(idx))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_records() {
        let records = split_csv_records("Winter, 104031 ,\"Calculus 1, M\",5.5,,\r\n");
        assert_eq!(records.len(), 1);
        let fields = &records[0];
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1], "104031");
        assert_eq!(fields[2], "Calculus 1, M");
        assert_eq!(fields[4], "");
    }

    #[test]
    fn test_escaped_quotes() {
        let records = split_csv_records("\"Seminar \"\"Ethics\"\"\",1");
        assert_eq!(records[0][0], "Seminar \"Ethics\"");
    }

    #[test]
    fn test_quoted_fields_are_verbatim() {
        let records = split_csv_records("a, \" Calculus \" ,\"Calc\nM\"\nb,c\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["a", " Calculus ", "Calc\nM"]);
        assert_eq!(records[1], vec!["b", "c"]);
    }

    #[test]
    fn test_parse_by_header_name() {
        let content = "\
Grade,Course Number,SEMESTER,Credit
90,104031,Winter,5.5

עבר,234114,Spring,4
";
        let rows = parse_history_str(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course_number, "104031");
        assert_eq!(rows[0].period, "Winter");
        assert_eq!(rows[0].grade, "90");
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[1].grade, "עבר");
    }

    #[test]
    fn test_missing_number_column() {
        assert!(parse_history_str("Semester,Name\nWinter,Calculus\n").is_err());
        assert!(parse_history_str("").is_err());
    }
}
