//! Tests for the record parser

use super::*;
use crate::error::Error;
use crate::types::Record;
use pretty_assertions::assert_eq;
use std::io::Write;
use test_case::test_case;

fn record(fields: [&str; 5]) -> Record {
    Record::from_fields(fields).unwrap()
}

// ============================================================================
// Well-formed Input
// ============================================================================

#[test]
fn test_parse_two_rows() {
    let input = "1,ا,alif,letter,first letter\n2,ب,ba,letter,second letter\n";
    let records = parse_str(input, &ParseOptions::default()).unwrap();

    assert_eq!(
        records,
        vec![
            record(["1", "ا", "alif", "letter", "first letter"]),
            record(["2", "ب", "ba", "letter", "second letter"]),
        ]
    );
}

#[test]
fn test_parse_preserves_order() {
    let input: String = (0..50)
        .rev()
        .map(|i| format!("{i},a{i},b{i},c{i},d{i}\n"))
        .collect();
    let records = parse_str(&input, &ParseOptions::default()).unwrap();

    assert_eq!(records.len(), 50);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<String> = (0..50).rev().map(|i| i.to_string()).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(records[0].explanation, "d49");
}

#[test]
fn test_parse_no_trailing_newline() {
    let records = parse_str("1,a,b,c,d", &ParseOptions::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].explanation, "d");
}

#[test]
fn test_parse_quoted_fields() {
    let input = "1,\"ا, ب\",\"say \"\"alif\"\"\",letter,\"line one\nline two\"\n";
    let records = parse_str(input, &ParseOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].arabic, "ا, ب");
    assert_eq!(records[0].transliteration, "say \"alif\"");
    assert_eq!(records[0].explanation, "line one\nline two");
}

#[test]
fn test_parse_fields_not_trimmed() {
    let records = parse_str("  1 , a,b ,c,  d  \n", &ParseOptions::default()).unwrap();
    assert_eq!(records[0], record(["  1 ", " a", "b ", "c", "  d  "]));
}

#[test]
fn test_parse_empty_fields_accepted() {
    let records = parse_str(",,,,\n", &ParseOptions::default()).unwrap();
    assert_eq!(records, vec![Record::default()]);
}

#[test]
fn test_parse_duplicate_ids_accepted() {
    let input = "1,a,b,c,d\n1,a,b,c,d\n";
    let records = parse_str(input, &ParseOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}

#[test_case("" ; "empty")]
#[test_case("\n" ; "single newline")]
#[test_case("\n\n\n" ; "blank lines")]
fn test_parse_empty_input(input: &str) {
    let records = parse_str(input, &ParseOptions::default()).unwrap();
    assert!(records.is_empty());
}

// ============================================================================
// Header Handling
// ============================================================================

#[test]
fn test_header_parsed_as_data_by_default() {
    let input = "id,arabic,transliteration,meaning,explanation\n1,a,b,c,d\n";
    let records = parse_str(input, &ParseOptions::default()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "id");
}

#[test]
fn test_skip_header() {
    let input = "id,arabic,transliteration,meaning,explanation\n1,a,b,c,d\n";
    let options = ParseOptions::new().skip_header(true);
    let records = parse_str(input, &options).unwrap();

    assert_eq!(records, vec![record(["1", "a", "b", "c", "d"])]);
}

#[test]
fn test_skip_header_on_empty_input() {
    let options = ParseOptions::new().skip_header(true);
    assert!(parse_str("", &options).unwrap().is_empty());
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test_case("1,a,b,c\n", 4 ; "too few fields")]
#[test_case("1,a,b,c,d,e\n", 6 ; "too many fields")]
#[test_case("1\n", 1 ; "single field")]
fn test_malformed_row(input: &str, found: usize) {
    let err = parse_str(input, &ParseOptions::default()).unwrap_err();
    match err {
        Error::MalformedRecord {
            line,
            expected,
            found: actual,
        } => {
            assert_eq!(line, 1);
            assert_eq!(expected, 5);
            assert_eq!(actual, found);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_row_aborts_whole_parse() {
    let input = "1,a,b,c,d\n2,a,b,c,d\n3,a,b\n4,a,b,c,d\n";
    let err = parse_str(input, &ParseOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedRecord {
            line: 3,
            found: 3,
            ..
        }
    ));
}

#[test_case("1,a\"b,c,d,e\n", 1 ; "bare quote")]
#[test_case("1,\"a\"x,c,d,e\n", 1 ; "text after closing quote")]
#[test_case("1,a,b,c,\"unterminated\n", 1 ; "unterminated quote")]
#[test_case("1,a,b,c,d\n2, \"a\",b,c,d\n", 2 ; "quote after leading space")]
#[test_case("1,a,b,c,\"two\nlines\" x\n", 2 ; "text after multi-line field")]
fn test_bad_quoting_rejected(input: &str, expected_line: u64) {
    let err = parse_str(input, &ParseOptions::default()).unwrap_err();
    match err {
        Error::Csv { line, .. } => assert_eq!(line, expected_line),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_quoting_aborts_whole_parse() {
    let input = "1,a,b,c,d\n2,a,b,c,d\n3,\"a\"x,b,c,d\n";
    let err = parse_str(input, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Csv { line: 3, .. }), "got {err}");
}

#[test]
fn test_bad_quoting_in_skipped_header_rejected() {
    let options = ParseOptions::new().skip_header(true);
    let err = parse_str("id,\"arabic\"x,t,m,e\n1,a,b,c,d\n", &options).unwrap_err();
    assert!(matches!(err, Error::Csv { line: 1, .. }), "got {err}");
}

#[test]
fn test_quoted_field_with_crlf_endings() {
    let input = "1,\"a\",b,c,\"d\"\r\n2,a,\"\",c,d\r\n";
    let records = parse_str(input, &ParseOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], record(["1", "a", "b", "c", "d"]));
    assert_eq!(records[1].transliteration, "");
}

#[test]
fn test_quote_delimiter_rejected() {
    let options = ParseOptions::new().with_delimiter('"');
    let err = parse_str("1,a,b,c,d\n", &options).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_invalid_utf8_is_csv_error() {
    let input: &[u8] = b"1,a,\xff\xfe,c,d\n";
    let err = parse_records(input, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Csv { .. }), "got {err}");
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let options = ParseOptions::new().with_delimiter('،');
    let err = parse_str("1,a,b,c,d\n", &options).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_custom_delimiter() {
    let options = ParseOptions::new().with_delimiter(';');
    let records = parse_str("1;a,x;b;c;d\n", &options).unwrap();
    assert_eq!(records[0].arabic, "a,x");
}

// ============================================================================
// File Input
// ============================================================================

#[test]
fn test_read_records_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1,ا,alif,letter,first letter").unwrap();
    writeln!(file, "2,ب,ba,letter,second letter").unwrap();

    let records = read_records(file.path(), &ParseOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].transliteration, "ba");
}

#[test]
fn test_read_records_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let err = read_records(&path, &ParseOptions::default()).unwrap_err();
    match err {
        Error::InputUnreadable { path: p, source } => {
            assert!(p.ends_with("missing.csv"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_options_yaml() {
    let options: ParseOptions = serde_yaml::from_str("skip_header: true").unwrap();
    assert!(options.skip_header);
    assert_eq!(options.delimiter, ',');
}
