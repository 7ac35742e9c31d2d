//! Tests for parsing statistics functionality

use super::super::error::{DecodeError, ScalarError};
use super::super::stats::{ParseResult, ParseStats};
use super::CERES_LINE;
use crate::app::services::mpcorb_parser::columns::Field;
use crate::app::services::mpcorb_parser::decode_record;

fn sample_error() -> DecodeError {
    DecodeError::malformed_number(Field::SemimajorAxis, "x", ScalarError::Malformed)
}

#[test]
fn test_parse_stats_calculation() {
    let stats = ParseStats {
        candidate_records: 100,
        records_decoded: 95,
        records_failed: 5,
        ..Default::default()
    };

    assert_eq!(stats.success_rate(), 95.0);
    assert!(stats.is_successful());

    let poor_stats = ParseStats {
        candidate_records: 100,
        records_decoded: 80,
        records_failed: 20,
        ..Default::default()
    };

    assert_eq!(poor_stats.success_rate(), 80.0);
    assert!(!poor_stats.is_successful());
}

#[test]
fn test_parse_stats_empty() {
    let empty_stats = ParseStats::new();

    assert_eq!(empty_stats.total_lines, 0);
    assert_eq!(empty_stats.candidate_records, 0);
    assert!(empty_stats.errors.is_empty());
    assert_eq!(empty_stats.success_rate(), 0.0);
    assert!(!empty_stats.is_successful());
}

#[test]
fn test_record_failure_respects_cap() {
    let mut stats = ParseStats::new();
    stats.record_failure(44, &sample_error(), 1);
    stats.record_failure(45, &sample_error(), 1);

    assert_eq!(stats.records_failed, 2);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].starts_with("Line 44: missing or malformed number in semimajor_axis"));
}

#[test]
fn test_merge_sums_counts_and_caps_errors() {
    let mut first = ParseStats {
        total_lines: 10,
        lines_skipped: 2,
        candidate_records: 8,
        records_decoded: 7,
        records_failed: 1,
        errors: vec!["a".to_string()],
    };
    let second = ParseStats {
        total_lines: 5,
        lines_skipped: 0,
        candidate_records: 5,
        records_decoded: 3,
        records_failed: 2,
        errors: vec!["b".to_string(), "c".to_string()],
    };

    first.merge(second, 2);

    assert_eq!(first.total_lines, 15);
    assert_eq!(first.lines_skipped, 2);
    assert_eq!(first.candidate_records, 13);
    assert_eq!(first.records_decoded, 10);
    assert_eq!(first.records_failed, 3);
    assert_eq!(first.errors, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_parse_result_merge_keeps_order() {
    let ceres = decode_record(CERES_LINE).unwrap();
    let mut renamed = ceres.clone();
    renamed.id = "2".to_string();

    let mut result = ParseResult {
        planets: vec![ceres],
        stats: ParseStats::new(),
    };
    result.merge(
        ParseResult {
            planets: vec![renamed],
            stats: ParseStats::new(),
        },
        10,
    );

    let ids: Vec<&str> = result.planets.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_parse_stats_serialization() {
    let stats = ParseStats {
        total_lines: 3,
        candidate_records: 1,
        records_decoded: 1,
        ..Default::default()
    };

    let json = serde_json::to_string(&stats).unwrap();
    let back: ParseStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);
}
