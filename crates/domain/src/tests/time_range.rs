// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CLOSING_MINUTE, MIN_DURATION_MINUTES, OPENING_MINUTE, TimeRange, TimeRangeError};

fn range(text: &str) -> TimeRange {
    TimeRange::parse(text).expect("valid time range")
}

fn clock(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Every valid range on a quarter-hour grid, in canonical text form.
fn quarter_hour_grid() -> Vec<String> {
    let mut texts: Vec<String> = Vec::new();
    for start in (OPENING_MINUTE..=CLOSING_MINUTE).step_by(15) {
        for end in (start + MIN_DURATION_MINUTES..=CLOSING_MINUTE).step_by(15) {
            texts.push(format!("{}-{}", clock(start), clock(end)));
        }
    }
    texts
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_accepts_valid_range() {
    let parsed: TimeRange = range("09:00-10:30");

    assert_eq!(parsed.start_minute(), 9 * 60);
    assert_eq!(parsed.end_minute(), 10 * 60 + 30);
    assert_eq!(parsed.duration_minutes(), 90);
}

#[test]
fn test_parse_round_trips_canonical_form() {
    let texts: Vec<String> = quarter_hour_grid();
    assert!(texts.contains(&String::from("06:00-22:00")));
    assert!(texts.contains(&String::from("21:30-22:00")));

    for text in &texts {
        let parsed: TimeRange = range(text);
        assert_eq!(&parsed.to_string(), text);
        assert_eq!(range(&parsed.to_string()), parsed);
    }
}

#[test]
fn test_parse_canonicalizes_single_digit_hours_and_spaces() {
    assert_eq!(range("9:00 - 10:00").to_string(), "09:00-10:00");
}

#[test]
fn test_parse_accepts_window_boundaries() {
    assert!(TimeRange::parse("06:00-22:00").is_ok());
}

#[test]
fn test_parse_rejects_missing_separator() {
    let err = TimeRange::parse("09:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Format { .. }));
}

#[test]
fn test_parse_rejects_three_parts() {
    let err = TimeRange::parse("09:00-10:00-11:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Format { .. }));
}

#[test]
fn test_parse_rejects_invalid_clock_values() {
    for text in ["25:00-26:00", "09:60-10:00", "9-10", "ab:cd-10:00", "09:0-10:00", ""] {
        let err = TimeRange::parse(text).unwrap_err();
        assert!(
            matches!(err, TimeRangeError::Format { .. }),
            "expected format error for {text:?}, got {err:?}"
        );
    }
}

#[test]
fn test_parse_rejects_reversed_range() {
    let err = TimeRange::parse("11:00-10:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Order { .. }));
}

#[test]
fn test_parse_rejects_empty_range() {
    let err = TimeRange::parse("10:00-10:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Order { .. }));
}

#[test]
fn test_parse_rejects_short_range() {
    let err = TimeRange::parse("10:00-10:29").unwrap_err();
    assert_eq!(
        err,
        TimeRangeError::Duration {
            minutes: 29,
            minimum: 30
        }
    );
}

#[test]
fn test_parse_accepts_exactly_thirty_minutes() {
    assert_eq!(range("10:00-10:30").duration_minutes(), 30);
}

#[test]
fn test_parse_rejects_start_before_opening() {
    let err = TimeRange::parse("05:30-07:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Window { .. }));
}

#[test]
fn test_parse_rejects_end_after_closing() {
    let err = TimeRange::parse("21:00-22:30").unwrap_err();
    assert!(matches!(err, TimeRangeError::Window { .. }));
}

#[test]
fn test_duration_is_checked_before_window() {
    let err = TimeRange::parse("05:00-05:10").unwrap_err();
    assert!(matches!(err, TimeRangeError::Duration { .. }));
}

#[test]
fn test_parse_lenient_skips_duration_and_window() {
    let parsed = TimeRange::parse_lenient("05:00-05:10").unwrap();
    assert_eq!(parsed.to_string(), "05:00-05:10");

    let err = TimeRange::parse_lenient("05:10-05:00").unwrap_err();
    assert!(matches!(err, TimeRangeError::Order { .. }));
}

#[test]
fn test_from_str_validates_fully() {
    assert!("09:00-10:00".parse::<TimeRange>().is_ok());
    assert!("05:00-10:00".parse::<TimeRange>().is_err());
}

// ============================================================================
// Overlap
// ============================================================================

#[test]
fn test_touching_ranges_do_not_overlap() {
    assert!(!range("09:00-10:00").overlaps(&range("10:00-11:00")));
    assert!(!range("10:00-11:00").overlaps(&range("09:00-10:00")));
}

#[test]
fn test_partial_overlap_is_detected() {
    assert!(range("09:00-10:00").overlaps(&range("09:30-10:30")));
}

#[test]
fn test_containment_is_overlap() {
    assert!(range("08:00-12:00").overlaps(&range("09:00-10:00")));
    assert!(range("09:00-10:00").overlaps(&range("08:00-12:00")));
}

#[test]
fn test_identical_ranges_overlap() {
    assert!(range("09:00-10:00").overlaps(&range("09:00-10:00")));
}

#[test]
fn test_overlap_is_symmetric() {
    let ranges: Vec<TimeRange> = quarter_hour_grid()
        .iter()
        .map(String::as_str)
        .map(range)
        .collect();

    for a in &ranges {
        for b in &ranges {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            assert_eq!(
                a.overlaps(b),
                a.start_minute() < b.end_minute() && b.start_minute() < a.end_minute(),
                "{a} vs {b}"
            );
        }
    }
}
