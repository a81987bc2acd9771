//! Date/time wire representations.
//!
//! | Kind            | Wire form                     |
//! |-----------------|-------------------------------|
//! | instant         | epoch milliseconds (integer)  |
//! | date            | `YYYY-MM-DD`                  |
//! | local date-time | `YYYY-MM-DDTHH:mm:ss.nnn`     |
//! | local time      | `HH:mm:ss.nnn`                |
//!
//! Formatting truncates to milliseconds and refuses years outside
//! `0000..=9999`, which have no four-digit form. Parsing accepts nothing but
//! these exact shapes.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
pub const LOCAL_TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Years with a four-digit `%Y` rendering.
pub const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

// `9` marks an ASCII digit; every other byte must match literally.
const DATE_SHAPE: &[u8] = b"9999-99-99";
const LOCAL_DATE_TIME_SHAPE: &[u8] = b"9999-99-99T99:99:99.999";
const LOCAL_TIME_SHAPE: &[u8] = b"99:99:99.999";

fn has_shape(s: &str, shape: &[u8]) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape).all(|(b, &expected)| match expected {
            b'9' => b.is_ascii_digit(),
            _ => b == expected,
        })
}

pub fn instant_to_millis(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

pub fn instant_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

pub fn format_date(date: &NaiveDate) -> Option<String> {
    YEARS
        .contains(&date.year())
        .then(|| date.format(DATE_FORMAT).to_string())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !has_shape(s, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_local_date_time(date_time: &NaiveDateTime) -> Option<String> {
    YEARS
        .contains(&date_time.year())
        .then(|| date_time.format(LOCAL_DATE_TIME_FORMAT).to_string())
}

pub fn parse_local_date_time(s: &str) -> Option<NaiveDateTime> {
    if !has_shape(s, LOCAL_DATE_TIME_SHAPE) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, LOCAL_DATE_TIME_FORMAT).ok()
}

pub fn format_local_time(time: &NaiveTime) -> String {
    time.format(LOCAL_TIME_FORMAT).to_string()
}

pub fn parse_local_time(s: &str) -> Option<NaiveTime> {
    if !has_shape(s, LOCAL_TIME_SHAPE) {
        return None;
    }
    NaiveTime::parse_from_str(s, LOCAL_TIME_FORMAT).ok()
}
