//! Human-readable date formatting for server timestamps.

use chrono::{DateTime, Datelike, NaiveDate};
use log::*;

/// Format a date as e.g. "3rd March 2024", with the ordinal suffix the
/// service renders next to upload and join dates.
///
pub fn format_date(date: NaiveDate) -> String {
    let day = date.day();

    let mut suffix = match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    if (11..=13).contains(&(day % 100)) {
        suffix = "th";
    }

    format!("{}{} {} {}", day, suffix, month_name(date.month()), date.year())
}

/// Parse an RFC 3339 server timestamp (`uploadTime`, `joinDate`) and format
/// it for display. Returns `None` for timestamps the server should never
/// send.
///
pub fn format_timestamp(timestamp: &str) -> Option<String> {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(datetime) => Some(format_date(datetime.date_naive())),
        Err(e) => {
            error!("Invalid timestamp '{}': {}", timestamp, e);
            None
        }
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
