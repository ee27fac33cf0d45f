//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;

fn numeric_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?[0-9]+$").expect("numeric id pattern is valid"))
}

/// Whether text consists only of an optional minus sign and digits
pub fn is_numeric_id(text: &str) -> bool {
    numeric_id_pattern().is_match(text.trim())
}

/// Parse text consisting only of an optional minus sign and digits.
///
/// Group and channel identifiers are negative, so `-100123456789` is accepted.
/// Text that matches the pattern but overflows `i64` yields `None`; check
/// [`is_numeric_id`] to tell it apart from non-numeric text.
pub fn parse_numeric_id(text: &str) -> Option<i64> {
    if !is_numeric_id(text) {
        return None;
    }
    text.trim().parse().ok()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Join optional first and last names into a display name
pub fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
