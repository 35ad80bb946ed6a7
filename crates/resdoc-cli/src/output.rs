//! Output formatting utilities.

use serde::Serialize;

/// Formats a value as pretty or compact JSON.
pub fn format_json<T: Serialize>(value: &T, compact: bool) -> String {
    let formatted = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    formatted.unwrap_or_else(|_| "{}".to_string())
}

/// Formats a detection result as a table row.
pub fn format_detection_row(resource_type: &str, shape: &str, count: usize) -> String {
    format!("{:<24} {:<12} {}", resource_type, shape, count)
}

/// Prints the detection table header.
#[allow(clippy::print_literal)]
pub fn print_detection_header() {
    println!("{:<24} {:<12} {}", "TYPE", "SHAPE", "ITEMS");
    println!("{}", "-".repeat(44));
}
