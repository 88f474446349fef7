//! Output formatting utilities.

use eventide_containers::{names, AttributeContainer, AttributeValue};
use serde_json::Value;

/// Formats a container as JSON.
pub fn format_json(container: &AttributeContainer) -> String {
    serde_json::to_string(container).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a container as a simple table row.
pub fn format_table_row(container: &AttributeContainer) -> String {
    let identifier = container
        .identifier()
        .map(|identifier| identifier.to_string())
        .unwrap_or_else(|| "?".to_string());
    let date_time = container
        .attribute(names::DATE_TIME)
        .map(format_scalar)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<28} {:<20} {:<28} {}",
        truncate(&identifier, 28),
        container.kind(),
        truncate(&date_time, 28),
        container.attribute_count()
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<28} {:<20} {:<28} {}",
        "IDENTIFIER", "KIND", "DATE_TIME", "ATTRS"
    );
    println!("{}", "-".repeat(88));
}

fn format_scalar(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Timestamp(timestamp) => timestamp.to_string(),
        other => match other.to_raw_json() {
            Some(Value::String(text)) => text,
            Some(json) => json.to_string(),
            None => "-".to_string(),
        },
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
