//! Display formatting for amounts, shares and timestamps.

use chrono::{DateTime, Utc};

/// `1234.5` -> `$1,234.50`. Negative amounts keep their sign before the symbol.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let units = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${units}.{:02}", cents % 100)
}

/// Whole units with thousands separators.
pub fn format_units(units: i64) -> String {
    let grouped = group_thousands(units.unsigned_abs());
    if units < 0 { format!("-{grouped}") } else { grouped }
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Day and minute in `dd/mm/yyyy HH:MM`, or a dash when unknown.
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |timestamp| timestamp.format("%d/%m/%Y %H:%M").to_string(),
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
