//! Display date formatting.

use chrono::{DateTime, Datelike, NaiveDate};

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Renders a stored date (`YYYY-MM-DD` or RFC 3339) as `"10 mai 2024"`.
///
/// Malformed input yields an empty string: display must never fail on a
/// bad record.
#[must_use]
pub fn format_date_fr(input: &str) -> String {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match date {
        Some(d) => format!("{} {} {}", d.day(), MONTHS_FR[d.month0() as usize], d.year()),
        None => String::new(),
    }
}
