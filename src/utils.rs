// Utility functions
use chrono::{DateTime, Utc};

/// Parses a string into `DateTime<Utc>`, if possible.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts an ISO-8601 `PT[<h>H][<m>M]` duration into total minutes.
///
/// Anything that does not carry a `PT` marker, and any component not closed
/// by its letter, counts as zero. Malformed input degrades to 0 instead of
/// erroring out, so a single bad offer cannot poison a result set.
pub fn parse_iso_duration_minutes(raw: &str) -> u32 {
    let Some(start) = raw.find("PT") else {
        return 0;
    };
    let rest = &raw[start + 2..];
    let (hours, rest) = take_component(rest, 'H');
    let (minutes, _) = take_component(rest, 'M');
    hours * 60 + minutes
}

/// Reads a leading `<digits><marker>` component, returning the value and the
/// remaining input. Leaves the input untouched when the marker is absent.
fn take_component(input: &str, marker: char) -> (u32, &str) {
    let digits = input.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return (0, input);
    }
    let (num, tail) = input.split_at(digits);
    if let Some(rest) = tail.strip_prefix(marker) {
        (num.parse().unwrap_or(0), rest)
    } else {
        (0, input)
    }
}

/// Renders minutes as `7h 10m` for the textual report.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
