//! Timestamp extraction and duration math for log selections.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// Timestamp grammar: optional `YYYY-MM-DD` date (space or `T`
/// separated), then `HH:MM:SS` with optional fractional seconds. The
/// first occurrence anywhere in the line counts, so prefixed log levels
/// or PIDs don't matter.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})[\ T])?
        (?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})
        (?:[.,](?P<fraction>\d{1,3}))?
    ",
    )
    .expect("timestamp pattern")
});

/// Extracts timestamps from two log lines and reports the time between
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeCalculator;

impl TimeCalculator {
    /// Time elapsed from the first line's timestamp to the second's.
    ///
    /// `None` when either line carries no parseable timestamp or the end
    /// precedes the start.
    pub fn time_period(&self, start_line: &str, end_line: &str) -> Option<Duration> {
        let start = timestamp_ms(start_line)?;
        let end = timestamp_ms(end_line)?;
        let delta = end.checked_sub(start)?;
        Some(Duration::from_millis(delta))
    }
}

fn timestamp_ms(line: &str) -> Option<u64> {
    let caps = TIMESTAMP.captures(line)?;
    // Dateless timestamps all land on day zero; differences still work
    // for selections within one day of logging.
    let mut day_ms: u64 = 0;
    if let Some(year) = caps.name("year") {
        let y: i64 = year.as_str().parse().ok()?;
        let m: i64 = caps["month"].parse().ok()?;
        let d: i64 = caps["day"].parse().ok()?;
        if !(1..=12).contains(&m) || !(1..=31).contains(&d) {
            return None;
        }
        day_ms = u64::try_from(days_from_civil(y, m, d))
            .ok()?
            .checked_mul(86_400_000)?;
    }
    let hour: u64 = caps["hour"].parse().ok()?;
    let minute: u64 = caps["minute"].parse().ok()?;
    let second: u64 = caps["second"].parse().ok()?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let fraction = caps.name("fraction").map_or(0, |f| scale_fraction(f.as_str()));
    Some(day_ms + hour * 3_600_000 + minute * 60_000 + second * 1_000 + fraction)
}

// "7" means 700ms, "07" means 70ms, "007" means 7ms
fn scale_fraction(digits: &str) -> u64 {
    let value: u64 = digits.parse().unwrap_or(0);
    match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date
/// (Hinnant's civil-days formula).
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Render a duration as `1d 2h 3min 4s 5ms`, dropping leading zero
/// units.
pub fn format_duration(period: Duration) -> String {
    let total_ms = period.as_millis();
    let units = [
        (total_ms / 86_400_000, "d"),
        (total_ms / 3_600_000 % 24, "h"),
        (total_ms / 60_000 % 60, "min"),
        (total_ms / 1_000 % 60, "s"),
        (total_ms % 1_000, "ms"),
    ];
    let mut parts = Vec::new();
    for (value, unit) in units {
        if parts.is_empty() && value == 0 {
            continue;
        }
        parts.push(format!("{value}{unit}"));
    }
    if parts.is_empty() {
        return "0ms".to_string();
    }
    parts.join(" ")
}
