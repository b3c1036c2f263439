use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Day of week keyed by its English name, as used in import payloads
/// and the persisted schedule JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(()),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// One raw import entry: `{day: "Monday", hours: "9 AM to 10 PM"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHoursEntry {
    pub day: String,
    pub hours: String,
}

fn time_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d{1,2})(?::([0-5][0-9]))?\s*(AM|PM)\s*$").unwrap()
    })
}

/// Parse a 12-hour clock string like "9 AM" or "10:30 PM" into minutes
/// since midnight. 12 AM maps to 0, 12 PM to 720.
///
/// Returns `None` for anything that does not match; the caller decides
/// whether to skip the record (import does, never aborting the batch).
pub fn parse_time_to_minutes(text: &str) -> Option<u16> {
    let captures = match time_pattern().captures(text) {
        Some(c) => c,
        None => {
            tracing::warn!("Unparseable opening-hours time string: {:?}", text);
            return None;
        }
    };

    let hour: u16 = captures[1].parse().ok()?;
    if !(1..=12).contains(&hour) {
        tracing::warn!("Hour out of 12-hour range in time string: {:?}", text);
        return None;
    }
    let minute: u16 = captures
        .get(2)
        .map(|m| m.as_str().parse().ok())
        .unwrap_or(Some(0))?;

    let is_pm = captures[3].eq_ignore_ascii_case("PM");
    let hour_24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    Some(hour_24 * 60 + minute)
}

/// Zero-padded 24-hour rendering of a minute offset, e.g. 540 -> "09:00".
pub fn minutes_to_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Weekly opening schedule: one `[start, end)` minute interval per weekday.
///
/// A missing day means "hours unknown"; `is_open_at` answers `false` for
/// missing days just as it does outside a stored interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, (u16, u16)>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from import entries of the form
    /// `{day, "START to END"}`. Entries whose day or either time fail to
    /// parse, or whose interval is empty or inverted, are dropped with a
    /// warning rather than failing the whole record.
    pub fn from_entries(entries: &[OpeningHoursEntry]) -> Self {
        let mut schedule = Self::new();

        for entry in entries {
            let day = match entry.day.parse::<Weekday>() {
                Ok(day) => day,
                Err(()) => {
                    tracing::warn!("Unknown weekday in opening hours: {:?}", entry.day);
                    continue;
                }
            };

            let Some((start_raw, end_raw)) = entry.hours.split_once(" to ") else {
                tracing::warn!("Opening hours missing ' to ' separator: {:?}", entry.hours);
                continue;
            };

            let (Some(start), Some(end)) = (
                parse_time_to_minutes(start_raw),
                parse_time_to_minutes(end_raw),
            ) else {
                // parse_time_to_minutes already warned
                continue;
            };

            if start >= end {
                tracing::warn!(
                    "Dropping inverted opening interval for {}: {} >= {}",
                    day,
                    start,
                    end
                );
                continue;
            }

            schedule.days.insert(day, (start, end));
        }

        schedule
    }

    pub fn set(&mut self, day: Weekday, start: u16, end: u16) {
        self.days.insert(day, (start, end));
    }

    pub fn interval(&self, day: Weekday) -> Option<(u16, u16)> {
        self.days.get(&day).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Half-open interval check: the closing minute itself counts as closed.
    pub fn is_open_at(&self, day: Weekday, minutes: u16) -> bool {
        match self.days.get(&day) {
            Some(&(start, end)) => start <= minutes && minutes < end,
            None => false,
        }
    }

    pub fn is_open(&self, at: chrono::DateTime<chrono::Local>) -> bool {
        use chrono::{Datelike, Timelike};
        let minutes = (at.hour() * 60 + at.minute()) as u16;
        self.is_open_at(at.weekday().into(), minutes)
    }

    /// Human rendering for the API: every weekday mapped to
    /// `"HH:MM - HH:MM"` or `"Closed"`.
    pub fn formatted(&self) -> BTreeMap<String, String> {
        Weekday::ALL
            .iter()
            .map(|day| {
                let rendered = match self.days.get(day) {
                    Some(&(start, end)) => {
                        format!("{} - {}", minutes_to_clock(start), minutes_to_clock(end))
                    }
                    None => "Closed".to_string(),
                };
                (day.name().to_string(), rendered)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Time-string parsing

    #[test]
    fn parses_whole_hours() {
        assert_eq!(parse_time_to_minutes("9 AM"), Some(540));
        assert_eq!(parse_time_to_minutes("5 PM"), Some(1020));
    }

    #[test]
    fn parses_noon_and_midnight() {
        assert_eq!(parse_time_to_minutes("12 AM"), Some(0));
        assert_eq!(parse_time_to_minutes("12 PM"), Some(720));
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(parse_time_to_minutes("11:30 PM"), Some(1410));
        assert_eq!(parse_time_to_minutes("9:05 AM"), Some(545));
    }

    #[test]
    fn meridiem_is_case_insensitive() {
        assert_eq!(parse_time_to_minutes("9 am"), Some(540));
        assert_eq!(parse_time_to_minutes("10:30 pm"), Some(1350));
        assert_eq!(parse_time_to_minutes("  7 Pm  "), Some(1140));
    }

    #[test]
    fn rejects_hours_outside_twelve_hour_clock() {
        assert_eq!(parse_time_to_minutes("25 AM"), None);
        assert_eq!(parse_time_to_minutes("0 AM"), None);
        assert_eq!(parse_time_to_minutes("13 PM"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_time_to_minutes(""), None);
        assert_eq!(parse_time_to_minutes("9"), None);
        assert_eq!(parse_time_to_minutes("9:5 AM"), None);
        assert_eq!(parse_time_to_minutes("9:60 AM"), None);
        assert_eq!(parse_time_to_minutes("nine AM"), None);
        assert_eq!(parse_time_to_minutes("9 AM to 5 PM"), None);
    }

    #[test]
    fn renders_clock_zero_padded() {
        assert_eq!(minutes_to_clock(0), "00:00");
        assert_eq!(minutes_to_clock(540), "09:00");
        assert_eq!(minutes_to_clock(1410), "23:30");
        assert_eq!(minutes_to_clock(65), "01:05");
    }

    // Schedule construction

    fn entry(day: &str, hours: &str) -> OpeningHoursEntry {
        OpeningHoursEntry {
            day: day.to_string(),
            hours: hours.to_string(),
        }
    }

    #[test]
    fn builds_schedule_from_entries() {
        let schedule = WeeklySchedule::from_entries(&[
            entry("Monday", "9 AM to 10 PM"),
            entry("Tuesday", "11:30 AM to 2 PM"),
        ]);

        assert_eq!(schedule.interval(Weekday::Monday), Some((540, 1320)));
        assert_eq!(schedule.interval(Weekday::Tuesday), Some((690, 840)));
        assert_eq!(schedule.interval(Weekday::Wednesday), None);
    }

    #[test]
    fn weekday_names_are_case_insensitive() {
        let schedule = WeeklySchedule::from_entries(&[entry("friday", "9 AM to 5 PM")]);
        assert_eq!(schedule.interval(Weekday::Friday), Some((540, 1020)));
    }

    #[test]
    fn drops_unparseable_entries_without_failing() {
        let schedule = WeeklySchedule::from_entries(&[
            entry("Monday", "9 AM to 10 PM"),
            entry("Tuesday", "25 AM to 10 PM"),
            entry("Blursday", "9 AM to 10 PM"),
            entry("Thursday", "9 AM until 10 PM"),
        ]);

        assert_eq!(schedule.interval(Weekday::Monday), Some((540, 1320)));
        assert_eq!(schedule.interval(Weekday::Tuesday), None);
        assert_eq!(schedule.interval(Weekday::Thursday), None);
    }

    #[test]
    fn drops_inverted_intervals() {
        let schedule = WeeklySchedule::from_entries(&[entry("Monday", "10 PM to 9 AM")]);
        assert!(schedule.is_empty());
    }

    // Open/closed checks

    #[test]
    fn open_interval_is_half_open() {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Monday, 540, 1320);

        assert!(schedule.is_open_at(Weekday::Monday, 540));
        assert!(schedule.is_open_at(Weekday::Monday, 1319));
        assert!(!schedule.is_open_at(Weekday::Monday, 1320));
        assert!(!schedule.is_open_at(Weekday::Monday, 539));
    }

    #[test]
    fn missing_day_counts_as_closed() {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Monday, 540, 1320);

        assert!(!schedule.is_open_at(Weekday::Sunday, 600));
    }

    #[test]
    fn formats_full_week_with_closed_days() {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Monday, 540, 1320);

        let formatted = schedule.formatted();
        assert_eq!(formatted["Monday"], "09:00 - 22:00");
        assert_eq!(formatted["Sunday"], "Closed");
        assert_eq!(formatted.len(), 7);
    }

    // Persistence round-trip

    #[test]
    fn serializes_as_day_keyed_map() {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Monday, 540, 1320);

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json, serde_json::json!({"Monday": [540, 1320]}));

        let back: WeeklySchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }
}
