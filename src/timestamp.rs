// src/timestamp.rs - recognizing the timestamp at the start of a log line

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// An absolute point in time, comparable across sources
pub type Instant = DateTime<Utc>;

/// Maximum number of whitespace-separated fields split off a line
const MAX_FIELDS: usize = 6;

const ISO_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
// chrono's `%b` would also take full month names, so the month field is
// checked to be a three-letter abbreviation first. `%d` and `%H` accept
// unpadded digits, which syslog's space-padded days ("Jun  1") rely on.
const SYSLOG_PATTERN: &str = "%Y %b %d %H:%M:%S";

/// Time zone used to interpret wall-clock times found in logs and arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zone {
    #[default]
    Local,
    Utc,
}

impl Zone {
    /// Resolve a wall-clock time to an instant.
    ///
    /// Ambiguous local times (DST fold) take the earliest candidate; times that
    /// fall into a DST gap are moved forward by one hour.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<Instant> {
        match self {
            Zone::Utc => Some(Utc.from_utc_datetime(&naive)),
            Zone::Local => match Local.from_local_datetime(&naive) {
                LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
                LocalResult::None => {
                    let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
                    Local
                        .from_local_datetime(&shifted)
                        .earliest()
                        .map(|dt| dt.with_timezone(&Utc))
                }
            },
        }
    }

    /// Current calendar year in this zone
    pub fn current_year(&self) -> i32 {
        match self {
            Zone::Utc => Utc::now().year(),
            Zone::Local => Local::now().year(),
        }
    }
}

/// A format matcher: takes the leading fields of a line and the fallback year
type Matcher = fn(&[&str], i32) -> Option<NaiveDateTime>;

/// Known line formats, tried in this order
const FORMATS: &[Matcher] = &[syslog_local, iso_datetime, tagged_iso_datetime];

/// rsyslog's traditional format: "Jun  1 12:30:00 host prog: msg".
/// The year is not in the line, so the caller supplies it.
fn syslog_local(fields: &[&str], year: i32) -> Option<NaiveDateTime> {
    let [month, day, clock] = fields.get(0..3)? else {
        return None;
    };
    if month.len() != 3 || !month.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let text = format!("{} {} {} {}", year, month, day, clock);
    NaiveDateTime::parse_from_str(&text, SYSLOG_PATTERN).ok()
}

/// dpkg-style lines: "2023-06-01 12:30:00 status installed ..."
fn iso_datetime(fields: &[&str], _year: i32) -> Option<NaiveDateTime> {
    let [date, clock] = fields.get(0..2)? else {
        return None;
    };
    NaiveDateTime::parse_from_str(&format!("{} {}", date, clock), ISO_PATTERN).ok()
}

/// Same as `iso_datetime`, preceded by a program name or tag token
fn tagged_iso_datetime(fields: &[&str], year: i32) -> Option<NaiveDateTime> {
    iso_datetime(fields.get(1..)?, year)
}

/// Extracts timestamps from raw log lines using an ordered list of formats
#[derive(Debug, Clone, Default)]
pub struct TimestampRecognizer {
    zone: Zone,
}

impl TimestampRecognizer {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    /// Try every known format in order; `None` if none of them match
    pub fn recognize(&self, line: &str, current_year: i32) -> Option<Instant> {
        let naive = self.recognize_naive(line, current_year)?;
        self.zone.resolve(naive)
    }

    /// Like `recognize`, but returns the wall-clock time before zone resolution
    pub fn recognize_naive(&self, line: &str, current_year: i32) -> Option<NaiveDateTime> {
        let fields: Vec<&str> = line.split_whitespace().take(MAX_FIELDS).collect();
        FORMATS
            .iter()
            .find_map(|matcher| matcher(&fields[..], current_year))
    }
}
