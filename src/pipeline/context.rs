use serde::Serialize;

use crate::timestamp::{Instant, TimestampRecognizer};
use crate::window::TimeWindow;

/// A log line that fell inside the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub instant: Instant,
    #[serde(rename = "source")]
    pub source_id: String,
    pub text: String,
}

impl LogRecord {
    pub fn new(instant: Instant, source_id: impl Into<String>, text: impl Into<String>) -> Self {
        LogRecord {
            instant,
            source_id: source_id.into(),
            text: text.into(),
        }
    }
}

/// Per-source state carried from one line to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub current_year: i32,
    pub last_good_instant: Instant,
}

impl ParseContext {
    /// Starts just below the window so leading untimed lines can never match
    pub fn new(current_year: i32, window: &TimeWindow) -> Self {
        ParseContext {
            current_year,
            last_good_instant: window.before_start(),
        }
    }
}

/// Time assigned to a line by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTime {
    /// The line carried its own timestamp
    Recognized(Instant),
    /// No timestamp; this is the last recognized time of the source
    Inherited(Instant),
}

impl LineTime {
    pub fn instant(&self) -> Instant {
        match self {
            LineTime::Recognized(instant) | LineTime::Inherited(instant) => *instant,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, LineTime::Recognized(_))
    }
}

/// Assigns a time to every line of one source, falling back to the last
/// recognized time for lines without a timestamp.
pub struct LineTimeTracker<'a> {
    recognizer: &'a TimestampRecognizer,
    context: ParseContext,
}

impl<'a> LineTimeTracker<'a> {
    pub fn new(recognizer: &'a TimestampRecognizer, context: ParseContext) -> Self {
        LineTimeTracker {
            recognizer,
            context,
        }
    }

    pub fn observe(&mut self, line: &str) -> LineTime {
        match self.recognizer.recognize(line, self.context.current_year) {
            Some(instant) => {
                self.context.last_good_instant = instant;
                LineTime::Recognized(instant)
            }
            None => LineTime::Inherited(self.context.last_good_instant),
        }
    }

    pub fn next(&mut self, line: &str) -> Instant {
        self.observe(line).instant()
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }
}

/// Per-source counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub sources_scanned: usize,
    pub lines_read: usize,
    pub lines_recognized: usize,
    pub lines_inherited: usize,
    pub records_included: usize,
}

impl ScanStats {
    pub fn add(&mut self, other: &ScanStats) {
        self.sources_scanned += other.sources_scanned;
        self.lines_read += other.lines_read;
        self.lines_recognized += other.lines_recognized;
        self.lines_inherited += other.lines_inherited;
        self.records_included += other.records_included;
    }
}
