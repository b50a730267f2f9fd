// src/merge.rs
use crate::pipeline::context::LogRecord;

/// Collects records from every source and orders them by time.
///
/// The final sort is stable and keyed only on the instant, so records with
/// equal instants keep the order they were pushed in.
#[derive(Debug, Default)]
pub struct ChronologicalMerger {
    records: Vec<LogRecord>,
}

impl ChronologicalMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    /// Append one source's records; call in source input order
    pub fn extend<I: IntoIterator<Item = LogRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(mut self) -> Vec<LogRecord> {
        self.records.sort_by_key(|record| record.instant);
        self.records
    }
}
