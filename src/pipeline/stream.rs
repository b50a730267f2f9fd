// src/pipeline/stream.rs
use std::io::BufRead;

use crate::error::ProcessingError;
use crate::merge::ChronologicalMerger;
use crate::pipeline::config::{PipelineConfig, UntimedPolicy};
use crate::pipeline::context::{LineTime, LineTimeTracker, LogRecord, ParseContext, ScanStats};
use crate::timestamp::TimestampRecognizer;

/// Scan one source from start to end and return the records inside the window.
///
/// Only depends on its arguments, so sources can be scanned independently and
/// their results appended to a merger in input order.
pub fn scan_source<R: BufRead>(
    mut input: R,
    source_id: &str,
    recognizer: &TimestampRecognizer,
    config: &PipelineConfig,
) -> Result<(Vec<LogRecord>, ScanStats), ProcessingError> {
    let context = ParseContext::new(config.year, &config.window);
    let mut tracker = LineTimeTracker::new(recognizer, context);
    let mut records = Vec::new();
    let mut stats = ScanStats {
        sources_scanned: 1,
        ..ScanStats::default()
    };

    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let read = input
            .read_until(b'\n', &mut buffer)
            .map_err(|source| ProcessingError::ReadError {
                source_id: source_id.to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }
        stats.lines_read += 1;

        // Logs occasionally contain stray non-UTF-8 bytes
        let line = String::from_utf8_lossy(&buffer);

        let line_time = tracker.observe(&line);
        match line_time {
            LineTime::Recognized(_) => stats.lines_recognized += 1,
            LineTime::Inherited(_) => {
                stats.lines_inherited += 1;
                if config.untimed == UntimedPolicy::Drop {
                    continue;
                }
            }
        }

        if config.window.includes(line_time.instant()) {
            records.push(LogRecord::new(line_time.instant(), source_id, line));
        }
    }

    stats.records_included = records.len();
    tracing::debug!(
        source = source_id,
        lines = stats.lines_read,
        recognized = stats.lines_recognized,
        inherited = stats.lines_inherited,
        included = stats.records_included,
        "scanned source"
    );
    Ok((records, stats))
}

/// Main pipeline orchestrator: scans sources one after another and merges the result
pub struct SnapPipeline {
    config: PipelineConfig,
    recognizer: TimestampRecognizer,
    merger: ChronologicalMerger,
    stats: ScanStats,
}

impl SnapPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        SnapPipeline {
            recognizer: TimestampRecognizer::new(config.zone),
            config,
            merger: ChronologicalMerger::new(),
            stats: ScanStats::default(),
        }
    }

    /// Process a single file/stream; each call starts with fresh time context
    pub fn process_source<R: BufRead>(
        &mut self,
        input: R,
        source_id: &str,
    ) -> Result<ScanStats, ProcessingError> {
        let (records, stats) = scan_source(input, source_id, &self.recognizer, &self.config)?;
        self.merger.extend(records);
        self.stats.add(&stats);
        Ok(stats)
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// All collected records in chronological order, plus the totals
    pub fn finish(self) -> (Vec<LogRecord>, ScanStats) {
        (self.merger.finish(), self.stats)
    }
}
