use std::io::{self, Write};

use crate::error::ProcessingError;
use crate::pipeline::context::LogRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "line", help = "\"<source>: <line>\" text output")]
    Line,
    #[value(name = "jsonl", help = "JSON Lines format (one JSON object per line)")]
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(OutputFormat::Line),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl OutputFormat {
    pub fn format_record(&self, record: &LogRecord) -> Result<String, ProcessingError> {
        match self {
            OutputFormat::Line => Ok(format!("{}: {}", record.source_id, record.text)),
            OutputFormat::Jsonl => Ok(serde_json::to_string(record)?),
        }
    }
}

/// Write records in order. A closed pipe on the reading side ends output quietly.
///
/// Returns the number of records written.
pub fn write_records<W: Write>(
    output: &mut W,
    records: &[LogRecord],
    format: OutputFormat,
) -> Result<usize, ProcessingError> {
    let mut written = 0;
    for record in records {
        let line = format.format_record(record)?;
        match writeln!(output, "{}", line) {
            Ok(()) => written += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(written),
            Err(e) => return Err(ProcessingError::WriteError(e)),
        }
    }
    match output.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(ProcessingError::WriteError(e)),
        _ => Ok(written),
    }
}
