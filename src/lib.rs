// src/lib.rs
pub mod error;
pub mod merge;
pub mod output_format;
pub mod pipeline;
pub mod sources;
pub mod target;
pub mod timestamp;
pub mod window;

pub use error::*;
pub use pipeline::*;

pub use merge::ChronologicalMerger;
pub use output_format::{write_records, OutputFormat};
pub use sources::{resolve_sources, SkipReason, Source, SourceSet, DEFAULT_LOG_FILES};
pub use timestamp::{Instant, TimestampRecognizer, Zone};
pub use window::TimeWindow;
