// src/pipeline.rs
pub mod config;
pub mod context;
pub mod stream;

pub use config::{PipelineConfig, UntimedPolicy};
pub use context::{LineTime, LineTimeTracker, LogRecord, ParseContext, ScanStats};
pub use stream::{scan_source, SnapPipeline};
