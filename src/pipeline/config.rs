use std::num::NonZeroUsize;

use crate::timestamp::Zone;
use crate::window::TimeWindow;

/// Configuration for pipeline behavior
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub window: TimeWindow,
    pub zone: Zone,
    /// Year assumed for timestamps that don't carry one (syslog)
    pub year: i32,
    pub untimed: UntimedPolicy,
    pub buffer_size: usize,
}

impl PipelineConfig {
    /// Defaults for everything except the window; the year is the current one in `Local`
    pub fn new(window: TimeWindow) -> Self {
        let zone = Zone::default();
        PipelineConfig {
            window,
            zone,
            year: zone.current_year(),
            untimed: UntimedPolicy::default(),
            buffer_size: 65536, // 64KB
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_untimed(mut self, untimed: UntimedPolicy) -> Self {
        self.untimed = untimed;
        self
    }

    /// Capacity of the per-source reader and of the output writer
    pub fn with_buffer_size(mut self, buffer_size: NonZeroUsize) -> Self {
        self.buffer_size = buffer_size.get();
        self
    }
}

/// What to do with lines that carry no recognizable timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UntimedPolicy {
    /// Attribute the line to the last recognized time in the same source
    #[default]
    Inherit,
    /// Never include the line
    Drop,
}
