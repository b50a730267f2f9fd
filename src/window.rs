// src/window.rs
use chrono::TimeDelta;

use crate::error::ArgumentError;
use crate::timestamp::Instant;

/// Symmetric, inclusive interval of instants around a center point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    center: Instant,
    radius: TimeDelta,
    lower: Instant,
    upper: Instant,
    before_lower: Instant,
}

impl TimeWindow {
    /// Build a window of `radius` on either side of `center`.
    ///
    /// Fails for negative radii and for windows whose bounds (or the instant just
    /// below the lower bound) fall outside the representable range.
    pub fn new(center: Instant, radius: TimeDelta) -> Result<Self, ArgumentError> {
        if radius < TimeDelta::zero() {
            return Err(ArgumentError::WindowOutOfRange(format!(
                "negative radius {}",
                radius
            )));
        }
        let out_of_range =
            || ArgumentError::WindowOutOfRange(format!("{} +/- {}", center, radius));

        let lower = center.checked_sub_signed(radius).ok_or_else(out_of_range)?;
        let upper = center.checked_add_signed(radius).ok_or_else(out_of_range)?;
        let before_lower = lower
            .checked_sub_signed(TimeDelta::seconds(1))
            .ok_or_else(out_of_range)?;

        Ok(TimeWindow {
            center,
            radius,
            lower,
            upper,
            before_lower,
        })
    }

    /// Window with a radius given in (possibly fractional) hours, kept to the millisecond
    pub fn from_hours(center: Instant, hours: f64) -> Result<Self, ArgumentError> {
        Self::new(center, hours_to_delta(hours)?)
    }

    pub fn center(&self) -> Instant {
        self.center
    }

    pub fn radius(&self) -> TimeDelta {
        self.radius
    }

    pub fn lower_bound(&self) -> Instant {
        self.lower
    }

    pub fn upper_bound(&self) -> Instant {
        self.upper
    }

    /// One second before the lower bound; never included
    pub fn before_start(&self) -> Instant {
        self.before_lower
    }

    /// `center - radius <= instant <= center + radius`
    pub fn includes(&self, instant: Instant) -> bool {
        self.lower <= instant && instant <= self.upper
    }
}

/// Convert fractional hours to a `TimeDelta` with millisecond precision
pub fn hours_to_delta(hours: f64) -> Result<TimeDelta, ArgumentError> {
    let invalid = |message: &str| ArgumentError::InvalidSpan {
        value: hours.to_string(),
        message: message.to_string(),
    };

    if !hours.is_finite() {
        return Err(invalid("must be a finite number of hours"));
    }
    if hours < 0.0 {
        return Err(invalid("must not be negative"));
    }

    let millis = (hours * 3_600_000.0).round();
    if millis > i64::MAX as f64 {
        return Err(invalid("too large"));
    }
    TimeDelta::try_milliseconds(millis as i64).ok_or_else(|| invalid("too large"))
}
