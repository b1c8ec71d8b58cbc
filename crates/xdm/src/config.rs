use crate::decimal::{MAX_DIVISION_PRECISION, MIN_DIVISION_PRECISION};
use tracing::debug;

/// Settings that influence how values are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueConfig {
    /// Offset, in minutes east of UTC, assumed for calendar values written
    /// without a timezone.
    pub implicit_timezone: i16,
    /// Significant digits computed by decimal division before truncation.
    pub division_precision: u32,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            implicit_timezone: 0,
            division_precision: MIN_DIVISION_PRECISION,
        }
    }
}

impl ValueConfig {
    /// Set the implicit timezone. Offsets beyond ±14:00 do not exist; such
    /// an offset is ignored and the previous value is kept.
    pub fn with_implicit_timezone(mut self, offset_minutes: i16) -> Self {
        if offset_minutes.unsigned_abs() <= 14 * 60 {
            self.implicit_timezone = offset_minutes;
        } else {
            debug!(
                offset_minutes,
                kept = self.implicit_timezone,
                "implicit timezone out of range, keeping previous offset"
            );
        }
        self
    }

    /// Set the division precision, clamped to
    /// [`MIN_DIVISION_PRECISION`]..=[`MAX_DIVISION_PRECISION`].
    pub fn with_division_precision(mut self, digits: u32) -> Self {
        self.division_precision = digits.clamp(MIN_DIVISION_PRECISION, MAX_DIVISION_PRECISION);
        self
    }

    pub fn implicit_offset(&self) -> Option<chrono::FixedOffset> {
        chrono::FixedOffset::east_opt(i32::from(self.implicit_timezone) * 60)
    }
}
