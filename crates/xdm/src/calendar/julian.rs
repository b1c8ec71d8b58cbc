//! Proleptic Gregorian day arithmetic on astronomical years.
//!
//! Year 0 is 1 BCE, year -1 is 2 BCE and so on. All conversions use
//! Euclidean division so they stay exact on both sides of the epoch without
//! any help from a host date library.

use crate::decimal::Decimal;

/// Julian day number of 1970-01-01.
pub const UNIX_EPOCH_JDN: i64 = 2_440_588;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

pub fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
pub fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

pub fn julian_day_number(year: i64, month: u8, day: u8) -> i64 {
    days_from_civil(year, month, day) + UNIX_EPOCH_JDN
}

/// A point on the absolute time line: whole seconds since
/// 1970-01-01T00:00:00Z plus a fraction in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instant {
    pub seconds: i128,
    pub fraction: Decimal,
}

impl Instant {
    pub fn new(seconds: i128, fraction: Decimal) -> Self {
        Self { seconds, fraction }
    }

    /// Seconds elapsed from `earlier` to `self`, as an exact decimal.
    pub fn seconds_since(&self, earlier: &Instant) -> Decimal {
        let whole = Decimal::from(self.seconds - earlier.seconds);
        &(&whole + &self.fraction) - &earlier.fraction
    }
}
