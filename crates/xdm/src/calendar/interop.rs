//! Conversions to and from `chrono` types.
//!
//! chrono cannot represent every value of this model (years beyond its
//! range, the fragments), so the outbound direction returns `Option` and is
//! limited to CE years.

use super::{CalendarKind, CalendarValue, Fields};
use crate::decimal::Decimal;
use crate::error::Result;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

fn nanos(fraction: &Decimal) -> u32 {
    (fraction * &Decimal::from(NANOS_PER_SECOND))
        .trunc()
        .to_i128()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
        .min(NANOS_PER_SECOND - 1)
}

fn fraction_from_nanos(nanos: u32) -> Result<Decimal> {
    // chrono encodes a leap second as nanos >= 1e9; XML Schema has none
    let nanos = nanos.min(NANOS_PER_SECOND - 1);
    Decimal::from(nanos).checked_div(&Decimal::from(NANOS_PER_SECOND), 0)
}

fn offset_minutes(offset: &FixedOffset) -> i16 {
    i16::try_from(offset.local_minus_utc() / 60).unwrap_or(0)
}

impl CalendarValue {
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if !matches!(self.kind, CalendarKind::DateTime | CalendarKind::Date) || self.bce {
            return None;
        }
        NaiveDate::from_ymd_opt(
            i32::try_from(self.year).ok()?,
            u32::from(self.month),
            u32::from(self.day),
        )
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if !matches!(self.kind, CalendarKind::DateTime | CalendarKind::Time) {
            return None;
        }
        NaiveTime::from_hms_nano_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            nanos(&self.fraction),
        )
    }

    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        if self.kind != CalendarKind::DateTime {
            return None;
        }
        Some(self.to_naive_date()?.and_time(self.to_naive_time()?))
    }

    /// The dateTime as a chrono timestamp; `None` for naive values.
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::from(self.offset?) * 60)?;
        self.to_naive_date_time()?.and_local_timezone(offset).single()
    }

    pub fn from_naive_date(date: NaiveDate, offset: Option<i16>) -> Result<Self> {
        let fields = Fields {
            year: i64::from(date.year()),
            month: date.month() as u8,
            day: date.day() as u8,
            offset,
            ..Fields::default()
        };
        Self::assemble(CalendarKind::Date, fields)
    }

    pub fn from_naive_time(time: NaiveTime, offset: Option<i16>) -> Result<Self> {
        let fields = Fields {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            fraction: fraction_from_nanos(time.nanosecond())?,
            offset,
            ..Fields::default()
        };
        Self::assemble(CalendarKind::Time, fields)
    }

    pub fn from_naive_date_time(value: NaiveDateTime, offset: Option<i16>) -> Result<Self> {
        let fields = Fields {
            year: i64::from(value.year()),
            month: value.month() as u8,
            day: value.day() as u8,
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            second: value.second() as u8,
            fraction: fraction_from_nanos(value.nanosecond())?,
            offset,
        };
        Self::assemble(CalendarKind::DateTime, fields)
    }

    pub fn from_chrono(value: &DateTime<FixedOffset>) -> Result<Self> {
        Self::from_naive_date_time(value.naive_local(), Some(offset_minutes(value.offset())))
    }
}
