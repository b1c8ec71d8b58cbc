//! Date arithmetic after XML Schema Part 2, Appendix E.
//!
//! Month shifts work on (year, month) with carry and then pin the day to
//! the last day of the target month. Second shifts go through the
//! elapsed-seconds scale of [`julian`](super::julian), which keeps dates on
//! either side of year zero exact.

use super::julian::{SECONDS_PER_DAY, civil_from_days, days_in_month};
use super::{CalendarKind, CalendarValue, MAX_YEAR};
use crate::decimal::Decimal;
use crate::duration::{DurationKind, DurationValue};
use crate::error::{Error, Result};
use crate::kind::ValueKind;

fn year_in_range(year: i64, kind: ValueKind) -> Result<i64> {
    if (-MAX_YEAR + 1..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(Error::overflow("add", "date arithmetic left the supported year range").with_operands(&[kind]))
    }
}

impl CalendarValue {
    /// Shift a date or dateTime by whole months, pinning the day to the end
    /// of the target month. Time of day and offset are kept.
    pub fn add_months(&self, months: i64) -> Result<Self> {
        if !matches!(self.kind, CalendarKind::DateTime | CalendarKind::Date) {
            return Err(Error::not_applicable("add", &[self.value_kind(), ValueKind::YearMonthDuration]));
        }
        let mut fields = self.fields();
        let total = i128::from(fields.year) * 12 + i128::from(fields.month) - 1 + i128::from(months);
        let year = i64::try_from(total.div_euclid(12)).unwrap_or(i64::MAX);
        fields.year = year_in_range(year, self.value_kind())?;
        fields.month = (total.rem_euclid(12) + 1) as u8;
        fields.day = fields.day.min(days_in_month(fields.year, fields.month));
        Self::assemble(self.kind, fields)
    }

    /// Shift by a signed number of seconds on the elapsed-seconds scale.
    ///
    /// A date is shifted from its midnight and keeps only the date part; a
    /// time wraps around modulo one day.
    pub fn add_seconds(&self, seconds: &Decimal) -> Result<Self> {
        if !self.kind.is_ordered() {
            return Err(Error::not_applicable("add", &[self.value_kind(), ValueKind::DayTimeDuration]));
        }
        let local = &Decimal::from(self.local_seconds()) + &self.fraction;
        let shifted = &local + seconds;
        let whole = shifted.floor();
        let fraction = &shifted - &whole;
        let whole = whole
            .to_i128()
            .ok_or_else(|| Error::overflow("add", "elapsed seconds out of range").with_operands(&[self.value_kind()]))?;
        let day_seconds = i128::from(SECONDS_PER_DAY);
        let (days, second_of_day) = (whole.div_euclid(day_seconds), whole.rem_euclid(day_seconds));

        let mut fields = self.fields();
        if self.kind != CalendarKind::Time {
            let days = i64::try_from(days)
                .map_err(|_| Error::overflow("add", "day count out of range").with_operands(&[self.value_kind()]))?;
            let (year, month, day) = civil_from_days(days);
            fields.year = year_in_range(year, self.value_kind())?;
            fields.month = month;
            fields.day = day;
        }
        // second_of_day < 86400, so every component fits in u8
        fields.hour = (second_of_day / 3_600) as u8;
        fields.minute = (second_of_day % 3_600 / 60) as u8;
        fields.second = (second_of_day % 60) as u8;
        fields.fraction = fraction;
        Self::assemble(self.kind, fields)
    }

    /// `self + duration`: months first, then seconds.
    pub fn add_duration(&self, duration: &DurationValue) -> Result<Self> {
        let operands = [self.value_kind(), duration.value_kind()];
        let applicable = match self.kind {
            CalendarKind::DateTime | CalendarKind::Date => true,
            CalendarKind::Time => duration.kind() == DurationKind::DayTime,
            _ => false,
        };
        if !applicable {
            return Err(Error::not_applicable("add", &operands));
        }
        let months = duration.total_months();
        let seconds = duration.total_seconds();
        let shifted = if months == 0 { Ok(self.clone()) } else { self.add_months(months) };
        let shifted = match shifted {
            Ok(value) if !seconds.is_zero() => value.add_seconds(&seconds),
            other => other,
        };
        shifted.map_err(|e| e.or_operands(&operands))
    }

    pub fn subtract_duration(&self, duration: &DurationValue) -> Result<Self> {
        self.add_duration(&duration.negate()).map_err(|mut e| {
            e.operation = "subtract";
            e
        })
    }

    /// Elapsed time from `other` to `self` as a dayTimeDuration.
    pub fn difference(&self, other: &Self, implicit_offset: i16) -> Result<DurationValue> {
        let operands = [self.value_kind(), other.value_kind()];
        if self.kind != other.kind || !self.kind.is_ordered() {
            return Err(Error::not_applicable("subtract", &operands));
        }
        let seconds = self
            .instant(implicit_offset)
            .seconds_since(&other.instant(implicit_offset));
        DurationValue::day_time(seconds).map_err(|e| e.or_operands(&operands))
    }

    /// Move to another timezone, or strip the timezone with `None`.
    ///
    /// A naive value simply takes the new offset; a value with an offset is
    /// shifted so that it keeps denoting the same instant.
    pub fn adjust_to_timezone(&self, target: Option<i16>) -> Result<Self> {
        if !self.kind.is_ordered() {
            return Err(Error::not_applicable("adjust-to-timezone", &[self.value_kind()]));
        }
        if target.is_some_and(|minutes| minutes.abs() > 14 * 60) {
            return Err(Error::invalid_operand("adjust-to-timezone", "timezone outside -PT14H..PT14H")
                .with_operands(&[self.value_kind(), ValueKind::DayTimeDuration]));
        }
        let mut adjusted = match (self.offset, target) {
            (Some(current), Some(target)) if current != target => {
                let delta = i64::from(target) - i64::from(current);
                self.add_seconds(&Decimal::from(delta * 60))?
            }
            _ => self.clone(),
        };
        adjusted.offset = target;
        Ok(adjusted)
    }
}
