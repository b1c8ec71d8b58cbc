//! Calendar values: `xs:dateTime`, `xs:date`, `xs:time` and the five
//! Gregorian fragments (`xs:gYearMonth`, `xs:gYear`, `xs:gMonthDay`,
//! `xs:gDay`, `xs:gMonth`).
//!
//! Values keep their wall-clock fields as written (year with a BCE flag,
//! month, day, time of day, fractional seconds) plus an optional offset.
//! Equality and ordering never look at those fields directly; both operate
//! on the [`Instant`] the fields resolve to, with naive values resolved
//! against the caller's implicit timezone.

mod arith;
mod interop;
pub mod julian;
mod lexical;

pub use julian::Instant;

use crate::decimal::Decimal;
use crate::duration::DurationValue;
use crate::error::{Error, ErrorCode, Result};
use crate::kind::ValueKind;
use core::cmp::Ordering;
use core::fmt;
use julian::{SECONDS_PER_DAY, civil_from_days, days_from_civil};

/// Largest year magnitude accepted in either era.
pub const MAX_YEAR: i64 = 999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    DateTime,
    Date,
    Time,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
}

impl CalendarKind {
    pub const fn value_kind(self) -> ValueKind {
        match self {
            CalendarKind::DateTime => ValueKind::DateTime,
            CalendarKind::Date => ValueKind::Date,
            CalendarKind::Time => ValueKind::Time,
            CalendarKind::GYearMonth => ValueKind::GYearMonth,
            CalendarKind::GYear => ValueKind::GYear,
            CalendarKind::GMonthDay => ValueKind::GMonthDay,
            CalendarKind::GDay => ValueKind::GDay,
            CalendarKind::GMonth => ValueKind::GMonth,
        }
    }

    pub const fn from_value_kind(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::DateTime => Some(CalendarKind::DateTime),
            ValueKind::Date => Some(CalendarKind::Date),
            ValueKind::Time => Some(CalendarKind::Time),
            ValueKind::GYearMonth => Some(CalendarKind::GYearMonth),
            ValueKind::GYear => Some(CalendarKind::GYear),
            ValueKind::GMonthDay => Some(CalendarKind::GMonthDay),
            ValueKind::GDay => Some(CalendarKind::GDay),
            ValueKind::GMonth => Some(CalendarKind::GMonth),
            _ => None,
        }
    }

    /// Kinds with a total order (`lt`/`gt`); the fragments only support
    /// equality.
    pub const fn is_ordered(self) -> bool {
        matches!(self, CalendarKind::DateTime | CalendarKind::Date | CalendarKind::Time)
    }

    const fn has_year(self) -> bool {
        matches!(
            self,
            CalendarKind::DateTime | CalendarKind::Date | CalendarKind::GYearMonth | CalendarKind::GYear
        )
    }

    const fn has_month(self) -> bool {
        !matches!(self, CalendarKind::Time | CalendarKind::GYear | CalendarKind::GDay)
    }

    const fn has_day(self) -> bool {
        matches!(
            self,
            CalendarKind::DateTime | CalendarKind::Date | CalendarKind::GMonthDay | CalendarKind::GDay
        )
    }

    const fn has_time(self) -> bool {
        matches!(self, CalendarKind::DateTime | CalendarKind::Time)
    }
}

/// Unpacked fields with an astronomical year, used while building values.
#[derive(Debug, Clone, Default)]
pub(crate) struct Fields {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub fraction: Decimal,
    pub offset: Option<i16>,
}

#[derive(Debug, Clone)]
pub struct CalendarValue {
    kind: CalendarKind,
    bce: bool,
    /// Year as written, without sign; 0 for kinds that have no year.
    year: u32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    fraction: Decimal,
    /// Minutes east of UTC.
    offset: Option<i16>,
}

impl CalendarValue {
    /// Validate and pack `fields`; fields the kind does not carry are zeroed.
    pub(crate) fn assemble(kind: CalendarKind, mut fields: Fields) -> Result<Self> {
        if !lexical::validate(kind, &fields) {
            return Err(Error::new(
                ErrorCode::LexicalFormat,
                "construct",
                format!("field out of range for {}", kind.value_kind()),
            )
            .with_operands(&[kind.value_kind()]));
        }
        if fields.hour == 24 {
            fields.hour = 0;
            if kind == CalendarKind::DateTime {
                let next = days_from_civil(fields.year, fields.month, fields.day) + 1;
                let (year, month, day) = civil_from_days(next);
                (fields.year, fields.month, fields.day) = (year, month, day);
                if year > MAX_YEAR {
                    return Err(Error::overflow("construct", "year out of range").with_operands(&[kind.value_kind()]));
                }
            }
        }
        let (bce, year) = if kind.has_year() {
            let year = if fields.year <= 0 { 1 - fields.year } else { fields.year };
            (fields.year <= 0, u32::try_from(year).unwrap_or(u32::MAX))
        } else {
            (false, 0)
        };
        let (hour, minute, second, fraction) = if kind.has_time() {
            (fields.hour, fields.minute, fields.second, fields.fraction)
        } else {
            (0, 0, 0, Decimal::zero())
        };
        Ok(Self {
            kind,
            bce,
            year,
            month: if kind.has_month() { fields.month } else { 0 },
            day: if kind.has_day() { fields.day } else { 0 },
            hour,
            minute,
            second,
            fraction,
            offset: fields.offset,
        })
    }

    pub(crate) fn fields(&self) -> Fields {
        Fields {
            year: self.astronomical_year(),
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            fraction: self.fraction.clone(),
            offset: self.offset,
        }
    }

    pub fn parse(kind: CalendarKind, text: &str) -> Result<Self> {
        lexical::parse(kind, text)
    }

    /// An `xs:date`. `year` is the signed lexical year: `-1` is 1 BCE and
    /// there is no year zero.
    pub fn date(year: i64, month: u8, day: u8, offset: Option<i16>) -> Result<Self> {
        let fields = Fields {
            year: astronomical(year, CalendarKind::Date)?,
            month,
            day,
            offset,
            ..Fields::default()
        };
        Self::assemble(CalendarKind::Date, fields)
    }

    pub fn date_time(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        seconds: &Decimal,
        offset: Option<i16>,
    ) -> Result<Self> {
        let (second, fraction) = split_seconds(seconds, CalendarKind::DateTime)?;
        let fields = Fields {
            year: astronomical(year, CalendarKind::DateTime)?,
            month,
            day,
            hour,
            minute,
            second,
            fraction,
            offset,
        };
        Self::assemble(CalendarKind::DateTime, fields)
    }

    pub fn time(hour: u8, minute: u8, seconds: &Decimal, offset: Option<i16>) -> Result<Self> {
        let (second, fraction) = split_seconds(seconds, CalendarKind::Time)?;
        let fields = Fields {
            hour,
            minute,
            second,
            fraction,
            offset,
            ..Fields::default()
        };
        Self::assemble(CalendarKind::Time, fields)
    }

    /// Combine a date and a time into a dateTime. The two offsets must agree
    /// when both are present.
    pub fn from_date_and_time(date: &CalendarValue, time: &CalendarValue) -> Result<Self> {
        if date.kind != CalendarKind::Date || time.kind != CalendarKind::Time {
            return Err(Error::not_applicable("dateTime", &[date.value_kind(), time.value_kind()]));
        }
        let offset = match (date.offset, time.offset) {
            (Some(a), Some(b)) if a != b => {
                return Err(Error::invalid_operand("dateTime", "date and time carry different timezones")
                    .with_operands(&[ValueKind::Date, ValueKind::Time]));
            }
            (a, b) => a.or(b),
        };
        let mut fields = date.fields();
        fields.hour = time.hour;
        fields.minute = time.minute;
        fields.second = time.second;
        fields.fraction = time.fraction.clone();
        fields.offset = offset;
        Self::assemble(CalendarKind::DateTime, fields)
    }

    pub fn kind(&self) -> CalendarKind {
        self.kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    /// Year with astronomical numbering (1 BCE is 0).
    pub(crate) fn astronomical_year(&self) -> i64 {
        let year = i64::from(self.year);
        if self.bce { 1 - year } else { year }
    }

    pub fn is_bce(&self) -> bool {
        self.bce
    }

    /// Signed lexical year (1 BCE is -1).
    pub fn year(&self) -> Option<i64> {
        let year = i64::from(self.year);
        self.kind.has_year().then_some(if self.bce { -year } else { year })
    }

    pub fn month(&self) -> Option<u8> {
        self.kind.has_month().then_some(self.month)
    }

    pub fn day(&self) -> Option<u8> {
        self.kind.has_day().then_some(self.day)
    }

    pub fn hours(&self) -> Option<u8> {
        self.kind.has_time().then_some(self.hour)
    }

    pub fn minutes(&self) -> Option<u8> {
        self.kind.has_time().then_some(self.minute)
    }

    /// Seconds including the fractional part.
    pub fn seconds(&self) -> Option<Decimal> {
        self.kind
            .has_time()
            .then(|| &Decimal::from(self.second) + &self.fraction)
    }

    pub fn offset_minutes(&self) -> Option<i16> {
        self.offset
    }

    /// Offset as a dayTimeDuration, `None` for naive values.
    pub fn timezone(&self) -> Option<DurationValue> {
        self.offset
            .map(|minutes| DurationValue::day_time_seconds(i64::from(minutes) * 60))
    }

    /// Date the fields resolve to, filling the reference date 1972-12-31
    /// for kinds that do not carry a full date.
    fn reference_date(&self) -> (i64, u8, u8) {
        match self.kind {
            CalendarKind::DateTime | CalendarKind::Date => (self.astronomical_year(), self.month, self.day),
            CalendarKind::Time => (1972, 12, 31),
            CalendarKind::GYearMonth => (self.astronomical_year(), self.month, 1),
            CalendarKind::GYear => (self.astronomical_year(), 1, 1),
            CalendarKind::GMonthDay => (1972, self.month, self.day),
            CalendarKind::GDay => (1972, 12, self.day),
            CalendarKind::GMonth => (1972, self.month, 1),
        }
    }

    /// Whole seconds since the epoch of the wall-clock fields, ignoring the
    /// offset.
    pub(crate) fn local_seconds(&self) -> i128 {
        let (year, month, day) = self.reference_date();
        i128::from(days_from_civil(year, month, day)) * i128::from(SECONDS_PER_DAY)
            + i128::from(self.hour) * 3_600
            + i128::from(self.minute) * 60
            + i128::from(self.second)
    }

    /// The point on the time line this value denotes; naive values are
    /// read in `implicit_offset` (minutes east of UTC).
    pub fn instant(&self, implicit_offset: i16) -> Instant {
        let offset = self.offset.unwrap_or(implicit_offset);
        Instant::new(
            self.local_seconds() - i128::from(offset) * 60,
            self.fraction.clone(),
        )
    }

    fn require_same_kind(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.kind == other.kind {
            Ok(())
        } else {
            Err(Error::not_applicable(op, &[self.value_kind(), other.value_kind()]))
        }
    }

    pub fn equals(&self, other: &Self, implicit_offset: i16) -> Result<bool> {
        self.require_same_kind(other, "eq")?;
        Ok(self.instant(implicit_offset) == other.instant(implicit_offset))
    }

    pub fn compare(&self, other: &Self, implicit_offset: i16) -> Result<Ordering> {
        self.require_same_kind(other, "compare")?;
        if !self.kind.is_ordered() {
            return Err(Error::not_applicable("compare", &[self.value_kind(), other.value_kind()]));
        }
        Ok(self.instant(implicit_offset).cmp(&other.instant(implicit_offset)))
    }

    /// Project onto another calendar kind, zeroing the fields the target
    /// does not carry and keeping sign and offset. The source must carry
    /// every field the target needs.
    pub fn project(&self, target: CalendarKind) -> Result<Self> {
        let supported = match self.kind {
            CalendarKind::DateTime => true,
            CalendarKind::Date => target != CalendarKind::Time && target != CalendarKind::DateTime,
            source => source == target,
        };
        if !supported {
            return Err(Error::not_applicable("project", &[self.value_kind(), target.value_kind()]));
        }
        Self::assemble(target, self.fields())
    }

    /// The date part of a dateTime.
    pub fn to_date(&self) -> Result<Self> {
        self.project(CalendarKind::Date)
    }

    /// The time part of a dateTime.
    pub fn to_time(&self) -> Result<Self> {
        self.project(CalendarKind::Time)
    }
}

fn astronomical(year: i64, kind: CalendarKind) -> Result<i64> {
    match year {
        0 => Err(Error::new(ErrorCode::LexicalFormat, "construct", "there is no year zero")
            .with_operands(&[kind.value_kind()])),
        y if y < 0 => Ok(y + 1),
        y => Ok(y),
    }
}

fn split_seconds(seconds: &Decimal, kind: CalendarKind) -> Result<(u8, Decimal)> {
    let whole = seconds.trunc();
    let second = whole
        .to_i128()
        .and_then(|s| u8::try_from(s).ok())
        .filter(|_| !seconds.is_negative())
        .ok_or_else(|| {
            Error::new(ErrorCode::LexicalFormat, "construct", format!("invalid seconds value {seconds}"))
                .with_operands(&[kind.value_kind()])
        })?;
    Ok((second, seconds - &whole))
}

impl fmt::Display for CalendarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        lexical::format(self, f)
    }
}
