//! `xs:duration`, `xs:dayTimeDuration` and `xs:yearMonthDuration`.
//!
//! A duration is held as a sign plus two magnitudes: whole months and
//! seconds (an exact decimal, so fractional seconds never drift). The
//! calendar fields of the canonical form are derived from those magnitudes
//! on demand.

mod lexical;

use crate::decimal::{Decimal, RoundingMode};
use crate::error::{Error, ErrorCode, Result};
use crate::kind::ValueKind;
use core::cmp::Ordering;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationKind {
    Duration,
    DayTime,
    YearMonth,
}

impl DurationKind {
    pub const fn value_kind(self) -> ValueKind {
        match self {
            DurationKind::Duration => ValueKind::Duration,
            DurationKind::DayTime => ValueKind::DayTimeDuration,
            DurationKind::YearMonth => ValueKind::YearMonthDuration,
        }
    }

    pub const fn from_value_kind(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::Duration => Some(DurationKind::Duration),
            ValueKind::DayTimeDuration => Some(DurationKind::DayTime),
            ValueKind::YearMonthDuration => Some(DurationKind::YearMonth),
            _ => None,
        }
    }
}

/// A duration value. Constructed values always carry a value; an absent
/// duration is `Option::<DurationValue>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DurationValue {
    kind: DurationKind,
    negative: bool,
    months: u64,
    /// Non-negative magnitude.
    seconds: Decimal,
}

impl DurationValue {
    /// Build from signed totals. Both totals must agree in sign, and each
    /// restricted kind may only carry its own component.
    pub fn new(kind: DurationKind, total_months: i128, total_seconds: Decimal) -> Result<Self> {
        let value_kind = kind.value_kind();
        match kind {
            DurationKind::DayTime if total_months != 0 => {
                return Err(component_violation(value_kind, "year or month"));
            }
            DurationKind::YearMonth if !total_seconds.is_zero() => {
                return Err(component_violation(value_kind, "day or time"));
            }
            _ => {}
        }
        let months_negative = total_months < 0;
        let seconds_negative = total_seconds.is_negative();
        if total_months != 0 && !total_seconds.is_zero() && months_negative != seconds_negative {
            return Err(Error::invalid_operand(
                "duration",
                "months and seconds of a duration must share one sign",
            )
            .with_operands(&[value_kind]));
        }
        let months = u64::try_from(total_months.unsigned_abs())
            .ok()
            .filter(|m| i64::try_from(*m).is_ok())
            .ok_or_else(|| Error::overflow("duration", "month count out of range").with_operands(&[value_kind]))?;
        let seconds = total_seconds.abs();
        if seconds.trunc().to_i128().is_none_or(|s| i64::try_from(s).is_err()) {
            return Err(Error::overflow("duration", "second count out of range").with_operands(&[value_kind]));
        }
        Ok(Self {
            kind,
            negative: months_negative || seconds_negative,
            months,
            seconds,
        })
    }

    pub fn year_month(total_months: i64) -> Self {
        Self {
            kind: DurationKind::YearMonth,
            negative: total_months < 0,
            months: total_months.unsigned_abs(),
            seconds: Decimal::zero(),
        }
    }

    pub fn day_time(total_seconds: Decimal) -> Result<Self> {
        Self::new(DurationKind::DayTime, 0, total_seconds)
    }

    pub fn day_time_seconds(total_seconds: i64) -> Self {
        Self {
            kind: DurationKind::DayTime,
            negative: total_seconds < 0,
            months: 0,
            seconds: Decimal::from(total_seconds.unsigned_abs()),
        }
    }

    pub fn parse(kind: DurationKind, text: &str) -> Result<Self> {
        lexical::parse(kind, text)
    }

    pub fn kind(&self) -> DurationKind {
        self.kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.seconds.is_zero()
    }

    /// Same magnitudes under another duration kind. Used to widen a
    /// restricted duration to `xs:duration`; narrowing drops the component
    /// the target kind cannot carry.
    pub fn retag(&self, kind: DurationKind) -> Self {
        let (months, seconds) = match kind {
            DurationKind::Duration => (self.months, self.seconds.clone()),
            DurationKind::DayTime => (0, self.seconds.clone()),
            DurationKind::YearMonth => (self.months, Decimal::zero()),
        };
        let negative = self.negative && (months != 0 || !seconds.is_zero());
        Self {
            kind,
            negative,
            months,
            seconds,
        }
    }

    pub fn total_months(&self) -> i64 {
        // the constructor bounds `months` to i64
        let months = i64::try_from(self.months).unwrap_or(i64::MAX);
        if self.negative { -months } else { months }
    }

    pub fn total_seconds(&self) -> Decimal {
        if self.negative { -&self.seconds } else { self.seconds.clone() }
    }

    fn signed(&self, v: i64) -> i64 {
        if self.negative { -v } else { v }
    }

    /// Unsigned `(days, hours, minutes, seconds)` of the canonical form.
    fn day_time_parts(&self) -> (i64, i64, i64, Decimal) {
        let whole = self.seconds.trunc();
        let fraction = &self.seconds - &whole;
        let whole = whole.to_i128().and_then(|w| i64::try_from(w).ok()).unwrap_or(0);
        let seconds = &Decimal::from(whole % 60) + &fraction;
        (whole / 86_400, (whole % 86_400) / 3_600, (whole % 3_600) / 60, seconds)
    }

    pub fn years(&self) -> i64 {
        self.signed(self.total_months().abs() / 12)
    }

    pub fn months(&self) -> i64 {
        self.signed(self.total_months().abs() % 12)
    }

    pub fn days(&self) -> i64 {
        self.signed(self.day_time_parts().0)
    }

    pub fn hours(&self) -> i64 {
        self.signed(self.day_time_parts().1)
    }

    pub fn minutes(&self) -> i64 {
        self.signed(self.day_time_parts().2)
    }

    pub fn seconds(&self) -> Decimal {
        let seconds = self.day_time_parts().3;
        if self.negative { -seconds } else { seconds }
    }

    pub fn negate(&self) -> Self {
        Self {
            negative: !self.negative && !self.is_zero(),
            ..self.clone()
        }
    }

    fn require_same_restricted(&self, other: &Self, op: &'static str) -> Result<DurationKind> {
        match (self.kind, other.kind) {
            (DurationKind::DayTime, DurationKind::DayTime) => Ok(DurationKind::DayTime),
            (DurationKind::YearMonth, DurationKind::YearMonth) => Ok(DurationKind::YearMonth),
            _ => Err(Error::not_applicable(op, &[self.value_kind(), other.value_kind()])),
        }
    }

    fn require_restricted(&self, op: &'static str) -> Result<DurationKind> {
        match self.kind {
            DurationKind::Duration => Err(Error::not_applicable(op, &[self.value_kind()])),
            kind => Ok(kind),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        let kind = self.require_same_restricted(other, "add")?;
        Self::new(
            kind,
            i128::from(self.total_months()) + i128::from(other.total_months()),
            &self.total_seconds() + &other.total_seconds(),
        )
    }

    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate()).map_err(|e| rename(e, "subtract"))
    }

    /// Scale by an exact factor. Year-month results are rounded to whole
    /// months, ties toward positive infinity.
    pub fn multiply(&self, factor: &Decimal) -> Result<Self> {
        let scaled = match self.require_restricted("multiply")? {
            DurationKind::YearMonth => {
                let months = (&Decimal::from(self.total_months()) * factor).round(0, RoundingMode::HalfCeiling);
                let months = months
                    .to_i128()
                    .ok_or_else(|| Error::overflow("multiply", "month count out of range"))?;
                Self::new(DurationKind::YearMonth, months, Decimal::zero())
            }
            _ => Self::new(DurationKind::DayTime, 0, &self.total_seconds() * factor),
        };
        scaled.map_err(|e| e.or_operands(&[self.value_kind(), ValueKind::Decimal]))
    }

    /// Scale by a double, rejecting NaN and infinite factors.
    pub fn multiply_f64(&self, factor: f64) -> Result<Self> {
        self.require_restricted("multiply")?;
        if factor.is_nan() {
            return Err(Error::invalid_operand("multiply", "NaN factor")
                .with_operands(&[self.value_kind(), ValueKind::Double]));
        }
        if factor.is_infinite() {
            return Err(Error::overflow("multiply", "infinite factor")
                .with_operands(&[self.value_kind(), ValueKind::Double]));
        }
        self.multiply(&Decimal::from_f64(factor)?)
    }

    pub fn divide(&self, divisor: &Decimal, precision: u32) -> Result<Self> {
        let kind = self.require_restricted("divide")?;
        if divisor.is_zero() {
            return Err(Error::divide_by_zero("divide").with_operands(&[self.value_kind(), ValueKind::Decimal]));
        }
        let quotient = match kind {
            DurationKind::YearMonth => {
                let months = Decimal::from(self.total_months())
                    .checked_div(divisor, precision)?
                    .round(0, RoundingMode::HalfCeiling);
                let months = months
                    .to_i128()
                    .ok_or_else(|| Error::overflow("divide", "month count out of range"))?;
                Self::new(DurationKind::YearMonth, months, Decimal::zero())
            }
            _ => Self::new(
                DurationKind::DayTime,
                0,
                self.total_seconds().checked_div(divisor, precision)?,
            ),
        };
        quotient.map_err(|e| rename(e, "divide").or_operands(&[self.value_kind(), ValueKind::Decimal]))
    }

    /// Divide by a double: NaN is rejected, zero fails, an infinite divisor
    /// yields a zero duration.
    pub fn divide_f64(&self, divisor: f64, precision: u32) -> Result<Self> {
        let kind = self.require_restricted("divide")?;
        let operands = [self.value_kind(), ValueKind::Double];
        if divisor.is_nan() {
            return Err(Error::invalid_operand("divide", "NaN divisor").with_operands(&operands));
        }
        if divisor == 0.0 {
            return Err(Error::divide_by_zero("divide").with_operands(&operands));
        }
        if divisor.is_infinite() {
            return Self::new(kind, 0, Decimal::zero());
        }
        self.divide(&Decimal::from_f64(divisor)?, precision)
    }

    /// Ratio of two durations of the same restricted kind.
    pub fn divide_by_duration(&self, other: &Self, precision: u32) -> Result<Decimal> {
        let operands = [self.value_kind(), other.value_kind()];
        let (numerator, denominator) = match self.require_same_restricted(other, "divide")? {
            DurationKind::YearMonth => (
                Decimal::from(self.total_months()),
                Decimal::from(other.total_months()),
            ),
            _ => (self.total_seconds(), other.total_seconds()),
        };
        numerator
            .checked_div(&denominator, precision)
            .map_err(|e| rename(e, "divide").or_operands(&operands))
    }

    /// Equality over both magnitudes; defined for every pair of durations of
    /// one kind.
    pub fn equals(&self, other: &Self) -> bool {
        self.total_months() == other.total_months() && self.total_seconds() == other.total_seconds()
    }

    /// Ordering is only defined within one restricted kind.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        match self.require_same_restricted(other, "compare")? {
            DurationKind::YearMonth => Ok(self.total_months().cmp(&other.total_months())),
            _ => Ok(self.total_seconds().cmp(&other.total_seconds())),
        }
    }
}

/// A restricted duration built with a component its kind does not carry.
fn component_violation(kind: ValueKind, component: &str) -> Error {
    Error::new(
        ErrorCode::LexicalConstraint,
        "duration",
        format!("{kind} may not carry a {component} component"),
    )
    .with_operands(&[kind])
}

fn rename(mut err: Error, operation: &'static str) -> Error {
    err.operation = operation;
    err
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        lexical::format(self, f)
    }
}
