//! Tagged atomic values.

mod lexical;
mod project;
mod qname;

pub use qname::QName;

use crate::calendar::{CalendarKind, CalendarValue};
use crate::decimal::Decimal;
use crate::duration::{DurationKind, DurationValue};
use crate::error::Result;
use crate::kind::ValueKind;
use compact_str::CompactString;
use core::fmt;

/// An immutable atomic value. Every operator returns a new `Value`.
///
/// `xs:integer` is unbounded and shares the decimal engine; the fixed-width
/// integer kinds keep native storage.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    String(CompactString),
    QName(QName),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    /// Always a whole number.
    Integer(Decimal),
    Decimal(Decimal),
    Float(f32),
    Double(f64),
    Duration(DurationValue),
    Calendar(CalendarValue),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::QName(_) => ValueKind::QName,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Integer(_) => ValueKind::Integer,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Duration(d) => d.value_kind(),
            Value::Calendar(c) => c.value_kind(),
        }
    }

    /// An `xs:integer`; fractional input is truncated toward zero.
    pub fn integer(v: impl Into<Decimal>) -> Self {
        Value::Integer(v.into().trunc())
    }

    pub fn string(s: impl Into<CompactString>) -> Self {
        Value::String(s.into())
    }

    /// Build a value of `kind` from its lexical form.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self> {
        if let Some(kind) = DurationKind::from_value_kind(kind) {
            return DurationValue::parse(kind, text).map(Value::Duration);
        }
        if let Some(kind) = CalendarKind::from_value_kind(kind) {
            return CalendarValue::parse(kind, text).map(Value::Calendar);
        }
        lexical::parse_scalar(kind, text)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// True for a float or double NaN.
    pub fn is_nan(&self) -> bool {
        match self {
            Value::Float(f) => f.is_nan(),
            Value::Double(d) => d.is_nan(),
            _ => false,
        }
    }

    /// Fixed-width integer payload widened to `i128`.
    pub(crate) fn native_integer(&self) -> Option<i128> {
        match self {
            Value::Byte(v) => Some(i128::from(*v)),
            Value::Short(v) => Some(i128::from(*v)),
            Value::Int(v) => Some(i128::from(*v)),
            Value::Long(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::Integer(Decimal::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(CompactString::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(CompactString::from(v))
    }
}

impl From<CompactString> for Value {
    fn from(v: CompactString) -> Self {
        Value::String(v)
    }
}

impl From<QName> for Value {
    fn from(v: QName) -> Self {
        Value::QName(v)
    }
}

impl From<DurationValue> for Value {
    fn from(v: DurationValue) -> Self {
        Value::Duration(v)
    }
}

impl From<CalendarValue> for Value {
    fn from(v: CalendarValue) -> Self {
        Value::Calendar(v)
    }
}

/// Canonical lexical form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
            Value::QName(q) => write!(f, "{q}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Integer(v) | Value::Decimal(v) => write!(f, "{v}"),
            Value::Float(v) => f.write_str(&lexical::format_float(*v)),
            Value::Double(v) => f.write_str(&lexical::format_double(*v)),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Calendar(c) => write!(f, "{c}"),
        }
    }
}
