//! Projections of values onto native primitives, for callers that
//! materialize results outside the value model.

use super::lexical::{parse_double, parse_float, parse_integer};
use super::Value;
use crate::decimal::Decimal;
use crate::error::{Error, Result};
use crate::kind::ValueKind;

impl Value {
    pub fn to_double(&self) -> Result<f64> {
        match self {
            Value::Double(v) => Ok(*v),
            Value::Float(v) => Ok(f64::from(*v)),
            Value::Integer(v) | Value::Decimal(v) => Ok(v.to_f64()),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => parse_double(s),
            other => match other.native_integer() {
                // i64 -> f64 rounds to nearest, the same as a cast from text
                Some(v) => Ok(v as f64),
                None => Err(Error::not_applicable("to-double", &[other.kind()])),
            },
        }
    }

    pub fn to_float(&self) -> Result<f32> {
        match self {
            Value::Float(v) => Ok(*v),
            Value::Double(v) => Ok(*v as f32),
            Value::Integer(v) | Value::Decimal(v) => Ok(v.to_f32()),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => parse_float(s),
            other => match other.native_integer() {
                Some(v) => Ok(v as f32),
                None => Err(Error::not_applicable("to-float", &[other.kind()])),
            },
        }
    }

    /// Exact decimal image; NaN and the infinities have none.
    pub fn to_decimal(&self) -> Result<Decimal> {
        match self {
            Value::Integer(v) | Value::Decimal(v) => Ok(v.clone()),
            Value::Float(v) => Decimal::from_f32(*v),
            Value::Double(v) => Decimal::from_f64(*v),
            Value::Boolean(b) => Ok(Decimal::from(u8::from(*b))),
            Value::String(s) => Decimal::parse(s),
            other => other
                .native_integer()
                .map(Decimal::from)
                .ok_or_else(|| Error::not_applicable("to-decimal", &[other.kind()])),
        }
    }

    /// Whole-number value, truncated toward zero.
    pub fn to_integer(&self) -> Result<Decimal> {
        match self {
            Value::String(s) => parse_integer(ValueKind::Integer, s),
            other => other.to_decimal().map(|d| d.trunc()),
        }
    }

    pub fn to_long(&self) -> Result<i64> {
        self.narrow("to-long", ValueKind::Long)
    }

    pub fn to_int(&self) -> Result<i32> {
        self.narrow("to-int", ValueKind::Int)
    }

    fn narrow<T: TryFrom<i128>>(&self, operation: &'static str, target: ValueKind) -> Result<T> {
        let whole = self.to_integer().map_err(|e| e.or_operands(&[self.kind(), target]))?;
        whole
            .to_i128()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| {
                Error::overflow(operation, format!("{whole} does not fit in {target}")).with_operands(&[self.kind(), target])
            })
    }

    /// Canonical decimal text of a numeric value.
    pub fn to_decimal_text(&self) -> Result<String> {
        self.to_decimal().map(|d| d.to_string())
    }

    /// Truth value: booleans as they are, strings when non-empty, numbers
    /// when non-zero and not NaN.
    pub fn to_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Integer(v) | Value::Decimal(v) => Ok(!v.is_zero()),
            Value::Float(v) => Ok(*v != 0.0 && !v.is_nan()),
            Value::Double(v) => Ok(*v != 0.0 && !v.is_nan()),
            other => other
                .native_integer()
                .map(|v| v != 0)
                .ok_or_else(|| Error::not_applicable("to-boolean", &[other.kind()])),
        }
    }
}
