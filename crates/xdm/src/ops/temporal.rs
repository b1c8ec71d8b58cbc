//! Operators on calendar values and durations.
//!
//! Durations are scaled by numbers of any numeric kind: the numeric operand
//! is matched directly, floats and doubles keep their NaN/infinity checks
//! and every other kind is used as an exact decimal factor.

use super::ArithOp;
use crate::config::ValueConfig;
use crate::decimal::Decimal;
use crate::duration::DurationValue;
use crate::error::{Error, Result};
use crate::value::Value;

enum Factor {
    Exact(Decimal),
    Double(f64),
}

fn factor(value: &Value) -> Option<Factor> {
    match value {
        Value::Integer(d) | Value::Decimal(d) => Some(Factor::Exact(d.clone())),
        Value::Float(f) => Some(match Decimal::from_f32(*f) {
            Ok(d) => Factor::Exact(d),
            Err(_) => Factor::Double(f64::from(*f)),
        }),
        Value::Double(f) => Some(Factor::Double(*f)),
        other => other.native_integer().map(|i| Factor::Exact(Decimal::from(i))),
    }
}

fn scale(duration: &DurationValue, by: Factor) -> Result<Value> {
    let product = match by {
        Factor::Exact(d) => duration.multiply(&d),
        Factor::Double(f) => duration.multiply_f64(f),
    };
    product.map(Value::Duration)
}

fn shrink(duration: &DurationValue, by: Factor, config: &ValueConfig) -> Result<Value> {
    let precision = config.division_precision;
    let quotient = match by {
        Factor::Exact(d) => duration.divide(&d, precision),
        Factor::Double(f) => duration.divide_f64(f, precision),
    };
    quotient.map(Value::Duration)
}

pub(super) fn arithmetic(op: ArithOp, left: &Value, right: &Value, config: &ValueConfig) -> Result<Value> {
    let tz = config.implicit_timezone;
    match (op, left, right) {
        (ArithOp::Add, Value::Calendar(c), Value::Duration(d)) | (ArithOp::Add, Value::Duration(d), Value::Calendar(c)) => {
            c.add_duration(d).map(Value::Calendar)
        }
        (ArithOp::Subtract, Value::Calendar(c), Value::Duration(d)) => c.subtract_duration(d).map(Value::Calendar),
        (ArithOp::Subtract, Value::Calendar(a), Value::Calendar(b)) => a.difference(b, tz).map(Value::Duration),
        (ArithOp::Add, Value::Duration(a), Value::Duration(b)) => a.add(b).map(Value::Duration),
        (ArithOp::Subtract, Value::Duration(a), Value::Duration(b)) => a.subtract(b).map(Value::Duration),
        (ArithOp::Divide, Value::Duration(a), Value::Duration(b)) => a
            .divide_by_duration(b, config.division_precision)
            .map(Value::Decimal),
        (ArithOp::Multiply, Value::Duration(d), n) | (ArithOp::Multiply, n, Value::Duration(d)) => match factor(n) {
            Some(by) => scale(d, by),
            None => Err(Error::not_applicable(op.name(), &[left.kind(), right.kind()])),
        },
        (ArithOp::Divide, Value::Duration(d), n) => match factor(n) {
            Some(by) => shrink(d, by, config),
            None => Err(Error::not_applicable(op.name(), &[left.kind(), right.kind()])),
        },
        _ => Err(Error::not_applicable(op.name(), &[left.kind(), right.kind()])),
    }
}
