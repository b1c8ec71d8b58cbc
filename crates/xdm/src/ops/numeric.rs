//! Integer-family and decimal arithmetic.
//!
//! Results of integer arithmetic are unbounded `xs:integer`s; `div` on
//! integers yields an `xs:decimal`; `idiv` always yields an `xs:integer`.

use super::ArithOp;
use crate::config::ValueConfig;
use crate::decimal::Decimal;
use crate::error::{Error, Result};
use crate::value::Value;

/// Fixed-width operands widened to `i128`. Products of two `i64`s fit, so
/// only `idiv` and `mod` can fail, and only on a zero divisor.
pub(super) fn native(op: ArithOp, a: i128, b: i128, config: &ValueConfig) -> Result<Value> {
    match op {
        ArithOp::Add => Ok(Value::Integer(Decimal::from(a + b))),
        ArithOp::Subtract => Ok(Value::Integer(Decimal::from(a - b))),
        ArithOp::Multiply => Ok(Value::Integer(Decimal::from(a * b))),
        ArithOp::Divide => Decimal::from(a)
            .checked_div(&Decimal::from(b), config.division_precision)
            .map(Value::Decimal),
        ArithOp::IntegerDivide if b == 0 => Err(Error::divide_by_zero(op.name())),
        ArithOp::IntegerDivide => Ok(Value::Integer(Decimal::from(a / b))),
        ArithOp::Modulo if b == 0 => Err(Error::divide_by_zero(op.name())),
        ArithOp::Modulo => Ok(Value::Integer(Decimal::from(a % b))),
    }
}

pub(super) fn integer(op: ArithOp, a: &Decimal, b: &Decimal, config: &ValueConfig) -> Result<Value> {
    match op {
        ArithOp::Divide => a.checked_div(b, config.division_precision).map(Value::Decimal),
        _ => decimal(op, a, b, config).map(|v| match v {
            Value::Decimal(d) => Value::Integer(d),
            other => other,
        }),
    }
}

pub(super) fn decimal(op: ArithOp, a: &Decimal, b: &Decimal, config: &ValueConfig) -> Result<Value> {
    match op {
        ArithOp::Add => Ok(Value::Decimal(a + b)),
        ArithOp::Subtract => Ok(Value::Decimal(a - b)),
        ArithOp::Multiply => Ok(Value::Decimal(a * b)),
        ArithOp::Divide => a.checked_div(b, config.division_precision).map(Value::Decimal),
        ArithOp::IntegerDivide => a.integer_div(b).map(Value::Integer),
        ArithOp::Modulo => a.rem(b).map(Value::Decimal),
    }
}
