//! `xs:float` and `xs:double` operators.
//!
//! Arithmetic is IEEE 754: division by zero yields an infinity and `mod`
//! yields NaN for a zero or non-finite operand. Only `idiv`, whose result is
//! an `xs:integer`, rejects those operands.
//!
//! Equality is not bit equality. Finite operands whose shortest decimal
//! form needs more digits than the format reliably carries are compared on
//! their decimal expansions rounded to that many digits, so that results of
//! inexact arithmetic still equal the literal they approximate.

use super::ArithOp;
use crate::decimal::{Decimal, RoundingMode};
use crate::error::{Error, Result};
use crate::kind::ValueKind;
use crate::value::Value;
use core::cmp::Ordering;

/// Largest magnitudes below which every integer is representable.
const DOUBLE_EXACT: f64 = 9_007_199_254_740_992.0;
const FLOAT_EXACT: f32 = 16_777_216.0;

pub(super) fn double(op: ArithOp, a: f64, b: f64) -> Result<Value> {
    match op {
        ArithOp::Add => Ok(Value::Double(a + b)),
        ArithOp::Subtract => Ok(Value::Double(a - b)),
        ArithOp::Multiply => Ok(Value::Double(a * b)),
        ArithOp::Divide => Ok(Value::Double(a / b)),
        ArithOp::Modulo => Ok(Value::Double(a % b)),
        ArithOp::IntegerDivide => integer_divide(a, b, ValueKind::Double),
    }
}

pub(super) fn float(op: ArithOp, a: f32, b: f32) -> Result<Value> {
    match op {
        ArithOp::Add => Ok(Value::Float(a + b)),
        ArithOp::Subtract => Ok(Value::Float(a - b)),
        ArithOp::Multiply => Ok(Value::Float(a * b)),
        ArithOp::Divide => Ok(Value::Float(a / b)),
        ArithOp::Modulo => Ok(Value::Float(a % b)),
        ArithOp::IntegerDivide => integer_divide(f64::from(a), f64::from(b), ValueKind::Float),
    }
}

fn integer_divide(a: f64, b: f64, kind: ValueKind) -> Result<Value> {
    if b == 0.0 {
        return Err(Error::divide_by_zero("idiv"));
    }
    if a.is_nan() || b.is_nan() || a.is_infinite() {
        return Err(Error::invalid_operand("idiv", format!("{kind} operand is NaN or infinite")));
    }
    let quotient = (a / b).trunc();
    if !quotient.is_finite() {
        return Err(Error::overflow("idiv", format!("{kind} quotient exceeds the {kind} range")));
    }
    // a finite dividend over an infinite divisor is 0; -0 becomes 0
    Decimal::from_f64(quotient + 0.0).map(Value::Integer)
}

/// Compare finite values at a common decimal length of at most `digits`
/// significant digits.
fn decimal_eq(a: &Decimal, b: &Decimal, digits: u32) -> bool {
    let longest = a.significant_digits().max(b.significant_digits());
    if longest <= digits {
        return a == b;
    }
    a.round_significant(digits, RoundingMode::HalfEven) == b.round_significant(digits, RoundingMode::HalfEven)
}

pub(crate) fn double_eq(a: f64, b: f64) -> bool {
    if !a.is_finite() || !b.is_finite() || a == b {
        return a == b;
    }
    // integral values inside the exactly representable range compare natively
    if a.fract() == 0.0 && b.fract() == 0.0 && a.abs() <= DOUBLE_EXACT && b.abs() <= DOUBLE_EXACT {
        return false;
    }
    match (Decimal::from_f64(a), Decimal::from_f64(b)) {
        (Ok(x), Ok(y)) => decimal_eq(&x, &y, f64::DIGITS),
        _ => false,
    }
}

pub(crate) fn float_eq(a: f32, b: f32) -> bool {
    if !a.is_finite() || !b.is_finite() || a == b {
        return a == b;
    }
    if a.fract() == 0.0 && b.fract() == 0.0 && a.abs() <= FLOAT_EXACT && b.abs() <= FLOAT_EXACT {
        return false;
    }
    match (Decimal::from_f32(a), Decimal::from_f32(b)) {
        (Ok(x), Ok(y)) => decimal_eq(&x, &y, f32::DIGITS),
        _ => false,
    }
}

pub(super) fn double_cmp(a: f64, b: f64) -> Option<Ordering> {
    if double_eq(a, b) { Some(Ordering::Equal) } else { a.partial_cmp(&b) }
}

pub(super) fn float_cmp(a: f32, b: f32) -> Option<Ordering> {
    if float_eq(a, b) { Some(Ordering::Equal) } else { a.partial_cmp(&b) }
}
