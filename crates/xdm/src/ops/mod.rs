//! Per-kind operator bodies.
//!
//! The functions here run after coercion: both operands either share one
//! kind or form a pair the coercion table hands over directly (a calendar
//! value with a duration, a duration with a number). Each body matches
//! exhaustively over [`Value`], so an operator a kind does not define fails
//! with `OperatorNotApplicable` instead of being silently skipped.

mod float;
mod numeric;
mod scalar;
mod temporal;

pub(crate) use float::{double_eq, float_eq};

use crate::config::ValueConfig;
use crate::decimal::Decimal;
use crate::duration::DurationKind;
use crate::error::{Error, Result};
use crate::kind::ValueKind;
use crate::value::Value;
use core::cmp::Ordering;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulo,
}

impl ArithOp {
    pub const fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Subtract => "subtract",
            ArithOp::Multiply => "multiply",
            ArithOp::Divide => "div",
            ArithOp::IntegerDivide => "idiv",
            ArithOp::Modulo => "mod",
        }
    }
}

/// Unary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub const fn name(self) -> &'static str {
        match self {
            UnaryOp::Plus => "unary-plus",
            UnaryOp::Minus => "negate",
        }
    }
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

impl ValueKind {
    /// Convert `value` into this kind along the promotion lattice.
    /// Promotion only ever widens.
    pub fn promote_from(self, value: &Value) -> Result<Value> {
        if value.kind() == self {
            return Ok(value.clone());
        }
        let promoted = match (self, value) {
            (ValueKind::Short, Value::Byte(v)) => Some(Value::Short(i16::from(*v))),
            (ValueKind::Int, Value::Byte(v)) => Some(Value::Int(i32::from(*v))),
            (ValueKind::Int, Value::Short(v)) => Some(Value::Int(i32::from(*v))),
            (ValueKind::Long, Value::Byte(v)) => Some(Value::Long(i64::from(*v))),
            (ValueKind::Long, Value::Short(v)) => Some(Value::Long(i64::from(*v))),
            (ValueKind::Long, Value::Int(v)) => Some(Value::Long(i64::from(*v))),
            (ValueKind::Integer, v) => v.native_integer().map(|i| Value::Integer(Decimal::from(i))),
            (ValueKind::Decimal, Value::Integer(d)) => Some(Value::Decimal(d.clone())),
            (ValueKind::Decimal, v) => v.native_integer().map(|i| Value::Decimal(Decimal::from(i))),
            (ValueKind::Float, Value::Integer(d) | Value::Decimal(d)) => Some(Value::Float(d.to_f32())),
            (ValueKind::Float, v) => v.native_integer().map(|i| Value::Float(i as f32)),
            (ValueKind::Double, Value::Float(f)) => Some(Value::Double(f64::from(*f))),
            (ValueKind::Double, Value::Integer(d) | Value::Decimal(d)) => Some(Value::Double(d.to_f64())),
            (ValueKind::Double, v) => v.native_integer().map(|i| Value::Double(i as f64)),
            (ValueKind::Duration, Value::Duration(d)) => Some(Value::Duration(d.retag(DurationKind::Duration))),
            _ => None,
        };
        promoted.ok_or_else(|| Error::not_applicable("promote", &[value.kind(), self]))
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub(crate) fn arithmetic(op: ArithOp, left: &Value, right: &Value, config: &ValueConfig) -> Result<Value> {
    let operands = [left.kind(), right.kind()];
    let result = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => numeric::integer(op, a, b, config),
        (Value::Decimal(a), Value::Decimal(b)) => numeric::decimal(op, a, b, config),
        (Value::Float(a), Value::Float(b)) => float::float(op, *a, *b),
        (Value::Double(a), Value::Double(b)) => float::double(op, *a, *b),
        (Value::Duration(_) | Value::Calendar(_), _) | (_, Value::Duration(_) | Value::Calendar(_)) => {
            temporal::arithmetic(op, left, right, config)
        }
        (Value::Boolean(_) | Value::String(_) | Value::QName(_), _) => Err(Error::not_applicable(op.name(), &operands)),
        _ => match (left.native_integer(), right.native_integer()) {
            (Some(a), Some(b)) if left.kind() == right.kind() => numeric::native(op, a, b, config),
            _ => Err(Error::not_applicable(op.name(), &operands)),
        },
    };
    result.map_err(|e| e.or_operands(&operands))
}

pub(crate) fn unary(op: UnaryOp, value: &Value) -> Result<Value> {
    match op {
        UnaryOp::Minus => negate(value),
        UnaryOp::Plus if value.is_numeric() => Ok(value.clone()),
        UnaryOp::Plus => Err(Error::not_applicable(op.name(), &[value.kind()])),
    }
}

fn negate(value: &Value) -> Result<Value> {
    match value {
        Value::Integer(d) => Ok(Value::Integer(-d)),
        Value::Decimal(d) => Ok(Value::Decimal(-d)),
        Value::Float(f) => Ok(Value::Float(-f)),
        Value::Double(f) => Ok(Value::Double(-f)),
        Value::Duration(d) => Ok(Value::Duration(d.negate())),
        Value::Byte(_) | Value::Short(_) | Value::Int(_) | Value::Long(_) => {
            let v = value.native_integer().unwrap_or_default();
            Ok(Value::Integer(Decimal::from(-v)))
        }
        Value::Boolean(_) | Value::String(_) | Value::QName(_) | Value::Calendar(_) => {
            Err(Error::not_applicable("negate", &[value.kind()]))
        }
    }
}

pub(crate) fn equal(left: &Value, right: &Value, config: &ValueConfig) -> Result<bool> {
    let operands = [left.kind(), right.kind()];
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) | (Value::Decimal(a), Value::Decimal(b)) => Ok(a == b),
        (Value::Float(a), Value::Float(b)) => Ok(float_eq(*a, *b)),
        (Value::Double(a), Value::Double(b)) => Ok(double_eq(*a, *b)),
        (Value::Duration(a), Value::Duration(b)) if a.kind() == b.kind() => Ok(a.equals(b)),
        (Value::Calendar(a), Value::Calendar(b)) => a
            .equals(b, config.implicit_timezone)
            .map_err(|e| rename(e, "eq")),
        (Value::Boolean(_) | Value::String(_) | Value::QName(_), _) => scalar::equal(left, right),
        _ => match (left.native_integer(), right.native_integer()) {
            (Some(a), Some(b)) if left.kind() == right.kind() => Ok(a == b),
            _ => Err(Error::not_applicable("eq", &operands)),
        },
    }
}

/// Ordering of two coerced operands; `None` when a NaN is involved.
pub(crate) fn order(left: &Value, right: &Value, config: &ValueConfig) -> Result<Option<Ordering>> {
    let operands = [left.kind(), right.kind()];
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) | (Value::Decimal(a), Value::Decimal(b)) => Ok(Some(a.cmp(b))),
        (Value::Float(a), Value::Float(b)) => Ok(float::float_cmp(*a, *b)),
        (Value::Double(a), Value::Double(b)) => Ok(float::double_cmp(*a, *b)),
        (Value::Duration(a), Value::Duration(b)) => a.compare(b).map(Some).map_err(|e| rename(e, "compare")),
        (Value::Calendar(a), Value::Calendar(b)) => a.compare(b, config.implicit_timezone).map(Some),
        (Value::Boolean(_) | Value::String(_) | Value::QName(_), _) => scalar::order(left, right).map(Some),
        _ => match (left.native_integer(), right.native_integer()) {
            (Some(a), Some(b)) if left.kind() == right.kind() => Ok(Some(a.cmp(&b))),
            _ => Err(Error::not_applicable("compare", &operands)),
        },
    }
}

fn rename(mut err: Error, operation: &'static str) -> Error {
    err.operation = operation;
    err
}
