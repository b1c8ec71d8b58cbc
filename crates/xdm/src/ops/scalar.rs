//! Booleans, strings and qualified names.

use crate::error::{Error, Result};
use crate::value::Value;
use core::cmp::Ordering;

pub(super) fn equal(left: &Value, right: &Value) -> Result<bool> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
        // codepoint collation
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::QName(a), Value::QName(b)) => Ok(a == b),
        _ => Err(Error::not_applicable("eq", &[left.kind(), right.kind()])),
    }
}

/// `false` sorts before `true`; strings compare by codepoint. Qualified
/// names have no order.
pub(super) fn order(left: &Value, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.as_str().cmp(b.as_str())),
        _ => Err(Error::not_applicable("compare", &[left.kind(), right.kind()])),
    }
}
