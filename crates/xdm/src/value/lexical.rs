use super::{QName, Value};
use crate::decimal::Decimal;
use crate::error::{Error, Result};
use crate::kind::ValueKind;
use compact_str::CompactString;

fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
}

pub(super) fn parse_scalar(kind: ValueKind, text: &str) -> Result<Value> {
    match kind {
        ValueKind::Boolean => match trim(text) {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(Error::lexical(kind, text)),
        },
        ValueKind::String => Ok(Value::String(CompactString::from(text))),
        ValueKind::QName => QName::parse(text).map(Value::QName),
        ValueKind::Byte => Ok(Value::Byte(parse_fixed(kind, text)?)),
        ValueKind::Short => Ok(Value::Short(parse_fixed(kind, text)?)),
        ValueKind::Int => Ok(Value::Int(parse_fixed(kind, text)?)),
        ValueKind::Long => Ok(Value::Long(parse_fixed(kind, text)?)),
        ValueKind::Integer => parse_integer(kind, text).map(Value::Integer),
        ValueKind::Decimal => Decimal::parse(text).map(Value::Decimal),
        ValueKind::Float => parse_float(text).map(Value::Float),
        ValueKind::Double => parse_double(text).map(Value::Double),
        _ => Err(Error::lexical(kind, text)),
    }
}

/// `[+-]?[0-9]+` of any length.
pub(crate) fn parse_integer(kind: ValueKind, text: &str) -> Result<Decimal> {
    let body = trim(text);
    let digits = body.strip_prefix(['+', '-']).unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::lexical(kind, text));
    }
    Decimal::parse_as(body, kind)
}

/// Integer lexical form checked against the range of a fixed-width kind.
fn parse_fixed<T: TryFrom<i128>>(kind: ValueKind, text: &str) -> Result<T> {
    parse_integer(kind, text)?
        .to_i128()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| Error::lexical(kind, text))
}

/// `[+-]?(digits(.digits?)?|.digits)([eE][+-]?digits)?` or one of the
/// special values `INF`, `-INF`, `NaN`.
fn is_float_literal(text: &str) -> bool {
    if matches!(text, "INF" | "-INF" | "NaN") {
        return true;
    }
    let bytes = text.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    i == bytes.len()
}

pub(crate) fn parse_double(text: &str) -> Result<f64> {
    let body = trim(text);
    if !is_float_literal(body) {
        return Err(Error::lexical(ValueKind::Double, text));
    }
    match body {
        "INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        _ => body.parse().map_err(|_| Error::lexical(ValueKind::Double, text)),
    }
}

pub(crate) fn parse_float(text: &str) -> Result<f32> {
    let body = trim(text);
    if !is_float_literal(body) {
        return Err(Error::lexical(ValueKind::Float, text));
    }
    match body {
        "INF" => Ok(f32::INFINITY),
        "-INF" => Ok(f32::NEG_INFINITY),
        "NaN" => Ok(f32::NAN),
        _ => body.parse().map_err(|_| Error::lexical(ValueKind::Float, text)),
    }
}

/// `1e7` -> `1.0E7`, `1.5e-7` -> `1.5E-7`.
fn scientific(text: &str) -> String {
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

/// Canonical double: plain decimal notation for magnitudes in
/// `[1e-6, 1e6)`, shortest scientific notation otherwise.
pub(crate) fn format_double(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        (if v > 0.0 { "INF" } else { "-INF" }).to_string()
    } else if v == 0.0 {
        (if v.is_sign_negative() { "-0" } else { "0" }).to_string()
    } else if (1e-6..1e6).contains(&v.abs()) {
        format!("{v}")
    } else {
        scientific(&format!("{v:e}"))
    }
}

pub(crate) fn format_float(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        (if v > 0.0 { "INF" } else { "-INF" }).to_string()
    } else if v == 0.0 {
        (if v.is_sign_negative() { "-0" } else { "0" }).to_string()
    } else if (1e-6..1e6).contains(&v.abs()) {
        format!("{v}")
    } else {
        scientific(&format!("{v:e}"))
    }
}
