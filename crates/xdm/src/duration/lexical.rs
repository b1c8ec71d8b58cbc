use super::{DurationKind, DurationValue};
use crate::decimal::Decimal;
use crate::error::{Error, Result};
use core::fmt;

/// Field designators in the order the grammar admits them.
const DESIGNATORS: [(u8, bool); 6] = [
    (b'Y', false),
    (b'M', false),
    (b'D', false),
    (b'H', true),
    (b'M', true),
    (b'S', true),
];

/// Parse `-?P(nY)?(nM)?(nD)?(T(nH)?(nM)?(n(.f)?S)?)?`.
///
/// The grammar is checked first (`LexicalFormat`); the subtype restriction
/// is checked afterwards (`LexicalConstraint`), so `P1Y` read as a
/// dayTimeDuration is a constraint violation while `P1X` is a format error.
pub(super) fn parse(kind: DurationKind, text: &str) -> Result<DurationValue> {
    let value_kind = kind.value_kind();
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let bytes = trimmed.as_bytes();
    let bad = || Error::lexical(value_kind, text);

    let (negative, rest) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };
    let Some((b'P', mut rest)) = rest.split_first() else {
        return Err(bad());
    };

    let mut fields: [Option<Decimal>; 6] = Default::default();
    let mut next_slot = 0usize;
    let mut in_time = false;
    let mut time_components = 0usize;
    while let Some(&first) = rest.first() {
        if first == b'T' {
            if in_time {
                return Err(bad());
            }
            in_time = true;
            next_slot = next_slot.max(3);
            rest = &rest[1..];
            if rest.is_empty() {
                return Err(bad());
            }
            continue;
        }
        let len = rest
            .iter()
            .position(|b| !(b.is_ascii_digit() || *b == b'.'))
            .ok_or_else(bad)?;
        if len == 0 {
            return Err(bad());
        }
        let (number, tail) = rest.split_at(len);
        let designator = tail[0];
        let slot = (next_slot..DESIGNATORS.len())
            .find(|i| DESIGNATORS[*i] == (designator, in_time))
            .ok_or_else(bad)?;
        let fractional = number.contains(&b'.');
        if fractional && (designator != b'S' || number[0] == b'.' || number[len - 1] == b'.') {
            return Err(bad());
        }
        // Decimal::parse would also accept a sign; the run above holds digits and '.' only
        let number = core::str::from_utf8(number).map_err(|_| bad())?;
        fields[slot] = Some(Decimal::parse(number).map_err(|_| bad())?);
        if in_time {
            time_components += 1;
        }
        next_slot = slot + 1;
        rest = &tail[1..];
    }
    if fields.iter().all(Option::is_none) || (in_time && time_components == 0) {
        return Err(bad());
    }

    let has_year_month = fields[0].is_some() || fields[1].is_some();
    let has_day_time = fields[2..].iter().any(Option::is_some);
    match kind {
        DurationKind::DayTime if has_year_month => {
            return Err(Error::constraint(value_kind, text, "year or month"));
        }
        DurationKind::YearMonth if has_day_time => {
            return Err(Error::constraint(value_kind, text, "day or time"));
        }
        _ => {}
    }

    let field = |i: usize| fields[i].clone().unwrap_or_default();
    let months = &(&field(0) * &Decimal::from(12u8)) + &field(1);
    let seconds = [(2usize, 86_400u32), (3, 3_600), (4, 60), (5, 1)]
        .into_iter()
        .fold(Decimal::zero(), |acc, (i, unit)| &acc + &(&field(i) * &Decimal::from(unit)));
    let months = months
        .to_i128()
        .ok_or_else(|| Error::overflow("parse", format!("duration '{text}' is out of range")))?;
    let sign = if negative { -1 } else { 1 };
    let seconds = if negative { -seconds } else { seconds };
    DurationValue::new(kind, sign * months, seconds)
}

/// Canonical form: zero designators are omitted, a zero year-month duration
/// reads `P0M` and any other zero duration reads `PT0S`.
pub(super) fn format(value: &DurationValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_zero() {
        return f.write_str(if value.kind() == DurationKind::YearMonth { "P0M" } else { "PT0S" });
    }
    if value.is_negative() {
        f.write_str("-")?;
    }
    f.write_str("P")?;
    let (years, months) = (value.months / 12, value.months % 12);
    if years > 0 {
        write!(f, "{years}Y")?;
    }
    if months > 0 {
        write!(f, "{months}M")?;
    }
    let (days, hours, minutes, seconds) = value.day_time_parts();
    if days > 0 {
        write!(f, "{days}D")?;
    }
    if hours > 0 || minutes > 0 || !seconds.is_zero() {
        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if !seconds.is_zero() {
            write!(f, "{seconds}S")?;
        }
    }
    Ok(())
}
