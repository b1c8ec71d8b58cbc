use super::julian::days_in_month;
use super::{CalendarKind, CalendarValue, Fields, MAX_YEAR};
use crate::decimal::Decimal;
use crate::error::{Error, Result};
use core::fmt;

/// Cursor over the ASCII bytes of a lexical form.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Option<()> {
        self.eat(b).then_some(())
    }

    fn digit_run(&mut self) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    /// Exactly two digits.
    fn two(&mut self) -> Option<u8> {
        let run = self.bytes.get(self.pos..self.pos + 2)?;
        if !run.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos += 2;
        Some((run[0] - b'0') * 10 + (run[1] - b'0'))
    }

    /// `-?YYYY`, at least four digits and no redundant leading zero beyond
    /// four. Returns the astronomical year.
    fn year(&mut self) -> Option<i64> {
        let bce = self.eat(b'-');
        let run = self.digit_run();
        if run.len() < 4 || (run.len() > 4 && run[0] == b'0') {
            return None;
        }
        let year: i64 = core::str::from_utf8(run).ok()?.parse().ok()?;
        if year == 0 || year > MAX_YEAR {
            return None;
        }
        Some(if bce { 1 - year } else { year })
    }

    /// `hh:mm:ss(.f+)?`
    fn time(&mut self, fields: &mut Fields) -> Option<()> {
        fields.hour = self.two()?;
        self.expect(b':')?;
        fields.minute = self.two()?;
        self.expect(b':')?;
        fields.second = self.two()?;
        if self.eat(b'.') {
            let run = self.digit_run();
            if run.is_empty() {
                return None;
            }
            let mut text = String::with_capacity(run.len() + 2);
            text.push_str("0.");
            text.push_str(core::str::from_utf8(run).ok()?);
            fields.fraction = Decimal::parse(&text).ok()?;
        }
        Some(())
    }

    /// `(Z|(+|-)hh:mm)?` in minutes east of UTC.
    fn offset(&mut self) -> Option<Option<i16>> {
        if self.at_end() {
            return Some(None);
        }
        if self.eat(b'Z') {
            return Some(Some(0));
        }
        let sign: i16 = match self.peek()? {
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        self.pos += 1;
        let hours = self.two()?;
        self.expect(b':')?;
        let minutes = self.two()?;
        if hours > 14 || minutes > 59 || (hours == 14 && minutes > 0) {
            return None;
        }
        Some(Some(sign * (i16::from(hours) * 60 + i16::from(minutes))))
    }
}

pub(super) fn parse(kind: CalendarKind, text: &str) -> Result<CalendarValue> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let fields = scan(kind, trimmed).ok_or_else(|| Error::lexical(kind.value_kind(), text))?;
    CalendarValue::assemble(kind, fields).map_err(|_| Error::lexical(kind.value_kind(), text))
}

fn scan(kind: CalendarKind, text: &str) -> Option<Fields> {
    let mut s = Scanner::new(text);
    let mut fields = Fields::default();
    match kind {
        CalendarKind::DateTime | CalendarKind::Date | CalendarKind::GYearMonth | CalendarKind::GYear => {
            fields.year = s.year()?;
            if kind != CalendarKind::GYear {
                s.expect(b'-')?;
                fields.month = s.two()?;
            }
            if matches!(kind, CalendarKind::DateTime | CalendarKind::Date) {
                s.expect(b'-')?;
                fields.day = s.two()?;
            }
            if kind == CalendarKind::DateTime {
                s.expect(b'T')?;
                s.time(&mut fields)?;
            }
        }
        CalendarKind::Time => s.time(&mut fields)?,
        CalendarKind::GMonthDay | CalendarKind::GMonth => {
            s.expect(b'-')?;
            s.expect(b'-')?;
            fields.month = s.two()?;
            if kind == CalendarKind::GMonthDay {
                s.expect(b'-')?;
                fields.day = s.two()?;
            }
        }
        CalendarKind::GDay => {
            for _ in 0..3 {
                s.expect(b'-')?;
            }
            fields.day = s.two()?;
        }
    }
    fields.offset = s.offset()?;
    s.at_end().then_some(fields)
}

/// Range checks shared by parsing and the typed constructors.
pub(super) fn validate(kind: CalendarKind, fields: &Fields) -> bool {
    let has_month = !matches!(kind, CalendarKind::Time | CalendarKind::GYear | CalendarKind::GDay);
    if has_month && !(1..=12).contains(&fields.month) {
        return false;
    }
    let max_day = match kind {
        CalendarKind::DateTime | CalendarKind::Date => days_in_month(fields.year, fields.month),
        // a month-day has no year; February 29 is allowed
        CalendarKind::GMonthDay => days_in_month(2000, fields.month),
        CalendarKind::GDay => 31,
        _ => 0,
    };
    if max_day > 0 && !(1..=max_day).contains(&fields.day) {
        return false;
    }
    if matches!(kind, CalendarKind::DateTime | CalendarKind::Time) {
        let midnight = fields.hour == 24 && fields.minute == 0 && fields.second == 0 && fields.fraction.is_zero();
        if (fields.hour > 23 && !midnight) || fields.minute > 59 || fields.second > 59 {
            return false;
        }
    }
    if fields.offset.is_some_and(|offset| offset.abs() > 14 * 60) {
        return false;
    }
    (-MAX_YEAR + 1..=MAX_YEAR).contains(&fields.year)
}

fn write_year(value: &CalendarValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.bce {
        f.write_str("-")?;
    }
    write!(f, "{:04}", value.year)
}

fn write_time(value: &CalendarValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", value.hour, value.minute, value.second)?;
    if !value.fraction.is_zero() {
        let text = value.fraction.to_string();
        // "0.xyz" -> ".xyz"
        f.write_str(&text[1..])?;
    }
    Ok(())
}

pub(super) fn format(value: &CalendarValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.kind {
        CalendarKind::DateTime => {
            write_year(value, f)?;
            write!(f, "-{:02}-{:02}T", value.month, value.day)?;
            write_time(value, f)?;
        }
        CalendarKind::Date => {
            write_year(value, f)?;
            write!(f, "-{:02}-{:02}", value.month, value.day)?;
        }
        CalendarKind::Time => write_time(value, f)?,
        CalendarKind::GYearMonth => {
            write_year(value, f)?;
            write!(f, "-{:02}", value.month)?;
        }
        CalendarKind::GYear => write_year(value, f)?,
        CalendarKind::GMonthDay => write!(f, "--{:02}-{:02}", value.month, value.day)?,
        CalendarKind::GDay => write!(f, "---{:02}", value.day)?,
        CalendarKind::GMonth => write!(f, "--{:02}", value.month)?,
    }
    match value.offset {
        None => Ok(()),
        Some(0) => f.write_str("Z"),
        Some(minutes) => {
            let sign = if minutes < 0 { '-' } else { '+' };
            let minutes = minutes.unsigned_abs();
            write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
        }
    }
}
