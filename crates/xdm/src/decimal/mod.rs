//! Arbitrary-precision decimal numbers backing `xs:decimal` and `xs:integer`.
//!
//! A [`Decimal`] is a sign, an unsigned digit magnitude and a scale (the count
//! of digits after the point). Values are always kept in canonical form: no
//! trailing fractional zeros and no negative zero. Addition, subtraction and
//! multiplication are exact; division is carried out to a configurable number
//! of significant digits and then truncated.

mod digits;
mod rounding;

pub use rounding::RoundingMode;

use crate::error::{Error, Result};
use crate::kind::ValueKind;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use digits::Digits;

/// Lower bound on the significant digits computed by [`Decimal::checked_div`].
pub const MIN_DIVISION_PRECISION: u32 = 21;

/// Upper bound on the significant digits computed by [`Decimal::checked_div`].
pub const MAX_DIVISION_PRECISION: u32 = 4_096;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    digits: Digits,
    scale: u32,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: Digits::zero(),
            scale: 0,
        }
    }

    pub fn one() -> Self {
        Self::from(1u8)
    }

    /// `10^exp`.
    pub fn pow10(exp: u32) -> Self {
        Self::from_parts(false, Digits::from_u128(1).shl(exp as usize), 0)
    }

    fn from_parts(negative: bool, digits: Digits, scale: u32) -> Self {
        Self {
            negative,
            digits,
            scale,
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        let strip = self.digits.trailing_zeros().min(self.scale as usize);
        if strip > 0 {
            self.digits = self.digits.split(strip).0;
            self.scale -= strip as u32;
        }
        if self.digits.is_zero() {
            self.negative = false;
            self.scale = 0;
        }
        self
    }

    /// Parse the `xs:decimal` lexical form: optional sign, digits, optional
    /// fraction. Exponents, `INF` and `NaN` are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_as(text, ValueKind::Decimal)
    }

    pub(crate) fn parse_as(text: &str, kind: ValueKind) -> Result<Self> {
        let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
        let bytes = trimmed.as_bytes();
        let (negative, body) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            Some(b'+') => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        let (int_part, frac_part) = match body.iter().position(|b| *b == b'.') {
            Some(dot) => (&body[..dot], &body[dot + 1..]),
            None => (body, &body[body.len()..]),
        };
        let well_formed = !(int_part.is_empty() && frac_part.is_empty())
            && int_part.iter().all(u8::is_ascii_digit)
            && frac_part.iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(Error::lexical(kind, text));
        }
        let mut all = Vec::with_capacity(int_part.len() + frac_part.len());
        all.extend_from_slice(int_part);
        all.extend_from_slice(frac_part);
        let scale = u32::try_from(frac_part.len()).map_err(|_| Error::lexical(kind, text))?;
        Ok(Self::from_parts(negative, Digits::from_ascii(&all), scale))
    }

    /// Exact decimal image of a finite double, using its shortest round-trip
    /// representation.
    pub fn from_f64(v: f64) -> Result<Self> {
        if !v.is_finite() {
            return Err(Error::invalid_operand(
                "to-decimal",
                format!("{v} has no decimal representation"),
            )
            .with_operands(&[ValueKind::Double]));
        }
        Self::parse(&format!("{v}"))
    }

    pub fn from_f32(v: f32) -> Result<Self> {
        if !v.is_finite() {
            return Err(Error::invalid_operand(
                "to-decimal",
                format!("{v} has no decimal representation"),
            )
            .with_operands(&[ValueKind::Float]));
        }
        Self::parse(&format!("{v}"))
    }

    pub fn from_i128(v: i128) -> Self {
        Self::from_parts(v < 0, Digits::from_u128(v.unsigned_abs()), 0)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    pub fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..self.clone()
        }
    }

    /// Digits between the first and the last non-zero digit.
    pub fn significant_digits(&self) -> u32 {
        (self.digits.len() - self.digits.trailing_zeros()) as u32
    }

    /// Both magnitudes rescaled to the larger of the two scales.
    fn aligned(&self, rhs: &Self) -> (Digits, Digits, u32) {
        let scale = self.scale.max(rhs.scale);
        (
            self.digits.shl((scale - self.scale) as usize),
            rhs.digits.shl((scale - rhs.scale) as usize),
            scale,
        )
    }

    fn signed_sum(&self, rhs: &Self, rhs_negative: bool) -> Self {
        let (a, b, scale) = self.aligned(rhs);
        if self.negative == rhs_negative {
            return Self::from_parts(self.negative, a.add(&b), scale);
        }
        match a.cmp(&b) {
            Ordering::Less => Self::from_parts(rhs_negative, b.sub(&a), scale),
            _ => Self::from_parts(self.negative, a.sub(&b), scale),
        }
    }

    /// Quotient computed to `precision` significant digits, clamped to
    /// [`MIN_DIVISION_PRECISION`]..=[`MAX_DIVISION_PRECISION`], and then
    /// truncated.
    pub fn checked_div(&self, rhs: &Self, precision: u32) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::divide_by_zero("div"));
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let precision = i64::from(precision.clamp(MIN_DIVISION_PRECISION, MAX_DIVISION_PRECISION));
        let (sa, sb) = (i64::from(self.scale), i64::from(rhs.scale));
        // order of magnitude of the quotient, give or take one digit
        let magnitude = (self.digits.len() as i64 - sa) - (rhs.digits.len() as i64 - sb);
        let target = (precision - magnitude + 1).max(sa.max(sb)).max(0);
        let numerator = self.digits.shl((sb + target - sa) as usize);
        let (quotient, _) = numerator
            .div_rem(&rhs.digits)
            .ok_or_else(|| Error::divide_by_zero("div"))?;
        let scale = u32::try_from(target).map_err(|_| Error::overflow("div", "quotient scale out of range"))?;
        Ok(Self::from_parts(self.negative != rhs.negative, quotient, scale))
    }

    /// Quotient truncated toward zero.
    pub fn integer_div(&self, rhs: &Self) -> Result<Self> {
        let (a, b, _) = self.aligned(rhs);
        let (quotient, _) = a.div_rem(&b).ok_or_else(|| Error::divide_by_zero("idiv"))?;
        Ok(Self::from_parts(self.negative != rhs.negative, quotient, 0))
    }

    /// Remainder of truncating division; the sign follows the dividend.
    pub fn rem(&self, rhs: &Self) -> Result<Self> {
        let (a, b, scale) = self.aligned(rhs);
        let (_, remainder) = a.div_rem(&b).ok_or_else(|| Error::divide_by_zero("mod"))?;
        Ok(Self::from_parts(self.negative, remainder, scale))
    }

    /// Round to `precision` digits after the point; a negative precision
    /// rounds to tens, hundreds and so on.
    ///
    /// Work is bounded by the operand's length, except where the result
    /// itself is a single unit at a far-away position (`Floor`/`Ceiling`).
    pub fn round(&self, precision: i32, mode: RoundingMode) -> Self {
        let scale = i64::from(self.scale);
        let precision = i64::from(precision);
        if scale <= precision {
            return self.clone();
        }
        let discard = usize::try_from(scale - precision).unwrap_or(usize::MAX);
        if discard > self.digits.len() {
            // every digit is discarded and the remainder lies below one half
            if self.is_zero() || !mode.increments(Ordering::Less, false, self.negative) {
                return Self::zero();
            }
            return Self::at_precision(self.negative, Digits::from_u128(1), precision);
        }
        let (retained, remainder) = self.digits.split(discard);
        let increment = !remainder.is_zero() && {
            let half = Digits::from_u128(5).shl(discard - 1);
            mode.increments(remainder.cmp(&half), retained.is_odd(), self.negative)
        };
        let retained = if increment { retained.add_one() } else { retained };
        Self::at_precision(self.negative, retained, precision)
    }

    /// `digits` read as units of `10^-precision`.
    fn at_precision(negative: bool, digits: Digits, precision: i64) -> Self {
        match u32::try_from(precision) {
            Ok(scale) => Self::from_parts(negative, digits, scale),
            Err(_) => {
                let shift = usize::try_from(precision.unsigned_abs()).unwrap_or(usize::MAX);
                Self::from_parts(negative, digits.shl(shift), 0)
            }
        }
    }

    /// Round to `digits` significant digits.
    pub fn round_significant(&self, digits: u32, mode: RoundingMode) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let integer_digits = self.digits.len() as i64 - i64::from(self.scale);
        let precision = i64::from(digits) - integer_digits;
        let precision = i32::try_from(precision).unwrap_or(if precision < 0 { i32::MIN } else { i32::MAX });
        self.round(precision, mode)
    }

    pub fn trunc(&self) -> Self {
        self.round(0, RoundingMode::Down)
    }

    pub fn floor(&self) -> Self {
        self.round(0, RoundingMode::Floor)
    }

    pub fn ceil(&self) -> Self {
        self.round(0, RoundingMode::Ceiling)
    }

    /// Exact conversion of an integral value; `None` for fractions or
    /// magnitudes beyond `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        if !self.is_integer() {
            return None;
        }
        let magnitude = self.digits.to_u128()?;
        if self.negative {
            0i128.checked_sub_unsigned(magnitude)
        } else {
            i128::try_from(magnitude).ok()
        }
    }

    /// Nearest double; magnitudes beyond the double range become infinite.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    pub fn to_f32(&self) -> f32 {
        self.to_string().parse().unwrap_or(f32::NAN)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i128> for Decimal {
    fn from(v: i128) -> Self {
        Self::from_i128(v)
    }
}

macro_rules! decimal_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Decimal {
            fn from(v: $t) -> Self {
                Self::from_i128(i128::from(v))
            }
        })*
    };
}

decimal_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let (a, b, _) = self.aligned(other);
                let ord = a.cmp(&b);
                if negative { ord.reverse() } else { ord }
            }
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let text = self.digits.to_ascii();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&text);
        }
        if text.len() <= scale {
            write!(f, "0.{}{}", "0".repeat(scale - text.len()), text)
        } else {
            let (int_part, frac_part) = text.split_at(text.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        }
    }
}

impl core::ops::Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::from_parts(!self.negative, self.digits.clone(), self.scale)
    }
}

impl core::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}

impl core::ops::Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        self.signed_sum(rhs, rhs.negative)
    }
}

impl core::ops::Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        self.signed_sum(rhs, !rhs.negative && !rhs.is_zero())
    }
}

impl core::ops::Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::from_parts(
            self.negative != rhs.negative,
            self.digits.mul(&rhs.digits),
            self.scale + rhs.scale,
        )
    }
}

impl core::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl core::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

impl core::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}
