//! Unsigned arbitrary-length magnitudes stored as base-10 digits.
//!
//! Digits are kept least-significant first with no leading (high) zeros, so
//! zero is the empty vector. Base 10 keeps scale shifts and rounding
//! inspections trivial; the operands this engine sees are a few dozen digits.

use core::cmp::Ordering;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct Digits(SmallVec<[u8; 24]>);

impl Digits {
    pub(crate) fn zero() -> Self {
        Self(SmallVec::new())
    }

    pub(crate) fn from_u128(mut v: u128) -> Self {
        let mut out = SmallVec::new();
        while v > 0 {
            out.push((v % 10) as u8);
            v /= 10;
        }
        Self(out)
    }

    /// Build from ASCII digits written most-significant first.
    /// The caller has already validated that every byte is a digit.
    pub(crate) fn from_ascii(text: &[u8]) -> Self {
        let mut out: SmallVec<[u8; 24]> = text.iter().rev().map(|b| b - b'0').collect();
        trim(&mut out);
        Self(out)
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of significant digits; zero has none.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Digit at position `i` (0 is the units digit); zero beyond the top.
    pub(crate) fn digit(&self, i: usize) -> u8 {
        self.0.get(i).copied().unwrap_or(0)
    }

    pub(crate) fn is_odd(&self) -> bool {
        self.digit(0) % 2 == 1
    }

    /// Count of trailing (low-order) zero digits.
    pub(crate) fn trailing_zeros(&self) -> usize {
        self.0.iter().take_while(|d| **d == 0).count()
    }

    pub(crate) fn to_u128(&self) -> Option<u128> {
        let mut acc: u128 = 0;
        for d in self.0.iter().rev() {
            acc = acc.checked_mul(10)?.checked_add(u128::from(*d))?;
        }
        Some(acc)
    }

    /// Most-significant-first ASCII rendering; "0" for zero.
    pub(crate) fn to_ascii(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        self.0.iter().rev().map(|d| char::from(b'0' + d)).collect()
    }

    /// Multiply by `10^n`.
    pub(crate) fn shl(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut out: SmallVec<[u8; 24]> = SmallVec::with_capacity(self.0.len() + n);
        out.extend(core::iter::repeat_n(0, n));
        out.extend_from_slice(&self.0);
        Self(out)
    }

    /// Split into `(self / 10^n, self % 10^n)`.
    pub(crate) fn split(&self, n: usize) -> (Self, Self) {
        if n >= self.0.len() {
            return (Self::zero(), self.clone());
        }
        let mut low: SmallVec<[u8; 24]> = SmallVec::from_slice(&self.0[..n]);
        trim(&mut low);
        let high = SmallVec::from_slice(&self.0[n..]);
        (Self(high), Self(low))
    }

    pub(crate) fn add(&self, rhs: &Self) -> Self {
        let len = self.0.len().max(rhs.0.len());
        let mut out: SmallVec<[u8; 24]> = SmallVec::with_capacity(len + 1);
        let mut carry = 0u8;
        for i in 0..len {
            let s = self.digit(i) + rhs.digit(i) + carry;
            out.push(s % 10);
            carry = s / 10;
        }
        if carry > 0 {
            out.push(carry);
        }
        Self(out)
    }

    /// `self - rhs`; requires `self >= rhs`.
    pub(crate) fn sub(&self, rhs: &Self) -> Self {
        debug_assert!(self.cmp(rhs) != Ordering::Less);
        let mut out: SmallVec<[u8; 24]> = SmallVec::with_capacity(self.0.len());
        let mut borrow = 0i8;
        for i in 0..self.0.len() {
            let mut d = self.digit(i) as i8 - rhs.digit(i) as i8 - borrow;
            if d < 0 {
                d += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(d as u8);
        }
        trim(&mut out);
        Self(out)
    }

    pub(crate) fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut acc = vec![0u32; self.0.len() + rhs.0.len()];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in rhs.0.iter().enumerate() {
                acc[i + j] += u32::from(*a) * u32::from(*b);
            }
        }
        let mut out: SmallVec<[u8; 24]> = SmallVec::with_capacity(acc.len() + 1);
        let mut carry = 0u32;
        for v in acc {
            let s = v + carry;
            out.push((s % 10) as u8);
            carry = s / 10;
        }
        while carry > 0 {
            out.push((carry % 10) as u8);
            carry /= 10;
        }
        trim(&mut out);
        Self(out)
    }

    pub(crate) fn add_one(&self) -> Self {
        self.add(&Self::from_u128(1))
    }

    /// Schoolbook long division; `None` when `rhs` is zero.
    pub(crate) fn div_rem(&self, rhs: &Self) -> Option<(Self, Self)> {
        if rhs.is_zero() {
            return None;
        }
        if self.cmp(rhs) == Ordering::Less {
            return Some((Self::zero(), self.clone()));
        }
        let mut quotient: SmallVec<[u8; 24]> = SmallVec::with_capacity(self.0.len());
        let mut rem = Self::zero();
        for d in self.0.iter().rev() {
            // rem = rem * 10 + d
            rem = rem.shl(1);
            if *d != 0 {
                if rem.is_zero() {
                    rem.0.push(*d);
                } else {
                    rem.0[0] = *d;
                }
            }
            let mut q = 0u8;
            while rem.cmp(rhs) != Ordering::Less {
                rem = rem.sub(rhs);
                q += 1;
            }
            quotient.push(q);
        }
        quotient.reverse();
        trim(&mut quotient);
        Some((Self(quotient), rem))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.iter().rev().cmp(other.0.iter().rev()))
    }
}

fn trim(v: &mut SmallVec<[u8; 24]>) {
    while v.last() == Some(&0) {
        v.pop();
    }
}
