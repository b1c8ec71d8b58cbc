use core::cmp::Ordering;

/// How [`Decimal::round`](super::Decimal::round) disposes of discarded digits.
///
/// The `Half*` modes look at whether the discarded remainder is below, at or
/// above one half of the last retained unit. Magnitude-symmetric modes
/// (`HalfUp`, `HalfDown`, `HalfEven`, `HalfOdd`, `Down`) treat negative values
/// as the mirror image of positive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Ties away from zero.
    HalfUp,
    /// Ties toward zero.
    HalfDown,
    /// Ties to the even retained digit.
    #[default]
    HalfEven,
    /// Ties to the odd retained digit.
    HalfOdd,
    /// Ties toward positive infinity (`fn:round`).
    HalfCeiling,
    Floor,
    Ceiling,
    /// Truncate toward zero.
    Down,
}

impl RoundingMode {
    /// Whether the retained magnitude must be incremented by one unit.
    ///
    /// `half` is the discarded remainder compared with one half; it is only
    /// consulted when the remainder is non-zero.
    pub(crate) fn increments(self, half: Ordering, retained_odd: bool, negative: bool) -> bool {
        match self {
            RoundingMode::HalfUp => half != Ordering::Less,
            RoundingMode::HalfDown => half == Ordering::Greater,
            RoundingMode::HalfEven => half == Ordering::Greater || (half == Ordering::Equal && retained_odd),
            RoundingMode::HalfOdd => half == Ordering::Greater || (half == Ordering::Equal && !retained_odd),
            RoundingMode::HalfCeiling => half == Ordering::Greater || (half == Ordering::Equal && !negative),
            RoundingMode::Floor => negative,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Down => false,
        }
    }
}
