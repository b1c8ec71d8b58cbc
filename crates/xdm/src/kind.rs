//! The closed set of XDM atomic value kinds and their declared promotion order.
//!
//! Every kind declares, through its [`KindDescriptor`], how it relates to every
//! other kind when both meet as operands of a binary operator. The
//! [`TypeRegistry`](crate::coercion::TypeRegistry) folds these declarations into
//! its coercion table once, at construction time.

use core::fmt;

/// Upper bound on the number of kinds a registry can hold.
pub const MAX_KINDS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ValueKind {
    Boolean = 0,
    String,
    QName,
    Byte,
    Short,
    Int,
    Long,
    Integer,
    Decimal,
    Float,
    Double,
    Duration,
    DayTimeDuration,
    YearMonthDuration,
    DateTime,
    Date,
    Time,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
}

const _: () = assert!(ValueKind::ALL.len() <= MAX_KINDS);

impl ValueKind {
    pub const ALL: [ValueKind; 22] = [
        ValueKind::Boolean,
        ValueKind::String,
        ValueKind::QName,
        ValueKind::Byte,
        ValueKind::Short,
        ValueKind::Int,
        ValueKind::Long,
        ValueKind::Integer,
        ValueKind::Decimal,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::Duration,
        ValueKind::DayTimeDuration,
        ValueKind::YearMonthDuration,
        ValueKind::DateTime,
        ValueKind::Date,
        ValueKind::Time,
        ValueKind::GYearMonth,
        ValueKind::GYear,
        ValueKind::GMonthDay,
        ValueKind::GDay,
        ValueKind::GMonth,
    ];

    /// Dense index of this kind, used to address the coercion table.
    pub const fn code(self) -> usize {
        self as usize
    }

    pub const fn xs_name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "xs:boolean",
            ValueKind::String => "xs:string",
            ValueKind::QName => "xs:QName",
            ValueKind::Byte => "xs:byte",
            ValueKind::Short => "xs:short",
            ValueKind::Int => "xs:int",
            ValueKind::Long => "xs:long",
            ValueKind::Integer => "xs:integer",
            ValueKind::Decimal => "xs:decimal",
            ValueKind::Float => "xs:float",
            ValueKind::Double => "xs:double",
            ValueKind::Duration => "xs:duration",
            ValueKind::DayTimeDuration => "xs:dayTimeDuration",
            ValueKind::YearMonthDuration => "xs:yearMonthDuration",
            ValueKind::DateTime => "xs:dateTime",
            ValueKind::Date => "xs:date",
            ValueKind::Time => "xs:time",
            ValueKind::GYearMonth => "xs:gYearMonth",
            ValueKind::GYear => "xs:gYear",
            ValueKind::GMonthDay => "xs:gMonthDay",
            ValueKind::GDay => "xs:gDay",
            ValueKind::GMonth => "xs:gMonth",
        }
    }

    /// Look a kind up by its local or `xs:`-prefixed name.
    pub fn from_xs_name(name: &str) -> Option<Self> {
        let local = name.strip_prefix("xs:").unwrap_or(name);
        ValueKind::ALL
            .into_iter()
            .find(|k| &k.xs_name()[3..] == local)
    }

    pub const fn is_numeric(self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Kinds derived from `xs:integer`, including `xs:integer` itself.
    pub const fn is_integer_family(self) -> bool {
        matches!(
            self,
            ValueKind::Byte | ValueKind::Short | ValueKind::Int | ValueKind::Long | ValueKind::Integer
        )
    }

    pub const fn is_duration(self) -> bool {
        matches!(
            self,
            ValueKind::Duration | ValueKind::DayTimeDuration | ValueKind::YearMonthDuration
        )
    }

    pub const fn is_calendar(self) -> bool {
        matches!(
            self,
            ValueKind::DateTime
                | ValueKind::Date
                | ValueKind::Time
                | ValueKind::GYearMonth
                | ValueKind::GYear
                | ValueKind::GMonthDay
                | ValueKind::GDay
                | ValueKind::GMonth
        )
    }

    /// Position in the numeric widening order
    /// `byte < short < int < long < integer < decimal < float < double`.
    pub const fn numeric_rank(self) -> Option<u8> {
        match self {
            ValueKind::Byte => Some(0),
            ValueKind::Short => Some(1),
            ValueKind::Int => Some(2),
            ValueKind::Long => Some(3),
            ValueKind::Integer => Some(4),
            ValueKind::Decimal => Some(5),
            ValueKind::Float => Some(6),
            ValueKind::Double => Some(7),
            _ => None,
        }
    }

    /// Kind produced by arithmetic on two operands of this kind.
    ///
    /// The fixed-width integer kinds report their results as unbounded
    /// `xs:integer`, so `xs:byte + xs:byte` can never overflow.
    pub const fn result_kind(self) -> ValueKind {
        if self.is_integer_family() { ValueKind::Integer } else { self }
    }

    pub fn descriptor(self) -> KindDescriptor {
        KindDescriptor::new(self, self.result_kind(), self.is_numeric(), standard_order)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xs_name())
    }
}

/// One cell of the coercion table, as declared by the row kind about the
/// column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindOrder {
    /// The other operand is promoted toward this kind (`-1`).
    Absorbs,
    /// Both operands are handed to the operator as they are (`0`).
    Equivalent,
    /// This operand is promoted toward the other kind (`1`).
    Yields,
    /// No canonical direction from this side.
    Incomparable,
}

impl KindOrder {
    /// Numeric code of the cell; `None` for incomparable.
    pub const fn code(self) -> Option<i8> {
        match self {
            KindOrder::Absorbs => Some(-1),
            KindOrder::Equivalent => Some(0),
            KindOrder::Yields => Some(1),
            KindOrder::Incomparable => None,
        }
    }

    /// The same relation seen from the other operand.
    pub const fn transpose(self) -> Self {
        match self {
            KindOrder::Absorbs => KindOrder::Yields,
            KindOrder::Yields => KindOrder::Absorbs,
            other => other,
        }
    }
}

pub type OrderFn = fn(ValueKind, ValueKind) -> KindOrder;

/// Registration record for one kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    pub kind: ValueKind,
    pub result_kind: ValueKind,
    pub numeric: bool,
    order: OrderFn,
}

impl KindDescriptor {
    pub const fn new(kind: ValueKind, result_kind: ValueKind, numeric: bool, order: OrderFn) -> Self {
        Self {
            kind,
            result_kind,
            numeric,
            order,
        }
    }

    /// How this kind relates to `other` as an operand partner.
    pub fn compare(&self, other: ValueKind) -> KindOrder {
        (self.order)(self.kind, other)
    }

    pub(crate) fn same_declaration(&self, other: &KindDescriptor) -> bool {
        self.kind == other.kind
            && self.result_kind == other.result_kind
            && self.numeric == other.numeric
            && core::ptr::fn_addr_eq(self.order, other.order)
    }
}

/// Promotion order of the XPath 2.0 type lattice.
pub fn standard_order(this: ValueKind, other: ValueKind) -> KindOrder {
    use ValueKind as K;
    if this == other {
        return KindOrder::Equivalent;
    }
    if let (Some(a), Some(b)) = (this.numeric_rank(), other.numeric_rank()) {
        return if a > b { KindOrder::Absorbs } else { KindOrder::Yields };
    }
    match (this, other) {
        (K::Duration, K::DayTimeDuration | K::YearMonthDuration) => KindOrder::Absorbs,
        // the subtypes leave the direction to xs:duration's declaration
        (K::DayTimeDuration | K::YearMonthDuration, K::Duration) => KindOrder::Incomparable,
        (K::DateTime | K::Date | K::Time, d) if d.is_duration() => KindOrder::Equivalent,
        (d, K::DateTime | K::Date | K::Time) if d.is_duration() => KindOrder::Equivalent,
        (d, n) if d.is_duration() && n.is_numeric() => KindOrder::Equivalent,
        (n, d) if d.is_duration() && n.is_numeric() => KindOrder::Equivalent,
        _ => KindOrder::Incomparable,
    }
}
