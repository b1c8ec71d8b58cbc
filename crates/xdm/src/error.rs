use crate::kind::ValueKind;
use core::fmt;
use smallvec::SmallVec;

/// Failure categories raised by the value model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    LexicalFormat,       // text does not match the grammar or a range constraint
    LexicalConstraint,   // restricted duration carries a disallowed component
    InvalidOperand,      // NaN / INF where the operator forbids it
    DivideByZero,        // zero divisor in div / idiv / mod
    Overflow,            // result or narrowing exceeds the target range
    OperatorNotApplicable,
    UnregisteredKind,    // kind missing from the registry in use
    RegistryConflict,    // two different declarations for one kind
}

impl ErrorCode {
    /// The W3C error code an XPath evaluator reports for this failure.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::LexicalFormat | ErrorCode::LexicalConstraint => "err:FORG0001",
            ErrorCode::InvalidOperand => "err:FOCA0005",
            ErrorCode::DivideByZero => "err:FOAR0001",
            ErrorCode::Overflow => "err:FOAR0002",
            ErrorCode::OperatorNotApplicable => "err:XPTY0004",
            ErrorCode::UnregisteredKind => "err:XPST0051",
            ErrorCode::RegistryConflict => "err:FOER0000",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand kinds attached to an error for diagnostics.
pub type OperandKinds = SmallVec<[ValueKind; 2]>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} in {}: {message}", render_site(.operation, .operands))]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Operator or conversion that failed.
    pub operation: &'static str,
    pub operands: OperandKinds,
}

fn render_site(operation: &str, operands: &OperandKinds) -> String {
    let kinds: Vec<&str> = operands.iter().map(|k| k.xs_name()).collect();
    format!("{operation}({})", kinds.join(", "))
}

impl Error {
    pub fn new(code: ErrorCode, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            operation,
            operands: OperandKinds::new(),
        }
    }

    pub fn with_operands(mut self, kinds: &[ValueKind]) -> Self {
        self.operands = kinds.iter().copied().collect();
        self
    }

    pub fn lexical(kind: ValueKind, text: &str) -> Self {
        Self::new(
            ErrorCode::LexicalFormat,
            "parse",
            format!("invalid lexical form for {kind}: '{text}'"),
        )
        .with_operands(&[kind])
    }

    pub fn constraint(kind: ValueKind, text: &str, component: &str) -> Self {
        Self::new(
            ErrorCode::LexicalConstraint,
            "parse",
            format!("{kind} may not carry a {component} component: '{text}'"),
        )
        .with_operands(&[kind])
    }

    pub fn invalid_operand(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidOperand, operation, message)
    }

    pub fn divide_by_zero(operation: &'static str) -> Self {
        Self::new(ErrorCode::DivideByZero, operation, "division by zero")
    }

    pub fn overflow(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Overflow, operation, message)
    }

    pub fn not_applicable(operation: &'static str, operands: &[ValueKind]) -> Self {
        Self::new(
            ErrorCode::OperatorNotApplicable,
            operation,
            "operator is not defined for these operand kinds",
        )
        .with_operands(operands)
    }

    pub fn unregistered(operation: &'static str, kind: ValueKind) -> Self {
        Self::new(
            ErrorCode::UnregisteredKind,
            operation,
            format!("{kind} is not registered"),
        )
        .with_operands(&[kind])
    }

    /// Attach operand kinds when the failure was raised below the dispatch layer.
    pub(crate) fn or_operands(mut self, kinds: &[ValueKind]) -> Self {
        if self.operands.is_empty() {
            self.operands = kinds.iter().copied().collect();
        }
        self
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
