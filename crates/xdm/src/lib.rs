//! Atomic values of the XPath 2.0 data model.
//!
//! Values are tagged by [`ValueKind`]. A [`TypeRegistry`] decides, for any
//! two kinds, which operand a binary operator promotes first, and a
//! [`ValueContext`] runs the operators on top of it. Decimal arithmetic,
//! calendar values and durations are implemented in this crate; chrono is
//! only used to exchange calendar values with other code.
//!
//! ```
//! use platynui_xdm::{Value, ValueContext, ValueKind};
//!
//! let ctx = ValueContext::new();
//! let sum = ctx.add(&Value::from(2i32), &Value::parse(ValueKind::Decimal, "1.5")?)?;
//! assert_eq!(sum.kind(), ValueKind::Decimal);
//! assert_eq!(sum.to_string(), "3.5");
//! # Ok::<(), platynui_xdm::Error>(())
//! ```

pub mod calendar;
pub mod coercion;
pub mod config;
pub mod context;
pub mod decimal;
pub mod duration;
pub mod error;
pub mod kind;
mod ops;
pub mod value;

pub use calendar::{CalendarKind, CalendarValue, Instant};
pub use coercion::{Resolution, TypeRegistry, TypeRegistryBuilder};
pub use config::ValueConfig;
pub use context::{ValueContext, ValueContextBuilder};
pub use decimal::{Decimal, MAX_DIVISION_PRECISION, MIN_DIVISION_PRECISION, RoundingMode};
pub use duration::{DurationKind, DurationValue};
pub use error::{Error, ErrorCode, Result};
pub use kind::{KindDescriptor, KindOrder, MAX_KINDS, ValueKind, standard_order};
pub use ops::{ArithOp, UnaryOp};
pub use value::{QName, Value};
