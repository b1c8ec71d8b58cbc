//! Dispatch entry points.
//!
//! A [`ValueContext`] pairs a [`TypeRegistry`] with the [`ValueConfig`] an
//! evaluator runs under. Every binary entry point follows the same steps:
//! check that both kinds are registered, resolve the pair against the
//! coercion table, promote the losing operand and hand the pair to the
//! operator body.

use crate::coercion::{Resolution, TypeRegistry};
use crate::config::ValueConfig;
use crate::error::{Error, ErrorCode, Result};
use crate::kind::{MAX_KINDS, ValueKind};
use crate::ops::{self, ArithOp, UnaryOp};
use crate::value::Value;
use core::cmp::Ordering;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct ValueContext {
    registry: Arc<TypeRegistry>,
    config: ValueConfig,
}

impl Default for ValueContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueContext {
    /// Context over the standard registry with the default configuration.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::standard(),
            config: ValueConfig::default(),
        }
    }

    pub fn builder() -> ValueContextBuilder {
        ValueContextBuilder::new()
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ValueConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Wrap a native value, failing when its kind is not registered.
    pub fn create(&self, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        self.ensure_registered("create", value.kind())?;
        Ok(value)
    }

    /// Build a value of `kind` from its lexical form.
    pub fn parse(&self, kind: ValueKind, text: &str) -> Result<Value> {
        self.ensure_registered("parse", kind)?;
        Value::parse(kind, text)
    }

    // -----------------------------------------------------------------------
    // Arithmetic
    // -----------------------------------------------------------------------

    pub fn apply_binary(&self, op: ArithOp, left: &Value, right: &Value) -> Result<Value> {
        let operands = [left.kind(), right.kind()];
        let (l, r) = self.coerce(op.name(), left, right)?;
        ops::arithmetic(op, &l, &r, &self.config).map_err(|e| at_call_site(e, op.name(), &operands))
    }

    pub fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::Add, left, right)
    }

    pub fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::Subtract, left, right)
    }

    pub fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::Multiply, left, right)
    }

    pub fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::Divide, left, right)
    }

    pub fn integer_divide(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::IntegerDivide, left, right)
    }

    pub fn modulo(&self, left: &Value, right: &Value) -> Result<Value> {
        self.apply_binary(ArithOp::Modulo, left, right)
    }

    pub fn apply_unary(&self, op: UnaryOp, value: &Value) -> Result<Value> {
        self.ensure_registered(op.name(), value.kind())?;
        ops::unary(op, value)
    }

    pub fn negate(&self, value: &Value) -> Result<Value> {
        self.apply_unary(UnaryOp::Minus, value)
    }

    // -----------------------------------------------------------------------
    // Comparison
    // -----------------------------------------------------------------------

    pub fn equals(&self, left: &Value, right: &Value) -> Result<bool> {
        let operands = [left.kind(), right.kind()];
        let (l, r) = self.coerce("eq", left, right)?;
        ops::equal(&l, &r, &self.config).map_err(|e| at_call_site(e, "eq", &operands))
    }

    /// [`equals`](Self::equals) without the failure: `None` when the
    /// operands cannot be compared.
    pub fn try_equals(&self, left: &Value, right: &Value) -> Option<bool> {
        self.equals(left, right).ok()
    }

    /// Ordering of two values; `Ok(None)` when a NaN is involved.
    pub fn compare(&self, left: &Value, right: &Value) -> Result<Option<Ordering>> {
        self.order("compare", left, right)
    }

    pub fn greater_than(&self, left: &Value, right: &Value) -> Result<bool> {
        Ok(self.order("gt", left, right)? == Some(Ordering::Greater))
    }

    pub fn try_greater_than(&self, left: &Value, right: &Value) -> Option<bool> {
        self.greater_than(left, right).ok()
    }

    pub fn less_than(&self, left: &Value, right: &Value) -> Result<bool> {
        Ok(self.order("lt", left, right)? == Some(Ordering::Less))
    }

    /// The smaller operand after promotion. A NaN operand always loses, so
    /// NaN is returned only when both operands are NaN.
    pub fn min(&self, left: &Value, right: &Value) -> Result<Value> {
        self.extreme("min", left, right, Ordering::Less)
    }

    /// The larger operand after promotion; NaN loses as in [`min`](Self::min).
    pub fn max(&self, left: &Value, right: &Value) -> Result<Value> {
        self.extreme("max", left, right, Ordering::Greater)
    }

    fn order(&self, operation: &'static str, left: &Value, right: &Value) -> Result<Option<Ordering>> {
        let operands = [left.kind(), right.kind()];
        let (l, r) = self.coerce(operation, left, right)?;
        ops::order(&l, &r, &self.config).map_err(|e| at_call_site(e, operation, &operands))
    }

    fn extreme(&self, operation: &'static str, left: &Value, right: &Value, wanted: Ordering) -> Result<Value> {
        let operands = [left.kind(), right.kind()];
        let (l, r) = self.coerce(operation, left, right)?;
        if l.is_nan() {
            return Ok(r.into_owned());
        }
        if r.is_nan() {
            return Ok(l.into_owned());
        }
        let ordering = ops::order(&l, &r, &self.config).map_err(|e| at_call_site(e, operation, &operands))?;
        // ties keep the left operand
        if ordering == Some(wanted.reverse()) { Ok(r.into_owned()) } else { Ok(l.into_owned()) }
    }

    // -----------------------------------------------------------------------
    // Coercion
    // -----------------------------------------------------------------------

    fn ensure_registered(&self, operation: &'static str, kind: ValueKind) -> Result<()> {
        if self.registry.is_registered(kind) {
            Ok(())
        } else {
            debug!(operation, kind = %kind, "value kind is not registered");
            Err(Error::unregistered(operation, kind))
        }
    }

    /// Promote operands until the table hands them over directly. Each step
    /// widens one operand, so the loop ends after at most one step per kind.
    fn coerce<'a>(
        &self,
        operation: &'static str,
        left: &'a Value,
        right: &'a Value,
    ) -> Result<(Cow<'a, Value>, Cow<'a, Value>)> {
        let operands = [left.kind(), right.kind()];
        self.ensure_registered(operation, operands[0]).map_err(|e| e.with_operands(&operands))?;
        self.ensure_registered(operation, operands[1]).map_err(|e| e.with_operands(&operands))?;
        let mut left = Cow::Borrowed(left);
        let mut right = Cow::Borrowed(right);
        for _ in 0..MAX_KINDS {
            let resolution = self.registry.resolve(left.kind(), right.kind());
            trace!(
                operation,
                left = %left.kind(),
                right = %right.kind(),
                resolution = resolution.as_str(),
                "resolved operand kinds"
            );
            let promoted = match resolution {
                Resolution::Direct => return Ok((left, right)),
                Resolution::PromoteLeft(target) => target.promote_from(&left).map(|v| left = Cow::Owned(v)),
                Resolution::PromoteRight(target) => target.promote_from(&right).map(|v| right = Cow::Owned(v)),
                Resolution::NotApplicable => {
                    debug!(operation, left = %operands[0], right = %operands[1], "no promotion resolves operands");
                    return Err(Error::not_applicable(operation, &operands));
                }
            };
            if let Err(err) = promoted {
                debug!(operation, left = %operands[0], right = %operands[1], error = %err, "promotion failed");
                return Err(Error::not_applicable(operation, &operands));
            }
        }
        Err(Error::not_applicable(operation, &operands))
    }
}

/// Operator bodies see promoted operands; report a missing operator against
/// the kinds the caller passed in.
fn at_call_site(err: Error, operation: &'static str, operands: &[ValueKind]) -> Error {
    if err.code == ErrorCode::OperatorNotApplicable {
        Error::not_applicable(operation, operands)
    } else {
        err.or_operands(operands)
    }
}

/// Builder for [`ValueContext`].
#[derive(Debug, Clone)]
pub struct ValueContextBuilder {
    ctx: ValueContext,
}

impl Default for ValueContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueContextBuilder {
    pub fn new() -> Self {
        Self {
            ctx: ValueContext::default(),
        }
    }

    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.ctx.registry = registry;
        self
    }

    pub fn with_config(mut self, config: ValueConfig) -> Self {
        self.ctx.config = config;
        self
    }

    /// Offset in minutes east of UTC. An offset beyond ±14:00 is ignored
    /// and the previous implicit timezone stays in effect.
    pub fn with_implicit_timezone(mut self, offset_minutes: i16) -> Self {
        self.ctx.config = self.ctx.config.with_implicit_timezone(offset_minutes);
        self
    }

    /// Significant digits for decimal division, clamped to
    /// [`MIN_DIVISION_PRECISION`](crate::MIN_DIVISION_PRECISION)..=[`MAX_DIVISION_PRECISION`](crate::MAX_DIVISION_PRECISION).
    pub fn with_division_precision(mut self, digits: u32) -> Self {
        self.ctx.config = self.ctx.config.with_division_precision(digits);
        self
    }

    pub fn build(self) -> ValueContext {
        self.ctx
    }
}
