//! Kind registry and the pairwise coercion table.
//!
//! A [`TypeRegistry`] is built once from [`KindDescriptor`]s and is
//! read-only afterwards. Each table cell records how the row kind relates
//! to the column kind; [`TypeRegistry::resolve`] turns a pair of operand
//! kinds into the promotion a binary operator needs.

use crate::error::{Error, ErrorCode, Result};
use crate::kind::{KindDescriptor, KindOrder, MAX_KINDS, ValueKind};
use std::sync::{Arc, OnceLock};
use tracing::debug;

static STANDARD_REGISTRY: OnceLock<Arc<TypeRegistry>> = OnceLock::new();

/// What has to happen before an operator can see two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Hand both operands to the operator unchanged.
    Direct,
    /// Promote the left operand to the given kind.
    PromoteLeft(ValueKind),
    /// Promote the right operand to the given kind.
    PromoteRight(ValueKind),
    NotApplicable,
}

impl Resolution {
    /// The same resolution with the operands swapped.
    pub const fn mirrored(self) -> Self {
        match self {
            Resolution::PromoteLeft(kind) => Resolution::PromoteRight(kind),
            Resolution::PromoteRight(kind) => Resolution::PromoteLeft(kind),
            other => other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Resolution::Direct => "direct",
            Resolution::PromoteLeft(_) => "promote-left",
            Resolution::PromoteRight(_) => "promote-right",
            Resolution::NotApplicable => "not-applicable",
        }
    }
}

pub struct TypeRegistry {
    descriptors: [Option<KindDescriptor>; MAX_KINDS],
    table: [[KindOrder; MAX_KINDS]; MAX_KINDS],
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Registry holding every [`ValueKind`] with its standard declaration,
    /// built on first use and shared afterwards.
    pub fn standard() -> Arc<TypeRegistry> {
        STANDARD_REGISTRY
            .get_or_init(|| {
                // the standard declarations are pairwise consistent; an empty
                // table only results if `standard_order` is broken
                let registry = match TypeRegistryBuilder::new().with_standard_kinds().build() {
                    Ok(registry) => registry,
                    Err(err) => {
                        debug!(error = %err, "standard coercion table failed to build");
                        TypeRegistry::empty()
                    }
                };
                Arc::new(registry)
            })
            .clone()
    }

    fn empty() -> Self {
        Self {
            descriptors: [None; MAX_KINDS],
            table: [[KindOrder::Incomparable; MAX_KINDS]; MAX_KINDS],
        }
    }

    pub fn is_registered(&self, kind: ValueKind) -> bool {
        self.descriptors[kind.code()].is_some()
    }

    pub fn descriptor(&self, kind: ValueKind) -> Option<&KindDescriptor> {
        self.descriptors[kind.code()].as_ref()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.descriptors.iter().flatten().map(|d| d.kind)
    }

    pub fn len(&self) -> usize {
        self.kinds().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw table cell for `(row, column)`.
    pub fn cell(&self, row: ValueKind, column: ValueKind) -> KindOrder {
        self.table[row.code()][column.code()]
    }

    fn result_kind(&self, kind: ValueKind) -> ValueKind {
        self.descriptor(kind).map_or(kind, |d| d.result_kind)
    }

    /// Decide which operand, if any, must be promoted so that an operator can
    /// run on `(left, right)`. An incomparable cell defers to the transposed
    /// cell before giving up.
    pub fn resolve(&self, left: ValueKind, right: ValueKind) -> Resolution {
        if !self.is_registered(left) || !self.is_registered(right) {
            return Resolution::NotApplicable;
        }
        match self.cell(left, right) {
            KindOrder::Equivalent => Resolution::Direct,
            KindOrder::Absorbs => Resolution::PromoteRight(self.result_kind(left)),
            KindOrder::Yields => Resolution::PromoteLeft(self.result_kind(right)),
            KindOrder::Incomparable => match self.cell(right, left) {
                KindOrder::Equivalent => Resolution::Direct,
                KindOrder::Absorbs => Resolution::PromoteLeft(self.result_kind(right)),
                KindOrder::Yields => Resolution::PromoteRight(self.result_kind(left)),
                KindOrder::Incomparable => Resolution::NotApplicable,
            },
        }
    }
}

/// Collects kind declarations and folds them into a [`TypeRegistry`].
///
/// Registering the same declaration twice is a no-op; registering a
/// different declaration for a kind already present is a conflict.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistryBuilder {
    descriptors: Vec<KindDescriptor>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, descriptor: KindDescriptor) -> Result<Self> {
        if let Some(existing) = self.descriptors.iter().find(|d| d.kind == descriptor.kind) {
            if existing.same_declaration(&descriptor) {
                return Ok(self);
            }
            debug!(kind = %descriptor.kind, "conflicting kind declaration");
            return Err(Error::new(
                ErrorCode::RegistryConflict,
                "register",
                format!("{} is already registered with a different declaration", descriptor.kind),
            )
            .with_operands(&[descriptor.kind]));
        }
        if self.descriptors.len() >= MAX_KINDS {
            return Err(Error::new(
                ErrorCode::RegistryConflict,
                "register",
                format!("a registry holds at most {MAX_KINDS} kinds"),
            )
            .with_operands(&[descriptor.kind]));
        }
        self.descriptors.push(descriptor);
        Ok(self)
    }

    pub fn register_all(self, descriptors: impl IntoIterator<Item = KindDescriptor>) -> Result<Self> {
        descriptors.into_iter().try_fold(self, Self::register)
    }

    /// Every [`ValueKind`] with its standard declaration. Kinds already
    /// registered keep their own declaration. Descriptors are unique per
    /// kind, so the result never holds more than `ValueKind::ALL` entries.
    pub fn with_standard_kinds(mut self) -> Self {
        for kind in ValueKind::ALL {
            if !self.descriptors.iter().any(|d| d.kind == kind) {
                self.descriptors.push(kind.descriptor());
            }
        }
        self
    }

    /// Populate the table from each descriptor's `compare` and check that
    /// every pair of declarations agrees.
    pub fn build(self) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::empty();
        for descriptor in &self.descriptors {
            registry.descriptors[descriptor.kind.code()] = Some(*descriptor);
        }
        for row in &self.descriptors {
            for column in &self.descriptors {
                registry.table[row.kind.code()][column.kind.code()] = row.compare(column.kind);
            }
        }
        for a in &self.descriptors {
            if registry.cell(a.kind, a.kind) != KindOrder::Equivalent {
                return Err(conflict(a.kind, a.kind, "a kind must be equivalent to itself"));
            }
            for b in &self.descriptors {
                let (ab, ba) = (registry.cell(a.kind, b.kind), registry.cell(b.kind, a.kind));
                let consistent = ab == KindOrder::Incomparable
                    || ba == KindOrder::Incomparable
                    || ab == ba.transpose();
                if !consistent {
                    debug!(left = %a.kind, right = %b.kind, ?ab, ?ba, "inconsistent coercion declarations");
                    return Err(conflict(a.kind, b.kind, "declarations disagree on the promotion direction"));
                }
            }
        }
        debug!(kinds = self.descriptors.len(), "built coercion table");
        Ok(registry)
    }
}

fn conflict(a: ValueKind, b: ValueKind, message: &str) -> Error {
    Error::new(ErrorCode::RegistryConflict, "build", message).with_operands(&[a, b])
}
