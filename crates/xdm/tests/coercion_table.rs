use platynui_xdm::{
    ErrorCode, KindDescriptor, KindOrder, Resolution, TypeRegistry, ValueKind, standard_order,
};
use rstest::rstest;
use std::sync::Arc;

#[test]
fn standard_registry_holds_every_kind() {
    let registry = TypeRegistry::standard();
    assert_eq!(registry.len(), ValueKind::ALL.len());
    for kind in ValueKind::ALL {
        assert!(registry.is_registered(kind), "{kind}");
        assert_eq!(registry.descriptor(kind).map(|d| d.kind), Some(kind));
    }
}

#[test]
fn standard_registry_is_built_once() {
    let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(TypeRegistry::standard)).collect();
    let first = TypeRegistry::standard();
    for handle in handles {
        let registry = handle.join().expect("thread finished");
        assert!(Arc::ptr_eq(&first, &registry));
    }
}

#[test]
fn resolution_is_consistent_for_every_pair() {
    let registry = TypeRegistry::standard();
    for a in ValueKind::ALL {
        assert_eq!(registry.resolve(a, a), Resolution::Direct, "{a}");
        for b in ValueKind::ALL {
            let forward = registry.resolve(a, b);
            let backward = registry.resolve(b, a);
            assert_eq!(backward, forward.mirrored(), "{a} vs {b}");
        }
    }
}

#[test]
fn table_cells_transpose() {
    let registry = TypeRegistry::standard();
    for a in ValueKind::ALL {
        for b in ValueKind::ALL {
            let (ab, ba) = (registry.cell(a, b), registry.cell(b, a));
            if ab != KindOrder::Incomparable && ba != KindOrder::Incomparable {
                assert_eq!(ab, ba.transpose(), "{a} vs {b}");
            }
        }
    }
}

#[rstest]
#[case(ValueKind::Int, ValueKind::Decimal, Resolution::PromoteLeft(ValueKind::Decimal))]
#[case(ValueKind::Long, ValueKind::Byte, Resolution::PromoteRight(ValueKind::Integer))]
#[case(ValueKind::Byte, ValueKind::Integer, Resolution::PromoteLeft(ValueKind::Integer))]
#[case(ValueKind::Double, ValueKind::Integer, Resolution::PromoteRight(ValueKind::Double))]
#[case(ValueKind::Float, ValueKind::Double, Resolution::PromoteLeft(ValueKind::Double))]
#[case(ValueKind::Decimal, ValueKind::Float, Resolution::PromoteLeft(ValueKind::Float))]
#[case(ValueKind::Duration, ValueKind::DayTimeDuration, Resolution::PromoteRight(ValueKind::Duration))]
#[case(ValueKind::YearMonthDuration, ValueKind::Duration, Resolution::PromoteLeft(ValueKind::Duration))]
#[case(ValueKind::DayTimeDuration, ValueKind::YearMonthDuration, Resolution::NotApplicable)]
#[case(ValueKind::Date, ValueKind::DayTimeDuration, Resolution::Direct)]
#[case(ValueKind::YearMonthDuration, ValueKind::DateTime, Resolution::Direct)]
#[case(ValueKind::DayTimeDuration, ValueKind::Double, Resolution::Direct)]
#[case(ValueKind::Date, ValueKind::DateTime, Resolution::NotApplicable)]
#[case(ValueKind::String, ValueKind::Integer, Resolution::NotApplicable)]
#[case(ValueKind::Boolean, ValueKind::String, Resolution::NotApplicable)]
#[case(ValueKind::QName, ValueKind::QName, Resolution::Direct)]
fn resolves_standard_pairs(#[case] left: ValueKind, #[case] right: ValueKind, #[case] expected: Resolution) {
    assert_eq!(TypeRegistry::standard().resolve(left, right), expected);
}

#[test]
fn registration_is_idempotent() {
    let registry = TypeRegistry::builder()
        .register(ValueKind::Integer.descriptor())
        .and_then(|b| b.register(ValueKind::Integer.descriptor()))
        .and_then(|b| b.build())
        .expect("identical declarations");
    assert_eq!(registry.len(), 1);
    assert!(registry.is_registered(ValueKind::Integer));
    assert!(!registry.is_registered(ValueKind::Decimal));
}

#[test]
fn registration_order_does_not_matter() {
    let mut reversed = ValueKind::ALL;
    reversed.reverse();
    let registry = TypeRegistry::builder()
        .register_all(reversed.into_iter().map(ValueKind::descriptor))
        .and_then(|b| b.build())
        .expect("standard declarations");
    let standard = TypeRegistry::standard();
    for a in ValueKind::ALL {
        for b in ValueKind::ALL {
            assert_eq!(registry.cell(a, b), standard.cell(a, b));
        }
    }
}

#[test]
fn conflicting_declarations_are_rejected() {
    let renamed = KindDescriptor::new(ValueKind::Integer, ValueKind::Decimal, true, standard_order);
    let err = TypeRegistry::builder()
        .register(ValueKind::Integer.descriptor())
        .and_then(|b| b.register(renamed))
        .expect_err("two declarations for one kind");
    assert_eq!(err.code, ErrorCode::RegistryConflict);
    assert_eq!(err.operands.as_slice(), &[ValueKind::Integer]);
}

fn greedy(this: ValueKind, other: ValueKind) -> KindOrder {
    if this == other { KindOrder::Equivalent } else { KindOrder::Absorbs }
}

fn aloof(_: ValueKind, _: ValueKind) -> KindOrder {
    KindOrder::Incomparable
}

#[test]
fn disagreeing_directions_fail_the_build() {
    let err = TypeRegistry::builder()
        .register(KindDescriptor::new(ValueKind::Int, ValueKind::Int, true, greedy))
        .and_then(|b| b.register(KindDescriptor::new(ValueKind::Decimal, ValueKind::Decimal, true, greedy)))
        .and_then(|b| b.build())
        .expect_err("both kinds claim to absorb the other");
    assert_eq!(err.code, ErrorCode::RegistryConflict);
}

#[test]
fn a_kind_must_be_equivalent_to_itself() {
    let err = TypeRegistry::builder()
        .register(KindDescriptor::new(ValueKind::Boolean, ValueKind::Boolean, false, aloof))
        .and_then(|b| b.build())
        .expect_err("not reflexive");
    assert_eq!(err.code, ErrorCode::RegistryConflict);
}

#[test]
fn one_sided_declarations_resolve_through_the_transpose() {
    let registry = TypeRegistry::builder()
        .register(ValueKind::Duration.descriptor())
        .and_then(|b| b.register(ValueKind::DayTimeDuration.descriptor()))
        .and_then(|b| b.build())
        .expect("consistent");
    assert_eq!(registry.cell(ValueKind::DayTimeDuration, ValueKind::Duration), KindOrder::Incomparable);
    assert_eq!(
        registry.resolve(ValueKind::DayTimeDuration, ValueKind::Duration),
        Resolution::PromoteLeft(ValueKind::Duration)
    );
}

fn boolean_absorbs_strings(this: ValueKind, other: ValueKind) -> KindOrder {
    match other {
        _ if this == other => KindOrder::Equivalent,
        ValueKind::String => KindOrder::Absorbs,
        _ => KindOrder::Incomparable,
    }
}

#[test]
fn standard_kinds_fill_in_around_custom_declarations() {
    let registry = TypeRegistry::builder()
        .register(KindDescriptor::new(ValueKind::Boolean, ValueKind::Boolean, false, boolean_absorbs_strings))
        .map(|b| b.with_standard_kinds().with_standard_kinds())
        .and_then(|b| b.build())
        .expect("consistent");
    assert_eq!(registry.len(), ValueKind::ALL.len());
    assert!(ValueKind::ALL.into_iter().all(|k| registry.is_registered(k)));
    assert_eq!(
        registry.resolve(ValueKind::Boolean, ValueKind::String),
        Resolution::PromoteRight(ValueKind::Boolean)
    );
    assert_eq!(
        TypeRegistry::standard().resolve(ValueKind::Boolean, ValueKind::String),
        Resolution::NotApplicable
    );
}

#[test]
fn unregistered_kinds_never_resolve() {
    let registry = TypeRegistry::builder()
        .register(ValueKind::Int.descriptor())
        .and_then(|b| b.build())
        .expect("single kind");
    assert_eq!(registry.resolve(ValueKind::Int, ValueKind::Double), Resolution::NotApplicable);
}

#[test]
fn order_codes() {
    assert_eq!(KindOrder::Absorbs.code(), Some(-1));
    assert_eq!(KindOrder::Equivalent.code(), Some(0));
    assert_eq!(KindOrder::Yields.code(), Some(1));
    assert_eq!(KindOrder::Incomparable.code(), None);
    assert_eq!(ValueKind::Int.descriptor().compare(ValueKind::Long), KindOrder::Yields);
    assert_eq!(ValueKind::from_xs_name("xs:dayTimeDuration"), Some(ValueKind::DayTimeDuration));
}
