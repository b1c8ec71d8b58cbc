use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use platynui_xdm::{
    CalendarKind, CalendarValue, Decimal, DurationKind, DurationValue, RoundingMode, TypeRegistry, Value, ValueContext,
    ValueKind,
};
use std::hint::black_box;

fn decimal(text: &str) -> Decimal {
    Decimal::parse(text).expect("decimal literal")
}

fn benchmark_decimal(c: &mut Criterion) {
    let a = decimal("12345678901234567890.123456789");
    let b = decimal("-987654321.000000001");
    let three = decimal("3");

    c.bench_function("decimal/parse", |bench| {
        bench.iter(|| black_box(Decimal::parse(black_box("-12345678901234567890.0987654321")).expect("parse")))
    });
    c.bench_function("decimal/add", |bench| bench.iter(|| black_box(black_box(&a) + black_box(&b))));
    c.bench_function("decimal/multiply", |bench| bench.iter(|| black_box(black_box(&a) * black_box(&b))));
    c.bench_function("decimal/round_half_even", |bench| {
        bench.iter(|| black_box(black_box(&a).round(3, RoundingMode::HalfEven)))
    });

    let mut group = c.benchmark_group("decimal/divide");
    for precision in [21u32, 40, 80] {
        group.bench_with_input(BenchmarkId::from_parameter(precision), &precision, |bench, &p| {
            bench.iter(|| black_box(a.checked_div(black_box(&three), p).expect("non-zero divisor")))
        });
    }
    group.finish();
}

fn benchmark_calendar(c: &mut Criterion) {
    let date_time = CalendarValue::parse(CalendarKind::DateTime, "2000-01-31T12:00:00.5+02:00").expect("dateTime");
    let naive = CalendarValue::parse(CalendarKind::DateTime, "1999-12-31T23:59:59").expect("dateTime");
    let month = DurationValue::parse(DurationKind::YearMonth, "P1Y1M").expect("duration");
    let day_time = DurationValue::parse(DurationKind::DayTime, "P3DT4H5M6.789S").expect("duration");

    c.bench_function("calendar/parse_date_time", |bench| {
        bench.iter(|| {
            black_box(CalendarValue::parse(CalendarKind::DateTime, black_box("-0044-03-15T12:30:00Z")).expect("parse"))
        })
    });
    c.bench_function("calendar/add_year_month", |bench| {
        bench.iter(|| black_box(date_time.add_duration(black_box(&month)).expect("in range")))
    });
    c.bench_function("calendar/add_day_time", |bench| {
        bench.iter(|| black_box(date_time.add_duration(black_box(&day_time)).expect("in range")))
    });
    c.bench_function("calendar/difference", |bench| {
        bench.iter(|| black_box(date_time.difference(black_box(&naive), -300).expect("difference")))
    });
    c.bench_function("calendar/compare", |bench| {
        bench.iter(|| black_box(date_time.compare(black_box(&naive), 0).expect("ordered")))
    });
    c.bench_function("calendar/format", |bench| bench.iter(|| black_box(date_time.to_string())));
}

fn benchmark_dispatch(c: &mut Criterion) {
    let ctx = ValueContext::new();
    let registry = TypeRegistry::standard();
    let pairs = [
        ("int_int", Value::Int(40), Value::Int(2)),
        ("int_decimal", Value::Int(40), Value::parse(ValueKind::Decimal, "2.5").expect("decimal")),
        ("byte_double", Value::Byte(4), Value::Double(0.5)),
        ("float_decimal", Value::Float(1.5), Value::parse(ValueKind::Decimal, "0.25").expect("decimal")),
        (
            "date_duration",
            Value::parse(ValueKind::Date, "2020-02-29").expect("date"),
            Value::parse(ValueKind::YearMonthDuration, "P1Y").expect("duration"),
        ),
    ];

    c.bench_function("dispatch/resolve_all_pairs", |bench| {
        bench.iter(|| {
            for left in ValueKind::ALL {
                for right in ValueKind::ALL {
                    black_box(registry.resolve(left, right));
                }
            }
        })
    });

    let mut group = c.benchmark_group("dispatch/add");
    for (name, left, right) in &pairs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(left, right), |bench, (l, r)| {
            bench.iter(|| black_box(ctx.add(black_box(l), black_box(r)).expect("defined")))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("dispatch/equals");
    for (name, left, right) in &pairs[..4] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(left, right), |bench, (l, r)| {
            bench.iter(|| black_box(ctx.equals(black_box(l), black_box(r)).expect("comparable")))
        });
    }
    group.finish();

    c.bench_function("dispatch/double_equality_inexact", |bench| {
        let sum = Value::Double(0.1 + 0.2);
        let literal = Value::Double(0.3);
        bench.iter(|| black_box(ctx.equals(black_box(&sum), black_box(&literal)).expect("comparable")))
    });
}

criterion_group!(benches, benchmark_decimal, benchmark_calendar, benchmark_dispatch);
criterion_main!(benches);
