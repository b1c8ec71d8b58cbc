use chrono::{FixedOffset, NaiveDate, TimeZone};
use platynui_xdm::{CalendarKind, CalendarValue, Decimal, DurationKind, DurationValue, ErrorCode};
use rstest::rstest;

fn cal(kind: CalendarKind, text: &str) -> CalendarValue {
    CalendarValue::parse(kind, text).unwrap_or_else(|e| panic!("bad {kind:?} literal {text}: {e}"))
}

fn dur(kind: DurationKind, text: &str) -> DurationValue {
    DurationValue::parse(kind, text).unwrap_or_else(|e| panic!("bad duration {text}: {e}"))
}

// === Lexical forms ===
#[rstest]
#[case(CalendarKind::DateTime, "2002-10-10T12:00:00-05:00", "2002-10-10T12:00:00-05:00")]
#[case(CalendarKind::DateTime, "2002-10-10T12:00:00.500Z", "2002-10-10T12:00:00.5Z")]
#[case(CalendarKind::DateTime, "2002-10-10T12:00:00+00:00", "2002-10-10T12:00:00Z")]
#[case(CalendarKind::DateTime, "2002-12-31T24:00:00", "2003-01-01T00:00:00")]
#[case(CalendarKind::DateTime, " 2002-10-10T12:00:00.000 ", "2002-10-10T12:00:00")]
#[case(CalendarKind::Date, "-0044-03-15", "-0044-03-15")]
#[case(CalendarKind::Date, "12345-01-01+14:00", "12345-01-01+14:00")]
#[case(CalendarKind::Date, "2000-02-29", "2000-02-29")]
#[case(CalendarKind::Time, "13:20:00-05:00", "13:20:00-05:00")]
#[case(CalendarKind::Time, "24:00:00", "00:00:00")]
#[case(CalendarKind::Time, "00:00:00.0001", "00:00:00.0001")]
#[case(CalendarKind::GYearMonth, "2001-10", "2001-10")]
#[case(CalendarKind::GYear, "-0001", "-0001")]
#[case(CalendarKind::GMonthDay, "--02-29", "--02-29")]
#[case(CalendarKind::GDay, "---31Z", "---31Z")]
#[case(CalendarKind::GMonth, "--12-13:30", "--12-13:30")]
fn canonical_lexical_forms(#[case] kind: CalendarKind, #[case] input: &str, #[case] canonical: &str) {
    let value = cal(kind, input);
    assert_eq!(value.to_string(), canonical);
    assert_eq!(cal(kind, canonical).to_string(), canonical);
}

#[rstest]
#[case(CalendarKind::Date, "2021-02-29")]
#[case(CalendarKind::Date, "1900-02-29")]
#[case(CalendarKind::Date, "2020-13-01")]
#[case(CalendarKind::Date, "2020-04-31")]
#[case(CalendarKind::Date, "0000-01-01")]
#[case(CalendarKind::Date, "01-01-01")]
#[case(CalendarKind::Date, "02021-01-01")]
#[case(CalendarKind::Date, "+2021-01-01")]
#[case(CalendarKind::Date, "2021-1-01")]
#[case(CalendarKind::Date, "2021-01-01+15:00")]
#[case(CalendarKind::Date, "2021-01-01+14:01")]
#[case(CalendarKind::Date, "2021-01-01+05:60")]
#[case(CalendarKind::Date, "2021-01-01Z+")]
#[case(CalendarKind::DateTime, "2021-01-01T25:00:00")]
#[case(CalendarKind::DateTime, "2021-01-01T24:00:01")]
#[case(CalendarKind::DateTime, "2021-01-01T24:00:00.5")]
#[case(CalendarKind::DateTime, "2021-01-01T12:00")]
#[case(CalendarKind::DateTime, "2021-01-01T12:00:00.")]
#[case(CalendarKind::DateTime, "2021-01-01")]
#[case(CalendarKind::Time, "12:60:00")]
#[case(CalendarKind::Time, "12:00:60")]
#[case(CalendarKind::GMonthDay, "--02-30")]
#[case(CalendarKind::GDay, "---32")]
#[case(CalendarKind::GMonth, "--13")]
#[case(CalendarKind::GYear, "-0000")]
fn rejects_malformed_text(#[case] kind: CalendarKind, #[case] input: &str) {
    let err = CalendarValue::parse(kind, input).expect_err("must not parse");
    assert_eq!(err.code, ErrorCode::LexicalFormat, "{input}");
    assert_eq!(err.operands.as_slice(), &[kind.value_kind()]);
}

#[test]
fn typed_constructors_use_signed_years() {
    let caesar = CalendarValue::date(-44, 3, 15, None).expect("valid date");
    assert_eq!(caesar.to_string(), "-0044-03-15");
    assert!(caesar.is_bce());
    assert_eq!(caesar.year(), Some(-44));
    assert_eq!(
        CalendarValue::date(0, 1, 1, None).expect_err("no year zero").code,
        ErrorCode::LexicalFormat
    );
    let noon = CalendarValue::date_time(1999, 5, 31, 13, 20, &Decimal::parse("5.25").expect("decimal"), Some(-300))
        .expect("valid dateTime");
    assert_eq!(noon.to_string(), "1999-05-31T13:20:05.25-05:00");
    assert!(CalendarValue::time(12, 0, &Decimal::from(60u8), None).is_err());
}

#[test]
fn accessors_report_fields() {
    let v = cal(CalendarKind::DateTime, "1999-05-31T13:20:07.5-05:00");
    assert_eq!(v.year(), Some(1999));
    assert_eq!(v.month(), Some(5));
    assert_eq!(v.day(), Some(31));
    assert_eq!(v.hours(), Some(13));
    assert_eq!(v.minutes(), Some(20));
    assert_eq!(v.seconds().map(|s| s.to_string()).as_deref(), Some("7.5"));
    assert_eq!(v.timezone().map(|tz| tz.to_string()).as_deref(), Some("-PT5H"));

    let day = cal(CalendarKind::GDay, "---05");
    assert_eq!(day.year(), None);
    assert_eq!(day.month(), None);
    assert_eq!(day.day(), Some(5));
    assert_eq!(day.timezone(), None);
}

// === Date arithmetic ===
#[rstest]
#[case("2021-01-31", "P1M", "2021-02-28")]
#[case("2020-01-31", "P1M", "2020-02-29")]
#[case("2020-02-29", "P1Y", "2021-02-28")]
#[case("2021-03-31", "-P1M", "2021-02-28")]
#[case("2021-12-15", "P1M", "2022-01-15")]
#[case("2021-01-15", "-P13M", "2019-12-15")]
#[case("-0044-03-15", "P1Y", "-0043-03-15")]
#[case("0001-06-01", "-P1Y", "-0001-06-01")]
fn year_month_shift_clamps_the_day(#[case] date: &str, #[case] shift: &str, #[case] expected: &str) {
    let shifted = cal(CalendarKind::Date, date)
        .add_duration(&dur(DurationKind::YearMonth, shift))
        .expect("in range");
    assert_eq!(shifted.to_string(), expected);
}

#[test]
fn month_shift_keeps_time_and_offset() {
    let v = cal(CalendarKind::DateTime, "2021-01-31T10:15:00+02:00");
    let shifted = v.add_duration(&dur(DurationKind::YearMonth, "P1M")).expect("in range");
    assert_eq!(shifted.to_string(), "2021-02-28T10:15:00+02:00");
}

#[rstest]
#[case(CalendarKind::Date, "-0001-12-31", "P1D", "0001-01-01")]
#[case(CalendarKind::Date, "0001-01-01", "-P1D", "-0001-12-31")]
#[case(CalendarKind::Date, "2000-01-01", "-PT1S", "1999-12-31")]
#[case(CalendarKind::Date, "2000-01-01", "PT23H", "2000-01-01")]
#[case(CalendarKind::DateTime, "0001-01-01T00:00:00Z", "-PT1S", "-0001-12-31T23:59:59Z")]
#[case(CalendarKind::DateTime, "2000-02-28T23:00:00", "PT1H30.5S", "2000-02-29T00:00:30.5")]
#[case(CalendarKind::DateTime, "1999-12-31T23:59:59.999", "PT0.001S", "2000-01-01T00:00:00")]
#[case(CalendarKind::Time, "23:30:00", "PT1H", "00:30:00")]
#[case(CalendarKind::Time, "00:30:00+05:00", "-PT1H", "23:30:00+05:00")]
#[case(CalendarKind::Time, "12:00:00", "P3DT2H", "14:00:00")]
fn day_time_shift_runs_on_elapsed_seconds(
    #[case] kind: CalendarKind,
    #[case] start: &str,
    #[case] shift: &str,
    #[case] expected: &str,
) {
    let shifted = cal(kind, start)
        .add_duration(&dur(DurationKind::DayTime, shift))
        .expect("in range");
    assert_eq!(shifted.to_string(), expected);
}

#[test]
fn unconstrained_duration_applies_months_then_seconds() {
    let start = cal(CalendarKind::DateTime, "2000-01-31T12:00:00");
    let shifted = start
        .add_duration(&dur(DurationKind::Duration, "P1M1DT1H"))
        .expect("in range");
    // Jan 31 + 1 month pins to Feb 29, then one day and an hour
    assert_eq!(shifted.to_string(), "2000-03-01T13:00:00");
    let back = shifted
        .subtract_duration(&dur(DurationKind::Duration, "P1DT1H"))
        .expect("in range");
    assert_eq!(back.to_string(), "2000-02-29T12:00:00");
}

#[test]
fn time_rejects_year_month_durations() {
    let err = cal(CalendarKind::Time, "10:00:00")
        .add_duration(&dur(DurationKind::YearMonth, "P1M"))
        .expect_err("not applicable");
    assert_eq!(err.code, ErrorCode::OperatorNotApplicable);
}

#[test]
fn arithmetic_past_the_year_range_overflows() {
    let err = cal(CalendarKind::Date, "999999999-12-31")
        .add_duration(&dur(DurationKind::DayTime, "P1D"))
        .expect_err("out of range");
    assert_eq!(err.code, ErrorCode::Overflow);
    let err = cal(CalendarKind::Date, "-999999999-01-01")
        .add_duration(&dur(DurationKind::YearMonth, "-P1Y"))
        .expect_err("out of range");
    assert_eq!(err.code, ErrorCode::Overflow);
}

// === Instant subtraction ===
#[rstest]
#[case(CalendarKind::DateTime, "2017-07-05T17:01:20-02:00", "2017-07-04T17:01:20-02:00", "P1D")]
#[case(CalendarKind::DateTime, "2017-07-05T00:00:00Z", "2017-07-05T00:00:00+02:00", "PT2H")]
#[case(CalendarKind::DateTime, "2000-03-01T00:00:00", "2000-02-28T00:00:00", "P2D")]
#[case(CalendarKind::DateTime, "2000-01-01T00:00:00", "2000-01-01T00:00:00.25", "-PT0.25S")]
#[case(CalendarKind::Date, "0001-01-01", "-0001-12-31", "P1D")]
#[case(CalendarKind::Date, "0001-01-01", "-0001-01-01", "P366D")]
#[case(CalendarKind::Date, "2001-01-01", "2000-01-01", "P366D")]
#[case(CalendarKind::Time, "10:00:00", "09:30:00.5", "PT29M59.5S")]
#[case(CalendarKind::Time, "11:00:00", "11:00:00", "PT0S")]
fn subtraction_yields_day_time_durations(
    #[case] kind: CalendarKind,
    #[case] later: &str,
    #[case] earlier: &str,
    #[case] expected: &str,
) {
    let diff = cal(kind, later).difference(&cal(kind, earlier), 0).expect("comparable");
    assert_eq!(diff.kind(), DurationKind::DayTime);
    assert_eq!(diff.to_string(), expected);
}

#[test]
fn subtraction_uses_the_implicit_timezone_for_naive_values() {
    let naive = cal(CalendarKind::DateTime, "2000-01-01T12:00:00");
    let utc = cal(CalendarKind::DateTime, "2000-01-01T12:00:00Z");
    assert_eq!(naive.difference(&utc, 0).expect("comparable").to_string(), "PT0S");
    assert_eq!(naive.difference(&utc, -300).expect("comparable").to_string(), "PT5H");
}

// === Comparison ===
#[rstest]
#[case(CalendarKind::DateTime, "2002-04-02T12:00:00-01:00", "2002-04-02T17:00:00+04:00", 0, true)]
#[case(CalendarKind::DateTime, "2002-04-02T12:00:00", "2002-04-02T23:00:00+06:00", -300, true)]
#[case(CalendarKind::DateTime, "2002-04-02T12:00:00", "2002-04-02T23:00:00+06:00", 0, false)]
#[case(CalendarKind::DateTime, "2002-04-02T24:00:00Z", "2002-04-03T00:00:00Z", 0, true)]
#[case(CalendarKind::Time, "08:00:00+09:00", "17:00:00-06:00", 0, false)]
#[case(CalendarKind::Time, "21:30:00+10:30", "06:00:00-05:00", 0, true)]
#[case(CalendarKind::Date, "2004-12-25Z", "2004-12-25+07:00", 0, false)]
#[case(CalendarKind::GDay, "---12-05:00", "---12Z", 0, false)]
#[case(CalendarKind::GMonthDay, "--12-25-14:00", "--12-26+10:00", 0, true)]
#[case(CalendarKind::GYear, "2005-12:00", "2005+12:00", 0, false)]
fn equality_compares_instants(
    #[case] kind: CalendarKind,
    #[case] a: &str,
    #[case] b: &str,
    #[case] implicit: i16,
    #[case] expected: bool,
) {
    assert_eq!(cal(kind, a).equals(&cal(kind, b), implicit).expect("comparable"), expected);
}

#[test]
fn ordering_follows_the_time_line() {
    use core::cmp::Ordering;
    let bce = cal(CalendarKind::Date, "-0001-12-31");
    let ce = cal(CalendarKind::Date, "0001-01-01");
    assert_eq!(bce.compare(&ce, 0).expect("ordered"), Ordering::Less);
    let east = cal(CalendarKind::DateTime, "2000-01-01T10:00:00+05:00");
    let west = cal(CalendarKind::DateTime, "2000-01-01T06:00:00Z");
    assert_eq!(east.compare(&west, 0).expect("ordered"), Ordering::Less);
}

#[test]
fn fragments_and_mixed_kinds_have_no_order() {
    let a = cal(CalendarKind::GYear, "2005");
    let err = a.compare(&a.clone(), 0).expect_err("gYear is unordered");
    assert_eq!(err.code, ErrorCode::OperatorNotApplicable);
    let date = cal(CalendarKind::Date, "2005-01-01");
    let date_time = cal(CalendarKind::DateTime, "2005-01-01T00:00:00");
    assert!(date.equals(&date_time, 0).is_err());
}

// === Projections and timezone adjustment ===
#[test]
fn projections_zero_unused_fields() {
    let v = cal(CalendarKind::DateTime, "-0044-03-15T10:00:00+01:00");
    assert_eq!(v.to_date().expect("date").to_string(), "-0044-03-15+01:00");
    assert_eq!(v.to_time().expect("time").to_string(), "10:00:00+01:00");
    assert_eq!(v.project(CalendarKind::GYearMonth).expect("projects").to_string(), "-0044-03+01:00");
    assert_eq!(v.project(CalendarKind::GMonthDay).expect("projects").to_string(), "--03-15+01:00");
    assert_eq!(v.project(CalendarKind::GDay).expect("projects").to_string(), "---15+01:00");
    let date = cal(CalendarKind::Date, "2020-02-29");
    assert!(date.project(CalendarKind::Time).is_err());
}

#[test]
fn date_and_time_combine() {
    let date = cal(CalendarKind::Date, "1999-12-31");
    let time = cal(CalendarKind::Time, "12:00:00Z");
    let combined = CalendarValue::from_date_and_time(&date, &time).expect("combines");
    assert_eq!(combined.to_string(), "1999-12-31T12:00:00Z");
    let err = CalendarValue::from_date_and_time(&cal(CalendarKind::Date, "1999-12-31+01:00"), &time)
        .expect_err("conflicting timezones");
    assert_eq!(err.code, ErrorCode::InvalidOperand);
}

#[rstest]
#[case("2002-03-07T10:00:00-05:00", Some(-600), "2002-03-07T05:00:00-10:00")]
#[case("2002-03-07T10:00:00", Some(-300), "2002-03-07T10:00:00-05:00")]
#[case("2002-03-07T10:00:00-07:00", None, "2002-03-07T10:00:00")]
#[case("2002-03-07T00:00:00+01:00", Some(-480), "2002-03-06T15:00:00-08:00")]
fn adjusts_to_timezone(#[case] input: &str, #[case] target: Option<i16>, #[case] expected: &str) {
    let adjusted = cal(CalendarKind::DateTime, input)
        .adjust_to_timezone(target)
        .expect("valid timezone");
    assert_eq!(adjusted.to_string(), expected);
}

#[test]
fn adjust_rejects_offsets_beyond_fourteen_hours() {
    let v = cal(CalendarKind::Time, "10:00:00");
    assert_eq!(v.adjust_to_timezone(Some(15 * 60)).expect_err("too far").code, ErrorCode::InvalidOperand);
}

// === chrono interop ===
#[test]
fn converts_to_and_from_chrono() {
    let date = cal(CalendarKind::Date, "2020-02-29");
    assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(2020, 2, 29));
    assert_eq!(cal(CalendarKind::Date, "-0044-03-15").to_naive_date(), None);

    let v = cal(CalendarKind::DateTime, "2021-06-01T08:30:15.125+02:00");
    let stamp = v.to_chrono().expect("has an offset");
    let offset = FixedOffset::east_opt(7_200).expect("valid offset");
    let expected = offset
        .with_ymd_and_hms(2021, 6, 1, 8, 30, 15)
        .single()
        .expect("unambiguous")
        + chrono::Duration::milliseconds(125);
    assert_eq!(stamp, expected);

    let back = CalendarValue::from_chrono(&stamp).expect("in range");
    assert_eq!(back.to_string(), "2021-06-01T08:30:15.125+02:00");
    assert!(cal(CalendarKind::DateTime, "2021-06-01T08:30:15").to_chrono().is_none());
}
