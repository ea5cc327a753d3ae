//! Leap-second aliasing, scale conversions and timestamp formatting.

use astrodyn::time::{AtomicTime, CivilTime, TimeFormat, TimeScale};
use astrodyn::AstrodynError;

fn utc(precision: usize) -> TimeFormat {
    TimeFormat::new(TimeScale::Utc, precision)
}

#[test]
fn leap_second_aliasing_across_2016_boundary() {
    let fmt = utc(3);
    let at_leap = fmt.parse("2016-12-31T23:59:60.000").unwrap();
    let at_leap_half = fmt.parse("2016-12-31T23:59:60.500").unwrap();
    let after = fmt.parse("2017-01-01T00:00:00.000").unwrap();
    let after_half = fmt.parse("2017-01-01T00:00:00.500").unwrap();

    // Distinguishable atomically: a whole extra second elapses.
    assert_eq!(after.subtract(&at_leap), 1_000_000);
    assert_eq!(after_half.subtract(&at_leap_half), 1_000_000);
    assert!(at_leap.before(&after));

    // Aliased in civil form: both render as the first second of January 1.
    assert_eq!(fmt.format(&at_leap).unwrap(), "2017-01-01T00:00:00.000 UTC");
    assert_eq!(fmt.format(&after).unwrap(), "2017-01-01T00:00:00.000 UTC");
    assert_eq!(
        fmt.format(&at_leap_half).unwrap(),
        "2017-01-01T00:00:00.500 UTC"
    );
    assert_eq!(
        fmt.format(&after_half).unwrap(),
        "2017-01-01T00:00:00.500 UTC"
    );

    // The instant just before the leap second is still on December 31.
    let before = fmt.parse("2016-12-31T23:59:59.999").unwrap();
    assert_eq!(fmt.format(&before).unwrap(), "2016-12-31T23:59:59.999 UTC");
}

#[test]
fn table_floor_is_inclusive() {
    let fmt = utc(0);
    let floor = fmt.parse("1972-01-01T00:00:00").unwrap();
    assert_eq!(fmt.format(&floor).unwrap(), "1972-01-01T00:00:00 UTC");

    assert!(matches!(
        fmt.parse("1971-12-31T23:59:59"),
        Err(AstrodynError::TimeOutOfRange(_))
    ));
    // One tick below the floor fails even though the floor succeeds.
    assert!(matches!(
        floor.add(-1).to_civil(),
        Err(AstrodynError::TimeOutOfRange(_))
    ));
}

#[test]
fn tai_utc_offset_matches_table() {
    // 2010: TAI-UTC = 34 s, so equal civil readings differ by 34 s.
    let u = utc(0).parse("2010-06-01T12:00:00").unwrap();
    let a = TimeFormat::new(TimeScale::Tai, 0)
        .parse("2010-06-01T12:00:00")
        .unwrap();
    assert_eq!(u.subtract(&a), 34_000_000);
}

#[test]
fn scale_ladder_at_one_instant() {
    let t = utc(0).parse("2010-01-15T00:00:00").unwrap();
    let tai = t.to_mjd(TimeScale::Tai).unwrap();
    let utc_mjd = t.to_mjd(TimeScale::Utc).unwrap();
    let tt = t.to_mjd(TimeScale::Tt).unwrap();
    let tdb = t.to_mjd(TimeScale::Tdb).unwrap();

    assert!(((tai - utc_mjd) * 86_400.0 - 34.0).abs() < 1e-6);
    assert!(((tt - tai) * 86_400.0 - 32.184).abs() < 1e-6);
    // TDB stays within its 1.657 ms envelope of TT.
    assert!(((tdb - tt) * 86_400.0).abs() < 0.001_657 + 1e-9);
}

#[test]
fn utc_mjd_cross_checked_against_hifitime() {
    for (y, m, d, h) in [(2004, 2, 29, 0), (2010, 1, 15, 12), (2017, 1, 1, 0)] {
        let t = AtomicTime::from_civil(&CivilTime {
            year: y,
            month: m,
            day: d,
            hour: h,
            minute: 0,
            second: 0,
            microsecond: 0,
        })
        .unwrap();
        let ours = t.to_mjd(TimeScale::Utc).unwrap();
        let theirs = hifitime::Epoch::from_gregorian_utc(y, m, d, h, 0, 0, 0).to_mjd_utc_days();
        assert!(
            (ours - theirs).abs() < 1e-9,
            "{y}-{m}-{d}T{h}: {ours} vs {theirs}"
        );
    }
}

#[test]
fn format_parse_roundtrip_across_scales() {
    let stamps = [
        (TimeScale::Utc, "2010-01-15T06:30:00.123456 UTC"),
        (TimeScale::Tai, "1999-12-31T23:59:59.000001 TAI"),
        (TimeScale::Tt, "2017-01-01T00:00:00.000000 TT"),
        (TimeScale::Tdb, "2010-01-15T00:00:00.500000 TDB"),
    ];
    for (scale, text) in stamps {
        let fmt = TimeFormat::new(scale, 6);
        let t = fmt.parse(text).unwrap();
        assert_eq!(fmt.format(&t).unwrap(), text, "{scale}");
    }
}

#[test]
fn precision_truncates_not_rounds() {
    let fmt = utc(2);
    let t = utc(6).parse("2010-01-15T06:30:00.987654").unwrap();
    assert_eq!(fmt.format(&t).unwrap(), "2010-01-15T06:30:00.98 UTC");
    assert_eq!(utc(0).format(&t).unwrap(), "2010-01-15T06:30:00 UTC");
}

#[test]
fn exact_arithmetic_survives_large_offsets() {
    let t = utc(0).parse("2010-01-15T00:00:00").unwrap();
    // A century of microsecond ticks, forward and back, is lossless.
    let far = t.add(100 * 365 * 86_400_000_000);
    assert_eq!(far.subtract(&t), 100 * 365 * 86_400_000_000);
    assert_eq!(far.add(-(100 * 365 * 86_400_000_000)), t);
}
