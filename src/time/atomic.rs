//! Atomic time: exact microsecond ticks on the TAI scale.
//!
//! [`AtomicTime`] counts microseconds since 1958-01-01T00:00:00 TAI as a
//! signed 64-bit integer, so all arithmetic and comparison is exact and every
//! instant has a single representation. Conversion to and from civil (UTC)
//! form goes through the leap-second table in [`super::leap`]; conversion to
//! continuous day numbers (MJD) per time scale lives alongside in
//! [`super::scale`].

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{
    Microseconds, MICROSECONDS_PER_DAY, MJD, MJD_1958, TT_MINUS_TAI_MICROSECONDS,
};
use crate::time::leap::{offset_for_atomic, offset_for_civil_day};
use crate::time::scale::{tdb_minus_tt_seconds, TimeScale};

/// Days between 1958-01-01 and 1970-01-01.
pub(crate) const DAYS_1958_TO_1970: i64 = 4383;

/// Microseconds since 1958-01-01T00:00:00 TAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomicTime(i64);

/// A civil (calendar) timestamp.
///
/// `second` may be 60 during an inserted leap second, so `23:59:60.xxx` is
/// constructible as an input to [`AtomicTime::from_civil`]. Conversions back
/// from atomic time never produce a 60th second: the inserted second aliases
/// onto the first second of the following day (see [`AtomicTime::to_civil`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
}

impl CivilTime {
    /// Day number since 1958-01-01.
    pub fn day_number(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day) + DAYS_1958_TO_1970
    }

    /// Microseconds elapsed since this day's civil midnight. Can exceed one
    /// nominal day during an inserted leap second.
    pub fn microsecond_of_day(&self) -> i64 {
        ((self.hour as i64 * 60 + self.minute as i64) * 60 + self.second as i64) * 1_000_000
            + self.microsecond as i64
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub(crate) fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if month > 2 { month as i64 - 3 } else { month as i64 + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Inverse of [`days_from_civil`].
pub(crate) fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719468;
    let era = z.div_euclid(146097);
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

impl AtomicTime {
    /// Construct from a raw microsecond tick count.
    pub fn from_microseconds(microseconds: Microseconds) -> Self {
        AtomicTime(microseconds)
    }

    pub fn as_microseconds(&self) -> Microseconds {
        self.0
    }

    /// Exact offset arithmetic; never loses precision.
    pub fn add(&self, microseconds: Microseconds) -> Self {
        AtomicTime(self.0 + microseconds)
    }

    /// Signed separation `self − other` in microseconds.
    pub fn subtract(&self, other: &AtomicTime) -> Microseconds {
        self.0 - other.0
    }

    pub fn before(&self, other: &AtomicTime) -> bool {
        self < other
    }

    pub fn after(&self, other: &AtomicTime) -> bool {
        self > other
    }

    pub fn at_or_before(&self, other: &AtomicTime) -> bool {
        self <= other
    }

    pub fn at_or_after(&self, other: &AtomicTime) -> bool {
        self >= other
    }

    pub fn earliest(a: AtomicTime, b: AtomicTime) -> AtomicTime {
        a.min(b)
    }

    pub fn latest(a: AtomicTime, b: AtomicTime) -> AtomicTime {
        a.max(b)
    }

    /// Convert a civil (UTC) timestamp to atomic time.
    ///
    /// The leap-second offset in force on the civil day is added to the
    /// nominal elapsed time. A 60th second is accepted and lands inside the
    /// inserted leap second. Civil instants before 1972-01-01 fail with a
    /// range error; the floor instant itself succeeds.
    pub fn from_civil(civil: &CivilTime) -> Result<Self, AstrodynError> {
        let day = civil.day_number();
        let offset = offset_for_civil_day(day)?;
        Ok(AtomicTime(
            day * MICROSECONDS_PER_DAY + civil.microsecond_of_day() + offset,
        ))
    }

    /// Convert atomic time to a civil (UTC) timestamp.
    ///
    /// The offset in force *at the atomic instant* is subtracted, so the two
    /// atomic values reached from `23:59:60.500` and the following
    /// `00:00:00.500` both convert to `00:00:00.500` of the next day. This
    /// aliasing is intentional: civil form cannot name the inserted second.
    pub fn to_civil(&self) -> Result<CivilTime, AstrodynError> {
        let offset = offset_for_atomic(self.0)?;
        let utc = self.0 - offset;
        let day = utc.div_euclid(MICROSECONDS_PER_DAY);
        let of_day = utc.rem_euclid(MICROSECONDS_PER_DAY);
        let (year, month, d) = civil_from_days(day - DAYS_1958_TO_1970);
        let second_of_day = of_day / 1_000_000;
        Ok(CivilTime {
            year,
            month,
            day: d,
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day / 60 % 60) as u8,
            second: (second_of_day % 60) as u8,
            microsecond: (of_day % 1_000_000) as u32,
        })
    }

    /// Continuous day-number (MJD) representation in the requested scale.
    ///
    /// Only the UTC conversion can fail (leap-second table floor).
    pub fn to_mjd(&self, scale: TimeScale) -> Result<MJD, AstrodynError> {
        let day_us = MICROSECONDS_PER_DAY as f64;
        match scale {
            TimeScale::Tai => Ok(self.0 as f64 / day_us + MJD_1958),
            TimeScale::Tt => Ok((self.0 + TT_MINUS_TAI_MICROSECONDS) as f64 / day_us + MJD_1958),
            TimeScale::Tdb => {
                let tt = (self.0 + TT_MINUS_TAI_MICROSECONDS) as f64 / day_us + MJD_1958;
                Ok(tt + tdb_minus_tt_seconds(tt) / 86_400.0)
            }
            TimeScale::Utc => {
                let offset = offset_for_atomic(self.0)?;
                Ok((self.0 - offset) as f64 / day_us + MJD_1958)
            }
        }
    }

    /// Inverse of [`to_mjd`](Self::to_mjd), quantized to the nearest
    /// microsecond tick.
    pub fn from_mjd(scale: TimeScale, mjd: MJD) -> Result<Self, AstrodynError> {
        let day_us = MICROSECONDS_PER_DAY as f64;
        match scale {
            TimeScale::Tai => Ok(AtomicTime(((mjd - MJD_1958) * day_us).round() as i64)),
            TimeScale::Tt => Ok(AtomicTime(
                ((mjd - MJD_1958) * day_us).round() as i64 - TT_MINUS_TAI_MICROSECONDS,
            )),
            TimeScale::Tdb => {
                // The TDB−TT offset varies over months; two fixed-point
                // passes pin it well below the microsecond tick.
                let mut tt = mjd - tdb_minus_tt_seconds(mjd) / 86_400.0;
                tt = mjd - tdb_minus_tt_seconds(tt) / 86_400.0;
                Self::from_mjd(TimeScale::Tt, tt)
            }
            TimeScale::Utc => {
                let elapsed = mjd - MJD_1958;
                let mut day = elapsed.floor() as i64;
                let mut of_day = ((elapsed - elapsed.floor()) * day_us).round() as i64;
                if of_day >= MICROSECONDS_PER_DAY {
                    day += 1;
                    of_day = 0;
                }
                let offset = offset_for_civil_day(day)?;
                Ok(AtomicTime(day * MICROSECONDS_PER_DAY + of_day + offset))
            }
        }
    }
}

#[cfg(test)]
mod atomic_test {
    use super::*;

    fn civil(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> CivilTime {
        CivilTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        }
    }

    #[test]
    fn test_calendar_roundtrip() {
        for days in [-10_000, -1, 0, 1, 59, 60, 365, 10_957, 21_550] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1958, 1, 1), -DAYS_1958_TO_1970);
        assert_eq!(days_from_civil(2000, 3, 1), 11017);
    }

    #[test]
    fn test_exact_arithmetic() {
        let t = AtomicTime::from_microseconds(1_000_000_000_000);
        assert_eq!(t.add(123).subtract(&t), 123);
        assert_eq!(t.add(-1).before(&t), true);
        assert_eq!(t.at_or_after(&t), true);
        assert_eq!(AtomicTime::earliest(t, t.add(5)), t);
        assert_eq!(AtomicTime::latest(t, t.add(5)), t.add(5));
    }

    #[test]
    fn test_civil_floor_boundary() {
        let floor = civil(1972, 1, 1, 0, 0, 0, 0);
        let t = AtomicTime::from_civil(&floor).unwrap();
        assert_eq!(t.as_microseconds(), 5113 * MICROSECONDS_PER_DAY + 10_000_000);

        // One tick below the floor fails even though the floor succeeds.
        let below = civil(1971, 12, 31, 23, 59, 59, 999_999);
        assert!(matches!(
            AtomicTime::from_civil(&below),
            Err(AstrodynError::TimeOutOfRange(_))
        ));
    }

    #[test]
    fn test_civil_roundtrip() {
        let c = civil(2010, 1, 15, 12, 34, 56, 789_000);
        let t = AtomicTime::from_civil(&c).unwrap();
        assert_eq!(t.to_civil().unwrap(), c);
    }

    #[test]
    fn test_leap_second_aliasing() {
        // Around the 2016-12-31 leap second.
        let at_leap = AtomicTime::from_civil(&civil(2016, 12, 31, 23, 59, 60, 0)).unwrap();
        let at_leap_half = AtomicTime::from_civil(&civil(2016, 12, 31, 23, 59, 60, 500_000)).unwrap();
        let after = AtomicTime::from_civil(&civil(2017, 1, 1, 0, 0, 0, 0)).unwrap();
        let after_half = AtomicTime::from_civil(&civil(2017, 1, 1, 0, 0, 0, 500_000)).unwrap();

        // Distinguishable on the atomic side: the inserted second really
        // elapses.
        assert_eq!(after.subtract(&at_leap), 1_000_000);
        assert_eq!(after_half.subtract(&at_leap_half), 1_000_000);

        // Aliased on the civil side: both round-trip to the same timestamp.
        assert_eq!(at_leap.to_civil().unwrap(), after.to_civil().unwrap());
        assert_eq!(at_leap_half.to_civil().unwrap(), after_half.to_civil().unwrap());
        assert_eq!(after.to_civil().unwrap(), civil(2017, 1, 1, 0, 0, 0, 0));

        // The last pre-leap tick is still on the old day.
        let pre = AtomicTime::from_civil(&civil(2016, 12, 31, 23, 59, 59, 999_999)).unwrap();
        assert_eq!(pre.to_civil().unwrap().day, 31);
    }

    #[test]
    fn test_mjd_tai_tt() {
        let t = AtomicTime::from_microseconds(0);
        assert_eq!(t.to_mjd(TimeScale::Tai).unwrap(), MJD_1958);
        assert_eq!(
            t.to_mjd(TimeScale::Tt).unwrap(),
            MJD_1958 + 32.184 / 86_400.0
        );
        let back = AtomicTime::from_mjd(TimeScale::Tt, t.to_mjd(TimeScale::Tt).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_mjd_tdb_roundtrip() {
        let t = AtomicTime::from_civil(&civil(2010, 1, 15, 0, 0, 0, 0)).unwrap();
        let mjd = t.to_mjd(TimeScale::Tdb).unwrap();
        let back = AtomicTime::from_mjd(TimeScale::Tdb, mjd).unwrap();
        // Quantization of the f64 day number may cost a tick.
        assert!(back.subtract(&t).abs() <= 1);
    }

    #[test]
    fn test_mjd_utc_against_hifitime() {
        let c = civil(2015, 3, 20, 6, 0, 0, 0);
        let t = AtomicTime::from_civil(&c).unwrap();
        let ours = t.to_mjd(TimeScale::Utc).unwrap();
        let theirs =
            hifitime::Epoch::from_gregorian_utc(2015, 3, 20, 6, 0, 0, 0).to_mjd_utc_days();
        assert!((ours - theirs).abs() < 1e-9);
    }
}
