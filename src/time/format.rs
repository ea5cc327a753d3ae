//! Timestamp formatting and parsing.
//!
//! [`TimeFormat`] is an explicit configuration value (scale plus decimal
//! precision) constructed by the caller and passed where needed; there is no
//! shared process-wide formatter state. The rendered shape is
//! `YYYY-MM-DDTHH:MM:SS[.fff…] SCALE`.

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{MICROSECONDS_PER_DAY, MJD_1958, TT_MINUS_TAI_MICROSECONDS};
use crate::time::atomic::{civil_from_days, days_from_civil, AtomicTime, CivilTime, DAYS_1958_TO_1970};
use crate::time::scale::{tdb_minus_tt_seconds, TimeScale};

/// Formatting/parsing configuration: a time scale and a fractional-second
/// precision (0..=6 digits rendered; parsing accepts any number of digits and
/// truncates beyond microseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    pub scale: TimeScale,
    pub precision: usize,
}

impl TimeFormat {
    pub fn new(scale: TimeScale, precision: usize) -> Self {
        TimeFormat { scale, precision }
    }

    /// Scale-relative microseconds since the 1958 epoch for a continuous
    /// (non-UTC) scale.
    fn scale_microseconds(&self, t: &AtomicTime) -> i64 {
        match self.scale {
            TimeScale::Tai => t.as_microseconds(),
            TimeScale::Tt => t.as_microseconds() + TT_MINUS_TAI_MICROSECONDS,
            TimeScale::Tdb => {
                let tt_mjd = (t.as_microseconds() + TT_MINUS_TAI_MICROSECONDS) as f64
                    / MICROSECONDS_PER_DAY as f64
                    + MJD_1958;
                t.as_microseconds()
                    + TT_MINUS_TAI_MICROSECONDS
                    + (tdb_minus_tt_seconds(tt_mjd) * 1e6).round() as i64
            }
            TimeScale::Utc => unreachable!("UTC goes through the civil path"),
        }
    }

    /// Render `t` in this format's scale.
    ///
    /// UTC rendering can fail below the leap-second table floor.
    pub fn format(&self, t: &AtomicTime) -> Result<String, AstrodynError> {
        let civil = match self.scale {
            TimeScale::Utc => t.to_civil()?,
            _ => {
                let us = self.scale_microseconds(t);
                let day = us.div_euclid(MICROSECONDS_PER_DAY);
                let of_day = us.rem_euclid(MICROSECONDS_PER_DAY);
                let (year, month, d) = civil_from_days(day - DAYS_1958_TO_1970);
                let second_of_day = of_day / 1_000_000;
                CivilTime {
                    year,
                    month,
                    day: d,
                    hour: (second_of_day / 3600) as u8,
                    minute: (second_of_day / 60 % 60) as u8,
                    second: (second_of_day % 60) as u8,
                    microsecond: (of_day % 1_000_000) as u32,
                }
            }
        };

        let mut out = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            civil.year, civil.month, civil.day, civil.hour, civil.minute, civil.second
        );
        if self.precision > 0 {
            let digits = self.precision.min(6);
            let frac = format!("{:06}", civil.microsecond);
            out.push('.');
            out.push_str(&frac[..digits]);
            for _ in 6..self.precision {
                out.push('0');
            }
        }
        out.push(' ');
        out.push_str(self.scale.name());
        Ok(out)
    }

    /// Parse a timestamp in this format's scale.
    ///
    /// The scale suffix is optional; when present it must match the
    /// configured scale. A 60th second is accepted only on the UTC scale.
    pub fn parse(&self, input: &str) -> Result<AtomicTime, AstrodynError> {
        let bad = || AstrodynError::InvalidTimestampFormat(input.to_string());

        let mut text = input.trim();
        if let Some(idx) = text.find(' ') {
            let (stamp, suffix) = text.split_at(idx);
            if suffix.trim() != self.scale.name() {
                return Err(bad());
            }
            text = stamp;
        }

        let (date, time) = text.split_once('T').ok_or_else(bad)?;
        let mut date_parts = date.splitn(3, '-');
        let year: i32 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let month: u8 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let day: u8 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;

        let mut time_parts = time.splitn(3, ':');
        let hour: u8 = time_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let minute: u8 = time_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let seconds_field = time_parts.next().ok_or_else(bad)?;
        let (second_str, frac_str) = match seconds_field.split_once('.') {
            Some((s, f)) => (s, f),
            None => (seconds_field, ""),
        };
        let second: u8 = second_str.parse().map_err(|_| bad())?;
        if !frac_str.is_empty() && !frac_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let mut frac = format!("{frac_str}000000");
        frac.truncate(6);
        let microsecond: u32 = frac.parse().map_err(|_| bad())?;

        let max_second = if self.scale == TimeScale::Utc { 60 } else { 59 };
        if !(1..=12).contains(&month)
            || !(1..=days_in_month(year, month)).contains(&day)
            || hour > 23
            || minute > 59
            || second > max_second
        {
            return Err(bad());
        }

        let civil = CivilTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        };

        match self.scale {
            TimeScale::Utc => AtomicTime::from_civil(&civil),
            TimeScale::Tai => Ok(AtomicTime::from_microseconds(scale_ticks(&civil))),
            TimeScale::Tt => Ok(AtomicTime::from_microseconds(
                scale_ticks(&civil) - TT_MINUS_TAI_MICROSECONDS,
            )),
            TimeScale::Tdb => {
                let us = scale_ticks(&civil);
                // The offset drifts far too slowly for the approximation of
                // evaluating it at the TDB reading to matter at tick level.
                let approx_mjd = us as f64 / MICROSECONDS_PER_DAY as f64 + MJD_1958;
                let off_us = (tdb_minus_tt_seconds(approx_mjd) * 1e6).round() as i64;
                Ok(AtomicTime::from_microseconds(us - TT_MINUS_TAI_MICROSECONDS - off_us))
            }
        }
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Microseconds since the 1958 epoch on a continuous scale (no leap seconds).
fn scale_ticks(civil: &CivilTime) -> i64 {
    (days_from_civil(civil.year, civil.month, civil.day) + DAYS_1958_TO_1970)
        * MICROSECONDS_PER_DAY
        + civil.microsecond_of_day()
}

#[cfg(test)]
mod format_test {
    use super::*;

    #[test]
    fn test_format_precision() {
        let fmt = TimeFormat::new(TimeScale::Tai, 3);
        let t = fmt.parse("2010-01-15T06:30:00.123456").unwrap();
        assert_eq!(fmt.format(&t).unwrap(), "2010-01-15T06:30:00.123 TAI");

        let fmt0 = TimeFormat::new(TimeScale::Tai, 0);
        assert_eq!(fmt0.format(&t).unwrap(), "2010-01-15T06:30:00 TAI");

        let fmt6 = TimeFormat::new(TimeScale::Tai, 6);
        assert_eq!(fmt6.format(&t).unwrap(), "2010-01-15T06:30:00.123456 TAI");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let fmt = TimeFormat::new(TimeScale::Utc, 6);
        for bad in [
            "2010-01-15",
            "2010-01-15T10:00",
            "2010-13-01T00:00:00",
            "2010-01-15T24:00:00",
            "2010-01-15T00:00:00 TT",
            "2010-01-15T00:00:0a",
            "not a time",
        ] {
            assert!(
                matches!(
                    fmt.parse(bad),
                    Err(AstrodynError::InvalidTimestampFormat(_))
                ),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_calendar_days() {
        let fmt = TimeFormat::new(TimeScale::Utc, 0);
        for bad in [
            "2010-02-31T00:00:00",
            "2010-02-29T00:00:00",
            "2010-04-31T00:00:00",
            "2010-06-00T00:00:00",
        ] {
            assert!(
                matches!(
                    fmt.parse(bad),
                    Err(AstrodynError::InvalidTimestampFormat(_))
                ),
                "{bad} should not parse"
            );
        }
        // Leap-year February 29 is a real day.
        assert!(fmt.parse("2012-02-29T00:00:00").is_ok());
        assert!(fmt.parse("2000-02-29T00:00:00").is_ok());
    }

    #[test]
    fn test_leap_second_only_in_utc() {
        let utc = TimeFormat::new(TimeScale::Utc, 0);
        assert!(utc.parse("2016-12-31T23:59:60").is_ok());
        let tai = TimeFormat::new(TimeScale::Tai, 0);
        assert!(tai.parse("2016-12-31T23:59:60").is_err());
    }

    #[test]
    fn test_scale_consistency() {
        // The same civil reading on TT and TAI is 32.184 s apart atomically.
        let tt = TimeFormat::new(TimeScale::Tt, 0)
            .parse("2010-01-15T00:00:00")
            .unwrap();
        let tai = TimeFormat::new(TimeScale::Tai, 0)
            .parse("2010-01-15T00:00:00")
            .unwrap();
        assert_eq!(tai.subtract(&tt), 32_184_000);
    }

    #[test]
    fn test_tdb_roundtrip() {
        let fmt = TimeFormat::new(TimeScale::Tdb, 6);
        let t = fmt.parse("2010-01-15T00:00:00 TDB").unwrap();
        assert_eq!(fmt.format(&t).unwrap(), "2010-01-15T00:00:00.000000 TDB");
        let mjd = t.to_mjd(TimeScale::Tdb).unwrap();
        assert!((mjd - 55211.0).abs() < 2e-11);
    }

    #[test]
    fn test_utc_roundtrip_with_suffix() {
        let fmt = TimeFormat::new(TimeScale::Utc, 3);
        let t = fmt.parse("1999-12-31T23:59:59.500 UTC").unwrap();
        assert_eq!(fmt.format(&t).unwrap(), "1999-12-31T23:59:59.500 UTC");
    }
}
