//! UTC leap-second table.
//!
//! TAI−UTC offsets from the start of the modern leap-second era
//! (1972-01-01, +10 s) through 2017-01-01 (+37 s). Days are counted from the
//! atomic reference epoch 1958-01-01. Lookups below the 1972 floor fail with
//! a range error; the floor itself is valid.

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{Microseconds, MICROSECONDS_PER_DAY};

/// One row of the leap-second table: from UTC day `utc_day` (inclusive),
/// TAI − UTC equals `offset` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeapEntry {
    /// UTC day the offset takes effect, in days since 1958-01-01.
    pub utc_day: i64,
    /// TAI − UTC in whole seconds.
    pub offset: i64,
}

pub const LEAP_TABLE: [LeapEntry; 28] = [
    LeapEntry { utc_day: 5113, offset: 10 },  // 1972-01-01
    LeapEntry { utc_day: 5295, offset: 11 },  // 1972-07-01
    LeapEntry { utc_day: 5479, offset: 12 },  // 1973-01-01
    LeapEntry { utc_day: 5844, offset: 13 },  // 1974-01-01
    LeapEntry { utc_day: 6209, offset: 14 },  // 1975-01-01
    LeapEntry { utc_day: 6574, offset: 15 },  // 1976-01-01
    LeapEntry { utc_day: 6940, offset: 16 },  // 1977-01-01
    LeapEntry { utc_day: 7305, offset: 17 },  // 1978-01-01
    LeapEntry { utc_day: 7670, offset: 18 },  // 1979-01-01
    LeapEntry { utc_day: 8035, offset: 19 },  // 1980-01-01
    LeapEntry { utc_day: 8582, offset: 20 },  // 1981-07-01
    LeapEntry { utc_day: 8947, offset: 21 },  // 1982-07-01
    LeapEntry { utc_day: 9312, offset: 22 },  // 1983-07-01
    LeapEntry { utc_day: 10043, offset: 23 }, // 1985-07-01
    LeapEntry { utc_day: 10957, offset: 24 }, // 1988-01-01
    LeapEntry { utc_day: 11688, offset: 25 }, // 1990-01-01
    LeapEntry { utc_day: 12053, offset: 26 }, // 1991-01-01
    LeapEntry { utc_day: 12600, offset: 27 }, // 1992-07-01
    LeapEntry { utc_day: 12965, offset: 28 }, // 1993-07-01
    LeapEntry { utc_day: 13330, offset: 29 }, // 1994-07-01
    LeapEntry { utc_day: 13879, offset: 30 }, // 1996-01-01
    LeapEntry { utc_day: 14426, offset: 31 }, // 1997-07-01
    LeapEntry { utc_day: 14975, offset: 32 }, // 1999-01-01
    LeapEntry { utc_day: 17532, offset: 33 }, // 2006-01-01
    LeapEntry { utc_day: 18628, offset: 34 }, // 2009-01-01
    LeapEntry { utc_day: 19905, offset: 35 }, // 2012-07-01
    LeapEntry { utc_day: 21000, offset: 36 }, // 2015-07-01
    LeapEntry { utc_day: 21550, offset: 37 }, // 2017-01-01
];

/// First UTC day covered by the table (1972-01-01).
pub const TABLE_FLOOR_DAY: i64 = LEAP_TABLE[0].utc_day;

/// TAI − UTC in microseconds for a civil (UTC) day number.
///
/// The offset changes only at civil midnights, so a single day number is
/// enough to select the row. Days before 1972-01-01 are out of range.
pub fn offset_for_civil_day(utc_day: i64) -> Result<Microseconds, AstrodynError> {
    if utc_day < TABLE_FLOOR_DAY {
        return Err(AstrodynError::TimeOutOfRange(format!(
            "UTC day {utc_day} precedes the leap-second table floor (1972-01-01)"
        )));
    }
    let idx = LEAP_TABLE.partition_point(|e| e.utc_day <= utc_day) - 1;
    Ok(LEAP_TABLE[idx].offset * 1_000_000)
}

/// TAI − UTC in microseconds for an atomic instant (microseconds since the
/// 1958 TAI epoch).
///
/// Each table row takes effect at the atomic instant of its civil midnight,
/// i.e. `utc_day · day + offset`. During an inserted leap second the previous
/// row is still in force, which is what produces the civil aliasing of
/// `23:59:60.xxx` onto the following `00:00:00.xxx`.
pub fn offset_for_atomic(tai_microseconds: i64) -> Result<Microseconds, AstrodynError> {
    let boundary = |e: &LeapEntry| e.utc_day * MICROSECONDS_PER_DAY + e.offset * 1_000_000;
    if tai_microseconds < boundary(&LEAP_TABLE[0]) {
        return Err(AstrodynError::TimeOutOfRange(format!(
            "atomic instant {tai_microseconds} precedes the leap-second table floor (1972-01-01)"
        )));
    }
    let idx = LEAP_TABLE.partition_point(|e| boundary(e) <= tai_microseconds) - 1;
    Ok(LEAP_TABLE[idx].offset * 1_000_000)
}
