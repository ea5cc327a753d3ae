//! Time scales and their offsets from the atomic scale.
//!
//! TAI is the internal scale. TT leads TAI by a fixed 32.184 s. TDB leads TT
//! by a slowly varying periodic term (under 2 ms). UTC trails TAI by the
//! leap-second count and is only defined within the table's validity range.

use crate::constants::{MJD, T2000};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    Tai,
    Utc,
    Tt,
    Tdb,
}

impl TimeScale {
    pub fn name(&self) -> &'static str {
        match self {
            TimeScale::Tai => "TAI",
            TimeScale::Utc => "UTC",
            TimeScale::Tt => "TT",
            TimeScale::Tdb => "TDB",
        }
    }
}

impl std::fmt::Display for TimeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TimeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TAI" => Ok(TimeScale::Tai),
            "UTC" => Ok(TimeScale::Utc),
            "TT" => Ok(TimeScale::Tt),
            "TDB" => Ok(TimeScale::Tdb),
            other => Err(format!("unknown time scale: {other}")),
        }
    }
}

/// TDB − TT in seconds at a TT day number.
///
/// Single-term model `0.001657 · sin(g)` with `g` the mean anomaly of the
/// Earth-Sun orbit. The omitted terms are below 50 µs, well under the
/// tolerance of any ephemeris lookup this crate performs.
pub fn tdb_minus_tt_seconds(mjd_tt: MJD) -> f64 {
    let g = (357.53 + 0.985_600_3 * (mjd_tt - T2000)).to_radians();
    0.001_657 * g.sin()
}
