//! # Astrodyn: flight-dynamics time and ephemeris core
//!
//! This crate provides the computation core of a flight-dynamics system:
//!
//! 1. **Atomic time** — [`AtomicTime`](crate::time::AtomicTime), an exact
//!    microsecond tick count on the TAI scale, with leap-second-aware civil
//!    conversion and MJD day-number conversion for TAI/UTC/TT/TDB.
//! 2. **Interval algebra** — [`TimeInterval`](crate::time::TimeInterval) and
//!    [`TimeConstraint`](crate::time::TimeConstraint), half-open intervals and
//!    an ordered union-of-intervals constraint with boolean set operations.
//! 3. **Chebyshev ephemerides** — [`ChebyshevEphemeris`](crate::ephemeris::chebyshev::ChebyshevEphemeris),
//!    a DE405-style ASCII block reader and per-sub-interval polynomial
//!    evaluator for planetary and lunar states.
//! 4. **Tabulated ephemerides** — [`TabulatedEphemeris`](crate::ephemeris::tabulated::TabulatedEphemeris),
//!    Hermite/Lagrange fixed-window interpolation over CCSDS OEM and JPL
//!    Horizons state-vector files.
//! 5. **Relative states** — [`RelativeStateResolver`](crate::resolver::RelativeStateResolver),
//!    spacecraft-relative states with light-time and stellar-aberration
//!    correction.

pub mod astrodyn_errors;
pub mod constants;
pub mod ephemeris;
pub mod ground_station;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod time;

pub use astrodyn_errors::AstrodynError;
pub use state::State;
