//! Time handling: atomic (TAI) instants, civil conversion through the
//! leap-second table, per-scale formatting, and interval/constraint algebra.

pub mod atomic;
pub mod constraint;
pub mod format;
pub mod interval;
pub mod leap;
pub mod scale;

pub use atomic::{AtomicTime, CivilTime};
pub use constraint::TimeConstraint;
pub use format::TimeFormat;
pub use interval::TimeInterval;
pub use scale::TimeScale;
