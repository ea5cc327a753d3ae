//! Tabulated ephemerides: fixed-window interpolation over OEM and Horizons
//! state-vector files.

pub mod horizons;
pub mod interpolator;
pub mod oem;

pub use horizons::HorizonsEphemeris;
pub use interpolator::{InterpolationMethod, TabulatedEphemeris};
pub use oem::OrbitEphemerisMessage;
