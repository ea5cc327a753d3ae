//! DE405-style Chebyshev ephemerides: block layout, evaluation, and the
//! ASCII store.

pub mod block;
pub mod layout;
pub mod store;

pub use block::EphemerisBlock;
pub use layout::{Body, SeriesLayout, DE405_LAYOUT, EARTH_MOON_MASS_RATIO};
pub use store::{BodyEphemeris, ChebyshevEphemeris};
