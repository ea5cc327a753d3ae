//! # Constants and type definitions for Astrodyn
//!
//! This module centralizes the **physical constants**, **conversion factors**,
//! and **common type definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants (speed of light, AU, Earth-Moon mass ratio)
//! - Time-scale anchors (1958 atomic epoch, J2000, JD ↔ MJD offset)
//! - Core type aliases shared by the time and ephemeris modules

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of microseconds in a day
pub const MICROSECONDS_PER_DAY: i64 = 86_400_000_000;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// MJD of the atomic-time reference epoch (1958-01-01T00:00:00 TAI)
pub const MJD_1958: f64 = 36_204.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51_544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// TT − TAI offset in microseconds (defining constant, 32.184 s)
pub const TT_MINUS_TAI_MICROSECONDS: i64 = 32_184_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Duration or tick count in microseconds
pub type Microseconds = i64;

/// Modified Julian Date (days)
pub type MJD = f64;

/// Julian Date (days)
pub type JD = f64;

/// Distance in kilometers
pub type Kilometer = f64;

/// Angle in degrees
pub type Degree = f64;
