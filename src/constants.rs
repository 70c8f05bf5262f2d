//! # Constants and type definitions for keplight
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `keplight` library.
//!
//! ## Overview
//!
//! - Astronomical constants (nominal solar radius, speed of light)
//! - Unit conversions (days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! All orbital geometry in this crate is dimensionless, expressed in units of the primary's
//! radius; the system-level `scale` factor converts it to physical length (solar radii) and
//! therefore to a physical light-travel delay.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Nominal solar radius in meters (IAU 2015 resolution B3)
pub const RSUN: f64 = 6.957e8;

/// Speed of light in meters per second
pub const VLIGHT: f64 = 299_792_458.0;

/// One-way light travel time across one solar radius, in days
pub const LIGHT_DAYS_PER_RSUN: f64 = RSUN / VLIGHT / SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Time in days
pub type Days = f64;
/// Length in units of the primary's radius
pub type StellarRadius = f64;
