//! Calendar value types shared by the outline and event layers.
//!
//! # Responsibility
//! - Define immutable date values parsed from outline tokens.
//! - Provide ordering and interval arithmetic for event rollups.
//!
//! # Invariants
//! - A single proleptic Gregorian-like calendar extends into negative years.
//! - No timezone or locale handling.

pub mod date;
pub mod period;
