//! Core types for VonSneg: units, weapons, and rosters.
//!
//! This crate defines the unit snapshots that the combat engine consumes.
//! It knows nothing about dice or probabilities. Units are built
//! programmatically or loaded from a JSON roster file.

/// Error types used throughout the crate.
pub mod error;
/// A named collection of units loaded from JSON.
pub mod roster;
/// Unit snapshots, combat stats, and traits.
pub mod unit;
/// The closed set of weapon kinds and what each one allows.
pub mod weapon;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the roster.
pub use roster::Roster;
/// Re-export unit types.
pub use unit::{Stats, Trait, Unit};
/// Re-export weapon kinds.
pub use weapon::WeaponKind;
