//! Error types for the combat engine.

/// Errors that can occur while setting up a resolution.
///
/// Resolution itself cannot fail: empty pools, dead units and exhausted
/// tie depth are all ordinary outcomes.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A die must have at least one face.
    #[error("invalid die: d{0} has no faces")]
    InvalidDie(u32),

    /// A combat profile violates its invariants.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// A configuration value is out of range or unrecognized.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for engine operations.
pub type MechResult<T> = Result<T, MechError>;
