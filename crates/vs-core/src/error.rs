/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building units or loading a roster.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required stat key (`A`, `I` or `V`) is absent.
    #[error("missing stat \"{0}\"")]
    MissingStat(String),

    /// A stat value is out of range for its meaning.
    #[error("invalid stat \"{key}\": {value}")]
    InvalidStat {
        /// The stat key, e.g. `"W"`.
        key: String,
        /// The rejected value.
        value: i64,
    },

    /// A unit was given a negative model count.
    #[error("unit \"{name}\" has invalid model count {models}")]
    InvalidModels {
        /// The unit's display name.
        name: String,
        /// The rejected model count.
        models: i64,
    },

    /// A weapon name did not match any known weapon kind.
    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    /// A unit with the same name is already in the roster.
    #[error("unit already exists: \"{0}\"")]
    DuplicateName(String),

    /// No unit with the given name is in the roster.
    #[error("unit not found: \"{0}\"")]
    UnitNotFound(String),

    /// The roster JSON could not be parsed.
    #[error("malformed roster: {0}")]
    Json(#[from] serde_json::Error),

    /// The roster file could not be read.
    #[error("cannot read roster: {0}")]
    Io(#[from] std::io::Error),
}
