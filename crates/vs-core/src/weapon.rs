use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The weapon a unit carries.
///
/// Every capability is a pure function of the tag: there are no per-instance
/// overrides. Context that changes whether a weapon can fire (a powder smoke
/// token) is passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Swords, bayonets, clubs. Cannot shoot; easier to hit in melee.
    #[default]
    CloseCombat,
    /// Muskets and the like. Cannot shoot through powder smoke.
    BlackPowder,
    /// Bows and slings. The target saves on a lower roll.
    Missile,
    /// Older missile weapons with a smaller save penalty.
    OldMissile,
    /// A pistol for shooting and a sabre for the charge.
    PistolAndSabre,
}

impl WeaponKind {
    /// All weapon kinds, in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::CloseCombat,
            Self::BlackPowder,
            Self::Missile,
            Self::OldMissile,
            Self::PistolAndSabre,
        ]
    }

    /// Human-readable weapon name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CloseCombat => "Close Combat Weapon",
            Self::BlackPowder => "Black Powder Weapon",
            Self::Missile => "Missile Weapon",
            Self::OldMissile => "Old Missile Weapon",
            Self::PistolAndSabre => "Pistol & Sabre",
        }
    }

    /// Modifier added to the wielder's to-hit threshold in melee.
    pub fn melee_accuracy_mod(self) -> i32 {
        match self {
            Self::CloseCombat => -1,
            _ => 0,
        }
    }

    /// Modifier added to the target's save threshold when shooting.
    pub fn shooting_save_mod(self) -> i32 {
        match self {
            Self::Missile => -2,
            Self::OldMissile => -1,
            _ => 0,
        }
    }

    /// Whether the weapon can fire, given the wielder's powder smoke state.
    pub fn can_fire(self, powder_smoke: bool) -> bool {
        match self {
            Self::CloseCombat => false,
            Self::BlackPowder => !powder_smoke,
            Self::Missile | Self::OldMissile | Self::PistolAndSabre => true,
        }
    }

    /// Parse a weapon from user input such as `"black powder"` or `"old-missile"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "close combat" | "close combat weapon" | "cc" => Some(Self::CloseCombat),
            "black powder" | "black powder weapon" | "musket" => Some(Self::BlackPowder),
            "missile" | "missile weapon" => Some(Self::Missile),
            "old missile" | "old missile weapon" => Some(Self::OldMissile),
            "pistol and sabre" | "pistol & sabre" | "pistol" => Some(Self::PistolAndSabre),
            _ => None,
        }
    }
}

impl FromStr for WeaponKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownWeapon(s.to_string()))
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
