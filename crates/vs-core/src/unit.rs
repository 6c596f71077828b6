use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::weapon::WeaponKind;

/// Wounds per model when a unit's stats omit `W`.
pub const DEFAULT_WOUNDS: u32 = 1;

/// A unit's combat statistics.
///
/// Serialized as the short-key map used by unit data files:
/// `{"A": 2, "I": 4, "V": 6, "W": 1}`. `A`, `I` and `V` are required;
/// `W` defaults to [`DEFAULT_WOUNDS`]. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct Stats {
    /// Attacks per model (`A`).
    pub attacks: u32,
    /// To-hit threshold on a d6 (`I`). Lower is better.
    pub inaccuracy: i32,
    /// Save threshold on a d6 (`V`). Lower is better.
    pub save: i32,
    /// Wounds each model can take before it is removed (`W`).
    pub wounds: u32,
}

impl Stats {
    /// Create stats with one wound per model.
    pub fn new(attacks: u32, inaccuracy: i32, save: i32) -> Self {
        Self {
            attacks,
            inaccuracy,
            save,
            wounds: DEFAULT_WOUNDS,
        }
    }

    /// Set wounds per model. Zero is rejected.
    pub fn with_wounds(mut self, wounds: u32) -> CoreResult<Self> {
        if wounds == 0 {
            return Err(CoreError::InvalidStat {
                key: "W".to_string(),
                value: 0,
            });
        }
        self.wounds = wounds;
        Ok(self)
    }

    /// Build stats from a short-key map, failing on missing or out-of-range values.
    pub fn from_map(map: &HashMap<String, i64>) -> CoreResult<Self> {
        let attacks = required(map, "A")?;
        let inaccuracy = required(map, "I")?;
        let save = required(map, "V")?;

        let stats = Self {
            attacks: u32::try_from(attacks).map_err(|_| invalid("A", attacks))?,
            inaccuracy: i32::try_from(inaccuracy).map_err(|_| invalid("I", inaccuracy))?,
            save: i32::try_from(save).map_err(|_| invalid("V", save))?,
            wounds: DEFAULT_WOUNDS,
        };

        match map.get("W") {
            Some(&w) => {
                let wounds = u32::try_from(w).map_err(|_| invalid("W", w))?;
                stats.with_wounds(wounds)
            }
            None => Ok(stats),
        }
    }
}

fn required(map: &HashMap<String, i64>, key: &str) -> CoreResult<i64> {
    map.get(key)
        .copied()
        .ok_or_else(|| CoreError::MissingStat(key.to_string()))
}

fn invalid(key: &str, value: i64) -> CoreError {
    CoreError::InvalidStat {
        key: key.to_string(),
        value,
    }
}

impl TryFrom<HashMap<String, i64>> for Stats {
    type Error = CoreError;

    fn try_from(map: HashMap<String, i64>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl From<Stats> for BTreeMap<String, i64> {
    fn from(stats: Stats) -> Self {
        BTreeMap::from([
            ("A".to_string(), i64::from(stats.attacks)),
            ("I".to_string(), i64::from(stats.inaccuracy)),
            ("V".to_string(), i64::from(stats.save)),
            ("W".to_string(), i64::from(stats.wounds)),
        ])
    }
}

/// A special rule carried by a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Trait {
    /// Loose formation: anyone shooting at this unit needs +2 to hit.
    Skirmish,
    /// Ignores panic.
    Fearless,
    /// Any other rule, kept verbatim.
    Other(String),
}

impl From<String> for Trait {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "skirmish" => Self::Skirmish,
            "fearless" => Self::Fearless,
            _ => Self::Other(s),
        }
    }
}

impl From<Trait> for String {
    fn from(t: Trait) -> Self {
        t.to_string()
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skirmish => write!(f, "Skirmish"),
            Self::Fearless => write!(f, "Fearless"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A snapshot of a unit as the combat engine sees it.
///
/// The engine reads units and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitRecord")]
pub struct Unit {
    /// Display name.
    pub name: String,
    /// Unit type, e.g. "Fodder" or "Brute". Display only.
    #[serde(rename = "type")]
    pub unit_type: String,
    /// Number of living models.
    pub models: u32,
    /// Base size label. Display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_size: Option<String>,
    /// Combat statistics.
    pub stats: Stats,
    /// Special rules.
    pub traits: Vec<Trait>,
    /// The weapon the unit carries.
    pub weapon: WeaponKind,
    /// Whether the unit carries a powder smoke token.
    pub powder_smoke: bool,
}

/// Raw form of a unit as it appears in JSON, before validation.
#[derive(Deserialize)]
struct UnitRecord {
    name: String,
    #[serde(rename = "type", default)]
    unit_type: String,
    models: i64,
    #[serde(default)]
    base_size: Option<String>,
    stats: Stats,
    #[serde(default)]
    traits: Vec<Trait>,
    #[serde(default)]
    weapon: WeaponKind,
    #[serde(default)]
    powder_smoke: bool,
}

impl TryFrom<UnitRecord> for Unit {
    type Error = CoreError;

    fn try_from(raw: UnitRecord) -> Result<Self, Self::Error> {
        let models = u32::try_from(raw.models).map_err(|_| CoreError::InvalidModels {
            name: raw.name.clone(),
            models: raw.models,
        })?;
        Ok(Self {
            name: raw.name,
            unit_type: raw.unit_type,
            models,
            base_size: raw.base_size,
            stats: raw.stats,
            traits: raw.traits,
            weapon: raw.weapon,
            powder_smoke: raw.powder_smoke,
        })
    }
}

impl Unit {
    /// Create a unit with no traits, a close combat weapon, and no smoke token.
    pub fn new(name: impl Into<String>, models: u32, stats: Stats) -> Self {
        Self {
            name: name.into(),
            unit_type: String::new(),
            models,
            base_size: None,
            stats,
            traits: Vec::new(),
            weapon: WeaponKind::default(),
            powder_smoke: false,
        }
    }

    /// Set the unit type.
    pub fn with_type(mut self, unit_type: impl Into<String>) -> Self {
        self.unit_type = unit_type.into();
        self
    }

    /// Set the weapon.
    pub fn with_weapon(mut self, weapon: WeaponKind) -> Self {
        self.weapon = weapon;
        self
    }

    /// Add a trait.
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.push(t);
        self
    }

    /// Set the powder smoke token.
    pub fn with_powder_smoke(mut self, smoke: bool) -> Self {
        self.powder_smoke = smoke;
        self
    }

    /// Returns true if at least one model is left.
    pub fn is_alive(&self) -> bool {
        self.models > 0
    }

    /// Returns true if the unit has the given trait.
    pub fn has_trait(&self, t: &Trait) -> bool {
        self.traits.contains(t)
    }

    /// Returns true if the unit's weapon can fire right now.
    pub fn can_fire(&self) -> bool {
        self.weapon.can_fire(self.powder_smoke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat_map(pairs: &[(&str, i64)]) -> HashMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn stats_from_map_defaults_wounds() {
        let stats = Stats::from_map(&stat_map(&[("A", 2), ("I", 4), ("V", 6)])).unwrap();
        assert_eq!(stats, Stats::new(2, 4, 6));
        assert_eq!(stats.wounds, 1);
    }

    #[test]
    fn stats_from_map_reads_wounds() {
        let stats =
            Stats::from_map(&stat_map(&[("A", 3), ("I", 4), ("V", 6), ("W", 2)])).unwrap();
        assert_eq!(stats.wounds, 2);
    }

    #[test]
    fn stats_missing_key_rejected() {
        let err = Stats::from_map(&stat_map(&[("A", 2), ("I", 4)])).unwrap_err();
        assert!(matches!(err, CoreError::MissingStat(ref k) if k == "V"));
    }

    #[test]
    fn stats_negative_attacks_rejected() {
        let err = Stats::from_map(&stat_map(&[("A", -1), ("I", 4), ("V", 6)])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStat { ref key, value: -1 } if key == "A"));
    }

    #[test]
    fn stats_zero_wounds_rejected() {
        let err =
            Stats::from_map(&stat_map(&[("A", 1), ("I", 4), ("V", 6), ("W", 0)])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStat { ref key, value: 0 } if key == "W"));
        assert!(Stats::new(1, 4, 6).with_wounds(0).is_err());
    }

    #[test]
    fn stats_serialize_as_short_keys() {
        let json = serde_json::to_string(&Stats::new(1, 5, 5)).unwrap();
        assert_eq!(json, r#"{"A":1,"I":5,"V":5,"W":1}"#);
    }

    #[test]
    fn trait_parsing() {
        assert_eq!(Trait::from("Skirmish".to_string()), Trait::Skirmish);
        assert_eq!(Trait::from("fearless".to_string()), Trait::Fearless);
        assert_eq!(
            Trait::from("Stubborn".to_string()),
            Trait::Other("Stubborn".to_string())
        );
    }

    #[test]
    fn unit_from_json() {
        let unit: Unit = serde_json::from_str(
            r#"{
                "name": "Brutes",
                "type": "Brute",
                "models": 3,
                "base_size": "large",
                "stats": {"A": 3, "I": 4, "V": 6, "W": 2},
                "traits": ["Fearless"],
                "weapon": "close_combat"
            }"#,
        )
        .unwrap();
        assert_eq!(unit.name, "Brutes");
        assert_eq!(unit.unit_type, "Brute");
        assert_eq!(unit.models, 3);
        assert_eq!(unit.stats.wounds, 2);
        assert!(unit.has_trait(&Trait::Fearless));
        assert!(!unit.can_fire());
    }

    #[test]
    fn unit_negative_models_rejected() {
        let err = serde_json::from_str::<Unit>(
            r#"{"name": "Ghosts", "models": -2, "stats": {"A": 1, "I": 4, "V": 6}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid model count -2"));
    }

    #[test]
    fn unit_missing_stat_rejected() {
        let err = serde_json::from_str::<Unit>(
            r#"{"name": "Fodder", "models": 10, "stats": {"A": 1, "V": 5}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing stat \"I\""));
    }

    #[test]
    fn unit_builder_and_firing() {
        let unit = Unit::new("Musketeers", 8, Stats::new(1, 4, 6))
            .with_weapon(WeaponKind::BlackPowder)
            .with_trait(Trait::Skirmish);
        assert!(unit.is_alive());
        assert!(unit.can_fire());
        assert!(!unit.clone().with_powder_smoke(true).can_fire());
        assert!(!Unit::new("Dead", 0, Stats::new(1, 4, 6)).is_alive());
    }
}
