use std::collections::HashMap;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::unit::Unit;

/// A collection of units, indexed by name (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct Roster {
    units: Vec<Unit>,
    by_name_lower: HashMap<String, usize>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a roster from a JSON array of unit objects.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let units: Vec<Unit> = serde_json::from_str(json)?;
        let mut roster = Self::new();
        for unit in units {
            roster.add_unit(unit)?;
        }
        Ok(roster)
    }

    /// Read and parse a roster file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add a unit. Names must be unique ignoring case.
    pub fn add_unit(&mut self, unit: Unit) -> CoreResult<()> {
        let name_lower = unit.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(CoreError::DuplicateName(unit.name));
        }
        self.by_name_lower.insert(name_lower, self.units.len());
        self.units.push(unit);
        Ok(())
    }

    /// Find a unit by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Unit> {
        self.by_name_lower
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.units[idx])
    }

    /// Find a unit by name, failing with [`CoreError::UnitNotFound`].
    pub fn require(&self, name: &str) -> CoreResult<&Unit> {
        self.find_by_name(name)
            .ok_or_else(|| CoreError::UnitNotFound(name.to_string()))
    }

    /// All units in insertion order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the roster has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
