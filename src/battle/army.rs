//! Armies: a named multiset of units
//!
//! Unit order inside an army carries no meaning. Equality and hashing sort
//! the units first, so two armies raised in a different order compare equal.

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::battle::unit_type::UnitType;
use crate::battle::units::Unit;
use crate::core::error::{Result, WargamesError};

/// A named collection of units
#[derive(Debug, Clone, Serialize)]
pub struct Army {
    name: String,
    units: Vec<Unit>,
}

impl Army {
    /// Create an empty army
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_units(name, Vec::new())
    }

    /// Create an army from a starting roster
    pub fn with_units(name: impl Into<String>, units: Vec<Unit>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WargamesError::BlankArmyName);
        }
        Ok(Self { name, units })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub(crate) fn unit_mut(&mut self, index: usize) -> &mut Unit {
        &mut self.units[index]
    }

    /// Add a copy of `unit`
    pub fn add(&mut self, unit: &Unit) {
        self.units.push(unit.clone());
    }

    /// Add `count` independent copies of `unit`
    pub fn add_many(&mut self, unit: &Unit, count: usize) {
        self.units.extend(std::iter::repeat(unit).take(count).cloned());
    }

    /// Add a copy of every unit in `units`
    pub fn add_all(&mut self, units: &[Unit]) {
        self.units.extend_from_slice(units);
    }

    /// Remove one unit equal to `unit`; returns false if none matched
    pub fn remove(&mut self, unit: &Unit) -> bool {
        match self.units.iter().position(|u| u == unit) {
            Some(index) => {
                self.units.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Unit {
        self.units.swap_remove(index)
    }

    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// Whether any unit is still able to fight
    pub fn has_living_units(&self) -> bool {
        self.units.iter().any(|u| !u.is_dead())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Index of a uniformly chosen living unit
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let alive: Vec<usize> = self
            .units
            .iter()
            .enumerate()
            .filter(|(_, u)| !u.is_dead())
            .map(|(i, _)| i)
            .collect();

        if alive.is_empty() {
            return Err(WargamesError::EmptyArmy(self.name.clone()));
        }
        Ok(alive[rng.gen_range(0..alive.len())])
    }

    /// A uniformly chosen living unit
    pub fn random_unit<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Unit> {
        let index = self.random_index(rng)?;
        Ok(&self.units[index])
    }

    pub fn total_health(&self) -> i64 {
        self.units.iter().map(|u| u.health() as i64).sum()
    }

    pub fn total_attack(&self) -> i64 {
        self.units.iter().map(|u| u.attack_points() as i64).sum()
    }

    pub fn total_armor(&self) -> i64 {
        self.units.iter().map(|u| u.armor_points() as i64).sum()
    }

    /// Units of one type
    pub fn units_of(&self, unit_type: UnitType) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.unit_type() == unit_type)
    }

    /// Condensed view: reset copies of the units mapped to their counts
    ///
    /// Wounds and combat memory are discarded, so every unit raised from the
    /// same template lands in one bucket.
    pub fn to_map(&self) -> BTreeMap<Unit, usize> {
        let mut map = BTreeMap::new();
        for unit in &self.units {
            *map.entry(unit.reset_copy()).or_insert(0) += 1;
        }
        map
    }

    fn sorted_units(&self) -> Vec<&Unit> {
        let mut sorted: Vec<&Unit> = self.units.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for Army {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.units.len() == other.units.len()
            && self.sorted_units() == other.sorted_units()
    }
}

impl Eq for Army {}

impl Hash for Army {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sorted_units().hash(state);
    }
}
