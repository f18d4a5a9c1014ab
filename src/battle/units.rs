//! Individual combat units
//!
//! A unit is a value: name and base stats never change, health only goes
//! down (and never below zero), and the variant payload in `UnitKind` holds
//! whatever the unit remembers between attacks. The health a unit was raised
//! with is kept so a reset copy can restore it.

use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::battle::terrain::Terrain;
use crate::battle::unit_type::{bonuses, UnitKind, UnitType};
use crate::core::error::{Result, WargamesError};

/// A single fighting unit
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    name: String,
    health: i32,
    max_health: i32,
    attack: i32,
    armor: i32,
    kind: UnitKind,
}

impl Unit {
    /// Raise a unit with its type's default attack and armor
    pub fn new(unit_type: UnitType, name: impl Into<String>, health: i32) -> Result<Self> {
        let props = unit_type.default_properties();
        Self::with_stats(unit_type, name, health, props.attack, props.armor)
    }

    /// Raise a unit with explicit attack and armor
    pub fn with_stats(
        unit_type: UnitType,
        name: impl Into<String>,
        health: i32,
        attack: i32,
        armor: i32,
    ) -> Result<Self> {
        let name = name.into();
        let reason = if health <= 0 {
            Some(format!("health must be positive, got {}", health))
        } else if attack < 0 {
            Some(format!("attack must not be negative, got {}", attack))
        } else if armor < 0 {
            Some(format!("armor must not be negative, got {}", armor))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(WargamesError::InvalidUnit { name, reason });
        }

        Ok(Self {
            name,
            health,
            max_health: health,
            attack,
            armor,
            kind: unit_type.initial_kind(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health the unit was raised with
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn attack_points(&self) -> i32 {
        self.attack
    }

    pub fn armor_points(&self) -> i32 {
        self.armor
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn unit_type(&self) -> UnitType {
        self.kind.unit_type()
    }

    /// Set health, clamping at zero
    pub fn set_health(&mut self, health: i32) {
        self.health = health.max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn attack_bonus(&self) -> i32 {
        bonuses(&self.kind, None).attack
    }

    pub fn resist_bonus(&self) -> i32 {
        bonuses(&self.kind, None).resist
    }

    pub fn attack_bonus_on(&self, terrain: Terrain) -> i32 {
        bonuses(&self.kind, Some(terrain)).attack
    }

    pub fn resist_bonus_on(&self, terrain: Terrain) -> i32 {
        bonuses(&self.kind, Some(terrain)).resist
    }

    /// Attack `opponent` without terrain effects
    pub fn attack(&mut self, opponent: &mut Unit) {
        self.strike(opponent, None);
    }

    /// Attack `opponent` with both sides' bonuses shifted by `terrain`
    pub fn attack_with_terrain(&mut self, opponent: &mut Unit, terrain: Terrain) {
        self.strike(opponent, Some(terrain));
    }

    fn strike(&mut self, opponent: &mut Unit, terrain: Option<Terrain>) {
        let offense = bonuses(&self.kind, terrain);
        let defense = bonuses(&opponent.kind, terrain);

        opponent.set_health(
            opponent.health - self.attack - offense.attack + opponent.armor + defense.resist,
        );

        self.kind.after_attacking();
        opponent.kind.after_being_hit();
    }

    /// Copy of this unit as it was raised
    ///
    /// Health returns to its starting value, and so do the charge bonus and
    /// the ranged resist bonus. Name and stats carry over.
    pub fn reset_copy(&self) -> Unit {
        Unit {
            health: self.max_health,
            kind: self.unit_type().initial_kind(),
            ..self.clone()
        }
    }

    fn sort_key(&self) -> (&str, i32, i32, i32, i32, i32) {
        (
            self.name.as_str(),
            self.health,
            self.attack,
            self.attack_bonus(),
            self.resist_bonus(),
            self.armor,
        )
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Unit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
