//! Unit types, their base stats and the bonus rules
//!
//! `UnitType` is the payload-free key used for construction and files.
//! `UnitKind` is the same closed set carrying each variant's combat state,
//! and `bonuses` turns that state (plus an optional terrain) into numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::battle::constants::*;
use crate::battle::terrain::Terrain;
use crate::core::error::WargamesError;

/// Type of military unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    Infantry,  // Steady line troops, best away from trees
    Cavalry,   // Devastating first charge
    Commander, // Mounted leader, hits hardest
    Ranged,    // Protected by distance until engaged
}

/// Default stats for a unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitProperties {
    pub attack: i32,
    pub armor: i32,
}

impl UnitType {
    pub const ALL: [UnitType; 4] = [
        UnitType::Infantry,
        UnitType::Cavalry,
        UnitType::Commander,
        UnitType::Ranged,
    ];

    /// Get default stats for this unit type
    pub fn default_properties(&self) -> UnitProperties {
        match self {
            UnitType::Infantry => UnitProperties {
                attack: INFANTRY_ATTACK,
                armor: INFANTRY_ARMOR,
            },
            UnitType::Cavalry => UnitProperties {
                attack: CAVALRY_ATTACK,
                armor: CAVALRY_ARMOR,
            },
            UnitType::Commander => UnitProperties {
                attack: COMMANDER_ATTACK,
                armor: COMMANDER_ARMOR,
            },
            UnitType::Ranged => UnitProperties {
                attack: RANGED_ATTACK,
                armor: RANGED_ARMOR,
            },
        }
    }

    /// Combat state of a freshly raised unit of this type
    pub fn initial_kind(&self) -> UnitKind {
        match self {
            UnitType::Infantry => UnitKind::Infantry,
            UnitType::Cavalry => UnitKind::Cavalry { has_attacked: false },
            UnitType::Commander => UnitKind::Commander { has_attacked: false },
            UnitType::Ranged => UnitKind::Ranged {
                resist_bonus: RANGED_INITIAL_RESIST,
            },
        }
    }

    /// Name used in army files
    pub fn record_name(&self) -> &'static str {
        match self {
            UnitType::Infantry => "InfantryUnit",
            UnitType::Cavalry => "CavalryUnit",
            UnitType::Commander => "CommanderUnit",
            UnitType::Ranged => "RangedUnit",
        }
    }

    /// Is this a mounted unit?
    pub fn is_mounted(&self) -> bool {
        matches!(self, UnitType::Cavalry | UnitType::Commander)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_name())
    }
}

impl FromStr for UnitType {
    type Err = WargamesError;

    /// Accepts both `Infantry` and `InfantryUnit`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let base = lower.strip_suffix("unit").unwrap_or(&lower);
        match base {
            "infantry" => Ok(UnitType::Infantry),
            "cavalry" => Ok(UnitType::Cavalry),
            "commander" => Ok(UnitType::Commander),
            "ranged" => Ok(UnitType::Ranged),
            _ => Err(WargamesError::UnknownUnitType(trimmed.to_string())),
        }
    }
}

/// A unit's variant together with its mutable combat state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Infantry,
    Cavalry { has_attacked: bool },
    Commander { has_attacked: bool },
    Ranged { resist_bonus: i32 },
}

impl UnitKind {
    pub fn unit_type(&self) -> UnitType {
        match self {
            UnitKind::Infantry => UnitType::Infantry,
            UnitKind::Cavalry { .. } => UnitType::Cavalry,
            UnitKind::Commander { .. } => UnitType::Commander,
            UnitKind::Ranged { .. } => UnitType::Ranged,
        }
    }

    /// Record that this unit has made an attack
    ///
    /// The charge bonus is spent for good; nothing restores it.
    pub fn after_attacking(&mut self) {
        match self {
            UnitKind::Cavalry { has_attacked } | UnitKind::Commander { has_attacked } => {
                *has_attacked = true;
            }
            UnitKind::Infantry | UnitKind::Ranged { .. } => {}
        }
    }

    /// Record that this unit has been hit
    pub fn after_being_hit(&mut self) {
        if let UnitKind::Ranged { resist_bonus } = self {
            *resist_bonus = (*resist_bonus - RANGED_RESIST_DECAY).max(RANGED_MIN_RESIST);
        }
    }
}

/// Attack and resist bonus of a unit at one moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bonuses {
    pub attack: i32,
    pub resist: i32,
}

/// Compute a unit's bonuses from its state and the battlefield
pub fn bonuses(kind: &UnitKind, terrain: Option<Terrain>) -> Bonuses {
    match *kind {
        UnitKind::Infantry => {
            let open_ground = match terrain {
                Some(Terrain::Plains) | Some(Terrain::Hill) => INFANTRY_OPEN_GROUND_BONUS,
                Some(Terrain::Forest) | None => 0,
            };
            Bonuses {
                attack: INFANTRY_ATTACK_BONUS + open_ground,
                resist: INFANTRY_RESIST_BONUS + open_ground,
            }
        }

        UnitKind::Cavalry { has_attacked } | UnitKind::Commander { has_attacked } => {
            let base = if has_attacked {
                MELEE_ATTACK_BONUS
            } else {
                CHARGE_ATTACK_BONUS
            };
            let attack = match terrain {
                Some(Terrain::Plains) => base + PLAINS_CHARGE_BONUS,
                _ => base,
            };
            let resist = match terrain {
                Some(Terrain::Forest) => FOREST_MOUNTED_RESIST,
                _ => MOUNTED_RESIST_BONUS,
            };
            Bonuses { attack, resist }
        }

        UnitKind::Ranged { resist_bonus } => {
            let attack = match terrain {
                Some(Terrain::Hill) => RANGED_ATTACK_BONUS + HILL_RANGED_BONUS,
                Some(Terrain::Forest) => RANGED_ATTACK_BONUS - FOREST_RANGED_PENALTY,
                Some(Terrain::Plains) | None => RANGED_ATTACK_BONUS,
            };
            Bonuses {
                attack,
                resist: resist_bonus,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commander_hits_hardest() {
        let commander = UnitType::Commander.default_properties();
        for unit_type in UnitType::ALL {
            assert!(unit_type.default_properties().attack <= commander.attack);
        }
    }

    #[test]
    fn test_mounted_units() {
        assert!(UnitType::Cavalry.is_mounted());
        assert!(UnitType::Commander.is_mounted());
        assert!(!UnitType::Infantry.is_mounted());
        assert!(!UnitType::Ranged.is_mounted());
    }

    #[test]
    fn test_parse_unit_type_names() {
        assert_eq!("InfantryUnit".parse::<UnitType>().unwrap(), UnitType::Infantry);
        assert_eq!("cavalry".parse::<UnitType>().unwrap(), UnitType::Cavalry);
        assert_eq!(" CommanderUnit ".parse::<UnitType>().unwrap(), UnitType::Commander);
        assert_eq!("Ranged".parse::<UnitType>().unwrap(), UnitType::Ranged);
        assert!(matches!(
            "Wizard".parse::<UnitType>(),
            Err(WargamesError::UnknownUnitType(_))
        ));
    }

    #[test]
    fn test_initial_kind_matches_type() {
        for unit_type in UnitType::ALL {
            assert_eq!(unit_type.initial_kind().unit_type(), unit_type);
        }
    }

    #[test]
    fn test_infantry_boosted_outside_forest() {
        let kind = UnitKind::Infantry;
        assert_eq!(bonuses(&kind, None), Bonuses { attack: 2, resist: 1 });
        assert_eq!(bonuses(&kind, Some(Terrain::Forest)), Bonuses { attack: 2, resist: 1 });
        assert_eq!(bonuses(&kind, Some(Terrain::Plains)), Bonuses { attack: 4, resist: 3 });
        assert_eq!(bonuses(&kind, Some(Terrain::Hill)), Bonuses { attack: 4, resist: 3 });
    }

    #[test]
    fn test_cavalry_charge_spent_after_attack() {
        let mut kind = UnitType::Cavalry.initial_kind();
        assert_eq!(bonuses(&kind, None).attack, 6);
        kind.after_attacking();
        assert_eq!(bonuses(&kind, None).attack, 2);
        kind.after_attacking();
        assert_eq!(bonuses(&kind, None).attack, 2);
    }

    #[test]
    fn test_mounted_terrain_rules() {
        let fresh = UnitType::Commander.initial_kind();
        assert_eq!(bonuses(&fresh, Some(Terrain::Plains)), Bonuses { attack: 16, resist: 1 });
        assert_eq!(bonuses(&fresh, Some(Terrain::Forest)), Bonuses { attack: 6, resist: 0 });
        assert_eq!(bonuses(&fresh, Some(Terrain::Hill)), Bonuses { attack: 6, resist: 1 });

        let spent = UnitKind::Cavalry { has_attacked: true };
        assert_eq!(bonuses(&spent, Some(Terrain::Plains)).attack, 12);
    }

    #[test]
    fn test_ranged_resist_decays_to_floor() {
        let mut kind = UnitType::Ranged.initial_kind();
        let mut seen = vec![bonuses(&kind, None).resist];
        for _ in 0..4 {
            kind.after_being_hit();
            seen.push(bonuses(&kind, None).resist);
        }
        assert_eq!(seen, vec![6, 4, 2, 2, 2]);
    }

    #[test]
    fn test_ranged_terrain_only_touches_attack() {
        let kind = UnitType::Ranged.initial_kind();
        assert_eq!(bonuses(&kind, Some(Terrain::Hill)), Bonuses { attack: 5, resist: 6 });
        assert_eq!(bonuses(&kind, Some(Terrain::Forest)), Bonuses { attack: 1, resist: 6 });
        assert_eq!(bonuses(&kind, Some(Terrain::Plains)), Bonuses { attack: 3, resist: 6 });
    }

    #[test]
    fn test_being_hit_leaves_other_kinds_alone() {
        let mut kind = UnitKind::Cavalry { has_attacked: false };
        kind.after_being_hit();
        assert_eq!(kind, UnitKind::Cavalry { has_attacked: false });
    }
}
