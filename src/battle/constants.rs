//! Battle system constants - all tunable values in one place
//!
//! Bonuses are ADDITIVE integers. No percentage modifiers.

// Base stats (attack, armor)
pub const INFANTRY_ATTACK: i32 = 15;
pub const INFANTRY_ARMOR: i32 = 10;
pub const CAVALRY_ATTACK: i32 = 20;
pub const CAVALRY_ARMOR: i32 = 12;
pub const COMMANDER_ATTACK: i32 = 25;
pub const COMMANDER_ARMOR: i32 = 15;
pub const RANGED_ATTACK: i32 = 15;
pub const RANGED_ARMOR: i32 = 8;

// Infantry bonuses
pub const INFANTRY_ATTACK_BONUS: i32 = 2;
pub const INFANTRY_RESIST_BONUS: i32 = 1;
pub const INFANTRY_OPEN_GROUND_BONUS: i32 = 2; // Everywhere except Forest

// Cavalry and Commander bonuses
pub const CHARGE_ATTACK_BONUS: i32 = 6; // Until the unit's first attack
pub const MELEE_ATTACK_BONUS: i32 = 2; // Every attack after the first
pub const MOUNTED_RESIST_BONUS: i32 = 1;
pub const PLAINS_CHARGE_BONUS: i32 = 10;
pub const FOREST_MOUNTED_RESIST: i32 = 0; // Replaces the resist bonus outright

// Ranged bonuses
pub const RANGED_ATTACK_BONUS: i32 = 3;
pub const RANGED_INITIAL_RESIST: i32 = 6; // Distance protects until closed
pub const RANGED_RESIST_DECAY: i32 = 2; // Lost each time the unit is hit
pub const RANGED_MIN_RESIST: i32 = 2;
pub const HILL_RANGED_BONUS: i32 = 2;
pub const FOREST_RANGED_PENALTY: i32 = 2;

// Defaults for army files and demo armies
pub const DEFAULT_UNIT_HEALTH: i32 = 100;
