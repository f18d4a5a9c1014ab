//! Battle system - turn-based combat between two armies
//!
//! Each turn one random unit of the attacking side strikes one random unit
//! of the defending side, and then the sides trade roles:
//! - Unit bonuses depend on the unit's variant, its combat history and terrain
//! - Armies are unordered multisets; draws are uniform over living units
//! - Observers hear about every attack and about the final outcome

pub mod army;
pub mod constants;
pub mod events;
pub mod odds;
pub mod simulation;
pub mod terrain;
pub mod unit_type;
pub mod units;

// Re-exports for convenient access
pub use army::Army;
pub use constants::*;
pub use events::{BattleEvent, BattleProgress, EventBus, Observer, ObserverId};
pub use odds::{estimate_odds, Odds};
pub use simulation::{Battle, BattlePhase, StopHandle};
pub use terrain::Terrain;
pub use unit_type::{bonuses, Bonuses, UnitKind, UnitProperties, UnitType};
pub use units::Unit;
