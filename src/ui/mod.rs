//! Front-end state kept outside the battle engine

pub mod state;

pub use state::{BattleLog, LogCategory, LogEntry, SimulationSetup};
