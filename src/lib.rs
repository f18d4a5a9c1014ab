//! Wargames - turn-based army battle simulator

pub mod battle;
pub mod core;
pub mod persistence;
pub mod ui;
