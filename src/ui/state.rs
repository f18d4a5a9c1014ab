//! Setup state for the presentation layer
//!
//! Whatever a front end has selected so far (the two armies, the terrain,
//! the pacing) lives in one explicit value that the front end owns and
//! passes around, instead of in process-wide globals.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::battle::army::Army;
use crate::battle::events::{BattleEvent, BattleProgress, Observer};
use crate::battle::simulation::Battle;
use crate::battle::terrain::Terrain;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, WargamesError};

/// Armies and settings chosen before a battle starts
#[derive(Debug, Clone, Default)]
pub struct SimulationSetup {
    pub attacker: Option<Army>,
    pub defender: Option<Army>,
    pub terrain: Option<Terrain>,
    pub delay_ms: i64,
    pub seed: Option<u64>,
}

impl SimulationSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from config values, with no armies selected yet
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            attacker: None,
            defender: None,
            terrain: config.terrain,
            delay_ms: config.delay_ms,
            seed: config.seed,
        }
    }

    pub fn select_attacker(&mut self, army: Army) {
        self.attacker = Some(army);
    }

    pub fn select_defender(&mut self, army: Army) {
        self.defender = Some(army);
    }

    /// Both armies are selected
    pub fn is_ready(&self) -> bool {
        self.attacker.is_some() && self.defender.is_some()
    }

    /// Is the battle meant to be watched turn by turn?
    pub fn is_paced(&self) -> bool {
        self.delay_ms > 0
    }

    /// Build a battle from copies of the selected armies
    ///
    /// The selections stay in place so the same matchup can be replayed.
    pub fn build_battle(&self) -> Result<Battle> {
        let attacker = self
            .attacker
            .clone()
            .ok_or(WargamesError::NoArmySelected("attacking"))?;
        let defender = self
            .defender
            .clone()
            .ok_or(WargamesError::NoArmySelected("defending"))?;

        Ok(match self.seed {
            Some(seed) => Battle::with_seed(attacker, defender, self.terrain, seed),
            None => Battle::new(attacker, defender, self.terrain),
        })
    }
}

/// An entry in the battle log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub attack: u64,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Attack,
    Outcome,
}

/// Bounded log of battle events, shared with the observer that fills it
#[derive(Debug, Clone)]
pub struct BattleLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Add an entry, evicting the oldest when full
    pub fn log(&self, attack: u64, message: String, category: LogCategory) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            attack,
            message,
            category,
        });
    }

    /// Copy of the current entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Observer that writes one entry per battle event into this log
    pub fn observer(&self) -> Box<dyn Observer> {
        Box::new(LogObserver { log: self.clone() })
    }
}

struct LogObserver {
    log: BattleLog,
}

impl Observer for LogObserver {
    fn on_event(&mut self, event: BattleEvent, progress: &BattleProgress<'_>) {
        match event {
            BattleEvent::Update => self.log.log(
                progress.attacks,
                format!(
                    "{} attacks {} ({} units left)",
                    progress.attacker.name(),
                    progress.defender.name(),
                    progress.defender.len()
                ),
                LogCategory::Attack,
            ),
            BattleEvent::Finish => {
                let winner = if progress.attacker.has_living_units() {
                    progress.attacker
                } else {
                    progress.defender
                };
                self.log.log(
                    progress.attacks,
                    format!("{} wins with {} units standing", winner.name(), winner.len()),
                    LogCategory::Outcome,
                );
            }
        }
    }
}
