//! Turn-based battle between two armies
//!
//! Each turn one random unit of the attacking side strikes one random unit
//! of the defending side, then the sides swap roles. The battle ends when a
//! side runs out of units or when someone asks it to stop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::battle::army::Army;
use crate::battle::events::{BattleEvent, BattleProgress, EventBus, Observer, ObserverId};
use crate::battle::terrain::Terrain;
use crate::core::error::{Result, WargamesError};

/// Lifecycle of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattlePhase {
    #[default]
    Ready,
    Running,
    Finished,
    Cancelled,
}

/// Cloneable handle that asks a running battle to stop
///
/// The flag is checked between turns; a turn in progress always completes.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A battle between two armies
#[derive(Debug)]
pub struct Battle {
    armies: [Army; 2],
    /// Index into `armies` of the side attacking next
    attacker: usize,
    terrain: Option<Terrain>,
    attacks: u64,
    phase: BattlePhase,
    stop: StopHandle,
    rng: ChaCha8Rng,
    events: EventBus,
}

impl Battle {
    /// Create a battle seeded from entropy
    pub fn new(attacker: Army, defender: Army, terrain: Option<Terrain>) -> Self {
        Self::with_rng(attacker, defender, terrain, ChaCha8Rng::from_entropy())
    }

    /// Create a battle whose unit draws are reproducible
    pub fn with_seed(attacker: Army, defender: Army, terrain: Option<Terrain>, seed: u64) -> Self {
        Self::with_rng(attacker, defender, terrain, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(attacker: Army, defender: Army, terrain: Option<Terrain>, rng: ChaCha8Rng) -> Self {
        Self {
            armies: [attacker, defender],
            attacker: 0,
            terrain,
            attacks: 0,
            phase: BattlePhase::Ready,
            stop: StopHandle::default(),
            rng,
            events: EventBus::new(),
        }
    }

    pub fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.events.attach(observer)
    }

    pub fn detach(&mut self, id: ObserverId) -> bool {
        self.events.detach(id)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn terrain(&self) -> Option<Terrain> {
        self.terrain
    }

    pub fn set_terrain(&mut self, terrain: Option<Terrain>) {
        self.terrain = terrain;
    }

    /// Armies in the order they were passed to the constructor
    pub fn armies(&self) -> (&Army, &Army) {
        (&self.armies[0], &self.armies[1])
    }

    /// Side that will attack on the next turn
    pub fn current_attacker(&self) -> &Army {
        &self.armies[self.attacker]
    }

    /// Side that will defend on the next turn
    pub fn current_defender(&self) -> &Army {
        &self.armies[1 - self.attacker]
    }

    pub fn num_of_attacks(&self) -> u64 {
        self.attacks
    }

    /// Ask the battle to stop before its next turn
    pub fn stop_simulation(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The side still standing, once the other has no living units left
    pub fn winner(&self) -> Option<&Army> {
        match (self.armies[0].has_living_units(), self.armies[1].has_living_units()) {
            (true, false) => Some(&self.armies[0]),
            (false, true) => Some(&self.armies[1]),
            _ => None,
        }
    }

    /// The side with no living units left, once the battle is decided
    pub fn loser(&self) -> Option<&Army> {
        match (self.armies[0].has_living_units(), self.armies[1].has_living_units()) {
            (true, false) => Some(&self.armies[1]),
            (false, true) => Some(&self.armies[0]),
            _ => None,
        }
    }

    /// Fight to the end on the calling thread
    ///
    /// Uses terrain-aware attacks when a terrain is set. Returns the winner,
    /// or `None` if the battle was stopped first.
    pub fn simulate(&mut self) -> Result<Option<&Army>> {
        self.run_to_end(false)
    }

    /// Fight to the end on the calling thread with terrain effects
    pub fn simulate_with_terrain(&mut self) -> Result<Option<&Army>> {
        self.run_to_end(true)
    }

    /// Fight with terrain effects, pausing `delay_ms` between turns
    ///
    /// The pause is a tokio sleep, so other tasks (including one holding a
    /// `StopHandle`) keep running while this battle waits.
    pub async fn simulate_with_delay(&mut self, delay_ms: i64) -> Result<Option<&Army>> {
        let delay = u64::try_from(delay_ms).map_err(|_| WargamesError::NegativeDelay(delay_ms))?;
        self.begin(true)?;

        let delay = Duration::from_millis(delay);
        let terrain = self.terrain;
        while self.should_continue() {
            self.turn(terrain)?;
            if self.should_continue() {
                tokio::time::sleep(delay).await;
            }
        }
        Ok(self.conclude())
    }

    fn run_to_end(&mut self, require_terrain: bool) -> Result<Option<&Army>> {
        self.begin(require_terrain)?;
        let terrain = self.terrain;
        while self.should_continue() {
            self.turn(terrain)?;
        }
        Ok(self.conclude())
    }

    fn begin(&mut self, require_terrain: bool) -> Result<()> {
        for army in &self.armies {
            if !army.has_living_units() {
                return Err(WargamesError::EmptyArmy(army.name().to_string()));
            }
        }
        if require_terrain && self.terrain.is_none() {
            return Err(WargamesError::TerrainNotSet);
        }

        self.attacks = 0;
        self.phase = BattlePhase::Running;
        tracing::info!(
            attacker = self.armies[self.attacker].name(),
            defender = self.armies[1 - self.attacker].name(),
            terrain = ?self.terrain,
            "Battle started"
        );
        Ok(())
    }

    fn should_continue(&self) -> bool {
        !self.stop.is_stopped() && self.armies.iter().all(Army::has_living_units)
    }

    fn turn(&mut self, terrain: Option<Terrain>) -> Result<()> {
        let (first, second) = self.armies.split_at_mut(1);
        let (attacking, defending) = if self.attacker == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        };

        let a = attacking.random_index(&mut self.rng)?;
        let d = defending.random_index(&mut self.rng)?;

        let attacker_unit = attacking.unit_mut(a);
        let defender_unit = defending.unit_mut(d);
        let before = defender_unit.health();
        match terrain {
            Some(terrain) => attacker_unit.attack_with_terrain(defender_unit, terrain),
            None => attacker_unit.attack(defender_unit),
        }

        tracing::debug!(
            turn = self.attacks + 1,
            attacker = attacker_unit.name(),
            defender = defender_unit.name(),
            damage = before - defender_unit.health(),
            remaining = defender_unit.health(),
            "Attack resolved"
        );

        if defender_unit.is_dead() {
            let fallen = defending.remove_at(d);
            tracing::debug!(unit = fallen.name(), army = defending.name(), "Unit fell");
        }

        self.attacks += 1;
        self.events.notify(
            BattleEvent::Update,
            &BattleProgress {
                attacker: attacking,
                defender: defending,
                attacks: self.attacks,
                terrain,
            },
        );

        self.attacker = 1 - self.attacker;
        Ok(())
    }

    fn conclude(&mut self) -> Option<&Army> {
        if self.stop.is_stopped() {
            self.phase = BattlePhase::Cancelled;
            tracing::info!(attacks = self.attacks, "Battle stopped before a winner emerged");
            return None;
        }

        self.phase = BattlePhase::Finished;
        // The side that just attacked sits at 1 - attacker after the swap
        let last_attacker = 1 - self.attacker;
        self.events.notify(
            BattleEvent::Finish,
            &BattleProgress {
                attacker: &self.armies[last_attacker],
                defender: &self.armies[self.attacker],
                attacks: self.attacks,
                terrain: self.terrain,
            },
        );

        let winner = self.winner();
        if let Some(army) = winner {
            tracing::info!(
                winner = army.name(),
                survivors = army.len(),
                attacks = self.attacks,
                "Battle finished"
            );
        }
        winner
    }
}
