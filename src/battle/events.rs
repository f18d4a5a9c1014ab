//! Battle notifications
//!
//! A minimal synchronous publish/subscribe channel. The battle loop calls
//! `notify` inline; observers that need another thread or task must hand the
//! work off themselves.

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::terrain::Terrain;

/// What just happened in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleEvent {
    /// One attack was resolved
    Update,
    /// One side has been wiped out (never sent after a stop request)
    Finish,
}

/// Read-only view of a battle, valid for the duration of one notification
#[derive(Debug, Clone, Copy)]
pub struct BattleProgress<'a> {
    /// Side that made the most recent attack
    pub attacker: &'a Army,
    /// Side that received it
    pub defender: &'a Army,
    /// Attacks resolved so far, counting the one this `Update` reports
    pub attacks: u64,
    pub terrain: Option<Terrain>,
}

/// Receives battle notifications
pub trait Observer: Send {
    fn on_event(&mut self, event: BattleEvent, progress: &BattleProgress<'_>);
}

impl<F> Observer for F
where
    F: FnMut(BattleEvent, &BattleProgress<'_>) + Send,
{
    fn on_event(&mut self, event: BattleEvent, progress: &BattleProgress<'_>) {
        self(event, progress)
    }
}

/// Handle returned by `attach`, used to detach later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Ordered list of observers
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(ObserverId, Box<dyn Observer>)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer; returns false if it was not attached
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(attached, _)| *attached != id);
        self.observers.len() != before
    }

    /// Deliver `event` to every observer in attach order
    pub fn notify(&mut self, event: BattleEvent, progress: &BattleProgress<'_>) {
        for (_, observer) in &mut self.observers {
            observer.on_event(event, progress);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
