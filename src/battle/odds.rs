//! Win-rate estimation by repeated simulation
//!
//! Battles are independent, so runs fan out across threads with rayon.
//! Run `i` is seeded with `seed + i`, which keeps a report reproducible.

use rayon::prelude::*;
use serde::Serialize;

use crate::battle::army::Army;
use crate::battle::simulation::Battle;
use crate::battle::terrain::Terrain;
use crate::core::error::{Result, WargamesError};

/// Aggregated outcome of many battles between the same two armies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Odds {
    pub runs: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub mean_attacks: f64,
}

impl Odds {
    /// Fraction of runs won by the first army (0.0 when no runs)
    pub fn first_win_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.first_wins as f64 / self.runs as f64
    }

    pub fn second_win_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.second_wins as f64 / self.runs as f64
    }
}

/// Fight `runs` fresh copies of the two armies and count the winners
pub fn estimate_odds(
    first: &Army,
    second: &Army,
    terrain: Option<Terrain>,
    runs: u32,
    seed: u64,
) -> Result<Odds> {
    if runs == 0 {
        return Ok(Odds::default());
    }
    for army in [first, second] {
        if !army.has_living_units() {
            return Err(WargamesError::EmptyArmy(army.name().to_string()));
        }
    }

    let outcomes: Vec<(bool, u64)> = (0..runs)
        .into_par_iter()
        .map(|i| -> Result<(bool, u64)> {
            let mut battle =
                Battle::with_seed(first.clone(), second.clone(), terrain, seed.wrapping_add(i as u64));
            battle.simulate()?;
            let first_won = battle.armies().0.has_living_units();
            Ok((first_won, battle.num_of_attacks()))
        })
        .collect::<Result<_>>()?;

    let first_wins = outcomes.iter().filter(|(won, _)| *won).count() as u32;
    let total_attacks: u64 = outcomes.iter().map(|(_, attacks)| attacks).sum();

    let odds = Odds {
        runs,
        first_wins,
        second_wins: runs - first_wins,
        mean_attacks: total_attacks as f64 / runs as f64,
    };
    tracing::info!(
        first = first.name(),
        second = second.name(),
        runs,
        first_wins = odds.first_wins,
        "Odds estimated"
    );
    Ok(odds)
}
