//! Battle system integration tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wargames::battle::*;
use wargames::core::error::WargamesError;

fn army_of(name: &str, unit_type: UnitType, count: usize, health: i32) -> Army {
    let mut army = Army::new(name).unwrap();
    army.add_many(&Unit::new(unit_type, format!("{} soldier", name), health).unwrap(), count);
    army
}

fn mixed_army(name: &str) -> Army {
    let mut army = Army::new(name).unwrap();
    army.add_many(&Unit::new(UnitType::Infantry, "Footman", 100).unwrap(), 20);
    army.add_many(&Unit::new(UnitType::Ranged, "Archer", 100).unwrap(), 10);
    army.add_many(&Unit::new(UnitType::Cavalry, "Knight", 100).unwrap(), 6);
    army.add(&Unit::new(UnitType::Commander, "Captain", 180).unwrap());
    army
}

fn record_events(battle: &mut Battle) -> Arc<Mutex<Vec<BattleEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    battle.attach(Box::new(move |event: BattleEvent, _: &BattleProgress<'_>| {
        sink.lock().unwrap().push(event);
    }));
    log
}

#[test]
fn test_full_battle_has_exactly_one_winner() {
    let humans = mixed_army("Humans");
    let orcs = mixed_army("Orcs");

    for terrain in [None, Some(Terrain::Plains), Some(Terrain::Forest), Some(Terrain::Hill)] {
        let mut battle = Battle::with_seed(humans.clone(), orcs.clone(), terrain, 2024);
        let winner = battle.simulate().unwrap().cloned().unwrap();
        let loser = battle.loser().unwrap();

        assert!(winner.has_units());
        assert!(!loser.has_units());
        assert_ne!(winner.name(), loser.name());
        assert_eq!(battle.winner().map(Army::name), Some(winner.name()));
        assert_eq!(battle.phase(), BattlePhase::Finished);
    }
}

#[test]
fn test_overpowered_cavalry_always_wins() {
    for seed in 0..20 {
        let mut battle = Battle::with_seed(
            Army::with_units("Cavalry", vec![Unit::new(UnitType::Cavalry, "OP", 10000).unwrap()])
                .unwrap(),
            Army::with_units("Commander", vec![Unit::new(UnitType::Commander, "C", 40).unwrap()])
                .unwrap(),
            None,
            seed,
        );
        let winner = battle.simulate().unwrap().unwrap();
        assert_eq!(winner.name(), "Cavalry");
        assert!(winner.units()[0].health() > 0);
    }
}

#[test]
fn test_thousand_infantry_each_terminates() {
    let mut battle = Battle::with_seed(
        army_of("North", UnitType::Infantry, 1000, 100),
        army_of("South", UnitType::Infantry, 1000, 100),
        None,
        77,
    );
    battle.simulate().unwrap();

    let (north, south) = battle.armies();
    assert!(north.has_units() != south.has_units());
    assert!(battle.num_of_attacks() > 1000);
}

#[test]
fn test_seeded_battles_are_reproducible() {
    let run = || {
        let mut battle = Battle::with_seed(mixed_army("A"), mixed_army("B"), Some(Terrain::Hill), 5);
        let winner = battle.simulate().unwrap().cloned().unwrap();
        (winner, battle.num_of_attacks())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_health_never_negative_during_battle() {
    let mut battle = Battle::with_seed(mixed_army("A"), mixed_army("B"), Some(Terrain::Forest), 8);
    let violations = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&violations);
    battle.attach(Box::new(move |_: BattleEvent, p: &BattleProgress<'_>| {
        let bad = p
            .attacker
            .units()
            .iter()
            .chain(p.defender.units())
            .filter(|u| u.health() <= 0)
            .count();
        *sink.lock().unwrap() += bad;
    }));

    battle.simulate().unwrap();
    assert_eq!(*violations.lock().unwrap(), 0);
}

#[test]
fn test_cancel_mid_battle_emits_no_finish() {
    let mut battle = Battle::with_seed(mixed_army("A"), mixed_army("B"), None, 13);
    let stop = battle.stop_handle();
    let events = record_events(&mut battle);
    battle.attach(Box::new(move |_: BattleEvent, p: &BattleProgress<'_>| {
        if p.attacks == 10 {
            stop.stop();
        }
    }));

    assert!(battle.simulate().unwrap().is_none());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 10);
    assert!(events.iter().all(|e| *e == BattleEvent::Update));
    assert_eq!(battle.phase(), BattlePhase::Cancelled);
}

#[test]
fn test_empty_armies_rejected_up_front() {
    let mut battle = Battle::new(Army::new("Nobody").unwrap(), mixed_army("B"), None);
    let events = record_events(&mut battle);

    assert!(matches!(battle.simulate(), Err(WargamesError::EmptyArmy(_))));
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(battle.num_of_attacks(), 0);
}

#[test]
fn test_army_without_living_units_fails_fast() {
    let mut fallen = Unit::new(UnitType::Infantry, "Fallen", 100).unwrap();
    fallen.set_health(0);
    let mut ghosts = Army::new("Ghosts").unwrap();
    ghosts.add_many(&fallen, 3);

    let mut battle = Battle::with_seed(mixed_army("A"), ghosts.clone(), None, 1);
    assert!(matches!(battle.simulate(), Err(WargamesError::EmptyArmy(_))));
    assert_eq!(battle.num_of_attacks(), 0);

    assert!(matches!(
        estimate_odds(&mixed_army("A"), &ghosts, None, 10, 1),
        Err(WargamesError::EmptyArmy(_))
    ));
}

#[tokio::test]
async fn test_paced_battle_stopped_from_another_task() {
    let mut battle = Battle::with_seed(
        army_of("North", UnitType::Infantry, 1000, 100),
        army_of("South", UnitType::Infantry, 1000, 100),
        Some(Terrain::Plains),
        21,
    );
    let stop = battle.stop_handle();
    let events = record_events(&mut battle);

    let task = tokio::spawn(async move {
        let winner = battle.simulate_with_delay(1).await.unwrap().cloned();
        (winner, battle)
    });

    tokio::time::sleep(Duration::from_millis(30)).await;
    stop.stop();
    let (winner, battle) = task.await.unwrap();

    assert!(winner.is_none());
    assert_eq!(battle.phase(), BattlePhase::Cancelled);
    assert!(battle.winner().is_none());
    assert!(!events.lock().unwrap().contains(&BattleEvent::Finish));
}

#[tokio::test]
async fn test_paced_battle_runs_to_completion() {
    let mut battle = Battle::with_seed(
        army_of("Riders", UnitType::Cavalry, 3, 30),
        army_of("Archers", UnitType::Ranged, 3, 30),
        Some(Terrain::Plains),
        4,
    );
    let events = record_events(&mut battle);

    let winner = battle.simulate_with_delay(0).await.unwrap().cloned().unwrap();

    assert!(winner.has_units());
    assert_eq!(events.lock().unwrap().last(), Some(&BattleEvent::Finish));
    assert_eq!(battle.phase(), BattlePhase::Finished);
}
