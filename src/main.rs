//! Wargames - Entry Point
//!
//! Loads two armies, fights them and reports the outcome. With a delay the
//! battle runs paced on a tokio runtime and stops cleanly on Ctrl-C.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use wargames::battle::{estimate_odds, Army, BattlePhase, Terrain};
use wargames::core::config::SimulationConfig;
use wargames::core::error::Result;
use wargames::persistence::{parse_army, read_army};
use wargames::ui::{BattleLog, LogCategory, SimulationSetup};

const DEMO_ATTACKER: &str = include_str!("../data/armies/human_army.csv");
const DEMO_DEFENDER: &str = include_str!("../data/armies/orcish_horde.csv");

/// Turn-based army battle simulator
#[derive(Parser, Debug)]
#[command(name = "wargames")]
#[command(about = "Fight two armies against each other, turn by turn")]
struct Args {
    /// Army file for the side that strikes first (demo army when omitted)
    #[arg(long)]
    attacker: Option<PathBuf>,

    /// Army file for the other side (demo army when omitted)
    #[arg(long)]
    defender: Option<PathBuf>,

    /// Battlefield terrain: plains, forest or hill
    #[arg(long)]
    terrain: Option<Terrain>,

    /// Pause between turns in milliseconds (paced mode needs a terrain)
    #[arg(long)]
    delay_ms: Option<i64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Estimate win odds over many battles instead of fighting one
    #[arg(long)]
    odds: bool,

    /// Number of battles for --odds (overrides the config)
    #[arg(long)]
    runs: Option<u32>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleReport {
    winner: Option<String>,
    survivors: usize,
    survivor_health: i64,
    attacks: u64,
    cancelled: bool,
    terrain: Option<Terrain>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wargames=info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    let attacker = load_army(args.attacker.as_ref(), DEMO_ATTACKER)?;
    let defender = load_army(args.defender.as_ref(), DEMO_DEFENDER)?;

    if args.odds {
        let runs = args.runs.unwrap_or(config.odds_runs);
        let seed = config.seed.unwrap_or_else(rand::random);
        let odds = estimate_odds(&attacker, &defender, config.terrain, runs, seed)?;
        match args.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&odds)?),
            _ => {
                println!("Odds over {} battles (seed {})", odds.runs, seed);
                println!("=============");
                println!("{}: {:.1}%", attacker.name(), odds.first_win_rate() * 100.0);
                println!("{}: {:.1}%", defender.name(), odds.second_win_rate() * 100.0);
                println!("Mean attacks: {:.1}", odds.mean_attacks);
            }
        }
        return Ok(());
    }

    let mut setup = SimulationSetup::from_config(&config);
    setup.select_attacker(attacker);
    setup.select_defender(defender);

    let log = BattleLog::new(config.log_capacity);
    let mut battle = setup.build_battle()?;
    battle.attach(log.observer());

    let winner: Option<Army> = if setup.is_paced() {
        let rt = Runtime::new()?;
        let stop = battle.stop_handle();
        rt.block_on(async {
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted, stopping after the current turn");
                    stop.stop();
                }
            });
            battle
                .simulate_with_delay(setup.delay_ms)
                .await
                .map(|w| w.cloned())
        })?
    } else {
        battle.simulate()?.cloned()
    };

    let report = BattleReport {
        winner: winner.as_ref().map(|army| army.name().to_string()),
        survivors: winner.as_ref().map_or(0, Army::len),
        survivor_health: winner.as_ref().map_or(0, Army::total_health),
        attacks: battle.num_of_attacks(),
        cancelled: battle.phase() == BattlePhase::Cancelled,
        terrain: battle.terrain(),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report, &log),
        other => {
            tracing::warn!("Unknown format '{}', defaulting to text", other);
            print_text(&report, &log);
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied, validated
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.terrain.is_some() {
        config.terrain = args.terrain;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.delay_ms = delay_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn load_army(path: Option<&PathBuf>, demo: &str) -> Result<Army> {
    match path {
        Some(path) => read_army(path),
        None => parse_army(demo),
    }
}

fn print_text(report: &BattleReport, log: &BattleLog) {
    println!("Battle Result");
    println!("=============");
    for entry in log.entries() {
        if entry.category == LogCategory::Outcome {
            println!("[{}] {}", entry.attack, entry.message);
        }
    }
    match &report.winner {
        Some(name) => println!("Winner: {}", name),
        None if report.cancelled => println!("Battle stopped before a winner emerged"),
        None => println!("No winner"),
    }
    println!("Survivors: {} ({} total health)", report.survivors, report.survivor_health);
    println!("Attacks: {}", report.attacks);
    if let Some(terrain) = report.terrain {
        println!("Terrain: {}", terrain);
    }
}
