//! Command-line goldfisher.
//!
//! Loads a scenario (decklists plus settings) from JSON, explores every line
//! of play up to the turn limit, and reports what it found.
//!
//! ```json
//! {
//!   "decks": [{ "deck": ["Forest", "Forest"], "hand": ["Llanowar Elves", "Forest"] }],
//!   "search": { "turn_limit": 3 },
//!   "mana_target": 4
//! }
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use goldfish::cards::{build_game, CardRegistry, Decklist};
use goldfish::core::GameConfig;
use goldfish::search::{PlayTree, SearchConfig};

/// Explore every line of play of a scenario.
#[derive(Parser)]
#[command(name = "goldfish")]
#[command(about = "Exhaustive goldfish search for a card game", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (JSON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Last turn to explore (overrides the scenario)
    #[arg(short, long, value_name = "TURN")]
    turns: Option<u32>,

    /// Mana to look for (overrides the scenario)
    #[arg(short = 'm', long, value_name = "MANA")]
    target: Option<u32>,

    /// Distinct states tracked per turn (overrides the scenario)
    #[arg(long, value_name = "N")]
    max_states: Option<usize>,

    /// Seed for deck shuffles (overrides the scenario)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a line of play reaching the mana target
    #[arg(long)]
    show_line: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Per-turn table
    Summary,
    /// Statistics as JSON
    Json,
}

/// Everything needed to start a search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    game: GameConfig,
    search: SearchConfig,
    decks: Vec<Decklist>,
    mana_target: Option<u32>,
    seed: u64,
}

/// Answer to "can I make N mana by turn T".
#[derive(Serialize)]
struct Report<'a> {
    stats: &'a goldfish::search::SearchStats,
    mana_target: Option<u32>,
    reachable: Option<bool>,
    max_mana: Vec<(u32, Option<u32>)>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut scenario = load_scenario(&cli.scenario)?;
    if let Some(turns) = cli.turns {
        scenario.search.turn_limit = turns;
    }
    if let Some(max) = cli.max_states {
        scenario.search.max_states_per_turn = max;
    }
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if cli.target.is_some() {
        scenario.mana_target = cli.target;
    }
    if cli.show_line {
        scenario.game.track_history = true;
    }

    let registry = CardRegistry::with_catalog();
    let start = build_game(&scenario.game, &registry, &scenario.decks, scenario.seed)
        .context("failed to build the starting state")?;
    let first_turn = start.turn;
    let last_turn = scenario.search.turn_limit.max(first_turn);
    info!(turns = last_turn, "searching");

    let mut tree = PlayTree::new(start, scenario.search.clone());
    tree.run();

    let reachable = scenario.mana_target.map(|n| tree.can_reach_mana(n, last_turn));
    let report = Report {
        stats: tree.stats(),
        mana_target: scenario.mana_target,
        reachable,
        max_mana: (first_turn..=last_turn).map(|t| (t, tree.max_mana(t))).collect(),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Summary => print_summary(&report),
    }

    if cli.show_line {
        if let Some(target) = scenario.mana_target {
            print_line(&tree, target, first_turn, last_turn);
        }
    }
    Ok(())
}

fn load_scenario(path: &PathBuf) -> Result<Scenario> {
    let text = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&text).with_context(|| format!("invalid scenario {}", path.display()))?;
    if scenario.decks.is_empty() {
        bail!("scenario {} has no decklists", path.display());
    }
    Ok(scenario)
}

fn print_summary(report: &Report<'_>) {
    println!("{}", report.stats);
    for (turn, mana) in &report.max_mana {
        match mana {
            Some(mana) => println!("turn {turn}: up to {mana} mana"),
            None => println!("turn {turn}: not reached"),
        }
    }
    if let (Some(target), Some(reachable)) = (report.mana_target, report.reachable) {
        let verdict = if reachable { "reachable" } else { "not reachable" };
        println!("{target} mana: {verdict}");
    }
}

fn print_line(tree: &PlayTree, target: u32, first_turn: u32, last_turn: u32) {
    let found = (first_turn..=last_turn)
        .flat_map(|t| tree.states_at(t))
        .find(|s| s.player(s.active_player).pool.total() >= target);
    let Some(state) = found else {
        println!("no line reaches {target} mana");
        return;
    };
    for record in state.history() {
        println!("  T{} {}: {}", record.turn, record.player, record.description);
    }
}
