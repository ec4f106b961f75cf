mod console;

use crate::console::{ConsoleActor, ConsolePresenter};
use anyhow::Context;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tapout_autoplay::{AutoplayConfig, AutoplayResult, Simulator, Strategy};
use tapout_core::{
    Actor, Catalog, Deck, Engine, EngineError, ErrorKind, EventBus, GameConfig, GameState,
    PlayerInfo, RngState,
};
use tapout_data::{load_catalog, load_decklist, load_deck, load_game_config};

const DEFAULT_SEED: u64 = 0xC0FFEE;
const DEFAULT_SETS: &[&str] = &["4E"];
const DECK_FILES: [&str; 2] = ["white.json", "blue.json"];

#[derive(Debug, Clone)]
struct CliOptions {
    auto: bool,
    seed: u64,
    assets: PathBuf,
    sets: Vec<String>,
    trace: Option<PathBuf>,
    max_steps: Option<u32>,
    max_turns: Option<u32>,
    strategies: Option<Vec<Strategy>>,
}

fn parse_strategies(value: &str) -> Option<Vec<Strategy>> {
    let mut strategies = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        match Strategy::from_name(name) {
            Some(strategy) => strategies.push(strategy),
            None => {
                eprintln!("unknown strategy: {}", name.trim());
                return None;
            }
        }
    }
    Some(strategies)
}

fn parse_cli_options(args: &[String], env_seed: Option<String>) -> CliOptions {
    let mut auto = false;
    let mut seed = env_seed.and_then(|value| value.parse::<u64>().ok());
    let mut assets = PathBuf::from("assets");
    let mut sets: Vec<String> = DEFAULT_SETS.iter().map(|code| code.to_string()).collect();
    let mut trace = None;
    let mut max_steps = None;
    let mut max_turns = None;
    let mut strategies = None;
    let mut idx = 0usize;
    while idx < args.len() {
        let value = args.get(idx + 1);
        match (args[idx].as_str(), value) {
            ("--auto", _) => auto = true,
            ("--seed", Some(value)) => {
                seed = value.parse::<u64>().ok().or(seed);
                idx += 1;
            }
            ("--assets", Some(value)) => {
                assets = PathBuf::from(value);
                idx += 1;
            }
            ("--sets", Some(value)) => {
                sets = value
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect();
                idx += 1;
            }
            ("--trace", Some(value)) => {
                trace = Some(PathBuf::from(value));
                idx += 1;
            }
            ("--max-steps", Some(value)) => {
                max_steps = value.parse::<u32>().ok();
                idx += 1;
            }
            ("--max-turns", Some(value)) => {
                max_turns = value.parse::<u32>().ok();
                idx += 1;
            }
            ("--strategies", Some(value)) => {
                strategies = parse_strategies(value);
                idx += 1;
            }
            (other, _) => eprintln!("ignoring argument: {other}"),
        }
        idx += 1;
    }
    CliOptions {
        auto,
        seed: seed.unwrap_or(DEFAULT_SEED),
        assets,
        sets,
        trace,
        max_steps,
        max_turns,
        strategies,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args, std::env::var("TAPOUT_SEED").ok());
    let result = if options.auto {
        run_auto(&options)
    } else {
        run_console(&options)
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

struct Table {
    config: GameConfig,
    decks: Vec<Deck>,
    names: Vec<String>,
}

fn load_table(options: &CliOptions) -> anyhow::Result<Table> {
    let sets: Vec<&str> = options.sets.iter().map(String::as_str).collect();
    let catalog: Catalog = load_catalog(&options.assets.join("catalog.json"), &sets)?;
    let config = load_game_config(&options.assets)?;
    let mut decks = Vec::new();
    let mut names = Vec::new();
    for (owner, file) in DECK_FILES.iter().enumerate() {
        let path = options.assets.join("decks").join(file);
        let list = load_decklist(&path)?;
        names.push(
            list.player_name
                .clone()
                .unwrap_or_else(|| format!("player {owner}")),
        );
        decks.push(load_deck(&catalog, owner, config.deck, &path)?);
    }
    Ok(Table {
        config,
        decks,
        names,
    })
}

fn run_auto(options: &CliOptions) -> anyhow::Result<()> {
    let table = load_table(options)?;
    let defaults = AutoplayConfig::default();
    let config = AutoplayConfig {
        seed: options.seed,
        max_steps: options.max_steps.unwrap_or(defaults.max_steps),
        max_turns: options.max_turns.unwrap_or(defaults.max_turns),
        strategies: options
            .strategies
            .clone()
            .unwrap_or_else(|| defaults.strategies.clone()),
        ..defaults
    };
    println!("seed: {}", config.seed);
    let mut sim = Simulator::from_decks(table.decks, table.config, &config)?;
    let result = sim.play(&config)?;
    println!("{}", result.to_text_report());
    if let Some(path) = options.trace.as_deref() {
        write_trace(path, &result)?;
    }
    Ok(())
}

/// Writes the JSON trace and a plain text report beside it.
fn write_trace(path: &Path, result: &AutoplayResult) -> anyhow::Result<()> {
    result
        .save_trace(path)
        .with_context(|| format!("write {}", path.display()))?;
    let report = report_path(path);
    result
        .save_report(&report)
        .with_context(|| format!("write {}", report.display()))?;
    println!("trace written to {}", path.display());
    println!("report written to {}", report.display());
    Ok(())
}

fn report_path(trace: &Path) -> PathBuf {
    trace.with_extension("txt")
}

fn run_console(options: &CliOptions) -> anyhow::Result<()> {
    let table = load_table(options)?;
    let mut rng = RngState::from_seed(options.seed);
    let mut events = EventBus::default();
    let state = GameState::new(table.decks, 0, table.config, &mut rng, &mut events)?;
    let roster = table
        .names
        .iter()
        .map(|name| PlayerInfo::new(name, false))
        .collect();
    let mut engine = Engine::new(state, roster);
    let closed = Rc::new(Cell::new(false));
    let mut actors: Vec<Box<dyn Actor>> = vec![
        Box::new(ConsoleActor::new(Rc::clone(&closed))),
        Box::new(ConsoleActor::new(Rc::clone(&closed))),
    ];
    let mut presenter = ConsolePresenter;
    let turn_limit = options.max_turns.unwrap_or(u32::MAX);

    while !closed.get() && !engine.state.turn_limit_reached(turn_limit) {
        match engine.step(&mut actors, &mut presenter, &mut events) {
            Ok(_) => {}
            Err(EngineError::Rule(err)) if err.kind() == ErrorKind::RuleGap => {
                eprintln!("warning: {err}");
            }
            Err(err) => return Err(err.into()),
        }
        for event in events.drain() {
            println!("event: {:?}", event);
        }
    }
    Ok(())
}
