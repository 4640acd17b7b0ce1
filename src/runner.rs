//! Headless runner: plays a match (or a solo game) with the autopilot on a
//! virtual clock and reports the result.

use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::rng::RandomSource;
use crate::core::GameState;
use crate::engine::{apply_place, best_placement, LeaderboardEntry, Match};
use crate::types::{Difficulty, PlayerId, MAX_PLAYERS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// 1 runs a solo game; 2-4 run a match
    pub players: usize,
    pub difficulty: Difficulty,
    pub seed: u32,
    /// Upper bound on simulated ticks
    pub steps: u32,
    /// Autopilot reaction time between placements
    pub think_ms: u32,
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            players: 2,
            difficulty: Difficulty::Normal,
            seed: 1,
            steps: 10_000,
            think_ms: 250,
            json: false,
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let v = args
        .get(i)
        .ok_or_else(|| anyhow!("run: missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("run: invalid {} value: {}", flag, v))
}

pub fn parse_run_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                i += 1;
                config.players = parse_value(args, i, "--players")?;
            }
            "--difficulty" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("run: missing value for --difficulty"))?;
                config.difficulty = v
                    .parse::<Difficulty>()
                    .map_err(|e| anyhow!("run: {}: {}", e, v))?;
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(args, i, "--seed")?;
            }
            "--steps" => {
                i += 1;
                config.steps = parse_value(args, i, "--steps")?;
            }
            "--think-ms" => {
                i += 1;
                config.think_ms = parse_value(args, i, "--think-ms")?;
            }
            "--json" => config.json = true,
            other => {
                return Err(anyhow!("run: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    if !(1..=MAX_PLAYERS).contains(&config.players) {
        return Err(anyhow!(
            "run: --players must be between 1 and {}, got {}",
            MAX_PLAYERS,
            config.players
        ));
    }
    Ok(config)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub difficulty: Difficulty,
    pub seed: u32,
    /// Ticks actually simulated
    pub steps: u32,
    /// True when the game ended before the step limit
    pub finished: bool,
    pub winner: Option<PlayerId>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

fn think_interval(config: &RunConfig) -> u32 {
    (config.think_ms / TICK_MS).max(1)
}

pub fn run(config: &RunConfig) -> Result<RunReport> {
    if config.players == 1 {
        return Ok(run_solo(config));
    }

    let mut game = Match::new(config.players, config.difficulty, config.seed)?;
    let think_every = think_interval(config);
    let mut now = 0u64;
    let mut steps = 0;

    while steps < config.steps && !game.is_over() {
        if steps % think_every == 0 {
            for id in 1..=game.num_players() as PlayerId {
                let Some(target) = game.player(id).and_then(best_placement) else {
                    continue;
                };
                if game.place(id, target.x, target.rotation).is_err() {
                    game.hard_drop(id);
                }
            }
        }
        game.tick(now);
        now += TICK_MS as u64;
        steps += 1;
    }

    Ok(RunReport {
        difficulty: config.difficulty,
        seed: config.seed,
        steps,
        finished: game.is_over(),
        winner: game.winner(),
        leaderboard: game.leaderboard(),
    })
}

fn run_solo(config: &RunConfig) -> RunReport {
    let mut source = RandomSource::new(config.seed);
    let mut state = GameState::new(config.difficulty, &mut source);
    let think_every = think_interval(config);
    let mut now = 0u64;
    let mut steps = 0;

    while steps < config.steps && !state.game_over() {
        if steps % think_every == 0 {
            if let Some(target) = best_placement(&state) {
                if apply_place(&mut state, &mut source, target.x, target.rotation).is_err() {
                    state.hard_drop(&mut source);
                }
            }
        }
        state.tick(now, &mut source);
        now += TICK_MS as u64;
        steps += 1;
    }

    RunReport {
        difficulty: config.difficulty,
        seed: config.seed,
        steps,
        finished: state.game_over(),
        winner: None,
        leaderboard: vec![LeaderboardEntry {
            id: 1,
            name: String::from("Player 1"),
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
            game_over: state.game_over(),
        }],
    }
}

/// Plain-text summary for terminals
pub fn report_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "difficulty {} | seed {} | {} ticks{}",
        report.difficulty.name(),
        report.seed,
        report.steps,
        if report.finished { "" } else { " (step limit)" }
    );

    if let Some(id) = report.winner {
        let name = report
            .leaderboard
            .iter()
            .find(|entry| entry.id == id)
            .map_or("?", |entry| entry.name.as_str());
        let _ = writeln!(out, "winner: {}", name);
    }

    for (rank, entry) in report.leaderboard.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:<12} score {:>7}  lines {:>4}  level {:>3}{}",
            rank + 1,
            entry.name,
            entry.score,
            entry.lines,
            entry.level,
            if entry.game_over { "  [out]" } else { "" }
        );
    }
    out
}
