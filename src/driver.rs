//! Headless driver: stands in for the UI collaborator.
//!
//! Calls the engine the way a window would (one `tick()` per timer period,
//! with the odd directional command in between) and reports what happens as
//! JSON lines. Nothing is rendered and nothing sleeps; `tick_ms` only scales
//! the reported simulated time.

use std::io::Write;
use std::sync::mpsc;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::core::{EngineConfig, GameOverReport, GameSnapshot, GameState, RestartPolicy, SimpleRng};
use crate::types::{GameAction, DEFAULT_TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub engine: EngineConfig,
    /// Simulated timer period per tick
    pub tick_ms: u32,
    pub max_ticks: u64,
    /// Emit a snapshot every N ticks (0 disables)
    pub snapshot_every: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_ms: DEFAULT_TICK_MS,
            max_ticks: 2000,
            snapshot_every: 0,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(v) = get("TETRIS_SEED") {
            config.engine.seed = v
                .parse()
                .with_context(|| format!("invalid TETRIS_SEED value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_COLUMNS") {
            config.engine.columns = v
                .parse()
                .with_context(|| format!("invalid TETRIS_COLUMNS value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_ROWS") {
            config.engine.rows = v
                .parse()
                .with_context(|| format!("invalid TETRIS_ROWS value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_RESTART") {
            config.engine.restart = RestartPolicy::from_str(&v)
                .ok_or_else(|| anyhow!("invalid TETRIS_RESTART value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_TICK_MS") {
            config.tick_ms = v
                .parse()
                .with_context(|| format!("invalid TETRIS_TICK_MS value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_MAX_TICKS") {
            config.max_ticks = v
                .parse()
                .with_context(|| format!("invalid TETRIS_MAX_TICKS value: {}", v))?;
        }
        if let Some(v) = get("TETRIS_SNAPSHOT_EVERY") {
            config.snapshot_every = v
                .parse()
                .with_context(|| format!("invalid TETRIS_SNAPSHOT_EVERY value: {}", v))?;
        }

        config.engine.validate()?;
        Ok(config)
    }
}

/// One line of driver output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DriverRecord {
    GameOver {
        tick: u64,
        elapsed_ms: u64,
        report: GameOverReport,
    },
    Snapshot {
        tick: u64,
        elapsed_ms: u64,
        snapshot: GameSnapshot,
    },
    Summary(DriverSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriverSummary {
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub games_finished: u32,
    pub best_score: u32,
    pub current_score: u32,
}

pub struct Driver {
    config: DriverConfig,
    game: GameState,
    rng: SimpleRng,
    game_overs: mpsc::Receiver<GameOverReport>,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Result<Self> {
        let mut game = GameState::new(config.engine)?;
        let (tx, rx) = mpsc::channel();
        game.set_game_over_hook(move |report| {
            // The receiver lives as long as the driver that owns the engine.
            tx.send(*report).ok();
        });

        // Separate stream from the engine's so input choices don't shift piece order.
        let rng = SimpleRng::new(config.engine.seed.wrapping_add(0x9e37_79b9));

        Ok(Self {
            config,
            game,
            rng,
            game_overs: rx,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    fn pick_action(&mut self) -> Option<GameAction> {
        match self.rng.next_range(4) {
            0 => Some(GameAction::MoveLeft),
            1 => Some(GameAction::MoveRight),
            2 => Some(GameAction::Rotate),
            _ => None,
        }
    }

    /// Run `max_ticks` ticks, writing one JSON record per line to `out`.
    pub fn run(&mut self, out: &mut impl Write) -> Result<DriverSummary> {
        let mut games_finished = 0u32;
        let mut best_score = 0u32;

        self.game.start_new_game();

        for tick in 1..=self.config.max_ticks {
            if let Some(action) = self.pick_action() {
                self.game.apply_action(action)?;
            }
            self.game.tick()?;

            let elapsed_ms = tick * self.config.tick_ms as u64;

            while let Ok(report) = self.game_overs.try_recv() {
                games_finished += 1;
                best_score = best_score.max(report.score);
                write_record(
                    out,
                    &DriverRecord::GameOver {
                        tick,
                        elapsed_ms,
                        report,
                    },
                )?;
            }

            if self.game.is_game_over() {
                self.game.start_new_game();
            }

            if self.config.snapshot_every > 0 && tick % self.config.snapshot_every == 0 {
                write_record(
                    out,
                    &DriverRecord::Snapshot {
                        tick,
                        elapsed_ms,
                        snapshot: self.game.snapshot(),
                    },
                )?;
            }
        }

        let summary = DriverSummary {
            ticks: self.config.max_ticks,
            elapsed_ms: self.config.max_ticks * self.config.tick_ms as u64,
            games_finished,
            best_score: best_score.max(self.game.score()),
            current_score: self.game.score(),
        };
        write_record(out, &DriverRecord::Summary(summary))?;
        Ok(summary)
    }
}

fn write_record(out: &mut impl Write, record: &DriverRecord) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}
