//! Headless engine runner (default binary).
//!
//! Drives the engine on a simulated timer with pseudo-random input and prints
//! JSON lines (game-over reports, optional snapshots, a final summary) to
//! stdout. Configuration comes from `TETRIS_*` environment variables.

use std::io::{self, BufWriter, Write};

use anyhow::Result;

use tetris_engine::driver::{Driver, DriverConfig};

fn main() -> Result<()> {
    let config = match DriverConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[Driver] Configuration error: {:#}", e);
            return Err(e);
        }
    };

    eprintln!(
        "[Driver] {}x{} board, seed {}, {:?} restart, {} ticks of {}ms",
        config.engine.columns,
        config.engine.rows,
        config.engine.seed,
        config.engine.restart,
        config.max_ticks,
        config.tick_ms
    );

    let mut driver = Driver::new(config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = driver.run(&mut out)?;
    out.flush()?;

    eprintln!(
        "[Driver] Finished: {} games over, best score {}",
        summary.games_finished, summary.best_score
    );
    Ok(())
}
