//! Headless runner: steps the simulation without a terminal and prints one
//! JSON record per tick.
//!
//! Usage: `ising-headless [ticks]` (default 100). The first line echoes the
//! configuration. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use tui_ising::engine::{Clock, ManualClock};
use tui_ising::{logging, AppConfig, Session};

const DEFAULT_TICKS: u64 = 100;

fn main() -> Result<()> {
    logging::init_stderr()?;

    let ticks = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("tick count must be a non-negative integer, got {arg:?}"))?,
        None => DEFAULT_TICKS,
    };

    let config = AppConfig::from_env();
    config.validate().context("invalid ISING_* configuration")?;
    let mut session = Session::new(&config)?;
    session.apply(tui_ising::types::ControlAction::ToggleRun, 0)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serde_json::to_writer(&mut out, &json!({ "config": config }))?;
    out.write_all(b"\n")?;

    // Ticks are spaced exactly one step interval apart.
    let mut clock = ManualClock::default();
    for tick in 0..ticks {
        let outcome = session.tick(clock.now_ms())?;
        serde_json::to_writer(&mut out, &session.record(tick, outcome))?;
        out.write_all(b"\n")?;
        clock.advance(config.step_ms.max(1));
    }
    out.flush()?;

    info!(
        ticks,
        magnetization = session.engine().magnetization(),
        "headless run finished"
    );
    Ok(())
}
