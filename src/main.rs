//! Terminal Ising viewer (default binary).
//!
//! Renders the lattice with half blocks through the framebuffer renderer and
//! steps the simulation from the frame loop.

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;

use tui_ising::engine::{Clock, FrameClock};
use tui_ising::input::handle_key_event;
use tui_ising::term::{FrameBuffer, RenderThrottle, ScreenView, TerminalRenderer, Viewport};
use tui_ising::types::{FRAME_MS, STATIC_REDRAW_MS};
use tui_ising::{logging, AppConfig, Flow, Session};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        logging::init_file(path)?;
    }
    config.validate().context("invalid ISING_* configuration")?;
    let mut session = Session::new(&config)?;
    info!(?config, "starting interactive session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let clock = FrameClock::new(FRAME_MS);
    let screen = ScreenView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    loop {
        let frame_start = clock.now_ms();
        session.tick(frame_start)?;

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let is_static = !session.is_running();
        if throttle.should_flush(frame_start, session.frame_fingerprint(), is_static) {
            screen.compose_into(
                session.raster(),
                &session.status(),
                Viewport::new(w, h),
                &mut fb,
            );
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next frame.
        if !event::poll(clock.until_next_frame(frame_start))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                if session.apply(action, clock.now_ms())? == Flow::Quit {
                    info!(step = session.status().step, "quit");
                    return Ok(());
                }
                throttle.invalidate();
            }
            Event::Resize(_, _) => {
                term.invalidate();
                throttle.invalidate();
            }
            _ => {}
        }
    }
}
