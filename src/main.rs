//! Terminal Blockfall runner (default binary).
//!
//! This is the driver that the core deliberately leaves out: it owns the
//! gravity clock, maps keys to actions, and renders a snapshot every frame.
//! The tick interval is re-read from the game after every tick, since line
//! clears can raise the level and shorten it.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameState, PieceSource, RandomPieces};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;
use blockfall::RunConfig;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Route logs to a file; stderr would corrupt the alternate screen.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn gravity_interval<S: PieceSource>(game: &GameState<S>) -> Duration {
    Duration::from_millis(u64::from(game.fall_interval_ms()))
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let pieces = match config.seed {
        Some(seed) => RandomPieces::seeded(seed),
        None => RandomPieces::from_entropy(),
    };
    let mut game = GameState::with_source(pieces);
    game.reset();
    log::info!("blockfall started (seed {:?})", config.seed);

    let view = GameView::new(config.cell_width);
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick = Instant::now() + gravity_interval(&game);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let was_playable = game.status().is_playable();
                        game.apply_action(action)?;
                        report_lock(&mut game);

                        // Restarting or resuming gets a full interval before the first drop.
                        if action == GameAction::Restart || !was_playable {
                            next_tick = Instant::now() + gravity_interval(&game);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if Instant::now() >= next_tick {
            if game.status().is_playable() {
                game.tick()?;
                report_lock(&mut game);
            }
            next_tick = Instant::now() + gravity_interval(&game);
        }
    }
}

fn report_lock<S: PieceSource>(game: &mut GameState<S>) {
    let Some(event) = game.take_last_event() else {
        return;
    };
    if event.lines_cleared > 0 {
        log::info!(
            "cleared {} line(s) for {} points; score {}, level {}",
            event.lines_cleared,
            event.line_clear_score,
            game.score(),
            game.level()
        );
    }
    if event.topped_out {
        log::info!("game over with score {}", game.score());
    }
}
