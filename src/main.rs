//! Terminal match-3 runner (default binary).
//!
//! Crossterm for input, the framebuffer renderer for output. Logs go to a file
//! so they never interleave with the game screen.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tui_match3::core::{find_valid_swap, GameConfig, GameSnapshot, GameState, SelectOutcome};
use tui_match3::input::{handle_key_event, should_quit, Cursor, KeyCommand};
use tui_match3::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use tui_match3::types::{CASCADE_STEP_MS, FRAME_MS};

const DEFAULT_LOG_PATH: &str = "tui-match3.log";

fn main() -> Result<()> {
    let mut config = GameConfig::from_env();
    // The terminal front end animates cascades unless told otherwise.
    if std::env::var_os("MATCH3_STAGE_CASCADES").is_none() {
        config.stage_cascades = true;
    }
    let log_path = std::env::var("MATCH3_LOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
    init_logging(log_path.trim())?;
    info!(seed = ?config.seed, stage_cascades = config.stage_cascades, "starting tui-match3");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "exited with error");
    }
    result
}

fn init_logging(path: &str) -> Result<()> {
    let log_file = File::create(path).with_context(|| format!("create log file {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Playback position within a staged cascade
#[derive(Debug, Clone, Copy, Default)]
struct Playback {
    /// 0 shows the swapped board, `k` the board after pass `k`
    shown: usize,
    elapsed_ms: u32,
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut game = GameState::new(config);
    let view = GameView::default();
    let mut cursor = Cursor::new();
    let mut hud = Hud::default();
    let mut playback: Option<Playback> = None;

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last = Instant::now();

    loop {
        // Clock.
        let now = Instant::now();
        let dt = now.duration_since(last).as_millis().min(u128::from(u32::MAX)) as u32;
        last = now;
        if game.tick(dt) {
            debug!(remaining = game.remaining(), "tick");
        }

        // Cascade staging.
        playback = advance_playback(&mut game, playback, dt);

        // Render.
        game.snapshot_into(&mut snap);
        hud.cursor = snap.accepts_input().then(|| cursor.position());
        hud.cascade = None;
        if let (Some(pb), Some(staged)) = (playback, game.staged_cascade()) {
            let board = pb
                .shown
                .checked_sub(1)
                .and_then(|k| staged.passes.get(k))
                .map_or(&staged.start, |pass| &pass.board);
            if let Some(grid) = snap.board.as_mut() {
                board.write_grid(grid);
            }
            hud.cascade = Some((pb.shown, staged.pass_count()));
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input.
        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!(score = game.score(), "quit");
                    return Ok(());
                }
                let Some(command) = handle_key_event(key) else {
                    continue;
                };
                match command {
                    KeyCommand::Move(direction) => cursor.step(direction),
                    KeyCommand::Confirm => {
                        hud.hint = None;
                        let outcome = game.select(cursor.position());
                        if let SelectOutcome::Swapped(report) = &outcome {
                            hud.reshuffled = report.regenerated;
                            info!(
                                score_delta = report.score_delta,
                                passes = report.passes,
                                cleared = report.cleared,
                                regenerated = report.regenerated,
                                score = game.score(),
                                "swap"
                            );
                        }
                    }
                    KeyCommand::Hint => {
                        hud.hint = game
                            .board()
                            .filter(|_| snap.accepts_input())
                            .and_then(find_valid_swap);
                        if let Some((a, _)) = hud.hint {
                            cursor.jump(a);
                        }
                    }
                    KeyCommand::Action(action) => {
                        if game.apply_action(action) {
                            hud.hint = None;
                            hud.reshuffled = false;
                            playback = None;
                        }
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

/// Step through the staged cascade, releasing the lock once all passes showed
fn advance_playback(game: &mut GameState, playback: Option<Playback>, dt: u32) -> Option<Playback> {
    let total = game.staged_cascade()?.pass_count();
    let mut pb = playback.unwrap_or_default();

    pb.elapsed_ms = pb.elapsed_ms.saturating_add(dt);
    while pb.elapsed_ms >= CASCADE_STEP_MS {
        pb.elapsed_ms -= CASCADE_STEP_MS;
        pb.shown += 1;
    }
    if pb.shown > total {
        game.finish_staging();
        return None;
    }
    Some(pb)
}
