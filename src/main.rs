//! Terminal runner for Galaxy Tetris.
//!
//! Crossterm input, a framebuffer renderer, and a fixed-cadence frame loop.
//! The engine is driven with real elapsed time so fall speed stays correct
//! even when frames stutter.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use galaxy_tetris::core::{stage_name, GameSnapshot, GameState, SimpleRng};
use galaxy_tetris::effects::{Particles, Starfield};
use galaxy_tetris::input::{map_key, should_quit, InputRouter};
use galaxy_tetris::sound::{NoopSounds, SoundCue, SoundSink};
use galaxy_tetris::term::{GameView, TerminalRenderer, Viewport};
use galaxy_tetris::types::{GameEvent, PaletteColor, GRID_WIDTH, PALETTE, STAGE_TRANSITION_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = GameState::new(wall_clock_seed());
    game.start();

    let view = GameView::default();
    let mut router = InputRouter::new();
    let mut sounds = NoopSounds;
    let mut snapshot = GameSnapshot::default();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut stars = Starfield::new(w, h);
    let mut fx = Particles::new();
    let mut fx_rng = SimpleRng::new(wall_clock_seed().wrapping_add(1));

    let started = Instant::now();
    let now_ms = |started: Instant| started.elapsed().as_millis() as u64;

    let mut last_frame = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut banner: Option<(String, u32)> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        stars.resize(w, h);

        game.snapshot_into(&mut snapshot);
        let banner_text = banner.as_ref().map(|(text, _)| text.as_str());
        let mut fb = view.render(&snapshot, &stars, &fx, banner_text, Viewport::new(w, h));
        term.present(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = tick_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        let was_over = game.game_over();
                        if let Some(action) = router.route_key(action, now_ms(started)) {
                            game.apply_action(action);
                        }
                        if was_over && !game.game_over() {
                            router.reset();
                            fx.clear();
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Advance the simulation once per frame.
        if last_frame.elapsed() >= tick_duration {
            let elapsed = last_frame.elapsed().as_millis() as u32;
            last_frame = Instant::now();

            for action in router.poll_held(now_ms(started)) {
                game.apply_action(action);
            }
            game.tick(elapsed);

            for event in game.take_events() {
                dispatch_event(event, &mut sounds, &mut fx, &mut fx_rng, &mut banner);
            }

            stars.update(&mut fx_rng);
            fx.update();
            if let Some((_, remaining)) = &mut banner {
                *remaining = remaining.saturating_sub(elapsed);
            }
            if matches!(banner, Some((_, 0))) {
                banner = None;
            }
        }
    }
}

/// Turn an engine event into sound and visual feedback.
fn dispatch_event(
    event: GameEvent,
    sounds: &mut impl SoundSink,
    fx: &mut Particles,
    rng: &mut SimpleRng,
    banner: &mut Option<(String, u32)>,
) {
    match event {
        GameEvent::LinesCleared { count, rows } => {
            sounds.play(SoundCue::LineClear);
            for &row in rows.iter().take(count as usize) {
                let color = PaletteColor(rng.next_range(PALETTE.len() as u32) as u8);
                fx.spawn_line_clear(rng, f32::from(row), f32::from(GRID_WIDTH), color);
            }
        }
        GameEvent::BlockLanded { x, y, color } => {
            sounds.play(SoundCue::BlockLand);
            fx.spawn_block_land(rng, f32::from(x) + 1.0, f32::from(y) + 1.0, color);
        }
        GameEvent::Rotated => sounds.play(SoundCue::Rotate),
        GameEvent::StageAdvanced { stage } => {
            *banner = Some((
                format!("STAGE {}: {}", stage + 1, stage_name(stage)),
                STAGE_TRANSITION_MS,
            ));
        }
        GameEvent::GameOver => sounds.play(SoundCue::GameOver),
    }
}
