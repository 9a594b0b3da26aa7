//! End-to-end rules tests: spawn, drop, clear, top out, restart.

use galaxy_tetris::core::{GameState, Tetromino};
use galaxy_tetris::types::{
    GameAction, GameEvent, PaletteColor, PieceKind, GRID_HEIGHT, GRID_WIDTH, POINTS_PER_LINE,
};

const COLOR: PaletteColor = PaletteColor(3);

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(seed);
    state.start();
    state
}

#[test]
fn unobstructed_hard_drop_locks_at_the_bottom() {
    let mut state = started(1);
    state.set_current(Tetromino::spawn(PieceKind::O, COLOR));
    state.take_events();

    state.apply_action(GameAction::HardDrop);

    assert_eq!(state.blocks_placed(), 1);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.score(), 0);
    // The square occupies the two bottom rows at spawn columns.
    let x = ((GRID_WIDTH - 2) / 2) as i8;
    assert_eq!(state.grid().get(x, (GRID_HEIGHT - 1) as i8), Some(Some(COLOR)));
    assert_eq!(state.grid().get(x + 1, (GRID_HEIGHT - 2) as i8), Some(Some(COLOR)));
    assert!(state
        .take_events()
        .iter()
        .any(|e| matches!(e, GameEvent::BlockLanded { .. })));
}

#[test]
fn filling_the_last_column_clears_the_bottom_row() {
    let mut state = started(1);
    for x in 0..(GRID_WIDTH - 1) as i8 {
        state.grid_mut().set(x, (GRID_HEIGHT - 1) as i8, Some(COLOR));
    }

    // Vertical I moved into the last empty column.
    let mut piece = Tetromino::spawn(PieceKind::I, COLOR);
    piece.shape = piece.shape.rotated();
    piece.y = -4;
    while piece.x < (GRID_WIDTH - 1) as i8 {
        piece.x += 1;
    }
    state.set_current(piece);
    state.take_events();

    state.apply_action(GameAction::HardDrop);

    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), POINTS_PER_LINE);
    let events = state.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::LinesCleared { count: 1, .. })));

    // The row that was full is gone; the I's remainder dropped onto the floor.
    let last = (GRID_WIDTH - 1) as i8;
    let bottom = (GRID_HEIGHT - 1) as i8;
    assert_eq!(state.grid().get(last, bottom), Some(Some(COLOR)));
    assert_eq!(state.grid().get(0, bottom), Some(None));
    // An empty row appeared at the top.
    for x in 0..GRID_WIDTH as i8 {
        assert_eq!(state.grid().get(x, 0), Some(None));
    }
}

#[test]
fn overlapping_position_is_rejected_without_grid_writes() {
    let mut state = started(1);
    state.grid_mut().set(4, 0, Some(COLOR));
    state.grid_mut().set(5, 0, Some(COLOR));
    let grid_before = state.grid().clone();

    // A piece sitting on those cells cannot be placed there.
    let mut piece = Tetromino::spawn(PieceKind::O, COLOR);
    piece.x = 4;
    piece.y = 0;
    assert!(!piece.fits(state.grid(), 0, 0));
    assert_eq!(state.grid(), &grid_before);
}

#[test]
fn locking_above_the_field_ends_the_game() {
    let mut state = started(1);
    // Two full columns reaching the ceiling.
    for y in 0..GRID_HEIGHT as i8 {
        state.grid_mut().set(4, y, Some(COLOR));
        state.grid_mut().set(5, y, Some(COLOR));
    }
    state.set_current(Tetromino::spawn(PieceKind::O, COLOR));
    state.take_events();

    state.apply_action(GameAction::HardDrop);

    assert!(state.game_over());
    assert!(state.take_events().contains(&GameEvent::GameOver));
    // The top-out lock does not count as a placed block.
    assert_eq!(state.blocks_placed(), 0);
}

#[test]
fn restart_is_the_only_command_that_works_after_game_over() {
    let mut state = started(1);
    for y in 0..GRID_HEIGHT as i8 {
        state.grid_mut().set(4, y, Some(COLOR));
        state.grid_mut().set(5, y, Some(COLOR));
    }
    state.set_current(Tetromino::spawn(PieceKind::O, COLOR));
    state.apply_action(GameAction::HardDrop);
    assert!(state.game_over());

    let frozen = state.grid().clone();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
    ] {
        assert!(!state.apply_action(action));
    }
    assert_eq!(state.grid(), &frozen);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.blocks_placed(), 0);
    assert!(state.grid().cells().iter().all(|c| c.is_none()));
    assert!(state.current().is_some());
}

#[test]
fn stage_climbs_every_five_blocks_and_caps() {
    let mut state = started(42);
    let mut last_stage = state.stage();
    for _ in 0..25 {
        state.set_current(Tetromino::spawn(PieceKind::I, COLOR));
        state.apply_action(GameAction::HardDrop);
        if state.game_over() {
            break;
        }
        let stage = state.stage();
        assert!(stage >= last_stage, "stage never goes backwards");
        last_stage = stage;
    }
    assert!(state.stage() <= 3);
    if state.blocks_placed() >= 15 {
        assert_eq!(state.stage(), 3);
    }
}

#[test]
fn fall_speed_and_previews_follow_the_stage() {
    let mut state = started(42);
    let mut last_interval = state.fall_interval_ms();
    let mut last_previews = state.snapshot().previews.len();

    while state.blocks_placed() < 15 && !state.game_over() {
        state.set_current(Tetromino::spawn(PieceKind::I, COLOR));
        state.apply_action(GameAction::HardDrop);
        let interval = state.fall_interval_ms();
        let previews = state.snapshot().previews.len();
        assert!(interval <= last_interval);
        assert!(previews <= last_previews);
        last_interval = interval;
        last_previews = previews;
    }

    if !state.game_over() {
        assert_eq!(state.fall_interval_ms(), 180);
        assert_eq!(state.snapshot().previews.len(), 0);
    }
}

#[test]
fn same_seed_same_piece_sequence() {
    let mut a = started(777);
    let mut b = started(777);
    for _ in 0..10 {
        assert_eq!(a.current(), b.current());
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
    }
    assert_eq!(a.grid().cells(), b.grid().cells());
    assert_eq!(a.score(), b.score());
}

#[test]
fn soft_drop_on_the_floor_locks_immediately() {
    let mut state = started(9);
    let mut piece = Tetromino::spawn(PieceKind::T, COLOR);
    piece.y = piece.drop_y(state.grid());
    state.set_current(piece);

    state.apply_action(GameAction::SoftDrop);
    assert_eq!(state.blocks_placed(), 1);
}
