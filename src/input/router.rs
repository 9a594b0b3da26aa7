//! Movement rate limiting and gamepad routing.
//!
//! Keyboards auto-repeat at whatever cadence the terminal picks and
//! gamepad axes report continuously, so raw events would slide pieces
//! far too fast. The router owns one cooldown timer per movement
//! direction and lets a movement through at most once per
//! `MOVE_COOLDOWN_MS`. Discrete actions (rotate, hard drop, restart)
//! are never throttled. Time is supplied by the caller in milliseconds,
//! which keeps the router fully deterministic under test.

use arrayvec::ArrayVec;

use crate::types::{GameAction, AXIS_THRESHOLD, MOVE_COOLDOWN_MS};

/// Raw gamepad event, already decoded from whatever backend produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    ButtonDown(u8),
    /// Axis 0 is horizontal, axis 1 vertical. Values are in -1.0..=1.0;
    /// positive vertical points down.
    AxisMotion { axis: u8, value: f32 },
    /// Hat x/y are -1, 0, or 1; y = -1 points down.
    HatMotion { x: i8, y: i8 },
}

const BUTTONS_ROTATE: [u8; 2] = [0, 2];
const BUTTONS_HARD_DROP: [u8; 2] = [1, 3];
const BUTTON_RESTART: u8 = 7;

const AXIS_HORIZONTAL: u8 = 0;
const AXIS_VERTICAL: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
    Down = 2,
}

impl Dir {
    fn action(self) -> GameAction {
        match self {
            Dir::Left => GameAction::MoveLeft,
            Dir::Right => GameAction::MoveRight,
            Dir::Down => GameAction::SoftDrop,
        }
    }
}

/// Per-direction movement throttle plus held-direction state for gamepads.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    /// Last fire time per direction, indexed by `Dir`.
    last_fire: [Option<u64>; 3],
    held_x: i8,
    held_down: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget held directions and cooldowns, e.g. across a restart.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn try_fire(&mut self, dir: Dir, now_ms: u64) -> bool {
        let slot = &mut self.last_fire[dir as usize];
        let ready = slot.map_or(true, |last| now_ms.saturating_sub(last) >= MOVE_COOLDOWN_MS);
        if ready {
            *slot = Some(now_ms);
        }
        ready
    }

    /// Fire unconditionally and stamp the cooldown. Used on fresh presses
    /// so the first step never feels delayed.
    fn fire_now(&mut self, dir: Dir, now_ms: u64) -> GameAction {
        self.last_fire[dir as usize] = Some(now_ms);
        dir.action()
    }

    /// Gate an already-mapped keyboard action. Movement passes at most once
    /// per cooldown window; everything else passes through untouched.
    pub fn route_key(&mut self, action: GameAction, now_ms: u64) -> Option<GameAction> {
        let dir = match action {
            GameAction::MoveLeft => Dir::Left,
            GameAction::MoveRight => Dir::Right,
            GameAction::SoftDrop => Dir::Down,
            other => return Some(other),
        };
        self.try_fire(dir, now_ms).then(|| dir.action())
    }

    /// Translate a gamepad event. Axis and hat edges fire their movement
    /// immediately; holding is picked up by [`poll_held`](Self::poll_held).
    pub fn route_pad(&mut self, event: PadEvent, now_ms: u64) -> Option<GameAction> {
        match event {
            PadEvent::ButtonDown(button) => {
                if BUTTONS_ROTATE.contains(&button) {
                    Some(GameAction::Rotate)
                } else if BUTTONS_HARD_DROP.contains(&button) {
                    Some(GameAction::HardDrop)
                } else if button == BUTTON_RESTART {
                    Some(GameAction::Restart)
                } else {
                    None
                }
            }
            PadEvent::AxisMotion { axis, value } => match axis {
                AXIS_HORIZONTAL => {
                    let held = if value <= -AXIS_THRESHOLD {
                        -1
                    } else if value >= AXIS_THRESHOLD {
                        1
                    } else {
                        0
                    };
                    self.set_held_x(held, now_ms)
                }
                AXIS_VERTICAL => {
                    let held = value >= AXIS_THRESHOLD;
                    self.set_held_down(held, now_ms)
                }
                _ => None,
            },
            PadEvent::HatMotion { x, y } => {
                let horizontal = self.set_held_x(x.signum(), now_ms);
                let vertical = self.set_held_down(y < 0, now_ms);
                horizontal.or(vertical)
            }
        }
    }

    fn set_held_x(&mut self, held: i8, now_ms: u64) -> Option<GameAction> {
        let edge = held != 0 && held != self.held_x;
        self.held_x = held;
        if !edge {
            return None;
        }
        let dir = if held < 0 { Dir::Left } else { Dir::Right };
        Some(self.fire_now(dir, now_ms))
    }

    fn set_held_down(&mut self, held: bool, now_ms: u64) -> Option<GameAction> {
        let edge = held && !self.held_down;
        self.held_down = held;
        edge.then(|| self.fire_now(Dir::Down, now_ms))
    }

    /// Repeat movements for directions still held on the pad. Call once per
    /// frame; each held direction fires again when its cooldown elapses.
    pub fn poll_held(&mut self, now_ms: u64) -> ArrayVec<GameAction, 2> {
        let mut out = ArrayVec::new();
        if self.held_x != 0 {
            let dir = if self.held_x < 0 { Dir::Left } else { Dir::Right };
            if self.try_fire(dir, now_ms) {
                out.push(dir.action());
            }
        }
        if self.held_down && self.try_fire(Dir::Down, now_ms) {
            out.push(GameAction::SoftDrop);
        }
        out
    }
}
