//! Shooting stars drifting down behind the playfield.

use arrayvec::ArrayVec;

use crate::core::SimpleRng;

const MAX_STARS: usize = 64;
/// Spawn probability per frame.
const SPAWN_CHANCE: f32 = 0.05;
const STAR_LIFE: u8 = 20;

#[derive(Debug, Clone, Copy)]
pub struct ShootingStar {
    pub x: f32,
    pub y: f32,
    dx: f32,
    dy: f32,
    pub life: u8,
}

/// Backdrop of short-lived stars streaking downward. Coordinates are in
/// canvas cells; the field owns its bounds and culls stars that leave them.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: ArrayVec<ShootingStar, MAX_STARS>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            stars: ArrayVec::new(),
            width: f32::from(width),
            height: f32::from(height),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = f32::from(width);
        self.height = f32::from(height);
    }

    /// One animation frame: maybe spawn, then advance and cull.
    pub fn update(&mut self, rng: &mut SimpleRng) {
        if !self.stars.is_full() && rng.next_f32() < SPAWN_CHANCE {
            self.stars.push(ShootingStar {
                x: rng.next_f32_range(0.0, self.width),
                y: 0.0,
                dx: rng.next_f32_range(-0.2, 0.2),
                dy: rng.next_f32_range(0.6, 1.0),
                life: STAR_LIFE,
            });
        }
        let height = self.height;
        for star in &mut self.stars {
            star.x += star.dx;
            star.y += star.dy;
            star.life -= 1;
        }
        self.stars.retain(|s| s.life > 0 && s.y < height);
    }

    pub fn stars(&self) -> &[ShootingStar] {
        &self.stars
    }

    pub fn clear(&mut self) {
        self.stars.clear();
    }
}
