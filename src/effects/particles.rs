//! Particle bursts for line clears and landings.
//!
//! Each particle carries an intensity (`alpha`) and a `size` that decay
//! every frame; the renderer maps them to glyphs. The pool is fixed size
//! and spawn requests past capacity are dropped silently.

use arrayvec::ArrayVec;

use crate::core::SimpleRng;
use crate::types::PaletteColor;

const MAX_PARTICLES: usize = 256;
const PARTICLES_PER_LINE: usize = 5;
const PARTICLES_PER_LAND: usize = 3;
const SHRINK_RATE: f32 = 0.2;
const FADE_RATE: u8 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    dx: f32,
    dy: f32,
    pub size: f32,
    pub alpha: u8,
    pub life: u8,
    pub color: PaletteColor,
}

#[derive(Debug, Clone, Default)]
pub struct Particles {
    pool: ArrayVec<Particle, MAX_PARTICLES>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self, rng: &mut SimpleRng, x: f32, y: f32, color: PaletteColor) {
        if self.pool.is_full() {
            return;
        }
        let angle = rng.next_f32_range(0.0, std::f32::consts::TAU);
        let speed = rng.next_f32_range(0.3, 1.0);
        self.pool.push(Particle {
            x,
            y,
            dx: angle.cos() * speed,
            dy: angle.sin() * speed,
            size: rng.next_f32_range(5.0, 12.0),
            alpha: 255,
            life: 40 + rng.next_range(40) as u8,
            color,
        });
    }

    /// Burst spread along a cleared row.
    pub fn spawn_line_clear(&mut self, rng: &mut SimpleRng, row_y: f32, width: f32, color: PaletteColor) {
        for _ in 0..PARTICLES_PER_LINE {
            let x = rng.next_f32_range(0.0, width);
            self.spawn(rng, x, row_y, color);
        }
    }

    /// Small puff where a piece came to rest.
    pub fn spawn_block_land(&mut self, rng: &mut SimpleRng, x: f32, y: f32, color: PaletteColor) {
        for _ in 0..PARTICLES_PER_LAND {
            self.spawn(rng, x, y, color);
        }
    }

    /// One animation frame: drift, shrink, fade, cull.
    pub fn update(&mut self) {
        for p in &mut self.pool {
            p.x += p.dx;
            p.y += p.dy;
            p.size = (p.size - SHRINK_RATE).max(0.0);
            p.alpha = p.alpha.saturating_sub(FADE_RATE);
            p.life = p.life.saturating_sub(1);
        }
        self.pool.retain(|p| p.life > 0 && p.alpha > 0 && p.size > 0.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}
