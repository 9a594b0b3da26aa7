//! Piece generation - seeded RNG and the lookahead queue
//!
//! Shape and color are independent uniform draws (no bag randomizer). The
//! queue always holds `PREVIEW_QUEUE_LEN` upcoming pieces: popping the front
//! immediately appends a fresh draw, so lookahead depth never changes.
//!
//! The RNG is a simple LCG (Numerical Recipes constants) so a seed fully
//! determines the piece sequence.

use arrayvec::ArrayVec;

use crate::core::piece::Tetromino;
use crate::types::{PaletteColor, PieceKind, PALETTE, PREVIEW_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [lo, hi)
    pub fn next_f32_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform-draw piece generator with a constant-length lookahead queue.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    queue: ArrayVec<Tetromino, PREVIEW_QUEUE_LEN>,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        let mut gen = Self {
            rng: SimpleRng::new(seed),
            queue: ArrayVec::new(),
        };
        while !gen.queue.is_full() {
            let piece = gen.draw();
            gen.queue.push(piece);
        }
        gen
    }

    fn draw(&mut self) -> Tetromino {
        let kind = PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize];
        let color = PaletteColor(self.rng.next_range(PALETTE.len() as u32) as u8);
        Tetromino::spawn(kind, color)
    }

    /// Take the front of the queue and top it back up to constant length.
    pub fn pop(&mut self) -> Tetromino {
        let next = self.queue.remove(0);
        let fresh = self.draw();
        self.queue.push(fresh);
        next
    }

    /// Upcoming pieces, front first, truncated to `count`.
    pub fn peek(&self, count: usize) -> &[Tetromino] {
        &self.queue[..count.min(self.queue.len())]
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Current RNG state, usable as a seed for a follow-up game.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
