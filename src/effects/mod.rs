//! Decorative backdrop simulations. Pure state machines over fixed pools;
//! the renderer decides how each element looks on screen.

pub mod particles;
pub mod starfield;

pub use particles::{Particle, Particles};
pub use starfield::{ShootingStar, Starfield};
