//! Input normalization: raw keyboard and gamepad events become
//! `GameAction`s, with movement rate-limited by the router.

pub mod map;
pub mod router;

pub use map::{map_key, should_quit};
pub use router::{InputRouter, PadEvent};
