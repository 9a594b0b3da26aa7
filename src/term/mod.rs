//! Terminal front end: framebuffer, diff renderer, and the game view that
//! turns snapshots and effects into styled cells.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
