//! Stage progression - table-driven difficulty tiers
//!
//! The stage index is purely a function of blocks placed (not score). Each
//! stage pins a fall interval and a preview depth; higher stages fall faster
//! and show fewer previews.

use crate::types::{
    BLOCKS_PER_STAGE, MAX_STAGE, STAGE_FALL_INTERVALS_MS, STAGE_NAMES, STAGE_PREVIEW_COUNTS,
};

/// Stage index for a blocks-placed count, capped at `MAX_STAGE`.
pub fn stage_for_blocks(blocks_placed: u32) -> u8 {
    ((blocks_placed / BLOCKS_PER_STAGE).min(MAX_STAGE as u32)) as u8
}

/// Automatic fall interval for a stage, in milliseconds.
pub fn fall_interval_ms(stage: u8) -> u32 {
    STAGE_FALL_INTERVALS_MS[(stage as usize).min(STAGE_FALL_INTERVALS_MS.len() - 1)]
}

/// How many upcoming pieces are revealed at a stage.
pub fn preview_count(stage: u8) -> usize {
    STAGE_PREVIEW_COUNTS[(stage as usize).min(STAGE_PREVIEW_COUNTS.len() - 1)]
}

pub fn stage_name(stage: u8) -> &'static str {
    STAGE_NAMES[(stage as usize).min(STAGE_NAMES.len() - 1)]
}
