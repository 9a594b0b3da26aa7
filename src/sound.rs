//! Sound intents.
//!
//! The engine never touches an audio device; it names what should be heard
//! and a sink decides how. The terminal build ships a no-op sink, tests use
//! a recording one.

/// What the game wants the player to hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    LineClear,
    BlockLand,
    Rotate,
    GameOver,
}

impl SoundCue {
    /// Stable identifier, usable as an asset key.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::LineClear => "clear",
            SoundCue::BlockLand => "land",
            SoundCue::Rotate => "rotate",
            SoundCue::GameOver => "gameover",
        }
    }
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that swallows every cue. Used when no audio backend is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSounds;

impl SoundSink for NoopSounds {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Sink that records cues in order, for asserting on playback in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordedSounds {
    pub cues: Vec<SoundCue>,
}

impl SoundSink for RecordedSounds {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_are_stable() {
        assert_eq!(SoundCue::LineClear.name(), "clear");
        assert_eq!(SoundCue::GameOver.name(), "gameover");
    }

    #[test]
    fn recorded_sink_keeps_order() {
        let mut sink = RecordedSounds::default();
        sink.play(SoundCue::Rotate);
        sink.play(SoundCue::LineClear);
        assert_eq!(sink.cues, vec![SoundCue::Rotate, SoundCue::LineClear]);
    }
}
