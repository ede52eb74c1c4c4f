use std::io::{self, Write};

#[cfg(feature = "speaker")]
mod speaker;

#[cfg(feature = "speaker")]
pub use speaker::Speaker;

/// Named sound cues the game can trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Sound {
    Background,
    CarrotPull,
    BugPull,
    Alert,
    Win,
}

impl Sound {
    /// One-shot cues that mark the end of a round
    pub fn is_stinger(&self) -> bool {
        matches!(self, Sound::BugPull | Sound::Alert | Sound::Win)
    }
}

/// Fire-and-forget audio playback
pub trait Audio {
    fn play(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn play(&mut self, sound: Sound) {
        (**self).play(sound)
    }

    fn stop(&mut self, sound: Sound) {
        (**self).stop(sound)
    }
}

/// Terminal fallback when no audio device is available: every cue rings
/// the bell. There is no background track.
pub struct Bell<W: Write> {
    out: W,
}

impl Bell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self) {
        let res = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(err) = res {
            tracing::warn!(%err, "failed to ring terminal bell");
        }
    }
}

impl<W: Write> Audio for Bell<W> {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(%sound, "play");
        if sound != Sound::Background {
            self.ring();
        }
    }

    fn stop(&mut self, sound: Sound) {
        tracing::trace!(%sound, "stop");
    }
}

/// Silent audio for `--mute`
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl Audio for Muted {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(%sound, "play (muted)");
    }

    fn stop(&mut self, sound: Sound) {
        tracing::trace!(%sound, "stop (muted)");
    }
}
