use std::time::Duration;

use rodio::{source::SineWave, OutputStream, OutputStreamBuilder, Sink, Source};

use super::{Audio, Sound};
use crate::error::{Error, Result};

const CUE_VOLUME: f32 = 0.15;
const STINGER_VOLUME: f32 = 0.25;
const BACKGROUND_VOLUME: f32 = 0.03;
const BACKGROUND_LOOP: Duration = Duration::from_secs(2);

/// A synthesized one-shot cue
#[derive(Clone, Copy, Debug, PartialEq)]
struct Tone {
    hz: f32,
    duration: Duration,
}

impl Tone {
    const fn new(hz: f32, millis: u64) -> Self {
        Self {
            hz,
            duration: Duration::from_millis(millis),
        }
    }
}

/// The background track loops instead of having a tone
fn tone(sound: Sound) -> Option<Tone> {
    match sound {
        Sound::Background => None,
        Sound::CarrotPull => Some(Tone::new(880.0, 70)),
        Sound::BugPull => Some(Tone::new(110.0, 450)),
        Sound::Alert => Some(Tone::new(440.0, 200)),
        Sound::Win => Some(Tone::new(659.25, 500)),
    }
}

/// Sound through the default output device
pub struct Speaker {
    stream: OutputStream,
    background: Option<Sink>,
}

impl Speaker {
    pub fn open() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| Error::audio_unavailable(err.to_string()))?;
        stream.log_on_drop(false);
        tracing::debug!("audio output opened");

        Ok(Self {
            stream,
            background: None,
        })
    }

    fn sink(&self) -> Sink {
        Sink::connect_new(self.stream.mixer())
    }

    fn start_background(&mut self) {
        let sink = self.sink();
        sink.set_volume(BACKGROUND_VOLUME);
        sink.append(
            SineWave::new(220.0)
                .mix(SineWave::new(329.63))
                .take_duration(BACKGROUND_LOOP)
                .repeat_infinite(),
        );
        if let Some(previous) = self.background.replace(sink) {
            previous.stop();
        }
    }
}

impl Audio for Speaker {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(%sound, "play");
        let Some(tone) = tone(sound) else {
            self.start_background();
            return;
        };

        let sink = self.sink();
        sink.set_volume(if sound.is_stinger() {
            STINGER_VOLUME
        } else {
            CUE_VOLUME
        });
        sink.append(SineWave::new(tone.hz).take_duration(tone.duration));
        sink.detach();
    }

    fn stop(&mut self, sound: Sound) {
        tracing::trace!(%sound, "stop");
        if sound != Sound::Background {
            return;
        }
        if let Some(sink) = self.background.take() {
            sink.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUES: [Sound; 4] = [Sound::CarrotPull, Sound::BugPull, Sound::Alert, Sound::Win];

    #[test]
    fn background_loops_instead_of_a_tone() {
        assert_eq!(tone(Sound::Background), None);
    }

    #[test]
    fn every_cue_is_audible_and_distinct() {
        let tones: Vec<Tone> = CUES.iter().filter_map(|&s| tone(s)).collect();
        assert_eq!(tones.len(), CUES.len());

        for (i, a) in tones.iter().enumerate() {
            assert!(a.hz > 20.0 && a.duration > Duration::ZERO, "{a:?}");
            for b in &tones[i + 1..] {
                assert_ne!(a.hz, b.hz);
            }
        }
    }

    #[test]
    fn carrot_cue_is_shorter_than_round_enders() {
        let carrot = tone(Sound::CarrotPull).unwrap();
        for stinger in CUES.into_iter().filter(Sound::is_stinger) {
            assert!(carrot.duration < tone(stinger).unwrap().duration);
        }
    }
}
