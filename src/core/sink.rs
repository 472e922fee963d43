//! Output half of the playback controller.
//!
//! `MediaSink` is the seam between transport state and actual output: the
//! rodio sink produces sound, the silent sink only lets the transport clock
//! run (tests, machines without an audio device). The controller owns
//! exactly one sink for its lifetime.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rodio::Sink;

use crate::core::audio_out;

/// Fetched and decodable media, ready to be armed on a sink.
#[derive(Clone)]
pub struct LoadedMedia {
    pub title: String,
    pub url: String,
    pub bytes: Arc<[u8]>,
    /// Seconds; 0.0 when the container does not report a duration.
    pub duration: f32,
}

impl fmt::Debug for LoadedMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedMedia")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("bytes", &self.bytes.len())
            .field("duration", &self.duration)
            .finish()
    }
}

/// Transport-facing contract of an owned output.
pub trait MediaSink {
    /// (Re)start output of `media` at `from` seconds. A paused sink
    /// resumes; a fresh or drained sink is armed with a new source.
    fn start(&mut self, media: &LoadedMedia, from: f32, volume: f32, rate: f32)
        -> Result<(), String>;

    /// Suspend output, keeping the armed source.
    fn pause(&mut self);

    /// Move the armed source to `position` seconds. Best effort; the
    /// transport state is the source of truth for the UI either way.
    fn seek(&mut self, position: f32);

    fn set_volume(&mut self, volume: f32);

    fn set_rate(&mut self, rate: f32);

    /// Drop the armed source, if any.
    fn stop(&mut self);

    /// True when an armed source has played to its end.
    fn drained(&self) -> bool;
}

/// Real audio output through the process-wide rodio mixer.
#[derive(Default)]
pub struct RodioSink {
    sink: Option<Sink>,
}

impl RodioSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaSink for RodioSink {
    fn start(&mut self, media: &LoadedMedia, from: f32, volume: f32, rate: f32)
        -> Result<(), String>
    {
        // Paused but not drained: resume in place
        if let Some(sink) = &self.sink {
            if !sink.empty() {
                sink.set_volume(volume);
                sink.set_speed(rate);
                sink.play();
                return Ok(());
            }
        }

        // Fresh or drained: arm a new decoder
        audio_out::with_mixer(|mixer| {
            let mixer = mixer.ok_or_else(|| "no audio output device".to_string())?;
            let cursor = Cursor::new(Arc::clone(&media.bytes));
            let decoder = rodio::Decoder::new(cursor)
                .map_err(|e| format!("cannot decode {}: {}", media.title, e))?;

            let sink = Sink::connect_new(mixer);
            sink.append(decoder);
            if from > 0.0 {
                if let Err(e) = sink.try_seek(Duration::from_secs_f32(from)) {
                    debug!("Seek to {:.2}s not supported: {}", from, e);
                }
            }
            sink.set_volume(volume);
            sink.set_speed(rate);
            sink.play();

            self.sink = Some(sink);
            Ok(())
        })
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn seek(&mut self, position: f32) {
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.try_seek(Duration::from_secs_f32(position.max(0.0))) {
                debug!("Seek to {:.2}s not supported: {}", position, e);
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn set_rate(&mut self, rate: f32) {
        if let Some(sink) = &self.sink {
            sink.set_speed(rate);
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn drained(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}

/// No-op sink: accepts every transport command, produces no sound.
///
/// Completion is detected by the controller clock alone.
#[derive(Debug, Default)]
pub struct SilentSink {
    armed: bool,
}

impl SilentSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaSink for SilentSink {
    fn start(&mut self, _media: &LoadedMedia, _from: f32, _volume: f32, _rate: f32)
        -> Result<(), String>
    {
        self.armed = true;
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: f32) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn set_rate(&mut self, _rate: f32) {}

    fn stop(&mut self) {
        self.armed = false;
    }

    fn drained(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) fn test_media(duration: f32) -> LoadedMedia {
    LoadedMedia {
        title: "test".into(),
        url: "http://localhost/audio/test.mp3".into(),
        bytes: Arc::from(&b"not-real-audio"[..]),
        duration,
    }
}
