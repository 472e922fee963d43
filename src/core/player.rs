//! Media transport with a unified state snapshot.
//!
//! **Architecture**: the controller owns exactly one [`MediaSink`] for its
//! lifetime and projects everything observable about it into one
//! [`PlaybackState`] snapshot. Transport calls mutate the snapshot
//! synchronously; loader completion and natural end-of-media are merged
//! into the same snapshot from `update()`, once per UI frame.
//!
//! # Timing Model
//!
//! Wall-clock based: `update()` advances `current_time` by the elapsed time
//! scaled by the playback rate while playing. The sink's own position is
//! not polled; the snapshot is the single source of truth for the UI.
//!
//! # Volume vs. mute
//!
//! Stored independently. Muting never overwrites the stored volume; the
//! sink always receives `effective_volume()` = 0 while muted, the stored
//! volume otherwise. `set_volume(0.0)` reads back as muted.
//!
//! # Failure semantics
//!
//! Start refusals and load failures land in `state.error` and a
//! [`PlayerEvent::Error`]; nothing is thrown past this boundary. There is
//! no retry - the caller decides whether to issue a new `load()`.

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};
use rodio::Source;
use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::core::sink::{LoadedMedia, MediaSink, RodioSink};

/// Read-only status projection of the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Seconds; 0.0 while unloaded or when the container reports none.
    pub duration: f32,
    /// Seconds, in `[0, duration]` whenever the duration is known.
    pub current_time: f32,
    /// Stored volume in `[0, 1]`; survives muting.
    pub volume: f32,
    pub muted: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Playback rate, > 0.
    pub rate: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            volume: 1.0,
            muted: false,
            is_loading: false,
            error: None,
            rate: 1.0,
        }
    }
}

/// Lifecycle notifications, drained once per frame by the app shell.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    Loaded { title: String, duration: f32 },
    Started,
    Paused,
    /// Natural completion; fired exactly once per playback-to-completion.
    Ended,
    Error(String),
}

/// What to load and whether to start as soon as it lands.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub title: String,
    pub url: String,
    pub autoplay: bool,
}

enum LoaderMsg {
    Loaded(LoadedMedia),
    Failed(String),
}

/// Unified transport over one owned media handle.
pub struct PlaybackController {
    state: PlaybackState,
    sink: Box<dyn MediaSink>,
    media: Option<LoadedMedia>,
    /// In-flight load: (title, result channel, autoplay). Replaced wholesale
    /// by a newer `load()`; the superseded loader's send just fails.
    pending: Option<(String, Receiver<LoaderMsg>, bool)>,
    events: Vec<PlayerEvent>,
    last_tick: Option<Instant>,
}

impl PlaybackController {
    /// Controller over the process-wide audio output.
    pub fn new() -> Self {
        Self::with_sink(Box::new(RodioSink::new()))
    }

    /// Controller over an explicit sink (silent in tests and headless runs).
    pub fn with_sink(sink: Box<dyn MediaSink>) -> Self {
        Self {
            state: PlaybackState::default(),
            sink,
            media: None,
            pending: None,
            events: Vec::new(),
            last_tick: None,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Title of the loaded or loading media.
    pub fn title(&self) -> Option<&str> {
        self.media
            .as_ref()
            .map(|m| m.title.as_str())
            .or_else(|| self.pending.as_ref().map(|(t, _, _)| t.as_str()))
    }

    /// True once a `load()` has completed successfully.
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    /// Effective output volume: 0 while muted, the stored volume otherwise.
    pub fn effective_volume(&self) -> f32 {
        if self.state.muted { 0.0 } else { self.state.volume }
    }

    /// Drain accumulated lifecycle events.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the current media. Stops playback, resets timing, keeps
    /// volume/mute/rate, and fetches + decodes on a named worker thread.
    pub fn load(&mut self, request: LoadRequest) {
        info!("Loading {} ({})", request.title, request.url);
        self.sink.stop();
        self.media = None;
        self.state.is_playing = false;
        self.state.is_loading = true;
        self.state.error = None;
        self.state.duration = 0.0;
        self.state.current_time = 0.0;
        self.last_tick = None;

        let (tx, rx) = crossbeam_channel::bounded(1);
        let LoadRequest { title, url, autoplay } = request;
        self.pending = Some((title.clone(), rx, autoplay));

        let spawned = thread::Builder::new()
            .name("phonica-loader".into())
            .spawn(move || {
                let msg = match fetch_media(&title, &url) {
                    Ok(media) => LoaderMsg::Loaded(media),
                    Err(e) => LoaderMsg::Failed(e),
                };
                // Receiver may be gone if a newer load superseded this one
                let _ = tx.send(msg);
            });

        if let Err(e) = spawned {
            self.pending = None;
            self.state.is_loading = false;
            self.fail(format!("cannot spawn loader thread: {}", e));
        }
    }

    /// Per-frame pump: merge loader results, advance the clock, detect
    /// natural completion.
    pub fn update(&mut self) {
        self.drain_loader();

        if !self.state.is_playing {
            self.last_tick = None;
            return;
        }

        let now = Instant::now();
        let dt = self
            .last_tick
            .map(|t| now.duration_since(t).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.tick(dt);
    }

    /// Advance the transport clock by `dt` seconds of wall time.
    fn tick(&mut self, dt: f32) {
        if !self.state.is_playing {
            return;
        }

        let advanced = self.state.current_time + dt * self.state.rate;
        self.state.current_time = if self.state.duration > 0.0 {
            advanced.min(self.state.duration)
        } else {
            // Unknown duration: the clock free-runs until the sink drains
            advanced
        };

        let clock_done =
            self.state.duration > 0.0 && self.state.current_time >= self.state.duration;
        if clock_done || self.sink.drained() {
            if self.state.duration > 0.0 {
                self.state.current_time = self.state.duration;
            }
            self.state.is_playing = false;
            self.last_tick = None;
            self.sink.stop();
            debug!("Playback completed");
            self.events.push(PlayerEvent::Ended);
        }
    }

    /// Request playback start. Refusals (still loading, nothing loaded,
    /// sink rejects the source) land in `state.error`; never panics.
    pub fn play(&mut self) {
        if self.state.is_playing {
            return;
        }
        if self.state.is_loading {
            self.fail("media is still loading");
            return;
        }
        let Some(media) = self.media.clone() else {
            self.fail("no media loaded");
            return;
        };

        // Replaying from the end starts over, like a fresh play on an
        // ended element
        if media.duration > 0.0 && self.state.current_time >= media.duration {
            self.state.current_time = 0.0;
        }

        let from = self.state.current_time;
        let volume = self.effective_volume();
        let rate = self.state.rate;
        match self.sink.start(&media, from, volume, rate) {
            Ok(()) => {
                self.state.error = None;
                self.state.is_playing = true;
                self.last_tick = Some(Instant::now());
                info!("Playing {} from {:.2}s", media.title, from);
                self.events.push(PlayerEvent::Started);
            }
            Err(e) => self.fail(e),
        }
    }

    /// Suspend playback. No-op when already paused.
    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.sink.pause();
        self.state.is_playing = false;
        self.last_tick = None;
        self.events.push(PlayerEvent::Paused);
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the playhead. Clamped into `[0, duration]`.
    pub fn seek(&mut self, time: f32) {
        if !time.is_finite() {
            warn!("Ignoring non-finite seek");
            return;
        }
        let clamped = time.clamp(0.0, self.state.duration.max(0.0));
        self.state.current_time = clamped;
        self.sink.seek(clamped);
    }

    /// Set the stored volume, clamped into `[0, 1]`. Volume zero reads
    /// back as muted; any audible volume unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            warn!("Ignoring non-finite volume");
            return;
        }
        let v = volume.clamp(0.0, 1.0);
        self.state.volume = v;
        self.state.muted = v == 0.0;
        let effective = self.effective_volume();
        self.sink.set_volume(effective);
    }

    /// Flip mute without touching the stored volume. Unmuting with no
    /// recorded volume restores full volume.
    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        if !self.state.muted && self.state.volume == 0.0 {
            self.state.volume = 1.0;
        }
        let effective = self.effective_volume();
        self.sink.set_volume(effective);
    }

    /// Set the playback rate. Must be positive; there is no upper clamp.
    pub fn set_rate(&mut self, rate: f32) {
        if !(rate.is_finite() && rate > 0.0) {
            warn!("Ignoring non-positive playback rate {}", rate);
            return;
        }
        self.state.rate = rate;
        self.sink.set_rate(rate);
    }

    /// Seek to the start and make sure playback is running.
    pub fn restart(&mut self) {
        self.seek(0.0);
        if !self.state.is_playing {
            self.play();
        }
    }

    fn drain_loader(&mut self) {
        let Some((title, rx, autoplay)) = self.pending.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoaderMsg::Loaded(media)) => {
                info!("Loaded {} ({:.2}s)", media.title, media.duration);
                self.state.is_loading = false;
                self.state.duration = media.duration.max(0.0);
                self.events.push(PlayerEvent::Loaded {
                    title: media.title.clone(),
                    duration: media.duration,
                });
                self.media = Some(media);
                if autoplay {
                    self.play();
                }
            }
            Ok(LoaderMsg::Failed(e)) => {
                warn!("Load of {} failed: {}", title, e);
                self.state.is_loading = false;
                self.state.error = Some(e.clone());
                self.events.push(PlayerEvent::Error(e));
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some((title, rx, autoplay));
            }
            Err(TryRecvError::Disconnected) => {
                self.state.is_loading = false;
                self.fail(format!("loader for {} died before reporting", title));
            }
        }
    }

    fn fail(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("Playback error: {}", msg);
        self.state.error = Some(msg.clone());
        self.events.push(PlayerEvent::Error(msg));
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch an asset over HTTP and decode enough of it to learn the duration.
fn fetch_media(title: &str, url: &str) -> Result<LoadedMedia, String> {
    let resp = ureq::get(url)
        .call()
        .map_err(|e| format!("fetch {}: {}", url, e))?;

    let mut bytes = Vec::new();
    let mut body = resp.into_body();
    body.as_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| format!("read {}: {}", url, e))?;

    if bytes.is_empty() {
        return Err(format!("{} has no content", url));
    }

    let bytes: Arc<[u8]> = Arc::from(bytes);
    let cursor = std::io::Cursor::new(Arc::clone(&bytes));
    let decoder =
        rodio::Decoder::new(cursor).map_err(|e| format!("cannot decode {}: {}", title, e))?;
    let duration = decoder
        .total_duration()
        .map(|d| d.as_secs_f32())
        .unwrap_or(0.0);

    Ok(LoadedMedia {
        title: title.to_string(),
        url: url.to_string(),
        bytes,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::{test_media, SilentSink};

    fn silent_controller() -> PlaybackController {
        PlaybackController::with_sink(Box::new(SilentSink::new()))
    }

    /// Controller with media injected directly, skipping the HTTP loader.
    fn loaded_controller(duration: f32) -> PlaybackController {
        let mut c = silent_controller();
        let media = test_media(duration);
        c.state.duration = media.duration;
        c.media = Some(media);
        c
    }

    #[test]
    fn test_play_without_media_fails_into_error() {
        let mut c = silent_controller();
        c.play();

        assert!(!c.state().is_playing);
        assert!(c.state().error.is_some());
        assert!(matches!(c.take_events().as_slice(), [PlayerEvent::Error(_)]));
    }

    #[test]
    fn test_play_while_loading_fails_into_error() {
        let mut c = silent_controller();
        c.state.is_loading = true;
        c.play();

        assert!(!c.state().is_playing);
        assert!(c.state().error.is_some());
    }

    #[test]
    fn test_play_emits_started_and_clears_error() {
        let mut c = loaded_controller(10.0);
        c.state.error = Some("stale".into());
        c.play();

        assert!(c.state().is_playing);
        assert_eq!(c.state().error, None);
        assert!(matches!(c.take_events().as_slice(), [PlayerEvent::Started]));
    }

    #[test]
    fn test_pause_is_noop_when_paused() {
        let mut c = loaded_controller(10.0);
        c.pause();
        assert!(c.take_events().is_empty());

        c.play();
        c.pause();
        let events = c.take_events();
        assert_eq!(events, vec![PlayerEvent::Started, PlayerEvent::Paused]);
    }

    #[test]
    fn test_muted_tracks_zero_volume() {
        let mut c = silent_controller();

        for v in [0.0, 0.25, 0.5, 1.0, 0.0] {
            c.set_volume(v);
            assert_eq!(c.state().muted, v == 0.0, "volume {}", v);
            assert_eq!(c.state().volume, v);
        }
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut c = silent_controller();
        c.set_volume(3.0);
        assert_eq!(c.state().volume, 1.0);
        c.set_volume(-1.0);
        assert_eq!(c.state().volume, 0.0);
        assert!(c.state().muted);
    }

    #[test]
    fn test_toggle_mute_twice_restores_state() {
        let mut c = silent_controller();
        c.set_volume(0.7);

        let before = c.state().clone();
        c.toggle_mute();
        assert!(c.state().muted);
        // Stored volume untouched while muted
        assert_eq!(c.state().volume, 0.7);
        assert_eq!(c.effective_volume(), 0.0);

        c.toggle_mute();
        assert_eq!(c.state(), &before);
        assert_eq!(c.effective_volume(), 0.7);
    }

    #[test]
    fn test_unmute_with_no_recorded_volume_restores_full() {
        let mut c = silent_controller();
        c.set_volume(0.0);
        assert!(c.state().muted);

        c.toggle_mute();
        assert!(!c.state().muted);
        assert_eq!(c.state().volume, 1.0);
    }

    #[test]
    fn test_seek_clamps_into_duration() {
        let mut c = loaded_controller(8.0);

        c.seek(-3.0);
        assert_eq!(c.state().current_time, 0.0);

        c.seek(100.0);
        assert_eq!(c.state().current_time, 8.0);

        c.seek(4.5);
        assert_eq!(c.state().current_time, 4.5);
    }

    #[test]
    fn test_seek_with_no_media_stays_at_zero() {
        let mut c = silent_controller();
        c.seek(42.0);
        assert_eq!(c.state().current_time, 0.0);
    }

    #[test]
    fn test_rate_rejects_non_positive() {
        let mut c = silent_controller();
        c.set_rate(1.5);
        assert_eq!(c.state().rate, 1.5);

        c.set_rate(0.0);
        assert_eq!(c.state().rate, 1.5);
        c.set_rate(-2.0);
        assert_eq!(c.state().rate, 1.5);
    }

    #[test]
    fn test_clock_advances_with_rate() {
        let mut c = loaded_controller(10.0);
        c.set_rate(2.0);
        c.play();
        c.tick(1.0);

        assert!((c.state().current_time - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_completion_fires_ended_exactly_once() {
        let mut c = loaded_controller(2.0);
        c.play();
        c.take_events();

        c.tick(5.0);
        assert!(!c.state().is_playing);
        assert_eq!(c.state().current_time, 2.0);
        assert_eq!(c.take_events(), vec![PlayerEvent::Ended]);

        // Further ticks while stopped change nothing
        c.tick(5.0);
        c.tick(5.0);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_restart_from_end_plays_from_zero() {
        let mut c = loaded_controller(2.0);
        c.play();
        c.tick(5.0);
        c.take_events();

        c.restart();
        assert!(c.state().is_playing);
        assert_eq!(c.state().current_time, 0.0);
        assert_eq!(c.take_events(), vec![PlayerEvent::Started]);
    }

    #[test]
    fn test_restart_while_playing_only_rewinds() {
        let mut c = loaded_controller(10.0);
        c.play();
        c.tick(3.0);
        c.take_events();

        c.restart();
        assert!(c.state().is_playing);
        assert_eq!(c.state().current_time, 0.0);
        // No second Started: playback never stopped
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_fetch_media_reports_undecodable_content() {
        let base = crate::core::http_stub::serve(vec![crate::core::http_stub::ok_with_body(
            "definitely not audio",
        )]);
        let err = fetch_media("bad", &format!("{}/audio/bad.mp3", base)).unwrap_err();
        assert!(err.contains("cannot decode"), "unexpected error: {}", err);
    }

    #[test]
    fn test_fetch_media_reports_http_failure() {
        let base = crate::core::http_stub::serve(vec![crate::core::http_stub::not_found()]);
        let err = fetch_media("gone", &format!("{}/audio/gone.mp3", base)).unwrap_err();
        assert!(err.contains("fetch"), "unexpected error: {}", err);
    }
}
