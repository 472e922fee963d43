//! Asset addressing: where audio and video files live.
//!
//! Assets are served from a static base URL under two fixed prefixes,
//! `/audio` and `/video`. The base is configurable (CLI `--assets`,
//! persisted setting); everything else about the layout is compile-time.

/// Default asset server, a local static file server during development.
pub const DEFAULT_BASE: &str = "http://localhost:8000";

/// The fixed set of audio assets the checker verifies, in check order.
///
/// Letter sounds first, then the digraphs, then passage narrations.
pub const AUDIO_ASSETS: &[&str] = &[
    "a.mp3", "b.mp3", "c.mp3", "d.mp3", "e.mp3", "f.mp3", "g.mp3",
    "h.mp3", "i.mp3", "j.mp3", "k.mp3", "l.mp3", "m.mp3", "n.mp3",
    "o.mp3", "p.mp3", "q.mp3", "r.mp3", "s.mp3", "t.mp3", "u.mp3",
    "v.mp3", "w.mp3", "x.mp3", "y.mp3", "z.mp3",
    "ch.mp3", "sh.mp3", "th.mp3", "wh.mp3",
    "passage-pat-cat.mp3", "passage-magic-e.mp3", "passage-rain-day.mp3",
    "passage-big-ship.mp3", "passage-night-light.mp3",
];

/// URL of an audio asset under `base`.
pub fn audio_url(base: &str, name: &str) -> String {
    format!("{}/audio/{}", base.trim_end_matches('/'), name)
}

/// URL of a video asset under `base`.
pub fn video_url(base: &str, name: &str) -> String {
    format!("{}/video/{}", base.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_url_joins_prefix() {
        assert_eq!(audio_url("http://h:1", "a.mp3"), "http://h:1/audio/a.mp3");
        // Trailing slash on the base must not double up
        assert_eq!(audio_url("http://h:1/", "a.mp3"), "http://h:1/audio/a.mp3");
    }

    #[test]
    fn test_video_url_joins_prefix() {
        assert_eq!(video_url("http://h:1", "m.mp4"), "http://h:1/video/m.mp4");
    }

    #[test]
    fn test_asset_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in AUDIO_ASSETS {
            assert!(seen.insert(name), "duplicate asset entry: {}", name);
        }
    }
}
