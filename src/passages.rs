//! Static reading passages with optional narration audio.

use once_cell::sync::Lazy;

use crate::catalog::Level;

/// A short decodable text plus the asset name of its narration, if recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Passage {
    pub id: &'static str,
    pub title: &'static str,
    pub level: Level,
    pub text: &'static str,
    pub narration: Option<&'static str>,
}

/// All passages, grouped by ascending level in display order.
pub fn passages() -> &'static [Passage] {
    &PASSAGES
}

/// Look up a passage by id (used by the CLI preselect argument).
pub fn find(id: &str) -> Option<&'static Passage> {
    PASSAGES.iter().find(|p| p.id == id)
}

static PASSAGES: Lazy<Vec<Passage>> = Lazy::new(|| {
    vec![
        Passage {
            id: "pat-cat",
            title: "Pat the Cat",
            level: Level::Beginner,
            text: "Pat is a cat. Pat sat on a mat. A rat ran past the mat. \
                   Pat ran after the rat. The rat hid in a hat. Pat sat and sat. \
                   Then Pat had a nap on the mat.",
            narration: Some("passage-pat-cat.mp3"),
        },
        Passage {
            id: "big-ship",
            title: "The Big Ship",
            level: Level::Beginner,
            text: "A big ship sails on the sea. The ship has a red flag. \
                   Fish swim by the ship. The sun is hot on the deck. \
                   We wave at the ship as it sails away.",
            narration: Some("passage-big-ship.mp3"),
        },
        Passage {
            id: "magic-e",
            title: "The Magic E",
            level: Level::Intermediate,
            text: "A little e can change a word. Tap becomes tape. Kit becomes kite. \
                   Hop becomes hope. The e at the end says nothing at all, \
                   but it makes the vowel say its name. We call it the magic e.",
            narration: Some("passage-magic-e.mp3"),
        },
        Passage {
            id: "rain-day",
            title: "A Rainy Day",
            level: Level::Intermediate,
            text: "Rain fell all day on the street. Jane put on her raincoat and \
                   went out to play. She jumped in a puddle and made a big splash. \
                   A snail crept along the wet trail. Jane stayed out until the \
                   rain went away.",
            narration: Some("passage-rain-day.mp3"),
        },
        Passage {
            id: "night-light",
            title: "The Night Light",
            level: Level::Advanced,
            text: "At night the light on the lighthouse shines bright and high. \
                   Ships in the bay sight the light and keep to the right. \
                   The keeper climbs the tight stairs each night to check the light. \
                   Without it, no ship might find the bay in the dark.",
            narration: Some("passage-night-light.mp3"),
        },
        Passage {
            id: "tongue-twister",
            title: "Tricky Sounds",
            level: Level::Advanced,
            text: "She sells seashells by the seashore. The shells she sells are \
                   surely seashells. Three thin thinkers thought three thick thoughts. \
                   Which whale whistled while the white whale watched?",
            narration: None,
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for p in passages() {
            assert!(seen.insert(p.id), "duplicate passage id: {}", p.id);
        }
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find("magic-e").map(|p| p.title), Some("The Magic E"));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_narrations_are_known_assets() {
        for p in passages() {
            if let Some(n) = p.narration {
                assert!(
                    crate::assets::AUDIO_ASSETS.contains(&n),
                    "narration {} of {} is not in the checked asset list",
                    n,
                    p.id
                );
            }
        }
    }
}
