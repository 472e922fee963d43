//! Static video catalog and its filter.
//!
//! The catalog is compile-time data: categories own their videos, a video
//! belongs to exactly one category. Filtering is a pure projection - the
//! source catalog is never mutated and identical inputs always produce an
//! identical result.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Difficulty level attached to videos and passages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: &'static [Level] = &[Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn label(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

/// How a video is played back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoKind {
    /// Hosted on a video sharing platform; opens in the system handler.
    Remote,
    /// File under the `/video` asset prefix.
    Local,
}

/// One catalog entry. Immutable at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Display string, e.g. "2:35"
    pub duration: &'static str,
    pub thumbnail: &'static str,
    pub kind: VideoKind,
    /// Remote: full platform URL. Local: file name under the video prefix.
    pub url: &'static str,
    pub level: Option<Level>,
}

/// A titled group of videos.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub videos: Vec<VideoItem>,
}

/// Category selector: everything or one exact category id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(String),
}

/// Level selector: everything or one exact level.
///
/// Videos without a level only survive the `All` selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelFilter {
    #[default]
    All,
    Level(Level),
}

/// The full catalog, in display order.
pub fn catalog() -> &'static [VideoCategory] {
    &CATALOG
}

/// Filter the catalog by free-text query, category and level.
///
/// Query is a case-insensitive substring match against title or description.
/// Categories left with no videos are dropped entirely. Never mutates the
/// source; identical inputs yield identical output.
pub fn filter_catalog(
    source: &[VideoCategory],
    query: &str,
    category: &CategoryFilter,
    level: LevelFilter,
) -> Vec<VideoCategory> {
    let needle = query.trim().to_lowercase();

    source
        .iter()
        .filter(|cat| match category {
            CategoryFilter::All => true,
            CategoryFilter::Id(id) => cat.id == id.as_str(),
        })
        .filter_map(|cat| {
            let videos: Vec<VideoItem> = cat
                .videos
                .iter()
                .filter(|v| matches_query(v, &needle))
                .filter(|v| matches_level(v, level))
                .cloned()
                .collect();

            if videos.is_empty() {
                None
            } else {
                Some(VideoCategory { videos, ..cat.clone() })
            }
        })
        .collect()
}

fn matches_query(video: &VideoItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    video.title.to_lowercase().contains(needle)
        || video.description.to_lowercase().contains(needle)
}

fn matches_level(video: &VideoItem, filter: LevelFilter) -> bool {
    match filter {
        LevelFilter::All => true,
        LevelFilter::Level(wanted) => video.level == Some(wanted),
    }
}

static CATALOG: Lazy<Vec<VideoCategory>> = Lazy::new(|| {
    vec![
        VideoCategory {
            id: "phonics",
            title: "Phonics Songs",
            description: "Letter sounds and blending, one tune at a time",
            videos: vec![
                VideoItem {
                    id: "phonics-abc-sounds",
                    title: "ABC Letter Sounds",
                    description: "Every letter sound from a to z with pictures",
                    duration: "3:10",
                    thumbnail: "abc-sounds.jpg",
                    kind: VideoKind::Remote,
                    url: "https://www.youtube.com/watch?v=BELlZKpi1Zs",
                    level: Some(Level::Beginner),
                },
                VideoItem {
                    id: "phonics-magic-e",
                    title: "Magic E Song",
                    description: "How a silent e changes short vowels into long ones",
                    duration: "2:35",
                    thumbnail: "magic-e.jpg",
                    kind: VideoKind::Remote,
                    url: "https://www.youtube.com/watch?v=bZhl6YcrxZQ",
                    level: Some(Level::Intermediate),
                },
                VideoItem {
                    id: "phonics-blends",
                    title: "Consonant Blends",
                    description: "bl, cr, st and friends - reading two letters as one sound",
                    duration: "4:02",
                    thumbnail: "blends.jpg",
                    kind: VideoKind::Local,
                    url: "consonant-blends.mp4",
                    level: Some(Level::Intermediate),
                },
            ],
        },
        VideoCategory {
            id: "digraphs",
            title: "Digraphs",
            description: "Two letters, one sound: ch, sh, th, wh",
            videos: vec![
                VideoItem {
                    id: "digraphs-ch-sh",
                    title: "Ch and Sh Chant",
                    description: "Chips, ships and chants for the ch and sh sounds",
                    duration: "2:48",
                    thumbnail: "ch-sh.jpg",
                    kind: VideoKind::Remote,
                    url: "https://www.youtube.com/watch?v=3NOzgR1ANc4",
                    level: Some(Level::Intermediate),
                },
                VideoItem {
                    id: "digraphs-th-wh",
                    title: "Th and Wh Workout",
                    description: "Thumbs and whales: voiced and unvoiced th, question words with wh",
                    duration: "3:21",
                    thumbnail: "th-wh.jpg",
                    kind: VideoKind::Local,
                    url: "th-wh-workout.mp4",
                    level: Some(Level::Advanced),
                },
            ],
        },
        VideoCategory {
            id: "stories",
            title: "Read-Along Stories",
            description: "Short stories read aloud with highlighted words",
            videos: vec![
                VideoItem {
                    id: "stories-pat-cat",
                    title: "Pat the Cat",
                    description: "A short-a story for first readers",
                    duration: "5:12",
                    thumbnail: "pat-cat.jpg",
                    kind: VideoKind::Remote,
                    url: "https://www.youtube.com/watch?v=gS6sCOR1HQM",
                    level: Some(Level::Beginner),
                },
                VideoItem {
                    id: "stories-singalong",
                    title: "Sight Word Singalong",
                    description: "The most common words, sung until they stick",
                    duration: "6:40",
                    thumbnail: "singalong.jpg",
                    kind: VideoKind::Remote,
                    url: "https://www.youtube.com/watch?v=sU2sJXB1v8s",
                    level: None,
                },
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Vec<VideoCategory> {
        vec![VideoCategory {
            id: "phonics",
            title: "Phonics",
            description: "",
            videos: vec![VideoItem {
                id: "magic-e",
                title: "Magic E Song",
                description: "silent e",
                duration: "2:35",
                thumbnail: "t.jpg",
                kind: VideoKind::Remote,
                url: "https://example.com/v",
                level: Some(Level::Intermediate),
            }],
        }]
    }

    #[test]
    fn test_identity_filter_returns_catalog_unchanged() {
        let filtered = filter_catalog(catalog(), "", &CategoryFilter::All, LevelFilter::All);
        assert_eq!(filtered, catalog());
    }

    #[test]
    fn test_source_not_mutated() {
        let source = small_catalog();
        let before = source.clone();
        let _ = filter_catalog(&source, "magic", &CategoryFilter::All, LevelFilter::All);
        assert_eq!(source, before);
    }

    #[test]
    fn test_no_match_query_drops_all_categories() {
        let filtered = filter_catalog(
            catalog(),
            "zzz-no-such-video",
            &CategoryFilter::All,
            LevelFilter::All,
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive_and_matches_description() {
        let filtered = filter_catalog(&small_catalog(), "SILENT", &CategoryFilter::All, LevelFilter::All);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].videos[0].id, "magic-e");
    }

    #[test]
    fn test_level_mismatch_drops_emptied_category() {
        // Catalog with one Intermediate video, selector Beginner -> zero categories
        let filtered = filter_catalog(
            &small_catalog(),
            "",
            &CategoryFilter::All,
            LevelFilter::Level(Level::Beginner),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_unleveled_videos_excluded_unless_all() {
        // "Sight Word Singalong" has no level
        let all = filter_catalog(catalog(), "singalong", &CategoryFilter::All, LevelFilter::All);
        assert_eq!(all.len(), 1);

        for level in Level::ALL {
            let filtered = filter_catalog(
                catalog(),
                "singalong",
                &CategoryFilter::All,
                LevelFilter::Level(*level),
            );
            assert!(filtered.is_empty(), "unleveled video leaked into {:?}", level);
        }
    }

    #[test]
    fn test_category_filter_exact_id() {
        let filtered = filter_catalog(
            catalog(),
            "",
            &CategoryFilter::Id("digraphs".into()),
            LevelFilter::All,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "digraphs");
    }

    #[test]
    fn test_filter_is_deterministic() {
        let a = filter_catalog(catalog(), "song", &CategoryFilter::All, LevelFilter::All);
        let b = filter_catalog(catalog(), "song", &CategoryFilter::All, LevelFilter::All);
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_video_belongs_to_one_category() {
        let mut seen = std::collections::HashSet::new();
        for cat in catalog() {
            for v in &cat.videos {
                assert!(seen.insert(v.id), "video id {} appears twice", v.id);
            }
        }
    }
}
