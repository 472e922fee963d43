//! PHONICA - Phonics learning player library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (playback, probe, audio output)
pub mod core;

// App modules
pub mod assets;
pub mod catalog;
pub mod cli;
pub mod help;
pub mod passages;
pub mod paths;
pub mod settings;
pub mod ui;

// Re-export commonly used types from core
pub use crate::core::player::{PlaybackController, PlaybackState, PlayerEvent};
pub use crate::core::probe::{AssetProbe, AssetStatus};
pub use crate::core::sink::{MediaSink, RodioSink, SilentSink};

// Re-export catalog types
pub use crate::catalog::{Level, VideoCategory, VideoItem, VideoKind};
