//! Audio system
//!
//! Provides sound effects and music using the Kira audio library.

pub mod manager;
pub mod sounds;

pub use manager::AudioManager;
pub use sounds::{MusicId, SoundId};
