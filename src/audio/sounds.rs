//! Sound and music definitions
//!
//! Defines all audio events used in the minigame.

use std::path::Path;

/// Sound effect identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Die thrown (roll input accepted)
    DiceRoll,
    /// Wild encounter square landed on
    Encounter,
    /// Reward square landed on
    Reward,
    /// Hazard square landed on
    Hazard,
    /// Session quit by the player
    Quit,
}

impl SoundId {
    /// Get the file path for this sound
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::DiceRoll => "assets/sounds/dice_roll.ogg",
            SoundId::Encounter => "assets/sounds/encounter.ogg",
            SoundId::Reward => "assets/sounds/reward.ogg",
            SoundId::Hazard => "assets/sounds/hazard.ogg",
            SoundId::Quit => "assets/sounds/quit.ogg",
        }
    }

    /// Get the default volume for this sound (0.0 - 1.0)
    pub fn default_volume(&self) -> f64 {
        match self {
            SoundId::DiceRoll => 0.5,
            SoundId::Encounter | SoundId::Reward => 0.6,
            SoundId::Hazard | SoundId::Quit => 0.8,
        }
    }

    /// Check if the sound file exists
    pub fn exists(&self) -> bool {
        Path::new(self.file_path()).exists()
    }
}

/// Music track identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicId {
    /// Plays for the duration of a minigame session
    Minigame,
    /// Plays outside the minigame
    Overworld,
}

impl MusicId {
    /// Get the file path for this track
    pub fn file_path(&self) -> &'static str {
        match self {
            MusicId::Minigame => "assets/music/minigame.ogg",
            MusicId::Overworld => "assets/music/overworld.ogg",
        }
    }

    /// Check if the track file exists
    pub fn exists(&self) -> bool {
        Path::new(self.file_path()).exists()
    }
}
