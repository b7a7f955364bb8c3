//! Audio manager using Kira
//!
//! Handles loading and playing sound effects and background music. All
//! playback is fire-and-forget: a missing output device or missing asset
//! files degrade to silence with a log line, never an error.

use std::collections::HashMap;
use std::path::Path;

use kira::{
    manager::{backend::DefaultBackend, AudioManager as KiraManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
    Volume,
};

use super::sounds::{MusicId, SoundId};

/// Audio manager that handles all sound playback
pub struct AudioManager {
    /// Kira audio manager
    manager: Option<KiraManager>,
    /// Preloaded sound data
    sounds: HashMap<SoundId, StaticSoundData>,
    /// Handle to the currently playing music track, if any
    music: Option<StaticSoundHandle>,
    /// Master volume (0.0 - 1.0)
    master_volume: f64,
    /// Whether audio is enabled
    enabled: bool,
}

impl AudioManager {
    /// Create a new audio manager
    pub fn new() -> Self {
        let manager = match KiraManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => {
                log::info!("Audio manager initialized successfully");
                Some(m)
            }
            Err(e) => {
                log::warn!("Failed to initialize audio manager: {}. Audio disabled.", e);
                None
            }
        };

        let mut audio = Self {
            manager,
            sounds: HashMap::new(),
            music: None,
            master_volume: 1.0,
            enabled: true,
        };

        audio.preload_sounds();
        audio
    }

    /// Create a manager that never touches an audio device (tests, headless)
    pub fn disabled() -> Self {
        Self {
            manager: None,
            sounds: HashMap::new(),
            music: None,
            master_volume: 1.0,
            enabled: false,
        }
    }

    /// Preload all sound effects
    fn preload_sounds(&mut self) {
        let sounds_to_preload = [
            SoundId::DiceRoll,
            SoundId::Encounter,
            SoundId::Reward,
            SoundId::Hazard,
            SoundId::Quit,
        ];

        for sound_id in sounds_to_preload {
            if let Err(e) = self.load_sound(sound_id) {
                log::debug!("Could not preload sound {:?}: {}", sound_id, e);
            }
        }
    }

    /// Load a sound from file
    fn load_sound(&mut self, sound_id: SoundId) -> Result<(), String> {
        if self.sounds.contains_key(&sound_id) {
            return Ok(()); // Already loaded
        }

        let path = sound_id.file_path();
        if !Path::new(path).exists() {
            return Err(format!("Sound file not found: {}", path));
        }

        match StaticSoundData::from_file(path) {
            Ok(data) => {
                self.sounds.insert(sound_id, data);
                Ok(())
            }
            Err(e) => Err(format!("Failed to load sound {}: {:?}", path, e)),
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, sound_id: SoundId) {
        if !self.enabled || self.manager.is_none() {
            return;
        }

        // Try to load if not already loaded (do this before getting manager reference)
        if !self.sounds.contains_key(&sound_id) {
            if let Err(e) = self.load_sound(sound_id) {
                log::debug!("Cannot play sound {:?}: {}", sound_id, e);
                return;
            }
        }

        let sound_data = match self.sounds.get(&sound_id) {
            Some(data) => data.clone(),
            None => return,
        };

        let final_volume = sound_id.default_volume() * self.master_volume;
        let settings = StaticSoundSettings::new().volume(Volume::Amplitude(final_volume));
        let sound_with_settings = sound_data.with_settings(settings);

        if let Some(manager) = &mut self.manager {
            if let Err(e) = manager.play(sound_with_settings) {
                log::debug!("Failed to play sound {:?}: {:?}", sound_id, e);
            }
        }
    }

    /// Switch background music to the given track, stopping the current one
    pub fn play_music(&mut self, music_id: MusicId) {
        if let Some(mut handle) = self.music.take() {
            handle.stop(Tween::default());
        }

        if !self.enabled || self.manager.is_none() {
            return;
        }

        let path = music_id.file_path();
        if !Path::new(path).exists() {
            log::debug!("Music file not found: {}", path);
            return;
        }

        let data = match StaticSoundData::from_file(path) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("Failed to load music {}: {:?}", path, e);
                return;
            }
        };

        let settings = StaticSoundSettings::new()
            .volume(Volume::Amplitude(self.master_volume))
            .loop_region(0.0..);
        let looped = data.with_settings(settings);

        if let Some(manager) = &mut self.manager {
            match manager.play(looped) {
                Ok(handle) => {
                    log::debug!("Now playing music {:?}", music_id);
                    self.music = Some(handle);
                }
                Err(e) => log::debug!("Failed to play music {:?}: {:?}", music_id, e),
            }
        }
    }

    /// Stop the current music track, if any
    pub fn stop_music(&mut self) {
        if let Some(mut handle) = self.music.take() {
            handle.stop(Tween::default());
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Get master volume
    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    /// Enable or disable audio
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if audio is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.manager.is_some()
    }

    /// Check if audio backend is available
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

// Note: AudioManager contains Kira's manager which isn't Send/Sync,
// so we need to be careful about thread safety. In this single-threaded
// game, this isn't a concern.
