//! Scripted collaborator implementations for unit tests

use std::collections::HashSet;

use crate::game::Terrain;

use super::{Button, EffectHost, InputSource, MessageSurface};

/// Message surface that records every shown text and hides on demand
#[derive(Debug)]
pub struct FakeSurface {
    /// Every text passed to `show_auto_scrolling`, in order
    pub shown: Vec<String>,
    hidden: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            shown: Vec::new(),
            hidden: true,
        }
    }

    /// Finish the current message, as if the scroll animation completed
    pub fn finish(&mut self) {
        self.hidden = true;
    }

    /// The most recently shown text
    pub fn last_shown(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }
}

impl MessageSurface for FakeSurface {
    fn show_auto_scrolling(&mut self, text: &str) {
        self.shown.push(text.to_string());
        self.hidden = false;
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Input source holding the buttons pressed this frame
#[derive(Debug, Default)]
pub struct FakeInput {
    pressed: HashSet<Button>,
}

impl FakeInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pressing(button: Button) -> Self {
        let mut pressed = HashSet::new();
        pressed.insert(button);
        Self { pressed }
    }
}

impl InputSource for FakeInput {
    fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}

/// Effect host that records encounters and reward grants
#[derive(Debug, Default)]
pub struct FakeEffects {
    pub encounters: Vec<Terrain>,
    pub rewards: Vec<u32>,
}

impl FakeEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_rewards(&self) -> u32 {
        self.rewards.iter().sum()
    }
}

impl EffectHost for FakeEffects {
    fn start_encounter(&mut self, terrain: Terrain) {
        self.encounters.push(terrain);
    }

    fn grant_reward(&mut self, amount: u32) {
        self.rewards.push(amount);
    }
}
