//! Single-slot message display
//!
//! The queue owns "is a message currently showing". The actual scrolling
//! animation belongs to the host's `MessageSurface`; the queue only tracks
//! the slot's lifecycle, one message at a time. A second enqueue while a
//! message is showing is rejected, never overwritten.

use thiserror::Error;

use crate::host::MessageSurface;

/// Message slot lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Showing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("a message is already showing")]
    SlotBusy,
}

/// The single message slot
#[derive(Debug)]
pub struct MessageQueue {
    state: DisplayState,
    text: Option<String>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            state: DisplayState::Idle,
            text: None,
        }
    }

    /// Start showing a message; fails if one is already showing
    pub fn enqueue(
        &mut self,
        text: impl Into<String>,
        surface: &mut dyn MessageSurface,
    ) -> Result<(), MessageError> {
        if self.state == DisplayState::Showing {
            return Err(MessageError::SlotBusy);
        }
        let text = text.into();
        log::debug!("Showing message: {}", text);
        surface.show_auto_scrolling(&text);
        self.text = Some(text);
        self.state = DisplayState::Showing;
        Ok(())
    }

    /// Per-frame poll; clears the slot once the surface reports hidden
    pub fn poll(&mut self, surface: &dyn MessageSurface) {
        if self.state == DisplayState::Showing && surface.is_hidden() {
            log::debug!("Message finished");
            self.text = None;
            self.state = DisplayState::Idle;
        }
    }

    /// Whether a message is currently showing
    pub fn is_active(&self) -> bool {
        self.state == DisplayState::Showing
    }

    /// Text of the showing message, if any
    pub fn current_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fakes::FakeSurface;

    #[test]
    fn test_enqueue_shows_and_activates() {
        let mut queue = MessageQueue::new();
        let mut surface = FakeSurface::new();

        assert!(!queue.is_active());
        queue.enqueue("You rolled a 3.", &mut surface).unwrap();
        assert!(queue.is_active());
        assert_eq!(queue.current_text(), Some("You rolled a 3."));
        assert_eq!(surface.last_shown(), Some("You rolled a 3."));
    }

    #[test]
    fn test_concurrent_enqueue_rejected() {
        let mut queue = MessageQueue::new();
        let mut surface = FakeSurface::new();

        queue.enqueue("first", &mut surface).unwrap();
        let err = queue.enqueue("second", &mut surface).unwrap_err();
        assert_eq!(err, MessageError::SlotBusy);
        // The showing message is untouched and the surface never saw "second".
        assert_eq!(queue.current_text(), Some("first"));
        assert_eq!(surface.shown, vec!["first"]);
    }

    #[test]
    fn test_active_until_surface_hides() {
        let mut queue = MessageQueue::new();
        let mut surface = FakeSurface::new();

        queue.enqueue("scrolling...", &mut surface).unwrap();
        // Still showing: polling changes nothing.
        queue.poll(&surface);
        assert!(queue.is_active());

        surface.finish();
        queue.poll(&surface);
        assert!(!queue.is_active());
        assert_eq!(queue.current_text(), None);

        // Slot is free again.
        queue.enqueue("next", &mut surface).unwrap();
        assert!(queue.is_active());
    }
}
