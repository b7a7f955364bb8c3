//! Main UI Application
//!
//! The terminal host for the minigame: an auto-scrolling message box, a
//! per-frame input snapshot, an effect banner, and the board renderer. The
//! message box and input snapshot are the concrete collaborators the
//! session controller ticks against.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::board::SquareKind;
use crate::game::{MinigameController, Terrain};
use crate::host::{Button, EffectHost, InputSource, MessageSurface};

/// Frames between revealed characters in the message box
const REVEAL_INTERVAL: u8 = 2;
/// Frames a fully revealed message stays up before auto-dismissing
const LINGER_FRAMES: u16 = 50;
/// Frames an effect banner stays up
const BANNER_FRAMES: u16 = 180;

/// Message box that reveals text a few characters per frame, then hides
/// itself. Reports hidden only after the whole message has played out.
#[derive(Debug, Default)]
pub struct AutoScrollMessageBox {
    text: String,
    revealed: usize,
    reveal_timer: u8,
    linger: u16,
    visible: bool,
}

impl AutoScrollMessageBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the scroll animation by one frame
    pub fn advance(&mut self) {
        if !self.visible {
            return;
        }
        if self.revealed < self.text.chars().count() {
            self.reveal_timer += 1;
            if self.reveal_timer >= REVEAL_INTERVAL {
                self.reveal_timer = 0;
                self.revealed += 1;
            }
        } else if self.linger > 0 {
            self.linger -= 1;
        } else {
            self.text.clear();
            self.revealed = 0;
            self.visible = false;
        }
    }

    /// The revealed portion of the current message
    pub fn visible_text(&self) -> String {
        self.text.chars().take(self.revealed).collect()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl MessageSurface for AutoScrollMessageBox {
    fn show_auto_scrolling(&mut self, text: &str) {
        self.text = text.to_string();
        self.revealed = 0;
        self.reveal_timer = 0;
        self.linger = LINGER_FRAMES;
        self.visible = true;
    }

    fn is_hidden(&self) -> bool {
        !self.visible
    }
}

/// Edge-triggered button state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    confirm: bool,
    cancel: bool,
}

impl FrameInput {
    /// Forget last frame's presses
    pub fn clear(&mut self) {
        self.confirm = false;
        self.cancel = false;
    }

    /// Record a key press event for this frame
    pub fn record_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('z') => self.confirm = true,
            KeyCode::Esc | KeyCode::Char('q') => self.cancel = true,
            _ => {}
        }
    }
}

impl InputSource for FrameInput {
    fn was_pressed(&self, button: Button) -> bool {
        match button {
            Button::Confirm => self.confirm,
            Button::Cancel => self.cancel,
        }
    }
}

/// Presents square effects as a transient banner line
#[derive(Debug, Default)]
pub struct EffectBanner {
    text: Option<String>,
    frames_left: u16,
}

impl EffectBanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, text: String) {
        self.text = Some(text);
        self.frames_left = BANNER_FRAMES;
    }

    /// Age the banner by one frame
    pub fn advance(&mut self) {
        if self.frames_left > 0 {
            self.frames_left -= 1;
            if self.frames_left == 0 {
                self.text = None;
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl EffectHost for EffectBanner {
    fn start_encounter(&mut self, terrain: Terrain) {
        let text = match terrain {
            Terrain::Land => "Something rustles in the tall grass!",
            Terrain::Cave => "Something drops from the cave ceiling!",
            Terrain::Water => "Something surfaces from the water!",
        };
        self.set(text.to_string());
    }

    fn grant_reward(&mut self, amount: u32) {
        self.set(format!("Received {} coins!", amount));
    }
}

/// Main UI application
#[derive(Debug, Default)]
pub struct App {
    /// Message surface ticked by the controller
    pub message_box: AutoScrollMessageBox,
    /// Input snapshot rebuilt every frame
    pub input: FrameInput,
    /// Effect presentation
    pub banner: EffectBanner,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-frame housekeeping before input and game processing
    pub fn begin_frame(&mut self) {
        self.input.clear();
        self.message_box.advance();
        self.banner.advance();
    }

    /// Feed a key press into this frame's input snapshot
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.input.record_key(key);
    }

    /// Render the whole screen
    pub fn render(&self, frame: &mut Frame, controller: &MinigameController) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(7), // board
                Constraint::Length(2), // status + banner
                Constraint::Length(4), // message box
                Constraint::Min(1),    // hints
            ])
            .split(frame.area());

        // Title
        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "PACHISI",
                Style::default()
                    .fg(Color::Rgb(230, 200, 80))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                controller.board().name().to_string(),
                Style::default().fg(Color::Rgb(130, 130, 130)),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        // Board, ten tiles per row
        let board = controller.board();
        let position = controller.state().position;
        let mut rows = Vec::new();
        for (row_index, row) in board.squares().chunks(10).enumerate() {
            let mut spans = vec![Span::raw("  ")];
            for (offset, square) in row.iter().enumerate() {
                let index = row_index * 10 + offset;
                let (glyph, color) = tile_appearance(square.kind);
                let mut style = Style::default().fg(color);
                if index == position {
                    style = style
                        .add_modifier(Modifier::REVERSED)
                        .add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(format!(" {} ", glyph), style));
            }
            rows.push(Line::from(spans));
        }
        let board_widget = Paragraph::new(rows).alignment(Alignment::Center);
        frame.render_widget(board_widget, chunks[1]);

        // Status line and effect banner
        let state = controller.state();
        let last_roll = if state.last_roll > 0 {
            state.last_roll.to_string()
        } else {
            "-".to_string()
        };
        let mut status_lines = vec![Line::from(Span::styled(
            format!(
                "Tile {}/{}   Last roll: {}   Coins: {}",
                state.position,
                board.last_index(),
                last_roll,
                state.rewards_total,
            ),
            Style::default().fg(Color::White),
        ))];
        if let Some(text) = self.banner.text() {
            status_lines.push(Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Rgb(120, 220, 120))
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        let status = Paragraph::new(status_lines).alignment(Alignment::Center);
        frame.render_widget(status, chunks[2]);

        // Message box
        let message = Paragraph::new(self.visible_message_line())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[3]);

        // Hints
        let hints = Paragraph::new(Line::from(Span::styled(
            "Enter: roll dice   Esc: leave the game",
            Style::default().fg(Color::Rgb(100, 100, 100)),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[4]);
    }

    fn visible_message_line(&self) -> Line<'_> {
        if self.message_box.is_visible() {
            Line::from(Span::styled(
                self.message_box.visible_text(),
                Style::default().fg(Color::White),
            ))
        } else {
            Line::from("")
        }
    }
}

/// Glyph and color for a square kind
fn tile_appearance(kind: SquareKind) -> (char, Color) {
    match kind {
        SquareKind::NoOp => ('·', Color::Rgb(110, 110, 110)),
        SquareKind::EncounterLand => ('♣', Color::Rgb(90, 200, 90)),
        SquareKind::EncounterCave => ('▲', Color::Rgb(170, 140, 100)),
        SquareKind::EncounterWater => ('≈', Color::Rgb(90, 150, 230)),
        SquareKind::Reward => ('$', Color::Rgb(230, 200, 80)),
        SquareKind::Hazard => ('☠', Color::Rgb(220, 80, 80)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_box_reveals_then_hides() {
        let mut message_box = AutoScrollMessageBox::new();
        message_box.show_auto_scrolling("Hi.");
        assert!(!message_box.is_hidden());

        // Characters appear over frames, not instantly.
        message_box.advance();
        assert!(message_box.visible_text().chars().count() <= 1);

        // Run well past reveal plus linger; the box must dismiss itself.
        for _ in 0..(3 * REVEAL_INTERVAL as u32 + LINGER_FRAMES as u32 + 2) {
            message_box.advance();
        }
        assert!(message_box.is_hidden());
        assert_eq!(message_box.visible_text(), "");
    }

    #[test]
    fn test_frame_input_is_edge_triggered() {
        use crossterm::event::KeyModifiers;

        let mut input = FrameInput::default();
        input.record_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(input.was_pressed(Button::Confirm));
        assert!(!input.was_pressed(Button::Cancel));

        input.clear();
        assert!(!input.was_pressed(Button::Confirm));
    }

    #[test]
    fn test_banner_expires() {
        let mut banner = EffectBanner::new();
        banner.grant_reward(10);
        assert_eq!(banner.text(), Some("Received 10 coins!"));
        for _ in 0..BANNER_FRAMES {
            banner.advance();
        }
        assert_eq!(banner.text(), None);
    }
}
