//! Minigame session state machine
//!
//! One playthrough from entry to exit. The host calls `tick()` once per
//! frame; the controller cooperatively yields whenever a message is showing
//! and otherwise processes one step of turn logic. There is no blocking
//! anywhere — a tick that can make no progress simply returns.

use thiserror::Error;

use crate::audio::{AudioManager, MusicId, SoundId};
use crate::board::Board;
use crate::host::{Button, EffectHost, InputSource, MessageSurface};

use super::dice::DiceRoller;
use super::effect::{dispatch, SquareEffect};
use super::message::{MessageError, MessageQueue};

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One-shot session setup
    Entering,
    /// Normal per-frame turn processing
    Polling,
    /// Draining the last message, then one-shot teardown
    Exiting,
    /// Session over; ticks are no-ops
    Done,
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking next frame
    Running,
    /// Session is over; return to the prior context
    Finished,
}

/// Fatal session errors, all programming errors rather than game events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("message protocol violation: {0}")]
    Message(#[from] MessageError),
}

/// Everything a session needs from the outside, fixed at entry
#[derive(Debug)]
pub struct SessionConfig {
    /// The board to play on
    pub board: Board,
    /// Music for the duration of the session
    pub entry_track: MusicId,
    /// Music to restore on exit
    pub exit_track: MusicId,
}

impl SessionConfig {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            entry_track: MusicId::Minigame,
            exit_track: MusicId::Overworld,
        }
    }
}

/// Mutable per-session state, owned by the controller
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Token position, always in `0..board.len()`
    pub position: usize,
    /// The roll taken last cycle, 0 when no landing is pending
    pub last_roll: u8,
    /// Set when a roll overshot the final square and was clamped
    pub reached_end: bool,
    /// Reward units granted so far this session
    pub rewards_total: u32,
}

/// Collaborator handles for one tick
pub struct TickContext<'a> {
    pub input: &'a dyn InputSource,
    pub surface: &'a mut dyn MessageSurface,
    pub effects: &'a mut dyn EffectHost,
    pub audio: &'a mut AudioManager,
}

/// The per-frame minigame state machine
pub struct MinigameController {
    config: SessionConfig,
    state: SessionState,
    queue: MessageQueue,
    dice: DiceRoller,
    phase: Phase,
}

impl MinigameController {
    /// Create a controller for one session
    pub fn new(config: SessionConfig) -> Self {
        Self::with_dice(config, DiceRoller::new())
    }

    /// Create a controller with a specific die (deterministic sessions)
    pub fn with_dice(config: SessionConfig, dice: DiceRoller) -> Self {
        Self {
            config,
            state: SessionState::default(),
            queue: MessageQueue::new(),
            dice,
            phase: Phase::Entering,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.config.board
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("Phase transition: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<TickOutcome, SessionError> {
        match self.phase {
            Phase::Entering => {
                self.state = SessionState::default();
                ctx.audio.play_music(self.config.entry_track);
                log::info!("Session started on board '{}'", self.config.board.name());
                self.set_phase(Phase::Polling);
                Ok(TickOutcome::Running)
            }
            Phase::Polling => {
                self.queue.poll(ctx.surface);
                if self.queue.is_active() {
                    // Suspension point: input is starved while text scrolls.
                    return Ok(TickOutcome::Running);
                }

                if self.state.last_roll > 0 {
                    self.resolve_landing(ctx)?;
                    return Ok(TickOutcome::Running);
                }

                if ctx.input.was_pressed(Button::Confirm) {
                    self.take_roll(ctx)?;
                } else if ctx.input.was_pressed(Button::Cancel) {
                    ctx.audio.play(SoundId::Quit);
                    self.set_phase(Phase::Exiting);
                }
                Ok(TickOutcome::Running)
            }
            Phase::Exiting => {
                // Let the final message play out before tearing down.
                self.queue.poll(ctx.surface);
                if self.queue.is_active() {
                    return Ok(TickOutcome::Running);
                }
                ctx.audio.play_music(self.config.exit_track);
                log::info!(
                    "Session over on tile {} with {} reward units",
                    self.state.position,
                    self.state.rewards_total
                );
                self.set_phase(Phase::Done);
                Ok(TickOutcome::Finished)
            }
            Phase::Done => Ok(TickOutcome::Finished),
        }
    }

    /// Roll the die, announce the outcome, then advance the token
    ///
    /// The outcome message goes out before the position changes, so the
    /// player always sees "You rolled a K." before any square consequence.
    fn take_roll(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SessionError> {
        ctx.audio.play(SoundId::DiceRoll);
        let roll = self.dice.roll();
        self.state.last_roll = roll;
        self.queue
            .enqueue(format!("You rolled a {}.", roll), ctx.surface)?;

        let last = self.config.board.last_index();
        let target = self.state.position + roll as usize;
        if target > last {
            self.state.position = last;
            self.state.reached_end = true;
        } else {
            self.state.position = target;
        }
        log::debug!("Rolled {}, token on tile {}", roll, self.state.position);
        Ok(())
    }

    /// Announce the landed-on tile and apply its effect
    ///
    /// Runs on the first idle frame after the roll message cleared, so the
    /// dispatcher only ever sees the settled position.
    fn resolve_landing(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SessionError> {
        let text = if self.state.reached_end {
            "You have reached the end of the board.".to_string()
        } else {
            format!("You are now on tile {}.", self.state.position)
        };
        self.queue.enqueue(text, ctx.surface)?;

        let square = self.config.board.square(self.state.position);
        let effect = dispatch(square);
        log::debug!("Tile {} dispatched {:?}", self.state.position, effect);

        match effect {
            SquareEffect::None => {}
            SquareEffect::Encounter(terrain) => {
                ctx.audio.play(SoundId::Encounter);
                ctx.effects.start_encounter(terrain);
            }
            SquareEffect::Reward(amount) => {
                ctx.audio.play(SoundId::Reward);
                self.state.rewards_total += amount;
                ctx.effects.grant_reward(amount);
            }
            SquareEffect::Hazard => {
                ctx.audio.play(SoundId::Hazard);
            }
        }

        self.state.last_roll = 0;
        if effect.is_terminal() {
            self.set_phase(Phase::Exiting);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Square, SquareKind, BOARD_SQUARES};
    use crate::game::Terrain;
    use crate::host::fakes::{FakeEffects, FakeInput, FakeSurface};

    /// An all-NoOp board with a terminal hazard and the given overrides
    fn test_board(overrides: &[(usize, Square)]) -> Board {
        let mut squares = vec![Square::new(SquareKind::NoOp); BOARD_SQUARES];
        squares[BOARD_SQUARES - 1] = Square::new(SquareKind::Hazard);
        for (index, square) in overrides {
            squares[*index] = *square;
        }
        Board::new("test board", squares).expect("test board must be valid")
    }

    struct Harness {
        controller: MinigameController,
        surface: FakeSurface,
        effects: FakeEffects,
        audio: AudioManager,
    }

    impl Harness {
        fn new(board: Board, dice: DiceRoller) -> Self {
            let mut harness = Self {
                controller: MinigameController::with_dice(SessionConfig::new(board), dice),
                surface: FakeSurface::new(),
                effects: FakeEffects::new(),
                audio: AudioManager::disabled(),
            };
            // Consume the one-shot Entering frame.
            assert_eq!(harness.tick(FakeInput::none()), TickOutcome::Running);
            assert_eq!(harness.controller.phase(), Phase::Polling);
            harness
        }

        fn tick(&mut self, input: FakeInput) -> TickOutcome {
            let mut ctx = TickContext {
                input: &input,
                surface: &mut self.surface,
                effects: &mut self.effects,
                audio: &mut self.audio,
            };
            self.controller.tick(&mut ctx).expect("tick failed")
        }

        /// Roll, let both messages play out, and return the settling tick's outcome
        fn complete_turn(&mut self) -> TickOutcome {
            self.tick(FakeInput::pressing(Button::Confirm));
            self.surface.finish();
            self.tick(FakeInput::none()); // landing resolution
            self.surface.finish();
            self.tick(FakeInput::none())
        }
    }

    #[test]
    fn test_reward_square_scenario() {
        // Square 2 pays out 10; a single roll of 2 lands on it.
        let board = test_board(&[(2, Square::with_params(SquareKind::Reward, [10, 0, 0]))]);
        let mut h = Harness::new(board, DiceRoller::scripted(&[2]));

        h.tick(FakeInput::pressing(Button::Confirm));
        assert_eq!(h.surface.shown, vec!["You rolled a 2."]);
        assert_eq!(h.controller.state().position, 2);
        assert_eq!(h.controller.state().last_roll, 2);

        // Nothing is granted until the roll message has cleared.
        assert!(h.effects.rewards.is_empty());

        h.surface.finish();
        h.tick(FakeInput::none());
        assert_eq!(
            h.surface.shown,
            vec!["You rolled a 2.", "You are now on tile 2."]
        );
        assert_eq!(h.effects.rewards, vec![10]);
        assert_eq!(h.controller.state().rewards_total, 10);
        assert_eq!(h.controller.state().last_roll, 0);

        // Session continues after a non-terminal effect.
        h.surface.finish();
        assert_eq!(h.tick(FakeInput::none()), TickOutcome::Running);
        assert_eq!(h.controller.phase(), Phase::Polling);
    }

    #[test]
    fn test_input_starved_while_message_showing() {
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&[3]));

        h.tick(FakeInput::pressing(Button::Confirm));
        assert_eq!(h.surface.shown.len(), 1);

        // Both buttons are dead while the text scrolls.
        h.tick(FakeInput::pressing(Button::Confirm));
        h.tick(FakeInput::pressing(Button::Cancel));
        assert_eq!(h.surface.shown.len(), 1);
        assert_eq!(h.controller.phase(), Phase::Polling);
        assert_eq!(h.controller.state().position, 3);
    }

    #[test]
    fn test_encounter_square_starts_battle() {
        let board = test_board(&[(4, Square::new(SquareKind::EncounterCave))]);
        let mut h = Harness::new(board, DiceRoller::scripted(&[4]));

        h.tick(FakeInput::pressing(Button::Confirm));
        h.surface.finish();
        h.tick(FakeInput::none());
        assert_eq!(h.effects.encounters, vec![Terrain::Cave]);
    }

    #[test]
    fn test_landing_on_final_hazard_ends_session() {
        // 6*8 + 1 = 49: lands exactly on the terminal hazard.
        let rolls = [6, 6, 6, 6, 6, 6, 6, 6, 1];
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&rolls));

        for _ in 0..8 {
            assert_eq!(h.complete_turn(), TickOutcome::Running);
        }
        assert_eq!(h.controller.state().position, 48);

        h.tick(FakeInput::pressing(Button::Confirm));
        assert_eq!(h.surface.last_shown(), Some("You rolled a 1."));
        h.surface.finish();
        h.tick(FakeInput::none());
        assert_eq!(h.surface.last_shown(), Some("You are now on tile 49."));
        assert_eq!(h.controller.phase(), Phase::Exiting);

        // No further input is accepted while the last message plays out.
        let shown_before = h.surface.shown.len();
        h.tick(FakeInput::pressing(Button::Confirm));
        assert_eq!(h.controller.state().last_roll, 0);
        assert_eq!(h.surface.shown.len(), shown_before);

        h.surface.finish();
        assert_eq!(h.tick(FakeInput::none()), TickOutcome::Finished);
        assert_eq!(h.controller.phase(), Phase::Done);
    }

    #[test]
    fn test_overshoot_clamps_to_last_square() {
        // 6*8 = 48, then a 6 would reach 54: clamps to 49.
        let rolls = [6, 6, 6, 6, 6, 6, 6, 6, 6];
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&rolls));

        for _ in 0..8 {
            h.complete_turn();
        }

        h.tick(FakeInput::pressing(Button::Confirm));
        assert_eq!(h.controller.state().position, 49);
        assert!(h.controller.state().reached_end);

        h.surface.finish();
        h.tick(FakeInput::none());
        assert_eq!(
            h.surface.last_shown(),
            Some("You have reached the end of the board.")
        );
        // The clamped tile is the terminal hazard, so the session ends.
        assert_eq!(h.controller.phase(), Phase::Exiting);
        h.surface.finish();
        assert_eq!(h.tick(FakeInput::none()), TickOutcome::Finished);
    }

    #[test]
    fn test_position_is_monotonic_and_bounded() {
        let rolls = [3, 5, 1, 6, 2, 4, 6, 6, 6, 6, 6, 6];
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&rolls));

        let mut previous = 0;
        for _ in 0..rolls.len() {
            let outcome = h.complete_turn();
            let position = h.controller.state().position;
            assert!(position >= previous);
            assert!(position < BOARD_SQUARES);
            previous = position;
            if outcome == TickOutcome::Finished {
                break;
            }
        }
        assert_eq!(h.controller.phase(), Phase::Done);
    }

    #[test]
    fn test_quit_returns_to_prior_context() {
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&[]));

        h.tick(FakeInput::pressing(Button::Cancel));
        assert_eq!(h.controller.phase(), Phase::Exiting);
        // No message is showing, so the next tick tears down.
        assert_eq!(h.tick(FakeInput::none()), TickOutcome::Finished);
        assert_eq!(h.controller.phase(), Phase::Done);
    }

    #[test]
    fn test_done_phase_is_inert() {
        let mut h = Harness::new(test_board(&[]), DiceRoller::scripted(&[]));

        h.tick(FakeInput::pressing(Button::Cancel));
        assert_eq!(h.tick(FakeInput::none()), TickOutcome::Finished);

        // Further ticks keep reporting Finished without side effects.
        assert_eq!(h.tick(FakeInput::pressing(Button::Confirm)), TickOutcome::Finished);
        assert!(h.surface.shown.is_empty());
        assert_eq!(h.controller.state().position, 0);
    }
}
