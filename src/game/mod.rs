//! Game module - Core minigame logic and state machine

mod dice;
mod effect;
mod message;
mod session;

pub use dice::{DiceRoller, DIE_FACES};
pub use effect::{dispatch, SquareEffect, Terrain};
pub use message::{DisplayState, MessageError, MessageQueue};
pub use session::{
    MinigameController, Phase, SessionConfig, SessionError, SessionState, TickContext, TickOutcome,
};
