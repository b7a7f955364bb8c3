//! Square effect dispatch
//!
//! Pure mapping from a square's tag to the effect the controller should
//! apply. No mutation happens here; the controller decides what to do with
//! the result, including whether the session continues.

use crate::board::{Square, SquareKind};

/// Encounter flavor; selects presentation only, behavior is identical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Land,
    Cave,
    Water,
}

/// What a landed-on square does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEffect {
    /// Nothing
    None,
    /// Start a battle sequence
    Encounter(Terrain),
    /// Grant reward units
    Reward(u32),
    /// End the session
    Hazard,
}

impl SquareEffect {
    /// Whether this effect ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, SquareEffect::Hazard)
    }
}

/// Map a square to its effect
pub fn dispatch(square: &Square) -> SquareEffect {
    match square.kind {
        SquareKind::NoOp => SquareEffect::None,
        SquareKind::EncounterLand => SquareEffect::Encounter(Terrain::Land),
        SquareKind::EncounterCave => SquareEffect::Encounter(Terrain::Cave),
        SquareKind::EncounterWater => SquareEffect::Encounter(Terrain::Water),
        // Negative amounts in hand-edited board files clamp to zero.
        SquareKind::Reward => SquareEffect::Reward(square.params[0].max(0) as u32),
        SquareKind::Hazard => SquareEffect::Hazard,
    }
}
