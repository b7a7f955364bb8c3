//! Board square definitions
//!
//! A square is one fixed position on the board: an effect tag plus a small
//! parameter array whose meaning depends on the tag.

use serde::{Deserialize, Serialize};

/// Number of per-square parameter slots
pub const SQUARE_PARAMS: usize = 3;

/// The closed set of square behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareKind {
    /// Nothing happens
    NoOp,
    /// Wild encounter, grassland flavor
    EncounterLand,
    /// Wild encounter, cave flavor
    EncounterCave,
    /// Wild encounter, water flavor
    EncounterWater,
    /// Grants `params[0]` reward units
    Reward,
    /// Ends the session
    Hazard,
}

/// One board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub kind: SquareKind,
    /// Effect-specific data; unused slots are zero
    #[serde(default)]
    pub params: [i16; SQUARE_PARAMS],
}

impl Square {
    /// A square with all parameters zeroed
    pub const fn new(kind: SquareKind) -> Self {
        Self {
            kind,
            params: [0; SQUARE_PARAMS],
        }
    }

    /// A square with explicit parameters
    pub const fn with_params(kind: SquareKind, params: [i16; SQUARE_PARAMS]) -> Self {
        Self { kind, params }
    }
}
