//! Player commands sent from the interactive loop to the engine.
//!
//! Commands are validated by the engine; a rejected command changes nothing.

use serde::{Deserialize, Serialize};

use crate::components::AircraftId;
use crate::enums::*;
use crate::types::Direction;

/// All possible player inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fly one cell in a compass direction.
    Move { direction: Direction },
    /// Refuel, toggle afterburner, climb or descend.
    Action { action: PlayerAction },
    /// Fire or evade while combat is pending.
    Engage {
        action: CombatAction,
        target: AircraftId,
    },
    /// Hand the turn to the enemies (weather, detection, AI, coordinated attack).
    EndTurn,
}
