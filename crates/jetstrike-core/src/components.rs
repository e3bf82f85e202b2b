//! Components attached to aircraft entities.
//!
//! Components are plain data. Game logic lives in systems; the only methods
//! here are derived read-only queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Direction, Position};

/// Stable roster id of an enemy aircraft. Enemies act in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AircraftId(pub u32);

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Flight state shared by the player and every enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub kind: AircraftKind,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    /// 0 (on the deck) ..= `MAX_ALTITUDE`.
    pub altitude: u8,
    pub fuel: u32,
    pub max_fuel: u32,
    pub heading: Direction,
    pub velocity: f64,
    pub max_velocity: f64,
    /// Heading change (in 45° steps) possible without the turn surcharge.
    pub turn_rate: u8,
    /// Base detection range in cells, before stealth/altitude/weather.
    pub detection_range: f64,
    pub combat_experience: u32,
    /// Afterburner mode: pins velocity at max and doubles fuel costs.
    pub afterburner: bool,
    pub stealth_mode: bool,
    pub missiles: u32,
    pub gun_rounds: u32,
}

impl Aircraft {
    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// AI memory of an enemy aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub id: AircraftId,
    pub state: AiState,
    pub turns_in_state: u32,
    /// Cell where the player was last seen (or reported by ground control).
    pub last_known_player: Option<Position>,
    pub turns_undetected: u32,
    /// Whether this aircraft and the player are within detection range this turn.
    pub detected: bool,
    /// Points awarded to the player for a kill.
    pub score_value: u32,
}

impl EnemyBrain {
    pub fn new(id: AircraftId, score_value: u32) -> Self {
        Self {
            id,
            state: AiState::default(),
            turns_in_state: 0,
            last_known_player: None,
            turns_undetected: 0,
            detected: false,
            score_value,
        }
    }
}

/// Player progression that is not part of the airframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotRecord {
    pub score: u32,
    pub kills: u32,
    pub power_ups: u32,
    /// Multiplies every player weapon damage roll.
    pub damage_multiplier: f64,
}

impl Default for PilotRecord {
    fn default() -> Self {
        Self {
            score: 0,
            kills: 0,
            power_ups: 0,
            damage_multiplier: 1.0,
        }
    }
}
