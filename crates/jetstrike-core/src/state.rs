//! Game state snapshot: the complete visible state handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::components::AircraftId;
use crate::enums::*;
use crate::types::{Direction, Position};

/// Complete visible state after an engine call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub turn: u64,
    pub state: SimulationState,
    /// Human-readable outcome once the session is over.
    pub outcome: Option<String>,
    pub weather: WeatherCondition,
    pub player: PlayerView,
    /// Detected enemies only.
    pub enemies: Vec<EnemyView>,
    /// Row-major cell markers; undetected enemies are not drawn.
    pub cells: Vec<Vec<CellMarker>>,
    /// Enemy the player is currently engaged with.
    pub pending_combat: Option<AircraftId>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub jet: PlayerJet,
    pub position: Position,
    pub heading: Direction,
    pub health: u32,
    pub max_health: u32,
    pub altitude: u8,
    pub fuel: u32,
    pub max_fuel: u32,
    pub afterburner: bool,
    pub missiles: u32,
    pub gun_rounds: u32,
    pub damage_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: AircraftId,
    pub kind: EnemyKind,
    pub position: Position,
    pub altitude: u8,
    pub health: u32,
    pub max_health: u32,
    pub state: AiState,
    /// Straight-line range from the player (cells).
    pub range: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub kills: u32,
    pub power_ups: u32,
    pub enemies_remaining: u32,
}
