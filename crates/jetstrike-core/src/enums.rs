//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Airframe flown by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerJet {
    /// F-22 Raptor: lighter, less fuel, fewer missiles.
    #[default]
    F22,
    /// Su-57 Felon: tougher, longer legs, bigger magazine.
    Su57,
}

impl FromStr for PlayerJet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "f22" | "f-22" => Ok(PlayerJet::F22),
            "s" | "su57" | "su-57" => Ok(PlayerJet::Su57),
            _ => Err(ParseError::UnknownJet(s.to_string())),
        }
    }
}

/// Enemy airframe class. Each class has its own profile (thresholds, tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline fighter vectored by ground control.
    F16,
    /// Aggressive air-superiority fighter; flanks at close range.
    Su27,
    /// Stealth fighter; dives on the player at close range.
    F22,
}

/// Any aircraft in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftKind {
    Player(PlayerJet),
    Enemy(EnemyKind),
}

impl fmt::Display for AircraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AircraftKind::Player(PlayerJet::F22) => "F-22 Raptor",
            AircraftKind::Player(PlayerJet::Su57) => "Su-57 Felon",
            AircraftKind::Enemy(EnemyKind::F16) => "F-16 Falcon",
            AircraftKind::Enemy(EnemyKind::Su27) => "Su-27 Flanker",
            AircraftKind::Enemy(EnemyKind::F22) => "F-22 Raptor",
        };
        f.write_str(name)
    }
}

/// Enemy AI behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Searching; biased toward the last known contact.
    #[default]
    Patrolling,
    /// Direct pursuit along the pathfinder route.
    Chasing,
    /// Maneuvering toward an offset cell beside the player.
    Flanking,
    /// Diving pursuit, trading altitude for closure.
    Diving,
    /// Disengaging away from the player.
    Retreating,
}

impl AiState {
    /// States in which the aircraft is pressing an attack.
    pub fn is_attacking(self) -> bool {
        matches!(self, AiState::Chasing | AiState::Flanking | AiState::Diving)
    }
}

/// Session-wide weather. Scales detection range and weapon accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Storm,
}

impl WeatherCondition {
    pub fn detection_range_modifier(self) -> f64 {
        match self {
            WeatherCondition::Clear => 1.0,
            WeatherCondition::Cloudy => 0.8,
            WeatherCondition::Storm => 0.5,
        }
    }

    pub fn accuracy_modifier(self) -> f64 {
        match self {
            WeatherCondition::Clear => 1.0,
            WeatherCondition::Cloudy => 0.9,
            WeatherCondition::Storm => 0.7,
        }
    }
}

/// Static terrain feature of a grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Empty,
    /// Airbase: full refuel while sitting on the cell.
    Base,
    /// Airborne tanker: half-tank refuel from any neighboring cell.
    Tanker,
}

/// What an observer sees in a cell: an occupant if any, otherwise the terrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellMarker {
    #[default]
    Empty,
    Base,
    Tanker,
    Player,
    Enemy,
}

impl From<Terrain> for CellMarker {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Empty => CellMarker::Empty,
            Terrain::Base => CellMarker::Base,
            Terrain::Tanker => CellMarker::Tanker,
        }
    }
}

/// Top-level session state. Victory and Defeat are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    #[default]
    Playing,
    Victory,
    Defeat,
}

impl SimulationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SimulationState::Playing)
    }
}

/// Flight maneuver, used to price fuel consumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maneuver {
    #[default]
    Regular,
    Turn,
    Climb,
    Afterburner,
}

/// Player weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Missile,
    Gun,
}

/// Player choice while combat is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    FireMissile,
    FireGun,
    Evade,
}

impl CombatAction {
    pub fn weapon(self) -> Option<Weapon> {
        match self {
            CombatAction::FireMissile => Some(Weapon::Missile),
            CombatAction::FireGun => Some(Weapon::Gun),
            CombatAction::Evade => None,
        }
    }
}

impl FromStr for CombatAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "missile" | "fire-missile" | "m" => Ok(CombatAction::FireMissile),
            "gun" | "guns" | "fire-gun" | "g" => Ok(CombatAction::FireGun),
            "evade" | "e" => Ok(CombatAction::Evade),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}

/// Non-movement player turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Refuel,
    ToggleAfterburner,
    Climb,
    Descend,
}

impl FromStr for PlayerAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refuel" | "r" => Ok(PlayerAction::Refuel),
            "afterburner" | "ab" => Ok(PlayerAction::ToggleAfterburner),
            "climb" | "up" => Ok(PlayerAction::Climb),
            "descend" | "down" => Ok(PlayerAction::Descend),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}

/// Why a player action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unavailable {
    /// Neither on a base nor next to a tanker.
    NoFuelSource,
    AtCeiling,
    AtFloor,
}

/// Where fuel came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefuelSource {
    Base,
    Tanker,
}

/// How an enemy left the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructionCause {
    ShotDown,
    FuelStarvation,
}
