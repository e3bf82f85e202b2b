//! Events emitted by the engine for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::components::AircraftId;
use crate::enums::*;
use crate::types::Position;

/// Which aircraft an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Enemy(AircraftId),
}

/// Everything observable that happened during one engine call, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    PlayerMoved {
        from: Position,
        to: Position,
        fuel_spent: u32,
    },
    AltitudeChanged {
        aircraft: Actor,
        altitude: u8,
    },
    AfterburnerToggled {
        engaged: bool,
    },
    Refueled {
        source: RefuelSource,
        amount: u32,
    },
    /// A player action was valid but could not be carried out.
    ActionUnavailable {
        reason: Unavailable,
    },
    FuelExhausted {
        aircraft: Actor,
    },
    /// Out of fuel: lost one altitude level.
    ForcedDescent {
        aircraft: Actor,
        altitude: u8,
    },
    /// Out of fuel on the deck with no base underneath.
    CrashLanding {
        aircraft: Actor,
        damage: u32,
    },
    /// Out of fuel on the deck over a base: partial tank.
    EmergencyRefuel {
        amount: u32,
    },
    CombatEngaged {
        enemy: AircraftId,
        initiated_by_player: bool,
    },
    ShotFired {
        weapon: Weapon,
        target: AircraftId,
        hit_chance: f64,
        hit: bool,
        damage: u32,
    },
    WeaponEmpty {
        weapon: Weapon,
    },
    Evaded {
        from: Position,
        to: Position,
    },
    EnemyStrike {
        enemy: AircraftId,
        hit: bool,
        damage: u32,
        critical: bool,
    },
    EnemyDestroyed {
        enemy: AircraftId,
        kind: EnemyKind,
        cause: DestructionCause,
        score: u32,
    },
    PowerUp {
        damage_multiplier: f64,
    },
    CoordinatedAttack {
        attackers: Vec<AircraftId>,
        damage: u32,
        criticals: u32,
    },
    WeatherChanged {
        from: WeatherCondition,
        to: WeatherCondition,
    },
    ContactGained {
        enemy: AircraftId,
    },
    ContactLost {
        enemy: AircraftId,
    },
    EnemyStateChanged {
        enemy: AircraftId,
        from: AiState,
        to: AiState,
    },
    /// Only emitted for enemies the player currently detects.
    EnemyMoved {
        enemy: AircraftId,
        from: Position,
        to: Position,
    },
    Victory,
    Defeat {
        reason: String,
    },
}
