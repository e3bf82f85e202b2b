//! Class-specific airframe and behavior profiles.
//!
//! Consolidates per-class parameters for world setup, the fuel model,
//! detection, the AI state machine and enemy attacks.

use jetstrike_core::constants::MAX_CRITICAL_CHANCE;
use jetstrike_core::enums::{AiState, AircraftKind, EnemyKind, Maneuver, PlayerJet};

/// Extra fuel units per maneuver, on top of the base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelSurcharges {
    pub afterburner: u32,
    pub climb: u32,
    pub turn: u32,
    pub regular: u32,
}

impl FuelSurcharges {
    pub const STANDARD: FuelSurcharges = FuelSurcharges {
        afterburner: 4,
        climb: 2,
        turn: 1,
        regular: 0,
    };

    pub fn for_maneuver(&self, maneuver: Maneuver) -> u32 {
        match maneuver {
            Maneuver::Afterburner => self.afterburner,
            Maneuver::Climb => self.climb,
            Maneuver::Turn => self.turn,
            Maneuver::Regular => self.regular,
        }
    }
}

/// Low-observable characteristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StealthProfile {
    /// Detection range multiplier while stealth mode is active.
    pub detection_factor: f64,
    /// Hit chance subtracted from shots against this airframe.
    pub evasion: f64,
    /// Evasion while stealth mode is active.
    pub stealth_mode_evasion: f64,
}

/// Airframe parameters shared by player and enemy classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftProfile {
    pub max_health: u32,
    pub max_fuel: u32,
    pub max_velocity: f64,
    /// Heading steps (45°) per move without the turn surcharge.
    pub turn_rate: u8,
    /// Base detection range (cells).
    pub detection_range: f64,
    pub starting_experience: u32,
    pub missiles: u32,
    pub gun_rounds: u32,
    pub stealth: Option<StealthProfile>,
    pub fuel: FuelSurcharges,
}

impl AircraftProfile {
    /// Evasion subtracted from a shot's hit chance, before the veteran bonus.
    pub fn evasion(&self, stealth_mode: bool) -> f64 {
        match self.stealth {
            Some(s) if stealth_mode => s.stealth_mode_evasion,
            Some(s) => s.evasion,
            None => 0.0,
        }
    }

    /// Detection range multiplier from stealth mode.
    pub fn detection_factor(&self, stealth_mode: bool) -> f64 {
        match self.stealth {
            Some(s) if stealth_mode => s.detection_factor,
            _ => 1.0,
        }
    }
}

/// Enemy strike parameters: counterattacks, contact strikes, coordinated attacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub base_chance: f64,
    pub chance_per_experience: f64,
    pub chance_ceiling: f64,
    /// Inclusive damage range.
    pub damage_min: u32,
    pub damage_max: u32,
    pub crit_base: f64,
    pub crit_per_experience: f64,
}

impl AttackProfile {
    /// Hit probability before the weather accuracy modifier.
    pub fn hit_chance(&self, experience: u32) -> f64 {
        (self.base_chance + self.chance_per_experience * experience as f64).min(self.chance_ceiling)
    }

    pub fn critical_chance(&self, experience: u32) -> f64 {
        (self.crit_base + self.crit_per_experience * experience as f64).min(MAX_CRITICAL_CHANCE)
    }
}

/// Maneuver an aggressive class switches to at close range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseManeuver {
    pub state: AiState,
    /// Euclidean distance (cells) at or below which the maneuver is flown.
    pub range: f64,
}

/// Enemy-only decision parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    pub score_value: u32,
    /// When false the class is vectored by ground control and always knows
    /// the player's cell.
    pub can_detect_player: bool,
    /// Retreat below this fraction of max health.
    pub retreat_fraction: f64,
    /// Turns spent retreating before a cornered aircraft re-engages.
    pub max_retreat_turns: u32,
    pub retreat_jitter: bool,
    pub close_maneuver: Option<CloseManeuver>,
    pub preferred_altitude: u8,
    pub afterburner_chance: f64,
    pub dive_altitude_loss_chance: f64,
    pub attack: AttackProfile,
}

/// Get the airframe profile for any aircraft.
pub fn get_profile(kind: AircraftKind) -> AircraftProfile {
    match kind {
        AircraftKind::Player(PlayerJet::F22) => AircraftProfile {
            max_health: 100,
            max_fuel: 120,
            max_velocity: 2.25,
            turn_rate: 1,
            detection_range: 6.0,
            starting_experience: 0,
            missiles: 6,
            gun_rounds: 500,
            stealth: None,
            fuel: FuelSurcharges::STANDARD,
        },
        AircraftKind::Player(PlayerJet::Su57) => AircraftProfile {
            max_health: 110,
            max_fuel: 140,
            max_velocity: 2.0,
            turn_rate: 1,
            detection_range: 6.0,
            starting_experience: 0,
            missiles: 8,
            gun_rounds: 600,
            stealth: None,
            fuel: FuelSurcharges::STANDARD,
        },
        AircraftKind::Enemy(EnemyKind::F16) => AircraftProfile {
            max_health: 50,
            max_fuel: 60,
            max_velocity: 2.0,
            turn_rate: 1,
            detection_range: 5.0,
            starting_experience: 1,
            missiles: 0,
            gun_rounds: 0,
            stealth: None,
            fuel: FuelSurcharges::STANDARD,
        },
        AircraftKind::Enemy(EnemyKind::Su27) => AircraftProfile {
            max_health: 70,
            max_fuel: 70,
            max_velocity: 2.35,
            turn_rate: 2,
            detection_range: 6.0,
            starting_experience: 2,
            missiles: 0,
            gun_rounds: 0,
            stealth: None,
            // Supermaneuverable: turns are free.
            fuel: FuelSurcharges {
                turn: 0,
                ..FuelSurcharges::STANDARD
            },
        },
        AircraftKind::Enemy(EnemyKind::F22) => AircraftProfile {
            max_health: 60,
            max_fuel: 80,
            max_velocity: 2.25,
            turn_rate: 2,
            detection_range: 4.0,
            starting_experience: 3,
            missiles: 0,
            gun_rounds: 0,
            stealth: Some(StealthProfile {
                detection_factor: 0.6,
                evasion: 0.2,
                stealth_mode_evasion: 0.25,
            }),
            // Supercruise: cheaper afterburner.
            fuel: FuelSurcharges {
                afterburner: 3,
                ..FuelSurcharges::STANDARD
            },
        },
    }
}

/// Get the decision profile for an enemy class.
pub fn get_behavior(kind: EnemyKind) -> BehaviorProfile {
    match kind {
        EnemyKind::F16 => BehaviorProfile {
            score_value: 100,
            can_detect_player: false,
            retreat_fraction: 0.3,
            max_retreat_turns: 3,
            retreat_jitter: true,
            close_maneuver: None,
            preferred_altitude: 1,
            afterburner_chance: 0.2,
            dive_altitude_loss_chance: 0.0,
            attack: AttackProfile {
                base_chance: 0.7,
                chance_per_experience: 0.05,
                chance_ceiling: 0.8,
                damage_min: 8,
                damage_max: 15,
                crit_base: 0.05,
                crit_per_experience: 0.05,
            },
        },
        EnemyKind::Su27 => BehaviorProfile {
            score_value: 150,
            can_detect_player: true,
            retreat_fraction: 0.25,
            max_retreat_turns: 2,
            retreat_jitter: false,
            close_maneuver: Some(CloseManeuver {
                state: AiState::Flanking,
                range: 3.0,
            }),
            preferred_altitude: 2,
            afterburner_chance: 0.35,
            dive_altitude_loss_chance: 0.0,
            attack: AttackProfile {
                base_chance: 0.85,
                chance_per_experience: 0.0,
                chance_ceiling: 0.85,
                damage_min: 12,
                damage_max: 20,
                crit_base: 0.1,
                crit_per_experience: 0.05,
            },
        },
        EnemyKind::F22 => BehaviorProfile {
            score_value: 250,
            can_detect_player: true,
            retreat_fraction: 0.35,
            max_retreat_turns: 4,
            retreat_jitter: true,
            close_maneuver: Some(CloseManeuver {
                state: AiState::Diving,
                range: 2.0,
            }),
            preferred_altitude: 3,
            afterburner_chance: 0.25,
            dive_altitude_loss_chance: 0.5,
            attack: AttackProfile {
                base_chance: 0.9,
                chance_per_experience: 0.0,
                chance_ceiling: 0.9,
                damage_min: 15,
                damage_max: 25,
                crit_base: 0.15,
                crit_per_experience: 0.05,
            },
        },
    }
}
