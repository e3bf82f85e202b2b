//! Simulation constants and tuning parameters.
//!
//! Per-class numbers (health, thresholds, damage tables) live in
//! `jetstrike-ai::profiles`; this file holds the values shared by every class.

// --- Grid ---

/// Default board edge length (cells). Matches the classic 10x10 board.
pub const DEFAULT_GRID_SIZE: i32 = 10;

/// Largest board edge a config or save may ask for (cells).
pub const MAX_GRID_SIZE: i32 = 64;

/// Random placement gives up after `size² * PLACEMENT_ATTEMPTS_PER_CELL` draws.
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 16;

// --- Altitude ---

/// Highest altitude level. Altitude is always within `0..=MAX_ALTITUDE`.
pub const MAX_ALTITUDE: u8 = 3;

/// Starting altitude of the player.
pub const PLAYER_START_ALTITUDE: u8 = 1;

// --- Fuel ---

/// Fuel units every maneuver costs before surcharges.
pub const FUEL_BASE_COST: u32 = 1;

/// Above this fraction of max velocity a maneuver costs one extra unit.
pub const HIGH_SPEED_FRACTION: f64 = 0.8;

/// Fraction of the tank a tanker transfers.
pub const TANKER_REFUEL_FRACTION: f64 = 0.5;

/// Fraction of the tank a grounded, dry player gets back while sitting on a base.
pub const EMERGENCY_REFUEL_FRACTION: f64 = 0.25;

/// Damage the player takes when forced down with no base underneath.
pub const PLAYER_CRASH_DAMAGE: u32 = 2;

/// Damage an enemy takes each time its tank runs dry in the air.
pub const ENEMY_FUEL_STARVATION_DAMAGE: u32 = 1;

/// Throttle settings as fractions of max velocity.
pub const CRUISE_THROTTLE: f64 = 0.7;
pub const TURN_THROTTLE: f64 = 0.6;
pub const CLIMB_THROTTLE: f64 = 0.5;

// --- Detection ---

/// Detection range bonus per player altitude level (cells).
pub const ALTITUDE_DETECTION_BONUS: f64 = 0.5;

// --- Combat ---

/// Base probability of a player shot hitting.
pub const BASE_HIT_CHANCE: f64 = 0.65;

/// Beyond this range (cells) shots lose `RANGE_BAND_PENALTY`.
pub const RANGE_BAND_NEAR: f64 = 5.0;

/// Beyond this range (cells) shots lose another `RANGE_BAND_PENALTY`.
pub const RANGE_BAND_FAR: f64 = 8.0;

pub const RANGE_BAND_PENALTY: f64 = 0.15;

/// Targets with at least this much combat experience evade better.
pub const VETERAN_EXPERIENCE: u32 = 3;

/// Hit chance lost against veteran targets.
pub const VETERAN_EVASION: f64 = 0.1;

/// Ceiling on accumulated combat experience.
pub const MAX_COMBAT_EXPERIENCE: u32 = 5;

/// Ceiling on any critical-hit probability.
pub const MAX_CRITICAL_CHANCE: f64 = 0.5;

/// Missile damage range before the damage multiplier (inclusive).
pub const MISSILE_DAMAGE_MIN: u32 = 25;
pub const MISSILE_DAMAGE_MAX: u32 = 40;

/// Gun damage range before the damage multiplier (inclusive).
pub const GUN_DAMAGE_MIN: u32 = 8;
pub const GUN_DAMAGE_MAX: u32 = 15;

/// Gun rounds spent on a hit / on a miss.
pub const GUN_ROUNDS_PER_HIT: u32 = 10;
pub const GUN_ROUNDS_PER_MISS: u32 = 5;

/// Chance that a kill grants a permanent damage-multiplier power-up.
pub const POWER_UP_CHANCE: f64 = 0.25;

/// Damage multiplier gained per power-up.
pub const POWER_UP_INCREMENT: f64 = 0.25;

/// Chebyshev radius around the player for the coordinated-attack check.
pub const COORDINATED_ATTACK_RANGE: i32 = 1;

/// Minimum number of enemies in range before they attack together.
pub const COORDINATED_ATTACK_MIN_ATTACKERS: usize = 2;

// --- Weather ---

/// Probability that the weather holds from one turn to the next.
pub const WEATHER_PERSISTENCE: f64 = 0.8;

/// Relative weights of the next condition when the weather shifts.
pub const WEATHER_WEIGHTS: [(crate::enums::WeatherCondition, u32); 3] = [
    (crate::enums::WeatherCondition::Clear, 50),
    (crate::enums::WeatherCondition::Cloudy, 35),
    (crate::enums::WeatherCondition::Storm, 15),
];

// --- AI ---

/// Turns without contact before a pursuing aircraft gives up and patrols.
pub const LOST_CONTACT_TURNS: u32 = 2;

/// Probability that a patrolling aircraft heads for the last known contact.
pub const PATROL_CONTACT_BIAS: f64 = 0.6;

/// Probability of a retreat jitter on profiles that jitter.
pub const RETREAT_JITTER_CHANCE: f64 = 0.3;

/// Flank cells relative to the player (`(row, col)` offsets).
pub const FLANK_OFFSETS: [(i32, i32); 4] = [(-2, -2), (-2, 2), (2, 2), (2, -2)];
