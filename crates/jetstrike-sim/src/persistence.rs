//! Save/restore of a running session.
//!
//! `SaveData` is a plain serde record of everything the engine needs to
//! resume. The RNG stream is not stored: a restored engine reseeds from
//! `seed ^ turn`.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain, PilotRecord};
use jetstrike_core::constants::{MAX_ALTITUDE, MAX_GRID_SIZE};
use jetstrike_core::enums::{AircraftKind, SimulationState, Terrain, WeatherCondition};
use jetstrike_core::types::Position;
use jetstrike_grid::TerrainGrid;

use crate::engine::SimulationEngine;
use crate::error::{EngineError, Result};

/// One enemy as saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEnemy {
    pub aircraft: Aircraft,
    pub brain: EnemyBrain,
}

/// Complete persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub seed: u64,
    pub turn: u64,
    pub state: SimulationState,
    pub outcome: Option<String>,
    pub weather: WeatherCondition,
    pub grid_size: i32,
    pub bases: Vec<Position>,
    pub tankers: Vec<Position>,
    pub player: Aircraft,
    pub pilot: PilotRecord,
    pub pending_combat: Option<AircraftId>,
    /// Enemies in roster order.
    pub enemies: Vec<SavedEnemy>,
}

impl SaveData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject records that cannot describe a real session.
    fn validate(&self) -> Result<()> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(corrupt(format!("grid_size {}", self.grid_size)));
        }
        let in_bounds = |p: Position| {
            p.row >= 0 && p.col >= 0 && p.row < self.grid_size && p.col < self.grid_size
        };

        for &p in self.bases.iter().chain(&self.tankers) {
            if !in_bounds(p) {
                return Err(corrupt(format!("terrain feature at {p} is off the grid")));
            }
        }
        check_aircraft(&self.player, &in_bounds)?;
        if !matches!(self.player.kind, AircraftKind::Player(_)) {
            return Err(corrupt("player record holds an enemy airframe".into()));
        }

        let mut ids = Vec::with_capacity(self.enemies.len());
        for enemy in &self.enemies {
            check_aircraft(&enemy.aircraft, &in_bounds)?;
            if !matches!(enemy.aircraft.kind, AircraftKind::Enemy(_)) {
                return Err(corrupt(format!("enemy {} is not an enemy airframe", enemy.brain.id)));
            }
            if enemy.aircraft.is_destroyed() {
                return Err(corrupt(format!("enemy {} is already destroyed", enemy.brain.id)));
            }
            if ids.contains(&enemy.brain.id) {
                return Err(corrupt(format!("duplicate enemy id {}", enemy.brain.id)));
            }
            ids.push(enemy.brain.id);
        }

        if let Some(id) = self.pending_combat {
            if !ids.contains(&id) {
                return Err(corrupt(format!("pending combat with missing enemy {id}")));
            }
        }
        if self.state == SimulationState::Playing && ids.is_empty() {
            return Err(corrupt("session in play with no enemies left".into()));
        }
        if self.state.is_terminal() != self.outcome.is_some() {
            return Err(corrupt("outcome does not match simulation state".into()));
        }
        Ok(())
    }
}

fn corrupt(reason: String) -> EngineError {
    EngineError::CorruptSave(reason)
}

fn check_aircraft(aircraft: &Aircraft, in_bounds: &impl Fn(Position) -> bool) -> Result<()> {
    if !in_bounds(aircraft.position) {
        return Err(corrupt(format!(
            "{} at {} is off the grid",
            aircraft.kind, aircraft.position
        )));
    }
    if aircraft.health > aircraft.max_health || aircraft.fuel > aircraft.max_fuel {
        return Err(corrupt(format!("{} exceeds its capacity", aircraft.kind)));
    }
    if aircraft.altitude > MAX_ALTITUDE {
        return Err(corrupt(format!(
            "{} altitude {} above ceiling",
            aircraft.kind, aircraft.altitude
        )));
    }
    Ok(())
}

impl SimulationEngine {
    /// Capture the session as a `SaveData` record.
    pub fn save(&self) -> SaveData {
        let mut enemies: Vec<SavedEnemy> = self
            .world
            .query::<(&Aircraft, &EnemyBrain)>()
            .iter()
            .map(|(_, (aircraft, brain))| SavedEnemy {
                aircraft: aircraft.clone(),
                brain: brain.clone(),
            })
            .collect();
        enemies.sort_by_key(|e| e.brain.id);

        SaveData {
            seed: self.seed,
            turn: self.turn,
            state: self.state,
            outcome: self.outcome.clone(),
            weather: self.weather,
            grid_size: self.grid.size(),
            bases: self.grid.bases().collect(),
            tankers: self.grid.tankers().collect(),
            player: self.player.clone(),
            pilot: self.pilot.clone(),
            pending_combat: self.pending_combat,
            enemies,
        }
    }

    /// Rebuild an engine from a saved record.
    pub fn restore(data: SaveData) -> Result<Self> {
        data.validate()?;

        let mut grid = TerrainGrid::new(data.grid_size);
        for &p in &data.bases {
            grid.set_terrain(p, Terrain::Base);
        }
        for &p in &data.tankers {
            grid.set_terrain(p, Terrain::Tanker);
        }

        let mut world = World::new();
        for enemy in data.enemies {
            world.spawn((enemy.aircraft, enemy.brain));
        }

        tracing::info!(
            "Restored session at turn {} with {} enemies",
            data.turn,
            world.len()
        );

        Ok(Self {
            world,
            grid,
            player: data.player,
            pilot: data.pilot,
            seed: data.seed,
            turn: data.turn,
            state: data.state,
            outcome: data.outcome,
            weather: data.weather,
            pending_combat: data.pending_combat,
            rng: ChaCha8Rng::seed_from_u64(data.seed ^ data.turn),
            despawn_buffer: Vec::new(),
        })
    }
}
