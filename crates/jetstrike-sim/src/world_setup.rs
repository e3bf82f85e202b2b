//! Spawn factories for setting up the simulation world.
//!
//! Places terrain features, the player and the enemy roster on random,
//! non-overlapping cells.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use jetstrike_ai::profiles::{get_behavior, get_profile};
use jetstrike_core::components::*;
use jetstrike_core::constants::*;
use jetstrike_core::enums::*;
use jetstrike_core::types::{Direction, Position};
use jetstrike_grid::TerrainGrid;

use crate::config::SimConfig;
use crate::error::Result;

/// Everything world setup produces.
pub struct Setup {
    pub grid: TerrainGrid,
    pub player: Aircraft,
}

/// Build the board and spawn every aircraft. The config must already be valid.
pub fn setup_world(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> Result<Setup> {
    let mut grid = TerrainGrid::new(config.grid_size);

    for _ in 0..config.bases {
        let pos = grid.random_empty_position(rng, |_| false)?;
        grid.set_terrain(pos, Terrain::Base);
    }
    for _ in 0..config.tankers {
        let pos = grid.random_empty_position(rng, |_| false)?;
        grid.set_terrain(pos, Terrain::Tanker);
    }

    let player_pos = grid.random_empty_position(rng, |_| false)?;
    let player = build_player(config.player_jet, player_pos);

    let mut taken = vec![player_pos];
    for (index, &kind) in config.enemies.iter().enumerate() {
        let pos = grid.random_empty_position(rng, |p| taken.contains(&p))?;
        taken.push(pos);
        spawn_enemy(world, kind, AircraftId(index as u32), pos, player_pos);
    }

    tracing::info!(
        "World ready: {}x{} grid, player {} at {}, {} enemies",
        config.grid_size,
        config.grid_size,
        player.kind,
        player.position,
        config.enemies.len()
    );

    Ok(Setup { grid, player })
}

/// Build the player aircraft at cruise throttle.
pub fn build_player(jet: PlayerJet, position: Position) -> Aircraft {
    let kind = AircraftKind::Player(jet);
    let profile = get_profile(kind);
    Aircraft {
        kind,
        position,
        health: profile.max_health,
        max_health: profile.max_health,
        altitude: PLAYER_START_ALTITUDE,
        fuel: profile.max_fuel,
        max_fuel: profile.max_fuel,
        heading: Direction::N,
        velocity: profile.max_velocity * CRUISE_THROTTLE,
        max_velocity: profile.max_velocity,
        turn_rate: profile.turn_rate,
        detection_range: profile.detection_range,
        combat_experience: profile.starting_experience,
        afterburner: false,
        stealth_mode: false,
        missiles: profile.missiles,
        gun_rounds: profile.gun_rounds,
    }
}

/// Spawn one enemy at its preferred altitude, nose toward the player.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    id: AircraftId,
    position: Position,
    player: Position,
) -> hecs::Entity {
    let aircraft_kind = AircraftKind::Enemy(kind);
    let profile = get_profile(aircraft_kind);
    let behavior = get_behavior(kind);

    let aircraft = Aircraft {
        kind: aircraft_kind,
        position,
        health: profile.max_health,
        max_health: profile.max_health,
        altitude: behavior.preferred_altitude.min(MAX_ALTITUDE),
        fuel: profile.max_fuel,
        max_fuel: profile.max_fuel,
        heading: Direction::from_delta(position.delta_to(player)).unwrap_or_default(),
        velocity: profile.max_velocity * CRUISE_THROTTLE,
        max_velocity: profile.max_velocity,
        turn_rate: profile.turn_rate,
        detection_range: profile.detection_range,
        combat_experience: profile.starting_experience,
        afterburner: false,
        // Patrolling is not an attack state.
        stealth_mode: profile.stealth.is_some(),
        missiles: profile.missiles,
        gun_rounds: profile.gun_rounds,
    };

    world.spawn((aircraft, EnemyBrain::new(id, behavior.score_value)))
}
