//! Snapshot builder: reads the world and produces a `GameStateSnapshot`.
//!
//! Only enemies the player currently detects are exposed.

use hecs::World;

use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain, PilotRecord};
use jetstrike_core::enums::{AircraftKind, PlayerJet, SimulationState, WeatherCondition};
use jetstrike_core::state::*;
use jetstrike_core::types::Position;
use jetstrike_grid::{OccupancyMap, TerrainGrid};

/// Build a complete snapshot of the current simulation state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    grid: &TerrainGrid,
    player: &Aircraft,
    pilot: &PilotRecord,
    turn: u64,
    state: SimulationState,
    outcome: Option<&str>,
    weather: WeatherCondition,
    pending_combat: Option<AircraftId>,
) -> GameStateSnapshot {
    let mut enemies: Vec<EnemyView> = Vec::new();
    let mut enemies_remaining = 0;

    for (_entity, (aircraft, brain)) in world.query::<(&Aircraft, &EnemyBrain)>().iter() {
        enemies_remaining += 1;
        let AircraftKind::Enemy(kind) = aircraft.kind else {
            continue;
        };
        if !brain.detected {
            continue;
        }
        enemies.push(EnemyView {
            id: brain.id,
            kind,
            position: aircraft.position,
            altitude: aircraft.altitude,
            health: aircraft.health,
            max_health: aircraft.max_health,
            state: brain.state,
            range: aircraft.position.range_to(player.position),
        });
    }
    enemies.sort_by_key(|e| e.id);

    let visible: Vec<Position> = enemies.iter().map(|e| e.position).collect();
    let cells = OccupancyMap::new(grid, player.position, &visible).rows();

    let jet = match player.kind {
        AircraftKind::Player(jet) => jet,
        AircraftKind::Enemy(_) => PlayerJet::default(),
    };

    GameStateSnapshot {
        turn,
        state,
        outcome: outcome.map(str::to_string),
        weather,
        player: PlayerView {
            jet,
            position: player.position,
            heading: player.heading,
            health: player.health,
            max_health: player.max_health,
            altitude: player.altitude,
            fuel: player.fuel,
            max_fuel: player.max_fuel,
            afterburner: player.afterburner,
            missiles: player.missiles,
            gun_rounds: player.gun_rounds,
            damage_multiplier: pilot.damage_multiplier,
        },
        enemies,
        cells,
        pending_combat,
        score: ScoreView {
            score: pilot.score,
            kills: pilot.kills,
            power_ups: pilot.power_ups,
            enemies_remaining,
        },
    }
}
