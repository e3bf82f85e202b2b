//! Enemy AI system: one aircraft's full turn.
//!
//! FSM transition, stealth posture, altitude rule, maneuver, fuel and
//! contact. Calls the pure FSM and planner from `jetstrike-ai`, then writes
//! the results back to the aircraft's components.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use jetstrike_ai::fsm::{evaluate, is_aware, AiContext};
use jetstrike_ai::maneuver::{altitude_intent, plan, AltitudeIntent, ManeuverContext};
use jetstrike_ai::profiles::{get_behavior, get_profile};
use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain};
use jetstrike_core::enums::{AircraftKind, WeatherCondition};
use jetstrike_core::events::{Actor, EngineEvent};
use jetstrike_core::types::Position;
use jetstrike_grid::TerrainGrid;

use crate::systems::combat;
use crate::systems::resources::{self, OutOfFuel};

/// Run one enemy's turn. A destroyed enemy is left for cleanup.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    grid: &TerrainGrid,
    player: &mut Aircraft,
    weather: WeatherCondition,
    pending_combat: &mut Option<AircraftId>,
    events: &mut Vec<EngineEvent>,
) {
    let Ok(mut aircraft) = world.get::<&Aircraft>(entity).map(|a| (*a).clone()) else {
        return;
    };
    let Ok(mut brain) = world.get::<&EnemyBrain>(entity).map(|b| (*b).clone()) else {
        return;
    };
    let AircraftKind::Enemy(kind) = aircraft.kind else {
        return;
    };
    let profile = get_profile(aircraft.kind);
    let behavior = get_behavior(kind);
    let aware = is_aware(&behavior, brain.detected);

    // 1. State transition
    let update = evaluate(&AiContext {
        kind,
        state: brain.state,
        turns_in_state: brain.turns_in_state,
        health: aircraft.health,
        max_health: aircraft.max_health,
        aware,
        turns_undetected: brain.turns_undetected,
        distance: aircraft.position.range_to(player.position),
    });
    if update.state_changed {
        tracing::debug!(
            "{} {}: {:?} -> {:?}",
            aircraft.kind,
            brain.id,
            brain.state,
            update.new_state
        );
        events.push(EngineEvent::EnemyStateChanged {
            enemy: brain.id,
            from: brain.state,
            to: update.new_state,
        });
        brain.state = update.new_state;
        brain.turns_in_state = 0;
    } else {
        brain.turns_in_state += 1;
    }

    // 2. Stealth aircraft go loud only while attacking.
    aircraft.stealth_mode = profile.stealth.is_some() && !brain.state.is_attacking();

    // 3. Altitude rule
    match altitude_intent(
        brain.state,
        aircraft.altitude,
        player.altitude,
        behavior.preferred_altitude,
    ) {
        AltitudeIntent::Climb => {
            if let Some(report) = resources::climb(&mut aircraft, &profile.fuel) {
                if report.exhausted {
                    out_of_fuel(&mut aircraft, brain.id, events);
                }
            }
        }
        AltitudeIntent::Descend => {
            resources::descend(&mut aircraft);
        }
        AltitudeIntent::Hold => {}
    }

    // 4. Maneuver
    if !aircraft.is_destroyed() {
        let blocked: Vec<Position> = world
            .query::<(&Aircraft, &EnemyBrain)>()
            .iter()
            .filter(|(other, _)| *other != entity)
            .map(|(_, (a, _))| a.position)
            .collect();
        let ctx = ManeuverContext {
            grid,
            kind,
            state: brain.state,
            position: aircraft.position,
            heading: aircraft.heading,
            player: aware.then_some(player.position),
            last_known_player: brain.last_known_player,
            blocked: &blocked,
        };
        let move_plan = plan(&ctx, rng);

        let from = aircraft.position;
        let report = resources::fly(&mut aircraft, move_plan.maneuver, &profile.fuel);
        aircraft.position = move_plan.destination;
        aircraft.heading = move_plan.heading;
        if move_plan.descend {
            resources::descend(&mut aircraft);
        }
        if brain.detected && from != aircraft.position {
            events.push(EngineEvent::EnemyMoved {
                enemy: brain.id,
                from,
                to: aircraft.position,
            });
        }
        if report.exhausted {
            out_of_fuel(&mut aircraft, brain.id, events);
        }
    }

    // 5. Contact: the enemy flew into the player's cell.
    if !aircraft.is_destroyed() && aircraft.position == player.position {
        let strike = combat::enemy_strike(rng, &mut aircraft, player, weather);
        events.push(EngineEvent::EnemyStrike {
            enemy: brain.id,
            hit: strike.hit,
            damage: strike.damage,
            critical: strike.critical,
        });
        if pending_combat.is_none() {
            *pending_combat = Some(brain.id);
            events.push(EngineEvent::CombatEngaged {
                enemy: brain.id,
                initiated_by_player: false,
            });
        }
    }

    if let Ok(mut a) = world.get::<&mut Aircraft>(entity) {
        *a = aircraft;
    }
    if let Ok(mut b) = world.get::<&mut EnemyBrain>(entity) {
        *b = brain;
    }
}

fn out_of_fuel(aircraft: &mut Aircraft, id: AircraftId, events: &mut Vec<EngineEvent>) {
    tracing::debug!("{} {} is out of fuel", aircraft.kind, id);
    events.push(EngineEvent::FuelExhausted {
        aircraft: Actor::Enemy(id),
    });
    if let OutOfFuel::ForcedDescent { altitude } = resources::handle_enemy_out_of_fuel(aircraft) {
        events.push(EngineEvent::ForcedDescent {
            aircraft: Actor::Enemy(id),
            altitude,
        });
    }
}
