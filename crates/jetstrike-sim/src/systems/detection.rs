//! Detection system: refreshes radar contact between every enemy and the player.
//!
//! Also maintains each enemy's memory of the player: the last known cell and
//! how many turns have passed without knowing it.

use hecs::World;

use jetstrike_ai::detection::is_detected;
use jetstrike_ai::fsm::is_aware;
use jetstrike_ai::profiles::{get_behavior, get_profile};
use jetstrike_core::components::{Aircraft, EnemyBrain};
use jetstrike_core::enums::{AircraftKind, WeatherCondition};
use jetstrike_core::events::EngineEvent;

/// Run detection for every enemy against the player.
pub fn run(
    world: &mut World,
    player: &Aircraft,
    weather: WeatherCondition,
    events: &mut Vec<EngineEvent>,
) {
    let mut changes = Vec::new();

    for (_entity, (aircraft, brain)) in world.query_mut::<(&Aircraft, &mut EnemyBrain)>() {
        let AircraftKind::Enemy(kind) = aircraft.kind else {
            continue;
        };
        let detected = is_detected(aircraft, &get_profile(aircraft.kind), player, weather);

        if detected != brain.detected {
            changes.push((brain.id, detected));
        }
        brain.detected = detected;

        if is_aware(&get_behavior(kind), detected) {
            brain.last_known_player = Some(player.position);
            brain.turns_undetected = 0;
        } else {
            brain.turns_undetected += 1;
        }
    }

    // hecs iteration order is not roster order.
    changes.sort_by_key(|&(id, _)| id);
    for (enemy, detected) in changes {
        events.push(if detected {
            EngineEvent::ContactGained { enemy }
        } else {
            EngineEvent::ContactLost { enemy }
        });
    }
}
