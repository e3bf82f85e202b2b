//! Cleanup system: removes enemies whose health reached zero outside combat.
//!
//! Shot-down enemies are removed by the combat resolver as they die; anything
//! left at zero health here went down for lack of fuel.

use hecs::{Entity, World};

use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain};
use jetstrike_core::enums::{AircraftKind, DestructionCause};
use jetstrike_core::events::EngineEvent;

/// Despawn destroyed enemies in roster order.
/// Uses a pre-allocated buffer to avoid per-turn allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<EngineEvent>) {
    despawn_buffer.clear();

    let mut destroyed: Vec<(AircraftId, Entity, AircraftKind)> = world
        .query::<(&Aircraft, &EnemyBrain)>()
        .iter()
        .filter(|(_, (a, _))| a.is_destroyed())
        .map(|(entity, (a, b))| (b.id, entity, a.kind))
        .collect();
    destroyed.sort_by_key(|&(id, _, _)| id);

    for (id, entity, kind) in destroyed {
        if let AircraftKind::Enemy(enemy_kind) = kind {
            tracing::info!("{} {} crashed after running out of fuel", kind, id);
            events.push(EngineEvent::EnemyDestroyed {
                enemy: id,
                kind: enemy_kind,
                cause: DestructionCause::FuelStarvation,
                score: 0,
            });
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
