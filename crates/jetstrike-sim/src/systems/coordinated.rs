//! Coordinated attack: enemies crowding the player strike together.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain};
use jetstrike_core::constants::{COORDINATED_ATTACK_MIN_ATTACKERS, COORDINATED_ATTACK_RANGE};
use jetstrike_core::events::EngineEvent;

use crate::systems::combat;

/// Sum one damage roll per enemy within range of the player and apply it as a
/// single hit. Returns whether the attack happened.
pub fn run(
    world: &World,
    rng: &mut ChaCha8Rng,
    player: &mut Aircraft,
    events: &mut Vec<EngineEvent>,
) -> bool {
    let mut attackers: Vec<(AircraftId, Aircraft)> = world
        .query::<(&Aircraft, &EnemyBrain)>()
        .iter()
        .filter(|(_, (a, _))| a.position.chebyshev_to(player.position) <= COORDINATED_ATTACK_RANGE)
        .map(|(_, (a, b))| (b.id, a.clone()))
        .collect();
    if attackers.len() < COORDINATED_ATTACK_MIN_ATTACKERS {
        return false;
    }
    attackers.sort_by_key(|(id, _)| *id);

    let mut damage = 0;
    let mut criticals = 0;
    for (_, attacker) in &attackers {
        let (share, critical) = combat::coordinated_share(rng, attacker);
        damage += share;
        if critical {
            criticals += 1;
        }
    }
    player.health = player.health.saturating_sub(damage);

    tracing::debug!(
        "Coordinated attack by {} aircraft: {} damage",
        attackers.len(),
        damage
    );
    events.push(EngineEvent::CoordinatedAttack {
        attackers: attackers.into_iter().map(|(id, _)| id).collect(),
        damage,
        criticals,
    });
    true
}
