//! Combat resolution: player shots, enemy strikes and kills.
//!
//! Helpers here roll dice and mutate the aircraft involved; the engine decides
//! when combat happens and turns outcomes into terminal state.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use jetstrike_ai::profiles::{get_behavior, get_profile, AttackProfile};
use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain, PilotRecord};
use jetstrike_core::constants::*;
use jetstrike_core::enums::{AircraftKind, DestructionCause, WeatherCondition, Weapon};
use jetstrike_core::events::EngineEvent;

/// Probability that a player shot hits, clamped to `[0, 1]`.
pub fn player_hit_chance(
    range: f64,
    evasion: f64,
    target_experience: u32,
    weather: WeatherCondition,
) -> f64 {
    let mut chance = BASE_HIT_CHANCE;
    if range > RANGE_BAND_NEAR {
        chance -= RANGE_BAND_PENALTY;
    }
    if range > RANGE_BAND_FAR {
        chance -= RANGE_BAND_PENALTY;
    }
    chance -= evasion;
    if target_experience >= VETERAN_EXPERIENCE {
        chance -= VETERAN_EVASION;
    }
    (chance * weather.accuracy_modifier()).clamp(0.0, 1.0)
}

/// Whether the player has any ammunition for `weapon`.
pub fn has_ammo(player: &Aircraft, weapon: Weapon) -> bool {
    match weapon {
        Weapon::Missile => player.missiles > 0,
        Weapon::Gun => player.gun_rounds > 0,
    }
}

/// Outcome of one player shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub hit_chance: f64,
    pub hit: bool,
    pub damage: u32,
}

/// Fire one shot at `target`: roll, apply damage, spend ammunition.
///
/// The caller has already checked [`has_ammo`].
pub fn player_fire(
    rng: &mut ChaCha8Rng,
    player: &mut Aircraft,
    pilot: &PilotRecord,
    target: &mut Aircraft,
    weapon: Weapon,
    weather: WeatherCondition,
) -> Shot {
    let evasion = get_profile(target.kind).evasion(target.stealth_mode);
    let hit_chance = player_hit_chance(
        player.position.range_to(target.position),
        evasion,
        target.combat_experience,
        weather,
    );
    let hit = rng.gen::<f64>() < hit_chance;

    let mut damage = 0;
    if hit {
        let base = match weapon {
            Weapon::Missile => rng.gen_range(MISSILE_DAMAGE_MIN..=MISSILE_DAMAGE_MAX),
            Weapon::Gun => rng.gen_range(GUN_DAMAGE_MIN..=GUN_DAMAGE_MAX),
        };
        damage = (base as f64 * pilot.damage_multiplier).round() as u32;
        target.health = target.health.saturating_sub(damage);
    }

    match weapon {
        Weapon::Missile => player.missiles = player.missiles.saturating_sub(1),
        Weapon::Gun => {
            let rounds = if hit {
                GUN_ROUNDS_PER_HIT
            } else {
                GUN_ROUNDS_PER_MISS
            };
            player.gun_rounds = player.gun_rounds.saturating_sub(rounds);
        }
    }

    Shot {
        hit_chance,
        hit,
        damage,
    }
}

/// Outcome of one enemy attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub hit: bool,
    pub damage: u32,
    pub critical: bool,
}

/// Roll class damage, doubled on a critical.
fn roll_damage(rng: &mut ChaCha8Rng, attack: &AttackProfile, experience: u32) -> (u32, bool) {
    let damage = rng.gen_range(attack.damage_min..=attack.damage_max);
    let critical = rng.gen::<f64>() < attack.critical_chance(experience);
    if critical {
        (damage * 2, true)
    } else {
        (damage, false)
    }
}

/// Enemy counterattack or contact strike against the player.
///
/// A hit is applied to the player and earns the enemy one combat experience.
pub fn enemy_strike(
    rng: &mut ChaCha8Rng,
    enemy: &mut Aircraft,
    player: &mut Aircraft,
    weather: WeatherCondition,
) -> Strike {
    let AircraftKind::Enemy(kind) = enemy.kind else {
        return Strike {
            hit: false,
            damage: 0,
            critical: false,
        };
    };
    let attack = get_behavior(kind).attack;
    let chance = attack.hit_chance(enemy.combat_experience) * weather.accuracy_modifier();
    if rng.gen::<f64>() >= chance {
        return Strike {
            hit: false,
            damage: 0,
            critical: false,
        };
    }

    let (damage, critical) = roll_damage(rng, &attack, enemy.combat_experience);
    player.health = player.health.saturating_sub(damage);
    enemy.combat_experience = (enemy.combat_experience + 1).min(MAX_COMBAT_EXPERIENCE);
    Strike {
        hit: true,
        damage,
        critical,
    }
}

/// One attacker's contribution to a coordinated attack: no hit roll, own crit roll.
pub fn coordinated_share(rng: &mut ChaCha8Rng, enemy: &Aircraft) -> (u32, bool) {
    match enemy.kind {
        AircraftKind::Enemy(kind) => {
            roll_damage(rng, &get_behavior(kind).attack, enemy.combat_experience)
        }
        AircraftKind::Player(_) => (0, false),
    }
}

/// Remove a shot-down enemy, credit the pilot and roll for a power-up.
pub fn award_kill(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    pilot: &mut PilotRecord,
    events: &mut Vec<EngineEvent>,
) {
    let Ok((aircraft, brain)) = world.remove::<(Aircraft, EnemyBrain)>(entity) else {
        return;
    };
    let _ = world.despawn(entity);
    let AircraftKind::Enemy(kind) = aircraft.kind else {
        return;
    };

    pilot.score += brain.score_value;
    pilot.kills += 1;
    tracing::info!(
        "{} {} shot down (+{} points)",
        aircraft.kind,
        brain.id,
        brain.score_value
    );
    events.push(EngineEvent::EnemyDestroyed {
        enemy: brain.id,
        kind,
        cause: DestructionCause::ShotDown,
        score: brain.score_value,
    });

    if rng.gen::<f64>() < POWER_UP_CHANCE {
        pilot.power_ups += 1;
        pilot.damage_multiplier += POWER_UP_INCREMENT;
        tracing::info!("Power-up: damage multiplier now {:.2}", pilot.damage_multiplier);
        events.push(EngineEvent::PowerUp {
            damage_multiplier: pilot.damage_multiplier,
        });
    }
}

/// Find the entity carrying roster id `id`.
pub fn find_enemy(world: &World, id: AircraftId) -> Option<Entity> {
    world
        .query::<&EnemyBrain>()
        .iter()
        .find(|(_, brain)| brain.id == id)
        .map(|(entity, _)| entity)
}
