//! Tests for the simulation engine: turn flow, combat, fuel, terminal states
//! and persistence.

use jetstrike_core::commands::PlayerCommand;
use jetstrike_core::components::AircraftId;
use jetstrike_core::enums::*;
use jetstrike_core::events::{Actor, EngineEvent};
use jetstrike_core::types::{Direction, Position};
use jetstrike_grid::TerrainGrid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use crate::error::{EngineError, Result};
use crate::persistence::SaveData;
use crate::systems::coordinated;

/// Default engine with bare terrain, the player at `player` and a hand-placed roster.
fn staged(player: Position, enemies: &[(EnemyKind, Position)]) -> (SimulationEngine, Vec<AircraftId>) {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.grid = TerrainGrid::new(10);
    engine.clear_enemies();
    engine.player_mut().position = player;
    engine.set_weather(WeatherCondition::Clear);
    let ids = enemies
        .iter()
        .map(|&(kind, pos)| engine.spawn_test_enemy(kind, pos))
        .collect();
    (engine, ids)
}

fn outcome_json(result: Result<Vec<EngineEvent>>) -> String {
    match result {
        Ok(events) => serde_json::to_string(&events).unwrap(),
        Err(e) => e.to_string(),
    }
}

fn count<F: Fn(&EngineEvent) -> bool>(events: &[EngineEvent], pred: F) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

/// Scripted session: circle the compass, shoot whatever is engaged, end turn.
fn play_script(seed: u64, turns: usize) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap();
    let mut log = Vec::new();
    for turn in 0..turns {
        log.push(outcome_json(engine.apply_player_move(Direction::ALL[turn % 8])));
        if let Some(target) = engine.pending_combat() {
            log.push(outcome_json(
                engine.resolve_player_action(CombatAction::FireGun, target),
            ));
        }
        log.push(outcome_json(engine.tick_enemies()));
        log.push(serde_json::to_string(&engine.snapshot()).unwrap());
    }
    log
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let a = play_script(12345, 40);
    let b = play_script(12345, 40);
    assert_eq!(a, b, "Sessions diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    let a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();
    assert_ne!(
        a.save().to_json().unwrap(),
        b.save().to_json().unwrap(),
        "Different seeds should produce different worlds"
    );
}

// ---- Configuration ----

#[test]
fn test_config_validation() {
    let tiny = SimConfig {
        grid_size: 1,
        ..Default::default()
    };
    assert!(matches!(
        SimulationEngine::new(tiny),
        Err(EngineError::InvalidConfig(_))
    ));

    let empty = SimConfig {
        enemies: Vec::new(),
        ..Default::default()
    };
    assert!(matches!(empty.validate(), Err(EngineError::InvalidConfig(_))));

    // 1 player + 3 enemies + base + tanker on 4 cells.
    let crowded = SimConfig {
        grid_size: 2,
        ..Default::default()
    };
    assert!(matches!(crowded.validate(), Err(EngineError::InvalidConfig(_))));
}

#[test]
fn test_oversized_grid_rejected() {
    assert!(matches!(
        SimConfig::from_json(r#"{ "grid_size": 50000 }"#),
        Err(EngineError::InvalidConfig(_))
    ));

    let huge = SimConfig {
        grid_size: 65,
        ..Default::default()
    };
    assert!(matches!(
        SimulationEngine::new(huge),
        Err(EngineError::InvalidConfig(_))
    ));

    let largest = SimConfig {
        grid_size: 64,
        ..Default::default()
    };
    assert_eq!(SimulationEngine::new(largest).unwrap().grid().size(), 64);
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config = SimConfig::from_json(r#"{ "seed": 7, "enemies": ["F16"] }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.grid_size, 10);
    assert_eq!(config.enemies, vec![EnemyKind::F16]);

    assert!(matches!(
        SimConfig::from_json("{ not json"),
        Err(EngineError::Json(_))
    ));
}

#[test]
fn test_new_engine_starts_playing() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();
    assert_eq!(engine.state(), SimulationState::Playing);
    assert_eq!(engine.outcome(), None);
    assert_eq!(engine.turn(), 0);
    assert_eq!(engine.enemy_ids(), vec![AircraftId(0), AircraftId(1), AircraftId(2)]);

    let snap = engine.snapshot();
    assert_eq!(snap.score.enemies_remaining, 3);
    assert_eq!(snap.player.altitude, 1);
    assert_eq!(snap.player.fuel, snap.player.max_fuel);
}

// ---- Player movement ----

#[test]
fn test_move_charges_fuel_and_turns() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);
    let fuel = engine.player().fuel;

    // Straight ahead: base cost only.
    let events = engine.apply_player_move(Direction::N).unwrap();
    assert_eq!(
        events[0],
        EngineEvent::PlayerMoved {
            from: Position::new(5, 5),
            to: Position::new(4, 5),
            fuel_spent: 1,
        }
    );
    assert_eq!(engine.player().fuel, fuel - 1);

    // Reversal exceeds the turn rate: turn surcharge.
    let events = engine.apply_player_move(Direction::S).unwrap();
    assert!(matches!(
        events[0],
        EngineEvent::PlayerMoved { fuel_spent: 2, .. }
    ));
    assert_eq!(engine.player().heading, Direction::S);
    assert_eq!(engine.player().position, Position::new(5, 5));
}

#[test]
fn test_move_off_grid_rejected_without_side_effects() {
    let (mut engine, _) = staged(Position::new(0, 0), &[(EnemyKind::F16, Position::new(9, 9))]);
    let before = engine.save();

    let err = engine.apply_player_move(Direction::N).unwrap_err();
    assert!(matches!(err, EngineError::OffGrid { direction: Direction::N, .. }));
    assert!(engine.apply_player_move(Direction::NW).is_err());
    assert_eq!(engine.save(), before, "A rejected move must change nothing");
}

#[test]
fn test_move_token_parsing() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(9, 9))]);

    assert!(matches!(
        engine.apply_player_move_token("up"),
        Err(EngineError::Parse(_))
    ));
    engine.apply_player_move_token("south-east").unwrap();
    assert_eq!(engine.player().position, Position::new(6, 6));
}

#[test]
fn test_move_into_enemy_engages() {
    let (mut engine, ids) = staged(Position::new(5, 4), &[(EnemyKind::F16, Position::new(5, 5))]);

    let events = engine.apply_player_move(Direction::E).unwrap();
    assert!(events.contains(&EngineEvent::CombatEngaged {
        enemy: ids[0],
        initiated_by_player: true,
    }));
    assert_eq!(engine.pending_combat(), Some(ids[0]));

    // Flying away breaks off the engagement.
    engine.apply_player_move(Direction::W).unwrap();
    assert_eq!(engine.pending_combat(), None);
}

// ---- Fuel ----

#[test]
fn test_last_unit_of_fuel_forces_descent_once() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);
    engine.player_mut().fuel = 1;

    let events = engine.apply_player_move(Direction::N).unwrap();
    let exhausted = count(&events, |e| {
        matches!(e, EngineEvent::FuelExhausted { aircraft: Actor::Player })
    });
    assert_eq!(exhausted, 1);
    assert!(events.contains(&EngineEvent::ForcedDescent {
        aircraft: Actor::Player,
        altitude: 0,
    }));
    assert_eq!(engine.player().fuel, 0);
    assert_eq!(engine.player().altitude, 0);
    assert_eq!(engine.player().health, engine.player().max_health);
}

#[test]
fn test_dry_landing_damages_player() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);
    engine.player_mut().fuel = 0;
    engine.player_mut().altitude = 0;
    let health = engine.player().health;

    let events = engine.apply_player_move(Direction::N).unwrap();
    assert!(events.contains(&EngineEvent::CrashLanding {
        aircraft: Actor::Player,
        damage: 2,
    }));
    assert_eq!(engine.player().health, health - 2);
}

#[test]
fn test_dry_landing_on_base_refuels() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);
    engine.grid.set_terrain(Position::new(4, 5), Terrain::Base);
    engine.player_mut().fuel = 0;
    engine.player_mut().altitude = 0;

    let events = engine.apply_player_move(Direction::N).unwrap();
    assert!(events.contains(&EngineEvent::EmergencyRefuel { amount: 30 }));
    assert_eq!(engine.player().fuel, 30);
}

#[test]
fn test_fuel_starved_enemy_is_removed() {
    let (mut engine, ids) = staged(
        Position::new(0, 0),
        &[
            (EnemyKind::F16, Position::new(9, 9)),
            (EnemyKind::Su27, Position::new(9, 0)),
        ],
    );
    engine.with_enemy(ids[0], |a| {
        a.fuel = 0;
        a.altitude = 0;
    });

    let events = engine.tick_enemies().unwrap();
    assert!(events.contains(&EngineEvent::EnemyDestroyed {
        enemy: ids[0],
        kind: EnemyKind::F16,
        cause: DestructionCause::FuelStarvation,
        score: 0,
    }));
    assert!(engine.enemy(ids[0]).is_none());
    assert_eq!(engine.pilot().score, 0);
    assert_eq!(engine.enemy_ids(), vec![ids[1]]);
}

// ---- Non-movement actions ----

#[test]
fn test_refuel_at_base_and_tanker() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);

    engine.player_mut().fuel = 10;
    let events = engine.apply_player_action(PlayerAction::Refuel).unwrap();
    assert_eq!(
        events,
        vec![EngineEvent::ActionUnavailable {
            reason: Unavailable::NoFuelSource
        }]
    );
    assert_eq!(engine.player().fuel, 10);

    engine.grid.set_terrain(Position::new(6, 6), Terrain::Tanker);
    let events = engine.apply_player_action(PlayerAction::Refuel).unwrap();
    assert_eq!(
        events,
        vec![EngineEvent::Refueled {
            source: RefuelSource::Tanker,
            amount: 60,
        }]
    );

    engine.grid.set_terrain(Position::new(5, 5), Terrain::Base);
    engine.apply_player_action(PlayerAction::Refuel).unwrap();
    assert_eq!(engine.player().fuel, engine.player().max_fuel);
}

#[test]
fn test_altitude_limits() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);

    engine.player_mut().altitude = 3;
    let fuel = engine.player().fuel;
    let events = engine.apply_player_action(PlayerAction::Climb).unwrap();
    assert_eq!(
        events,
        vec![EngineEvent::ActionUnavailable {
            reason: Unavailable::AtCeiling
        }]
    );
    assert_eq!(engine.player().fuel, fuel, "No charge for a refused climb");

    engine.player_mut().altitude = 0;
    let events = engine.apply_player_action(PlayerAction::Descend).unwrap();
    assert_eq!(
        events,
        vec![EngineEvent::ActionUnavailable {
            reason: Unavailable::AtFloor
        }]
    );

    let events = engine.apply_player_action(PlayerAction::Climb).unwrap();
    assert!(events.contains(&EngineEvent::AltitudeChanged {
        aircraft: Actor::Player,
        altitude: 1,
    }));
    assert!(engine.player().fuel < fuel);
}

#[test]
fn test_afterburner_toggle() {
    let (mut engine, _) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(0, 9))]);

    let events = engine
        .submit(PlayerCommand::Action {
            action: PlayerAction::ToggleAfterburner,
        })
        .unwrap();
    assert_eq!(events, vec![EngineEvent::AfterburnerToggled { engaged: true }]);
    assert_eq!(engine.player().velocity, engine.player().max_velocity);

    // Afterburner doubles the cost of a straight move at high speed: (1 + 1) * 2.
    let events = engine.apply_player_move(Direction::N).unwrap();
    assert!(matches!(
        events[0],
        EngineEvent::PlayerMoved { fuel_spent: 4, .. }
    ));

    engine.apply_player_action(PlayerAction::ToggleAfterburner).unwrap();
    assert!(!engine.player().afterburner);
    assert!(engine.player().velocity < engine.player().max_velocity);
}

// ---- Combat ----

#[test]
fn test_combat_target_errors() {
    let (mut engine, ids) = staged(
        Position::new(0, 0),
        &[
            (EnemyKind::F16, Position::new(0, 0)),
            (EnemyKind::F22, Position::new(9, 9)),
        ],
    );

    assert!(matches!(
        engine.resolve_player_action(CombatAction::FireGun, ids[0]),
        Err(EngineError::NoCombatPending)
    ));

    engine.pending_combat = Some(ids[0]);
    assert!(matches!(
        engine.resolve_player_action(CombatAction::FireGun, AircraftId(99)),
        Err(EngineError::TargetNotFound(AircraftId(99)))
    ));
    // A stealthy F-22 across the board is not on radar.
    assert!(matches!(
        engine.resolve_player_action(CombatAction::FireMissile, ids[1]),
        Err(EngineError::TargetNotDetected(_))
    ));
    assert_eq!(engine.player().missiles, 6, "Rejected shots spend nothing");
}

#[test]
fn test_evade_breaks_off_without_counterattack() {
    let (mut engine, ids) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(5, 5))]);
    engine.pending_combat = Some(ids[0]);
    let fuel = engine.player().fuel;

    let events = engine
        .resolve_player_action(CombatAction::Evade, ids[0])
        .unwrap();
    assert_eq!(events.len(), 1);
    let EngineEvent::Evaded { from, to } = events[0] else {
        panic!("expected Evaded, got {:?}", events[0]);
    };
    assert_eq!(from, Position::new(5, 5));
    assert_eq!(from.chebyshev_to(to), 1);
    assert_eq!(engine.player().position, to);
    assert_eq!(engine.pending_combat(), None);
    assert_eq!(engine.player().fuel, fuel - 2);
}

#[test]
fn test_weapon_empty() {
    let (mut engine, ids) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(5, 5))]);
    engine.pending_combat = Some(ids[0]);
    engine.player_mut().missiles = 0;

    let events = engine
        .resolve_player_action(CombatAction::FireMissile, ids[0])
        .unwrap();
    assert_eq!(
        events,
        vec![EngineEvent::WeaponEmpty {
            weapon: Weapon::Missile
        }]
    );
}

#[test]
fn test_victory_after_last_kill() {
    let (mut engine, ids) = staged(Position::new(5, 4), &[(EnemyKind::F16, Position::new(5, 5))]);
    engine.player_mut().health = 100_000;
    engine.player_mut().max_health = 100_000;
    engine.with_enemy(ids[0], |a| a.health = 1);
    engine.apply_player_move(Direction::E).unwrap();
    assert_eq!(engine.pending_combat(), Some(ids[0]));

    let mut shots = 0;
    while engine.state() == SimulationState::Playing && shots < 90 {
        let events = engine
            .submit(PlayerCommand::Engage {
                action: CombatAction::FireGun,
                target: ids[0],
            })
            .unwrap();
        shots += 1;
        if engine.state() == SimulationState::Victory {
            assert_eq!(events.last(), Some(&EngineEvent::Victory));
            assert!(events.contains(&EngineEvent::EnemyDestroyed {
                enemy: ids[0],
                kind: EnemyKind::F16,
                cause: DestructionCause::ShotDown,
                score: 100,
            }));
        }
    }

    assert_eq!(engine.state(), SimulationState::Victory);
    assert!(engine.outcome().is_some());
    assert_eq!(engine.pilot().score, 100);
    assert_eq!(engine.pilot().kills, 1);
    assert_eq!(engine.pending_combat(), None);
    assert_eq!(engine.snapshot().score.enemies_remaining, 0);

    assert!(matches!(
        engine.tick_enemies(),
        Err(EngineError::SimulationOver(SimulationState::Victory))
    ));
    assert!(engine.apply_player_move(Direction::N).is_err());
}

#[test]
fn test_defeat_stops_the_session() {
    let (mut engine, ids) = staged(Position::new(5, 5), &[(EnemyKind::F16, Position::new(5, 5))]);
    engine.player_mut().health = 1;
    engine.with_enemy(ids[0], |a| {
        a.health = 100_000;
        a.max_health = 100_000;
    });
    engine.pending_combat = Some(ids[0]);

    for _ in 0..40 {
        let events = engine
            .resolve_player_action(CombatAction::FireGun, ids[0])
            .unwrap();
        if engine.state() == SimulationState::Defeat {
            assert!(matches!(events.last(), Some(EngineEvent::Defeat { .. })));
            break;
        }
    }

    assert_eq!(engine.state(), SimulationState::Defeat);
    assert_eq!(engine.player().health, 0);
    assert!(engine.outcome().unwrap().contains("F-16"));
    assert!(matches!(
        engine.resolve_player_action(CombatAction::FireGun, ids[0]),
        Err(EngineError::SimulationOver(SimulationState::Defeat))
    ));
    assert!(engine.submit(PlayerCommand::EndTurn).is_err());
}

// ---- Coordinated attack ----

#[test]
fn test_coordinated_attack_needs_two_adjacent() {
    let (mut engine, _) = staged(
        Position::new(5, 5),
        &[
            (EnemyKind::F16, Position::new(4, 4)),
            (EnemyKind::F16, Position::new(8, 8)),
        ],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let mut player = engine.player().clone();

    assert!(!coordinated::run(engine.world(), &mut rng, &mut player, &mut events));
    assert!(events.is_empty());

    let second = engine.enemy_ids()[1];
    engine.with_enemy(second, |a| a.position = Position::new(4, 6));
    assert!(coordinated::run(engine.world(), &mut rng, &mut player, &mut events));

    assert_eq!(events.len(), 1);
    let EngineEvent::CoordinatedAttack {
        attackers, damage, ..
    } = &events[0]
    else {
        panic!("expected CoordinatedAttack, got {:?}", events[0]);
    };
    assert_eq!(attackers.len(), 2);
    // F-16 damage is 8..=15 per attacker, doubled on a critical.
    assert!((16..=60).contains(damage));
    assert_eq!(player.health, engine.player().health - damage);
}

#[test]
fn test_adjacent_pair_attacks_once_per_turn() {
    let (mut engine, ids) = staged(
        Position::new(5, 5),
        &[
            (EnemyKind::F16, Position::new(4, 4)),
            (EnemyKind::F16, Position::new(4, 6)),
        ],
    );
    engine.player_mut().health = 100_000;
    engine.player_mut().max_health = 100_000;
    let health = engine.player().health;

    // Both close in (or hold when the cell is taken) and stay within one cell.
    let events = engine.tick_enemies().unwrap();
    let attacks: Vec<(&Vec<AircraftId>, u32)> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::CoordinatedAttack {
                attackers, damage, ..
            } => Some((attackers, *damage)),
            _ => None,
        })
        .collect();
    assert_eq!(attacks.len(), 1);
    let (attackers, coordinated_damage) = attacks[0];
    assert_eq!(attackers, &ids);

    let strike_damage: u32 = events
        .iter()
        .map(|e| match e {
            EngineEvent::EnemyStrike { damage, .. } => *damage,
            _ => 0,
        })
        .sum();
    assert_eq!(engine.player().health, health - strike_damage - coordinated_damage);
}

#[test]
fn test_defeat_aborts_remaining_enemy_turns() {
    let mut aborted_early = 0;
    for seed in 0..20 {
        let (mut engine, ids) = staged(
            Position::new(5, 5),
            &[
                (EnemyKind::F16, Position::new(5, 5)),
                (EnemyKind::F16, Position::new(5, 5)),
            ],
        );
        engine.rng = ChaCha8Rng::seed_from_u64(seed);
        engine.player_mut().health = 1;

        // A missed strike pair still ends in a coordinated attack.
        let events = engine.tick_enemies().unwrap();
        assert_eq!(engine.state(), SimulationState::Defeat);
        assert!(matches!(events.last(), Some(EngineEvent::Defeat { .. })));
        assert_eq!(count(&events, |e| matches!(e, EngineEvent::Defeat { .. })), 1);

        let first_strike_hit = events.iter().any(|e| {
            matches!(e, EngineEvent::EnemyStrike { enemy, hit: true, .. } if *enemy == ids[0])
        });
        if !first_strike_hit {
            continue;
        }
        aborted_early += 1;
        let second_acted = events.iter().any(|e| match e {
            EngineEvent::EnemyMoved { enemy, .. }
            | EngineEvent::EnemyStateChanged { enemy, .. }
            | EngineEvent::EnemyStrike { enemy, .. } => *enemy == ids[1],
            _ => false,
        });
        assert!(!second_acted, "enemy {} acted after the player went down", ids[1]);
        assert_eq!(
            count(&events, |e| matches!(e, EngineEvent::CoordinatedAttack { .. })),
            0
        );
    }
    assert!(aborted_early > 0, "no seed downed the player on the first strike");
}

// ---- Enemy turns ----

#[test]
fn test_tick_advances_turn_and_acts_in_roster_order() {
    let (mut engine, ids) = staged(
        Position::new(5, 5),
        &[
            (EnemyKind::Su27, Position::new(1, 1)),
            (EnemyKind::F16, Position::new(9, 9)),
        ],
    );
    engine.player_mut().health = 100_000;
    engine.player_mut().max_health = 100_000;

    let events = engine.tick_enemies().unwrap();
    assert_eq!(engine.turn(), 1);

    // Events about the second enemy never precede events about the first.
    let actors: Vec<AircraftId> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::EnemyStateChanged { enemy, .. } | EngineEvent::EnemyMoved { enemy, .. } => {
                Some(*enemy)
            }
            _ => None,
        })
        .collect();
    let mut sorted = actors.clone();
    sorted.sort();
    assert_eq!(actors, sorted);
    // Both are aware of the player (the F-16 via ground control) and give chase.
    assert_eq!(engine.enemy(ids[1]).unwrap().1.state, AiState::Chasing);
}

#[test]
fn test_snapshot_hides_undetected_enemies() {
    let (engine, ids) = staged(
        Position::new(0, 0),
        &[
            (EnemyKind::F16, Position::new(1, 1)),
            (EnemyKind::F22, Position::new(9, 9)),
        ],
    );
    let snap = engine.snapshot();
    assert_eq!(snap.score.enemies_remaining, 2);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].id, ids[0]);
    assert_eq!(snap.cells[1][1], CellMarker::Enemy);
    assert_eq!(snap.cells[9][9], CellMarker::Empty);
    assert_eq!(snap.cells[0][0], CellMarker::Player);
}

// ---- Persistence ----

#[test]
fn test_save_restore_round_trip() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        ..Default::default()
    })
    .unwrap();
    for turn in 0..5 {
        let _ = engine.apply_player_move(Direction::ALL[turn * 3 % 8]);
        let _ = engine.tick_enemies();
    }

    let json = engine.save().to_json().unwrap();
    let loaded = SaveData::from_json(&json).unwrap();
    let restored = SimulationEngine::restore(loaded.clone()).unwrap();

    assert_eq!(restored.save(), loaded);
    assert_eq!(loaded.turn, 5);
    assert_eq!(loaded.enemies.len(), engine.enemy_ids().len());
    assert_eq!(
        serde_json::to_string(&restored.snapshot()).unwrap(),
        serde_json::to_string(&engine.snapshot()).unwrap()
    );
}

#[test]
fn test_restored_sessions_replay_identically() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let saved = engine.save();
    let mut a = SimulationEngine::restore(saved.clone()).unwrap();
    let mut b = SimulationEngine::restore(saved).unwrap();

    for _ in 0..10 {
        assert_eq!(outcome_json(a.tick_enemies()), outcome_json(b.tick_enemies()));
    }
}

#[test]
fn test_restore_rejects_corrupt_saves() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();

    let mut off_grid = engine.save();
    off_grid.player.position = Position::new(-1, 3);
    assert!(matches!(
        SimulationEngine::restore(off_grid),
        Err(EngineError::CorruptSave(_))
    ));

    let mut duplicate = engine.save();
    let first = duplicate.enemies[0].clone();
    duplicate.enemies.push(first);
    assert!(matches!(
        SimulationEngine::restore(duplicate),
        Err(EngineError::CorruptSave(_))
    ));

    let mut dangling = engine.save();
    dangling.pending_combat = Some(AircraftId(42));
    assert!(matches!(
        SimulationEngine::restore(dangling),
        Err(EngineError::CorruptSave(_))
    ));

    let mut oversized = engine.save();
    oversized.grid_size = 50_000;
    assert!(matches!(
        SimulationEngine::restore(oversized),
        Err(EngineError::CorruptSave(_))
    ));

    let mut wreck = engine.save();
    wreck.enemies[1].aircraft.health = 0;
    assert!(matches!(
        SimulationEngine::restore(wreck),
        Err(EngineError::CorruptSave(_))
    ));

    let mut deserted = engine.save();
    deserted.enemies.clear();
    assert!(matches!(
        SimulationEngine::restore(deserted),
        Err(EngineError::CorruptSave(_))
    ));
}
