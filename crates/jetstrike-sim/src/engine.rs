//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, validates and applies player
//! turns, runs the enemy phase, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use jetstrike_ai::profiles::get_profile;
use jetstrike_core::commands::PlayerCommand;
use jetstrike_core::components::{Aircraft, AircraftId, EnemyBrain, PilotRecord};
use jetstrike_core::enums::*;
use jetstrike_core::events::{Actor, EngineEvent};
use jetstrike_core::state::GameStateSnapshot;
use jetstrike_core::types::{Direction, Position};
use jetstrike_grid::TerrainGrid;

use crate::config::SimConfig;
use crate::error::{EngineError, Result};
use crate::systems;
use crate::systems::resources::{self, OutOfFuel};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    pub(crate) world: World,
    pub(crate) grid: TerrainGrid,
    pub(crate) player: Aircraft,
    pub(crate) pilot: PilotRecord,
    pub(crate) seed: u64,
    pub(crate) turn: u64,
    pub(crate) state: SimulationState,
    pub(crate) outcome: Option<String>,
    pub(crate) weather: WeatherCondition,
    /// Enemy currently engaged with the player.
    pub(crate) pending_combat: Option<AircraftId>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let setup = world_setup::setup_world(&mut world, &mut rng, &config)?;

        let mut engine = Self {
            world,
            grid: setup.grid,
            player: setup.player,
            pilot: PilotRecord::default(),
            seed: config.seed,
            turn: 0,
            state: SimulationState::Playing,
            outcome: None,
            weather: WeatherCondition::default(),
            pending_combat: None,
            rng,
            despawn_buffer: Vec::new(),
        };
        // Initial radar picture; nothing has been "gained" yet.
        systems::detection::run(&mut engine.world, &engine.player, engine.weather, &mut Vec::new());
        Ok(engine)
    }

    // ---- Queries ----

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Human-readable reason once the session is over.
    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn weather(&self) -> WeatherCondition {
        self.weather
    }

    pub fn player(&self) -> &Aircraft {
        &self.player
    }

    pub fn pilot(&self) -> &PilotRecord {
        &self.pilot
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn pending_combat(&self) -> Option<AircraftId> {
        self.pending_combat
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Live enemy ids in roster order.
    pub fn enemy_ids(&self) -> Vec<AircraftId> {
        self.roster().into_iter().map(|(_, id)| id).collect()
    }

    /// Copy of one enemy's components.
    pub fn enemy(&self, id: AircraftId) -> Option<(Aircraft, EnemyBrain)> {
        let entity = systems::combat::find_enemy(&self.world, id)?;
        let aircraft = (*self.world.get::<&Aircraft>(entity).ok()?).clone();
        let brain = (*self.world.get::<&EnemyBrain>(entity).ok()?).clone();
        Some((aircraft, brain))
    }

    /// Build the player-facing view of the current state.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.grid,
            &self.player,
            &self.pilot,
            self.turn,
            self.state,
            self.outcome(),
            self.weather,
            self.pending_combat,
        )
    }

    // ---- Commands ----

    /// Dispatch a serialized player command.
    pub fn submit(&mut self, command: PlayerCommand) -> Result<Vec<EngineEvent>> {
        match command {
            PlayerCommand::Move { direction } => self.apply_player_move(direction),
            PlayerCommand::Action { action } => self.apply_player_action(action),
            PlayerCommand::Engage { action, target } => self.resolve_player_action(action, target),
            PlayerCommand::EndTurn => self.tick_enemies(),
        }
    }

    /// Parse a compass token (`"n"`, `"south-east"`, ...) and move.
    pub fn apply_player_move_token(&mut self, token: &str) -> Result<Vec<EngineEvent>> {
        let direction: Direction = token.parse()?;
        self.apply_player_move(direction)
    }

    /// Fly the player one cell. Breaks off any pending combat, then checks
    /// for contact in the new cell.
    pub fn apply_player_move(&mut self, direction: Direction) -> Result<Vec<EngineEvent>> {
        self.ensure_playing()?;
        let from = self.player.position;
        let to = from.step(direction);
        if !self.grid.in_bounds(to) {
            return Err(EngineError::OffGrid { from, direction });
        }

        let mut events = Vec::new();
        self.pending_combat = None;

        let maneuver = if self.player.heading.steps_to(direction) > self.player.turn_rate {
            Maneuver::Turn
        } else {
            Maneuver::Regular
        };
        let surcharges = get_profile(self.player.kind).fuel;
        let report = resources::fly(&mut self.player, maneuver, &surcharges);
        self.player.position = to;
        self.player.heading = direction;
        events.push(EngineEvent::PlayerMoved {
            from,
            to,
            fuel_spent: report.spent,
        });
        if report.exhausted {
            self.player_out_of_fuel(&mut events);
        }
        if self.check_defeat("Crash-landed after running out of fuel", &mut events) {
            return Ok(events);
        }

        // Contact: first enemy in roster order sharing the new cell.
        let contact = self
            .roster()
            .into_iter()
            .find(|&(entity, _)| {
                self.world
                    .get::<&Aircraft>(entity)
                    .is_ok_and(|a| a.position == to)
            })
            .map(|(_, id)| id);
        if let Some(enemy) = contact {
            self.pending_combat = Some(enemy);
            events.push(EngineEvent::CombatEngaged {
                enemy,
                initiated_by_player: true,
            });
        }
        Ok(events)
    }

    /// Non-movement turn: refuel, afterburner, climb or descend.
    pub fn apply_player_action(&mut self, action: PlayerAction) -> Result<Vec<EngineEvent>> {
        self.ensure_playing()?;
        let mut events = Vec::new();

        match action {
            PlayerAction::Refuel => match resources::refuel(&mut self.player, &self.grid) {
                Some((source, amount)) => events.push(EngineEvent::Refueled { source, amount }),
                None => events.push(EngineEvent::ActionUnavailable {
                    reason: Unavailable::NoFuelSource,
                }),
            },
            PlayerAction::ToggleAfterburner => {
                self.player.afterburner = !self.player.afterburner;
                resources::set_throttle(&mut self.player, Maneuver::Regular);
                events.push(EngineEvent::AfterburnerToggled {
                    engaged: self.player.afterburner,
                });
            }
            PlayerAction::Climb => {
                let surcharges = get_profile(self.player.kind).fuel;
                match resources::climb(&mut self.player, &surcharges) {
                    Some(report) => {
                        events.push(EngineEvent::AltitudeChanged {
                            aircraft: Actor::Player,
                            altitude: self.player.altitude,
                        });
                        if report.exhausted {
                            self.player_out_of_fuel(&mut events);
                            self.check_defeat("Crash-landed after running out of fuel", &mut events);
                        }
                    }
                    None => events.push(EngineEvent::ActionUnavailable {
                        reason: Unavailable::AtCeiling,
                    }),
                }
            }
            PlayerAction::Descend => {
                if resources::descend(&mut self.player) {
                    events.push(EngineEvent::AltitudeChanged {
                        aircraft: Actor::Player,
                        altitude: self.player.altitude,
                    });
                } else {
                    events.push(EngineEvent::ActionUnavailable {
                        reason: Unavailable::AtFloor,
                    });
                }
            }
        }
        Ok(events)
    }

    /// Fire at or evade `target` while combat is pending.
    ///
    /// The target must be the engaged enemy or one on radar.
    pub fn resolve_player_action(
        &mut self,
        action: CombatAction,
        target: AircraftId,
    ) -> Result<Vec<EngineEvent>> {
        self.ensure_playing()?;
        let engaged = self.pending_combat.ok_or(EngineError::NoCombatPending)?;
        let entity = systems::combat::find_enemy(&self.world, target)
            .ok_or(EngineError::TargetNotFound(target))?;
        let detected = self
            .world
            .get::<&EnemyBrain>(entity)
            .is_ok_and(|b| b.detected);
        if target != engaged && !detected {
            return Err(EngineError::TargetNotDetected(target));
        }

        let mut events = Vec::new();
        let Some(weapon) = action.weapon() else {
            self.evade(&mut events);
            return Ok(events);
        };

        if !systems::combat::has_ammo(&self.player, weapon) {
            events.push(EngineEvent::WeaponEmpty { weapon });
            return Ok(events);
        }

        let Ok(mut enemy) = self.world.get::<&Aircraft>(entity).map(|a| (*a).clone()) else {
            return Err(EngineError::TargetNotFound(target));
        };
        let shot = systems::combat::player_fire(
            &mut self.rng,
            &mut self.player,
            &self.pilot,
            &mut enemy,
            weapon,
            self.weather,
        );
        events.push(EngineEvent::ShotFired {
            weapon,
            target,
            hit_chance: shot.hit_chance,
            hit: shot.hit,
            damage: shot.damage,
        });

        if enemy.is_destroyed() {
            systems::combat::award_kill(
                &mut self.world,
                &mut self.rng,
                entity,
                &mut self.pilot,
                &mut events,
            );
            if self.pending_combat == Some(target) {
                self.pending_combat = None;
            }
            self.check_victory(&mut events);
            return Ok(events);
        }

        // Counterattack.
        let strike =
            systems::combat::enemy_strike(&mut self.rng, &mut enemy, &mut self.player, self.weather);
        events.push(EngineEvent::EnemyStrike {
            enemy: target,
            hit: strike.hit,
            damage: strike.damage,
            critical: strike.critical,
        });
        let killer = enemy.kind;
        if let Ok(mut a) = self.world.get::<&mut Aircraft>(entity) {
            *a = enemy;
        }
        self.check_defeat(&format!("Shot down by {killer}"), &mut events);
        Ok(events)
    }

    /// Run the enemy phase: weather, detection, every enemy in roster order,
    /// the coordinated-attack check, then advance the turn counter.
    pub fn tick_enemies(&mut self) -> Result<Vec<EngineEvent>> {
        self.ensure_playing()?;
        let mut events = Vec::new();

        systems::weather::run(&mut self.rng, &mut self.weather, &mut events);
        systems::detection::run(&mut self.world, &self.player, self.weather, &mut events);

        for (entity, _id) in self.roster() {
            if !self.world.contains(entity) {
                continue;
            }
            let kind = self.world.get::<&Aircraft>(entity).map(|a| a.kind).ok();
            systems::enemy_ai::run(
                &mut self.world,
                &mut self.rng,
                entity,
                &self.grid,
                &mut self.player,
                self.weather,
                &mut self.pending_combat,
                &mut events,
            );
            self.remove_destroyed(&mut events);

            let reason = match kind {
                Some(kind) => format!("Shot down by {kind}"),
                None => "Shot down".to_string(),
            };
            if self.check_defeat(&reason, &mut events) || self.check_victory(&mut events) {
                self.turn += 1;
                return Ok(events);
            }
        }

        systems::coordinated::run(&self.world, &mut self.rng, &mut self.player, &mut events);
        self.check_defeat("Overwhelmed by a coordinated attack", &mut events);

        self.turn += 1;
        Ok(events)
    }

    // ---- Internals ----

    /// Live enemies sorted by roster id.
    fn roster(&self) -> Vec<(Entity, AircraftId)> {
        let mut roster: Vec<(Entity, AircraftId)> = self
            .world
            .query::<&EnemyBrain>()
            .iter()
            .map(|(entity, brain)| (entity, brain.id))
            .collect();
        roster.sort_by_key(|&(_, id)| id);
        roster
    }

    fn ensure_playing(&self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(EngineError::SimulationOver(self.state));
        }
        Ok(())
    }

    fn evade(&mut self, events: &mut Vec<EngineEvent>) {
        let from = self.player.position;
        let surcharges = get_profile(self.player.kind).fuel;
        let report = resources::fly(&mut self.player, Maneuver::Turn, &surcharges);

        let enemy_cells: Vec<Position> = self
            .world
            .query::<(&Aircraft, &EnemyBrain)>()
            .iter()
            .map(|(_, (a, _))| a.position)
            .collect();
        let options: Vec<Position> = self
            .grid
            .neighbors(from)
            .filter(|p| !enemy_cells.contains(p))
            .collect();
        let to = options.choose(&mut self.rng).copied().unwrap_or(from);
        if let Some(heading) = Direction::from_delta(from.delta_to(to)) {
            self.player.heading = heading;
        }
        self.player.position = to;
        self.pending_combat = None;
        events.push(EngineEvent::Evaded { from, to });

        if report.exhausted {
            self.player_out_of_fuel(events);
            self.check_defeat("Crash-landed after running out of fuel", events);
        }
    }

    fn player_out_of_fuel(&mut self, events: &mut Vec<EngineEvent>) {
        tracing::debug!("Player is out of fuel at {}", self.player.position);
        events.push(EngineEvent::FuelExhausted {
            aircraft: Actor::Player,
        });
        let over_base = self.grid.terrain_at(self.player.position) == Terrain::Base;
        match resources::handle_player_out_of_fuel(&mut self.player, over_base) {
            OutOfFuel::ForcedDescent { altitude } => events.push(EngineEvent::ForcedDescent {
                aircraft: Actor::Player,
                altitude,
            }),
            OutOfFuel::EmergencyRefuel { amount } => {
                events.push(EngineEvent::EmergencyRefuel { amount })
            }
            OutOfFuel::CrashLanding { damage } => events.push(EngineEvent::CrashLanding {
                aircraft: Actor::Player,
                damage,
            }),
            OutOfFuel::Crashed => {}
        }
    }

    fn remove_destroyed(&mut self, events: &mut Vec<EngineEvent>) {
        let before = events.len();
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, events);
        for event in &events[before..] {
            if let EngineEvent::EnemyDestroyed { enemy, .. } = event {
                if self.pending_combat == Some(*enemy) {
                    self.pending_combat = None;
                }
            }
        }
    }

    /// Transition to Defeat if the player is down. Returns whether it did.
    fn check_defeat(&mut self, reason: &str, events: &mut Vec<EngineEvent>) -> bool {
        if !self.player.is_destroyed() {
            return false;
        }
        if !self.state.is_terminal() {
            tracing::info!("DEFEAT - {}", reason);
            self.state = SimulationState::Defeat;
            self.outcome = Some(reason.to_string());
            events.push(EngineEvent::Defeat {
                reason: reason.to_string(),
            });
        }
        true
    }

    /// Transition to Victory once the roster is empty. Returns whether it did.
    fn check_victory(&mut self, events: &mut Vec<EngineEvent>) -> bool {
        if self.world.query::<&EnemyBrain>().iter().next().is_some() {
            return false;
        }
        if !self.state.is_terminal() {
            tracing::info!("VICTORY - all enemy aircraft destroyed");
            self.state = SimulationState::Victory;
            self.outcome = Some("All enemy aircraft destroyed".to_string());
            events.push(EngineEvent::Victory);
        }
        true
    }

    // ---- Test hooks ----

    /// Mutable access to the player aircraft (for tests staging a scenario).
    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Aircraft {
        &mut self.player
    }

    /// Remove every enemy (for tests that build their own roster).
    #[cfg(test)]
    pub fn clear_enemies(&mut self) {
        let entities: Vec<Entity> = self.roster().into_iter().map(|(e, _)| e).collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
        self.pending_combat = None;
    }

    /// Spawn an enemy at a chosen cell and refresh detection.
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: EnemyKind, position: Position) -> AircraftId {
        let id = AircraftId(self.enemy_ids().last().map_or(0, |last| last.0 + 1));
        world_setup::spawn_enemy(&mut self.world, kind, id, position, self.player.position);
        systems::detection::run(&mut self.world, &self.player, self.weather, &mut Vec::new());
        id
    }

    /// Edit one enemy's aircraft in place.
    #[cfg(test)]
    pub fn with_enemy(&mut self, id: AircraftId, edit: impl FnOnce(&mut Aircraft)) {
        if let Some(entity) = systems::combat::find_enemy(&self.world, id) {
            if let Ok(mut aircraft) = self.world.get::<&mut Aircraft>(entity) {
                edit(&mut aircraft);
            }
        }
    }

    /// Force the weather (for tests that need fixed modifiers).
    #[cfg(test)]
    pub fn set_weather(&mut self, weather: WeatherCondition) {
        self.weather = weather;
    }
}
