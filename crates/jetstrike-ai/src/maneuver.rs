//! Maneuver planning: turns an AI state into a concrete move.
//!
//! Planning only reads the world; the simulation applies the plan, charges
//! fuel and resolves contact.

use glam::IVec2;
use jetstrike_core::constants::*;
use jetstrike_core::enums::{AiState, AircraftKind, EnemyKind, Maneuver};
use jetstrike_core::types::{Direction, Position};
use jetstrike_grid::{pathfinding, TerrainGrid};
use rand::Rng;

use crate::profiles::{get_behavior, get_profile, BehaviorProfile};

/// Pre-move altitude adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeIntent {
    Climb,
    Descend,
    Hold,
}

/// Altitude rule, evaluated before the maneuver.
pub fn altitude_intent(
    state: AiState,
    altitude: u8,
    player_altitude: u8,
    preferred_altitude: u8,
) -> AltitudeIntent {
    match state {
        AiState::Chasing | AiState::Flanking if altitude < player_altitude => AltitudeIntent::Climb,
        AiState::Retreating if altitude < MAX_ALTITUDE => AltitudeIntent::Climb,
        AiState::Patrolling if altitude < preferred_altitude => AltitudeIntent::Climb,
        AiState::Patrolling if altitude > preferred_altitude => AltitudeIntent::Descend,
        _ => AltitudeIntent::Hold,
    }
}

/// Everything a maneuver may look at.
pub struct ManeuverContext<'a> {
    pub grid: &'a TerrainGrid,
    pub kind: EnemyKind,
    pub state: AiState,
    pub position: Position,
    pub heading: Direction,
    /// Player cell, when the aircraft is aware of it.
    pub player: Option<Position>,
    pub last_known_player: Option<Position>,
    /// Cells held by other enemies.
    pub blocked: &'a [Position],
}

/// The move an aircraft will fly this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// Destination; equal to the current cell when holding.
    pub destination: Position,
    pub heading: Direction,
    pub maneuver: Maneuver,
    /// Lose one altitude level after the move (diving).
    pub descend: bool,
}

impl MovePlan {
    fn hold(ctx: &ManeuverContext) -> Self {
        Self {
            destination: ctx.position,
            heading: ctx.heading,
            maneuver: Maneuver::Regular,
            descend: false,
        }
    }
}

/// Plan this turn's move for the aircraft's current state.
pub fn plan<R: Rng>(ctx: &ManeuverContext, rng: &mut R) -> MovePlan {
    let behavior = get_behavior(ctx.kind);
    let player = ctx.player.or(ctx.last_known_player);

    let plan = match (ctx.state, player) {
        (AiState::Patrolling, _) => patrol(ctx, rng),
        (AiState::Chasing, Some(target)) => chase(ctx, &behavior, target, rng),
        (AiState::Retreating, Some(threat)) => retreat(ctx, &behavior, threat, rng),
        (AiState::Flanking, Some(target)) => flank(ctx, &behavior, target, rng),
        (AiState::Diving, Some(target)) => dive(ctx, &behavior, target, rng),
        // Pursuit states with no contact at all hold position.
        (_, None) => MovePlan::hold(ctx),
    };
    finish(ctx, plan)
}

/// Refuse moves into other enemies, then derive heading and turn surcharge.
fn finish(ctx: &ManeuverContext, mut plan: MovePlan) -> MovePlan {
    if plan.destination != ctx.position && ctx.blocked.contains(&plan.destination) {
        plan.destination = ctx.position;
        if plan.maneuver == Maneuver::Afterburner {
            plan.maneuver = Maneuver::Regular;
        }
    }

    if let Some(heading) = Direction::from_delta(ctx.position.delta_to(plan.destination)) {
        let turn_rate = get_profile(AircraftKind::Enemy(ctx.kind)).turn_rate;
        if plan.maneuver == Maneuver::Regular && ctx.heading.steps_to(heading) > turn_rate {
            plan.maneuver = Maneuver::Turn;
        }
        plan.heading = heading;
    }
    plan
}

fn toward(ctx: &ManeuverContext, target: Position) -> MovePlan {
    let destination = if target == ctx.position || !ctx.grid.in_bounds(target) {
        None
    } else {
        pathfinding::step(ctx.grid, ctx.position, target)
    };
    MovePlan {
        destination: destination.unwrap_or(ctx.position),
        ..MovePlan::hold(ctx)
    }
}

fn patrol<R: Rng>(ctx: &ManeuverContext, rng: &mut R) -> MovePlan {
    if let Some(contact) = ctx.last_known_player {
        if contact != ctx.position && rng.gen_bool(PATROL_CONTACT_BIAS) {
            return toward(ctx, contact);
        }
    }

    let neighbors: Vec<Position> = ctx.grid.neighbors(ctx.position).collect();
    if neighbors.is_empty() {
        return MovePlan::hold(ctx);
    }
    let destination = neighbors[rng.gen_range(0..neighbors.len())];
    MovePlan {
        destination,
        ..MovePlan::hold(ctx)
    }
}

fn chase<R: Rng>(
    ctx: &ManeuverContext,
    behavior: &BehaviorProfile,
    target: Position,
    rng: &mut R,
) -> MovePlan {
    let mut plan = toward(ctx, target);
    if plan.destination == ctx.position || !rng.gen_bool(behavior.afterburner_chance) {
        return plan;
    }

    plan.maneuver = Maneuver::Afterburner;
    if plan.destination != target && !ctx.blocked.contains(&plan.destination) {
        if let Some(second) = pathfinding::step(ctx.grid, plan.destination, target) {
            if !ctx.blocked.contains(&second) {
                plan.destination = second;
            }
        }
    }
    plan
}

fn retreat<R: Rng>(
    ctx: &ManeuverContext,
    behavior: &BehaviorProfile,
    threat: Position,
    rng: &mut R,
) -> MovePlan {
    let away = threat.delta_to(ctx.position).signum();
    let mut destination = ctx.grid.clamp(ctx.position.offset(away));

    if behavior.retreat_jitter && rng.gen_bool(RETREAT_JITTER_CHANCE) {
        let jitter = rng.gen_range(-1..=1);
        let shift = if rng.gen_bool(0.5) {
            IVec2::new(jitter, 0)
        } else {
            IVec2::new(0, jitter)
        };
        destination = ctx.grid.clamp(destination.offset(shift));
    }

    // Jitter can stretch the move to two cells; keep it a single step.
    let step = ctx.position.delta_to(destination).clamp(IVec2::NEG_ONE, IVec2::ONE);
    MovePlan {
        destination: ctx.position.offset(step),
        ..MovePlan::hold(ctx)
    }
}

/// Nearest in-bounds flank cell around `target`; ties keep the first offset.
pub fn flank_cell(grid: &TerrainGrid, position: Position, target: Position) -> Option<Position> {
    let candidates = FLANK_OFFSETS
        .iter()
        .map(|&(dr, dc)| target.offset(IVec2::new(dr, dc)))
        .filter(|&cell| grid.in_bounds(cell));

    let mut best: Option<Position> = None;
    for cell in candidates {
        if cell == position {
            // Already in position: press the attack.
            return None;
        }
        match best {
            Some(b) if position.chebyshev_to(b) <= position.chebyshev_to(cell) => {}
            _ => best = Some(cell),
        }
    }
    best
}

fn flank<R: Rng>(
    ctx: &ManeuverContext,
    behavior: &BehaviorProfile,
    target: Position,
    rng: &mut R,
) -> MovePlan {
    match flank_cell(ctx.grid, ctx.position, target) {
        Some(cell) => toward(ctx, cell),
        None => chase(ctx, behavior, target, rng),
    }
}

fn dive<R: Rng>(
    ctx: &ManeuverContext,
    behavior: &BehaviorProfile,
    target: Position,
    rng: &mut R,
) -> MovePlan {
    let mut plan = toward(ctx, target);
    plan.descend = rng.gen_bool(behavior.dive_altitude_loss_chance);
    plan
}
