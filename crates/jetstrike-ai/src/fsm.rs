//! Aircraft behavior finite state machine.
//!
//! Pure functions that compute state transitions for enemy aircraft based on
//! their class, current state and situation. No ECS dependency; operates on
//! plain data.

use jetstrike_core::constants::LOST_CONTACT_TURNS;
use jetstrike_core::enums::{AiState, EnemyKind};

use crate::profiles::{get_behavior, BehaviorProfile};

/// Input to the FSM for a single aircraft.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub kind: EnemyKind,
    pub state: AiState,
    pub turns_in_state: u32,
    pub health: u32,
    pub max_health: u32,
    /// The aircraft knows where the player is this turn.
    pub aware: bool,
    /// Turns since the player was last known.
    pub turns_undetected: u32,
    /// Euclidean distance to the player (cells).
    pub distance: f64,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
}

/// Whether an aircraft can act on the player's current position.
///
/// Classes without their own sensors are vectored by ground control.
pub fn is_aware(behavior: &BehaviorProfile, detected: bool) -> bool {
    detected || !behavior.can_detect_player
}

/// Evaluate the FSM for one aircraft. The first matching rule wins.
pub fn evaluate(ctx: &AiContext) -> AiUpdate {
    let behavior = get_behavior(ctx.kind);
    let new_state = next_state(ctx, &behavior);
    AiUpdate {
        new_state,
        state_changed: new_state != ctx.state,
    }
}

fn next_state(ctx: &AiContext, behavior: &BehaviorProfile) -> AiState {
    let low_health = (ctx.health as f64) < behavior.retreat_fraction * ctx.max_health as f64;
    if low_health {
        return match ctx.state {
            AiState::Retreating
                if ctx.aware && ctx.turns_in_state >= behavior.max_retreat_turns =>
            {
                // Cornered: turn and fight.
                AiState::Chasing
            }
            _ => AiState::Retreating,
        };
    }

    if !ctx.aware {
        return match ctx.state {
            AiState::Patrolling => AiState::Patrolling,
            _ if ctx.turns_undetected > LOST_CONTACT_TURNS => AiState::Patrolling,
            other => other,
        };
    }

    if let Some(close) = behavior.close_maneuver {
        if ctx.distance <= close.range {
            return close.state;
        }
    }

    AiState::Chasing
}
