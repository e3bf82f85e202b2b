//! Error types for the simulation engine.

use thiserror::Error;

use jetstrike_core::components::AircraftId;
use jetstrike_core::enums::SimulationState;
use jetstrike_core::error::ParseError;
use jetstrike_core::types::{Direction, Position};
use jetstrike_grid::GridError;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Rejected engine calls. A call that returns an error has changed nothing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Victory or Defeat has been reached; the session is read-only.
    #[error("Simulation is over: {0:?}")]
    SimulationOver(SimulationState),

    /// A combat action was issued with no engagement in progress.
    #[error("No combat is pending")]
    NoCombatPending,

    #[error("No enemy aircraft {0}")]
    TargetNotFound(AircraftId),

    /// Only the engaged enemy or a detected one can be targeted.
    #[error("Enemy aircraft {0} is not on radar")]
    TargetNotDetected(AircraftId),

    #[error("Moving {direction} from {from} would leave the grid")]
    OffGrid {
        /// Player position before the move.
        from: Position,
        /// Requested direction.
        direction: Direction,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Save data is well-formed JSON but describes an impossible world.
    #[error("Corrupt save data: {0}")]
    CorruptSave(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Failed to (de)serialize save data: {0}")]
    Json(#[from] serde_json::Error),
}
