//! Errors raised while interpreting player input tokens.

use thiserror::Error;

/// A player-supplied token could not be understood. Never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown direction '{0}' (expected N, NE, E, SE, S, SW, W or NW)")]
    UnknownDirection(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown jet '{0}' (expected F for the F-22 or S for the Su-57)")]
    UnknownJet(String),
}
