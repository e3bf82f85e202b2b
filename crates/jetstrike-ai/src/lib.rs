//! Enemy AI for JETSTRIKE.
//!
//! Implements the per-aircraft behavior state machine, class-driven
//! profiles, maneuver planning and the radar detection model.

pub mod detection;
pub mod fsm;
pub mod maneuver;
pub mod profiles;

pub use jetstrike_core as core;
