//! Simulation engine for JETSTRIKE.
//!
//! Owns the hecs ECS world, runs the player and enemy phases of each turn,
//! and produces GameStateSnapshots for a frontend.

pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use error::{EngineError, Result};
pub use jetstrike_core as core;
pub use persistence::SaveData;

#[cfg(test)]
mod tests;
