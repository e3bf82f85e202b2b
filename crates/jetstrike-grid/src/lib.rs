//! Battlespace grid for JETSTRIKE.
//!
//! Static terrain features, the occupancy view derived from the live roster,
//! and the A* pathfinder every AI maneuver steers by.

pub use jetstrike_core as core;

pub mod error;
pub mod grid;
pub mod pathfinding;

// Re-export key types for convenience.
pub use error::GridError;
pub use grid::{OccupancyMap, TerrainGrid};
pub use pathfinding::{find_path, step};
