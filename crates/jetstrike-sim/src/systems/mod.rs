//! Systems that operate on the simulation world each turn.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the engine-owned player and RNG. They do not own state.

pub mod cleanup;
pub mod combat;
pub mod coordinated;
pub mod detection;
pub mod enemy_ai;
pub mod resources;
pub mod snapshot;
pub mod weather;
