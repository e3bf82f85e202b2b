//! Core types and definitions for the JETSTRIKE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid geometry, components, commands, events, state snapshots and constants.
//! It has no dependency on any runtime or presentation layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
