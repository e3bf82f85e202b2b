//! Session configuration.

use serde::{Deserialize, Serialize};

use jetstrike_core::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use jetstrike_core::enums::{EnemyKind, PlayerJet};

use crate::error::{EngineError, Result};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Board edge length (cells).
    pub grid_size: i32,
    pub player_jet: PlayerJet,
    /// Enemy roster, in roster (and acting) order.
    pub enemies: Vec<EnemyKind>,
    pub bases: usize,
    pub tankers: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grid_size: DEFAULT_GRID_SIZE,
            player_jet: PlayerJet::default(),
            enemies: vec![EnemyKind::F16, EnemyKind::Su27, EnemyKind::F22],
            bases: 1,
            tankers: 1,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(EngineError::InvalidConfig(format!(
                "grid_size must be within 2..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.enemies.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one enemy aircraft is required".into(),
            ));
        }
        let cells = (self.grid_size as usize).pow(2);
        let needed = (1 + self.enemies.len())
            .saturating_add(self.bases)
            .saturating_add(self.tankers);
        if needed > cells {
            return Err(EngineError::InvalidConfig(format!(
                "{needed} aircraft and features do not fit on {cells} cells"
            )));
        }
        Ok(())
    }
}
