//! Grid errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Random placement ran out of attempts; the board is (nearly) full.
    #[error("no empty cell found after {attempts} placement attempts")]
    NoEmptyCell { attempts: usize },
}
