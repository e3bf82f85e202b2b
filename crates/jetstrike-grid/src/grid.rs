//! TerrainGrid: the static square board, and the occupancy view derived from it.

use jetstrike_core::constants::PLACEMENT_ATTEMPTS_PER_CELL;
use jetstrike_core::enums::{CellMarker, Terrain};
use jetstrike_core::types::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Square board of terrain features, stored row-major.
///
/// Aircraft are not stored here; see [`OccupancyMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    size: i32,
    cells: Vec<Terrain>,
}

impl TerrainGrid {
    /// Create an all-empty `size`×`size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not positive.
    pub fn new(size: i32) -> Self {
        assert!(size > 0, "TerrainGrid size must be positive");
        Self {
            size,
            cells: vec![Terrain::Empty; (size * size) as usize],
        }
    }

    /// Edge length in cells.
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.row) && (0..self.size).contains(&pos.col)
    }

    fn index(&self, pos: Position) -> usize {
        assert!(self.in_bounds(pos), "position {pos} is off the grid");
        (pos.row * self.size + pos.col) as usize
    }

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn terrain_at(&self, pos: Position) -> Terrain {
        self.cells[self.index(pos)]
    }

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        let idx = self.index(pos);
        self.cells[idx] = terrain;
    }

    /// Every cell, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    fn feature_positions(&self, feature: Terrain) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(move |&pos| self.terrain_at(pos) == feature)
    }

    pub fn bases(&self) -> impl Iterator<Item = Position> + '_ {
        self.feature_positions(Terrain::Base)
    }

    pub fn tankers(&self) -> impl Iterator<Item = Position> + '_ {
        self.feature_positions(Terrain::Tanker)
    }

    /// In-bounds neighbors of `pos`, clockwise from North.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        jetstrike_core::types::Direction::ALL
            .into_iter()
            .map(move |d| pos.step(d))
            .filter(move |&p| self.in_bounds(p))
    }

    /// Clamp a position onto the board.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.row.clamp(0, self.size - 1),
            pos.col.clamp(0, self.size - 1),
        )
    }

    /// Draw random cells until one has no terrain feature and is not occupied.
    ///
    /// Gives up after `size² × PLACEMENT_ATTEMPTS_PER_CELL` draws.
    pub fn random_empty_position<R: Rng>(
        &self,
        rng: &mut R,
        is_occupied: impl Fn(Position) -> bool,
    ) -> Result<Position, GridError> {
        let attempts = (self.size * self.size) as usize * PLACEMENT_ATTEMPTS_PER_CELL;
        for _ in 0..attempts {
            let pos = Position::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size));
            if self.terrain_at(pos) == Terrain::Empty && !is_occupied(pos) {
                return Ok(pos);
            }
        }
        Err(GridError::NoEmptyCell { attempts })
    }
}

/// Cell view combining terrain with the live roster.
///
/// Built on demand from the current positions, so it can never go stale.
pub struct OccupancyMap<'a> {
    pub grid: &'a TerrainGrid,
    pub player: Position,
    pub enemies: &'a [Position],
}

impl<'a> OccupancyMap<'a> {
    pub fn new(grid: &'a TerrainGrid, player: Position, enemies: &'a [Position]) -> Self {
        Self {
            grid,
            player,
            enemies,
        }
    }

    /// The player marker wins over an enemy marker; occupants win over terrain.
    pub fn cell_at(&self, pos: Position) -> CellMarker {
        if pos == self.player {
            CellMarker::Player
        } else if self.enemies.contains(&pos) {
            CellMarker::Enemy
        } else {
            CellMarker::from(self.grid.terrain_at(pos))
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        pos == self.player || self.enemies.contains(&pos)
    }

    /// Row-major marker rows for display.
    pub fn rows(&self) -> Vec<Vec<CellMarker>> {
        (0..self.grid.size())
            .map(|row| {
                (0..self.grid.size())
                    .map(|col| self.cell_at(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }
}
