//! Fundamental grid geometry types.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Grid cell coordinate. Row 0 is the northern edge, column 0 the western edge.
///
/// Vectors between positions are `IVec2` in `(row, col)` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.row, self.col)
    }

    pub fn from_ivec2(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Vector from `self` to `other`.
    pub fn delta_to(self, other: Position) -> IVec2 {
        other.as_ivec2() - self.as_ivec2()
    }

    /// Position shifted by a `(row, col)` offset. No bounds check.
    pub fn offset(self, delta: IVec2) -> Position {
        Self::from_ivec2(self.as_ivec2() + delta)
    }

    /// Neighbor in the given compass direction. No bounds check.
    pub fn step(self, direction: Direction) -> Position {
        self.offset(direction.delta())
    }

    /// `|dr| + |dc|`, the pathfinder heuristic.
    pub fn manhattan_to(self, other: Position) -> i32 {
        let d = self.delta_to(other).abs();
        d.x + d.y
    }

    /// King-move distance: number of 8-directional steps between cells.
    pub fn chebyshev_to(self, other: Position) -> i32 {
        self.delta_to(other).abs().max_element()
    }

    /// Straight-line (Euclidean) distance in cells.
    pub fn range_to(self, other: Position) -> f64 {
        let a = DVec2::new(self.row as f64, self.col as f64);
        let b = DVec2::new(other.row as f64, other.col as f64);
        a.distance(b)
    }

    /// True for the eight surrounding cells (not the cell itself).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.chebyshev_to(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Eight-way compass heading. North is toward row 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Clockwise from North. Also the pathfinder's neighbor expansion order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Unit step as a `(row, col)` offset.
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::N => IVec2::new(-1, 0),
            Direction::NE => IVec2::new(-1, 1),
            Direction::E => IVec2::new(0, 1),
            Direction::SE => IVec2::new(1, 1),
            Direction::S => IVec2::new(1, 0),
            Direction::SW => IVec2::new(1, -1),
            Direction::W => IVec2::new(0, -1),
            Direction::NW => IVec2::new(-1, -1),
        }
    }

    /// Heading of an arbitrary offset (sign of each component). `None` for zero.
    pub fn from_delta(delta: IVec2) -> Option<Direction> {
        let unit = delta.signum();
        Self::ALL.into_iter().find(|d| d.delta() == unit)
    }

    fn index(self) -> u8 {
        match self {
            Direction::N => 0,
            Direction::NE => 1,
            Direction::E => 2,
            Direction::SE => 3,
            Direction::S => 4,
            Direction::SW => 5,
            Direction::W => 6,
            Direction::NW => 7,
        }
    }

    /// Smallest number of 45° steps between two headings (0..=4).
    pub fn steps_to(self, other: Direction) -> u8 {
        let diff = (other.index() + 8 - self.index()) % 8;
        diff.min(8 - diff)
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::N),
            "ne" | "northeast" | "north-east" => Ok(Direction::NE),
            "e" | "east" => Ok(Direction::E),
            "se" | "southeast" | "south-east" => Ok(Direction::SE),
            "s" | "south" => Ok(Direction::S),
            "sw" | "southwest" | "south-west" => Ok(Direction::SW),
            "w" | "west" => Ok(Direction::W),
            "nw" | "northwest" | "north-west" => Ok(Direction::NW),
            _ => Err(ParseError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        f.write_str(label)
    }
}
