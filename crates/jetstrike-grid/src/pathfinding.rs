//! Grid pathfinding using the A* algorithm.
//!
//! Eight-way adjacency, unit cost per step (diagonals are not penalized),
//! Manhattan heuristic. Results are fully deterministic: the open set keeps
//! insertion order and the first node with the lowest f wins ties, and
//! neighbors are always expanded clockwise from North.

use jetstrike_core::types::{Direction, Position};
use tracing::trace;

use crate::grid::TerrainGrid;

/// Search node. Owned by a single search call.
#[derive(Debug, Clone, Copy)]
struct PathNode {
    pos: Position,
    /// Index of the parent node in the arena; `None` for the start node.
    parent: Option<usize>,
    g: i32,
    h: i32,
    f: i32,
}

impl PathNode {
    fn new(pos: Position, parent: Option<usize>, g: i32, goal: Position) -> Self {
        let h = pos.manhattan_to(goal);
        Self {
            pos,
            parent,
            g,
            h,
            f: g + h,
        }
    }
}

/// Next cell on the best path from `start` toward `goal`.
///
/// Returns `None` when `start == goal` or no path exists.
///
/// # Panics
///
/// Panics if `start` or `goal` is off the grid.
pub fn step(grid: &TerrainGrid, start: Position, goal: Position) -> Option<Position> {
    let next = find_path(grid, start, goal).and_then(|path| path.first().copied());
    trace!(%start, %goal, next = ?next, "pathfinder step");
    next
}

/// Full path from `start` to `goal`, excluding `start` and including `goal`.
///
/// Returns `None` when `start == goal` or no path exists.
///
/// # Panics
///
/// Panics if `start` or `goal` is off the grid.
pub fn find_path(grid: &TerrainGrid, start: Position, goal: Position) -> Option<Vec<Position>> {
    assert!(grid.in_bounds(start), "path start {start} is off the grid");
    assert!(grid.in_bounds(goal), "path goal {goal} is off the grid");

    if start == goal {
        return None;
    }

    let size = grid.size();
    let cell_index = |pos: Position| (pos.row * size + pos.col) as usize;

    let mut nodes: Vec<PathNode> = vec![PathNode::new(start, None, 0, goal)];
    let mut open: Vec<usize> = vec![0];
    let mut closed = vec![false; (size * size) as usize];

    while !open.is_empty() {
        // First node with the lowest f, in insertion order.
        let mut best = 0;
        for (slot, &idx) in open.iter().enumerate().skip(1) {
            if nodes[idx].f < nodes[open[best]].f {
                best = slot;
            }
        }
        let current = open.remove(best);
        let current_node = nodes[current];

        if current_node.pos == goal {
            return Some(reconstruct_path(&nodes, current));
        }
        closed[cell_index(current_node.pos)] = true;

        for direction in Direction::ALL {
            let neighbor = current_node.pos.step(direction);
            if !grid.in_bounds(neighbor) || closed[cell_index(neighbor)] {
                continue;
            }

            let tentative_g = current_node.g + 1;
            match open.iter().copied().find(|&idx| nodes[idx].pos == neighbor) {
                Some(idx) => {
                    if tentative_g < nodes[idx].g {
                        let node = &mut nodes[idx];
                        node.g = tentative_g;
                        node.f = tentative_g + node.h;
                        node.parent = Some(current);
                    }
                }
                None => {
                    nodes.push(PathNode::new(neighbor, Some(current), tentative_g, goal));
                    open.push(nodes.len() - 1);
                }
            }
        }
    }

    None
}

/// Walk parents back from `end`, dropping the start node.
fn reconstruct_path(nodes: &[PathNode], end: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = end;
    while let Some(parent) = nodes[current].parent {
        path.push(nodes[current].pos);
        current = parent;
    }
    path.reverse();
    path
}
