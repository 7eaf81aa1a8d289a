//! Finding the way from entrance to exit

use std::iter::successors;

use tracing::{debug, warn};

use crate::grid::{Grid, Position};

/// Mark the path from the entrance to the exit.
///
/// Any previously marked path is cleared first. Cells on the path are
/// flagged so that [Grid::is_solution] reports them; the path is also
/// returned, entrance first.
///
/// Returns `None` and leaves nothing marked if the maze has no entrance,
/// no exit, or no passage between them.
pub fn solve(grid: &mut Grid) -> Option<Vec<Position>> {
    grid.clear_solution();

    let Some(start) = grid.entrance() else {
        warn!("maze has no entrance, nothing to solve");
        return None;
    };
    let Some(goal) = grid.exit() else {
        warn!("maze has no exit, nothing to solve");
        return None;
    };

    let Some(path) = find_path(grid, start, goal) else {
        warn!(?start, ?goal, "exit is not reachable from entrance");
        return None;
    };

    for &pos in &path {
        grid.set_solution(pos, true);
    }
    debug!(length = path.len(), "marked solution");
    Some(path)
}

/// Depth-first search through open doors.
///
/// In a perfect maze the path is unique, so the search order only affects
/// running time.
fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    let mut parent: Vec<Option<Position>> = vec![None; grid.len()];
    let mut seen = vec![false; grid.len()];
    seen[grid.index(start)?] = true;

    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        if pos == goal {
            let mut path: Vec<Position> =
                successors(Some(pos), |&p| grid.index(p).and_then(|i| parent[i])).collect();
            path.reverse();
            return Some(path);
        }

        for next in grid.neighbors(pos) {
            let Some(i) = grid.index(next) else {
                continue;
            };
            if !seen[i] {
                seen[i] = true;
                parent[i] = Some(pos);
                stack.push(next);
            }
        }
    }
    None
}
