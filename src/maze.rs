//! Perfect-maze generation by randomized depth-first backtracking.

use crate::grid::{carve_between, create_grid, neighbors_of, step, Dir, Grid, Pos};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

/// Carves a spanning tree into `grid`, starting from the top-left cell.
///
/// Uses an explicit stack instead of recursion. Every cell ends up visited and
/// every carved passage links a freshly visited cell to the tree, so the result
/// has exactly `width * height - 1` passages and no cycles.
pub fn generate_maze(grid: &mut Grid, rng: &mut impl Rng) {
    if grid.width == 0 || grid.height == 0 {
        return;
    }
    let start = grid.start();
    grid.cell_mut(start).visited = true;
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        let unvisited: Vec<(Pos, Dir)> = neighbors_of(grid, current)
            .into_iter()
            .filter(|(pos, _)| !grid.cell(*pos).visited)
            .collect();

        let Some(&(next, dir)) = unvisited.choose(rng) else {
            continue;
        };
        stack.push(current);
        grid.cell_mut(next).visited = true;
        carve_between(grid, current, dir);
        stack.push(next);
    }

    debug!(
        width = grid.width,
        height = grid.height,
        passages = passage_count(grid),
        "maze generated"
    );
}

/// Allocates a fresh grid and carves a maze into it.
pub fn new_maze(cols: usize, rows: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = create_grid(cols, rows);
    generate_maze(&mut grid, rng);
    grid
}

/// Number of open boundaries between adjacent cells.
pub fn passage_count(grid: &Grid) -> usize {
    grid.cells()
        .map(|cell| {
            [Dir::Right, Dir::Down]
                .iter()
                .filter(|&&dir| !cell.has_wall(dir) && step(grid, cell.pos, dir).is_some())
                .count()
        })
        .sum()
}

/// Shortest walk from `from` to `to` through open passages, as a list of moves.
pub fn solve(grid: &Grid, from: Pos, to: Pos) -> Option<Vec<Dir>> {
    if !grid.contains(from) || !grid.contains(to) {
        return None;
    }
    let mut came_from: Vec<Vec<Option<(Pos, Dir)>>> = vec![vec![None; grid.width]; grid.height];
    let mut seen = vec![vec![false; grid.width]; grid.height];
    let mut q = VecDeque::new();
    seen[from.y][from.x] = true;
    q.push_back(from);

    while let Some(pos) = q.pop_front() {
        if pos == to {
            break;
        }
        for (next, dir) in neighbors_of(grid, pos) {
            if grid.cell(pos).has_wall(dir) || seen[next.y][next.x] {
                continue;
            }
            seen[next.y][next.x] = true;
            came_from[next.y][next.x] = Some((pos, dir));
            q.push_back(next);
        }
    }

    if !seen[to.y][to.x] {
        return None;
    }
    let mut path = Vec::new();
    let mut pos = to;
    while let Some((prev, dir)) = came_from[pos.y][pos.x] {
        path.push(dir);
        pos = prev;
    }
    path.reverse();
    Some(path)
}
