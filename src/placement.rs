//! Random placement of obstacles and life items.

use crate::error::{MazeError, Result};
use crate::grid::{Grid, Pos};
use rand::Rng;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entities {
    pub obstacles: Vec<Pos>,
    pub life_items: Vec<Pos>,
}

impl Entities {
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.obstacles.contains(&pos) || self.life_items.contains(&pos)
    }
}

/// There is always one more obstacle than life items.
pub fn obstacle_count(num_life_items: usize) -> usize {
    num_life_items + 1
}

/// Cells a grid needs to host every entity plus the start and goal cells.
pub fn required_cells(num_life_items: usize) -> usize {
    obstacle_count(num_life_items) + num_life_items + 2
}

/// Scatters obstacles, then life items, over cells other than start and goal.
///
/// Each entity is drawn uniformly and redrawn while it lands on the start, the
/// goal, or an occupied cell. Grids too small to fit everything are rejected up
/// front so the sampling always has room to succeed.
pub fn place_entities(grid: &Grid, num_life_items: usize, rng: &mut impl Rng) -> Result<Entities> {
    let needed = required_cells(num_life_items);
    let available = grid.width * grid.height;
    if available < needed {
        return Err(MazeError::InvalidConfiguration(format!(
            "a {}x{} grid has {} cells but {} obstacles and {} life items need {}",
            grid.width,
            grid.height,
            available,
            obstacle_count(num_life_items),
            num_life_items,
            needed
        )));
    }

    let mut entities = Entities::default();
    for _ in 0..obstacle_count(num_life_items) {
        let pos = random_empty_cell(grid, &entities, rng);
        entities.obstacles.push(pos);
    }
    for _ in 0..num_life_items {
        let pos = random_empty_cell(grid, &entities, rng);
        entities.life_items.push(pos);
    }

    debug!(
        obstacles = ?entities.obstacles,
        life_items = ?entities.life_items,
        "entities placed"
    );
    Ok(entities)
}

fn random_empty_cell(grid: &Grid, entities: &Entities, rng: &mut impl Rng) -> Pos {
    loop {
        let pos = Pos {
            x: rng.gen_range(0..grid.width),
            y: rng.gen_range(0..grid.height),
        };
        if pos != grid.start() && pos != grid.goal() && !entities.is_occupied(pos) {
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::new_maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn assert_valid(grid: &Grid, entities: &Entities, num_life_items: usize) {
        assert_eq!(entities.life_items.len(), num_life_items);
        assert_eq!(entities.obstacles.len(), entities.life_items.len() + 1);

        let mut seen = HashSet::new();
        for pos in entities.obstacles.iter().chain(entities.life_items.iter()) {
            assert!(grid.contains(*pos));
            assert_ne!(*pos, grid.start());
            assert_ne!(*pos, grid.goal());
            assert!(seen.insert(*pos), "{pos:?} used twice");
        }
    }

    #[test]
    fn placement_respects_constraints() {
        let mut rng = StdRng::seed_from_u64(2024);
        for seed in 0..50 {
            let grid = new_maze(6, 5, &mut StdRng::seed_from_u64(seed));
            let entities = place_entities(&grid, 3, &mut rng).unwrap();
            assert_valid(&grid, &entities, 3);
        }
    }

    #[test]
    fn exact_fit_fills_every_free_cell() {
        // 3x3 = 9 cells: start + goal + 4 obstacles + 3 life items.
        let mut rng = StdRng::seed_from_u64(5);
        let grid = new_maze(3, 3, &mut rng);
        let entities = place_entities(&grid, 3, &mut rng).unwrap();
        assert_valid(&grid, &entities, 3);
        for cell in grid.cells() {
            let pos = cell.pos;
            if pos != grid.start() && pos != grid.goal() {
                assert!(entities.is_occupied(pos));
            }
        }
    }

    #[test]
    fn zero_life_items_still_places_one_obstacle() {
        let mut rng = StdRng::seed_from_u64(8);
        let grid = new_maze(3, 1, &mut rng);
        let entities = place_entities(&grid, 0, &mut rng).unwrap();
        assert_eq!(entities.obstacles, vec![Pos::new(1, 0)]);
        assert!(entities.life_items.is_empty());
    }

    #[test]
    fn too_small_grid_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = new_maze(2, 2, &mut rng);
        let err = place_entities(&grid, 1, &mut rng).unwrap_err();
        assert!(matches!(err, MazeError::InvalidConfiguration(_)));

        let single = new_maze(1, 1, &mut rng);
        assert!(place_entities(&single, 0, &mut rng).is_err());
    }

    #[test]
    fn required_cells_counts_start_and_goal() {
        assert_eq!(required_cells(0), 3);
        assert_eq!(required_cells(3), 9);
    }
}
