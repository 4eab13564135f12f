//! Grid model: a fixed rectangle of cells, each carrying four wall flags.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    /// Index into `Cell::walls`.
    pub fn index(self) -> usize {
        match self {
            Dir::Up => 0,
            Dir::Right => 1,
            Dir::Down => 2,
            Dir::Left => 3,
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }
}

/// Grid coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub pos: Pos,
    /// Indexed by `Dir::index`: up, right, down, left.
    pub walls: [bool; 4],
    /// Only meaningful while the maze is being carved.
    pub visited: bool,
}

impl Cell {
    fn new(pos: Pos) -> Self {
        Self {
            pos,
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn has_wall(&self, dir: Dir) -> bool {
        self.walls[dir.index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[pos.y][pos.x]
    }

    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.y][pos.x]
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn start(&self) -> Pos {
        Pos::new(0, 0)
    }

    pub fn goal(&self) -> Pos {
        Pos::new(self.width - 1, self.height - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }
}

/// Allocates a `cols` x `rows` grid with every wall standing and nothing visited.
pub fn create_grid(cols: usize, rows: usize) -> Grid {
    let cells = (0..rows)
        .map(|y| (0..cols).map(|x| Cell::new(Pos { x, y })).collect())
        .collect();
    Grid {
        width: cols,
        height: rows,
        cells,
    }
}

/// The cell one step from `pos` in `dir`, or `None` when that leaves the grid.
pub fn step(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = pos.x as isize + dx;
    let ny = pos.y as isize + dy;
    if nx < 0 || ny < 0 {
        return None;
    }
    let next = Pos {
        x: nx as usize,
        y: ny as usize,
    };
    if grid.contains(next) {
        Some(next)
    } else {
        None
    }
}

/// In-bounds neighbors of `pos`, paired with the direction leading to each.
pub fn neighbors_of(grid: &Grid, pos: Pos) -> Vec<(Pos, Dir)> {
    Dir::ALL
        .iter()
        .filter_map(|&dir| step(grid, pos, dir).map(|next| (next, dir)))
        .collect()
}

/// Removes the wall pair between `pos` and its neighbor in `dir`.
///
/// Both sides are cleared together so the shared boundary never disagrees.
/// Returns the neighbor, or `None` (and changes nothing) at the grid edge.
pub fn carve_between(grid: &mut Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    let next = step(grid, pos, dir)?;
    grid.cell_mut(pos).walls[dir.index()] = false;
    grid.cell_mut(next).walls[dir.opposite().index()] = false;
    Some(next)
}
