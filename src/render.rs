use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use maze_game::{Dir, GameState, Outcome, Pos};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Empty,
    Player,
    Obstacle,
    LifeItem,
    Goal,
}

#[derive(Clone, Copy, PartialEq)]
struct Tile {
    glyph: Glyph,
    color: Color,
}

/// Draws the maze on a `(2 * cols + 1) x (2 * rows + 1)` lattice: odd/odd points
/// are cells, points between two cells are walls or passages, even/even points
/// are pillars.
pub struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    lattice_w: usize,
    lattice_h: usize,
}

impl Renderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let lattice_w = cols * 2 + 1;
        let lattice_h = rows * 2 + 1;
        Self {
            last: vec![
                Tile {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                lattice_w * lattice_h
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            lattice_w,
            lattice_h,
        }
    }

    /// Forces the next `render` to repaint everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Terminal columns and rows the maze needs, saturating at `u16::MAX` so
    /// oversized grids fall into the too-small branch instead of wrapping.
    fn needed_size(&self) -> (u16, u16) {
        (
            clamp_u16(self.lattice_w.saturating_mul(CELL_W)),
            clamp_u16(self.lattice_h.saturating_add(2)),
        )
    }

    pub fn render(&mut self, stdout: &mut Stdout, state: &GameState) -> io::Result<()> {
        let (needed_w, needed_h) = self.needed_size();
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Lives: {}/{}  Moves: {}  (arrows/hjkl move, r restart, q quit)",
            state.player.lives, state.player.max_lives, state.moves
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for ly in 0..self.lattice_h {
            for lx in 0..self.lattice_w {
                let tile = tile_for(state, lx, ly);
                let idx = ly * self.lattice_w + lx;
                if self.needs_full || tile != self.last[idx] {
                    self.last[idx] = tile;
                    self.draw_tile(stdout, lx, ly, tile)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()
    }

    /// Announces the outcome under the maze.
    pub fn render_banner(&self, stdout: &mut Stdout, outcome: Outcome) -> io::Result<()> {
        let (needed_w, needed_h) = self.needed_size();
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(MoveTo(0, 1))?;
        } else {
            stdout.queue(MoveTo(
                self.origin_x,
                self.origin_y.saturating_add(clamp_u16(self.lattice_h)),
            ))?;
        }
        let (text, color) = match outcome {
            Outcome::Won => ("You Win!", Color::Green),
            Outcome::Lost => ("Game Over!", Color::Red),
        };
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        stdout.queue(Print("  Press any key for a new maze, q to quit."))?;
        stdout.flush()
    }

    fn draw_tile(&self, stdout: &mut Stdout, lx: usize, ly: usize, tile: Tile) -> io::Result<()> {
        let text = match tile.glyph {
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Player => "😃",
            Glyph::Obstacle => "● ",
            Glyph::LifeItem => "▲ ",
            Glyph::Goal => "⚑ ",
        };
        let x_pos = self.origin_x.saturating_add(clamp_u16(lx * CELL_W));
        let y_pos = self.origin_y.saturating_add(clamp_u16(ly));
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(tile.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn tile_for(state: &GameState, lx: usize, ly: usize) -> Tile {
    let wall = Tile {
        glyph: Glyph::Wall,
        color: Color::Grey,
    };
    let open = Tile {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };
    let grid = &state.grid;

    match (lx % 2, ly % 2) {
        (0, 0) => wall,
        (1, 1) => cell_tile(state, Pos::new(lx / 2, ly / 2)),
        // Boundary between horizontally adjacent cells.
        (0, _) => {
            let y = ly / 2;
            let blocked = if lx / 2 < grid.width {
                grid.cell(Pos::new(lx / 2, y)).has_wall(Dir::Left)
            } else {
                grid.cell(Pos::new(grid.width - 1, y)).has_wall(Dir::Right)
            };
            if blocked {
                wall
            } else {
                open
            }
        }
        // Boundary between vertically adjacent cells.
        _ => {
            let x = lx / 2;
            let blocked = if ly / 2 < grid.height {
                grid.cell(Pos::new(x, ly / 2)).has_wall(Dir::Up)
            } else {
                grid.cell(Pos::new(x, grid.height - 1)).has_wall(Dir::Down)
            };
            if blocked {
                wall
            } else {
                open
            }
        }
    }
}

fn cell_tile(state: &GameState, pos: Pos) -> Tile {
    if pos == state.player.pos {
        return Tile {
            glyph: Glyph::Player,
            color: Color::Green,
        };
    }
    if state.entities.obstacles.contains(&pos) {
        return Tile {
            glyph: Glyph::Obstacle,
            color: Color::Red,
        };
    }
    if state.entities.life_items.contains(&pos) {
        return Tile {
            glyph: Glyph::LifeItem,
            color: Color::Green,
        };
    }
    if pos == state.grid.goal() {
        return Tile {
            glyph: Glyph::Goal,
            color: Color::Yellow,
        };
    }
    Tile {
        glyph: Glyph::Empty,
        color: Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_game::grid::{carve_between, create_grid};
    use maze_game::{Entities, GameState};

    #[test]
    fn lattice_shows_carved_passages() {
        let mut grid = create_grid(2, 2);
        carve_between(&mut grid, Pos::new(0, 0), Dir::Right);
        carve_between(&mut grid, Pos::new(1, 0), Dir::Down);
        let entities = Entities {
            obstacles: vec![Pos::new(0, 1)],
            life_items: vec![],
        };
        let state = GameState::with_layout(grid, entities, 3);

        assert!(tile_for(&state, 0, 0) == Tile { glyph: Glyph::Wall, color: Color::Grey });
        // Passage between (0,0) and (1,0), wall between (0,0) and (0,1).
        assert!(tile_for(&state, 2, 1).glyph == Glyph::Empty);
        assert!(tile_for(&state, 1, 2).glyph == Glyph::Wall);
        // Passage between (1,0) and (1,1); outer edges closed.
        assert!(tile_for(&state, 3, 2).glyph == Glyph::Empty);
        assert!(tile_for(&state, 4, 1).glyph == Glyph::Wall);
        assert!(tile_for(&state, 3, 4).glyph == Glyph::Wall);

        assert!(tile_for(&state, 1, 1).glyph == Glyph::Player);
        assert!(tile_for(&state, 1, 3).glyph == Glyph::Obstacle);
        assert!(tile_for(&state, 3, 3).glyph == Glyph::Goal);
    }

    #[test]
    fn oversized_maze_never_fits_instead_of_wrapping() {
        assert_eq!(Renderer::new(20, 20).needed_size(), (82, 43));
        // 16384 columns is a 32769-wide lattice, 65538 terminal columns.
        assert_eq!(Renderer::new(16384, 1).needed_size(), (u16::MAX, 5));
        assert_eq!(Renderer::new(1, 40000).needed_size().1, u16::MAX);
    }
}
