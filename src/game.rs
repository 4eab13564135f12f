//! Game session: player movement, collisions and the win/lose lifecycle.

use crate::config::Config;
use crate::error::{MazeError, Result};
use crate::grid::{step, Dir, Grid};
use crate::maze::new_maze;
use crate::placement::{place_entities, Entities};
use crate::player::Player;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// A wall or the grid edge is in the way.
    Blocked,
    /// The session already ended; only a reset gets it going again.
    Ignored,
}

/// Receives notifications from a `Session`.
pub trait Observer {
    /// After every successful move and after every reset.
    fn on_state_changed(&mut self, _state: &GameState) {}

    /// Once per transition into `Won` or `Lost`.
    fn on_terminal(&mut self, _outcome: Outcome) {}
}

impl Observer for () {}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub entities: Entities,
    pub status: Status,
    /// Successful moves since the session started.
    pub moves: u32,
}

impl GameState {
    /// Builds a fresh maze, places entities and puts the player on the start cell.
    pub fn generate(config: &Config, rng: &mut impl Rng) -> Result<Self> {
        config.validate()?;
        let grid = new_maze(config.cols, config.rows, rng);
        let entities = place_entities(&grid, config.num_life_items, rng)?;
        Ok(Self::with_layout(grid, entities, config.max_lives))
    }

    /// A playing state over an existing grid and entity layout.
    pub fn with_layout(grid: Grid, entities: Entities, max_lives: u32) -> Self {
        Self {
            grid,
            player: Player::new(max_lives),
            entities,
            status: Status::Playing,
            moves: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != Status::Playing
    }

    fn apply_move(&mut self, dir: Dir) -> MoveResult {
        if self.is_terminal() {
            return MoveResult::Ignored;
        }
        let from = self.player.pos;
        if self.grid.cell(from).has_wall(dir) {
            return MoveResult::Blocked;
        }
        match step(&self.grid, from, dir) {
            Some(to) => {
                self.player.pos = to;
                self.moves += 1;
                MoveResult::Moved
            }
            None => MoveResult::Blocked,
        }
    }

    /// Resolves whatever sits on the player's cell, then checks for the goal.
    fn resolve_collisions(&mut self) -> Option<Outcome> {
        let pos = self.player.pos;
        if let Some(idx) = self.entities.obstacles.iter().position(|&o| o == pos) {
            self.entities.obstacles.remove(idx);
            self.player.hit();
            debug!(?pos, lives = self.player.lives, "hit obstacle");
            if self.player.is_dead() {
                self.status = Status::Lost;
                return Some(Outcome::Lost);
            }
        } else if let Some(idx) = self.entities.life_items.iter().position(|&l| l == pos) {
            self.entities.life_items.remove(idx);
            self.player.heal();
            debug!(?pos, lives = self.player.lives, "picked up life item");
        }

        if pos == self.grid.goal() {
            self.status = Status::Won;
            return Some(Outcome::Won);
        }
        None
    }
}

/// One game session. Owns its random source so `reset` can roll a new maze.
pub struct Session<R: Rng> {
    config: Config,
    rng: R,
    state: GameState,
}

impl Session<StdRng> {
    /// Seeds from `config.seed` when present, otherwise from entropy.
    pub fn from_config(config: Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: Config, mut rng: R) -> Result<Self> {
        let state = GameState::generate(&config, &mut rng)?;
        info!(
            cols = config.cols,
            rows = config.rows,
            lives = config.max_lives,
            "session started"
        );
        Ok(Self { config, rng, state })
    }

    /// Wraps a prepared state; `reset` still regenerates from `config`.
    ///
    /// The state's grid must have the dimensions `config` describes.
    pub fn from_state(config: Config, rng: R, state: GameState) -> Result<Self> {
        config.validate()?;
        if state.grid.width != config.cols || state.grid.height != config.rows {
            return Err(MazeError::InvalidConfiguration(format!(
                "state grid is {}x{} but config asks for {}x{}",
                state.grid.width, state.grid.height, config.cols, config.rows
            )));
        }
        Ok(Self { config, rng, state })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes one move intent to completion.
    ///
    /// Blocked and ignored intents change nothing and notify no one.
    pub fn submit_move(&mut self, dir: Dir, observer: &mut impl Observer) -> MoveResult {
        let result = self.state.apply_move(dir);
        trace!(?dir, ?result, "move intent");
        if result != MoveResult::Moved {
            return result;
        }

        let outcome = self.state.resolve_collisions();
        observer.on_state_changed(&self.state);
        if let Some(outcome) = outcome {
            info!(?outcome, moves = self.state.moves, "session over");
            observer.on_terminal(outcome);
        }
        result
    }

    /// Throws the current state away and starts over with a new maze.
    pub fn reset(&mut self, observer: &mut impl Observer) -> Result<()> {
        self.state = GameState::generate(&self.config, &mut self.rng)?;
        info!("session reset");
        observer.on_state_changed(&self.state);
        Ok(())
    }
}
