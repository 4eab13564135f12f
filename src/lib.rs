//! Procedurally generated perfect mazes with obstacles, life items and a
//! single-player win/lose lifecycle. Rendering and input live in the `maze`
//! binary; this crate is the in-memory core.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod maze;
pub mod placement;
pub mod player;

pub use config::Config;
pub use error::{MazeError, Result};
pub use game::{GameState, MoveResult, Observer, Outcome, Session, Status};
pub use grid::{Cell, Dir, Grid, Pos};
pub use placement::Entities;
pub use player::Player;
