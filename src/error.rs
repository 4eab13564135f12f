/// Errors surfaced by the maze game.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// The requested grid or entity counts cannot make a playable session.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
