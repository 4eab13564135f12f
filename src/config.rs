use crate::error::{MazeError, Result};
use crate::placement::{obstacle_count, required_cells};

pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_LIVES: u32 = 5;
pub const DEFAULT_LIFE_ITEMS: usize = 3;

/// Session settings. Obstacles are always `num_life_items + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub cols: usize,
    pub rows: usize,
    /// Starting and maximum lives.
    pub max_lives: u32,
    pub num_life_items: usize,
    /// Fixed seed for reproducible mazes; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            max_lives: DEFAULT_LIVES,
            num_life_items: DEFAULT_LIFE_ITEMS,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `MAZE_COLS`, `MAZE_ROWS`, `MAZE_LIVES`, `MAZE_LIFE_ITEMS` and
    /// `MAZE_SEED` through `lookup`. Missing or unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            cols: parse("MAZE_COLS").map_or(defaults.cols, |v| v as usize),
            rows: parse("MAZE_ROWS").map_or(defaults.rows, |v| v as usize),
            max_lives: parse("MAZE_LIVES")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.max_lives),
            num_life_items: parse("MAZE_LIFE_ITEMS").map_or(defaults.num_life_items, |v| v as usize),
            seed: parse("MAZE_SEED"),
        }
    }

    pub fn num_obstacles(&self) -> usize {
        obstacle_count(self.num_life_items)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(MazeError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.max_lives == 0 {
            return Err(MazeError::InvalidConfiguration(
                "player needs at least one life".to_string(),
            ));
        }
        let needed = required_cells(self.num_life_items);
        let available = self.cols.saturating_mul(self.rows);
        if available < needed {
            return Err(MazeError::InvalidConfiguration(format!(
                "a {}x{} grid has {} cells; {} obstacles, {} life items, start and goal need {}",
                self.cols,
                self.rows,
                available,
                self.num_obstacles(),
                self.num_life_items,
                needed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.cols, 20);
        assert_eq!(config.rows, 20);
        assert_eq!(config.max_lives, 5);
        assert_eq!(config.num_obstacles(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let config = Config::from_lookup(lookup(&[
            ("MAZE_COLS", "8"),
            ("MAZE_ROWS", " 6 "),
            ("MAZE_LIVES", "lots"),
            ("MAZE_SEED", "1234"),
        ]));
        assert_eq!(config.cols, 8);
        assert_eq!(config.rows, 6);
        assert_eq!(config.max_lives, DEFAULT_LIVES);
        assert_eq!(config.num_life_items, DEFAULT_LIFE_ITEMS);
        assert_eq!(config.seed, Some(1234));

        let empty = Config::from_lookup(lookup(&[]));
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        let zero_grid = Config {
            cols: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_grid.validate(),
            Err(MazeError::InvalidConfiguration(_))
        ));

        let no_lives = Config {
            max_lives: 0,
            ..Config::default()
        };
        assert!(no_lives.validate().is_err());

        let crowded = Config {
            cols: 3,
            rows: 3,
            num_life_items: 4,
            ..Config::default()
        };
        assert!(crowded.validate().is_err());

        let snug = Config {
            cols: 3,
            rows: 3,
            num_life_items: 3,
            ..Config::default()
        };
        assert!(snug.validate().is_ok());
    }
}
