use crate::grid::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub lives: u32,
    pub max_lives: u32,
}

impl Player {
    /// A player on the start cell with full lives.
    pub fn new(max_lives: u32) -> Self {
        Self {
            pos: Pos::new(0, 0),
            lives: max_lives,
            max_lives,
        }
    }

    /// Takes one life, never going below zero.
    pub fn hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Restores one life up to the maximum. Returns false when already full.
    pub fn heal(&mut self) -> bool {
        if self.lives < self.max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_at_origin() {
        let player = Player::new(5);
        assert_eq!(player.pos, Pos::new(0, 0));
        assert_eq!(player.lives, 5);
        assert!(!player.is_dead());
    }

    #[test]
    fn lives_stay_in_range() {
        let mut player = Player::new(2);
        assert!(!player.heal());
        assert_eq!(player.lives, 2);

        player.hit();
        assert!(player.heal());
        assert_eq!(player.lives, 2);

        player.hit();
        assert!(!player.is_dead());
        player.hit();
        assert!(player.is_dead());
        player.hit();
        assert_eq!(player.lives, 0);
        assert!(player.is_dead());
    }
}
