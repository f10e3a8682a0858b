//! Level progress for a user profile.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest per-message experience award (inclusive).
const INCREMENT_MIN: u64 = 15;
/// Largest per-message experience award (exclusive).
const INCREMENT_MAX: u64 = 25;

/// A user's accumulated experience and current level.
///
/// Experience is a running total; it is not reset when a level is gained.
/// A level is gained once the total meets the threshold for the current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Total accumulated experience
    #[serde(default)]
    pub experience: u64,
    /// Current level
    #[serde(default)]
    pub level: u32,
}

impl LevelInfo {
    pub fn new(experience: u64, level: u32) -> Self {
        Self { experience, level }
    }

    /// Experience a profile at `level` must accumulate before advancing.
    ///
    /// Strictly increasing in `level`.
    pub fn required_for_level(level: u32) -> u64 {
        let level = u64::from(level);
        5 * level * level + 50 * level + 100
    }

    /// Whether the accumulated experience satisfies the current threshold.
    pub fn should_level_up(&self) -> bool {
        self.experience >= Self::required_for_level(self.level)
    }

    /// Standard per-message experience award, uniform in `[15, 25)`.
    pub fn random_increment() -> u64 {
        rand::thread_rng().gen_range(INCREMENT_MIN..INCREMENT_MAX)
    }
}

impl std::fmt::Display for LevelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Level: {}, Experience: {}/{}]",
            self.level,
            self.experience,
            Self::required_for_level(self.level)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_curve() {
        assert_eq!(LevelInfo::required_for_level(0), 100);
        assert_eq!(LevelInfo::required_for_level(1), 155);
        assert_eq!(LevelInfo::required_for_level(5), 475);
        assert_eq!(LevelInfo::required_for_level(10), 1100);
    }

    #[test]
    fn test_threshold_strictly_increasing() {
        for level in 0..200 {
            assert!(
                LevelInfo::required_for_level(level) < LevelInfo::required_for_level(level + 1)
            );
        }
    }

    #[test]
    fn test_should_level_up_boundary() {
        assert!(!LevelInfo::new(99, 0).should_level_up());
        assert!(LevelInfo::new(100, 0).should_level_up());
        assert!(LevelInfo::new(101, 0).should_level_up());
    }

    #[test]
    fn test_random_increment_range() {
        for _ in 0..1000 {
            let amount = LevelInfo::random_increment();
            assert!((15..25).contains(&amount));
        }
    }
}
