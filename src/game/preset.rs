use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The team size and fail threshold for a single quest.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct QuestConfig {
    pub votes_needed: usize,
    pub fails_needed: usize,
}

/// Per-player-count configuration: how many players are dealt good and evil
/// roles, and the shape of the five quests.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct LevelPreset {
    good_count: usize,
    evil_count: usize,
    quests: [QuestConfig; 5],
}

impl LevelPreset {
    /// Looks up the preset for the given player count.
    pub fn new(player_count: usize) -> Result<Self, GameError> {
        let (good_count, evil_count, sizes) = match player_count {
            5 => (3, 2, [2, 3, 2, 3, 3]),
            6 => (4, 2, [2, 3, 4, 3, 4]),
            7 => (4, 3, [2, 3, 3, 4, 4]),
            8 => (5, 3, [3, 4, 4, 5, 5]),
            9 => (6, 3, [3, 4, 4, 5, 5]),
            10 => (6, 4, [3, 4, 4, 5, 5]),
            _ => return Err(GameError::UnsupportedPlayerCount),
        };

        // The fourth quest needs two failing votes in larger games.
        let fails_needed = |quest: usize| if player_count >= 7 && quest == 3 { 2 } else { 1 };

        let mut quests = [QuestConfig { votes_needed: 0, fails_needed: 0 }; 5];
        for (i, votes_needed) in sizes.into_iter().enumerate() {
            quests[i] = QuestConfig { votes_needed, fails_needed: fails_needed(i) };
        }

        Ok(Self { good_count, evil_count, quests })
    }

    pub fn good_count(&self) -> usize {
        self.good_count
    }

    pub fn evil_count(&self) -> usize {
        self.evil_count
    }

    pub fn player_count(&self) -> usize {
        self.good_count + self.evil_count
    }

    pub fn quests_config(&self) -> &[QuestConfig; 5] {
        &self.quests
    }
}
