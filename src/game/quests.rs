use super::preset::LevelPreset;
use super::quest::{Outcome, Quest};
use super::vote::Vote;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The number of quests played in a game.
pub const QUEST_COUNT: usize = 5;

/// Winning either three quests ends the game (for evil outright; for good,
/// pending the assassination).
const QUESTS_TO_WIN: usize = 3;

/// How the assassination attempt resolved.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum AssassinationStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAIL")]
    Fail,
}

/// The ordered collection of quests, the cursor over them, and the
/// assassination verdict that can overturn a good victory.
#[derive(Clone, Debug, Default)]
pub struct QuestsManager {
    pub(crate) level_preset: Option<LevelPreset>,
    pub(crate) quests: Vec<Quest>,
    pub(crate) current_quest_index: usize,
    pub(crate) assassination_status: Option<AssassinationStatus>,
    pub(crate) team_voting_rounds_exhausted: bool,
}

impl QuestsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the five quests from the preset for this player count.
    pub fn init(&mut self, preset: LevelPreset) {
        let total_players = preset.player_count();
        self.quests = preset
            .quests_config()
            .iter()
            .map(|config| Quest::new(*config, total_players))
            .collect();
        self.level_preset = Some(preset);
        self.current_quest_index = 0;
        self.assassination_status = None;
        self.team_voting_rounds_exhausted = false;
    }

    pub fn current_quest(&self) -> &Quest {
        &self.quests[self.current_quest_index]
    }

    pub fn current_quest_mut(&mut self) -> &mut Quest {
        &mut self.quests[self.current_quest_index]
    }

    /// Moves the cursor to the next quest once the current one is terminal.
    pub fn next_quest(&mut self) {
        if self.current_quest_index < self.quests.len() - 1 {
            self.current_quest_index += 1;
            self.team_voting_rounds_exhausted = false;
        }
    }

    pub fn add_vote(&mut self, vote: Vote) -> Result<(), GameError> {
        self.current_quest_mut().add_vote(vote)
    }

    /// Advances the current quest's team-voting round after a rejected team.
    pub fn on_team_votes_rejected(&mut self) {
        let quest = self.current_quest_mut();
        quest.next_team_voting_round();
        if quest.is_last_round_of_team_voting() {
            self.team_voting_rounds_exhausted = true;
        }
    }

    fn quests_with_status(&self, status: Outcome) -> usize {
        self.quests.iter().filter(|q| q.status() == status).count()
    }

    /// The overall game result. Three failed quests are an outright evil
    /// victory; three successes are a good victory, but only provisionally
    /// until the assassination resolves.
    pub fn status(&self) -> Outcome {
        match self.assassination_status {
            Some(AssassinationStatus::Success) => Outcome::Fail,
            Some(AssassinationStatus::Fail) => Outcome::Success,
            None => {
                if self.quests_with_status(Outcome::Fail) >= QUESTS_TO_WIN {
                    Outcome::Fail
                } else if self.quests_with_status(Outcome::Success) >= QUESTS_TO_WIN {
                    Outcome::Success
                } else {
                    Outcome::InProgress
                }
            }
        }
    }

    /// The assassin gets one shot, and only after good has won three quests.
    pub fn assassination_is_allowed(&self) -> bool {
        self.assassination_status.is_none()
            && self.quests_with_status(Outcome::Success) >= QUESTS_TO_WIN
    }

    /// Finalises the game: killing Merlin flips the provisional good victory.
    pub fn set_assassination_status(&mut self, victim_was_merlin: bool) {
        self.assassination_status = Some(if victim_was_merlin {
            AssassinationStatus::Success
        } else {
            AssassinationStatus::Fail
        });
    }

    pub fn assassination_status(&self) -> Option<AssassinationStatus> {
        self.assassination_status
    }

    pub fn team_voting_rounds_exhausted(&self) -> bool {
        self.team_voting_rounds_exhausted
    }
}
