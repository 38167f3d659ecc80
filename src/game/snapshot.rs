use super::player::Player;
use super::quest::Quest;
use super::quests::AssassinationStatus;
use super::role::{Loyalty, Role};
use super::vote::Vote;
use super::{Game, GameInner, StateKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A serializable deep copy of the full game state, detached from the live
/// object graph. This is the outbound surface a network layer broadcasts.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub roles_are_revealed: bool,
    pub players_manager: PlayersSnapshot,
    pub quests_manager: QuestsSnapshot,
    pub state: StateKind,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayersSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub leader_index: Option<usize>,
    pub is_submitted: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub username: String,
    pub role: Option<RoleSnapshot>,
    pub vote: Option<VoteSnapshot>,
    pub is_assassinated: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoleSnapshot {
    pub id: Role,
    pub loyalty: Loyalty,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteSnapshot {
    pub username: String,
    pub value: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestsSnapshot {
    pub level_preset: Option<PresetSnapshot>,
    pub quests: Vec<QuestSnapshot>,
    pub current_quest_index: usize,
    pub assassination_status: Option<AssassinationStatus>,
    pub team_voting_rounds_exhausted: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PresetSnapshot {
    pub good_count: usize,
    pub evil_count: usize,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestSnapshot {
    pub votes_needed: usize,
    pub fails_needed: usize,
    pub total_players: usize,
    pub team_vote_rounds: Vec<Vec<VoteSnapshot>>,
    pub team_voting_round_index: usize,
    pub quest_votes: Vec<VoteSnapshot>,
}

impl Game {
    /// Produces a snapshot of the whole game.
    pub fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().unwrap().snapshot()
    }
}

impl GameInner {
    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            created_at: self.created_at,
            started_at: self.started_at,
            finished_at: self.finished_at,
            roles_are_revealed: self.roles_are_revealed,
            players_manager: PlayersSnapshot {
                players: self.players.all().iter().map(Player::snapshot).collect(),
                leader_index: self.players.leader_index,
                is_submitted: self.players.is_submitted,
            },
            quests_manager: QuestsSnapshot {
                level_preset: self.quests.level_preset.as_ref().map(|preset| PresetSnapshot {
                    good_count: preset.good_count(),
                    evil_count: preset.evil_count(),
                }),
                quests: self.quests.quests.iter().map(Quest::snapshot).collect(),
                current_quest_index: self.quests.current_quest_index,
                assassination_status: self.quests.assassination_status,
                team_voting_rounds_exhausted: self.quests.team_voting_rounds_exhausted,
            },
            state: self.machine.current(),
        }
    }
}

impl Player {
    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            username: self.username.clone(),
            role: self.role.map(|role| RoleSnapshot { id: role, loyalty: role.loyalty() }),
            vote: self.vote.as_ref().map(Vote::snapshot),
            is_assassinated: self.is_assassinated,
        }
    }
}

impl Vote {
    fn snapshot(&self) -> VoteSnapshot {
        VoteSnapshot { username: self.username().to_string(), value: self.value() }
    }
}

impl Quest {
    fn snapshot(&self) -> QuestSnapshot {
        QuestSnapshot {
            votes_needed: self.votes_needed,
            fails_needed: self.fails_needed,
            total_players: self.total_players,
            team_vote_rounds: self
                .team_vote_rounds
                .iter()
                .map(|round| round.iter().map(Vote::snapshot).collect())
                .collect(),
            team_voting_round_index: self.team_voting_round_index,
            quest_votes: self.quest_votes.iter().map(Vote::snapshot).collect(),
        }
    }
}
