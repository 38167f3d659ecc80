use super::preset::QuestConfig;
use super::vote::Vote;
use crate::error::GameError;

/// The number of team-voting rounds a quest may go through. The final round
/// is approved automatically rather than voted on.
pub const TEAM_VOTING_ROUNDS: usize = 5;

/// The resolution of a quest, or of the game as a whole.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    InProgress,
    Fail,
    Success,
}

/// A single mission: up to five rounds of public team voting followed by a
/// private quest vote among the proposed team.
#[derive(Clone, Debug)]
pub struct Quest {
    pub(crate) votes_needed: usize,
    pub(crate) fails_needed: usize,
    pub(crate) total_players: usize,
    pub(crate) team_vote_rounds: [Vec<Vote>; TEAM_VOTING_ROUNDS],
    pub(crate) team_voting_round_index: usize,
    pub(crate) quest_votes: Vec<Vote>,
}

impl Quest {
    pub fn new(config: QuestConfig, total_players: usize) -> Self {
        Self {
            votes_needed: config.votes_needed,
            fails_needed: config.fails_needed,
            total_players,
            team_vote_rounds: core::array::from_fn(|_| Vec::new()),
            team_voting_round_index: 0,
            quest_votes: Vec::new(),
        }
    }

    pub fn votes_needed(&self) -> usize {
        self.votes_needed
    }

    pub fn fails_needed(&self) -> usize {
        self.fails_needed
    }

    pub fn team_voting_round_index(&self) -> usize {
        self.team_voting_round_index
    }

    /// Records a ballot, routed to the quest vote once team voting has
    /// succeeded and to the current team-voting round otherwise.
    pub fn add_vote(&mut self, vote: Vote) -> Result<(), GameError> {
        if self.quest_voting_allowed() {
            if self.quest_votes.iter().any(|v| v.username() == vote.username()) {
                return Err(GameError::AlreadyVotedForQuest);
            }
            self.quest_votes.push(vote);
        } else {
            let round = &mut self.team_vote_rounds[self.team_voting_round_index];
            if round.iter().any(|v| v.username() == vote.username()) {
                return Err(GameError::AlreadyVotedForTeam);
            }
            round.push(vote);
        }
        Ok(())
    }

    fn current_round(&self) -> &[Vote] {
        &self.team_vote_rounds[self.team_voting_round_index]
    }

    pub fn current_round_complete(&self) -> bool {
        self.current_round().len() == self.total_players
    }

    /// Whether team ballots are still being accepted.
    pub fn team_voting_allowed(&self) -> bool {
        !self.current_round_complete() || !self.team_voting_succeeded()
    }

    /// Whether the current round is complete with a strict majority of
    /// approvals. Ties reject.
    pub fn team_voting_succeeded(&self) -> bool {
        let approvals = self.current_round().iter().filter(|v| v.value()).count();
        let rejections = self.current_round().len() - approvals;
        self.current_round_complete() && approvals > rejections
    }

    /// Whether the current round is complete and the team was voted down.
    pub fn current_round_rejected(&self) -> bool {
        self.current_round_complete() && !self.team_voting_succeeded()
    }

    /// Opens the next team-voting round after a rejection.
    pub fn next_team_voting_round(&mut self) {
        if self.team_voting_round_index < TEAM_VOTING_ROUNDS - 1 {
            self.team_voting_round_index += 1;
        }
    }

    pub fn is_last_round_of_team_voting(&self) -> bool {
        self.team_voting_round_index == TEAM_VOTING_ROUNDS - 1
    }

    pub fn quest_voting_allowed(&self) -> bool {
        self.team_voting_succeeded() && self.quest_votes.len() < self.votes_needed
    }

    pub fn quest_voting_finished(&self) -> bool {
        self.quest_votes.len() == self.votes_needed
    }

    /// The quest result: failed once the configured number of reject votes
    /// has been cast, succeeded otherwise. Terminal once every team member
    /// has voted.
    pub fn status(&self) -> Outcome {
        if !self.quest_voting_finished() {
            return Outcome::InProgress;
        }
        let fails = self.quest_votes.iter().filter(|v| !v.value()).count();
        if fails >= self.fails_needed {
            Outcome::Fail
        } else {
            Outcome::Success
        }
    }
}
