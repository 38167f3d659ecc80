use super::role::Role;
use super::vote::Vote;

/// A game player.
#[derive(Clone, Debug)]
pub struct Player {
    pub(crate) username: String,
    pub(crate) role: Option<Role>,
    pub(crate) vote: Option<Vote>,
    pub(crate) is_leader: bool,
    pub(crate) is_proposed: bool,
    pub(crate) is_assassin: bool,
    pub(crate) is_assassinated: bool,
    pub(crate) is_game_creator: bool,
}

impl Player {
    /// Creates a player with no role; roles are dealt when the game starts.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: None,
            vote: None,
            is_leader: false,
            is_proposed: false,
            is_assassin: false,
            is_assassinated: false,
            is_game_creator: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn vote(&self) -> Option<&Vote> {
        self.vote.as_ref()
    }

    pub fn is_leader(&self) -> bool {
        self.is_leader
    }

    pub fn is_proposed(&self) -> bool {
        self.is_proposed
    }

    pub fn is_assassin(&self) -> bool {
        self.is_assassin
    }

    pub fn is_assassinated(&self) -> bool {
        self.is_assassinated
    }

    pub fn is_game_creator(&self) -> bool {
        self.is_game_creator
    }

    /// Whether this player perceives `other` as evil. False until both
    /// players have been dealt a role.
    pub fn can_see(&self, other: &Player) -> bool {
        match (self.role, other.role) {
            (Some(mine), Some(theirs)) => mine.can_see(theirs),
            _ => false,
        }
    }
}
