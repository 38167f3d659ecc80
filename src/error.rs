use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameError {
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game requires between 5 and 10 players")]
    IncorrectNumberOfPlayers,
    #[error("a player with this username is already in the game")]
    UsernameAlreadyExists,
    #[error("the player roster is full")]
    MaximumPlayersReached,
    #[error("no level preset exists for this player count")]
    UnsupportedPlayerCount,
    #[error("no player exists with the given username")]
    PlayerNotFound,
    #[error("only the leader may propose players")]
    NoRightToPropose,
    #[error("team proposition is not in progress")]
    NoPropositionTime,
    #[error("only the leader may submit the team")]
    NoRightToSubmitTeam,
    #[error("voting is not in progress")]
    NoVotingTime,
    #[error("this player is not allowed to cast this vote")]
    NoRightToVote,
    #[error("this player has already voted on the proposed team")]
    AlreadyVotedForTeam,
    #[error("this player has already voted on the quest")]
    AlreadyVotedForQuest,
    #[error("assassination is not in progress")]
    NoAssassinationTime,
    #[error("only the assassin may name a victim")]
    NoRightToAssassinate,
    #[error("no commands are accepted while the game is frozen")]
    NoActionTime,
    #[error("this state transition is not permitted")]
    IllegalTransition,
}

impl GameError {
    /// A stable machine-readable kind, for transport layers to translate
    /// into protocol-level responses.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::AlreadyStarted => "GAME_ALREADY_STARTED",
            GameError::IncorrectNumberOfPlayers => "INCORRECT_NUMBER_OF_PLAYERS",
            GameError::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            GameError::MaximumPlayersReached => "MAXIMUM_PLAYERS_REACHED",
            GameError::UnsupportedPlayerCount => "UNSUPPORTED_PLAYER_COUNT",
            GameError::PlayerNotFound => "PLAYER_NOT_FOUND",
            GameError::NoRightToPropose => "NO_RIGHT_TO_PROPOSE",
            GameError::NoPropositionTime => "NO_PROPOSITION_TIME",
            GameError::NoRightToSubmitTeam => "NO_RIGHT_TO_SUBMIT_TEAM",
            GameError::NoVotingTime => "NO_VOTING_TIME",
            GameError::NoRightToVote => "NO_RIGHT_TO_VOTE",
            GameError::AlreadyVotedForTeam => "ALREADY_VOTED_FOR_TEAM",
            GameError::AlreadyVotedForQuest => "ALREADY_VOTED_FOR_QUEST",
            GameError::NoAssassinationTime => "NO_ASSASSINATION_TIME",
            GameError::NoRightToAssassinate => "NO_RIGHT_TO_ASSASSINATE",
            GameError::NoActionTime => "NO_ACTION_TIME",
            GameError::IllegalTransition => "ILLEGAL_TRANSITION",
        }
    }
}
