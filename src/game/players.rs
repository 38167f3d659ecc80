use super::options::RoleOptions;
use super::player::Player;
use super::preset::LevelPreset;
use super::role::{Role, MINIONS, SERVANTS};
use super::vote::Vote;
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;

pub const MAX_PLAYERS: usize = 10;

/// The player roster: membership, leader rotation, role assignment and the
/// routing of propositions, submissions and votes to individual players.
#[derive(Clone, Debug, Default)]
pub struct PlayersManager {
    pub(crate) players: Vec<Player>,
    pub(crate) leader_index: Option<usize>,
    pub(crate) is_submitted: bool,
}

impl PlayersManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player to the roster. The first player added is the game creator.
    pub fn add(&mut self, player: Player) -> Result<(), GameError> {
        if self.players.iter().any(|p| p.username == player.username) {
            return Err(GameError::UsernameAlreadyExists);
        }
        if self.players.len() == MAX_PLAYERS {
            return Err(GameError::MaximumPlayersReached);
        }
        let mut player = player;
        player.is_game_creator = self.players.is_empty();
        self.players.push(player);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }

    pub fn all(&self) -> &[Player] {
        &self.players
    }

    pub fn usernames(&self) -> Vec<String> {
        self.players.iter().map(|p| p.username.clone()).collect()
    }

    fn find(&self, username: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.username == username)
    }

    fn find_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.username == username)
    }

    /// Deals a shuffled hand of roles to the roster and seats a random
    /// initial leader. Merlin and the Assassin are always dealt; the options
    /// only toggle the optional roles, taken in a fixed order until the
    /// loyalty's slots run out.
    pub fn assign_roles(
        &mut self,
        preset: &LevelPreset,
        options: RoleOptions,
        rng: &mut impl Rng,
    ) {
        let mut roles = Vec::with_capacity(self.players.len());

        roles.push(Role::Merlin);
        if options.percival && roles.len() < preset.good_count() {
            roles.push(Role::Percival);
        }
        let mut servants = SERVANTS.iter();
        while roles.len() < preset.good_count() {
            roles.push(*servants.next().unwrap());
        }

        roles.push(Role::Assassin);
        let evil_start = preset.good_count();
        for role in [Role::Morgana, Role::Mordred, Role::Oberon] {
            let enabled = match role {
                Role::Morgana => options.morgana,
                Role::Mordred => options.mordred,
                _ => options.oberon,
            };
            if enabled && roles.len() - evil_start < preset.evil_count() {
                roles.push(role);
            }
        }
        let mut minions = MINIONS.iter();
        while roles.len() - evil_start < preset.evil_count() {
            roles.push(*minions.next().unwrap());
        }

        roles.shuffle(rng);
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = Some(role);
            player.is_assassin = role == Role::Assassin;
        }

        let leader = rng.gen_range(0..self.players.len());
        self.leader_index = Some(leader);
        self.players[leader].is_leader = true;
    }

    /// Passes leadership to the next player around the table.
    pub fn next_leader(&mut self) {
        if let Some(index) = self.leader_index {
            self.players[index].is_leader = false;
        }
        let next = self
            .leader_index
            .map(|index| (index + 1) % self.players.len())
            .unwrap_or(0);
        self.leader_index = Some(next);
        self.players[next].is_leader = true;
    }

    pub fn leader(&self) -> Option<&Player> {
        self.leader_index.map(|index| &self.players[index])
    }

    /// Flips a player's membership in the proposed team. Unknown usernames
    /// are ignored.
    pub fn toggle_is_proposed(&mut self, username: &str) {
        if let Some(player) = self.find_mut(username) {
            player.is_proposed = !player.is_proposed;
        }
    }

    pub fn proposed_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_proposed).collect()
    }

    pub fn is_allowed_to_propose_player(&self, username: &str) -> bool {
        self.leader().map_or(false, |leader| leader.username == username)
    }

    pub fn is_allowed_to_propose_team(&self, username: &str) -> bool {
        self.is_allowed_to_propose_player(username)
    }

    pub fn mark_as_submitted(&mut self) {
        self.is_submitted = true;
    }

    pub fn unmark_as_submitted(&mut self) {
        self.is_submitted = false;
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    /// Assigns the ballot to the player it names, if present.
    pub fn set_vote(&mut self, vote: Vote) {
        if let Some(player) = self.find_mut(vote.username()) {
            player.vote = Some(vote);
        }
    }

    /// Every roster member votes on a team, once per round.
    pub fn is_allowed_to_vote_for_team(&self, username: &str) -> bool {
        self.find(username).map_or(false, |p| p.vote.is_none())
    }

    /// Only proposed players vote on a quest, once each.
    pub fn is_allowed_to_vote_for_quest(&self, username: &str) -> bool {
        self.find(username)
            .map_or(false, |p| p.is_proposed && p.vote.is_none())
    }

    pub fn reset_votes(&mut self) {
        for player in &mut self.players {
            player.vote = None;
        }
    }

    pub fn reset_propositions(&mut self) {
        for player in &mut self.players {
            player.is_proposed = false;
        }
    }

    pub fn reset(&mut self) {
        self.reset_votes();
        self.reset_propositions();
    }

    pub fn assassin(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_assassin)
    }

    pub fn victim(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_assassinated)
    }

    pub fn game_creator(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_game_creator)
    }

    /// Marks the victim, provided the caller really is the assassin.
    pub fn assassinate(&mut self, assassin: &str, victim: &str) -> Result<(), GameError> {
        if !self.find(assassin).map_or(false, |p| p.is_assassin) {
            return Err(GameError::NoRightToAssassinate);
        }
        let victim = self.find_mut(victim).ok_or(GameError::PlayerNotFound)?;
        victim.is_assassinated = true;
        Ok(())
    }
}
