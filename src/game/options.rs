use super::role::Role;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for customising the role set. Merlin and the Assassin are always
/// in play; these switches only govern the optional special roles.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct RoleOptions {
    /// Whether to include Percival (good team).
    pub percival: bool,
    /// Whether to include Morgana (evil team).
    pub morgana: bool,
    /// Whether to include Mordred (evil team).
    pub mordred: bool,
    /// Whether to include Oberon (evil team).
    pub oberon: bool,
}

impl RoleOptions {
    /// Derives the switches from the role list handed to `start`. Mentions
    /// of non-optional roles are ignored.
    pub fn from_roles(roles: &[Role]) -> Self {
        Self {
            percival: roles.contains(&Role::Percival),
            morgana: roles.contains(&Role::Morgana),
            mordred: roles.contains(&Role::Mordred),
            oberon: roles.contains(&Role::Oberon),
        }
    }
}

/// Timing and seeding configuration for a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// Seed for role assignment and leader selection.
    pub seed: u64,
    /// How long the game stays frozen after a team is submitted.
    pub after_team_proposition: Duration,
    /// How long the game stays frozen after a team vote completes.
    pub after_team_voting: Duration,
    /// How long the game stays frozen after a quest vote completes.
    pub after_quest_voting: Duration,
}

const DEFAULT_WAIT: Duration = Duration::from_millis(5000);

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: rand::thread_rng().next_u64(),
            after_team_proposition: DEFAULT_WAIT,
            after_team_voting: DEFAULT_WAIT,
            after_quest_voting: DEFAULT_WAIT,
        }
    }
}

impl GameConfig {
    /// A configuration with no frozen intervals, so every transition takes
    /// effect synchronously. Intended for deterministic tests and drivers
    /// that do their own pacing.
    pub fn instant(seed: u64) -> Self {
        Self {
            seed,
            after_team_proposition: Duration::ZERO,
            after_team_voting: Duration::ZERO,
            after_quest_voting: Duration::ZERO,
        }
    }
}
