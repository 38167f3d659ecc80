use self::machine::{GameStateMachine, Go};
pub use self::machine::{StateKind, Transition};
pub use self::options::{GameConfig, RoleOptions};
pub use self::player::Player;
pub use self::players::{PlayersManager, MAX_PLAYERS};
pub use self::preset::{LevelPreset, QuestConfig};
pub use self::quest::{Outcome, Quest, TEAM_VOTING_ROUNDS};
pub use self::quests::{AssassinationStatus, QuestsManager, QUEST_COUNT};
pub use self::role::{Loyalty, Role};
pub use self::snapshot::{
    GameSnapshot, PlayerSnapshot, PlayersSnapshot, PresetSnapshot, QuestSnapshot, QuestsSnapshot,
    RoleSnapshot, VoteSnapshot,
};
pub use self::vote::Vote;
use crate::error::GameError;
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

mod machine;
mod options;
mod player;
mod players;
mod preset;
mod quest;
mod quests;
mod role;
mod snapshot;
mod test;
mod vote;

pub const MIN_PLAYERS: usize = 5;

/// A game of Avalon.
///
/// The handle is cheap to clone and may be shared with a transport layer;
/// every command locks the single underlying state graph, so commands are
/// totally ordered by arrival. Commands themselves never suspend. The only
/// timers are the frozen interludes between states and the role-reveal
/// concealment window, both of which run as background tasks.
#[derive(Clone)]
pub struct Game {
    inner: Arc<Mutex<GameInner>>,
}

/// The side effect to run when a destination state is installed. Effects run
/// once the frozen interval ends rather than when the transition is
/// requested, so a snapshot taken during the freeze still shows the ballots
/// being revealed.
#[derive(Clone, Copy, Debug)]
pub(crate) enum EntryAction {
    None,
    /// The team was approved: clear ballots so the team can vote on the quest.
    TeamApproved,
    /// The team was voted down: back to proposition under the next leader.
    TeamRejected,
    /// The quest resolved without ending the game: set up the next one.
    NextQuest,
    /// Fifth-round submission: every player's team ballot is forced to
    /// approve, then the machine proceeds to quest voting.
    PreApproveTeam,
    FinishGame,
}

struct GameInner {
    id: String,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    roles_are_revealed: bool,
    reveal: Option<watch::Sender<bool>>,
    players: PlayersManager,
    quests: QuestsManager,
    machine: GameStateMachine,
    config: GameConfig,
    rng: ChaCha8Rng,
}

fn wait_after(config: &GameConfig, from: StateKind) -> Duration {
    match from {
        StateKind::TeamProposition => config.after_team_proposition,
        StateKind::TeamVoting | StateKind::TeamVotingPreApproved => config.after_team_voting,
        StateKind::QuestVoting => config.after_quest_voting,
        _ => Duration::ZERO,
    }
}

impl Game {
    /// Creates a new game of Avalon.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let id = (0..4).map(|_| rng.gen_range('A'..='Z')).collect();
        let inner = GameInner {
            id,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            roles_are_revealed: false,
            reveal: None,
            players: PlayersManager::new(),
            quests: QuestsManager::new(),
            machine: GameStateMachine::new(),
            config,
            rng,
        };
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    /// Gets the unique game ID.
    pub fn id(&self) -> String {
        self.inner.lock().unwrap().id.clone()
    }

    /// Gets the current state of the game loop.
    pub fn state(&self) -> StateKind {
        self.inner.lock().unwrap().machine.current()
    }

    pub fn roles_are_revealed(&self) -> bool {
        self.inner.lock().unwrap().roles_are_revealed
    }

    /// Adds a player to the roster. Only valid before the game has started.
    pub fn add_player(&self, player: Player) -> Result<(), GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::Preparation {
            return Err(GameError::AlreadyStarted);
        }
        inner.players.add(player)
    }

    /// Starts the game: deals roles, builds the quests and opens the first
    /// team proposition. `optional_roles` toggles Percival, Morgana, Mordred
    /// and Oberon; Merlin and the Assassin are always in play.
    pub fn start(&self, optional_roles: &[Role]) -> Result<Transition, GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::Preparation {
            return Err(GameError::AlreadyStarted);
        }
        let count = inner.players.count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::IncorrectNumberOfPlayers);
        }
        let preset = LevelPreset::new(count)?;
        let options = RoleOptions::from_roles(optional_roles);
        inner.players.assign_roles(&preset, options, &mut inner.rng);
        inner.quests.init(preset);
        inner.started_at = Some(Utc::now());
        log::info!("game {}: started with {} players", inner.id, count);
        self.transition(inner, StateKind::TeamProposition, EntryAction::None)
    }

    /// Reveals every player's role for the given number of seconds, after
    /// which they are concealed again. Calling again while a reveal window
    /// is open returns the same completion handle; calling after it closed
    /// opens a fresh window.
    pub fn reveal_roles(&self, seconds: u64) -> Transition {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reveal) = &inner.reveal {
            return Transition::pending(reveal.subscribe());
        }
        let (tx, rx) = watch::channel(false);
        inner.roles_are_revealed = true;
        inner.reveal = Some(tx);
        drop(inner);

        let game = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            game.conceal_roles();
        });
        Transition::pending(rx)
    }

    /// Flips a player's membership in the team proposed for the current
    /// quest. Only the leader may propose, and only before submission.
    pub fn toggle_is_proposed(&self, leader: &str, target: &str) -> Result<(), GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::TeamProposition || inner.players.is_submitted() {
            return Err(GameError::NoPropositionTime);
        }
        if !inner.players.is_allowed_to_propose_player(leader) {
            return Err(GameError::NoRightToPropose);
        }
        inner.players.toggle_is_proposed(target);
        Ok(())
    }

    /// Puts the proposed team up for a public vote. On the fifth proposition
    /// of a quest the vote is a formality: the machine passes through
    /// [StateKind::TeamVotingPreApproved] and approves on everyone's behalf.
    pub fn submit_team(&self, leader: &str) -> Result<Transition, GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::TeamProposition {
            return Err(GameError::NoPropositionTime);
        }
        if !inner.players.is_allowed_to_propose_team(leader) {
            return Err(GameError::NoRightToSubmitTeam);
        }
        let quest = inner.quests.current_quest();
        if inner.players.proposed_players().len() != quest.votes_needed() {
            return Err(GameError::IncorrectNumberOfPlayers);
        }
        let forced = quest.is_last_round_of_team_voting();
        inner.players.mark_as_submitted();
        if forced {
            self.transition(inner, StateKind::TeamVotingPreApproved, EntryAction::PreApproveTeam)
        } else {
            self.transition(inner, StateKind::TeamVoting, EntryAction::None)
        }
    }

    /// Casts a ballot on the proposed team. Once the whole roster has voted,
    /// a strict majority of approvals sends the team on the quest; anything
    /// else hands the leadership on and reopens proposition.
    pub fn vote_for_team(&self, username: &str, value: bool) -> Result<Transition, GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::TeamVoting {
            return Err(GameError::NoVotingTime);
        }
        if !inner.players.is_allowed_to_vote_for_team(username) {
            return Err(GameError::NoRightToVote);
        }
        let vote = Vote::new(username, value);
        inner.quests.add_vote(vote.clone())?;
        inner.players.set_vote(vote);

        let quest = inner.quests.current_quest();
        if !quest.current_round_complete() {
            return Ok(Transition::ready());
        }
        if quest.team_voting_succeeded() {
            self.transition(inner, StateKind::QuestVoting, EntryAction::TeamApproved)
        } else {
            // A fifth-round rejection cannot reach this point: the fifth
            // submission goes through TeamVotingPreApproved instead.
            self.transition(inner, StateKind::TeamProposition, EntryAction::TeamRejected)
        }
    }

    /// Casts a ballot on the quest itself. Only proposed players vote. The
    /// final ballot resolves the quest and either ends the game, opens the
    /// assassination, or moves on to the next quest.
    pub fn vote_for_quest(&self, username: &str, value: bool) -> Result<Transition, GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::QuestVoting {
            return Err(GameError::NoVotingTime);
        }
        if !inner.players.is_allowed_to_vote_for_quest(username) {
            return Err(GameError::NoRightToVote);
        }
        let vote = Vote::new(username, value);
        inner.quests.add_vote(vote.clone())?;
        inner.players.set_vote(vote);

        if !inner.quests.current_quest().quest_voting_finished() {
            return Ok(Transition::ready());
        }
        log::info!(
            "game {}: quest {} resolved as {:?}",
            inner.id,
            inner.quests.current_quest_index + 1,
            inner.quests.current_quest().status()
        );
        if inner.quests.status() == Outcome::Fail {
            self.transition(inner, StateKind::Finish, EntryAction::FinishGame)
        } else if inner.quests.assassination_is_allowed() {
            self.transition(inner, StateKind::Assassination, EntryAction::None)
        } else {
            self.transition(inner, StateKind::TeamProposition, EntryAction::NextQuest)
        }
    }

    /// The assassin names a victim; killing Merlin overturns the good
    /// victory. Ends the game either way.
    pub fn assassinate(&self, assassin: &str, victim: &str) -> Result<Transition, GameError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.ensure_not_frozen()?;
        if inner.machine.current() != StateKind::Assassination
            || !inner.quests.assassination_is_allowed()
        {
            return Err(GameError::NoAssassinationTime);
        }
        inner.players.assassinate(assassin, victim)?;
        let was_merlin = inner.players.victim().and_then(|p| p.role()) == Some(Role::Merlin);
        inner.quests.set_assassination_status(was_merlin);
        log::info!(
            "game {}: assassination {}",
            inner.id,
            if was_merlin { "succeeded" } else { "failed" }
        );
        self.transition(inner, StateKind::Finish, EntryAction::FinishGame)
    }

    /// Requests a transition; when the source state carries a configured
    /// wait, the machine freezes and the destination installs on a timer.
    fn transition(
        &self,
        inner: &mut GameInner,
        to: StateKind,
        entry: EntryAction,
    ) -> Result<Transition, GameError> {
        let wait = wait_after(&inner.config, inner.machine.current());
        match inner.machine.go(to, entry, wait)? {
            Go::Installed => {
                log::debug!("game {}: entering {:?}", inner.id, to);
                if let Some(chained) = inner.run_entry(entry) {
                    self.schedule(chained);
                }
                Ok(Transition::ready())
            }
            Go::Frozen { wait, done } => {
                log::debug!("game {}: frozen for {:?} ahead of {:?}", inner.id, wait, to);
                self.schedule(wait);
                Ok(Transition::pending(done))
            }
        }
    }

    fn schedule(&self, wait: Duration) {
        let game = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            game.complete_transition();
        });
    }

    /// Timer body: installs the pending state and runs its entry effect.
    fn complete_transition(&self) {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let Some((to, entry, done)) = inner.machine.thaw() else {
            return;
        };
        log::debug!("game {}: entering {:?}", inner.id, to);
        let chained = inner.run_entry(entry);
        done.send(true).ok();
        drop(guard);
        if let Some(wait) = chained {
            self.schedule(wait);
        }
    }

    fn conceal_roles(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.roles_are_revealed = false;
        if let Some(reveal) = inner.reveal.take() {
            reveal.send(true).ok();
        }
    }
}

impl GameInner {
    fn ensure_not_frozen(&self) -> Result<(), GameError> {
        if self.machine.is_frozen() {
            Err(GameError::NoActionTime)
        } else {
            Ok(())
        }
    }

    /// Runs the entry effect of a freshly installed state. Returns the wait
    /// of a chained frozen transition for the caller to schedule.
    fn run_entry(&mut self, entry: EntryAction) -> Option<Duration> {
        match entry {
            EntryAction::None => None,
            EntryAction::TeamApproved => {
                self.players.reset_votes();
                None
            }
            EntryAction::TeamRejected => {
                self.players.unmark_as_submitted();
                self.players.reset();
                self.quests.on_team_votes_rejected();
                self.players.next_leader();
                None
            }
            EntryAction::NextQuest => {
                self.players.unmark_as_submitted();
                self.players.reset();
                self.players.next_leader();
                self.quests.next_quest();
                None
            }
            EntryAction::FinishGame => {
                self.finished_at = Some(Utc::now());
                log::info!("game {}: finished as {:?}", self.id, self.quests.status());
                None
            }
            EntryAction::PreApproveTeam => {
                for username in self.players.usernames() {
                    let vote = Vote::new(username, true);
                    self.players.set_vote(vote.clone());
                    self.quests.add_vote(vote).unwrap();
                }
                let wait = wait_after(&self.config, self.machine.current());
                let go = self
                    .machine
                    .go(StateKind::QuestVoting, EntryAction::TeamApproved, wait)
                    .unwrap();
                match go {
                    Go::Installed => self.run_entry(EntryAction::TeamApproved),
                    Go::Frozen { wait, .. } => Some(wait),
                }
            }
        }
    }
}
