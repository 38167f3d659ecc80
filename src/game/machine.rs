use super::EntryAction;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

/// Represents the current phase in the game loop.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum StateKind {
    Preparation,
    TeamProposition,
    TeamVoting,
    TeamVotingPreApproved,
    QuestVoting,
    Assassination,
    Frozen,
    Finish,
}

/// A handle that resolves once the frozen interval guarding a transition has
/// ended. Transitions without a wait resolve immediately.
#[derive(Clone, Debug)]
pub struct Transition {
    done: Option<watch::Receiver<bool>>,
}

impl Transition {
    pub(crate) fn ready() -> Self {
        Self { done: None }
    }

    pub(crate) fn pending(done: watch::Receiver<bool>) -> Self {
        Self { done: Some(done) }
    }

    /// Whether the transition has already taken effect.
    pub fn is_ready(&self) -> bool {
        self.done.as_ref().map_or(true, |rx| *rx.borrow())
    }

    /// Waits until the destination state has been installed.
    pub async fn wait(self) {
        let Some(mut rx) = self.done else {
            return;
        };
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// A scheduled transition whose destination installs when the timer fires.
struct Pending {
    to: StateKind,
    entry: EntryAction,
    done: watch::Sender<bool>,
}

/// The outcome of requesting a transition: either the destination state was
/// installed synchronously, or the machine froze and the caller must arrange
/// for [GameStateMachine::thaw] after the wait.
pub(crate) enum Go {
    Installed,
    Frozen { wait: Duration, done: watch::Receiver<bool> },
}

/// The typed state machine: it validates every requested transition against
/// the permitted-edge table and owns the frozen interludes between states.
pub(crate) struct GameStateMachine {
    current: StateKind,
    pending: Option<Pending>,
}

fn permitted(from: StateKind, to: StateKind) -> bool {
    use StateKind::*;
    matches!(
        (from, to),
        (Preparation, TeamProposition)
            | (TeamProposition, TeamVoting)
            | (TeamProposition, TeamVotingPreApproved)
            | (TeamVoting, TeamProposition)
            | (TeamVoting, QuestVoting)
            | (TeamVotingPreApproved, QuestVoting)
            | (QuestVoting, TeamProposition)
            | (QuestVoting, Assassination)
            | (QuestVoting, Finish)
            | (Assassination, Finish)
    )
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self { current: StateKind::Preparation, pending: None }
    }

    #[cfg(test)]
    pub fn with_state(state: StateKind) -> Self {
        Self { current: state, pending: None }
    }

    pub fn current(&self) -> StateKind {
        self.current
    }

    pub fn is_frozen(&self) -> bool {
        self.current == StateKind::Frozen
    }

    /// Requests a transition to `to`. With a zero wait the destination is
    /// installed at once; otherwise the machine freezes and hands back the
    /// completion channel for the scheduled thaw.
    pub fn go(
        &mut self,
        to: StateKind,
        entry: EntryAction,
        wait: Duration,
    ) -> Result<Go, GameError> {
        if !permitted(self.current, to) {
            return Err(GameError::IllegalTransition);
        }
        if wait.is_zero() {
            self.current = to;
            Ok(Go::Installed)
        } else {
            let (done, rx) = watch::channel(false);
            self.pending = Some(Pending { to, entry, done });
            self.current = StateKind::Frozen;
            Ok(Go::Frozen { wait, done: rx })
        }
    }

    /// Installs the pending destination state. Returns the entry action to
    /// run and the channel to resolve once it has run.
    pub fn thaw(&mut self) -> Option<(StateKind, EntryAction, watch::Sender<bool>)> {
        let Pending { to, entry, done } = self.pending.take()?;
        self.current = to;
        Some((to, entry, done))
    }
}
