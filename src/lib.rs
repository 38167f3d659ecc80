pub mod error;
pub mod game;

pub use error::GameError;
pub use game::{Game, GameConfig, Loyalty, Outcome, Player, Role, StateKind, Transition, Vote};
