use serde::{Deserialize, Serialize};

/// A secret role dealt to one player at the start of the game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    #[serde(rename = "MERLIN")]
    Merlin,
    #[serde(rename = "PERCIVAL")]
    Percival,
    #[serde(rename = "SERVANT_1")]
    Servant1,
    #[serde(rename = "SERVANT_2")]
    Servant2,
    #[serde(rename = "SERVANT_3")]
    Servant3,
    #[serde(rename = "SERVANT_4")]
    Servant4,
    #[serde(rename = "SERVANT_5")]
    Servant5,
    #[serde(rename = "ASSASSIN")]
    Assassin,
    #[serde(rename = "MORGANA")]
    Morgana,
    #[serde(rename = "MORDRED")]
    Mordred,
    #[serde(rename = "OBERON")]
    Oberon,
    #[serde(rename = "MINION_1")]
    Minion1,
    #[serde(rename = "MINION_2")]
    Minion2,
    #[serde(rename = "MINION_3")]
    Minion3,
}

/// Which side of the conflict a role fights for.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Loyalty {
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "EVIL")]
    Evil,
}

/// The generic good roles, in the order they are dealt.
pub const SERVANTS: [Role; 5] = [
    Role::Servant1,
    Role::Servant2,
    Role::Servant3,
    Role::Servant4,
    Role::Servant5,
];

/// The generic evil roles, in the order they are dealt.
pub const MINIONS: [Role; 3] = [Role::Minion1, Role::Minion2, Role::Minion3];

impl Role {
    pub fn loyalty(self) -> Loyalty {
        match self {
            Role::Merlin
            | Role::Percival
            | Role::Servant1
            | Role::Servant2
            | Role::Servant3
            | Role::Servant4
            | Role::Servant5 => Loyalty::Good,
            Role::Assassin
            | Role::Morgana
            | Role::Mordred
            | Role::Oberon
            | Role::Minion1
            | Role::Minion2
            | Role::Minion3 => Loyalty::Evil,
        }
    }

    /// Whether the holder of this role perceives the holder of `other` as evil.
    ///
    /// The table is static: Merlin sees all of evil except Mordred, Percival
    /// sees Merlin and Morgana without telling them apart, and evil knows
    /// itself except that Oberon neither sees nor is seen. Note the general
    /// antisymmetry: Merlin sees the Assassin, the Assassin does not see Merlin.
    pub fn can_see(self, other: Role) -> bool {
        match self {
            Role::Merlin => other.loyalty() == Loyalty::Evil && other != Role::Mordred,
            Role::Percival => matches!(other, Role::Merlin | Role::Morgana),
            Role::Oberon => false,
            _ if self.loyalty() == Loyalty::Evil => {
                other.loyalty() == Loyalty::Evil && other != Role::Oberon
            }
            _ => false,
        }
    }
}
