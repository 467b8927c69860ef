//! Zero-sum reward vectors.
//!
//! Every reachable state maps to exactly one of three outcomes: win for
//! agent 0, win for agent 1, or neutral. `Rewards` makes the other values
//! unrepresentable by only offering those constructors.

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, NUM_AGENTS};

/// Zero-sum per-agent outcome vector.
///
/// `Copy`, so every read hands the caller an independent value and the
/// internal array is never exposed by reference.
///
/// ```
/// use adversim::core::{AgentId, Rewards};
///
/// let rewards = Rewards::win(AgentId::new(0));
/// assert_eq!(rewards.get(AgentId::new(0)), 1);
/// assert_eq!(rewards.get(AgentId::new(1)), -1);
/// assert!(!rewards.is_neutral());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rewards([i32; NUM_AGENTS]);

impl Rewards {
    /// The ongoing-game vector: 0 for both agents.
    #[must_use]
    pub const fn neutral() -> Self {
        Self([0, 0])
    }

    /// A win for `agent`: +1 for the winner, -1 for the opponent.
    #[must_use]
    pub const fn win(agent: AgentId) -> Self {
        if agent.index() == 0 {
            Self([1, -1])
        } else {
            Self([-1, 1])
        }
    }

    /// Reward for a single agent.
    #[must_use]
    pub fn get(self, agent: AgentId) -> i32 {
        self.0[agent.index()]
    }

    /// True if the game is still ongoing.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self == Self::neutral()
    }

    /// The winning agent, if any.
    #[must_use]
    pub fn winner(self) -> Option<AgentId> {
        AgentId::all().find(|&agent| self.get(agent) > 0)
    }

    /// The vector as a plain array, in agent order.
    #[must_use]
    pub fn to_array(self) -> [i32; NUM_AGENTS] {
        self.0
    }
}

impl Default for Rewards {
    fn default() -> Self {
        Self::neutral()
    }
}

impl std::fmt::Display for Rewards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.0[0], self.0[1])
    }
}
