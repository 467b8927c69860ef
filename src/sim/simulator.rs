//! Simulator trait: state, legal actions, rewards, transitions.
//!
//! Search agents drive games exclusively through this trait: read the
//! legal-action sets, pick one action per agent to move, call
//! `state_transition`, repeat until `is_terminal_state`. Rollout search
//! additionally relies on `Clone` producing a fully independent deep copy
//! that can be advanced without disturbing the original.

use crate::core::{AgentId, AgentMap, Rewards};
use crate::error::SimError;

/// One action slot per agent. Only the entry for the agent currently to
/// move is consulted by `state_transition`.
pub type JointAction<A> = AgentMap<Option<A>>;

/// Contract for a two-agent game simulator.
///
/// A simulator owns exactly one current state, the per-agent legal-action
/// sets, and the reward vector, and keeps the three consistent: every
/// state replacement or transition recomputes rewards first and legal
/// actions second.
///
/// ## Copying
///
/// `Clone` is the `copy()` operation: the clone holds independent deep
/// copies of state, legal-action sets, rewards, and any RNG, and is
/// immediately usable for transitions. There is no structural sharing
/// between a clone and its source, so clones may be handed to other
/// threads freely.
///
/// ## Malformed states
///
/// `set_state` performs no well-formedness validation; supplying a state
/// that violates the domain's invariants produces undefined legal-action
/// results.
pub trait Simulator: Clone {
    type State: Clone;
    type Action: Clone + PartialEq;

    /// The current state.
    fn state(&self) -> &Self::State;

    /// Replace the current state, then recompute rewards and legal
    /// actions from scratch.
    fn set_state(&mut self, state: Self::State);

    /// Apply the moving agent's action from `actions`.
    ///
    /// Fails with [`SimError::IllegalAction`] before any mutation if the
    /// mover's entry is absent or not a member of the mover's current
    /// legal-action set. On success the board mutation is applied, the
    /// turn advances, any required randomness is injected, and rewards
    /// and both legal-action sets are recomputed.
    fn state_transition(&mut self, actions: &JointAction<Self::Action>) -> Result<(), SimError>;

    /// The current reward vector, as an independent value.
    fn rewards(&self) -> Rewards;

    /// Reward for a single agent.
    fn reward(&self, agent: AgentId) -> i32 {
        self.rewards().get(agent)
    }

    /// Copy of one agent's legal-action set.
    fn legal_actions(&self, agent: AgentId) -> Vec<Self::Action>;

    /// Copies of both legal-action sets.
    fn all_legal_actions(&self) -> AgentMap<Vec<Self::Action>> {
        AgentMap::new(|agent| self.legal_actions(agent))
    }

    /// True if the agent has at least one legal action.
    fn has_legal_actions(&self, agent: AgentId) -> bool {
        !self.legal_actions(agent).is_empty()
    }

    /// A state is terminal iff no agent has any legal action. This is
    /// the sole termination criterion.
    fn is_terminal_state(&self) -> bool {
        AgentId::all().all(|agent| !self.has_legal_actions(agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory simulator for exercising the provided methods.
    #[derive(Clone)]
    struct TestSimulator {
        state: u8,
        legal_actions: AgentMap<Vec<u8>>,
        rewards: Rewards,
    }

    impl Simulator for TestSimulator {
        type State = u8;
        type Action = u8;

        fn state(&self) -> &u8 {
            &self.state
        }

        fn set_state(&mut self, state: u8) {
            self.state = state;
        }

        fn state_transition(&mut self, _actions: &JointAction<u8>) -> Result<(), SimError> {
            Ok(())
        }

        fn rewards(&self) -> Rewards {
            self.rewards
        }

        fn legal_actions(&self, agent: AgentId) -> Vec<u8> {
            self.legal_actions[agent].clone()
        }
    }

    #[test]
    fn test_terminal_iff_both_sets_empty() {
        let mut sim = TestSimulator {
            state: 0,
            legal_actions: AgentMap::with_default(),
            rewards: Rewards::neutral(),
        };
        assert!(sim.is_terminal_state());

        sim.legal_actions[AgentId::new(1)] = vec![3];
        assert!(!sim.is_terminal_state());
        assert!(!sim.has_legal_actions(AgentId::new(0)));
        assert!(sim.has_legal_actions(AgentId::new(1)));
    }

    #[test]
    fn test_all_legal_actions_copies() {
        let sim = TestSimulator {
            state: 0,
            legal_actions: AgentMap::from_entries(vec![1, 2], vec![]),
            rewards: Rewards::neutral(),
        };

        let all = sim.all_legal_actions();
        assert_eq!(all[AgentId::new(0)], vec![1, 2]);
        assert!(all[AgentId::new(1)].is_empty());
    }

    #[test]
    fn test_reward_reads_vector() {
        let sim = TestSimulator {
            state: 0,
            legal_actions: AgentMap::with_default(),
            rewards: Rewards::win(AgentId::new(1)),
        };

        assert_eq!(sim.reward(AgentId::new(0)), -1);
        assert_eq!(sim.reward(AgentId::new(1)), 1);
    }
}
