//! State transition history.
//!
//! An in-process record of a played game: the sequence of states visited
//! and the joint action that produced each. Drivers append after every
//! transition; replay and debugging read it back. Not a persistence
//! format.

use serde::{Deserialize, Serialize};

use super::agent::AgentMap;

/// One step of a game record: the state reached and the actions each
/// agent took to arrive there. The initial node has no actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryNode<S, A> {
    pub state: S,
    pub actions: AgentMap<Option<A>>,
}

/// Record of states and joint actions for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History<S, A> {
    nodes: Vec<HistoryNode<S, A>>,
}

impl<S, A> History<S, A> {
    /// Start a history at the given initial state.
    #[must_use]
    pub fn new(initial_state: S) -> Self {
        Self {
            nodes: vec![HistoryNode {
                state: initial_state,
                actions: AgentMap::new(|_| None),
            }],
        }
    }

    /// Append the next state and the actions taken by each agent to
    /// arrive at that state.
    pub fn add(&mut self, state: S, actions: AgentMap<Option<A>>) {
        self.nodes.push(HistoryNode { state, actions });
    }

    /// Number of recorded nodes, including the initial state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`, if recorded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryNode<S, A>> {
        self.nodes.get(index)
    }

    /// The most recently recorded node.
    #[must_use]
    pub fn last(&self) -> &HistoryNode<S, A> {
        self.nodes.last().expect("history holds the initial state")
    }

    /// Iterate over recorded nodes in play order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryNode<S, A>> {
        self.nodes.iter()
    }
}
