//! Agent identification and per-agent data storage.
//!
//! ## AgentId
//!
//! Type-safe identifier for the two adversaries. The engine is strictly
//! two-agent: every simulator tracks exactly one legal-action set and one
//! reward entry per agent.
//!
//! ## AgentMap
//!
//! Fixed two-slot per-agent storage with O(1) access. Supports iteration
//! and indexing by `AgentId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of agents in an adversarial game.
pub const NUM_AGENTS: usize = 2;

/// Agent identifier: 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(u8);

impl AgentId {
    /// Create a new agent ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < NUM_AGENTS as u8, "agent id must be 0 or 1");
        Self(id)
    }

    /// Get the raw agent index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing agent.
    ///
    /// ```
    /// use adversim::core::AgentId;
    ///
    /// assert_eq!(AgentId::new(0).opponent(), AgentId::new(1));
    /// assert_eq!(AgentId::new(1).opponent(), AgentId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both agent IDs.
    pub fn all() -> impl Iterator<Item = AgentId> {
        (0..NUM_AGENTS as u8).map(AgentId)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent {}", self.0)
    }
}

/// Per-agent data storage with O(1) access.
///
/// Backed by a fixed `[T; 2]`, one entry per agent, so copying an
/// `AgentMap` never shares structure with its source.
///
/// ## Example
///
/// ```
/// use adversim::core::{AgentId, AgentMap};
///
/// let mut scores: AgentMap<i32> = AgentMap::with_value(0);
///
/// scores[AgentId::new(1)] = 5;
/// assert_eq!(scores[AgentId::new(0)], 0);
/// assert_eq!(scores[AgentId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentMap<T> {
    data: [T; NUM_AGENTS],
}

impl<T> AgentMap<T> {
    /// Create a new AgentMap with values from a factory function.
    pub fn new(factory: impl Fn(AgentId) -> T) -> Self {
        Self {
            data: [factory(AgentId(0)), factory(AgentId(1))],
        }
    }

    /// Create from the two entries in agent order.
    #[must_use]
    pub fn from_entries(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a new AgentMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Create a new AgentMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to an agent's entry.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> &T {
        &self.data[agent.index()]
    }

    /// Get a mutable reference to an agent's entry.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut T {
        &mut self.data[agent.index()]
    }

    /// Replace an agent's entry, returning the old value.
    pub fn replace(&mut self, agent: AgentId, value: T) -> T {
        std::mem::replace(&mut self.data[agent.index()], value)
    }

    /// Iterate over (AgentId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (AgentId(i as u8), v))
    }

    /// Map both entries to a new AgentMap.
    pub fn map<U>(&self, f: impl Fn(AgentId, &T) -> U) -> AgentMap<U> {
        AgentMap::new(|agent| f(agent, self.get(agent)))
    }
}

impl<T> Index<AgentId> for AgentMap<T> {
    type Output = T;

    fn index(&self, agent: AgentId) -> &Self::Output {
        self.get(agent)
    }
}

impl<T> IndexMut<AgentId> for AgentMap<T> {
    fn index_mut(&mut self, agent: AgentId) -> &mut Self::Output {
        self.get_mut(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_basics() {
        let a0 = AgentId::new(0);
        let a1 = AgentId::new(1);

        assert_eq!(a0.index(), 0);
        assert_eq!(a1.index(), 1);
        assert_eq!(format!("{}", a0), "Agent 0");
    }

    #[test]
    #[should_panic(expected = "agent id must be 0 or 1")]
    fn test_agent_id_out_of_range() {
        let _ = AgentId::new(2);
    }

    #[test]
    fn test_agent_id_all() {
        let agents: Vec<_> = AgentId::all().collect();
        assert_eq!(agents, vec![AgentId::new(0), AgentId::new(1)]);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(AgentId::new(0).opponent(), AgentId::new(1));
        assert_eq!(AgentId::new(1).opponent(), AgentId::new(0));
    }

    #[test]
    fn test_agent_map_new() {
        let map: AgentMap<i32> = AgentMap::new(|a| a.index() as i32 * 10);

        assert_eq!(map[AgentId::new(0)], 0);
        assert_eq!(map[AgentId::new(1)], 10);
    }

    #[test]
    fn test_agent_map_mutation() {
        let mut map: AgentMap<i32> = AgentMap::with_value(0);

        map[AgentId::new(0)] = 10;
        map[AgentId::new(1)] = 20;

        assert_eq!(map[AgentId::new(0)], 10);
        assert_eq!(map[AgentId::new(1)], 20);
    }

    #[test]
    fn test_agent_map_replace() {
        let mut map: AgentMap<Vec<i32>> = AgentMap::with_default();
        map[AgentId::new(0)] = vec![1, 2];

        let old = map.replace(AgentId::new(0), vec![3]);

        assert_eq!(old, vec![1, 2]);
        assert_eq!(map[AgentId::new(0)], vec![3]);
    }

    #[test]
    fn test_agent_map_iter() {
        let map: AgentMap<i32> = AgentMap::new(|a| a.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(AgentId::new(0), &0), (AgentId::new(1), &1)]);
    }

    #[test]
    fn test_agent_map_map() {
        let map: AgentMap<i32> = AgentMap::from_entries(1, 2);
        let doubled = map.map(|_, v| v * 2);

        assert_eq!(doubled[AgentId::new(0)], 2);
        assert_eq!(doubled[AgentId::new(1)], 4);
    }

    #[test]
    fn test_agent_map_serialization() {
        let map: AgentMap<i32> = AgentMap::from_entries(3, 4);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: AgentMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
