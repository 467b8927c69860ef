//! Core engine types: agents, rewards, RNG, history.
//!
//! This module contains the building blocks shared by every game domain.
//! The domains themselves live under `crate::games`.

pub mod agent;
pub mod history;
pub mod rewards;
pub mod rng;

pub use agent::{AgentId, AgentMap, NUM_AGENTS};
pub use history::{History, HistoryNode};
pub use rewards::Rewards;
pub use rng::{SimRng, SimRngState, DIE_FACES};
