//! # adversim
//!
//! A simulation engine for deterministic and chance-driven two-agent
//! combinatorial board games, built as the environment backend for
//! search-based game-playing agents.
//!
//! ## Design Principles
//!
//! 1. **One contract, many domains**: search code is written once against
//!    the [`Simulator`] trait; each game supplies its own rule engine.
//!
//! 2. **Copies are values**: cloning a simulator yields a fully
//!    independent deep copy — state, legal-action sets, rewards and RNG —
//!    immediately usable for rollouts on another thread.
//!
//! 3. **Injected randomness**: chance events (dice redraws) draw from a
//!    seedable [`SimRng`] owned by the simulator, never from an ambient
//!    global, so games replay deterministically under a fixed seed.
//!
//! ## Modules
//!
//! - `core`: agent IDs and per-agent storage, reward vectors, RNG,
//!   game history
//! - `sim`: the `Simulator` trait
//! - `games::backgammon`: dice-driven race game with combinatorial move
//!   enumeration
//! - `games::hex`: connection game with incremental legal-action
//!   maintenance and flood-fill win detection
//! - `error`: the error taxonomy

pub mod core;
pub mod error;
pub mod games;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    AgentId, AgentMap, History, HistoryNode, Rewards, SimRng, SimRngState, DIE_FACES, NUM_AGENTS,
};

pub use crate::error::SimError;

pub use crate::sim::{JointAction, Simulator};

pub use crate::games::backgammon::{
    BackgammonAction, BackgammonMove, BackgammonSimulator, BackgammonState,
};

pub use crate::games::hex::{HexAction, HexPhase, HexSimulator, HexState};
