//! Hex rule engine.
//!
//! Legal actions are maintained incrementally: the set of empty cells is
//! symmetric information, so after an ordinary move the next mover
//! inherits the previous mover's set minus the cell just played. Full
//! recomputation happens only around the opening (where the swap must be
//! offered) and on `set_state`. Win detection is an iterative flood fill
//! accumulating a mask of the board edges a connected component touches.

use crate::core::{AgentId, AgentMap, Rewards};
use crate::error::SimError;
use crate::sim::{JointAction, Simulator};

use super::action::HexAction;
use super::state::{HexPhase, HexState};

/// Edge mask bits: which borders a component has reached.
const WEST: u8 = 1;
const EAST: u8 = 2;
const SOUTH: u8 = 4;
const NORTH: u8 = 8;

/// The six hex-grid neighbour offsets.
const NEIGHBOURS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Simulator for hex.
///
/// Owns the current state, both legal-action sets and the reward vector.
/// The game has no chance events, so `Clone` is all a rollout needs.
#[derive(Clone, Debug)]
pub struct HexSimulator {
    state: HexState,
    legal_actions: AgentMap<Vec<HexAction>>,
    rewards: Rewards,
}

impl HexSimulator {
    /// Simulator over an empty board of the given side length.
    pub fn new(size: usize) -> Result<Self, SimError> {
        Ok(Self::from_state(HexState::empty(size)?))
    }

    /// Simulator over a supplied state, recomputing rewards and legal
    /// actions from scratch.
    #[must_use]
    pub fn from_state(state: HexState) -> Self {
        let rewards = compute_rewards_full(&state);
        let legal_actions = compute_legal_actions_full(&state, rewards);
        Self {
            state,
            legal_actions,
            rewards,
        }
    }
}

impl Simulator for HexSimulator {
    type State = HexState;
    type Action = HexAction;

    fn state(&self) -> &HexState {
        &self.state
    }

    fn set_state(&mut self, state: HexState) {
        self.rewards = compute_rewards_full(&state);
        self.legal_actions = compute_legal_actions_full(&state, self.rewards);
        self.state = state;
    }

    fn state_transition(&mut self, actions: &JointAction<HexAction>) -> Result<(), SimError> {
        let mover = self.state.agent_turn();
        let action = match actions[mover] {
            Some(action) if self.legal_actions[mover].contains(&action) => action,
            other => {
                return Err(SimError::IllegalAction {
                    action: other.map_or_else(|| "none".to_string(), |a| a.to_string()),
                    state: self.state.to_string(),
                });
            }
        };

        let phase = self.state.phase().advance();
        self.state.set_phase(phase);

        let ordinary = self.state.is_empty_cell(action.row(), action.col());
        let placed = if ordinary {
            self.state.set_location(action.row(), action.col(), Some(mover));
            action
        } else {
            // Swap: take over the opening move at the transposed cell.
            self.state.set_location(action.row(), action.col(), None);
            let transposed = action.transposed();
            self.state
                .set_location(transposed.row(), transposed.col(), Some(mover));
            transposed
        };
        self.state.set_agent_turn(mover.opponent());

        self.rewards = compute_rewards_from(&self.state, placed);
        if !self.rewards.is_neutral() {
            self.legal_actions = AgentMap::with_default();
        } else if ordinary && phase == HexPhase::Normal {
            // The next mover inherits the set minus the cell just played.
            let mut inherited = self.legal_actions.replace(mover, Vec::new());
            inherited.retain(|&candidate| candidate != action);
            self.legal_actions[mover.opponent()] = inherited;
        } else {
            self.legal_actions = compute_legal_actions_full(&self.state, self.rewards);
        }
        Ok(())
    }

    fn rewards(&self) -> Rewards {
        self.rewards
    }

    fn legal_actions(&self, agent: AgentId) -> Vec<HexAction> {
        self.legal_actions[agent].clone()
    }
}

/// Every empty cell is open to the agent to move; at the first-move
/// phase the occupied cell is additionally legal, which is how the swap
/// is offered. The side that just moved holds an empty set.
fn compute_legal_actions_full(state: &HexState, rewards: Rewards) -> AgentMap<Vec<HexAction>> {
    let mut legal_actions: AgentMap<Vec<HexAction>> = AgentMap::with_default();
    if !rewards.is_neutral() {
        return legal_actions;
    }

    let swap_open = state.phase() == HexPhase::FirstMove;
    let mover = state.agent_turn();
    for row in 0..state.size() {
        for col in 0..state.size() {
            if swap_open || state.is_empty_cell(row, col) {
                legal_actions[mover].push(HexAction::new(row, col));
            }
        }
    }
    legal_actions
}

/// Full-board win scan: flood from every occupied west-edge cell of
/// agent 0 and south-edge cell of agent 1.
fn compute_rewards_full(state: &HexState) -> Rewards {
    let mut visited = vec![false; usize::from(state.size()) * usize::from(state.size())];
    for index in 0..state.size() {
        let west = HexAction::new(index, 0);
        if state.location(west.row(), west.col()) == Some(AgentId::new(0))
            && !visited[cell_index(state, west)]
        {
            if flood_edges(state, west, &mut visited) & (WEST | EAST) == WEST | EAST {
                return Rewards::win(AgentId::new(0));
            }
        }
        let south = HexAction::new(0, index);
        if state.location(south.row(), south.col()) == Some(AgentId::new(1))
            && !visited[cell_index(state, south)]
        {
            if flood_edges(state, south, &mut visited) & (SOUTH | NORTH) == SOUTH | NORTH {
                return Rewards::win(AgentId::new(1));
            }
        }
    }
    Rewards::neutral()
}

/// Win scan restricted to the component containing the just-played cell.
fn compute_rewards_from(state: &HexState, placed: HexAction) -> Rewards {
    let owner = match state.location(placed.row(), placed.col()) {
        Some(agent) => agent,
        None => return Rewards::neutral(),
    };
    let mut visited = vec![false; usize::from(state.size()) * usize::from(state.size())];
    let edges = flood_edges(state, placed, &mut visited);
    let target = if owner.index() == 0 {
        WEST | EAST
    } else {
        SOUTH | NORTH
    };
    if edges & target == target {
        Rewards::win(owner)
    } else {
        Rewards::neutral()
    }
}

fn cell_index(state: &HexState, cell: HexAction) -> usize {
    usize::from(cell.row()) * usize::from(state.size()) + usize::from(cell.col())
}

/// Iterative flood fill over same-owner cells, returning the mask of
/// board edges the component touches.
fn flood_edges(state: &HexState, seed: HexAction, visited: &mut [bool]) -> u8 {
    let owner = state.location(seed.row(), seed.col());
    debug_assert!(owner.is_some());

    let mut edges = 0;
    let mut stack = vec![seed];
    visited[cell_index(state, seed)] = true;
    while let Some(cell) = stack.pop() {
        edges |= edge_mask(state, cell);
        for (dr, dc) in NEIGHBOURS {
            let row = i32::from(cell.row()) + dr;
            let col = i32::from(cell.col()) + dc;
            if !state.is_on_board(row, col) {
                continue;
            }
            let next = HexAction::new(row as u8, col as u8);
            let index = cell_index(state, next);
            if !visited[index] && state.location(next.row(), next.col()) == owner {
                visited[index] = true;
                stack.push(next);
            }
        }
    }
    edges
}

fn edge_mask(state: &HexState, cell: HexAction) -> u8 {
    let last = state.size() - 1;
    let mut mask = 0;
    if cell.col() == 0 {
        mask |= WEST;
    }
    if cell.col() == last {
        mask |= EAST;
    }
    if cell.row() == 0 {
        mask |= SOUTH;
    }
    if cell.row() == last {
        mask |= NORTH;
    }
    mask
}
