//! Hex board state.
//!
//! Cell occupancy is stored as one bitboard per side for compactness and
//! cheap copying; a cell's bit index is `row * size + col`. The turn
//! phase drives the swap rule and only ever advances.

use serde::{Deserialize, Serialize};

use crate::core::AgentId;
use crate::error::SimError;

/// Largest supported board side length (the column-letter display range).
pub const MAX_BOARD_SIZE: usize = 26;

/// Progress of the opening, used to implement the swap rule. Advances
/// monotonically and is never reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexPhase {
    /// No stones played.
    Empty,
    /// The first stone is on the board; the swap is available.
    FirstMove,
    /// The second move (ordinary or swap) has been played.
    SecondMove,
    /// All later turns.
    Normal,
}

impl HexPhase {
    /// The phase after one more move is played.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            HexPhase::Empty => HexPhase::FirstMove,
            HexPhase::FirstMove => HexPhase::SecondMove,
            HexPhase::SecondMove | HexPhase::Normal => HexPhase::Normal,
        }
    }
}

/// Complete hex position: per-side bitboards, board size, turn phase,
/// and the agent to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexState {
    size: u8,
    bitboards: [Vec<u64>; 2],
    phase: HexPhase,
    agent_turn: AgentId,
}

impl HexState {
    /// An empty board of the given side length.
    pub fn empty(size: usize) -> Result<Self, SimError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(SimError::InvalidBoardSize(size));
        }
        let words = (size * size).div_ceil(64);
        Ok(Self {
            size: size as u8,
            bitboards: [vec![0; words], vec![0; words]],
            phase: HexPhase::Empty,
            agent_turn: AgentId::new(0),
        })
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn phase(&self) -> HexPhase {
        self.phase
    }

    #[must_use]
    pub fn agent_turn(&self) -> AgentId {
        self.agent_turn
    }

    pub(crate) fn set_phase(&mut self, phase: HexPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_agent_turn(&mut self, agent: AgentId) {
        self.agent_turn = agent;
    }

    /// Builder-style phase override, for constructing mid-game states.
    #[must_use]
    pub fn with_phase(mut self, phase: HexPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Builder-style mover override, for constructing mid-game states.
    #[must_use]
    pub fn with_turn(mut self, agent: AgentId) -> Self {
        self.agent_turn = agent;
        self
    }

    #[must_use]
    pub fn is_on_board(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < i32::from(self.size) && col < i32::from(self.size)
    }

    fn bit(&self, row: u8, col: u8) -> (usize, u64) {
        debug_assert!(self.is_on_board(i32::from(row), i32::from(col)));
        let index = usize::from(row) * usize::from(self.size) + usize::from(col);
        (index / 64, 1u64 << (index % 64))
    }

    /// The owner of a cell, if any.
    #[must_use]
    pub fn location(&self, row: u8, col: u8) -> Option<AgentId> {
        let (word, mask) = self.bit(row, col);
        AgentId::all().find(|agent| self.bitboards[agent.index()][word] & mask != 0)
    }

    /// True if no side occupies the cell.
    #[must_use]
    pub fn is_empty_cell(&self, row: u8, col: u8) -> bool {
        let (word, mask) = self.bit(row, col);
        (self.bitboards[0][word] | self.bitboards[1][word]) & mask == 0
    }

    /// Raw cell write: clears the cell, then sets the given owner's bit.
    ///
    /// Exposed for constructing arbitrary positions; the simulator keeps
    /// rewards and legal actions consistent only for states passed
    /// through `set_state`.
    pub fn set_location(&mut self, row: u8, col: u8, owner: Option<AgentId>) {
        let (word, mask) = self.bit(row, col);
        self.bitboards[0][word] &= !mask;
        self.bitboards[1][word] &= !mask;
        if let Some(agent) = owner {
            self.bitboards[agent.index()][word] |= mask;
        }
    }

    /// Total stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> u32 {
        self.bitboards
            .iter()
            .flatten()
            .map(|word| word.count_ones())
            .sum()
    }
}

impl std::fmt::Display for HexState {
    /// Rhombus rendering, north row first: `X` for agent 0, `O` for
    /// agent 1, `-` for empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "turn = {}, phase = {:?}", self.agent_turn, self.phase)?;
        for row in (0..self.size).rev() {
            for _ in 0..(self.size - 1 - row) {
                write!(f, " ")?;
            }
            for col in 0..self.size {
                let glyph = match self.location(row, col) {
                    Some(agent) if agent.index() == 0 => 'X',
                    Some(_) => 'O',
                    None => '-',
                };
                write!(f, "{} ", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
