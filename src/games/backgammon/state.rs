//! Backgammon board state.
//!
//! The board is a flat array of 26 signed cells. The sign of a cell
//! encodes the owning side (agent 0 positive, agent 1 negative), the
//! magnitude the piece count; a cell never holds pieces of both signs.
//! Cell 0 is agent 0's bar, cell 25 agent 1's bar. Pieces that have been
//! borne off leave the array and are counted in per-side accumulators so
//! that each side's total remains fifteen.

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, NUM_AGENTS};

/// Board cells, including the two bar cells at the ends.
pub const NUM_LOCATIONS: usize = 26;

/// Pieces per side.
pub const NUM_PIECES: u8 = 15;

/// Dice rolled per turn.
pub const NUM_DICE: usize = 2;

/// Agent 0's bar cell.
pub(crate) const BAR_LOW: usize = 0;

/// Agent 1's bar cell.
pub(crate) const BAR_HIGH: usize = NUM_LOCATIONS - 1;

/// Complete backgammon position: cells, borne-off counts, dice, mover.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgammonState {
    locations: [i8; NUM_LOCATIONS],
    borne_off: [u8; NUM_AGENTS],
    dice: [u8; NUM_DICE],
    agent_turn: AgentId,
}

/// Start-of-game piece layout.
const INITIAL_LOCATIONS: [i8; NUM_LOCATIONS] = [
    0, 2, 0, 0, 0, 0, -5, 0, -3, 0, 0, 0, 5, -5, 0, 0, 0, 3, 0, 5, 0, 0, 0, 0, -2, 0,
];

impl BackgammonState {
    /// The standard starting position with the given dice and mover.
    #[must_use]
    pub fn initial(dice: [u8; NUM_DICE], agent_turn: AgentId) -> Self {
        Self {
            locations: INITIAL_LOCATIONS,
            borne_off: [0; NUM_AGENTS],
            dice,
            agent_turn,
        }
    }

    /// Build a state from raw cells.
    ///
    /// Borne-off counts are derived as each side's shortfall from fifteen
    /// on-board pieces. No further well-formedness validation is
    /// performed; see the simulator contract for the consequences of
    /// malformed states.
    #[must_use]
    pub fn new(locations: [i8; NUM_LOCATIONS], dice: [u8; NUM_DICE], agent_turn: AgentId) -> Self {
        let mut state = Self {
            locations,
            borne_off: [0; NUM_AGENTS],
            dice,
            agent_turn,
        };
        for agent in AgentId::all() {
            state.borne_off[agent.index()] =
                NUM_PIECES.saturating_sub(state.on_board_count(agent));
        }
        state
    }

    /// Build a state from all four parts, trusting the caller's
    /// borne-off counts.
    #[must_use]
    pub fn from_parts(
        locations: [i8; NUM_LOCATIONS],
        borne_off: [u8; NUM_AGENTS],
        dice: [u8; NUM_DICE],
        agent_turn: AgentId,
    ) -> Self {
        Self {
            locations,
            borne_off,
            dice,
            agent_turn,
        }
    }

    /// Signed piece count of one cell.
    #[must_use]
    pub fn location(&self, index: usize) -> i8 {
        self.locations[index]
    }

    /// Copy of the full cell array.
    #[must_use]
    pub fn locations(&self) -> [i8; NUM_LOCATIONS] {
        self.locations
    }

    /// The two die values.
    #[must_use]
    pub fn dice(&self) -> [u8; NUM_DICE] {
        self.dice
    }

    /// The agent to move.
    #[must_use]
    pub fn agent_turn(&self) -> AgentId {
        self.agent_turn
    }

    /// Pieces the agent has borne off the board.
    #[must_use]
    pub fn borne_off(&self, agent: AgentId) -> u8 {
        self.borne_off[agent.index()]
    }

    /// Both borne-off counts, in agent order.
    #[must_use]
    pub fn borne_off_counts(&self) -> [u8; NUM_AGENTS] {
        self.borne_off
    }

    /// Movement direction of an agent's pieces: +1 for agent 0, -1 for
    /// agent 1. Also the sign its cells carry.
    #[must_use]
    pub fn direction(agent: AgentId) -> i8 {
        if agent.index() == 0 {
            1
        } else {
            -1
        }
    }

    /// Pieces the agent still has on the board, bar included.
    #[must_use]
    pub fn on_board_count(&self, agent: AgentId) -> u8 {
        let sign = Self::direction(agent);
        self.locations
            .iter()
            .filter(|&&cell| cell * sign > 0)
            .map(|&cell| cell.unsigned_abs())
            .sum()
    }

    /// True if the agent has pieces waiting on its bar.
    #[must_use]
    pub fn has_bar_pieces(&self, agent: AgentId) -> bool {
        if agent.index() == 0 {
            self.locations[BAR_LOW] > 0
        } else {
            self.locations[BAR_HIGH] < 0
        }
    }
}

impl std::fmt::Display for BackgammonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "turn = {}, dice = [{}, {}]",
            self.agent_turn, self.dice[0], self.dice[1]
        )?;
        writeln!(
            f,
            "bar = [{}, {}], off = [{}, {}]",
            self.locations[BAR_LOW],
            -self.locations[BAR_HIGH],
            self.borne_off[0],
            self.borne_off[1]
        )?;
        write!(f, " 1..12: [")?;
        for cell in &self.locations[1..13] {
            write!(f, "{:3}", cell)?;
        }
        writeln!(f, "]")?;
        write!(f, "13..24: [")?;
        for cell in &self.locations[13..25] {
            write!(f, "{:3}", cell)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_piece_counts() {
        let state = BackgammonState::initial([3, 1], AgentId::new(0));

        for agent in AgentId::all() {
            assert_eq!(state.on_board_count(agent), NUM_PIECES);
            assert_eq!(state.borne_off(agent), 0);
        }
    }

    #[test]
    fn test_initial_no_bar_pieces() {
        let state = BackgammonState::initial([3, 1], AgentId::new(0));

        assert!(!state.has_bar_pieces(AgentId::new(0)));
        assert!(!state.has_bar_pieces(AgentId::new(1)));
    }

    #[test]
    fn test_new_derives_borne_off() {
        // Agent 0 has borne off all but two pieces; agent 1 all but one.
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[23] = 2;
        locations[2] = -1;

        let state = BackgammonState::new(locations, [6, 6], AgentId::new(1));

        assert_eq!(state.borne_off(AgentId::new(0)), 13);
        assert_eq!(state.borne_off(AgentId::new(1)), 14);
    }

    #[test]
    fn test_direction() {
        assert_eq!(BackgammonState::direction(AgentId::new(0)), 1);
        assert_eq!(BackgammonState::direction(AgentId::new(1)), -1);
    }

    #[test]
    fn test_bar_pieces() {
        let mut locations = INITIAL_LOCATIONS;
        locations[BAR_LOW] = 2;
        locations[BAR_HIGH] = -1;

        let state = BackgammonState::new(locations, [2, 5], AgentId::new(0));

        assert!(state.has_bar_pieces(AgentId::new(0)));
        assert!(state.has_bar_pieces(AgentId::new(1)));
    }

    #[test]
    fn test_display_mentions_dice_and_turn() {
        let state = BackgammonState::initial([4, 2], AgentId::new(1));
        let text = format!("{}", state);

        assert!(text.contains("dice = [4, 2]"));
        assert!(text.contains("Agent 1"));
    }

    #[test]
    fn test_serialization() {
        let state = BackgammonState::initial([6, 2], AgentId::new(0));
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: BackgammonState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
