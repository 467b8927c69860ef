//! Error taxonomy for the simulation engine.

/// Errors raised by simulators and action constructors.
///
/// All errors are local to one call. `state_transition` validates before
/// mutating, so a failed transition leaves the simulator untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The action supplied for the agent to move is not in that agent's
    /// current legal-action set. Carries display forms of the offending
    /// action and the state it was rejected against.
    #[error("illegal action {action} from state:\n{state}")]
    IllegalAction { action: String, state: String },

    /// A race-game sub-move referencing a cell or distance outside the
    /// valid range, rejected at construction.
    #[error("invalid move: from={from} distance={distance}")]
    InvalidMove { from: u8, distance: u8 },

    /// Connection-game board size outside the supported range.
    #[error("invalid board size {0} (expected 1..=26)")]
    InvalidBoardSize(usize),
}
