//! Backgammon: a dice-driven race game.
//!
//! Agent 0 moves its pieces toward higher cell indices, agent 1 toward
//! lower ones. Each turn the mover must play an ordered sequence of
//! sub-moves consuming as many dice as the position allows; landing on a
//! lone opposing piece captures it to the opponent's bar, and a side with
//! every piece in its home region may bear pieces off the board. The
//! first side to bear off all fifteen pieces wins.

mod action;
mod simulator;
mod state;

pub use action::{BackgammonAction, BackgammonMove};
pub use simulator::BackgammonSimulator;
pub use state::{BackgammonState, NUM_LOCATIONS, NUM_PIECES};
