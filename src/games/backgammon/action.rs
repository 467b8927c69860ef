//! Backgammon actions: ordered sequences of sub-moves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::DIE_FACES;
use crate::error::SimError;

use super::state::NUM_LOCATIONS;

/// One sub-move: take a piece from a cell and advance it a die's
/// distance in the mover's direction.
///
/// Ordered by `(from, distance)`; within one action, sub-moves are kept
/// sorted in the mover's direction so each multiset of sub-moves has a
/// single canonical sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BackgammonMove {
    from: u8,
    distance: u8,
}

impl BackgammonMove {
    /// Create a sub-move, rejecting out-of-range cells and distances.
    ///
    /// ```
    /// use adversim::games::backgammon::BackgammonMove;
    ///
    /// assert!(BackgammonMove::new(12, 3).is_ok());
    /// assert!(BackgammonMove::new(26, 3).is_err());
    /// assert!(BackgammonMove::new(12, 0).is_err());
    /// ```
    pub fn new(from: u8, distance: u8) -> Result<Self, SimError> {
        if from as usize >= NUM_LOCATIONS || distance < 1 || distance > DIE_FACES {
            return Err(SimError::InvalidMove { from, distance });
        }
        Ok(Self { from, distance })
    }

    /// Construct from values already known to be in range.
    pub(crate) const fn new_unchecked(from: u8, distance: u8) -> Self {
        Self { from, distance }
    }

    /// Source cell.
    #[must_use]
    pub fn from(self) -> u8 {
        self.from
    }

    /// Die distance.
    #[must_use]
    pub fn distance(self) -> u8 {
        self.distance
    }
}

impl std::fmt::Display for BackgammonMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.from, self.distance)
    }
}

/// A complete turn: the ordered sub-moves to play, or the empty sequence
/// when the position admits no move (a pass).
///
/// Equality is structural over the sequence. `SmallVec` keeps the common
/// cases (up to four sub-moves on doubles) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgammonAction {
    moves: SmallVec<[BackgammonMove; 4]>,
}

impl BackgammonAction {
    /// Create an action from a sequence of sub-moves.
    #[must_use]
    pub fn new(moves: impl IntoIterator<Item = BackgammonMove>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// The pass action: no sub-moves.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// The sub-moves in play order.
    #[must_use]
    pub fn moves(&self) -> &[BackgammonMove] {
        &self.moves
    }

    /// Number of sub-moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True for the pass action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl std::fmt::Display for BackgammonAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.moves.is_empty() {
            return write!(f, "pass");
        }
        write!(f, "[")?;
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
        }
        write!(f, "]")
    }
}
