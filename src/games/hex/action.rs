//! Hex actions: single board coordinates.

use serde::{Deserialize, Serialize};

/// One board coordinate.
///
/// A plain `Copy` value with structural equality; legal-action sets hold
/// these directly. Board-size bounds are enforced by membership in the
/// legal set, not at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexAction {
    row: u8,
    col: u8,
}

impl HexAction {
    /// Create an action at the given coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The coordinate with row and column exchanged, where a swapped
    /// opening move lands.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

impl std::fmt::Display for HexAction {
    /// 1-based column letter and row number: `HexAction::new(0, 1)`
    /// prints as `B1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let action = HexAction::new(3, 5);
        assert_eq!(action.row(), 3);
        assert_eq!(action.col(), 5);
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(HexAction::new(2, 4), HexAction::new(2, 4));
        assert_ne!(HexAction::new(2, 4), HexAction::new(4, 2));
    }

    #[test]
    fn test_transposed() {
        assert_eq!(HexAction::new(2, 4).transposed(), HexAction::new(4, 2));
        assert_eq!(HexAction::new(3, 3).transposed(), HexAction::new(3, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HexAction::new(0, 0)), "A1");
        assert_eq!(format!("{}", HexAction::new(0, 1)), "B1");
        assert_eq!(format!("{}", HexAction::new(4, 1)), "B5");
    }

    #[test]
    fn test_serialization() {
        let action = HexAction::new(7, 2);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: HexAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
