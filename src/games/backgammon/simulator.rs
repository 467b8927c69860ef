//! Backgammon rule engine.
//!
//! Legal actions are found by exhaustive backtracking over the remaining
//! die distances on a scratch copy of the board: doubles allow the rolled
//! distance up to four times, other rolls each die once in either order.
//! A mover with bar pieces must enter them first, bearing off requires
//! every piece in the home region, and only sequences of maximal length
//! survive pruning — a player must use as many dice as the position
//! allows. When no sub-move is possible the pass action is the sole
//! legal action.

use smallvec::SmallVec;

use crate::core::{AgentId, AgentMap, Rewards, SimRng};
use crate::error::SimError;
use crate::sim::{JointAction, Simulator};

use super::action::{BackgammonAction, BackgammonMove};
use super::state::{BackgammonState, BAR_HIGH, BAR_LOW, NUM_LOCATIONS};

/// Simulator for backgammon.
///
/// Owns the current state, both legal-action sets, the reward vector and
/// the dice RNG. `Clone` produces a fully independent copy that replays
/// the same dice sequence; fork the RNG via [`rng_mut`](Self::rng_mut)
/// for divergent rollouts.
#[derive(Clone, Debug)]
pub struct BackgammonSimulator {
    state: BackgammonState,
    legal_actions: AgentMap<Vec<BackgammonAction>>,
    rewards: Rewards,
    rng: SimRng,
}

impl BackgammonSimulator {
    /// Start-of-game simulator with an opening roll: one die per side,
    /// re-rolled until they differ; the higher roller moves first using
    /// that roll.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let dice = loop {
            let dice = rng.roll_dice();
            if dice[0] != dice[1] {
                break dice;
            }
        };
        let agent_turn = if dice[0] > dice[1] {
            AgentId::new(0)
        } else {
            AgentId::new(1)
        };
        Self::with_rng(BackgammonState::initial(dice, agent_turn), rng)
    }

    /// Simulator over a supplied state with a fresh seeded RNG.
    #[must_use]
    pub fn from_state(state: BackgammonState, seed: u64) -> Self {
        Self::with_rng(state, SimRng::new(seed))
    }

    /// Simulator over a supplied state and RNG.
    #[must_use]
    pub fn with_rng(state: BackgammonState, rng: SimRng) -> Self {
        let rewards = compute_rewards(&state);
        let legal_actions = compute_legal_actions(&state, rewards);
        Self {
            state,
            legal_actions,
            rewards,
            rng,
        }
    }

    /// The dice RNG, e.g. to fork it for a divergent rollout branch.
    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    fn replace_state(&mut self, state: BackgammonState) {
        self.rewards = compute_rewards(&state);
        self.legal_actions = compute_legal_actions(&state, self.rewards);
        self.state = state;
    }
}

impl Simulator for BackgammonSimulator {
    type State = BackgammonState;
    type Action = BackgammonAction;

    fn state(&self) -> &BackgammonState {
        &self.state
    }

    fn set_state(&mut self, state: BackgammonState) {
        self.replace_state(state);
    }

    fn state_transition(
        &mut self,
        actions: &JointAction<BackgammonAction>,
    ) -> Result<(), SimError> {
        let mover = self.state.agent_turn();
        let action = match &actions[mover] {
            Some(action) if self.legal_actions[mover].contains(action) => action,
            other => {
                return Err(SimError::IllegalAction {
                    action: other
                        .as_ref()
                        .map_or_else(|| "none".to_string(), ToString::to_string),
                    state: self.state.to_string(),
                });
            }
        };

        let sign = BackgammonState::direction(mover);
        let mut locations = self.state.locations();
        let mut borne_off = self.state.borne_off_counts();

        for &mv in action.moves() {
            let from = mv.from() as usize;
            let to = from as i32 + i32::from(mv.distance()) * i32::from(sign);
            if to > 0 && to < (NUM_LOCATIONS - 1) as i32 {
                let to = to as usize;
                if locations[to] * sign < 0 {
                    // Lone opposing piece: capture it to the opponent's bar.
                    locations[to] = sign;
                    if sign > 0 {
                        locations[BAR_HIGH] -= 1;
                    } else {
                        locations[BAR_LOW] += 1;
                    }
                } else {
                    locations[to] += sign;
                }
            } else {
                borne_off[mover.index()] += 1;
            }
            locations[from] -= sign;
        }

        let dice = self.rng.roll_dice();
        self.replace_state(BackgammonState::from_parts(
            locations,
            borne_off,
            dice,
            mover.opponent(),
        ));
        Ok(())
    }

    fn rewards(&self) -> Rewards {
        self.rewards
    }

    fn legal_actions(&self, agent: AgentId) -> Vec<BackgammonAction> {
        self.legal_actions[agent].clone()
    }
}

/// A side with no pieces left on the board has borne all fifteen off and
/// won; otherwise the game continues.
fn compute_rewards(state: &BackgammonState) -> Rewards {
    let mut pos = false;
    let mut neg = false;
    for index in 0..NUM_LOCATIONS {
        let cell = state.location(index);
        if cell > 0 {
            pos = true;
        } else if cell < 0 {
            neg = true;
        }
    }
    if !pos {
        Rewards::win(AgentId::new(0))
    } else if !neg {
        Rewards::win(AgentId::new(1))
    } else {
        Rewards::neutral()
    }
}

fn compute_legal_actions(
    state: &BackgammonState,
    rewards: Rewards,
) -> AgentMap<Vec<BackgammonAction>> {
    let mut legal_actions: AgentMap<Vec<BackgammonAction>> = AgentMap::with_default();
    if !rewards.is_neutral() {
        return legal_actions;
    }

    let mover = state.agent_turn();
    let sign = BackgammonState::direction(mover);
    let dice = state.dice();
    let (distances, depth): (SmallVec<[u8; 2]>, u8) = if dice[0] == dice[1] {
        (SmallVec::from_slice(&[dice[0]]), 4)
    } else {
        (SmallVec::from_slice(&dice), 2)
    };

    let mut scratch = state.locations();
    let mut prefix = SmallVec::new();
    let mut sequences = Vec::new();
    enumerate_sequences(
        &mut scratch,
        &mut prefix,
        &distances,
        sign,
        depth,
        &mut sequences,
    );

    // A player must use as many dice as the position allows.
    let max_len = sequences.iter().map(BackgammonAction::len).max().unwrap_or(0);
    sequences.retain(|action| action.len() == max_len);

    legal_actions[mover] = sequences;
    legal_actions
}

/// Record for undoing one applied sub-move on the scratch board.
struct ScratchUndo {
    from: usize,
    to: Option<usize>,
    captured: bool,
}

/// Depth-first enumeration of maximal sub-move sequences.
///
/// Each level tries every (cell, remaining distance) pair, applies the
/// sub-move on the scratch board, and recurses with the distances left.
/// Levels that find nothing playable emit the prefix built so far; the
/// caller prunes to maximal length afterwards. Sub-moves are kept sorted
/// in the mover's direction so permutations of one multiset are never
/// emitted twice.
fn enumerate_sequences(
    board: &mut [i8; NUM_LOCATIONS],
    prefix: &mut SmallVec<[BackgammonMove; 4]>,
    distances: &[u8],
    sign: i8,
    depth: u8,
    out: &mut Vec<BackgammonAction>,
) {
    let before = out.len();

    // Forced entry: bar pieces must come in before anything else moves.
    let (start, limit) = if sign > 0 && board[BAR_LOW] > 0 {
        (BAR_LOW, BAR_LOW + 1)
    } else if sign < 0 && board[BAR_HIGH] < 0 {
        (BAR_HIGH, BAR_HIGH + 1)
    } else {
        (0, NUM_LOCATIONS)
    };

    let move_off = can_bear_off(board, sign);
    for from in start..limit {
        if board[from] * sign < 1 {
            continue;
        }
        for (chosen, &distance) in distances.iter().enumerate() {
            if !can_move(board, from, distance, sign, move_off) {
                continue;
            }
            let mv = BackgammonMove::new_unchecked(from as u8, distance);
            if let Some(&last) = prefix.last() {
                let in_order = if sign > 0 { mv >= last } else { mv <= last };
                if !in_order {
                    continue;
                }
            }
            prefix.push(mv);
            if depth > 1 {
                let undo = apply_scratch(board, from, distance, sign);
                let rest: &[u8] = if distances.len() == 2 {
                    std::slice::from_ref(&distances[1 - chosen])
                } else {
                    distances
                };
                enumerate_sequences(board, prefix, rest, sign, depth - 1, out);
                undo_scratch(board, &undo, sign);
            } else {
                out.push(BackgammonAction::new(prefix.iter().copied()));
            }
            prefix.pop();
        }
    }

    if out.len() == before {
        out.push(BackgammonAction::new(prefix.iter().copied()));
    }
}

/// Whether a piece on `from` may move `distance` in the `sign` direction:
/// the destination must be on the board and landable (empty, own, or a
/// lone opposing piece), or past the edge when bearing off is permitted.
fn can_move(
    board: &[i8; NUM_LOCATIONS],
    from: usize,
    distance: u8,
    sign: i8,
    move_off: bool,
) -> bool {
    if sign > 0 {
        let to = from + distance as usize;
        (to < NUM_LOCATIONS - 1 && board[to] >= -1) || (move_off && to >= NUM_LOCATIONS - 1)
    } else {
        let to = from as i32 - i32::from(distance);
        (to > 0 && board[to as usize] <= 1) || (move_off && to <= 0)
    }
}

/// Bearing off requires every piece of the side in its home region and
/// none on the bar.
fn can_bear_off(board: &[i8; NUM_LOCATIONS], sign: i8) -> bool {
    if sign > 0 {
        board[..NUM_LOCATIONS - 7].iter().all(|&cell| cell <= 0)
    } else {
        board[7..].iter().all(|&cell| cell >= 0)
    }
}

fn apply_scratch(
    board: &mut [i8; NUM_LOCATIONS],
    from: usize,
    distance: u8,
    sign: i8,
) -> ScratchUndo {
    board[from] -= sign;
    let to = from as i32 + i32::from(distance) * i32::from(sign);
    if to > 0 && to < (NUM_LOCATIONS - 1) as i32 {
        let to = to as usize;
        // A captured blot is discarded for the remainder of the search;
        // it cannot affect the mover's own legality within this turn.
        let captured = board[to] * sign == -1;
        if captured {
            board[to] = sign;
        } else {
            board[to] += sign;
        }
        ScratchUndo {
            from,
            to: Some(to),
            captured,
        }
    } else {
        ScratchUndo {
            from,
            to: None,
            captured: false,
        }
    }
}

fn undo_scratch(board: &mut [i8; NUM_LOCATIONS], undo: &ScratchUndo, sign: i8) {
    if let Some(to) = undo.to {
        if undo.captured {
            board[to] = -sign;
        } else {
            board[to] -= sign;
        }
    }
    board[undo.from] += sign;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(moves: &[(u8, u8)]) -> BackgammonAction {
        BackgammonAction::new(
            moves
                .iter()
                .map(|&(from, distance)| BackgammonMove::new(from, distance).unwrap()),
        )
    }

    #[test]
    fn test_initial_rewards_neutral() {
        let sim = BackgammonSimulator::new(42);
        assert!(sim.rewards().is_neutral());
        assert!(!sim.is_terminal_state());
    }

    #[test]
    fn test_opening_roll_dice_distinct_and_higher_starts() {
        for seed in 0..50 {
            let sim = BackgammonSimulator::new(seed);
            let dice = sim.state().dice();
            assert_ne!(dice[0], dice[1]);

            let expected = if dice[0] > dice[1] {
                AgentId::new(0)
            } else {
                AgentId::new(1)
            };
            assert_eq!(sim.state().agent_turn(), expected);
        }
    }

    #[test]
    fn test_only_mover_has_legal_actions() {
        let sim = BackgammonSimulator::new(42);
        let mover = sim.state().agent_turn();

        assert!(sim.has_legal_actions(mover));
        assert!(!sim.has_legal_actions(mover.opponent()));
    }

    #[test]
    fn test_non_double_actions_use_both_dice_from_start() {
        let state = BackgammonState::initial([3, 1], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        let actions = sim.legal_actions(AgentId::new(0));
        assert!(!actions.is_empty());
        for action in &actions {
            assert_eq!(action.len(), 2, "offered {}", action);
        }
    }

    #[test]
    fn test_double_actions_use_four_moves_from_start() {
        let state = BackgammonState::initial([3, 3], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        let actions = sim.legal_actions(AgentId::new(0));
        assert!(!actions.is_empty());
        for action in &actions {
            assert_eq!(action.len(), 4, "offered {}", action);
        }
    }

    #[test]
    fn test_opening_31_contains_point_making_play() {
        let state = BackgammonState::initial([3, 1], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        let actions = sim.legal_actions(AgentId::new(0));
        // The classic point-making play: 17 up 3 and 19 up 1, both to 20.
        assert!(actions.contains(&action(&[(17, 3), (19, 1)])));
        // Running one back piece: 1 up 3, then the same piece up 1.
        assert!(actions.contains(&action(&[(1, 3), (4, 1)])));
    }

    #[test]
    fn test_opening_31_blocked_cell_not_offered() {
        let state = BackgammonState::initial([3, 1], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        // Cell 13 holds five opposing pieces, so 12 up 1 is never legal.
        let blocked = BackgammonMove::new(12, 1).unwrap();
        for action in sim.legal_actions(AgentId::new(0)) {
            assert!(!action.moves().contains(&blocked), "offered {}", action);
        }
    }

    #[test]
    fn test_forced_entry_from_bar() {
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[BAR_LOW] = 1; // agent 0 piece on the bar
        locations[10] = 3;
        locations[24] = -2;

        let state = BackgammonState::new(locations, [5, 2], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        for action in sim.legal_actions(AgentId::new(0)) {
            assert_eq!(
                action.moves().first().map(|m| m.from()),
                Some(0),
                "first sub-move must enter from the bar: {}",
                action
            );
        }
    }

    #[test]
    fn test_fully_blocked_position_offers_pass() {
        // Agent 0 piece on the bar; entry cells 2 and 5 are blocked.
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[BAR_LOW] = 1;
        locations[2] = -2;
        locations[5] = -2;
        locations[20] = -11;

        let state = BackgammonState::new(locations, [2, 5], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        let actions = sim.legal_actions(AgentId::new(0));
        assert_eq!(actions, vec![BackgammonAction::pass()]);
        assert!(!sim.is_terminal_state());
    }

    #[test]
    fn test_bear_off_requires_all_home() {
        // All agent 0 pieces home except one straggler at cell 10.
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[10] = 1;
        locations[20] = 14;
        locations[1] = -15;

        let state = BackgammonState::new(locations, [6, 5], AgentId::new(0));
        let sim = BackgammonSimulator::from_state(state, 7);

        let off_move = BackgammonMove::new(20, 6).unwrap();
        for action in sim.legal_actions(AgentId::new(0)) {
            assert!(
                !action.moves().contains(&off_move),
                "bear-off offered with a piece outside home: {}",
                action
            );
        }
    }

    #[test]
    fn test_bear_off_transition_and_win() {
        // Agent 0's last piece sits one pip from the edge.
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[24] = 1;
        locations[1] = -15;

        let state = BackgammonState::new(locations, [1, 2], AgentId::new(0));
        let mut sim = BackgammonSimulator::from_state(state, 7);
        assert_eq!(sim.state().borne_off(AgentId::new(0)), 14);

        // Either die bears the last piece off.
        let actions = sim.legal_actions(AgentId::new(0));
        assert_eq!(actions.len(), 2);
        for offered in &actions {
            assert_eq!(offered.len(), 1);
        }
        let mut joint = JointAction::with_value(None);
        joint[AgentId::new(0)] = Some(actions[0].clone());
        sim.state_transition(&joint).unwrap();

        assert_eq!(sim.state().borne_off(AgentId::new(0)), 15);
        assert_eq!(sim.rewards(), Rewards::win(AgentId::new(0)));
        assert!(sim.is_terminal_state());
    }

    #[test]
    fn test_capture_sends_blot_to_bar() {
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[5] = 2;
        locations[8] = -1; // lone opposing piece
        locations[24] = -14;

        let state = BackgammonState::new(locations, [3, 6], AgentId::new(0));
        let mut sim = BackgammonSimulator::from_state(state, 7);

        let capture = action(&[(5, 3), (8, 6)]);
        assert!(sim
            .legal_actions(AgentId::new(0))
            .contains(&capture));

        let mut joint = JointAction::with_value(None);
        joint[AgentId::new(0)] = Some(capture);
        sim.state_transition(&joint).unwrap();

        // The captured piece moved to agent 1's bar.
        assert_eq!(sim.state().location(BAR_HIGH), -1);
        assert!(sim.state().has_bar_pieces(AgentId::new(1)));
        assert_eq!(sim.state().on_board_count(AgentId::new(1)), 15);
        assert_eq!(sim.state().agent_turn(), AgentId::new(1));
    }

    #[test]
    fn test_illegal_action_rejected_without_mutation() {
        let mut sim = BackgammonSimulator::new(42);
        let before = sim.state().clone();
        let mover = sim.state().agent_turn();

        let mut joint = JointAction::with_value(None);
        joint[mover] = Some(BackgammonAction::pass());

        let err = sim.state_transition(&joint).unwrap_err();
        assert!(matches!(err, SimError::IllegalAction { .. }));
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_missing_action_rejected() {
        let mut sim = BackgammonSimulator::new(42);
        let joint = JointAction::with_value(None);

        let err = sim.state_transition(&joint).unwrap_err();
        assert!(matches!(err, SimError::IllegalAction { .. }));
    }

    #[test]
    fn test_transition_flips_turn_and_redraws_dice() {
        let mut sim = BackgammonSimulator::new(42);
        let mover = sim.state().agent_turn();

        let mut joint = JointAction::with_value(None);
        joint[mover] = sim.legal_actions(mover).into_iter().next();
        sim.state_transition(&joint).unwrap();

        assert_eq!(sim.state().agent_turn(), mover.opponent());
        let dice = sim.state().dice();
        assert!((1..=6).contains(&dice[0]));
        assert!((1..=6).contains(&dice[1]));
    }

    #[test]
    fn test_set_state_recomputes() {
        let mut sim = BackgammonSimulator::new(42);

        // Terminal state: agent 1 has borne everything off.
        let mut locations = [0i8; NUM_LOCATIONS];
        locations[20] = 15;
        sim.set_state(BackgammonState::new(locations, [4, 2], AgentId::new(0)));

        assert_eq!(sim.rewards(), Rewards::win(AgentId::new(1)));
        assert!(sim.is_terminal_state());
    }

    #[test]
    fn test_piece_conservation_through_random_game() {
        let mut sim = BackgammonSimulator::new(99);
        for _ in 0..200 {
            if sim.is_terminal_state() {
                break;
            }
            let mover = sim.state().agent_turn();
            let actions = sim.legal_actions(mover);
            let mut joint = JointAction::with_value(None);
            joint[mover] = Some(actions[0].clone());
            sim.state_transition(&joint).unwrap();

            for agent in AgentId::all() {
                assert_eq!(
                    sim.state().on_board_count(agent) + sim.state().borne_off(agent),
                    super::super::state::NUM_PIECES,
                );
            }
        }
    }
}
