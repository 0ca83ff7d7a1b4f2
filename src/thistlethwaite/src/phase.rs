use cube3::{Face, Move, Turn};
use std::fmt;
use Face::{B, D, F, L, R, U};
use Turn::{Clockwise as Cw, CounterClockwise as Ccw, Half};

/// The four stages of the reduction, in solving order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Orient every edge. Afterwards F and B quarter turns are unnecessary.
    EdgeOrientation,
    /// Orient every corner and bring the E-slice edges into the E slice.
    /// Afterwards R and L quarter turns are unnecessary.
    DominoReduction,
    /// Bring the cube into the group generated by half turns.
    HalfTurnReduction,
    /// Solve the cube with half turns.
    FinalPermutation,
}

const fn moves_of<const N: usize>(faces: [(Face, Turn); N]) -> [Move; N] {
    let mut moves = [Move::new(Face::U, Turn::Clockwise); N];
    let mut i = 0;
    while i < N {
        moves[i] = Move::new(faces[i].0, faces[i].1);
        i += 1;
    }
    moves
}

const EDGE_ORIENTATION_MOVES: [Move; 18] = Move::ALL;

const DOMINO_REDUCTION_MOVES: [Move; 14] = moves_of([
    (U, Cw),
    (U, Half),
    (U, Ccw),
    (R, Cw),
    (R, Half),
    (R, Ccw),
    (F, Half),
    (D, Cw),
    (D, Half),
    (D, Ccw),
    (L, Cw),
    (L, Half),
    (L, Ccw),
    (B, Half),
]);

const HALF_TURN_REDUCTION_MOVES: [Move; 10] = moves_of([
    (U, Cw),
    (U, Half),
    (U, Ccw),
    (R, Half),
    (F, Half),
    (D, Cw),
    (D, Half),
    (D, Ccw),
    (L, Half),
    (B, Half),
]);

const FINAL_PERMUTATION_MOVES: [Move; 6] = moves_of([
    (U, Half),
    (R, Half),
    (F, Half),
    (D, Half),
    (L, Half),
    (B, Half),
]);

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::EdgeOrientation,
        Phase::DominoReduction,
        Phase::HalfTurnReduction,
        Phase::FinalPermutation,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The moves this phase solves with. Every one of them preserves what the
    /// earlier phases achieved. The order fixes how ties are broken while
    /// building tables.
    #[must_use]
    pub const fn moves(self) -> &'static [Move] {
        match self {
            Phase::EdgeOrientation => &EDGE_ORIENTATION_MOVES,
            Phase::DominoReduction => &DOMINO_REDUCTION_MOVES,
            Phase::HalfTurnReduction => &HALF_TURN_REDUCTION_MOVES,
            Phase::FinalPermutation => &FINAL_PERMUTATION_MOVES,
        }
    }

    /// The position of `move_` in `moves`.
    #[must_use]
    pub fn column(self, move_: Move) -> Option<usize> {
        self.moves().iter().position(|&m| m == move_)
    }

    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::EdgeOrientation => Some(Phase::DominoReduction),
            Phase::DominoReduction => Some(Phase::HalfTurnReduction),
            Phase::HalfTurnReduction => Some(Phase::FinalPermutation),
            Phase::FinalPermutation => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::EdgeOrientation => "edge orientation",
            Phase::DominoReduction => "domino reduction",
            Phase::HalfTurnReduction => "half-turn reduction",
            Phase::FinalPermutation => "final permutation",
        })
    }
}
