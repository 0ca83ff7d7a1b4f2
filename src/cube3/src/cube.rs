use crate::{Algorithm, Face, Move};
use std::fmt;

/// A corner position, or the corner piece that belongs there when solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// An edge position, or the edge piece that belongs there when solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A 3x3x3 cube at the cubie level. Position `i` holds piece `cp[i]` twisted
/// by `co[i]` (and likewise for edges).
///
/// Corner orientation is measured against the U/D axis, so only quarter turns
/// of R, L, F and B twist corners. Edge orientation flips under quarter turns
/// of F and B only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    cp: [u8; 8],
    co: [u8; 8],
    ep: [u8; 12],
    eo: [u8; 12],
}

// Clockwise quarter turns in "replaced by" form: after the turn, position `i`
// holds what was at position `.0`, twisted by `.1`.
const CORNER_TRANSFORMATIONS: [[(u8, u8); 8]; 6] = [
    // U
    [(3, 0), (0, 0), (1, 0), (2, 0), (4, 0), (5, 0), (6, 0), (7, 0)],
    // R
    [(4, 2), (1, 0), (2, 0), (0, 1), (7, 1), (5, 0), (6, 0), (3, 2)],
    // F
    [(1, 1), (5, 2), (2, 0), (3, 0), (0, 2), (4, 1), (6, 0), (7, 0)],
    // D
    [(0, 0), (1, 0), (2, 0), (3, 0), (5, 0), (6, 0), (7, 0), (4, 0)],
    // L
    [(0, 0), (2, 1), (6, 2), (3, 0), (4, 0), (1, 2), (5, 1), (7, 0)],
    // B
    [(0, 0), (1, 0), (3, 1), (7, 2), (4, 0), (5, 0), (2, 2), (6, 1)],
];

const EDGE_TRANSFORMATIONS: [[(u8, u8); 12]; 6] = [
    // U
    [
        (3, 0),
        (0, 0),
        (1, 0),
        (2, 0),
        (4, 0),
        (5, 0),
        (6, 0),
        (7, 0),
        (8, 0),
        (9, 0),
        (10, 0),
        (11, 0),
    ],
    // R
    [
        (8, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (11, 0),
        (5, 0),
        (6, 0),
        (7, 0),
        (4, 0),
        (9, 0),
        (10, 0),
        (0, 0),
    ],
    // F
    [
        (0, 0),
        (9, 1),
        (2, 0),
        (3, 0),
        (4, 0),
        (8, 1),
        (6, 0),
        (7, 0),
        (1, 1),
        (5, 1),
        (10, 0),
        (11, 0),
    ],
    // D
    [
        (0, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (5, 0),
        (6, 0),
        (7, 0),
        (4, 0),
        (8, 0),
        (9, 0),
        (10, 0),
        (11, 0),
    ],
    // L
    [
        (0, 0),
        (1, 0),
        (10, 0),
        (3, 0),
        (4, 0),
        (5, 0),
        (9, 0),
        (7, 0),
        (8, 0),
        (2, 0),
        (6, 0),
        (11, 0),
    ],
    // B
    [
        (0, 0),
        (1, 0),
        (2, 0),
        (11, 1),
        (4, 0),
        (5, 0),
        (6, 0),
        (10, 1),
        (8, 0),
        (9, 0),
        (3, 1),
        (7, 1),
    ],
];

impl Cube {
    pub const SOLVED: Cube = Cube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    /// The state reached by applying `algorithm` to a solved cube.
    #[must_use]
    pub fn from_algorithm(algorithm: &Algorithm) -> Self {
        let mut cube = Self::SOLVED;
        cube.apply_algorithm(algorithm);
        cube
    }

    pub fn apply(&mut self, move_: Move) {
        for _ in 0..move_.turn.quarter_turns() {
            self.quarter_turn(move_.face);
        }
    }

    pub fn apply_algorithm(&mut self, algorithm: &Algorithm) {
        for &move_ in algorithm.moves() {
            self.apply(move_);
        }
    }

    fn quarter_turn(&mut self, face: Face) {
        let previous = *self;
        for (i, &(from, twist)) in CORNER_TRANSFORMATIONS[face.index()].iter().enumerate() {
            let from = from as usize;
            self.cp[i] = previous.cp[from];
            self.co[i] = (previous.co[from] + twist) % 3;
        }
        for (i, &(from, flip)) in EDGE_TRANSFORMATIONS[face.index()].iter().enumerate() {
            let from = from as usize;
            self.ep[i] = previous.ep[from];
            self.eo[i] = (previous.eo[from] + flip) % 2;
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// The corner piece at `position` along with its twist.
    #[must_use]
    pub fn corner_at(&self, position: Corner) -> (Corner, u8) {
        let i = position.index();
        (Corner::ALL[self.cp[i] as usize], self.co[i])
    }

    /// The edge piece at `position` along with its flip.
    #[must_use]
    pub fn edge_at(&self, position: Edge) -> (Edge, u8) {
        let i = position.index();
        (Edge::ALL[self.ep[i] as usize], self.eo[i])
    }

    /// Place `piece` at `position`. This does not keep the cube valid on its
    /// own; callers rewriting one component of the state are expected to
    /// rewrite all of it.
    pub fn set_corner(&mut self, position: Corner, piece: Corner, orientation: u8) {
        let i = position.index();
        self.cp[i] = piece as u8;
        self.co[i] = orientation % 3;
    }

    /// See `set_corner`.
    pub fn set_edge(&mut self, position: Edge, piece: Edge, orientation: u8) {
        let i = position.index();
        self.ep[i] = piece as u8;
        self.eo[i] = orientation % 2;
    }

    /// Indices of the corner pieces by position.
    #[must_use]
    pub fn corner_permutation(&self) -> [u8; 8] {
        self.cp
    }

    /// Indices of the edge pieces by position.
    #[must_use]
    pub fn edge_permutation(&self) -> [u8; 12] {
        self.ep
    }

    /// Whether this state can be reached from the solved cube by face turns.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        fn is_permutation(perm: &[u8]) -> bool {
            let mut seen = 0_u16;
            for &p in perm {
                if p as usize >= perm.len() || seen & (1 << p) != 0 {
                    return false;
                }
                seen |= 1 << p;
            }
            true
        }

        is_permutation(&self.cp)
            && is_permutation(&self.ep)
            && self.co.iter().map(|&o| u32::from(o)).sum::<u32>() % 3 == 0
            && self.eo.iter().map(|&o| u32::from(o)).sum::<u32>() % 2 == 0
            && is_odd(&self.cp) == is_odd(&self.ep)
    }
}

/// Whether `perm` has an odd number of inversions.
#[must_use]
pub fn is_odd(perm: &[u8]) -> bool {
    let mut odd = false;
    for (i, &a) in perm.iter().enumerate() {
        for &b in &perm[i + 1..] {
            odd ^= b < a;
        }
    }
    odd
}

impl Default for Cube {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corners = Corner::ALL.map(|position| self.corner_at(position));
        let edges = Edge::ALL.map(|position| self.edge_at(position));
        f.debug_struct("Cube")
            .field("corners", &corners)
            .field("edges", &edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Turn;

    fn cube(moves: &str) -> Cube {
        Cube::from_algorithm(&moves.parse().unwrap())
    }

    #[test]
    fn test_move_orders() {
        for face in Face::ALL {
            let quarter = Move::new(face, Turn::Clockwise);
            let mut state = Cube::SOLVED;
            for i in 1..=4 {
                state.apply(quarter);
                assert_eq!(state.is_solved(), i == 4, "{quarter} applied {i} times");
            }
        }
    }

    #[test]
    fn test_inverse_moves_cancel() {
        for move_ in Move::ALL {
            let mut state = Cube::SOLVED;
            state.apply(move_);
            assert!(state.is_valid());
            state.apply(move_.inverse());
            assert!(state.is_solved());
        }
    }

    #[test]
    fn test_sexy_move_order() {
        let mut state = Cube::SOLVED;
        let sexy: Algorithm = "R U R' U'".parse().unwrap();
        for i in 1..=6 {
            state.apply_algorithm(&sexy);
            assert_eq!(state.is_solved(), i == 6);
        }
    }

    #[test]
    fn test_many_compositions() {
        let mut state = Cube::SOLVED;
        let r_f: Algorithm = "R F".parse().unwrap();
        for _ in 0..105 {
            state.apply_algorithm(&r_f);
        }
        assert!(state.is_solved());
    }

    #[test]
    fn test_orientation_conventions() {
        // Only F and B quarter turns flip edges
        for move_ in Move::ALL {
            let mut state = Cube::SOLVED;
            state.apply(move_);
            let flips_edges = Edge::ALL.iter().any(|&e| state.edge_at(e).1 != 0);
            let twists_corners = Corner::ALL.iter().any(|&c| state.corner_at(c).1 != 0);
            let quarter = !move_.is_half_turn();
            assert_eq!(
                flips_edges,
                quarter && matches!(move_.face, Face::F | Face::B),
                "{move_}"
            );
            assert_eq!(
                twists_corners,
                quarter && !matches!(move_.face, Face::U | Face::D),
                "{move_}"
            );
        }
    }

    #[test]
    fn test_piece_queries() {
        let state = cube("U");
        assert_eq!(state.corner_at(Corner::URF), (Corner::UBR, 0));
        assert_eq!(state.edge_at(Edge::UF), (Edge::UR, 0));
        let state = cube("F");
        assert_eq!(state.edge_at(Edge::UF), (Edge::FL, 1));
        assert_eq!(state.corner_at(Corner::URF), (Corner::UFL, 1));
        assert_eq!(state.edge_at(Edge::DB), (Edge::DB, 0));
    }

    #[test]
    fn test_parity() {
        assert!(!is_odd(&[0, 1, 2, 3]));
        assert!(is_odd(&[1, 0, 2, 3]));
        assert!(!is_odd(&[1, 2, 0, 3]));
        assert!(!is_odd(&[3, 2, 1, 0]));
        assert!(is_odd(&[1, 2, 3, 0]));

        // A quarter turn is a 4-cycle of corners and a 4-cycle of edges
        let state = cube("R");
        assert!(is_odd(&state.corner_permutation()));
        assert!(is_odd(&state.edge_permutation()));
        let mut rng = fastrand::Rng::with_seed(5);
        let state = Cube::from_algorithm(&Algorithm::random(31, &mut rng));
        assert_eq!(
            is_odd(&state.corner_permutation()),
            is_odd(&state.edge_permutation())
        );
    }

    #[test]
    fn test_validity() {
        let mut state = cube("R U2 D' B D'");
        assert!(state.is_valid());
        state.set_edge(Edge::UR, Edge::UR, 1);
        assert!(!state.is_valid());

        let mut swapped = Cube::SOLVED;
        swapped.set_corner(Corner::URF, Corner::UFL, 0);
        swapped.set_corner(Corner::UFL, Corner::URF, 0);
        assert!(!swapped.is_valid());
    }
}
