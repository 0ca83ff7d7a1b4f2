//! Dense encodings of single components of a cube, and their move tables.
//!
//! A coordinate only looks at one aspect of the cube (edge flips, where the
//! E-slice edges are, ...). Descriptor codecs combine several coordinates and
//! move them independently through precomputed `MoveTable`s.

use crate::{combination, permutation};
use cube3::{Corner, Cube, Edge, Face, Move, Turn};
use itertools::Itertools;
use log::debug;
use std::collections::VecDeque;
use thiserror::Error;

/// A component of the cube encoded as an integer in `[0, count)`.
pub trait Coordinate {
    fn count(&self) -> u32;

    fn encode(&self, cube: &Cube) -> u32;

    /// Rewrite the component of `cube` this coordinate tracks so that it
    /// encodes to `value`. Other components are left alone.
    fn decode_onto(&self, value: u32, cube: &mut Cube);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Expected {expected} corner cosets of the half turn group but found {found}")]
    CosetCount { expected: usize, found: usize },
    #[error("Expected the half turn corner group to have {expected} elements but found {found}")]
    GroupOrder { expected: usize, found: usize },
    #[error("Tetrad code {code} is shared by two corner permutations of the half turn group")]
    TetradCollision { code: u32 },
}

/// The flips of the first 11 edges as a big-endian binary number. The flip of
/// the last edge follows from the others.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeOrientation;

impl Coordinate for EdgeOrientation {
    fn count(&self) -> u32 {
        1 << 11
    }

    fn encode(&self, cube: &Cube) -> u32 {
        Edge::ALL[..11]
            .iter()
            .fold(0, |acc, &edge| acc * 2 + u32::from(cube.edge_at(edge).1))
    }

    fn decode_onto(&self, mut value: u32, cube: &mut Cube) {
        let mut parity = 0;
        for &edge in Edge::ALL[..11].iter().rev() {
            let flip = (value % 2) as u8;
            value /= 2;
            parity ^= flip;
            let (piece, _) = cube.edge_at(edge);
            cube.set_edge(edge, piece, flip);
        }
        let (piece, _) = cube.edge_at(Edge::BR);
        cube.set_edge(Edge::BR, piece, parity);
    }
}

/// The twists of the first 7 corners as a big-endian base 3 number. The
/// twist of the last corner follows from the others.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerOrientation;

impl Coordinate for CornerOrientation {
    fn count(&self) -> u32 {
        3_u32.pow(7)
    }

    fn encode(&self, cube: &Cube) -> u32 {
        Corner::ALL[..7]
            .iter()
            .fold(0, |acc, &corner| acc * 3 + u32::from(cube.corner_at(corner).1))
    }

    fn decode_onto(&self, mut value: u32, cube: &mut Cube) {
        let mut total = 0;
        for &corner in Corner::ALL[..7].iter().rev() {
            let twist = (value % 3) as u8;
            value /= 3;
            total += twist;
            let (piece, _) = cube.corner_at(corner);
            cube.set_corner(corner, piece, twist);
        }
        let (piece, _) = cube.corner_at(Corner::DRB);
        cube.set_corner(Corner::DRB, piece, (3 - total % 3) % 3);
    }
}

/// Which of `positions` hold the four `pieces`, ranked as a combination.
/// Decoding fills the remaining positions with the other pieces native to
/// `positions`, in order.
#[derive(Clone, Copy, Debug)]
pub struct SliceCombination {
    positions: &'static [Edge],
    pieces: [Edge; 4],
}

impl SliceCombination {
    /// The E-slice edges anywhere on the cube.
    pub const E_SLICE: SliceCombination = SliceCombination {
        positions: &Edge::ALL,
        pieces: [Edge::FR, Edge::FL, Edge::BL, Edge::BR],
    };

    /// The M-slice edges within the U and D layers.
    pub const M_SLICE: SliceCombination = SliceCombination {
        positions: &[
            Edge::UR,
            Edge::UF,
            Edge::UL,
            Edge::UB,
            Edge::DR,
            Edge::DF,
            Edge::DL,
            Edge::DB,
        ],
        pieces: [Edge::UF, Edge::UB, Edge::DF, Edge::DB],
    };
}

impl Coordinate for SliceCombination {
    fn count(&self) -> u32 {
        combination::binomial(self.positions.len(), self.pieces.len())
    }

    fn encode(&self, cube: &Cube) -> u32 {
        let mask = self
            .positions
            .iter()
            .enumerate()
            .filter(|&(_, &position)| self.pieces.contains(&cube.edge_at(position).0))
            .fold(0_u16, |mask, (i, _)| mask | 1 << i);
        combination::rank(mask, self.positions.len())
    }

    fn decode_onto(&self, value: u32, cube: &mut Cube) {
        let mask = combination::unrank(value, self.positions.len(), self.pieces.len());
        let mut members = self.pieces.iter();
        let mut others = self
            .positions
            .iter()
            .filter(|&&position| !self.pieces.contains(&position));
        for (i, &position) in self.positions.iter().enumerate() {
            let piece = if mask & (1 << i) == 0 {
                others.next()
            } else {
                members.next()
            };
            if let Some(&piece) = piece {
                cube.set_edge(position, piece, 0);
            }
        }
    }
}

/// The permutation of four edges within their own slice, as a rank in
/// `[0, 24)`. Only meaningful once every edge of the slice is inside it.
#[derive(Clone, Copy, Debug)]
pub struct SlicePermutation {
    edges: [Edge; 4],
}

impl SlicePermutation {
    pub const M: SlicePermutation = SlicePermutation {
        edges: [Edge::UF, Edge::UB, Edge::DF, Edge::DB],
    };
    pub const S: SlicePermutation = SlicePermutation {
        edges: [Edge::UR, Edge::UL, Edge::DR, Edge::DL],
    };
    pub const E: SlicePermutation = SlicePermutation {
        edges: [Edge::FR, Edge::FL, Edge::BL, Edge::BR],
    };

    /// For each slot of the slice, the slot whose native edge sits there.
    #[must_use]
    pub fn permutation(&self, cube: &Cube) -> [u8; 4] {
        self.edges.map(|position| {
            let (piece, _) = cube.edge_at(position);
            self.edges.iter().position(|&e| e == piece).unwrap_or(0) as u8
        })
    }
}

impl Coordinate for SlicePermutation {
    fn count(&self) -> u32 {
        24
    }

    fn encode(&self, cube: &Cube) -> u32 {
        permutation::rank(&self.permutation(cube))
    }

    fn decode_onto(&self, value: u32, cube: &mut Cube) {
        let mut perm = [0; 4];
        permutation::unrank(value, &mut perm);
        for (&position, &slot) in self.edges.iter().zip(&perm) {
            cube.set_edge(position, self.edges[slot as usize], 0);
        }
    }
}

/// The corner permutations generated by the six half turns.
fn half_turn_generators() -> [[u8; 8]; 6] {
    Face::ALL.map(|face| {
        let mut cube = Cube::SOLVED;
        cube.apply(Move::new(face, Turn::Half));
        cube.corner_permutation()
    })
}

/// `generator` applied on the piece side of `perm`. The result stays in the
/// class `H·perm`.
fn left_compose(generator: &[u8; 8], perm: &[u8; 8]) -> [u8; 8] {
    perm.map(|piece| generator[piece as usize])
}

fn set_corner_permutation(cube: &mut Cube, perm: &[u8; 8]) {
    for (&position, &piece) in Corner::ALL.iter().zip(perm) {
        let (_, twist) = cube.corner_at(position);
        cube.set_corner(position, Corner::ALL[piece as usize], twist);
    }
}

/// The class of the corner permutation modulo the group `H` of corner
/// permutations reachable with half turns.
///
/// There are `8! / 96 = 420` classes. Moves act on the right, so a class
/// `H·p` is carried to `H·(p·m)` and the transition does not depend on which
/// member of the class is held. The identity class (every member reachable
/// by half turns alone) is class 0.
#[derive(Clone, Debug)]
pub struct CornerCoset {
    class_of: Vec<u16>,
    representatives: Vec<[u8; 8]>,
}

impl CornerCoset {
    pub const CLASSES: usize = 420;

    /// Partitions all `8!` corner permutations into classes.
    ///
    /// # Errors
    ///
    /// Fails if the partition does not have exactly 420 classes.
    pub fn new() -> Result<Self, CoordinateError> {
        let generators = half_turn_generators();
        let perm_count = crate::FACTORIAL[8] as usize;
        let mut class_of = vec![u16::MAX; perm_count];
        let mut representatives = Vec::with_capacity(Self::CLASSES);
        let mut queue = VecDeque::new();

        for seed in 0..perm_count {
            if class_of[seed] != u16::MAX {
                continue;
            }
            let class = representatives.len() as u16;
            let mut perm = [0; 8];
            permutation::unrank(seed as u32, &mut perm);
            representatives.push(perm);
            class_of[seed] = class;
            queue.push_back(perm);

            while let Some(perm) = queue.pop_front() {
                for generator in &generators {
                    let next = left_compose(generator, &perm);
                    let rank = permutation::rank(&next) as usize;
                    if class_of[rank] == u16::MAX {
                        class_of[rank] = class;
                        queue.push_back(next);
                    }
                }
            }
        }

        if representatives.len() != Self::CLASSES {
            return Err(CoordinateError::CosetCount {
                expected: Self::CLASSES,
                found: representatives.len(),
            });
        }
        debug!("Partitioned {perm_count} corner permutations into {} classes", Self::CLASSES);
        Ok(CornerCoset {
            class_of,
            representatives,
        })
    }
}

impl Coordinate for CornerCoset {
    fn count(&self) -> u32 {
        Self::CLASSES as u32
    }

    fn encode(&self, cube: &Cube) -> u32 {
        let rank = permutation::rank(&cube.corner_permutation());
        u32::from(self.class_of[rank as usize])
    }

    fn decode_onto(&self, value: u32, cube: &mut Cube) {
        set_corner_permutation(cube, &self.representatives[value as usize]);
    }
}

/// The corner permutation of a cube in the half turn group, one of 96.
///
/// The corners split into two tetrads that half turns never mix. The code is
/// the rank of tetrad A's permutation times 4 plus which tetrad B corner sits
/// at UFL; the two together pin down the whole permutation.
#[derive(Clone, Debug)]
pub struct TetradPermutation {
    elements: Vec<[u8; 8]>,
}

const TETRAD_A: [Corner; 4] = [Corner::URF, Corner::ULB, Corner::DLF, Corner::DRB];
const TETRAD_B: [Corner; 4] = [Corner::UFL, Corner::UBR, Corner::DFR, Corner::DBL];

impl TetradPermutation {
    pub const ELEMENTS: usize = 96;

    /// Enumerates the half turn corner group and checks that the code is a
    /// bijection onto `[0, 96)`.
    ///
    /// # Errors
    ///
    /// Fails if the group does not have 96 elements or two of them share a
    /// code.
    pub fn new() -> Result<Self, CoordinateError> {
        let generators = half_turn_generators();
        let identity: [u8; 8] = std::array::from_fn(|i| i as u8);
        let mut group = vec![identity];
        let mut queue = VecDeque::from([identity]);
        while let Some(perm) = queue.pop_front() {
            for generator in &generators {
                let next = left_compose(generator, &perm);
                if !group.contains(&next) {
                    group.push(next);
                    queue.push_back(next);
                }
            }
        }
        if group.len() != Self::ELEMENTS {
            return Err(CoordinateError::GroupOrder {
                expected: Self::ELEMENTS,
                found: group.len(),
            });
        }

        let mut elements = vec![None; Self::ELEMENTS];
        for perm in group {
            let code = Self::code(&perm);
            let slot = &mut elements[code as usize];
            if slot.is_some() {
                return Err(CoordinateError::TetradCollision { code });
            }
            *slot = Some(perm);
        }
        Ok(TetradPermutation {
            elements: elements.into_iter().flatten().collect_vec(),
        })
    }

    fn code(perm: &[u8; 8]) -> u32 {
        let slot_in = |tetrad: &[Corner; 4], piece: u8| {
            tetrad
                .iter()
                .position(|&corner| corner as u8 == piece)
                .unwrap_or(0) as u8
        };
        let a = TETRAD_A.map(|position| slot_in(&TETRAD_A, perm[position.index()]));
        let b = slot_in(&TETRAD_B, perm[Corner::UFL.index()]);
        permutation::rank(&a) * 4 + u32::from(b)
    }
}

impl Coordinate for TetradPermutation {
    fn count(&self) -> u32 {
        Self::ELEMENTS as u32
    }

    fn encode(&self, cube: &Cube) -> u32 {
        Self::code(&cube.corner_permutation())
    }

    fn decode_onto(&self, value: u32, cube: &mut Cube) {
        set_corner_permutation(cube, &self.elements[value as usize]);
    }
}

/// How a coordinate moves under each move of a move set.
#[derive(Clone, Debug)]
pub struct MoveTable {
    width: usize,
    entries: Vec<u16>,
}

impl MoveTable {
    /// Tabulates `coordinate` under `moves` by decoding every value onto a
    /// solved cube, applying each move and encoding again.
    pub fn generate<C: Coordinate + ?Sized>(coordinate: &C, moves: &[Move]) -> Self {
        let count = coordinate.count();
        debug_assert!(count <= u32::from(u16::MAX) + 1);
        let mut entries = Vec::with_capacity(count as usize * moves.len());
        for value in 0..count {
            let mut cube = Cube::SOLVED;
            coordinate.decode_onto(value, &mut cube);
            for &move_ in moves {
                let mut next = cube;
                next.apply(move_);
                entries.push(coordinate.encode(&next) as u16);
            }
        }
        MoveTable {
            width: moves.len(),
            entries,
        }
    }

    /// The value `value` moves to under the move in column `column`.
    #[must_use]
    pub fn get(&self, value: u32, column: usize) -> u32 {
        u32::from(self.entries[value as usize * self.width + column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube3::Algorithm;

    fn cube(moves: &str) -> Cube {
        Cube::from_algorithm(&moves.parse().unwrap())
    }

    fn assert_decode_encode<C: Coordinate>(coordinate: &C) {
        for value in 0..coordinate.count() {
            let mut cube = Cube::SOLVED;
            coordinate.decode_onto(value, &mut cube);
            assert_eq!(coordinate.encode(&cube), value);
        }
    }

    #[test]
    fn test_solved_encodings() {
        assert_eq!(EdgeOrientation.encode(&Cube::SOLVED), 0);
        assert_eq!(CornerOrientation.encode(&Cube::SOLVED), 0);
        assert_eq!(SlicePermutation::E.encode(&Cube::SOLVED), 0);
        // UF, UB, DF and DB are every other U/D edge
        assert_eq!(SliceCombination::M_SLICE.encode(&Cube::SOLVED), 49);
    }

    #[test]
    fn test_orientation_coordinates() {
        assert_decode_encode(&EdgeOrientation);
        assert_decode_encode(&CornerOrientation);
        // F flips UF, DF, FR and FL
        assert_eq!(
            EdgeOrientation.encode(&cube("F")),
            (1 << 9) | (1 << 5) | (1 << 2) | (1 << 1)
        );
        let mut decoded = Cube::SOLVED;
        CornerOrientation.decode_onto(CornerOrientation.encode(&cube("R")), &mut decoded);
        assert!(decoded.is_valid());
    }

    #[test]
    fn test_slice_combinations() {
        assert_decode_encode(&SliceCombination::E_SLICE);
        assert_decode_encode(&SliceCombination::M_SLICE);
        assert_eq!(SliceCombination::E_SLICE.count(), 495);
        assert_eq!(SliceCombination::M_SLICE.count(), 70);
        assert_eq!(SliceCombination::E_SLICE.encode(&Cube::SOLVED), 494);
        assert_eq!(SliceCombination::E_SLICE.encode(&cube("U D' R2 F2")), 494);
        assert_ne!(SliceCombination::E_SLICE.encode(&cube("R")), 494);
    }

    #[test]
    fn test_slice_permutations() {
        for slice in [SlicePermutation::M, SlicePermutation::S, SlicePermutation::E] {
            assert_decode_encode(&slice);
        }
        // U2 swaps UF with UB and UR with UL
        let state = cube("U2");
        assert_eq!(SlicePermutation::M.permutation(&state), [1, 0, 2, 3]);
        assert_eq!(SlicePermutation::S.permutation(&state), [1, 0, 2, 3]);
        assert_eq!(SlicePermutation::E.encode(&state), 0);
    }

    #[test_log::test]
    fn test_corner_coset() {
        let coset = CornerCoset::new().unwrap();
        assert_decode_encode(&coset);
        assert_eq!(coset.encode(&Cube::SOLVED), 0);
        assert_eq!(coset.encode(&cube("R2 U2 F2 L2 D2 B2 R2")), 0);
        // A quarter turn is an odd corner permutation and leaves the group
        assert_ne!(coset.encode(&cube("U")), 0);
        assert_eq!(coset.encode(&cube("U")), coset.encode(&cube("R2 U")));
    }

    #[test_log::test]
    fn test_tetrad_permutation() {
        let tetrads = TetradPermutation::new().unwrap();
        assert_decode_encode(&tetrads);
        assert_eq!(tetrads.encode(&Cube::SOLVED), 0);

        let mut rng = fastrand::Rng::with_seed(3);
        let half_turns = Move::ALL.into_iter().filter(|m| m.is_half_turn()).collect_vec();
        for _ in 0..200 {
            let scramble: Algorithm = (0..15).map(|_| half_turns[rng.usize(..6)]).collect();
            let state = Cube::from_algorithm(&scramble);
            let mut decoded = Cube::SOLVED;
            tetrads.decode_onto(tetrads.encode(&state), &mut decoded);
            assert_eq!(decoded.corner_permutation(), state.corner_permutation());
        }
    }

    #[test]
    fn test_move_table_agrees_with_cube() {
        let moves = &Move::ALL;
        let table = MoveTable::generate(&SliceCombination::E_SLICE, moves);
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..300 {
            let state = Cube::from_algorithm(&Algorithm::random(12, &mut rng));
            let value = SliceCombination::E_SLICE.encode(&state);
            for (column, &move_) in moves.iter().enumerate() {
                let mut next = state;
                next.apply(move_);
                assert_eq!(
                    table.get(value, column),
                    SliceCombination::E_SLICE.encode(&next)
                );
            }
        }
    }
}
