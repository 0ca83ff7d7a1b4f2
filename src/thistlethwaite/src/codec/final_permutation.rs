use super::DescriptorCodec;
use crate::{
    Phase,
    coordinate::{Coordinate, CoordinateError, MoveTable, SlicePermutation, TetradPermutation},
    permutation,
};
use cube3::Cube;

const SLICE: u32 = 24;
const E_HALF: u32 = 12;

/// Descriptor: `((tetrads * 24 + m) * 24 + s) * 12 + e`.
///
/// `tetrads` is the corner permutation within the half turn group, `m` and
/// `s` rank the permutations of the M and S slice edges, and `e` is the
/// parity-aware rank of the E slice permutation. The E slice parity is not
/// stored: every state in the half turn group has an even edge permutation,
/// so it is the parity of `m` plus the parity of `s`.
#[derive(Clone, Debug)]
pub struct FinalPermutationCodec {
    tetrads: TetradPermutation,
    tetrad_moves: MoveTable,
    m_moves: MoveTable,
    s_moves: MoveTable,
    e_moves: MoveTable,
    odd: [bool; SLICE as usize],
}

impl FinalPermutationCodec {
    /// # Errors
    ///
    /// Fails if the half turn corner group cannot be enumerated. See
    /// `CoordinateError`.
    pub fn new() -> Result<Self, CoordinateError> {
        let moves = Phase::FinalPermutation.moves();
        let tetrads = TetradPermutation::new()?;
        Ok(FinalPermutationCodec {
            tetrad_moves: MoveTable::generate(&tetrads, moves),
            m_moves: MoveTable::generate(&SlicePermutation::M, moves),
            s_moves: MoveTable::generate(&SlicePermutation::S, moves),
            e_moves: MoveTable::generate(&SlicePermutation::E, moves),
            tetrads,
            odd: std::array::from_fn(|rank| {
                let mut perm = [0; 4];
                permutation::unrank(rank as u32, &mut perm);
                cube3::is_odd(&perm)
            }),
        })
    }

    fn e_slice_odd(&self, m: u32, s: u32) -> bool {
        self.odd[m as usize] ^ self.odd[s as usize]
    }
}

impl DescriptorCodec for FinalPermutationCodec {
    fn phase(&self) -> Phase {
        Phase::FinalPermutation
    }

    fn descriptor_count(&self) -> u32 {
        self.tetrads.count() * SLICE * SLICE * E_HALF
    }

    fn solved_descriptor(&self) -> u32 {
        0
    }

    fn encode(&self, cube: &Cube) -> u32 {
        let tetrads = self.tetrads.encode(cube);
        let m = SlicePermutation::M.encode(cube);
        let s = SlicePermutation::S.encode(cube);
        let e = permutation::rank_with_parity(&SlicePermutation::E.permutation(cube));
        ((tetrads * SLICE + m) * SLICE + s) * E_HALF + e
    }

    fn transition(&self, descriptor: u32, column: usize) -> u32 {
        let e = descriptor % E_HALF;
        let s = descriptor / E_HALF % SLICE;
        let m = descriptor / (E_HALF * SLICE) % SLICE;
        let tetrads = descriptor / (E_HALF * SLICE * SLICE);

        let mut e_perm = [0; 4];
        permutation::unrank_with_parity(e, self.e_slice_odd(m, s), &mut e_perm);
        let e_next = self.e_moves.get(permutation::rank(&e_perm), column);

        let tetrads = self.tetrad_moves.get(tetrads, column);
        let m = self.m_moves.get(m, column);
        let s = self.s_moves.get(s, column);
        ((tetrads * SLICE + m) * SLICE + s) * E_HALF + e_next / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::assert_moves_agree;
    use cube3::{Algorithm, Move};
    use itertools::Itertools;

    #[test]
    fn test_layout() {
        let codec = FinalPermutationCodec::new().unwrap();
        assert_eq!(codec.descriptor_count(), 663_552);
        assert_eq!(codec.encode(&Cube::SOLVED), codec.solved_descriptor());
    }

    #[test]
    fn test_moves_agree_with_cube() {
        assert_moves_agree(&FinalPermutationCodec::new().unwrap(), 4);
    }

    #[test]
    fn test_e_slice_parity_is_implied() {
        let half_turns = Move::ALL.into_iter().filter(|m| m.is_half_turn()).collect_vec();
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..500 {
            let scramble: Algorithm = (0..25).map(|_| half_turns[rng.usize(..6)]).collect();
            let cube = Cube::from_algorithm(&scramble);
            let odd = |slice: SlicePermutation| cube3::is_odd(&slice.permutation(&cube));
            assert_eq!(
                odd(SlicePermutation::E),
                odd(SlicePermutation::M) ^ odd(SlicePermutation::S)
            );
        }
    }

    #[test]
    fn test_distinct_states_distinct_descriptors() {
        let codec = FinalPermutationCodec::new().unwrap();
        let states = ["", "U2", "R2", "U2 R2", "R2 U2", "U2 D2", "F2 B2 U2"];
        let descriptors = states
            .iter()
            .map(|moves| codec.encode(&Cube::from_algorithm(&moves.parse().unwrap())))
            .collect_vec();
        assert!(descriptors.iter().all_unique());
    }
}
