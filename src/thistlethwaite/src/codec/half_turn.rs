use super::DescriptorCodec;
use crate::{
    Phase,
    coordinate::{Coordinate, CoordinateError, CornerCoset, MoveTable, SliceCombination},
};
use cube3::Cube;

const M_SLICES: u32 = 70;

/// Descriptor: `corner_coset * 70 + m_slice`.
///
/// `corner_coset` is the class of the corner permutation modulo the half turn
/// corner group. It accounts for both the tetrad split of the corners and the
/// corner permutation parity, so no separate parity bit is needed. `m_slice`
/// ranks which U/D edge positions hold UF, UB, DF and DB.
#[derive(Clone, Debug)]
pub struct HalfTurnCodec {
    cosets: CornerCoset,
    coset_moves: MoveTable,
    slice_moves: MoveTable,
    solved: u32,
}

impl HalfTurnCodec {
    /// # Errors
    ///
    /// Fails if the corner cosets cannot be partitioned. See `CoordinateError`.
    pub fn new() -> Result<Self, CoordinateError> {
        let moves = Phase::HalfTurnReduction.moves();
        let cosets = CornerCoset::new()?;
        let mut codec = HalfTurnCodec {
            coset_moves: MoveTable::generate(&cosets, moves),
            slice_moves: MoveTable::generate(&SliceCombination::M_SLICE, moves),
            cosets,
            solved: 0,
        };
        codec.solved = codec.encode(&Cube::SOLVED);
        Ok(codec)
    }
}

impl DescriptorCodec for HalfTurnCodec {
    fn phase(&self) -> Phase {
        Phase::HalfTurnReduction
    }

    fn descriptor_count(&self) -> u32 {
        self.cosets.count() * M_SLICES
    }

    fn solved_descriptor(&self) -> u32 {
        self.solved
    }

    fn encode(&self, cube: &Cube) -> u32 {
        self.cosets.encode(cube) * M_SLICES + SliceCombination::M_SLICE.encode(cube)
    }

    fn transition(&self, descriptor: u32, column: usize) -> u32 {
        let (coset, slice) = (descriptor / M_SLICES, descriptor % M_SLICES);
        self.coset_moves.get(coset, column) * M_SLICES + self.slice_moves.get(slice, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::assert_moves_agree;

    #[test]
    fn test_layout() {
        let codec = HalfTurnCodec::new().unwrap();
        assert_eq!(codec.descriptor_count(), 29_400);
        assert_eq!(codec.solved_descriptor(), 49);
    }

    #[test]
    fn test_moves_agree_with_cube() {
        assert_moves_agree(&HalfTurnCodec::new().unwrap(), 3);
    }

    #[test]
    fn test_half_turn_states_are_solved() {
        let codec = HalfTurnCodec::new().unwrap();
        for (moves, solved) in [
            ("R2 U2 F2 D2 L2 B2 U2", true),
            ("U", false),
            ("U D", false),
            ("U D'", false),
            ("U2 D2 R2", true),
            ("R2 U R2 U'", false),
        ] {
            let cube = Cube::from_algorithm(&moves.parse().unwrap());
            assert_eq!(codec.is_solved(&cube), solved, "{moves}");
        }
    }
}
