use super::DescriptorCodec;
use crate::{
    Phase,
    coordinate::{Coordinate, CornerOrientation, MoveTable, SliceCombination},
};
use cube3::Cube;

const TWISTS: u32 = 2187;

/// Descriptor: `e_slice * 2187 + twist`, where `e_slice` ranks which of the
/// 12 positions hold the E-slice edges and `twist` is the corner orientation
/// coordinate.
#[derive(Clone, Debug)]
pub struct DominoCodec {
    slice: MoveTable,
    twists: MoveTable,
    solved: u32,
}

impl DominoCodec {
    #[must_use]
    pub fn new() -> Self {
        let moves = Phase::DominoReduction.moves();
        let mut codec = DominoCodec {
            slice: MoveTable::generate(&SliceCombination::E_SLICE, moves),
            twists: MoveTable::generate(&CornerOrientation, moves),
            solved: 0,
        };
        codec.solved = codec.encode(&Cube::SOLVED);
        codec
    }
}

impl Default for DominoCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCodec for DominoCodec {
    fn phase(&self) -> Phase {
        Phase::DominoReduction
    }

    fn descriptor_count(&self) -> u32 {
        SliceCombination::E_SLICE.count() * TWISTS
    }

    fn solved_descriptor(&self) -> u32 {
        self.solved
    }

    fn encode(&self, cube: &Cube) -> u32 {
        SliceCombination::E_SLICE.encode(cube) * TWISTS + CornerOrientation.encode(cube)
    }

    fn transition(&self, descriptor: u32, column: usize) -> u32 {
        let (slice, twist) = (descriptor / TWISTS, descriptor % TWISTS);
        self.slice.get(slice, column) * TWISTS + self.twists.get(twist, column)
    }
}
