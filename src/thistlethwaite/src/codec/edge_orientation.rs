use super::DescriptorCodec;
use crate::{
    Phase,
    coordinate::{Coordinate, EdgeOrientation, MoveTable},
};
use cube3::Cube;

/// Descriptor: the edge orientation coordinate, `[0, 2048)`. Solved is 0.
#[derive(Clone, Debug)]
pub struct EdgeOrientationCodec {
    flips: MoveTable,
}

impl EdgeOrientationCodec {
    #[must_use]
    pub fn new() -> Self {
        EdgeOrientationCodec {
            flips: MoveTable::generate(&EdgeOrientation, Phase::EdgeOrientation.moves()),
        }
    }
}

impl Default for EdgeOrientationCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCodec for EdgeOrientationCodec {
    fn phase(&self) -> Phase {
        Phase::EdgeOrientation
    }

    fn descriptor_count(&self) -> u32 {
        EdgeOrientation.count()
    }

    fn solved_descriptor(&self) -> u32 {
        0
    }

    fn encode(&self, cube: &Cube) -> u32 {
        EdgeOrientation.encode(cube)
    }

    fn transition(&self, descriptor: u32, column: usize) -> u32 {
        self.flips.get(descriptor, column)
    }
}
