//! Descriptor codecs: one per phase, each turning the part of a cube that
//! phase cares about into a dense integer and moving that integer directly.

mod domino;
mod edge_orientation;
mod final_permutation;
mod half_turn;

pub use domino::DominoCodec;
pub use edge_orientation::EdgeOrientationCodec;
pub use final_permutation::FinalPermutationCodec;
pub use half_turn::HalfTurnCodec;

use crate::Phase;
use cube3::{Cube, Move};

/// Encodes a phase's equivalence class of cube states as a descriptor in
/// `[0, descriptor_count)`.
///
/// `encode` is only meaningful for cubes on which every earlier phase is
/// already solved. For such a cube `c` and any move `m` of the phase,
/// `encode(c.apply(m)) == apply_move(encode(c), m)`.
pub trait DescriptorCodec: Send + Sync {
    fn phase(&self) -> Phase;

    fn descriptor_count(&self) -> u32;

    fn solved_descriptor(&self) -> u32;

    fn encode(&self, cube: &Cube) -> u32;

    /// Moves `descriptor` by the move at `column` of `self.phase().moves()`.
    fn transition(&self, descriptor: u32, column: usize) -> u32;

    /// Moves `descriptor` by `move_`, or `None` if the phase never turns
    /// `move_` or `descriptor` is out of range.
    fn apply_move(&self, descriptor: u32, move_: Move) -> Option<u32> {
        if descriptor >= self.descriptor_count() {
            return None;
        }
        let column = self.phase().column(move_)?;
        Some(self.transition(descriptor, column))
    }

    /// Whether this phase alone is solved on `cube`.
    fn is_solved(&self, cube: &Cube) -> bool {
        self.encode(cube) == self.solved_descriptor()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::DescriptorCodec;
    use cube3::Cube;

    /// Random walks through the phase's own moves, checking after each step
    /// that moving the descriptor agrees with moving the cube.
    pub fn assert_moves_agree(codec: &dyn DescriptorCodec, seed: u64) {
        let moves = codec.phase().moves();
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..1000 {
            let mut cube = Cube::SOLVED;
            let mut descriptor = codec.encode(&cube);
            assert_eq!(descriptor, codec.solved_descriptor());
            for _ in 0..20 {
                let move_ = moves[rng.usize(..moves.len())];
                cube.apply(move_);
                let expected = codec.encode(&cube);
                assert!(expected < codec.descriptor_count());
                descriptor = codec.apply_move(descriptor, move_).unwrap();
                assert_eq!(descriptor, expected, "{} after {move_}", codec.phase());
            }
        }
    }
}
