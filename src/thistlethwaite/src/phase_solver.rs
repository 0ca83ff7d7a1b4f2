use crate::{
    Phase,
    codec::DescriptorCodec,
    table::{TableBuildError, TransitionTable},
};
use cube3::{Algorithm, Cube};
use std::fmt;
use thiserror::Error;

/// Failures while walking a transition table. Each one means the codec and
/// its table disagree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseSolveError {
    #[error("The {phase} descriptor {descriptor} is outside [0, {count})")]
    DescriptorOutOfRange {
        phase: Phase,
        descriptor: u32,
        count: u32,
    },
    #[error("The {phase} descriptor {descriptor} has no step towards solved")]
    NoPath { phase: Phase, descriptor: u32 },
    #[error("The {phase} table walk did not reach solved within {max_depth} moves")]
    WalkTooLong { phase: Phase, max_depth: u8 },
}

/// A codec paired with its transition table.
pub struct PhaseSolver {
    codec: Box<dyn DescriptorCodec>,
    table: TransitionTable,
}

impl fmt::Debug for PhaseSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseSolver")
            .field("phase", &self.phase())
            .field("descriptor_count", &self.table.descriptor_count())
            .field("max_depth", &self.table.max_depth())
            .finish_non_exhaustive()
    }
}

impl PhaseSolver {
    /// Builds the transition table for `codec`.
    ///
    /// # Errors
    ///
    /// Fails if the table cannot be built. See `TableBuildError`.
    pub fn new(codec: Box<dyn DescriptorCodec>) -> Result<Self, TableBuildError> {
        let table = TransitionTable::build(codec.as_ref())?;
        Ok(PhaseSolver { codec, table })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.codec.phase()
    }

    #[must_use]
    pub fn codec(&self) -> &dyn DescriptorCodec {
        self.codec.as_ref()
    }

    #[must_use]
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Whether this phase alone is solved on `cube`.
    #[must_use]
    pub fn is_solved(&self, cube: &Cube) -> bool {
        self.codec.is_solved(cube)
    }

    /// A shortest sequence of this phase's moves that solves the phase on
    /// `cube`. The earlier phases must already be solved on `cube`.
    ///
    /// # Errors
    ///
    /// See `PhaseSolveError`.
    pub fn solve(&self, cube: &Cube) -> Result<Algorithm, PhaseSolveError> {
        self.solve_descriptor(self.codec.encode(cube))
    }

    /// Walks the table from `descriptor` to the solved descriptor.
    ///
    /// # Errors
    ///
    /// See `PhaseSolveError`.
    pub fn solve_descriptor(&self, mut descriptor: u32) -> Result<Algorithm, PhaseSolveError> {
        let phase = self.phase();
        let count = self.table.descriptor_count();
        if descriptor >= count {
            return Err(PhaseSolveError::DescriptorOutOfRange {
                phase,
                descriptor,
                count,
            });
        }

        let max_depth = self.table.max_depth();
        let mut solution = Algorithm::default();
        while descriptor != self.table.solved_descriptor() {
            let step = self
                .table
                .step(descriptor)
                .ok_or(PhaseSolveError::NoPath { phase, descriptor })?;
            if solution.len() >= usize::from(max_depth) {
                return Err(PhaseSolveError::WalkTooLong { phase, max_depth });
            }
            solution.push(step.move_);
            descriptor = step.successor;
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DominoCodec, EdgeOrientationCodec};
    use cube3::Move;

    #[test_log::test]
    fn test_solves_edge_orientation() {
        let solver = PhaseSolver::new(Box::new(EdgeOrientationCodec::new())).unwrap();
        assert_eq!(solver.phase(), Phase::EdgeOrientation);

        let mut rng = fastrand::Rng::with_seed(9);
        for _ in 0..200 {
            let mut cube = Cube::from_algorithm(&Algorithm::random(20, &mut rng));
            let solution = solver.solve(&cube).unwrap();
            let descriptor = solver.codec().encode(&cube);
            assert_eq!(
                Some(solution.len() as u8),
                solver.table().distance(descriptor)
            );
            cube.apply_algorithm(&solution);
            assert!(solver.is_solved(&cube));
        }
    }

    #[test_log::test]
    fn test_solved_cube_needs_nothing() {
        let solver = PhaseSolver::new(Box::new(EdgeOrientationCodec::new())).unwrap();
        assert!(solver.solve(&Cube::SOLVED).unwrap().is_empty());
    }

    #[test_log::test]
    fn test_descriptor_out_of_range() {
        let solver = PhaseSolver::new(Box::new(EdgeOrientationCodec::new())).unwrap();
        assert_eq!(
            solver.solve_descriptor(2048),
            Err(PhaseSolveError::DescriptorOutOfRange {
                phase: Phase::EdgeOrientation,
                descriptor: 2048,
                count: 2048
            })
        );
    }

    #[test_log::test]
    fn test_domino_solutions_stay_in_move_set() {
        let solver = PhaseSolver::new(Box::new(DominoCodec::new())).unwrap();
        assert_eq!(solver.table().max_depth(), 10);
        let moves: Vec<Move> = Phase::DominoReduction.moves().to_vec();
        let mut rng = fastrand::Rng::with_seed(10);
        for _ in 0..100 {
            let scramble: Algorithm = (0..30).map(|_| moves[rng.usize(..moves.len())]).collect();
            let mut cube = Cube::from_algorithm(&scramble);
            let solution = solver.solve(&cube).unwrap();
            assert!(solution.uses_only(&moves));
            assert!(solution.len() <= 10);
            cube.apply_algorithm(&solution);
            assert!(solver.is_solved(&cube));
        }
    }
}
