use crate::{
    Phase, PhaseSolveError, PhaseSolver, TableBuildError,
    codec::{
        DescriptorCodec, DominoCodec, EdgeOrientationCodec, FinalPermutationCodec, HalfTurnCodec,
    },
    coordinate::CoordinateError,
    start, success, working,
};
use cube3::{Algorithm, Cube};
use itertools::Itertools;
use log::{debug, info};
use std::{panic, sync::LazyLock, thread, time::Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverInitError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error(transparent)]
    Table(#[from] TableBuildError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("The cube is not reachable from the solved state by face turns")]
    InvalidCube,
    #[error(transparent)]
    Phase(#[from] PhaseSolveError),
    #[error("The cube was not reduced after the {phase} phase")]
    PhaseNotReduced { phase: Phase },
    #[error("The cube was not solved after the final phase")]
    NotSolved,
}

/// How `ThistlethwaiteSolver` runs its phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    verify_phases: bool,
    merge_phase_boundaries: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            verify_phases: true,
            merge_phase_boundaries: true,
        }
    }
}

impl SolverOptions {
    /// Check after every phase that it and all earlier phases are solved.
    #[must_use]
    pub fn with_verify_phases(mut self, verify_phases: bool) -> Self {
        self.verify_phases = verify_phases;
        self
    }

    /// Merge the last moves of a phase with the first moves of the next when
    /// they turn the same face.
    #[must_use]
    pub fn with_merge_phase_boundaries(mut self, merge_phase_boundaries: bool) -> Self {
        self.merge_phase_boundaries = merge_phase_boundaries;
        self
    }

    #[must_use]
    pub fn verify_phases(&self) -> bool {
        self.verify_phases
    }

    #[must_use]
    pub fn merge_phase_boundaries(&self) -> bool {
        self.merge_phase_boundaries
    }
}

/// Solves a cube phase by phase, each phase working on the result of the
/// previous one.
#[derive(Debug)]
pub struct ThistlethwaiteSolver {
    phases: [PhaseSolver; 4],
    options: SolverOptions,
}

static SHARED: LazyLock<Result<ThistlethwaiteSolver, SolverInitError>> =
    LazyLock::new(ThistlethwaiteSolver::new);

impl ThistlethwaiteSolver {
    /// Builds all four transition tables with the default options.
    ///
    /// # Errors
    ///
    /// See `SolverInitError`.
    pub fn new() -> Result<Self, SolverInitError> {
        Self::with_options(SolverOptions::default())
    }

    /// Builds all four transition tables, one thread per phase.
    ///
    /// # Errors
    ///
    /// See `SolverInitError`.
    pub fn with_options(options: SolverOptions) -> Result<Self, SolverInitError> {
        info!(start!("Building the transition tables"));
        let start = Instant::now();

        let codecs: [Box<dyn DescriptorCodec>; 4] = [
            Box::new(EdgeOrientationCodec::new()),
            Box::new(DominoCodec::new()),
            Box::new(HalfTurnCodec::new()?),
            Box::new(FinalPermutationCodec::new()?),
        ];
        let [edge_orientation, domino, half_turn, final_permutation] = thread::scope(|s| {
            codecs
                .map(|codec| s.spawn(move || PhaseSolver::new(codec)))
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| panic::resume_unwind(payload))
                })
        });
        let phases = [
            edge_orientation?,
            domino?,
            half_turn?,
            final_permutation?,
        ];

        info!(
            success!("Built the transition tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        Ok(ThistlethwaiteSolver { phases, options })
    }

    /// A process-wide solver with the default options, built on first use.
    ///
    /// # Errors
    ///
    /// Returns the error the first build failed with.
    pub fn shared() -> Result<&'static Self, &'static SolverInitError> {
        SHARED.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> SolverOptions {
        self.options
    }

    #[must_use]
    pub fn phase_solver(&self, phase: Phase) -> &PhaseSolver {
        &self.phases[phase.index()]
    }

    /// Whether `phase` and every phase before it are solved on `cube`.
    #[must_use]
    pub fn is_reduced(&self, phase: Phase, cube: &Cube) -> bool {
        self.phases[..=phase.index()]
            .iter()
            .all(|solver| solver.is_solved(cube))
    }

    /// The moves of each phase, in order. Applying all four to `cube` solves
    /// it.
    ///
    /// # Errors
    ///
    /// See `SolveError`. Apart from `InvalidCube` these are all bugs.
    pub fn solve_phases(&self, cube: &Cube) -> Result<[Algorithm; 4], SolveError> {
        if !cube.is_valid() {
            return Err(SolveError::InvalidCube);
        }
        debug!(start!("Solving {:?}"), cube);
        let start = Instant::now();

        let mut state = *cube;
        let mut solutions: [Algorithm; 4] = Default::default();
        for (solver, solution) in self.phases.iter().zip(&mut solutions) {
            let phase = solver.phase();
            *solution = solver.solve(&state)?;
            state.apply_algorithm(solution);
            debug!(working!("{}: {}"), phase, solution);
            if self.options.verify_phases && !self.is_reduced(phase, &state) {
                return Err(SolveError::PhaseNotReduced { phase });
            }
        }
        if !state.is_solved() {
            return Err(SolveError::NotSolved);
        }

        debug!(
            success!("Solved in {} moves in {:.3}ms ({})"),
            solutions.iter().map(Algorithm::len).sum::<usize>(),
            start.elapsed().as_secs_f64() * 1000.0,
            solutions.iter().map(Algorithm::len).join(" + ")
        );
        Ok(solutions)
    }

    /// A solution for `cube`: the phases one after the other, simplified
    /// across phase boundaries unless the options say otherwise.
    ///
    /// # Errors
    ///
    /// See `solve_phases`.
    pub fn solve_full(&self, cube: &Cube) -> Result<Algorithm, SolveError> {
        let mut full = Algorithm::default();
        for solution in &self.solve_phases(cube)? {
            full.append(solution);
        }
        if self.options.merge_phase_boundaries {
            full = full.simplified();
        }
        Ok(full)
    }
}
