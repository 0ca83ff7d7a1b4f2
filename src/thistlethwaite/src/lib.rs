//! A four phase Thistlethwaite solver for the 3x3x3 cube.
//!
//! Every phase narrows the cube down to a smaller subgroup. A phase encodes
//! the part of the cube it cares about as a dense integer descriptor, and a
//! breadth first search from the solved descriptor records which move brings
//! each descriptor one step closer. Solving a phase is then a table walk.

#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::module_name_repetitions)]

pub mod codec;
pub mod combination;
pub mod coordinate;
pub mod permutation;
pub mod phase;
pub mod phase_solver;
pub mod solver;
pub mod table;

pub use phase::Phase;
pub use phase_solver::{PhaseSolveError, PhaseSolver};
pub use solver::{SolveError, SolverInitError, SolverOptions, ThistlethwaiteSolver};
pub use table::{Step, TableBuildError, TransitionTable};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

// FACTORIAL[i] = i!
const FACTORIAL: [u32; 13] = {
    let mut arr = [0; 13];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};
