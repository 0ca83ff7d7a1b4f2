//! A cubie-level model of the 3x3x3 cube: pieces, moves and move sequences.

#![warn(clippy::pedantic)]

mod algorithm;
mod cube;
mod moves;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use cube::{Corner, Cube, Edge, is_odd};
pub use moves::{Face, Move, ParseMoveError, Turn};
