use crate::{Face, Move, ParseMoveError, Turn};
use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A sequence of moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Algorithm {
    moves: Vec<Move>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseAlgorithmError {
    #[error("Invalid move {token:?} at position {index}")]
    InvalidMove {
        index: usize,
        token: String,
        #[source]
        source: ParseMoveError,
    },
}

impl Algorithm {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn push(&mut self, move_: Move) {
        self.moves.push(move_);
    }

    pub fn append(&mut self, other: &Algorithm) {
        self.moves.extend_from_slice(&other.moves);
    }

    /// The algorithm that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Algorithm {
        self.moves.iter().rev().map(|move_| move_.inverse()).collect()
    }

    /// A random move sequence where no two consecutive moves turn the same
    /// face.
    #[must_use]
    pub fn random(length: usize, rng: &mut fastrand::Rng) -> Algorithm {
        let mut moves: Vec<Move> = Vec::with_capacity(length);
        while moves.len() < length {
            let candidate = Move::ALL[rng.usize(..Move::ALL.len())];
            if moves.last().is_some_and(|last| last.face == candidate.face) {
                continue;
            }
            moves.push(candidate);
        }
        Algorithm { moves }
    }

    /// Merges adjacent turns of the same face and drops the ones that cancel
    /// out. Moves on the opposite face in between are commuted past, so
    /// `U D U'` becomes `D`.
    #[must_use]
    pub fn simplified(&self) -> Algorithm {
        let mut out: Vec<Move> = Vec::with_capacity(self.moves.len());
        for &move_ in &self.moves {
            let mut merged = None;
            for (back, prev) in out.iter().enumerate().rev() {
                if prev.face == move_.face {
                    merged = Some(back);
                    break;
                }
                if prev.face != move_.face.opposite() {
                    break;
                }
            }
            match merged {
                Some(at) => {
                    let quarter_turns = out[at].turn.quarter_turns() + move_.turn.quarter_turns();
                    match Turn::from_quarter_turns(quarter_turns) {
                        Some(turn) => out[at] = Move::new(move_.face, turn),
                        None => {
                            out.remove(at);
                        }
                    }
                }
                None => out.push(move_),
            }
        }
        Algorithm { moves: out }
    }

    /// Whether every move in the algorithm is one of `allowed`.
    #[must_use]
    pub fn uses_only(&self, allowed: &[Move]) -> bool {
        self.moves.iter().all(|move_| allowed.contains(move_))
    }

    /// The faces turned, in order, with repeats.
    #[must_use]
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.moves.iter().map(|move_| move_.face)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(" "))
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                token
                    .parse::<Move>()
                    .map_err(|source| ParseAlgorithmError::InvalidMove {
                        index,
                        token: token.to_owned(),
                        source,
                    })
            })
            .collect()
    }
}

impl FromIterator<Move> for Algorithm {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Algorithm {
            moves: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Move>> for Algorithm {
    fn from(moves: Vec<Move>) -> Self {
        Algorithm { moves }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cube;

    fn alg(s: &str) -> Algorithm {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let a = alg("R U2  F'\tD");
        assert_eq!(a.len(), 4);
        assert_eq!(a.to_string(), "R U2 F' D");
        assert!(alg("").is_empty());
        assert_eq!(alg("").to_string(), "");
        let r2 = Move::new(Face::R, Turn::Half);
        assert_eq!(Algorithm::from(vec![r2, r2.inverse()]), alg("R2 R2"));

        let err = "R U Q".parse::<Algorithm>().unwrap_err();
        assert_eq!(
            err,
            ParseAlgorithmError::InvalidMove {
                index: 2,
                token: "Q".to_owned(),
                source: ParseMoveError::UnknownFace('Q'),
            }
        );
    }

    #[test]
    fn test_inverse_undoes() {
        let a = alg("R U F' L2 D B' U2");
        let mut cube = Cube::from_algorithm(&a);
        cube.apply_algorithm(&a.inverse());
        assert!(cube.is_solved());
        assert_eq!(a.inverse().to_string(), "U2 B D' L2 F U' R'");
    }

    #[test]
    fn test_simplified() {
        assert_eq!(alg("R R").simplified(), alg("R2"));
        assert_eq!(alg("R R'").simplified(), alg(""));
        assert_eq!(alg("U D U'").simplified(), alg("D"));
        assert_eq!(alg("F R R' F'").simplified(), alg(""));
        assert_eq!(alg("U2 U R F").simplified(), alg("U' R F"));
        assert_eq!(alg("U R U").simplified(), alg("U R U"));
        assert_eq!(alg("L R L2 R'").simplified(), alg("L'"));
    }

    #[test]
    fn test_simplified_preserves_state() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let mut a = Algorithm::random(20, &mut rng);
            a.append(&Algorithm::random(5, &mut rng).inverse());
            let s = a.simplified();
            assert!(s.len() <= a.len());
            assert_eq!(Cube::from_algorithm(&a), Cube::from_algorithm(&s));
        }
    }

    #[test]
    fn test_random() {
        let mut rng = fastrand::Rng::with_seed(1);
        let a = Algorithm::random(50, &mut rng);
        assert_eq!(a.len(), 50);
        assert!(a.faces().tuple_windows().all(|(x, y)| x != y));
        assert!(Algorithm::random(0, &mut rng).is_empty());
    }

    #[test]
    fn test_uses_only() {
        let half_turns: Vec<Move> = Move::ALL.into_iter().filter(|m| m.is_half_turn()).collect();
        assert!(alg("R2 U2 B2").uses_only(&half_turns));
        assert!(!alg("R2 U").uses_only(&half_turns));
    }
}
