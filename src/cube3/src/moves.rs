use std::{fmt, str::FromStr};
use thiserror::Error;

/// A face of the cube. The declaration order is the order moves are laid out
/// in `Move::ALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

/// How far a face is turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Clockwise,
    Half,
    CounterClockwise,
}

/// A single face turn, e.g. `R`, `U2` or `F'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Expected a move but got an empty string")]
    Empty,
    #[error("Unknown face {0:?}, expected one of U, R, F, D, L, B")]
    UnknownFace(char),
    #[error("Unknown turn suffix {0:?}, expected nothing, 2 or '")]
    UnknownSuffix(String),
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::B => Face::F,
        }
    }

    fn from_char(c: char) -> Option<Face> {
        Some(match c {
            'U' => Face::U,
            'R' => Face::R,
            'F' => Face::F,
            'D' => Face::D,
            'L' => Face::L,
            'B' => Face::B,
            _ => return None,
        })
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        };
        write!(f, "{c}")
    }
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::Half, Turn::CounterClockwise];

    /// The number of clockwise quarter turns this turn amounts to.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8 + 1
    }

    /// The turn equivalent to `quarter_turns` clockwise quarter turns, or
    /// `None` if they add up to a full rotation.
    #[must_use]
    pub const fn from_quarter_turns(quarter_turns: u8) -> Option<Turn> {
        match quarter_turns % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::Half => Turn::Half,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

impl Move {
    /// Every move, face-major: `U U2 U' R R2 R' ... B B2 B'`.
    pub const ALL: [Move; 18] = {
        let mut moves = [Move::new(Face::U, Turn::Clockwise); 18];
        let mut i = 0;
        while i < moves.len() {
            moves[i] = Move::new(Face::ALL[i / 3], Turn::ALL[i % 3]);
            i += 1;
        }
        moves
    };

    #[must_use]
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// The position of this move in `Move::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.face.index() * 3 + self.turn as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Move> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }

    #[must_use]
    pub const fn is_half_turn(self) -> bool {
        matches!(self.turn, Turn::Half)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.turn {
            Turn::Clockwise => "",
            Turn::Half => "2",
            Turn::CounterClockwise => "'",
        };
        write!(f, "{}{suffix}", self.face)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(ParseMoveError::Empty)?;
        let face = Face::from_char(c).ok_or(ParseMoveError::UnknownFace(c))?;
        let turn = match chars.as_str() {
            "" | "1" => Turn::Clockwise,
            "2" | "2'" => Turn::Half,
            "'" | "3" => Turn::CounterClockwise,
            suffix => return Err(ParseMoveError::UnknownSuffix(suffix.to_owned())),
        };
        Ok(Move::new(face, turn))
    }
}
