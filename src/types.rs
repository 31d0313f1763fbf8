// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Write};
use std::str::FromStr;


// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Possible errors that can arise when turning raw integers or text into a `Coord`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordError {
    OffBoard { x: i32, y: i32 },
    Malformed(String),
}

impl Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordError::OffBoard { x, y } => write!(f, "({}, {}) does not lie on the board", x, y),
            CoordError::Malformed(s) => write!(f, "\"{}\" is not a square name", s),
        }
    }
}

impl Error for CoordError {}

/// A square on the board. `x` counts files left to right and `y` counts ranks top to bottom, so
/// `(0, 0)` is the corner of black's back rank. A `Coord` always lies on the board; raw integer
/// pairs go through `Coord::new` and are rejected there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Result<Coord, CoordError> {
        if x < 0 || x >= 8 || y < 0 || y >= 8 {
            return Err(CoordError::OffBoard { x, y });
        }

        Ok(Coord {
            x: x as u8,
            y: y as u8,
        })
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    /// Index of this square in a bitboard, `y * 8 + x`.
    pub const fn index(self) -> usize {
        (self.y as usize) * 8 + self.x as usize
    }

    pub fn from_index(idx: usize) -> Coord {
        debug_assert!(idx < 64, "square index out of range: {}", idx);
        Coord {
            x: (idx & 7) as u8,
            y: (idx >> 3) as u8,
        }
    }

    /// The square `(dx, dy)` away from this one, if it is still on the board.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Coord> {
        Coord::new(self.x as i32 + dx, self.y as i32 + dy).ok()
    }

    pub fn towards(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.as_vector();
        self.offset(dx, dy)
    }
}

impl TryFrom<(i32, i32)> for Coord {
    type Error = CoordError;

    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Coord::new(x, y)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(coord: Coord) -> (i32, i32) {
        (coord.x as i32, coord.y as i32)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.x) as char)?;
        f.write_char((b'8' - self.y) as char)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordError::Malformed(s.to_owned());
        let chars: Vec<_> = s.chars().collect();
        if chars.len() != 2 {
            return Err(malformed());
        }

        let x = match chars[0] {
            c @ 'a'..='h' => c as i32 - 'a' as i32,
            _ => return Err(malformed()),
        };
        let y = match chars[1] {
            c @ '1'..='8' => '8' as i32 - c as i32,
            _ => return Err(malformed()),
        };
        Coord::new(x, y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction of travel along `y` for this color's pawns.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The rank this color's pawns start on, and the only rank they may double-step from.
    pub fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// First letter of the kind's name. Knights and kings share `k`.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'k',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compass directions as seen on the rendered board: north is up, towards `y = 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Change in bitboard index for one step in this direction.
    pub fn index_delta(self) -> i32 {
        let (dx, dy) = self.as_vector();
        dy * 8 + dx
    }
}

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub coord: Coord,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, coord: Coord) -> Piece {
        Piece { kind, color, coord }
    }

    /// A copy of this piece standing on another square.
    pub fn moved_to(self, coord: Coord) -> Piece {
        Piece { coord, ..self }
    }

    /// The character used for this piece on a rendered board.
    pub fn visual(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.coord)
    }
}
