// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move`.
//!
//! A move names two squares and says what kind of transition it is. It does
//! not name the moving piece; that is whatever stands on the source square
//! when the move is checked or applied. Two moves are equal when their
//! squares and kinds are equal.
//!
//! Only quiet moves and plain captures exist today. En passant, castling and
//! promotion would be further `MoveKind` variants.
use std::fmt;

use crate::types::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Quiet,
    Capture,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    from: Coord,
    to: Coord,
    kind: MoveKind,
}

impl Move {
    /// Constructs a new quiet move from the source square to the destination
    /// square.
    pub fn quiet(source: Coord, dest: Coord) -> Move {
        Move {
            from: source,
            to: dest,
            kind: MoveKind::Quiet,
        }
    }

    /// Constructs a new capture move from the source square to the destination
    /// square.
    pub fn capture(source: Coord, dest: Coord) -> Move {
        Move {
            from: source,
            to: dest,
            kind: MoveKind::Capture,
        }
    }

    pub fn source(self) -> Coord {
        self.from
    }

    pub fn destination(self) -> Coord {
        self.to
    }

    pub fn kind(self) -> MoveKind {
        self.kind
    }

    pub fn is_capture(self) -> bool {
        self.kind == MoveKind::Capture
    }

    pub fn is_quiet(self) -> bool {
        self.kind == MoveKind::Quiet
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
