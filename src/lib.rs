// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation and move application for chess positions.
//!
//! A `Position` is an immutable arrangement of pieces together with the
//! arrangements that came before it; the side to move follows from the
//! length of that history. Moves are generated per piece kind for the side
//! to move, checked against a small set of legality rules, and applied to
//! produce a new `Position`. Check, castling, en passant, promotion and draw
//! rules are not modeled.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod bitboard;
mod move_generator;
mod moves;
mod perft;
mod playout;
mod position;
mod record;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveKind};
pub use perft::{divide, perft};
pub use playout::random_playout;
pub use position::{piece_at, MoveError, Position, PositionError, SequenceError, Snapshot};
pub use record::GameRecord;
pub use types::{Color, Coord, CoordError, Direction, Piece, PieceKind};
