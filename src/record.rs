// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;

use crate::position::{Position, PositionError};
use crate::types::{Color, Piece};

/// A serializable snapshot of a game: the current arrangement, every arrangement before it, and
/// the side to move. The side to move is carried for readers of the record; it must agree with
/// the parity of the history when the record is turned back into a `Position`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub turn: Color,
    pub pieces: Vec<Piece>,
    pub history: Vec<Vec<Piece>>,
}

impl GameRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<GameRecord> {
        serde_json::from_str(json)
    }
}

impl<'a> From<&'a Position> for GameRecord {
    fn from(pos: &'a Position) -> GameRecord {
        GameRecord {
            turn: pos.turn(),
            pieces: pos.pieces().to_vec(),
            history: pos.history().iter().map(|snapshot| snapshot.to_vec()).collect(),
        }
    }
}

impl TryFrom<GameRecord> for Position {
    type Error = PositionError;

    fn try_from(record: GameRecord) -> Result<Position, PositionError> {
        let pos = Position::from_parts(record.pieces, record.history)?;
        if pos.turn() != record.turn {
            return Err(PositionError::TurnMismatch {
                recorded: record.turn,
                derived: pos.turn(),
            });
        }

        Ok(pos)
    }
}
