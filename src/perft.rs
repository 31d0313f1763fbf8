// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::moves::Move;
use crate::position::Position;

fn apply(pos: &Position, mov: Move) -> Position {
    let piece = pos
        .piece_at(mov.source())
        .expect("generated move without a piece at its source");
    pos.commit(mov, piece)
}

/// Counts the move paths of the given length from this position. Sibling subtrees are counted
/// in parallel.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| perft(&apply(pos, mov), depth - 1))
        .sum()
}

/// Splits a perft count by root move.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return vec![];
    }

    pos.legal_moves()
        .par_iter()
        .map(|&mov| (mov, perft(&apply(pos, mov), depth - 1)))
        .collect()
}
