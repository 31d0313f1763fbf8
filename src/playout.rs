// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::position::Position;

/// Plays up to `max_plies` uniformly random legal moves from the given position. The playout
/// ends early if the side to move has no legal moves. Kings are ordinary pieces here, so a
/// playout can carry on after one has been captured.
pub fn random_playout<R>(pos: &Position, max_plies: usize, rng: &mut R) -> Position
where
    R: Rng + ?Sized,
{
    let mut current = pos.clone();
    for ply in 0..max_plies {
        let moves = current.legal_moves();
        let mov = match moves.choose(rng) {
            Some(&mov) => mov,
            None => {
                info!("{} has no legal moves after {} plies", current.turn(), ply);
                break;
            }
        };

        current = match current.try_move(mov) {
            Ok(next) => next,
            Err(err) => unreachable!("generated move {} was rejected: {}", mov, err),
        };
    }

    current
}
