// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::bitboard::Bitboard;
use crate::types::{Color, Coord, Direction, TableIndex, COLORS, DIRECTIONS};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

fn all_squares() -> impl Iterator<Item = Coord> {
    (0..64).map(Coord::from_index)
}

struct KingTable {
    table: [Bitboard; 64],
}

impl KingTable {
    pub fn new() -> KingTable {
        let mut kt = KingTable {
            table: [Bitboard::none(); 64],
        };

        for sq in all_squares() {
            kt.table[sq.index()] = DIRECTIONS
                .iter()
                .filter_map(|&dir| sq.towards(dir))
                .collect();
        }

        kt
    }

    pub fn attacks(&self, sq: Coord) -> Bitboard {
        self.table[sq.index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for sq in all_squares() {
            for &color in COLORS.iter() {
                // Pawns capture on the two diagonals ahead of them. A pawn on the far rank has
                // nowhere to go, and `offset` drops those squares.
                let dir = color.pawn_direction();
                pt.table[sq.index()][color.as_index()] = [sq.offset(-1, dir), sq.offset(1, dir)]
                    .iter()
                    .filter_map(|&target| target)
                    .collect();
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Coord, color: Color) -> Bitboard {
        self.table[sq.index()][color.as_index()]
    }
}

struct KnightTable {
    table: [Bitboard; 64],
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let mut kt = KnightTable {
            table: [Bitboard::none(); 64],
        };

        for sq in all_squares() {
            kt.table[sq.index()] = KNIGHT_OFFSETS
                .iter()
                .filter_map(|&(dx, dy)| sq.offset(dx, dy))
                .collect();
        }
        kt
    }

    pub fn attacks(&self, sq: Coord) -> Bitboard {
        self.table[sq.index()]
    }
}

struct RayTable {
    // Index 64 is a sentinel for "no blocker" and is always empty.
    table: [[Bitboard; 8]; 65],
}

impl RayTable {
    pub fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[Bitboard::none(); 8]; 65],
        };

        for sq in all_squares() {
            for &dir in DIRECTIONS.iter() {
                // Starting at the given square, cast a ray in the given direction and add all
                // squares up to the edge of the board.
                let mut entry = Bitboard::none();
                let mut cursor = sq;
                while let Some(next) = cursor.towards(dir) {
                    entry.set(next);
                    cursor = next;
                }

                rt.table[sq.index()][dir.as_index()] = entry;
            }
        }
        rt
    }

    pub fn attacks(&self, sq: usize, dir: Direction) -> Bitboard {
        self.table[sq][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: KingTable = KingTable::new();
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

// Rays whose indices grow as they extend meet their nearest blocker at the lowest set bit, rays
// whose indices shrink meet it at the highest. Everything past the blocker is the blocker's own
// ray in the same direction, so removing it leaves the squares up to and including the blocker.
fn positive_ray_attacks(sq: Coord, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.index_delta() > 0);
    let attacks = RAY_TABLE.attacks(sq.index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = blocker.trailing_zeros() as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

fn negative_ray_attacks(sq: Coord, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.index_delta() < 0);
    let attacks = RAY_TABLE.attacks(sq.index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = (64 - blocker.leading_zeros()).checked_sub(1).unwrap_or(64) as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

/// The squares reachable along one ray from `sq`, stopping at and including the first occupied
/// square.
pub fn ray_attacks(sq: Coord, occupancy: Bitboard, dir: Direction) -> Bitboard {
    if dir.index_delta() > 0 {
        positive_ray_attacks(sq, occupancy, dir)
    } else {
        negative_ray_attacks(sq, occupancy, dir)
    }
}

pub fn pawn_attacks(sq: Coord, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Coord) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Coord, occupancy: Bitboard) -> Bitboard {
    ray_attacks(sq, occupancy, Direction::NorthEast)
        | ray_attacks(sq, occupancy, Direction::SouthEast)
        | ray_attacks(sq, occupancy, Direction::SouthWest)
        | ray_attacks(sq, occupancy, Direction::NorthWest)
}

pub fn rook_attacks(sq: Coord, occupancy: Bitboard) -> Bitboard {
    ray_attacks(sq, occupancy, Direction::North)
        | ray_attacks(sq, occupancy, Direction::East)
        | ray_attacks(sq, occupancy, Direction::South)
        | ray_attacks(sq, occupancy, Direction::West)
}

pub fn queen_attacks(sq: Coord, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

pub fn king_attacks(sq: Coord) -> Bitboard {
    KING_TABLE.attacks(sq)
}
