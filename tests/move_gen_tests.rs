// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::HashSet;

use gambit::{Color, Coord, Move, Piece, PieceKind, Position};

fn sq(x: i32, y: i32) -> Coord {
    Coord::new(x, y).unwrap()
}

fn piece(kind: PieceKind, color: Color, x: i32, y: i32) -> Piece {
    Piece::new(kind, color, sq(x, y))
}

fn assert_moves_generated(pos: &Position, moves: &[Move]) {
    let generated: HashSet<_> = pos.legal_moves().into_iter().collect();
    let expected: HashSet<_> = moves.iter().cloned().collect();
    for mov in &generated {
        if !expected.contains(mov) {
            panic!("move {} was generated but not expected", mov);
        }
    }

    for mov in &expected {
        if !generated.contains(mov) {
            panic!("move {} was not generated", mov);
        }
    }
}

fn assert_moves_does_not_contain(pos: &Position, moves: &[Move]) {
    let generated: HashSet<_> = pos.legal_moves().into_iter().collect();
    for mov in moves {
        if generated.contains(mov) {
            panic!("move list contained banned move: {}", mov);
        }
    }
}

mod pawns {
    use super::*;

    #[test]
    fn white_pawn_home_rank() {
        let pos = Position::from_pieces(vec![piece(PieceKind::Pawn, Color::White, 5, 6)]).unwrap();
        assert_moves_generated(
            &pos,
            &[
                Move::quiet(sq(5, 6), sq(5, 5)),
                Move::quiet(sq(5, 6), sq(5, 4)),
            ],
        );
    }

    #[test]
    fn white_pawn_advanced() {
        let pos = Position::from_pieces(vec![piece(PieceKind::Pawn, Color::White, 5, 4)]).unwrap();
        assert_moves_generated(&pos, &[Move::quiet(sq(5, 4), sq(5, 3))]);
    }

    #[test]
    fn white_pawn_on_last_rank_is_stuck() {
        let pos = Position::from_pieces(vec![piece(PieceKind::Pawn, Color::White, 5, 0)]).unwrap();
        assert_moves_generated(&pos, &[]);
    }

    #[test]
    fn white_pawn_captures_both_ways() {
        let pos = Position::from_pieces(vec![
            piece(PieceKind::Pawn, Color::White, 3, 4),
            piece(PieceKind::Knight, Color::Black, 2, 3),
            piece(PieceKind::Bishop, Color::Black, 4, 3),
            piece(PieceKind::Rook, Color::Black, 3, 3),
        ])
        .unwrap();
        assert_moves_generated(
            &pos,
            &[
                Move::capture(sq(3, 4), sq(2, 3)),
                Move::capture(sq(3, 4), sq(4, 3)),
            ],
        );
    }

    #[test]
    fn pawn_does_not_capture_forward() {
        let pos = Position::from_pieces(vec![
            piece(PieceKind::Pawn, Color::White, 3, 4),
            piece(PieceKind::Rook, Color::Black, 3, 3),
        ])
        .unwrap();
        assert_moves_does_not_contain(&pos, &[Move::capture(sq(3, 4), sq(3, 3))]);
    }

    #[test]
    fn black_pawn_after_white_move() {
        let pos = Position::new_game()
            .try_move_by_coordinates((0, 6), (0, 5))
            .unwrap();
        let moves = pos.legal_moves();
        assert!(moves.contains(&Move::quiet(sq(7, 1), sq(7, 3))));
        assert!(moves.contains(&Move::quiet(sq(6, 0), sq(5, 2))));
        assert!(moves
            .iter()
            .all(|mov| pos.piece_at(mov.source()).unwrap().color == Color::Black));
        assert_eq!(20, moves.len());
    }
}

mod sliders {
    use super::*;

    #[test]
    fn bishop_blocked_and_capturing() {
        let pos = Position::from_pieces(vec![
            piece(PieceKind::Bishop, Color::White, 2, 7),
            piece(PieceKind::Pawn, Color::White, 1, 6),
            piece(PieceKind::Pawn, Color::Black, 4, 5),
        ])
        .unwrap();
        let bishop_moves: HashSet<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mov| mov.source() == sq(2, 7))
            .collect();
        let expected: HashSet<_> = vec![
            Move::quiet(sq(2, 7), sq(3, 6)),
            Move::capture(sq(2, 7), sq(4, 5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(expected, bishop_moves);
    }

    #[test]
    fn rook_ray_stops_at_enemy() {
        let pos = Position::from_pieces(vec![
            piece(PieceKind::Rook, Color::White, 3, 3),
            piece(PieceKind::Pawn, Color::Black, 3, 1),
            piece(PieceKind::Pawn, Color::White, 5, 3),
            piece(PieceKind::Pawn, Color::White, 0, 3),
        ])
        .unwrap();
        let rook_moves: HashSet<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mov| mov.source() == sq(3, 3))
            .collect();
        let expected: HashSet<_> = vec![
            Move::quiet(sq(3, 3), sq(3, 2)),
            Move::capture(sq(3, 3), sq(3, 1)),
            Move::quiet(sq(3, 3), sq(4, 3)),
            Move::quiet(sq(3, 3), sq(2, 3)),
            Move::quiet(sq(3, 3), sq(1, 3)),
            Move::quiet(sq(3, 3), sq(3, 4)),
            Move::quiet(sq(3, 3), sq(3, 5)),
            Move::quiet(sq(3, 3), sq(3, 6)),
            Move::quiet(sq(3, 3), sq(3, 7)),
        ]
        .into_iter()
        .collect();
        assert_eq!(expected, rook_moves);
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let queen = Position::from_pieces(vec![
            piece(PieceKind::Queen, Color::White, 2, 5),
            piece(PieceKind::Pawn, Color::Black, 4, 3),
            piece(PieceKind::Knight, Color::White, 2, 2),
        ])
        .unwrap();
        let rook = Position::from_pieces(vec![
            piece(PieceKind::Rook, Color::White, 2, 5),
            piece(PieceKind::Pawn, Color::Black, 4, 3),
            piece(PieceKind::Knight, Color::White, 2, 2),
        ])
        .unwrap();
        let bishop = Position::from_pieces(vec![
            piece(PieceKind::Bishop, Color::White, 2, 5),
            piece(PieceKind::Pawn, Color::Black, 4, 3),
            piece(PieceKind::Knight, Color::White, 2, 2),
        ])
        .unwrap();

        let from_queen = |pos: &Position| -> HashSet<Coord> {
            pos.legal_moves()
                .into_iter()
                .filter(|mov| mov.source() == sq(2, 5))
                .map(|mov| mov.destination())
                .collect()
        };
        let union: HashSet<_> = from_queen(&rook)
            .union(&from_queen(&bishop))
            .cloned()
            .collect();
        assert_eq!(union, from_queen(&queen));
        assert!(from_queen(&queen).contains(&sq(4, 3)));
        assert!(!from_queen(&queen).contains(&sq(2, 2)));
    }
}

mod kings_and_knights {
    use super::*;

    #[test]
    fn king_avoids_friends_and_takes_enemies() {
        let pos = Position::from_pieces(vec![
            piece(PieceKind::King, Color::White, 0, 7),
            piece(PieceKind::Pawn, Color::White, 0, 6),
            piece(PieceKind::Pawn, Color::Black, 1, 6),
        ])
        .unwrap();
        let king_moves: HashSet<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mov| mov.source() == sq(0, 7))
            .collect();
        let expected: HashSet<_> = vec![
            Move::quiet(sq(0, 7), sq(1, 7)),
            Move::capture(sq(0, 7), sq(1, 6)),
        ]
        .into_iter()
        .collect();
        assert_eq!(expected, king_moves);
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let pos = Position::new_game();
        assert_moves_does_not_contain(&pos, &[Move::quiet(sq(1, 7), sq(3, 6))]);
        let moves = pos.legal_moves();
        assert!(moves.contains(&Move::quiet(sq(1, 7), sq(2, 5))));
        assert!(moves.contains(&Move::quiet(sq(6, 7), sq(7, 5))));
    }

    #[test]
    fn king_may_walk_into_attack() {
        // Check is not modeled; the king may step next to the enemy rook's file.
        let pos = Position::from_pieces(vec![
            piece(PieceKind::King, Color::White, 4, 7),
            piece(PieceKind::Rook, Color::Black, 3, 0),
        ])
        .unwrap();
        assert!(pos.is_legal(Move::quiet(sq(4, 7), sq(3, 7))));
    }
}

mod crowded_boards {
    use super::*;

    fn border_queens() -> Position {
        let border = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| x == 0 || x == 7 || y == 0 || y == 7)
            .map(|(x, y)| piece(PieceKind::Queen, Color::White, x, y));
        Position::from_pieces(border).unwrap()
    }

    #[test]
    fn queens_on_every_border_square() {
        let pos = border_queens();
        assert_eq!(28, pos.pieces().len());
        assert_eq!(288, pos.pseudolegal_moves().len());
        assert_eq!(288, pos.legal_moves().len());
    }

    #[test]
    fn crowded_board_still_applies_moves() {
        let pos = border_queens();
        let next = pos.attempt_move_by_coordinates((0, 0), (1, 1));
        assert_eq!(1, next.history().len());
        assert!(next.piece_at(sq(1, 1)).is_some());

        let rejected = pos.attempt_move_by_coordinates((0, 0), (1, 0));
        assert_eq!(pos, rejected);
    }
}
