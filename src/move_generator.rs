// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation and the legality predicate.
//!
//! Generation is pseudo-legal: every move follows its piece's movement
//! pattern, stays on the board and never lands on a friendly piece, but
//! nothing looks at whether the mover's king is left attacked. Only pieces
//! belonging to the side to move are generated for.
use crate::attacks;
use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::position::{MoveError, Position};
use crate::types::{Piece, PieceKind};

/// Move list. Arbitrary arrangements can carry far more moves than a real game, so the list is
/// not capped.
pub type MoveVec = Vec<Move>;

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates pseudo-legal moves for every piece of the side to move.
    pub fn generate_moves(&self, pos: &Position, moves: &mut MoveVec) {
        let to_move = pos.turn();
        for &piece in pos.pieces().iter().filter(|piece| piece.color == to_move) {
            self.generate_moves_for(pos, piece, moves);
        }
    }

    /// Generates the moves of a single piece, whoever's turn it is.
    pub fn generate_moves_for(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(pos, piece, moves),
            PieceKind::Knight => self.generate_knight_moves(pos, piece, moves),
            PieceKind::Bishop => self.generate_bishop_moves(pos, piece, moves),
            PieceKind::Rook => self.generate_rook_moves(pos, piece, moves),
            PieceKind::Queen => self.generate_queen_moves(pos, piece, moves),
            PieceKind::King => self.generate_king_moves(pos, piece, moves),
        }
    }

    fn generate_pawn_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        let dir = piece.color.pawn_direction();
        let occupied = pos.occupied();

        // Pushes never capture. The double push is only available from the home rank and needs
        // both squares in front of the pawn to be empty.
        if let Some(single) = piece.coord.offset(0, dir) {
            if !occupied.test(single) {
                moves.push(Move::quiet(piece.coord, single));
                if piece.coord.y() == piece.color.pawn_home_rank() {
                    if let Some(double) = single.offset(0, dir) {
                        if !occupied.test(double) {
                            moves.push(Move::quiet(piece.coord, double));
                        }
                    }
                }
            }
        }

        // Diagonals are only moves when an enemy stands there.
        let enemies = pos.occupancy(piece.color.toggle());
        for target in attacks::pawn_attacks(piece.coord, piece.color) & enemies {
            moves.push(Move::capture(piece.coord, target));
        }
    }

    fn generate_knight_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        let targets = attacks::knight_attacks(piece.coord);
        self.generate_targets(pos, piece, targets, moves);
    }

    fn generate_bishop_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        let targets = attacks::bishop_attacks(piece.coord, pos.occupied());
        self.generate_targets(pos, piece, targets, moves);
    }

    fn generate_rook_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        let targets = attacks::rook_attacks(piece.coord, pos.occupied());
        self.generate_targets(pos, piece, targets, moves);
    }

    fn generate_queen_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        self.generate_rook_moves(pos, piece, moves);
        self.generate_bishop_moves(pos, piece, moves);
    }

    fn generate_king_moves(&self, pos: &Position, piece: Piece, moves: &mut MoveVec) {
        let targets = attacks::king_attacks(piece.coord);
        self.generate_targets(pos, piece, targets, moves);
    }

    /// Turns a set of reachable squares into moves, dropping squares held by the piece's own
    /// side and tagging the ones held by the other side as captures.
    fn generate_targets(
        &self,
        pos: &Position,
        piece: Piece,
        targets: Bitboard,
        moves: &mut MoveVec,
    ) {
        let friends = pos.occupancy(piece.color);
        let enemies = pos.occupancy(piece.color.toggle());
        for target in targets & !friends {
            if enemies.test(target) {
                moves.push(Move::capture(piece.coord, target));
            } else {
                moves.push(Move::quiet(piece.coord, target));
            }
        }
    }

    /// Checks a move against the position, reporting the first rule it breaks.
    pub fn check_legality(&self, pos: &Position, mov: Move) -> Result<(), MoveError> {
        self.validate_move(pos, mov).map(|_| ())
    }

    /// Like `check_legality`, but hands back the piece making the move. Only the moving piece's
    /// own moves are generated.
    pub fn validate_move(&self, pos: &Position, mov: Move) -> Result<Piece, MoveError> {
        let piece = check_mover(pos, mov)?;
        let mut candidates = MoveVec::new();
        self.generate_moves_for(pos, piece, &mut candidates);
        if !candidates.contains(&mov) {
            return Err(MoveError::NotInMoveSet);
        }

        Ok(piece)
    }

    /// The pseudo-legal moves of the side to move that pass the legality predicate.
    pub fn legal_moves(&self, pos: &Position) -> MoveVec {
        let mut candidates = MoveVec::new();
        self.generate_moves(pos, &mut candidates);
        candidates
            .iter()
            .cloned()
            .filter(|&mov| check_mover(pos, mov).is_ok())
            .collect()
    }
}

// The rules that do not depend on the move set: a piece of the side to move stands on the
// source square and the destination does not hold one of its friends.
fn check_mover(pos: &Position, mov: Move) -> Result<Piece, MoveError> {
    let piece = pos
        .piece_at(mov.source())
        .ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != pos.turn() {
        return Err(MoveError::WrongTurn);
    }

    if let Some(target) = pos.piece_at(mov.destination()) {
        if target.color == piece.color {
            return Err(MoveError::FriendlyOccupiedDestination);
        }
    }

    // Both squares are `Coord`s and so already lie on the board. Raw coordinates are turned
    // away with `OffBoard` before a `Move` is ever built.
    Ok(piece)
}
