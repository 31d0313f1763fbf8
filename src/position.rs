// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::bitboard::Bitboard;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Coord, Piece, PieceKind};

/// Reasons a move can be refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    NoPieceAtSource,
    WrongTurn,
    FriendlyOccupiedDestination,
    OffBoard,
    NotInMoveSet,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            MoveError::NoPieceAtSource => "no piece on the source square",
            MoveError::WrongTurn => "piece does not belong to the side to move",
            MoveError::FriendlyOccupiedDestination => "destination holds a friendly piece",
            MoveError::OffBoard => "square does not lie on the board",
            MoveError::NotInMoveSet => "piece cannot move that way",
        };
        f.write_str(msg)
    }
}

impl Error for MoveError {}

/// A rejected move within a sequence, and where in the sequence it sat.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SequenceError {
    pub index: usize,
    pub error: MoveError,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "move {} rejected: {}", self.index + 1, self.error)
    }
}

impl Error for SequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Possible errors that can arise when building a `Position` from an arbitrary arrangement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PositionError {
    SquareOccupied(Coord),
    TurnMismatch { recorded: Color, derived: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PositionError::SquareOccupied(sq) => write!(f, "more than one piece on {}", sq),
            PositionError::TurnMismatch { recorded, derived } => write!(
                f,
                "recorded side to move is {} but the history says {}",
                recorded, derived
            ),
        }
    }
}

impl Error for PositionError {}

/// An arrangement of pieces, shared between positions once it has been committed to history.
pub type Snapshot = Arc<[Piece]>;

/// A board position and the arrangements that preceded it. Positions are never modified in
/// place; applying a move produces a new `Position` and leaves this one intact.
#[derive(Clone, Debug)]
pub struct Position {
    pieces: Snapshot,
    history: Vec<Snapshot>,
}

/// Returns the piece standing on the given square, if any.
pub fn piece_at(pieces: &[Piece], coord: Coord) -> Option<Piece> {
    pieces.iter().find(|piece| piece.coord == coord).cloned()
}

fn validate(pieces: &[Piece]) -> Result<(), PositionError> {
    let mut seen = Bitboard::none();
    for piece in pieces {
        if seen.test(piece.coord) {
            return Err(PositionError::SquareOccupied(piece.coord));
        }

        seen.set(piece.coord);
    }

    Ok(())
}

fn same_arrangement(a: &[Piece], b: &[Piece]) -> bool {
    a.len() == b.len() && a.iter().all(|piece| b.contains(piece))
}

static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

//
// Construction and board state getters
//

impl Position {
    /// The standard starting position with an empty history. Queens stand on the d-file and
    /// kings on the e-file for both colors.
    pub fn new_game() -> Position {
        fn back_rank(color: Color) -> impl Iterator<Item = Piece> {
            BACK_RANK.iter().enumerate().map(move |(x, &kind)| {
                let coord = Coord::from_index(color.back_rank() as usize * 8 + x);
                Piece::new(kind, color, coord)
            })
        }

        fn pawn_rank(color: Color) -> impl Iterator<Item = Piece> {
            (0..8).map(move |x| {
                let coord = Coord::from_index(color.pawn_home_rank() as usize * 8 + x);
                Piece::new(PieceKind::Pawn, color, coord)
            })
        }

        let pieces: Vec<_> = back_rank(Color::White)
            .chain(pawn_rank(Color::White))
            .chain(pawn_rank(Color::Black))
            .chain(back_rank(Color::Black))
            .collect();
        Position {
            pieces: pieces.into(),
            history: vec![],
        }
    }

    /// Builds a white-to-move position with no history from an arbitrary arrangement.
    pub fn from_pieces<I>(pieces: I) -> Result<Position, PositionError>
    where
        I: IntoIterator<Item = Piece>,
    {
        Position::from_parts(pieces.into_iter().collect(), vec![])
    }

    /// Builds a position from a current arrangement and the arrangements that preceded it,
    /// oldest first. Every arrangement must hold at most one piece per square.
    pub fn from_parts(
        pieces: Vec<Piece>,
        history: Vec<Vec<Piece>>,
    ) -> Result<Position, PositionError> {
        validate(&pieces)?;
        for snapshot in &history {
            validate(snapshot)?;
        }

        Ok(Position {
            pieces: pieces.into(),
            history: history.into_iter().map(Snapshot::from).collect(),
        })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Prior arrangements, oldest first. The current arrangement is never among them.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// The side to move. White moves when the history has even length.
    pub fn turn(&self) -> Color {
        if self.history.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        piece_at(&self.pieces, coord)
    }

    /// The squares occupied by pieces of the given color.
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces
            .iter()
            .filter(|piece| piece.color == color)
            .map(|piece| piece.coord)
            .collect()
    }

    /// The squares occupied by any piece.
    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().map(|piece| piece.coord).collect()
    }

    /// Text diagram of the board: eight lines of eight space-separated characters, top row
    /// first. White pieces are uppercase, black lowercase, empty squares are `.`.
    pub fn render(&self) -> String {
        let mut buf = String::with_capacity(8 * 16);
        for y in 0..8 {
            if y != 0 {
                buf.push('\n');
            }

            for x in 0..8 {
                if x != 0 {
                    buf.push(' ');
                }

                let sq = Coord::from_index(y * 8 + x);
                match self.piece_at(sq) {
                    Some(piece) => buf.push(piece.visual()),
                    None => buf.push('.'),
                }
            }
        }

        buf
    }
}

//
// Move generation queries
//

impl Position {
    /// Moves obeying each piece's movement pattern, for the side to move only.
    pub fn pseudolegal_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(self, &mut moves);
        moves
    }

    pub fn legal_moves(&self) -> MoveVec {
        MoveGenerator::new().legal_moves(self)
    }

    pub fn check_legality(&self, mov: Move) -> Result<(), MoveError> {
        MoveGenerator::new().check_legality(self, mov)
    }

    pub fn is_legal(&self, mov: Move) -> bool {
        self.check_legality(mov).is_ok()
    }
}

//
// Move application
//

impl Position {
    /// Applies an already validated move made by `piece`. Anything on the destination is
    /// captured, and the arrangement before the move is appended to the history.
    pub fn commit(&self, mov: Move, piece: Piece) -> Position {
        let mut pieces: Vec<_> = self
            .pieces
            .iter()
            .filter(|p| p.coord != mov.destination() && p.coord != mov.source())
            .cloned()
            .collect();
        pieces.push(piece.moved_to(mov.destination()));

        let mut history = self.history.clone();
        history.push(self.pieces.clone());
        trace!("committed {} ({}), ply {}", mov, piece, history.len());
        Position {
            pieces: pieces.into(),
            history,
        }
    }

    /// Checks the move against this position and applies it.
    pub fn try_move(&self, mov: Move) -> Result<Position, MoveError> {
        match MoveGenerator::new().validate_move(self, mov) {
            Ok(piece) => Ok(self.commit(mov, piece)),
            Err(err) => {
                debug!("rejected {}: {}", mov, err);
                Err(err)
            }
        }
    }

    /// Applies the move if it is legal, otherwise hands back this position unchanged.
    pub fn attempt_move(&self, mov: Move) -> Position {
        self.try_move(mov).unwrap_or_else(|_| self.clone())
    }

    /// Applies the move between two raw coordinate pairs. The move is a capture when the
    /// destination is occupied and quiet otherwise.
    pub fn try_move_by_coordinates(
        &self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<Position, MoveError> {
        let from = Coord::new(from.0, from.1).map_err(|_| MoveError::OffBoard)?;
        let to = Coord::new(to.0, to.1).map_err(|_| MoveError::OffBoard)?;
        self.try_move(self.classify(from, to))
    }

    pub fn attempt_move_by_coordinates(&self, from: (i32, i32), to: (i32, i32)) -> Position {
        self.try_move_by_coordinates(from, to)
            .unwrap_or_else(|_| self.clone())
    }

    /// Applies a sequence of coordinate moves in order, stopping at the first rejection.
    pub fn try_moves_by_coordinates(
        &self,
        moves: &[((i32, i32), (i32, i32))],
    ) -> Result<Position, SequenceError> {
        let mut pos = self.clone();
        for (index, &(from, to)) in moves.iter().enumerate() {
            pos = pos
                .try_move_by_coordinates(from, to)
                .map_err(|error| SequenceError { index, error })?;
        }

        Ok(pos)
    }

    /// The move from `from` to `to`, tagged by whether the destination is occupied.
    pub fn classify(&self, from: Coord, to: Coord) -> Move {
        if self.piece_at(to).is_some() {
            Move::capture(from, to)
        } else {
            Move::quiet(from, to)
        }
    }

    /// The position before the last committed move, or `None` at the start of the history.
    pub fn undo(&self) -> Option<Position> {
        let (last, rest) = self.history.split_last()?;
        Some(Position {
            pieces: last.clone(),
            history: rest.to_vec(),
        })
    }
}

//
// Trait implementations
//

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        same_arrangement(&self.pieces, &other.pieces)
            && self.history.len() == other.history.len()
            && self
                .history
                .iter()
                .zip(other.history.iter())
                .all(|(a, b)| same_arrangement(a, b))
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: i32, y: i32) -> Coord {
        Coord::new(x, y).unwrap()
    }

    const START: &str = "r k b q k b k r
p p p p p p p p
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
P P P P P P P P
R K B Q K B K R";

    #[test]
    fn new_game_has_32_pieces() {
        assert_eq!(32, Position::new_game().pieces().len());
    }

    #[test]
    fn new_game_render() {
        assert_eq!(START, Position::new_game().render());
        assert_eq!(START, Position::new_game().to_string());
    }

    #[test]
    fn kings_and_queens_on_standard_files() {
        let pos = Position::new_game();
        let white_king = pos.piece_at(sq(4, 7)).unwrap();
        assert_eq!(PieceKind::King, white_king.kind);
        assert_eq!(Color::White, white_king.color);

        let black_queen = pos.piece_at(sq(3, 0)).unwrap();
        assert_eq!(PieceKind::Queen, black_queen.kind);
        assert_eq!(Color::Black, black_queen.color);
    }

    #[test]
    fn turn_follows_history_parity() {
        let pos = Position::new_game();
        assert_eq!(Color::White, pos.turn());
        let pos = pos.attempt_move_by_coordinates((4, 6), (4, 4));
        assert_eq!(Color::Black, pos.turn());
        let pos = pos.attempt_move_by_coordinates((4, 1), (4, 3));
        assert_eq!(Color::White, pos.turn());
    }

    #[test]
    fn piece_at_empty_square() {
        let pos = Position::new_game();
        assert_eq!(None, pos.piece_at(sq(4, 4)));
        assert_eq!(None, piece_at(&[], sq(0, 0)));
    }

    #[test]
    fn from_pieces_rejects_duplicates() {
        let rook = Piece::new(PieceKind::Rook, Color::White, sq(0, 0));
        let knight = Piece::new(PieceKind::Knight, Color::Black, sq(0, 0));
        assert_eq!(
            Err(PositionError::SquareOccupied(sq(0, 0))),
            Position::from_pieces(vec![rook, knight])
        );
    }

    #[test]
    fn occupancy_by_color() {
        let pos = Position::new_game();
        assert_eq!(16, pos.occupancy(Color::White).count());
        assert_eq!(16, pos.occupancy(Color::Black).count());
        assert_eq!(32, pos.occupied().count());
        assert!(pos.occupancy(Color::White).test(sq(0, 7)));
        assert!(!pos.occupancy(Color::White).test(sq(0, 0)));
    }

    #[test]
    fn commit_does_not_touch_input() {
        let pos = Position::new_game();
        let pawn = pos.piece_at(sq(4, 6)).unwrap();
        let next = pos.commit(Move::quiet(sq(4, 6), sq(4, 4)), pawn);
        assert_eq!(START, pos.render());
        assert!(pos.history().is_empty());
        assert_eq!(1, next.history().len());
        assert!(same_arrangement(&next.history()[0], pos.pieces()));
    }

    #[test]
    fn commit_captures() {
        let pos = Position::from_pieces(vec![
            Piece::new(PieceKind::Rook, Color::White, sq(0, 7)),
            Piece::new(PieceKind::Knight, Color::Black, sq(0, 2)),
        ])
        .unwrap();
        let next = pos.try_move(Move::capture(sq(0, 7), sq(0, 2))).unwrap();
        assert_eq!(1, next.pieces().len());
        let rook = next.piece_at(sq(0, 2)).unwrap();
        assert_eq!(PieceKind::Rook, rook.kind);
        assert_eq!(Color::White, rook.color);
    }

    #[test]
    fn try_move_reasons() {
        let pos = Position::new_game();
        assert_eq!(
            Err(MoveError::NoPieceAtSource),
            pos.try_move(Move::quiet(sq(4, 4), sq(4, 3)))
        );
        assert_eq!(
            Err(MoveError::WrongTurn),
            pos.try_move(Move::quiet(sq(4, 1), sq(4, 3)))
        );
        assert_eq!(
            Err(MoveError::FriendlyOccupiedDestination),
            pos.try_move(Move::capture(sq(0, 7), sq(0, 6)))
        );
        assert_eq!(
            Err(MoveError::NotInMoveSet),
            pos.try_move(Move::quiet(sq(4, 6), sq(4, 3)))
        );
        assert_eq!(
            Err(MoveError::OffBoard),
            pos.try_move_by_coordinates((4, 6), (4, 8))
        );
        assert_eq!(
            Err(MoveError::OffBoard),
            pos.try_move_by_coordinates((-1, 6), (0, 5))
        );
    }

    #[test]
    fn pseudolegal_moves_follow_the_turn() {
        let pos = Position::new_game();
        let moves = pos.pseudolegal_moves();
        assert_eq!(20, moves.len());
        assert!(moves
            .iter()
            .all(|mov| pos.piece_at(mov.source()).unwrap().color == Color::White));

        let pos = pos.attempt_move_by_coordinates((4, 6), (4, 4));
        let moves = pos.pseudolegal_moves();
        assert_eq!(20, moves.len());
        assert!(moves
            .iter()
            .all(|mov| pos.piece_at(mov.source()).unwrap().color == Color::Black));
    }

    #[test]
    fn mislabeled_move_is_not_in_move_set() {
        let pos = Position::new_game();
        assert_eq!(
            Err(MoveError::NotInMoveSet),
            pos.try_move(Move::capture(sq(4, 6), sq(4, 4)))
        );
    }

    #[test]
    fn undo_restores_previous_position() {
        let start = Position::new_game();
        assert!(start.undo().is_none());

        let after = start
            .try_moves_by_coordinates(&[((4, 6), (4, 4)), ((4, 1), (4, 3))])
            .unwrap();
        let back_one = after.undo().unwrap();
        assert_eq!(Color::Black, back_one.turn());
        assert_eq!(
            start.attempt_move_by_coordinates((4, 6), (4, 4)),
            back_one
        );
        assert_eq!(start, back_one.undo().unwrap());
    }

    #[test]
    fn sequence_reports_first_rejection() {
        let pos = Position::new_game();
        let err = pos
            .try_moves_by_coordinates(&[((4, 6), (4, 4)), ((4, 4), (4, 3))])
            .unwrap_err();
        assert_eq!(
            SequenceError {
                index: 1,
                error: MoveError::WrongTurn
            },
            err
        );
    }

    #[test]
    fn equality_ignores_piece_order() {
        let a = Piece::new(PieceKind::Rook, Color::White, sq(0, 7));
        let b = Piece::new(PieceKind::King, Color::Black, sq(4, 0));
        assert_eq!(
            Position::from_pieces(vec![a, b]).unwrap(),
            Position::from_pieces(vec![b, a]).unwrap()
        );
    }
}
