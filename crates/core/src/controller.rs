//! Controller module - piece movement, SRS rotation, and drops
//!
//! Pure functions over a [`Field`]: they only query it, never mutate it, and return a new
//! [`Tetromino`] value or `None` when the move is rejected. A rejected move leaves the
//! caller's piece untouched because pieces are values.

use crate::pieces::{get_shape, kick_offsets, Tetromino};
use crate::playfield::Field;
use crate::types::{Position, RotationDirection};

/// Shift a piece by (d_col, d_row)
///
/// Returns the moved piece if the target position is valid.
pub fn move_piece<F: Field + ?Sized>(
    field: &F,
    piece: &Tetromino,
    d_col: i32,
    d_row: i32,
) -> Option<Tetromino> {
    let target = piece.position.offset(d_col, d_row);
    field
        .is_valid_position(piece, target)
        .then(|| piece.with_position(target))
}

/// Rotate a piece with SRS wall kicks
///
/// The kick key is the (from, to) pair for clockwise turns and the reversed pair for
/// counter-clockwise turns. Candidates are tried in table order; table `dy` points up, so
/// it is subtracted from the row. Returns the first candidate that fits, or `None` if all
/// five collide.
pub fn rotate<F: Field + ?Sized>(
    field: &F,
    piece: &Tetromino,
    direction: RotationDirection,
) -> Option<Tetromino> {
    let from = piece.rotation;
    let to = from.rotated(direction);

    let rotated = Tetromino {
        rotation: to,
        matrix: get_shape(piece.kind, to),
        ..*piece
    };

    let key = match direction {
        RotationDirection::Clockwise => (from, to),
        RotationDirection::CounterClockwise => (to, from),
    };

    let Some(kicks) = kick_offsets(piece.kind, key.0, key.1) else {
        // No table entry: plain rotation in place only
        return field
            .is_valid_position(&rotated, rotated.position)
            .then_some(rotated);
    };

    kicks.iter().find_map(|&(dx, dy)| {
        let candidate = piece.position.offset(dx as i32, -(dy as i32));
        field
            .is_valid_position(&rotated, candidate)
            .then(|| rotated.with_position(candidate))
    })
}

/// Drop a piece as far as it goes
///
/// Returns the landed piece and the number of rows descended. Does not lock.
pub fn hard_drop<F: Field + ?Sized>(field: &F, piece: &Tetromino) -> (Tetromino, u32) {
    let mut landed = *piece;
    let mut distance = 0;

    while let Some(next) = move_piece(field, &landed, 0, 1) {
        landed = next;
        distance += 1;
    }

    (landed, distance)
}

/// Where the piece would land on a hard drop (ghost preview)
pub fn ghost_position<F: Field + ?Sized>(field: &F, piece: &Tetromino) -> Position {
    hard_drop(field, piece).0.position
}

/// Whether the piece is resting on the floor or the stack
pub fn is_landed<F: Field + ?Sized>(field: &F, piece: &Tetromino) -> bool {
    move_piece(field, piece, 0, 1).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playfield::Playfield;
    use crate::types::{Cell, Color, PieceKind, Rotation};

    const GRAY: Cell = Cell {
        color: Some(Color(0x808080)),
    };

    #[test]
    fn test_move_rejected_at_wall() {
        let field: Playfield = Playfield::new();
        let piece = Tetromino::at(PieceKind::T, Position::new(30, 0), Rotation::North);

        assert!(move_piece(&field, &piece, -1, 0).is_none());
        let moved = move_piece(&field, &piece, 1, 0).unwrap();
        assert_eq!(moved.position, Position::new(30, 1));
        // the input piece is untouched
        assert_eq!(piece.position, Position::new(30, 0));
    }

    #[test]
    fn test_rotation_uses_kick_when_blocked() {
        // T East hugging the left wall: South would poke out at col -1
        let field: Playfield = Playfield::new();
        let piece = Tetromino::at(PieceKind::T, Position::new(30, -1), Rotation::East);
        assert!(field.is_valid_position(&piece, piece.position));

        let rotated = rotate(&field, &piece, RotationDirection::Clockwise).unwrap();
        assert_eq!(rotated.rotation, Rotation::South);
        // second candidate of 1->2 is (+1, 0)
        assert_eq!(rotated.position, Position::new(30, 0));
    }

    #[test]
    fn test_kick_dy_is_subtracted_from_row() {
        // J North near the floor, CW kicks 0->1: (0,0) and (-1,0) blocked, (-1,+1) moves up
        let mut field: Playfield = Playfield::new();
        let piece = Tetromino::at(PieceKind::J, Position::new(37, 4), Rotation::North);
        // block the in-place East shape (col 5, rows 37..=39) and its (-1,0) variant
        field.set_cell(39, 5, GRAY);
        field.set_cell(39, 4, GRAY);
        assert!(field.is_valid_position(&piece, piece.position));

        let rotated = rotate(&field, &piece, RotationDirection::Clockwise).unwrap();
        assert_eq!(rotated.rotation, Rotation::East);
        assert_eq!(rotated.position, Position::new(36, 3));
    }

    #[test]
    fn test_ccw_uses_reversed_key() {
        let field: Playfield = Playfield::new();
        let piece = Tetromino::at(PieceKind::J, Position::new(30, 4), Rotation::East);

        let rotated = rotate(&field, &piece, RotationDirection::CounterClockwise).unwrap();
        assert_eq!(rotated.rotation, Rotation::North);
        assert_eq!(rotated.position, piece.position);
    }

    #[test]
    fn test_rotation_rejected_when_enclosed() {
        // horizontal I in a one-row slot at the bottom of a full stack
        let mut field: Playfield = Playfield::new();
        for row in 20..39 {
            field.fill_row_except(row, GRAY, &[]);
        }
        field.fill_row_except(39, GRAY, &[3, 4, 5, 6]);

        let piece = Tetromino::at(PieceKind::I, Position::new(38, 3), Rotation::North);
        assert!(field.is_valid_position(&piece, piece.position));

        let before = piece;
        assert!(rotate(&field, &piece, RotationDirection::Clockwise).is_none());
        assert!(rotate(&field, &piece, RotationDirection::CounterClockwise).is_none());
        assert_eq!(piece, before);
    }

    #[test]
    fn test_hard_drop_distance_on_empty_field() {
        let field: Playfield = Playfield::new();
        let piece = Tetromino::at(PieceKind::O, Position::new(20, 4), Rotation::North);

        let (landed, distance) = hard_drop(&field, &piece);
        assert_eq!(landed.position.row, 38);
        assert_eq!(distance, 18);
        assert_eq!(ghost_position(&field, &piece), landed.position);
        assert!(is_landed(&field, &landed));
        assert!(!is_landed(&field, &piece));
    }

    #[test]
    fn test_hard_drop_stops_on_stack() {
        let mut field: Playfield = Playfield::new();
        field.set_cell(35, 5, GRAY);
        let piece = Tetromino::at(PieceKind::O, Position::new(20, 4), Rotation::North);

        let (landed, distance) = hard_drop(&field, &piece);
        assert_eq!(landed.position.row, 33);
        assert_eq!(distance, 13);
    }
}
