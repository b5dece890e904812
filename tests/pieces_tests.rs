//! Pieces and controller tests - shapes, spawn data, and SRS rotation

use guideline_tetris::core::pieces::{get_shape, piece_color, spawn_position};
use guideline_tetris::core::{
    ghost_position, hard_drop, move_piece, rotate, Field, Playfield, Tetromino,
};
use guideline_tetris::types::{Cell, Color, PieceKind, Position, Rotation, RotationDirection};

const GRAY: Cell = Cell {
    color: Some(Color(0x808080)),
};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North).minos(),
        &[(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::East).minos(),
        &[(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::South).minos(),
        &[(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::West).minos(),
        &[(1, 0), (1, 1), (1, 2), (1, 3)]
    );
}

#[test]
fn test_o_piece_same_in_every_rotation() {
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north.size(), 4);
    for i in 1..4 {
        assert_eq!(get_shape(PieceKind::O, Rotation::from_index(i)), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::North).minos(),
        &[(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::East).minos(),
        &[(1, 0), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::South).minos(),
        &[(0, 1), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::West).minos(),
        &[(1, 0), (0, 1), (1, 1), (1, 2)]
    );
}

#[test]
fn test_spawn_data() {
    assert_eq!(spawn_position(PieceKind::O), Position::new(19, 4));
    for kind in [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ] {
        assert_eq!(spawn_position(kind), Position::new(19, 3));
    }

    let piece = Tetromino::new(PieceKind::J);
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(piece.color, piece_color(PieceKind::J));
    assert_eq!(piece.color.to_string(), "#4169ff");
}

// ============== Movement Tests ==============

#[test]
fn test_move_returns_new_piece() {
    let field: Playfield = Playfield::new();
    let piece = Tetromino::new(PieceKind::L);

    let moved = move_piece(&field, &piece, 2, 3).unwrap();
    assert_eq!(moved.position, Position::new(22, 5));
    assert_eq!(moved.rotation, piece.rotation);
    assert_eq!(piece.position, Position::new(19, 3));
}

#[test]
fn test_move_blocked_by_stack() {
    let mut field: Playfield = Playfield::new();
    field.set_cell(30, 7, GRAY);
    let piece = Tetromino::at(PieceKind::O, Position::new(30, 4), Rotation::North);

    assert!(move_piece(&field, &piece, 1, 0).is_none());
    assert!(move_piece(&field, &piece, -1, 0).is_some());
}

// ============== SRS Rotation Tests ==============

#[test]
fn test_rotation_closure_all_pieces() {
    let field: Playfield = Playfield::new();
    for kind in PieceKind::ALL {
        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let start = Tetromino::at(kind, Position::new(25, 3), Rotation::North);
            let mut piece = start;
            for _ in 0..4 {
                piece = rotate(&field, &piece, direction).unwrap();
            }
            assert_eq!(piece.rotation, Rotation::North, "{:?} {:?}", kind, direction);
            assert_eq!(piece.position, start.position, "{:?} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_rotate_back_and_forth() {
    let field: Playfield = Playfield::new();
    for kind in PieceKind::ALL {
        for i in 0..4 {
            let start = Tetromino::at(kind, Position::new(25, 3), Rotation::from_index(i));
            let there = rotate(&field, &start, RotationDirection::Clockwise).unwrap();
            let back = rotate(&field, &there, RotationDirection::CounterClockwise).unwrap();
            assert_eq!(back, start, "{:?} from {}", kind, i);
        }
    }
}

#[test]
fn test_i_wall_kick_off_left_wall() {
    // vertical I hugging the left wall, East state: cells in column 0
    let field: Playfield = Playfield::new();
    let piece = Tetromino::at(PieceKind::I, Position::new(25, -2), Rotation::East);
    assert!(field.is_valid_position(&piece, piece.position));

    // 1->2 candidates: (0,0) and (-1,0) leave the field, (+2,0) fits
    let rotated = rotate(&field, &piece, RotationDirection::Clockwise).unwrap();
    assert_eq!(rotated.rotation, Rotation::South);
    assert_eq!(rotated.position, Position::new(25, 0));
}

#[test]
fn test_ccw_kicks_reuse_clockwise_offsets() {
    // T North -> West looks up the 3->0 row: (0,0), (-1,0), ...
    let mut field: Playfield = Playfield::new();
    field.set_cell(32, 5, GRAY);
    let piece = Tetromino::at(PieceKind::T, Position::new(30, 4), Rotation::North);

    let rotated = rotate(&field, &piece, RotationDirection::CounterClockwise).unwrap();
    assert_eq!(rotated.rotation, Rotation::West);
    assert_eq!(rotated.position, Position::new(30, 3));
}

#[test]
fn test_rotation_failure_returns_none() {
    // J lying in a pocket at the bottom left: every kick candidate collides
    let mut field: Playfield = Playfield::new();
    for row in 20..38 {
        field.fill_row_except(row, GRAY, &[]);
    }
    field.fill_row_except(38, GRAY, &[0]);
    field.fill_row_except(39, GRAY, &[0, 1, 2]);

    let piece = Tetromino::at(PieceKind::J, Position::new(38, 0), Rotation::North);
    assert!(field.is_valid_position(&piece, piece.position));

    assert!(rotate(&field, &piece, RotationDirection::Clockwise).is_none());
    assert!(rotate(&field, &piece, RotationDirection::CounterClockwise).is_none());
    assert_eq!(piece.rotation, Rotation::North);
}

// ============== Drop Tests ==============

#[test]
fn test_hard_drop_and_ghost_agree() {
    let mut field: Playfield = Playfield::new();
    for row in 35..40 {
        field.fill_row_except(row, GRAY, &[9]);
    }
    let piece = Tetromino::new(PieceKind::S);

    let (landed, distance) = hard_drop(&field, &piece);
    assert_eq!(ghost_position(&field, &piece), landed.position);
    assert_eq!(landed.position.row - piece.position.row, distance as i32);
    // S occupies two rows; its lower row rests on row 35
    assert_eq!(landed.lowest_row(), 34);
    assert!(move_piece(&field, &landed, 0, 1).is_none());
}

#[test]
fn test_hard_drop_distance_zero_when_landed() {
    let field: Playfield = Playfield::new();
    let piece = Tetromino::at(PieceKind::O, Position::new(38, 4), Rotation::North);
    let (landed, distance) = hard_drop(&field, &piece);
    assert_eq!(distance, 0);
    assert_eq!(landed, piece);
}
