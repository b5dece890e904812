//! Playfield tests - collision, locking, and line clearing

use guideline_tetris::core::{Field, Playfield, Tetromino};
use guideline_tetris::types::{
    Cell, Color, PieceKind, Position, Rotation, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};

const GRAY: Cell = Cell {
    color: Some(Color(0x808080)),
};

fn filled_count(field: &Playfield) -> usize {
    field
        .grid()
        .iter()
        .flatten()
        .filter(|cell| !cell.is_empty())
        .count()
}

#[test]
fn test_playfield_new_empty() {
    let field: Playfield = Playfield::new();
    assert_eq!(field.width(), PLAYFIELD_WIDTH);
    assert_eq!(field.height(), PLAYFIELD_HEIGHT);
    assert_eq!(field.buffer_height(), 20);

    for row in 0..PLAYFIELD_HEIGHT as i32 {
        for col in 0..PLAYFIELD_WIDTH as i32 {
            assert_eq!(field.cell(row, col), Some(Cell::EMPTY));
        }
    }
}

#[test]
fn test_cell_out_of_bounds() {
    let mut field: Playfield = Playfield::new();

    assert_eq!(field.cell(-1, 0), None);
    assert_eq!(field.cell(0, -1), None);
    assert_eq!(field.cell(40, 0), None);
    assert_eq!(field.cell(0, 10), None);

    assert!(!field.set_cell(-1, 0, GRAY));
    assert!(!field.set_cell(0, 10, GRAY));
    assert!(field.set_cell(39, 9, GRAY));
    assert_eq!(field.cell(39, 9), Some(GRAY));
}

#[test]
fn test_is_valid_position_bounds() {
    let field: Playfield = Playfield::new();
    let piece = Tetromino::at(PieceKind::O, Position::new(30, 4), Rotation::North);
    assert!(field.is_valid_position(&piece, piece.position));

    // O occupies matrix columns 1-2 and rows 0-1
    assert!(field.is_valid_position(&piece, Position::new(30, -1)));
    assert!(!field.is_valid_position(&piece, Position::new(30, -2)));
    assert!(field.is_valid_position(&piece, Position::new(30, 7)));
    assert!(!field.is_valid_position(&piece, Position::new(30, 8)));
    assert!(field.is_valid_position(&piece, Position::new(0, 4)));
    assert!(!field.is_valid_position(&piece, Position::new(-1, 4)));
    assert!(field.is_valid_position(&piece, Position::new(38, 4)));
    assert!(!field.is_valid_position(&piece, Position::new(39, 4)));
}

#[test]
fn test_is_valid_position_overlap() {
    let mut field: Playfield = Playfield::new();
    field.set_cell(31, 5, GRAY);
    let piece = Tetromino::at(PieceKind::O, Position::new(30, 4), Rotation::North);

    assert!(!field.is_valid_position(&piece, piece.position));
    assert!(field.is_valid_position(&piece, Position::new(28, 4)));
}

#[test]
fn test_lock_piece_writes_color() {
    let mut field: Playfield = Playfield::new();
    let piece = Tetromino::at(PieceKind::T, Position::new(37, 3), Rotation::North);
    field.lock_piece(&piece);

    assert_eq!(filled_count(&field), 4);
    for p in piece.cells() {
        assert_eq!(field.cell(p.row, p.col), Some(Cell::filled(piece.color)));
    }
}

#[test]
fn test_row_39_with_i_piece_in_gap() {
    let mut field: Playfield = Playfield::new();
    field.fill_row_except(39, GRAY, &[3, 4, 5, 6]);
    assert!(field.detect_completed_lines().is_empty());

    let i = Tetromino::at(PieceKind::I, Position::new(38, 3), Rotation::North);
    assert!(field.is_valid_position(&i, i.position));
    field.lock_piece(&i);

    let lines = field.detect_completed_lines();
    assert_eq!(lines.as_slice(), &[39]);

    field.clear_lines(&lines);
    assert!(field.row(39).unwrap().iter().all(Cell::is_empty));
    assert_eq!(field.grid().len(), 40);
    assert_eq!(filled_count(&field), 0);
}

#[test]
fn test_clear_lines_shifts_rows_down() {
    let mut field: Playfield = Playfield::new();
    field.fill_row_except(38, GRAY, &[]);
    field.fill_row_except(39, GRAY, &[]);
    field.set_cell(37, 2, GRAY);
    field.set_cell(36, 7, GRAY);

    let lines = field.detect_completed_lines();
    assert_eq!(lines.as_slice(), &[38, 39]);
    field.clear_lines(&lines);

    assert_eq!(field.cell(39, 2), Some(GRAY));
    assert_eq!(field.cell(38, 7), Some(GRAY));
    assert_eq!(filled_count(&field), 2);
}

#[test]
fn test_clear_lines_empty_input_is_noop() {
    let mut field: Playfield = Playfield::new();
    field.set_cell(39, 0, GRAY);
    let before = field.clone();
    field.clear_lines(&[]);
    assert_eq!(field, before);
}

#[test]
fn test_game_over_zone() {
    let mut field: Playfield = Playfield::new();
    assert!(!field.is_game_over());

    field.set_cell(2, 2, GRAY);
    field.set_cell(3, 4, GRAY);
    field.set_cell(1, 7, GRAY);
    assert!(!field.is_game_over());

    field.set_cell(2, 6, GRAY);
    assert!(field.is_game_over());
}

#[test]
fn test_reset_empties_grid() {
    let mut field: Playfield = Playfield::new();
    for row in 30..40 {
        field.fill_row_except(row, GRAY, &[0]);
    }
    field.reset();
    assert_eq!(filled_count(&field), 0);
    assert_eq!(field, Playfield::default());
}
