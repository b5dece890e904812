//! Pieces module - Tetromino catalog and SRS kick data
//!
//! Shapes, colors, and spawn positions for the seven tetrominoes, plus the
//! Super Rotation System wall kick tables.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::types::{Color, PieceKind, Position, Rotation, BUFFER_HEIGHT, PLAYFIELD_WIDTH};

/// Offset of a single mino inside the piece matrix, as (x, y) = (column, row)
pub type MinoOffset = (i8, i8);

/// Square occupancy matrix of a piece in one rotation state
///
/// Stored as the four filled offsets plus the side length of the bounding matrix
/// (3 for J/L/S/T/Z, 4 for I and O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    size: u8,
    minos: [MinoOffset; 4],
}

impl PieceMatrix {
    const fn new(size: u8, minos: [MinoOffset; 4]) -> Self {
        Self { size, minos }
    }

    /// Side length of the square matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// The four filled (x, y) offsets
    pub fn minos(&self) -> &[MinoOffset; 4] {
        &self.minos
    }

    /// `matrix[y][x]`
    pub fn is_filled(&self, y: usize, x: usize) -> bool {
        self.minos
            .iter()
            .any(|&(mx, my)| mx as usize == x && my as usize == y)
    }

    /// Boolean matrix view, row-major (for preview rendering)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size())
            .map(|y| (0..self.size()).map(|x| self.is_filled(y, x)).collect())
            .collect()
    }
}

/// Get the matrix for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceMatrix {
    match kind {
        PieceKind::I => I_SHAPES[rotation.index() as usize],
        PieceKind::J => J_SHAPES[rotation.index() as usize],
        PieceKind::L => L_SHAPES[rotation.index() as usize],
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPES[rotation.index() as usize],
        PieceKind::T => T_SHAPES[rotation.index() as usize],
        PieceKind::Z => Z_SHAPES[rotation.index() as usize],
    }
}

/// I piece: horizontal on row 1, vertical on column 2, horizontal on row 2, vertical on column 1
const I_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
    PieceMatrix::new(4, [(2, 0), (2, 1), (2, 2), (2, 3)]),
    PieceMatrix::new(4, [(0, 2), (1, 2), (2, 2), (3, 2)]),
    PieceMatrix::new(4, [(1, 0), (1, 1), (1, 2), (1, 3)]),
];

const J_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(3, [(0, 0), (0, 1), (1, 1), (2, 1)]),
    PieceMatrix::new(3, [(1, 0), (2, 0), (1, 1), (1, 2)]),
    PieceMatrix::new(3, [(0, 1), (1, 1), (2, 1), (2, 2)]),
    PieceMatrix::new(3, [(1, 0), (1, 1), (0, 2), (1, 2)]),
];

const L_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(3, [(2, 0), (0, 1), (1, 1), (2, 1)]),
    PieceMatrix::new(3, [(1, 0), (1, 1), (1, 2), (2, 2)]),
    PieceMatrix::new(3, [(0, 1), (1, 1), (2, 1), (0, 2)]),
    PieceMatrix::new(3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
];

/// O piece: 2x2 padded to 4x4, identical in every rotation
const O_SHAPE: PieceMatrix = PieceMatrix::new(4, [(1, 0), (2, 0), (1, 1), (2, 1)]);

const S_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(3, [(1, 0), (2, 0), (0, 1), (1, 1)]),
    PieceMatrix::new(3, [(1, 0), (1, 1), (2, 1), (2, 2)]),
    PieceMatrix::new(3, [(1, 1), (2, 1), (0, 2), (1, 2)]),
    PieceMatrix::new(3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
];

const T_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(3, [(1, 0), (0, 1), (1, 1), (2, 1)]),
    PieceMatrix::new(3, [(1, 0), (1, 1), (2, 1), (1, 2)]),
    PieceMatrix::new(3, [(0, 1), (1, 1), (2, 1), (1, 2)]),
    PieceMatrix::new(3, [(1, 0), (0, 1), (1, 1), (1, 2)]),
];

const Z_SHAPES: [PieceMatrix; 4] = [
    PieceMatrix::new(3, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    PieceMatrix::new(3, [(2, 0), (1, 1), (2, 1), (1, 2)]),
    PieceMatrix::new(3, [(0, 1), (1, 1), (1, 2), (2, 2)]),
    PieceMatrix::new(3, [(1, 0), (0, 1), (1, 1), (0, 2)]),
];

/// Guideline display color for a piece kind
pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color(0x00e5ff),
        PieceKind::J => Color(0x4169ff),
        PieceKind::L => Color(0xff8c00),
        PieceKind::O => Color(0xffd700),
        PieceKind::S => Color(0x00ff88),
        PieceKind::T => Color(0xd946ff),
        PieceKind::Z => Color(0xff4757),
    }
}

/// Spawn position (matrix origin) on the standard 10x40 playfield
pub fn spawn_position(kind: PieceKind) -> Position {
    spawn_position_on(kind, PLAYFIELD_WIDTH, BUFFER_HEIGHT)
}

/// Spawn position on a field `width` columns wide above a `buffer_height`-row hidden zone
///
/// Pieces appear on the last buffer row and are nudged into the visible area on spawn.
/// The O matrix starts one column further right than the others.
pub fn spawn_position_on(kind: PieceKind, width: usize, buffer_height: usize) -> Position {
    let row = buffer_height.saturating_sub(1) as i32;
    let col = (width.saturating_sub(4) / 2) as i32;
    match kind {
        PieceKind::O => Position::new(row, col + 1),
        _ => Position::new(row, col),
    }
}

/// Five (dx, dy) kick candidates, +dy meaning "up"
pub type KickOffsets = [(i8, i8); 5];

/// Kick candidates for a rotation transition
///
/// Only clockwise transitions are tabulated; counter-clockwise rotation looks up the
/// reversed pair. Returns `None` for pairs with no table entry.
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> Option<&'static KickOffsets> {
    let table = match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };

    match (from, to) {
        (Rotation::North, Rotation::East) => Some(&table[0]),
        (Rotation::East, Rotation::South) => Some(&table[1]),
        (Rotation::South, Rotation::West) => Some(&table[2]),
        (Rotation::West, Rotation::North) => Some(&table[3]),
        _ => None,
    }
}

/// JLSTZ kick table (O shares it; its first candidate always fits)
const JLSTZ_KICKS: [KickOffsets; 4] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table
const I_KICKS: [KickOffsets; 4] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// A tetromino value: kind, rotation, matrix origin, matrix, and color
///
/// Tetrominoes are never mutated in place; moves and rotations build new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub position: Position,
    pub matrix: PieceMatrix,
    pub color: Color,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position, rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, spawn_position(kind), Rotation::North)
    }

    /// Create a tetromino at a given position and rotation
    pub fn at(kind: PieceKind, position: Position, rotation: Rotation) -> Self {
        Self {
            kind,
            rotation,
            position,
            matrix: get_shape(kind, rotation),
            color: piece_color(kind),
        }
    }

    /// Same piece placed at another position
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Absolute grid coordinates of the filled cells if the origin were at `position`
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.matrix
            .minos()
            .iter()
            .map(move |&(x, y)| position.offset(x as i32, y as i32))
    }

    /// Absolute grid coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells_at(self.position)
    }

    /// Highest row index (lowest on screen) occupied by the piece
    pub fn lowest_row(&self) -> i32 {
        self.cells().map(|p| p.row).max().unwrap_or(self.position.row)
    }
}
