//! Playfield module - manages the game grid
//!
//! The standard playfield is a 10x40 grid: rows 0-19 are the hidden buffer zone used for
//! spawning and overhang, rows 20-39 are visible.
//! Coordinates: (row, col) where row grows downward (0 = top of buffer) and col grows rightward.
//!
//! Collision, locking, and line detection are written once against the [`Field`] trait,
//! so a field of other dimensions only has to supply cell storage and row removal.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, Position, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, VISIBLE_HEIGHT};

/// Tallest field supported by [`CompletedLines`]
pub const MAX_FIELD_HEIGHT: usize = 64;

/// Row indices of completed lines, ascending
pub type CompletedLines = ArrayVec<usize, MAX_FIELD_HEIGHT>;

/// A grid pieces can collide with and lock into
pub trait Field {
    /// Number of columns
    fn width(&self) -> usize;

    /// Number of rows, buffer included
    fn height(&self) -> usize;

    /// Number of hidden rows at the top
    fn buffer_height(&self) -> usize;

    /// Cell at (row, col), `None` when out of bounds
    fn cell(&self, row: i32, col: i32) -> Option<Cell>;

    /// Overwrite a cell. Returns false if out of bounds.
    fn set_cell(&mut self, row: i32, col: i32, cell: Cell) -> bool;

    /// One full row, `None` when out of bounds
    fn row(&self, row: usize) -> Option<&[Cell]>;

    /// Remove the given rows and insert as many empty rows at the top
    fn clear_lines(&mut self, rows: &[usize]);

    /// Empty every cell
    fn reset(&mut self);

    /// Check whether `piece` fits with its matrix origin at `position`
    ///
    /// Every filled cell must be inside the grid and on an empty cell.
    fn is_valid_position(&self, piece: &Tetromino, position: Position) -> bool {
        piece
            .cells_at(position)
            .all(|p| matches!(self.cell(p.row, p.col), Some(cell) if cell.is_empty()))
    }

    /// Write the piece's cells into the grid with its color
    ///
    /// Cells outside the grid are skipped.
    fn lock_piece(&mut self, piece: &Tetromino) {
        for p in piece.cells() {
            self.set_cell(p.row, p.col, Cell::filled(piece.color));
        }
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| !cell.is_empty()))
            .unwrap_or(false)
    }

    /// Indices of all completely filled rows, ascending
    fn detect_completed_lines(&self) -> CompletedLines {
        (0..self.height().min(MAX_FIELD_HEIGHT))
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Top-out query: any locked cell in the top rows' center columns
    ///
    /// The game itself ends on spawn collision or a lock inside the buffer, which always
    /// happens first; this is for callers inspecting a field directly.
    fn is_game_over(&self) -> bool {
        (0..3).any(|row| {
            (3..=6).any(|col| matches!(self.cell(row, col), Some(cell) if !cell.is_empty()))
        })
    }
}

/// The game grid - `W` columns x `H` rows using fixed array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield<const W: usize = { PLAYFIELD_WIDTH }, const H: usize = { PLAYFIELD_HEIGHT }> {
    /// Row-major cells, row 0 at the top of the buffer
    cells: [[Cell; W]; H],
}

impl<const W: usize, const H: usize> Playfield<W, H> {
    const FITS_LINE_LIST: () = assert!(H <= MAX_FIELD_HEIGHT, "playfield too tall");

    /// Create a new empty playfield
    pub fn new() -> Self {
        let () = Self::FITS_LINE_LIST;
        Self {
            cells: [[Cell::EMPTY; W]; H],
        }
    }

    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 || row as usize >= H || col as usize >= W {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Read-only view of the whole grid
    pub fn grid(&self) -> &[[Cell; W]; H] {
        &self.cells
    }

    /// Fill a row with `cell` everywhere except the listed columns (test/debug setup)
    pub fn fill_row_except(&mut self, row: usize, cell: Cell, gaps: &[usize]) {
        if let Some(cells) = self.cells.get_mut(row) {
            for (col, slot) in cells.iter_mut().enumerate() {
                *slot = if gaps.contains(&col) { Cell::EMPTY } else { cell };
            }
        }
    }
}

impl<const W: usize, const H: usize> Field for Playfield<W, H> {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn buffer_height(&self) -> usize {
        H.saturating_sub(VISIBLE_HEIGHT)
    }

    fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.cells[r][c])
    }

    fn set_cell(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((r, c)) => {
                self.cells[r][c] = cell;
                true
            }
            None => false,
        }
    }

    fn row(&self, row: usize) -> Option<&[Cell]> {
        self.cells.get(row).map(|r| r.as_slice())
    }

    /// Two-pointer compaction: scan bottom to top, copy kept rows down, blank the top.
    ///
    /// Indices refer to the grid before removal, so input order and duplicates don't matter.
    fn clear_lines(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let mut remove = [false; MAX_FIELD_HEIGHT];
        for &row in rows {
            if row < H {
                remove[row] = true;
            }
        }

        let mut write_row = H;
        for read_row in (0..H).rev() {
            if remove[read_row] {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        for row in &mut self.cells[..write_row] {
            *row = [Cell::EMPTY; W];
        }
    }

    fn reset(&mut self) {
        self.cells = [[Cell::EMPTY; W]; H];
    }
}

impl<const W: usize, const H: usize> Default for Playfield<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
