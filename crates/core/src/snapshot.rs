//! Snapshot module - read-only, serializable view of a game
//!
//! A [`GameSnapshot`] is taken after every mutating call and handed to renderers,
//! the notification layer, and the session runner's JSON output.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::pieces::Tetromino;
use crate::playfield::Field;
use crate::rng::Randomizer;
use crate::types::{Color, GameStatus, PieceKind, Position, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub position: Position,
    /// Absolute coordinates of the four filled cells
    pub cells: [Position; 4],
    pub color: Color,
    /// Landing position of the matrix origin
    pub ghost: Position,
}

impl ActiveSnapshot {
    pub fn new(piece: &Tetromino, ghost: Position) -> Self {
        let mut cells = [piece.position; 4];
        for (slot, cell) in cells.iter_mut().zip(piece.cells()) {
            *slot = cell;
        }
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            position: piece.position,
            cells,
            color: piece.color,
            ghost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimersSnapshot {
    pub drop_ms: f64,
    pub lock_ms: f64,
    pub line_clear_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Every row, buffer included; `None` is an empty cell
    pub grid: Vec<Vec<Option<Color>>>,
    pub active: Option<ActiveSnapshot>,
    pub held: Option<PieceKind>,
    pub next: Vec<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: GameStatus,
    pub fall_speed_ms: f64,
    pub lock_delay_ms: f64,
    pub lock_resets: u8,
    pub timers: TimersSnapshot,
    /// The piece is in the final part of its lock delay
    pub locking: bool,
    /// Rows removed by the last clear while its animation is running
    pub clearing_rows: Vec<usize>,
    pub debug_mode: bool,
    pub game_id: u32,
    pub piece_id: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn capture<F: Field, R: Randomizer>(state: &GameState<F, R>) -> Self {
        let field = state.field();
        let grid = (0..field.height())
            .filter_map(|row| field.row(row))
            .map(|cells| cells.iter().map(|cell| cell.color).collect())
            .collect();

        let active = state
            .current()
            .zip(state.ghost())
            .map(|(piece, ghost)| ActiveSnapshot::new(&piece, ghost));

        let pending = state.pending_clear();

        Self {
            grid,
            active,
            held: state.held(),
            next: state.preview().collect(),
            can_hold: state.can_hold(),
            score: state.score(),
            level: state.level(),
            lines: state.lines_cleared(),
            status: state.status(),
            fall_speed_ms: state.fall_speed_ms(),
            lock_delay_ms: state.lock_delay_ms(),
            lock_resets: state.lock_resets(),
            timers: TimersSnapshot {
                drop_ms: state.drop_timer_ms(),
                lock_ms: state.lock_timer_ms(),
                line_clear_ms: pending.map(|p| p.remaining_ms).unwrap_or(0.0),
            },
            locking: state.is_locking(),
            clearing_rows: pending.map(|p| p.rows.to_vec()).unwrap_or_default(),
            debug_mode: state.debug_mode(),
            game_id: state.game_id(),
            piece_id: state.piece_id(),
            pieces_locked: state.pieces_locked(),
        }
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing && self.active.is_some()
    }

    /// Only the rows a player sees (the bottom `visible` rows)
    pub fn visible_rows(&self, visible: usize) -> &[Vec<Option<Color>>] {
        let start = self.grid.len().saturating_sub(visible);
        &self.grid[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameAction, VISIBLE_HEIGHT};

    #[test]
    fn test_snapshot_of_ready_game() {
        let game = GameState::new(3);
        let snap = game.snapshot();

        assert_eq!(snap.status, GameStatus::Ready);
        assert!(snap.active.is_none());
        assert!(!snap.playable());
        assert_eq!(snap.grid.len(), 40);
        assert!(snap.grid.iter().all(|row| row.len() == 10));
        assert_eq!(snap.next.len(), 1);
        assert_eq!(snap.visible_rows(VISIBLE_HEIGHT).len(), 20);
    }

    #[test]
    fn test_snapshot_tracks_active_piece_and_ghost() {
        let mut game = GameState::new(3);
        game.start();
        let snap = game.snapshot();

        let active = snap.active.unwrap();
        let piece = game.current().unwrap();
        assert_eq!(active.position, piece.position);
        assert_eq!(active.ghost, game.ghost().unwrap());
        assert!(active.ghost.row >= active.position.row);
        assert_eq!(active.cells.to_vec(), piece.cells().collect::<Vec<_>>());
        assert!(snap.playable());
    }

    #[test]
    fn test_snapshot_records_locked_cells() {
        let mut game = GameState::new(3);
        game.start();
        let piece = game.current().unwrap();
        game.handle_input(GameAction::HardDrop);

        let snap = game.snapshot();
        let filled = snap.grid.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 4);
        assert!(snap
            .grid
            .iter()
            .flatten()
            .flatten()
            .all(|&color| color == piece.color));
        assert_eq!(snap.pieces_locked, 1);
    }
}
