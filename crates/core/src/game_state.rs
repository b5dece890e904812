//! Game state module - manages the complete game state
//!
//! This module ties together all core components: playfield, controller, randomizer,
//! and scoring. It sequences spawn -> fall -> lock -> clear -> respawn, owns the timers,
//! and dispatches player input.
//!
//! Two drivers advance the game: [`GameState::update`] with elapsed milliseconds and
//! [`GameState::handle_input`] with a [`GameAction`]. Both are also reachable through the
//! consuming [`GameState::apply`] with an [`Event`].

use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::controller::{self, ghost_position, move_piece, rotate};
use crate::pieces::{spawn_position_on, Tetromino};
use crate::playfield::{CompletedLines, Field, Playfield};
use crate::rng::{Randomizer, SevenBag};
use crate::scoring::{
    calculate_drop_score, calculate_fall_speed, calculate_line_score, get_level, should_level_up,
};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Color of the cells written by [`GameAction::DebugSetupLineClear`]
const DEBUG_FILL: Color = Color(0x6b7280);

/// Something that advances a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Begin a new game
    Start,
    /// Player or debug input
    Input(GameAction),
    /// Elapsed time in milliseconds
    Tick(f64),
}

/// Rows removed by the last line clear, kept around for the clear animation
///
/// Purely presentational: the rows are already gone from the playfield and scored.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingClear {
    pub rows: CompletedLines,
    pub remaining_ms: f64,
}

/// Complete game state
///
/// Generic over the [`Field`] pieces collide with and the [`Randomizer`] that deals them;
/// the defaults are the standard 10x40 playfield and the 7-bag.
#[derive(Debug, Clone)]
pub struct GameState<F: Field = Playfield, R: Randomizer = SevenBag> {
    config: EngineConfig,
    field: F,
    randomizer: R,
    current: Option<Tetromino>,
    held: Option<PieceKind>,
    /// Upcoming kinds; holds `preview_count + 1` entries between spawns
    next_pieces: VecDeque<PieceKind>,
    can_hold: bool,
    score: u32,
    level: u32,
    lines_cleared: u32,
    status: GameStatus,
    fall_speed_ms: f64,
    lock_resets: u8,
    drop_timer_ms: f64,
    lock_timer_ms: f64,
    pending_clear: Option<PendingClear>,
    debug_mode: bool,
    /// Monotonic game id (increments on every start).
    game_id: u32,
    /// Monotonic id of the current piece instance (increments on spawn and hold swaps).
    piece_id: u32,
    pieces_locked: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed and default settings
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig {
            seed,
            ..EngineConfig::default()
        })
    }

    /// Create a new game on the standard playfield with a seeded 7-bag
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_parts(Playfield::new(), SevenBag::new(config.seed), config)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl<F: Field, R: Randomizer> GameState<F, R> {
    /// Assemble a game from its parts; the game is [`GameStatus::Ready`] until started
    ///
    /// The preview depth is clamped to 1..=6 whichever way the config was built.
    pub fn with_parts(field: F, randomizer: R, config: EngineConfig) -> Self {
        let config = config.clamped();
        let mut state = Self {
            config,
            field,
            randomizer,
            current: None,
            held: None,
            next_pieces: VecDeque::with_capacity(config.preview_count + 1),
            can_hold: true,
            score: 0,
            level: INITIAL_LEVEL,
            lines_cleared: 0,
            status: GameStatus::Ready,
            fall_speed_ms: calculate_fall_speed(INITIAL_LEVEL),
            lock_resets: 0,
            drop_timer_ms: 0.0,
            lock_timer_ms: 0.0,
            pending_clear: None,
            debug_mode: false,
            game_id: 0,
            piece_id: 0,
            pieces_locked: 0,
        };
        state.fill_queue();
        state
    }

    fn fill_queue(&mut self) {
        while self.next_pieces.len() < self.config.preview_count + 1 {
            let kind = self.randomizer.next();
            self.next_pieces.push_back(kind);
        }
    }

    /// Start a new game from any state
    ///
    /// Empties the playfield, restarts the randomizer, resets every counter, and spawns
    /// the first piece.
    pub fn start(&mut self) {
        self.field.reset();
        self.randomizer.reset();

        self.current = None;
        self.held = None;
        self.next_pieces.clear();
        self.fill_queue();
        self.can_hold = true;
        self.score = 0;
        self.level = INITIAL_LEVEL;
        self.lines_cleared = 0;
        self.fall_speed_ms = calculate_fall_speed(INITIAL_LEVEL);
        self.lock_resets = 0;
        self.drop_timer_ms = 0.0;
        self.lock_timer_ms = 0.0;
        self.pending_clear = None;
        self.debug_mode = false;
        self.pieces_locked = 0;
        self.game_id = self.game_id.wrapping_add(1);

        self.status = GameStatus::Playing;
        self.spawn_piece();
    }

    /// Spawn the next piece from the queue
    ///
    /// Returns false (and ends the game) if the spawn position is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        if self.next_pieces.is_empty() {
            let kind = self.randomizer.next();
            self.next_pieces.push_back(kind);
        }
        let Some(kind) = self.next_pieces.pop_front() else {
            return false;
        };
        let fresh = self.randomizer.next();
        self.next_pieces.push_back(fresh);

        self.can_hold = true;
        self.lock_resets = 0;
        self.lock_timer_ms = 0.0;

        self.place_new_piece(kind)
    }

    /// Put a fresh piece of `kind` at its spawn position, nudged down one row when free
    fn place_new_piece(&mut self, kind: PieceKind) -> bool {
        let spawn = spawn_position_on(kind, self.field.width(), self.field.buffer_height());
        let piece = Tetromino::at(kind, spawn, Rotation::North);
        if !self.field.is_valid_position(&piece, piece.position) {
            self.current = None;
            self.status = GameStatus::GameOver;
            return false;
        }

        self.current = Some(move_piece(&self.field, &piece, 0, 1).unwrap_or(piece));
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Advance timers by `delta_ms` milliseconds
    ///
    /// Gravity drops the piece one row each time the drop timer reaches the fall speed.
    /// While the piece is landed the lock timer accumulates and the piece locks once it
    /// reaches the lock delay. Negative or non-finite deltas count as zero.
    pub fn update(&mut self, delta_ms: f64) {
        if self.status != GameStatus::Playing {
            return;
        }
        let delta = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };

        self.advance_pending_clear(delta);

        let Some(piece) = self.current else {
            return;
        };

        self.drop_timer_ms += delta;
        if self.drop_timer_ms >= self.fall_speed_ms {
            if let Some(moved) = move_piece(&self.field, &piece, 0, 1) {
                self.current = Some(moved);
            }
            self.drop_timer_ms = 0.0;
        }

        if self.is_landed() {
            self.lock_timer_ms += delta;
            if self.lock_timer_ms >= LOCK_DELAY_MS as f64 {
                self.lock_current_piece();
            }
        }
    }

    fn advance_pending_clear(&mut self, delta: f64) {
        if let Some(pending) = &mut self.pending_clear {
            pending.remaining_ms -= delta;
            if pending.remaining_ms <= 0.0 {
                self.pending_clear = None;
            }
        }
    }

    /// Lock the current piece into the playfield and handle line clears
    ///
    /// A piece that locks entirely inside the buffer zone ends the game without clearing
    /// or spawning.
    pub fn lock_current_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.field.lock_piece(&piece);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.lock_timer_ms = 0.0;

        if piece.lowest_row() < self.field.buffer_height() as i32 {
            self.status = GameStatus::GameOver;
            return;
        }

        let rows = self.field.detect_completed_lines();
        if !rows.is_empty() {
            self.field.clear_lines(&rows);

            let count = rows.len();
            self.score = self
                .score
                .saturating_add(calculate_line_score(count, self.level));
            self.lines_cleared = self.lines_cleared.saturating_add(count as u32);

            if should_level_up(self.lines_cleared, self.level) {
                self.level = get_level(self.lines_cleared);
                self.fall_speed_ms = calculate_fall_speed(self.level);
            }

            self.pending_clear = Some(PendingClear {
                rows,
                remaining_ms: LINE_CLEAR_ANIMATION_MS as f64,
            });
        }

        self.spawn_piece();
    }

    /// Apply a game action
    ///
    /// Returns true if the action changed the game.
    pub fn handle_input(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::DebugToggle => {
                self.debug_mode = !self.debug_mode;
                true
            }
            GameAction::DebugLevelUp
            | GameAction::DebugLevelDown
            | GameAction::DebugScoreUpSmall
            | GameAction::DebugScoreDownSmall
            | GameAction::DebugScoreUpLarge
            | GameAction::DebugScoreDownLarge
            | GameAction::DebugSetupLineClear => self.debug_mode && self.apply_debug(action),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.start();
                true
            }
            GameAction::MoveLeft => self.shift(-1),
            GameAction::MoveRight => self.shift(1),
            GameAction::RotateCw => self.rotate_current(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate_current(RotationDirection::CounterClockwise),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
        }
    }

    /// Dispatch an [`Event`] in place
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start => self.start(),
            Event::Input(action) => {
                self.handle_input(action);
            }
            Event::Tick(delta_ms) => self.update(delta_ms),
        }
    }

    /// Consume the state and return the state after `event`
    ///
    /// ```
    /// use guideline_tetris_core::{Event, GameState};
    /// use guideline_tetris_core::types::{GameAction, GameStatus};
    ///
    /// let game = GameState::new(7)
    ///     .apply(Event::Start)
    ///     .apply(Event::Input(GameAction::HardDrop))
    ///     .apply(Event::Tick(16.0));
    ///
    /// assert_eq!(game.status(), GameStatus::Playing);
    /// assert!(game.score() > 0);
    /// ```
    pub fn apply(mut self, event: Event) -> Self {
        self.handle_event(event);
        self
    }

    /// The piece the player controls, if the game is running
    fn controllable(&self) -> Option<Tetromino> {
        if self.status == GameStatus::Playing {
            self.current
        } else {
            None
        }
    }

    /// Commit a successful move or rotation, resetting the lock timer when landed
    fn commit_move(&mut self, moved: Tetromino) {
        self.current = Some(moved);
        if self.is_landed() && self.lock_resets < MAX_LOCK_RESETS {
            self.lock_timer_ms = 0.0;
            self.lock_resets += 1;
        }
    }

    fn shift(&mut self, d_col: i32) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match move_piece(&self.field, &piece, d_col, 0) {
            Some(moved) => {
                self.commit_move(moved);
                true
            }
            None => false,
        }
    }

    fn rotate_current(&mut self, direction: RotationDirection) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match rotate(&self.field, &piece, direction) {
            Some(rotated) => {
                self.commit_move(rotated);
                true
            }
            None => false,
        }
    }

    /// Move the piece down one row for one point
    fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let Some(moved) = move_piece(&self.field, &piece, 0, 1) else {
            return false;
        };
        self.current = Some(moved);
        self.score = self.score.saturating_add(calculate_drop_score(1, false));
        true
    }

    /// Drop the piece to its landing row, score two points per row, and lock it
    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let (landed, distance) = controller::hard_drop(&self.field, &piece);
        self.current = Some(landed);
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance as i32, true));
        self.lock_current_piece();
        true
    }

    /// Swap the current piece with the hold slot (once per piece)
    ///
    /// With an empty slot the current kind is stored and the next piece spawns. Otherwise
    /// the held kind comes back as a fresh piece at its spawn position.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(piece) = self.controllable() else {
            return false;
        };

        match self.held.replace(piece.kind) {
            None => {
                self.spawn_piece();
            }
            Some(kind) => {
                self.lock_resets = 0;
                self.lock_timer_ms = 0.0;
                self.place_new_piece(kind);
            }
        }

        self.can_hold = false;
        true
    }

    /// PAUSE toggles between playing and paused; other states ignore it
    fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            _ => return false,
        };
        true
    }

    fn apply_debug(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::DebugLevelUp => self.set_level(self.level.saturating_add(1)),
            GameAction::DebugLevelDown => self.set_level(self.level.saturating_sub(1)),
            GameAction::DebugScoreUpSmall => {
                self.score = self.score.saturating_add(DEBUG_SCORE_SMALL)
            }
            GameAction::DebugScoreDownSmall => {
                self.score = self.score.saturating_sub(DEBUG_SCORE_SMALL)
            }
            GameAction::DebugScoreUpLarge => {
                self.score = self.score.saturating_add(DEBUG_SCORE_LARGE)
            }
            GameAction::DebugScoreDownLarge => {
                self.score = self.score.saturating_sub(DEBUG_SCORE_LARGE)
            }
            GameAction::DebugSetupLineClear => self.setup_line_clear(),
            _ => return false,
        }
        true
    }

    fn set_level(&mut self, level: u32) {
        self.level = level.clamp(INITIAL_LEVEL, MAX_LEVEL);
        self.fall_speed_ms = calculate_fall_speed(self.level);
    }

    /// Fill the bottom four rows except the rightmost column
    ///
    /// Cells under the current piece are left alone.
    fn setup_line_clear(&mut self) {
        let width = self.field.width() as i32;
        let height = self.field.height() as i32;
        let occupied: Vec<Position> = self
            .current
            .map(|piece| piece.cells().collect::<Vec<_>>())
            .unwrap_or_default();

        for row in (height - 4).max(0)..height {
            for col in 0..width - 1 {
                if !occupied.contains(&Position::new(row, col)) {
                    self.field.set_cell(row, col, Cell::filled(DEBUG_FILL));
                }
            }
        }
    }

    /// Whether the current piece rests on the floor or the stack
    pub fn is_landed(&self) -> bool {
        self.current
            .map(|piece| controller::is_landed(&self.field, &piece))
            .unwrap_or(false)
    }

    /// Render hint: the piece is in the last part of its lock delay
    pub fn is_locking(&self) -> bool {
        self.is_landed() && self.lock_timer_ms >= (LOCK_DELAY_MS - LOCK_WARNING_MS) as f64
    }

    /// Landing position of the current piece
    pub fn ghost(&self) -> Option<Position> {
        self.current.map(|piece| ghost_position(&self.field, &piece))
    }

    /// Upcoming kinds shown in the preview (`preview_count` of them)
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.next_pieces.iter().copied().take(self.config.preview_count)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable playfield access for test setup and debug tooling
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    /// Whole upcoming queue, including the entry beyond the preview
    pub fn next_pieces(&self) -> &VecDeque<PieceKind> {
        &self.next_pieces
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn fall_speed_ms(&self) -> f64 {
        self.fall_speed_ms
    }

    pub fn lock_delay_ms(&self) -> f64 {
        LOCK_DELAY_MS as f64
    }

    pub fn lock_resets(&self) -> u8 {
        self.lock_resets
    }

    pub fn drop_timer_ms(&self) -> f64 {
        self.drop_timer_ms
    }

    pub fn lock_timer_ms(&self) -> f64 {
        self.lock_timer_ms
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending_clear.as_ref()
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Read-only view of the whole game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}
