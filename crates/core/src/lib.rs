//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Timing is driven by synthetic deltas, never a wall clock
//! - **Portable**: Runs behind any renderer or input source
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino catalog (shapes, colors, spawn positions) and SRS kick tables
//! - [`rng`]: 7-bag random piece generation behind the [`Randomizer`] trait
//! - [`playfield`]: 10x40 grid with collision and line clearing, behind the [`Field`] trait
//! - [`controller`]: Movement, SRS rotation, hard drop, and ghost position
//! - [`scoring`]: Line and drop scores, level progression, and gravity
//! - [`config`]: Per-session settings (preview depth, seed)
//! - [`game_state`]: The state machine tying it all together
//! - [`snapshot`]: Serializable read-only view of a game
//! - [`notify`]: Snapshot diffs for audio/render collaborators
//!
//! # Game Rules
//!
//! This implementation follows the Tetris Guideline:
//!
//! - **7-Bag Randomizer**: Every aligned window of seven pieces contains each kind once
//! - **SRS Rotation**: Super Rotation System with per-transition wall kicks
//! - **Lock Delay**: 500ms before a landed piece locks, with a 15 move/rotate reset limit
//! - **Ghost Piece**: Shows where the current piece will land
//! - **Hold**: Store one piece for later use (once per piece)
//! - **Scoring**: 100/300/500/800 x level for 1-4 lines, 1 point per soft drop row,
//!   2 points per hard drop row
//!
//! # Example
//!
//! ```
//! use guideline_tetris_core::GameState;
//! use guideline_tetris_types::{GameAction, GameStatus};
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Apply game actions
//! game.handle_input(GameAction::MoveRight);
//! game.handle_input(GameAction::RotateCw);
//! game.handle_input(GameAction::HardDrop);
//!
//! // Check game state
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! - **Gravity**: 1000ms per row at level 1, x0.9 per level
//! - **Lock Delay**: 500ms while landed; the last 200ms are flagged as "locking"
//! - **Line Clear**: rows are removed at once; a 300ms pending clear is kept for animation
//!
//! Call [`GameState::update`](game_state::GameState::update) every frame with elapsed time.

pub mod config;
pub mod controller;
pub mod game_state;
pub mod notify;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use guideline_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use controller::{ghost_position, hard_drop, move_piece, rotate};
pub use game_state::{Event, GameState, PendingClear};
pub use notify::{diff, Notification, Notifier, Observer};
pub use pieces::{get_shape, kick_offsets, Tetromino};
pub use playfield::{CompletedLines, Field, Playfield};
pub use rng::{FixedSequence, Randomizer, SevenBag, SimpleRng};
pub use scoring::{
    calculate_drop_score, calculate_fall_speed, calculate_line_score, get_level, should_level_up,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
