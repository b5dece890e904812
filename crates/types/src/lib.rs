//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain values with no behavior beyond conversion helpers, making them
//! usable in any context (rules engine, snapshot consumers, scripted sessions).
//!
//! # Playfield Dimensions
//!
//! Tetris Guideline playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 40 rows (indexed 0-39)
//! - **Buffer zone**: rows 0-19 are hidden and used for spawning and overhang
//! - **Visible area**: rows 20-39
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_SPEED_MS` | 1000 | Gravity at level 1 |
//! | `FALL_SPEED_MULTIPLIER` | 0.9 | Gravity factor applied per level |
//! | `LOCK_DELAY_MS` | 500 | Time before a landed piece locks |
//! | `LOCK_WARNING_MS` | 200 | Final window flagged as "locking" for renderers |
//! | `MAX_LOCK_RESETS` | 15 | Max lock timer resets per piece |
//! | `LINE_CLEAR_ANIMATION_MS` | 300 | Presentation window after a line clear |
//!
//! # Examples
//!
//! ```
//! use guideline_tetris_types::{GameAction, PieceKind, Rotation, RotationDirection};
//! use guideline_tetris_types::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotated(RotationDirection::Clockwise), Rotation::East);
//! assert_eq!(Rotation::North.rotated(RotationDirection::CounterClockwise), Rotation::West);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(PLAYFIELD_WIDTH, 10);
//! assert_eq!(PLAYFIELD_HEIGHT, 40);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Playfield width in cells (10 columns)
pub const PLAYFIELD_WIDTH: usize = 10;

/// Playfield height in cells, buffer included (40 rows)
pub const PLAYFIELD_HEIGHT: usize = 40;

/// Number of visible rows at the bottom of the playfield
pub const VISIBLE_HEIGHT: usize = 20;

/// Number of hidden rows above the visible area
pub const BUFFER_HEIGHT: usize = PLAYFIELD_HEIGHT - VISIBLE_HEIGHT;

/// Level at the start of every game
pub const INITIAL_LEVEL: u32 = 1;

/// Highest level reachable through debug level adjustment
pub const MAX_LEVEL: u32 = 99;

/// Lines needed per level increase
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_SPEED_MS: f64 = 1000.0;

/// Gravity interval factor applied once per level above 1
pub const FALL_SPEED_MULTIPLIER: f64 = 0.9;

/// Lock delay when a piece is landed (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Final part of the lock delay during which the piece is reported as locking
pub const LOCK_WARNING_MS: u32 = 200;

/// Maximum number of lock timer resets per piece (15)
pub const MAX_LOCK_RESETS: u8 = 15;

/// How long cleared rows stay reported for the clear animation (300ms)
pub const LINE_CLEAR_ANIMATION_MS: u32 = 300;

/// Default number of preview pieces
pub const DEFAULT_PREVIEW_COUNT: usize = 1;

/// Largest supported preview depth
pub const MAX_PREVIEW_COUNT: usize = 6;

/// Points per cell of soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell of hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Line clear scoring table (Guideline scoring)
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 1 line: 100 (single)
/// - 2 lines: 300 (double)
/// - 3 lines: 500 (triple)
/// - 4 lines: 800 (tetris)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Small debug score adjustment
pub const DEBUG_SCORE_SMALL: u32 = 1_000;

/// Large debug score adjustment
pub const DEBUG_SCORE_LARGE: u32 = 10_000;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Signed step: +1 clockwise, -1 counter-clockwise
    pub fn step(self) -> i8 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): Spawn orientation
/// - **East** (1): Rotated 90° clockwise
/// - **South** (2): Rotated 180°
/// - **West** (3): Rotated 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in 0..4
    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from an index, wrapping modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Next rotation state: `(index + step + 4) mod 4`
    pub fn rotated(self, direction: RotationDirection) -> Self {
        let next = (self.index() as i8 + direction.step() + 4) % 4;
        Self::from_index(next as u8)
    }
}

/// Display color of a locked cell or piece (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(pub u32);

impl Color {
    /// Parse a `#rrggbb` string
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

/// A cell on the playfield
///
/// Empty cells carry no color; locked cells carry the color of the piece that filled them.
/// Cells are replaced wholesale on lock or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub color: Option<Color>,
}

impl Cell {
    pub const EMPTY: Cell = Cell { color: None };

    pub fn filled(color: Color) -> Self {
        Self { color: Some(color) }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }
}

/// A grid coordinate (row grows downward, col grows rightward)
///
/// Rows and columns are signed so that transient candidate positions outside the field
/// can be represented and rejected by collision checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by a column and row delta
    pub const fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Inputs that can be applied to the game state
///
/// The first nine are the player contract. The `Debug*` inputs exist for development
/// tooling and only take effect while debug mode is on (except `DebugToggle`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a new game from any state
    Restart,
    DebugToggle,
    DebugLevelUp,
    DebugLevelDown,
    DebugScoreUpSmall,
    DebugScoreDownSmall,
    DebugScoreUpLarge,
    DebugScoreDownLarge,
    /// Fill the bottom four rows except the rightmost column
    DebugSetupLineClear,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "debugtoggle" => Some(GameAction::DebugToggle),
            "debuglevelup" => Some(GameAction::DebugLevelUp),
            "debugleveldown" => Some(GameAction::DebugLevelDown),
            "debugscoreupsmall" => Some(GameAction::DebugScoreUpSmall),
            "debugscoredownsmall" => Some(GameAction::DebugScoreDownSmall),
            "debugscoreuplarge" => Some(GameAction::DebugScoreUpLarge),
            "debugscoredownlarge" => Some(GameAction::DebugScoreDownLarge),
            "debugsetuplineclear" => Some(GameAction::DebugSetupLineClear),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::DebugToggle => "debugToggle",
            GameAction::DebugLevelUp => "debugLevelUp",
            GameAction::DebugLevelDown => "debugLevelDown",
            GameAction::DebugScoreUpSmall => "debugScoreUpSmall",
            GameAction::DebugScoreDownSmall => "debugScoreDownSmall",
            GameAction::DebugScoreUpLarge => "debugScoreUpLarge",
            GameAction::DebugScoreDownLarge => "debugScoreDownLarge",
            GameAction::DebugSetupLineClear => "debugSetupLineClear",
        }
    }

    /// Whether this input belongs to the debug tooling set
    pub fn is_debug(&self) -> bool {
        matches!(
            self,
            GameAction::DebugToggle
                | GameAction::DebugLevelUp
                | GameAction::DebugLevelDown
                | GameAction::DebugScoreUpSmall
                | GameAction::DebugScoreDownSmall
                | GameAction::DebugScoreUpLarge
                | GameAction::DebugScoreDownLarge
                | GameAction::DebugSetupLineClear
        )
    }
}
