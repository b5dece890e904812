//! Engine configuration
//!
//! Only the knobs that vary between sessions live here. Rules constants (field size,
//! gravity curve, lock delay) are fixed in the types crate.

use crate::types::{DEFAULT_PREVIEW_COUNT, MAX_PREVIEW_COUNT};

/// Default randomizer seed
pub const DEFAULT_SEED: u32 = 1;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of upcoming pieces exposed in the preview (1..=6)
    pub preview_count: usize,
    /// Seed for the piece randomizer
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview_count: DEFAULT_PREVIEW_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Build a config, clamping the preview depth into the supported range
    pub fn new(preview_count: usize, seed: u32) -> Self {
        Self {
            preview_count,
            seed,
        }
        .clamped()
    }

    /// The same config with the preview depth forced into 1..=6
    pub fn clamped(self) -> Self {
        Self {
            preview_count: self.preview_count.clamp(1, MAX_PREVIEW_COUNT),
            ..self
        }
    }

    /// Create from environment variables
    ///
    /// - `TETRIS_PREVIEW_COUNT`: preview depth, clamped to 1..=6
    /// - `TETRIS_SEED`: randomizer seed
    ///
    /// Absent or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a caller-provided variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let preview_count = lookup("TETRIS_PREVIEW_COUNT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PREVIEW_COUNT);

        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_SEED);

        Self::new(preview_count, seed)
    }
}
