//! Guideline Tetris (workspace facade crate).
//!
//! Re-exports the rules engine as `guideline_tetris::{core,types}` and hosts the
//! command parser used by the `tetris-session` runner. The implementation lives in
//! dedicated crates under `crates/`.

pub use guideline_tetris_core as core;
pub use guideline_tetris_types as types;

pub mod session;
