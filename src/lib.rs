//! Falling-block puzzle engine (workspace facade crate).
//!
//! Re-exports the engine under `tetris_engine::{core,types}` and hosts the
//! headless [`driver`] used by the default binary.

pub mod driver;

pub use tetris_engine_core as core;
pub use tetris_engine_types as types;
