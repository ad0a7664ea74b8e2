//! Error types shared across the engine.

pub mod engine;

pub use engine::{EngineError, ValidationKind};
