//! Deterministic, pure logic shared by the engine.
//!
//! Core modules must be free of I/O side effects. Randomness enters only
//! through an injected [`random::RandomSource`], so every decision made here
//! can be replayed in tests.

pub mod random;
pub mod run_count;
pub mod selector;
pub mod types;
