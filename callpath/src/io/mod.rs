//! I/O-facing collaborators of the engine: payload, auxiliary steps, stack
//! capture, configuration and pacing.

pub mod aux_steps;
pub mod config;
pub mod pacing;
pub mod payload;
pub mod stack;
