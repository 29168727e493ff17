//! Call-path diversification engine.
//!
//! A fixed terminal operation (the payload) is reached through one of many
//! structurally distinct but behaviorally equivalent execution paths, chosen
//! at random per execution. Every path calls the payload exactly once and
//! returns; only the observable call stack differs.
//!
//! - **[`core`]**: Pure logic (ids, usage counters, randomness, selection,
//!   count clamping). No I/O.
//! - **[`paths`]**: The path shapes, their per-invocation context, and the
//!   registry that indexes them.
//! - **[`io`]**: Collaborators with side effects (payload, aux steps, stack
//!   capture, configuration, pacing).
//!
//! Orchestration modules ([`driver`], [`batch`], [`report`]) tie these
//! together for the `callpath` binary.

pub mod batch;
pub mod core;
pub mod driver;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod paths;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
