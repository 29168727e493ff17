//! Bounded-recursion shapes.
//!
//! Entry points draw a depth from a fixed inclusive range and count down to
//! zero. The recursive bodies are public with a forced depth so every value
//! in the range can be exercised directly; forced depths above the range are
//! clamped to its upper bound.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::io::aux_steps::AuxStep;
use crate::paths::context::PathContext;

/// Recursion depths drawn by path E.
pub const E_DEPTHS: RangeInclusive<u32> = 1..=3;
/// Recursion depths drawn by path K.
pub const K_DEPTHS: RangeInclusive<u32> = 1..=4;

/// Path E entry.
#[inline(never)]
pub fn recursive(cx: &mut PathContext<'_>) {
    cx.enter("path_e::entry");
    let depth = cx.depth(E_DEPTHS);
    debug!(depth, "recursion depth selected");
    e_countdown(cx, depth);
}

/// Run path E's recursive body from `depth`.
pub fn e_countdown(cx: &mut PathContext<'_>, depth: u32) {
    e_recurse(cx, depth.min(*E_DEPTHS.end()));
}

#[inline(never)]
fn e_recurse(cx: &mut PathContext<'_>, depth: u32) {
    cx.enter("path_e::recurse");
    debug!(depth, "recursion level");
    if depth == 0 {
        cx.step(AuxStep::ThreadInfo);
        cx.deliver();
    } else {
        cx.step(AuxStep::SmallDelay);
        e_recurse(cx, depth - 1);
    }
}

/// Path K entry: recursion that bottoms out in a two-level nested tail.
#[inline(never)]
pub fn mixed(cx: &mut PathContext<'_>) {
    cx.enter("path_k::mixed");
    let depth = cx.depth(K_DEPTHS);
    debug!(depth, "recursion depth selected");
    k_countdown(cx, depth);
}

/// Run path K's recursive body from `depth`.
pub fn k_countdown(cx: &mut PathContext<'_>, depth: u32) {
    k_recurse(cx, depth.min(*K_DEPTHS.end()));
}

#[inline(never)]
fn k_recurse(cx: &mut PathContext<'_>, depth: u32) {
    cx.enter("path_k::recurse");
    cx.step(AuxStep::SmallDelay);
    if depth == 0 {
        k_nested_outer(cx);
    } else {
        k_recurse(cx, depth - 1);
    }
}

#[inline(never)]
fn k_nested_outer(cx: &mut PathContext<'_>) {
    cx.enter("path_k::nested_outer");
    cx.step(AuxStep::HeapOperation);
    k_nested_inner(cx);
}

#[inline(never)]
fn k_nested_inner(cx: &mut PathContext<'_>) {
    cx.enter("path_k::nested_inner");
    cx.step(AuxStep::SystemTime);
    cx.deliver();
}
