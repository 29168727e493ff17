//! Statically nested shapes: direct calls, fixed-depth towers and staircases.
//!
//! Each level is its own non-inlined function, so the observable stack grows
//! by one named frame per level.

use crate::io::aux_steps::AuxStep;
use crate::paths::context::PathContext;

const SCRATCH_BYTES: usize = 32;

/// Path A: one aux step, then the payload.
#[inline(never)]
pub fn direct(cx: &mut PathContext<'_>) {
    cx.enter("path_a::direct");
    cx.step(AuxStep::ThreadInfo);
    cx.deliver();
}

/// Path B: entry and one inner helper.
#[inline(never)]
pub fn two_level(cx: &mut PathContext<'_>) {
    cx.enter("path_b::nested");
    cx.step(AuxStep::SmallDelay);
    b_inner(cx);
}

#[inline(never)]
fn b_inner(cx: &mut PathContext<'_>) {
    cx.enter("path_b::inner");
    cx.step(AuxStep::SystemTime);
    cx.deliver();
}

/// Path C: three levels.
#[inline(never)]
pub fn three_level(cx: &mut PathContext<'_>) {
    cx.enter("path_c::deep");
    cx.step(AuxStep::HeapOperation);
    c_level2(cx);
}

#[inline(never)]
fn c_level2(cx: &mut PathContext<'_>) {
    cx.enter("path_c::level2");
    cx.step(AuxStep::PerfCounter);
    c_level3(cx);
}

#[inline(never)]
fn c_level3(cx: &mut PathContext<'_>) {
    cx.enter("path_c::level3");
    cx.deliver();
}

/// Path F: a single frame packed with aux steps.
#[inline(never)]
pub fn heavy_aux(cx: &mut PathContext<'_>) {
    cx.enter("path_f::heavy");
    cx.step(AuxStep::ThreadInfo);
    cx.step(AuxStep::SystemTime);
    cx.step(AuxStep::HeapOperation);
    cx.step(AuxStep::PerfCounter);
    cx.step(AuxStep::SmallDelay);
    cx.deliver();
}

/// Path H: five-level tower with alternating aux steps.
#[inline(never)]
pub fn tower(cx: &mut PathContext<'_>) {
    cx.enter("path_h::tower");
    h_level1(cx);
}

#[inline(never)]
fn h_level1(cx: &mut PathContext<'_>) {
    cx.enter("path_h::level1");
    cx.step(AuxStep::SmallDelay);
    h_level2(cx);
}

#[inline(never)]
fn h_level2(cx: &mut PathContext<'_>) {
    cx.enter("path_h::level2");
    cx.step(AuxStep::SystemTime);
    h_level3(cx);
}

#[inline(never)]
fn h_level3(cx: &mut PathContext<'_>) {
    cx.enter("path_h::level3");
    cx.step(AuxStep::HeapOperation);
    h_level4(cx);
}

#[inline(never)]
fn h_level4(cx: &mut PathContext<'_>) {
    cx.enter("path_h::level4");
    cx.step(AuxStep::PerfCounter);
    h_level5(cx);
}

#[inline(never)]
fn h_level5(cx: &mut PathContext<'_>) {
    cx.enter("path_h::level5");
    cx.step(AuxStep::ThreadInfo);
    cx.deliver();
}

/// Path I: six levels, one of which holds a scratch buffer across the
/// remaining descent.
#[inline(never)]
pub fn deep_six(cx: &mut PathContext<'_>) {
    cx.enter("path_i::deep6");
    i_level1(cx);
}

#[inline(never)]
fn i_level1(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level1");
    cx.step(AuxStep::BriefSleep);
    i_level2(cx);
}

#[inline(never)]
fn i_level2(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level2");
    cx.step(AuxStep::ThreadId);
    i_level3(cx);
}

#[inline(never)]
fn i_level3(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level3");
    cx.step(AuxStep::LocalTime);
    i_level4(cx);
}

#[inline(never)]
fn i_level4(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level4");
    cx.step(AuxStep::PerfCounter);
    i_level5(cx);
}

#[inline(never)]
fn i_level5(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level5");
    // Held until the payload returns; a refused allocation just skips it.
    let held = cx.scratch(SCRATCH_BYTES);
    i_level6(cx);
    drop(held);
}

#[inline(never)]
fn i_level6(cx: &mut PathContext<'_>) {
    cx.enter("path_i::level6");
    cx.deliver();
}

/// Path L: seven-level staircase of environment and system queries.
#[inline(never)]
pub fn staircase(cx: &mut PathContext<'_>) {
    cx.enter("path_l::staircase");
    l_level1(cx);
}

#[inline(never)]
fn l_level1(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level1");
    cx.step(AuxStep::ThreadInfo);
    l_level2(cx);
}

#[inline(never)]
fn l_level2(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level2");
    cx.step(AuxStep::FileTime);
    l_level3(cx);
}

#[inline(never)]
fn l_level3(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level3");
    cx.step(AuxStep::SystemInfo);
    l_level4(cx);
}

#[inline(never)]
fn l_level4(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level4");
    cx.step(AuxStep::MemoryStatus);
    l_level5(cx);
}

#[inline(never)]
fn l_level5(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level5");
    cx.step(AuxStep::HostName);
    l_level6(cx);
}

#[inline(never)]
fn l_level6(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level6");
    cx.step(AuxStep::EnvironmentVar);
    l_level7(cx);
}

#[inline(never)]
fn l_level7(cx: &mut PathContext<'_>) {
    cx.enter("path_l::level7");
    cx.deliver();
}
