//! Path M: a five-level tower whose own shape is randomized.
//!
//! Level 1 picks left or right, level 4 picks the alpha or beta terminus, so
//! a single registered path yields four routes. Both termini deliver the
//! payload; they differ only in the aux step run first.

use tracing::debug;

use crate::io::aux_steps::AuxStep;
use crate::paths::context::PathContext;

#[inline(never)]
pub fn branching(cx: &mut PathContext<'_>) {
    cx.enter("path_m::branching");
    m_level1(cx);
}

#[inline(never)]
fn m_level1(cx: &mut PathContext<'_>) {
    cx.enter("path_m::level1");
    if cx.coin() {
        debug!("going left");
        m_level2_left(cx);
    } else {
        debug!("going right");
        m_level2_right(cx);
    }
}

#[inline(never)]
fn m_level2_left(cx: &mut PathContext<'_>) {
    cx.enter("path_m::level2_left");
    cx.step(AuxStep::SmallDelay);
    m_level3(cx);
}

#[inline(never)]
fn m_level2_right(cx: &mut PathContext<'_>) {
    cx.enter("path_m::level2_right");
    cx.step(AuxStep::ThreadInfo);
    m_level3(cx);
}

#[inline(never)]
fn m_level3(cx: &mut PathContext<'_>) {
    cx.enter("path_m::level3");
    cx.step(AuxStep::HeapOperation);
    m_level4(cx);
}

#[inline(never)]
fn m_level4(cx: &mut PathContext<'_>) {
    cx.enter("path_m::level4");
    if cx.coin() {
        debug!("taking alpha branch");
        m_terminus_alpha(cx);
    } else {
        debug!("taking beta branch");
        m_terminus_beta(cx);
    }
}

#[inline(never)]
fn m_terminus_alpha(cx: &mut PathContext<'_>) {
    cx.enter("path_m::alpha");
    cx.step(AuxStep::SystemTime);
    cx.deliver();
}

#[inline(never)]
fn m_terminus_beta(cx: &mut PathContext<'_>) {
    cx.enter("path_m::beta");
    cx.step(AuxStep::PerfCounter);
    cx.deliver();
}
