//! Path G: touches a transient page-sized allocation before the payload.
//!
//! The page is acquired and released inside the aux step, so nothing it
//! holds is live when the payload runs.

use crate::io::aux_steps::AuxStep;
use crate::paths::context::PathContext;

#[inline(never)]
pub fn page_cycle(cx: &mut PathContext<'_>) {
    cx.enter("path_g::page_cycle");
    cx.step(AuxStep::PageCycle);
    cx.step(AuxStep::HeapOperation);
    cx.deliver();
}
