//! Shapes that reach the next frame through function pointers instead of by
//! static name.

use tracing::debug;

use crate::io::aux_steps::AuxStep;
use crate::paths::context::{PathContext, deliver_payload};

/// A link of a pointer chain.
type Link = fn(&mut PathContext<'_>);

/// Path D: the payload is invoked through a pointer held in a local.
#[inline(never)]
pub fn through_pointer(cx: &mut PathContext<'_>) {
    cx.enter("path_d::indirect");
    cx.step(AuxStep::SystemTime);

    let target: Link = deliver_payload;
    debug!(target = ?(target as *const ()), "calling through pointer");
    target(cx);
}

/// Path J: five links, each holding a pointer to the next.
#[inline(never)]
pub fn pointer_chain(cx: &mut PathContext<'_>) {
    cx.enter("path_j::chain");
    let start: Link = j_link1;
    start(cx);
}

#[inline(never)]
fn j_link1(cx: &mut PathContext<'_>) {
    cx.enter("path_j::link1");
    let next: Link = j_link2;
    cx.step(AuxStep::ThreadInfo);
    next(cx);
}

#[inline(never)]
fn j_link2(cx: &mut PathContext<'_>) {
    cx.enter("path_j::link2");
    let next: Link = j_link3;
    cx.step(AuxStep::SystemTime);
    next(cx);
}

#[inline(never)]
fn j_link3(cx: &mut PathContext<'_>) {
    cx.enter("path_j::link3");
    let next: Link = j_link4;
    cx.step(AuxStep::PerfCounter);
    next(cx);
}

#[inline(never)]
fn j_link4(cx: &mut PathContext<'_>) {
    cx.enter("path_j::link4");
    let next: Link = j_final;
    cx.step(AuxStep::SmallDelay);
    next(cx);
}

#[inline(never)]
fn j_final(cx: &mut PathContext<'_>) {
    cx.enter("path_j::final");
    cx.step(AuxStep::HeapOperation);
    cx.deliver();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedRandom, run_shape};

    #[test]
    fn pointer_call_behaves_like_direct_call() {
        let trace = run_shape(through_pointer, ScriptedRandom::empty());
        assert_eq!(trace.frames, vec!["path_d::indirect"]);
        assert_eq!(trace.payload_calls, 1);
    }

    #[test]
    fn chain_visits_every_link_once() {
        let trace = run_shape(pointer_chain, ScriptedRandom::empty());
        assert_eq!(
            trace.frames,
            vec![
                "path_j::chain",
                "path_j::link1",
                "path_j::link2",
                "path_j::link3",
                "path_j::link4",
                "path_j::final",
            ]
        );
        assert_eq!(trace.payload_calls, 1);
    }
}
