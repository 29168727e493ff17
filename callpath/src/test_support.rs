//! Test-only collaborators: counting payloads, scripted randomness, recording
//! aux steps and failing captures.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use anyhow::{Result, bail};

use crate::core::random::RandomSource;
use crate::io::aux_steps::{AuxStep, AuxSteps};
use crate::io::pacing::Pacing;
use crate::io::payload::Payload;
use crate::io::stack::{StackCapture, StackSnapshot};
use crate::paths::context::{PathContext, PathEntry, PathTrace};

/// Payload that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingPayload {
    calls: Cell<u32>,
}

impl CountingPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Payload for CountingPayload {
    fn deliver(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// Random source that replays a fixed script of draws.
///
/// Panics when the script runs out or a scripted value does not fit the
/// requested bound, so a test notices any draw it did not plan for.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<usize>) -> Self {
        Self {
            draws: draws.into(),
        }
    }

    /// A source for shapes that must not draw at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, n: usize) -> usize {
        let draw = self
            .draws
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted draw below {n}"));
        assert!(draw < n, "scripted draw {draw} out of range 0..{n}");
        draw
    }
}

/// Aux steps that record what was asked of them and touch nothing.
#[derive(Debug, Default)]
pub struct RecordingAux {
    steps: RefCell<Vec<AuxStep>>,
    scratch_requests: Cell<usize>,
    refuse_scratch: bool,
}

impl RecordingAux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behaves as if every scratch allocation failed.
    pub fn refusing_scratch() -> Self {
        Self {
            refuse_scratch: true,
            ..Self::default()
        }
    }

    pub fn steps(&self) -> Vec<AuxStep> {
        self.steps.borrow().clone()
    }

    pub fn scratch_requests(&self) -> usize {
        self.scratch_requests.get()
    }
}

impl AuxSteps for RecordingAux {
    fn run(&self, step: AuxStep) {
        self.steps.borrow_mut().push(step);
    }

    fn scratch(&self, bytes: usize) -> Option<Vec<u8>> {
        self.scratch_requests.set(self.scratch_requests.get() + 1);
        if self.refuse_scratch {
            return None;
        }
        Some(vec![0; bytes])
    }
}

/// Stack capture that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCapture;

impl StackCapture for FailingCapture {
    fn capture(&self, _max_frames: usize) -> Result<StackSnapshot> {
        bail!("stack capture disabled for test")
    }
}

/// Pacing that records after which executions it was asked to pause.
#[derive(Debug, Default)]
pub struct CountingPacing {
    pub pauses: Vec<u64>,
}

impl Pacing for CountingPacing {
    fn pause(&mut self, completed_seq: u64) -> Result<()> {
        self.pauses.push(completed_seq);
        Ok(())
    }
}

/// Run one path entry with a counting payload and recording aux steps.
pub fn run_shape(entry: PathEntry, mut rng: ScriptedRandom) -> PathTrace {
    let payload = CountingPayload::new();
    let aux = RecordingAux::new();
    let trace = {
        let mut cx = PathContext::new(&payload, &aux, &mut rng);
        entry(&mut cx);
        cx.finish()
    };
    assert_eq!(payload.calls(), trace.payload_calls);
    trace
}
