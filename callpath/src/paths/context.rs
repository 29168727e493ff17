//! Per-invocation context threaded through every path frame.

use tracing::{debug, warn};

use crate::core::random::RandomSource;
use crate::io::aux_steps::{AuxStep, AuxSteps};
use crate::io::payload::Payload;
use crate::io::stack::{StackCapture, StackSnapshot};

/// Entry operation of a registered path.
pub type PathEntry = fn(&mut PathContext<'_>);

/// Stack capture requested at the payload frame.
pub struct PayloadCapture<'a> {
    pub capture: &'a dyn StackCapture,
    pub max_frames: usize,
}

/// Collaborators and transient state for one path invocation.
///
/// A context is created per execution and consumed by [`PathContext::finish`],
/// so nothing carries over from one invocation to the next.
pub struct PathContext<'a> {
    payload: &'a dyn Payload,
    aux: &'a dyn AuxSteps,
    rng: &'a mut dyn RandomSource,
    capture: Option<PayloadCapture<'a>>,
    frames: Vec<&'static str>,
    payload_calls: u32,
    snapshot: Option<StackSnapshot>,
}

/// What a finished invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTrace {
    /// Frames entered, outermost first.
    pub frames: Vec<&'static str>,
    pub payload_calls: u32,
    /// Snapshot taken at the payload frame, if requested and available.
    pub snapshot: Option<StackSnapshot>,
}

impl PathTrace {
    /// Number of times `frame` was entered.
    pub fn entries(&self, frame: &str) -> usize {
        self.frames.iter().filter(|name| **name == frame).count()
    }
}

impl<'a> PathContext<'a> {
    pub fn new(
        payload: &'a dyn Payload,
        aux: &'a dyn AuxSteps,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            payload,
            aux,
            rng,
            capture: None,
            frames: Vec::new(),
            payload_calls: 0,
            snapshot: None,
        }
    }

    /// Capture the stack just before the payload is delivered.
    pub fn with_payload_capture(mut self, capture: PayloadCapture<'a>) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Note that `frame` has been entered.
    pub fn enter(&mut self, frame: &'static str) {
        debug!(frame, depth = self.frames.len(), "enter");
        self.frames.push(frame);
    }

    pub fn step(&mut self, step: AuxStep) {
        self.aux.run(step);
    }

    pub fn scratch(&mut self, bytes: usize) -> Option<Vec<u8>> {
        self.aux.scratch(bytes)
    }

    /// Random binary choice.
    pub fn coin(&mut self) -> bool {
        self.rng.coin()
    }

    /// Random depth from an inclusive range.
    pub fn depth(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.rng.within(range)
    }

    /// Deliver the payload. Every path calls this exactly once.
    pub fn deliver(&mut self) {
        if let Some(request) = &self.capture {
            match request.capture.capture(request.max_frames) {
                Ok(snapshot) => self.snapshot = Some(snapshot),
                Err(err) => warn!(error = %err, "stack capture at payload failed; continuing"),
            }
        }
        self.payload_calls += 1;
        self.payload.deliver();
    }

    pub fn finish(self) -> PathTrace {
        PathTrace {
            frames: self.frames,
            payload_calls: self.payload_calls,
            snapshot: self.snapshot,
        }
    }
}

/// Free-function form of [`PathContext::deliver`], usable as a fn pointer.
#[inline(never)]
pub fn deliver_payload(cx: &mut PathContext<'_>) {
    cx.deliver();
}
