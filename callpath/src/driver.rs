//! Orchestration for a single execution: select, capture, invoke, record.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::core::random::RandomSource;
use crate::core::selector::Selector;
use crate::core::types::PathId;
use crate::io::aux_steps::AuxSteps;
use crate::io::config::CapturePoint;
use crate::io::payload::Payload;
use crate::io::stack::{StackCapture, StackSnapshot};
use crate::paths::context::{PathContext, PayloadCapture};
use crate::paths::registry::Registry;

/// Mixed into reseeds of the shape source so it never mirrors the selector.
const SHAPE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What one execution did.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    /// Caller-supplied sequence number.
    pub seq: u64,
    pub path: PathId,
    pub path_name: &'static str,
    pub started_at: DateTime<Utc>,
    pub elapsed_micros: u64,
    /// Frames entered by the path, outermost first.
    pub frames: Vec<&'static str>,
    pub payload_calls: u32,
    /// Diagnostic snapshot, when capture was enabled and succeeded.
    pub stack: Option<StackSnapshot>,
}

/// Stack capture settings for the driver.
pub struct CaptureRequest<'a> {
    pub capture: &'a dyn StackCapture,
    pub point: CapturePoint,
    pub max_frames: usize,
}

/// Runs one selected path per call.
pub struct ExecutionDriver<'a> {
    registry: &'a Registry,
    selector: Selector,
    shape_rng: Box<dyn RandomSource>,
    payload: &'a dyn Payload,
    aux: &'a dyn AuxSteps,
    capture: Option<CaptureRequest<'a>>,
}

impl<'a> ExecutionDriver<'a> {
    /// Build a driver over `registry`.
    ///
    /// `selection` feeds the selector; `shapes` feeds recursion depths and
    /// branch choices inside paths.
    pub fn new(
        registry: &'a Registry,
        payload: &'a dyn Payload,
        aux: &'a dyn AuxSteps,
        selection: Box<dyn RandomSource>,
        shapes: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            registry,
            selector: Selector::new(registry.count(), selection),
            shape_rng: shapes,
            payload,
            aux,
            capture: None,
        }
    }

    pub fn with_capture(mut self, capture: CaptureRequest<'a>) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Reseed both random sources from one seed.
    pub fn reseed(&mut self, seed: u64) {
        self.selector.reseed(seed);
        self.shape_rng.reseed(seed ^ SHAPE_SEED_SALT);
    }

    /// Select a path and run it to completion.
    pub fn run_once(&mut self, seq: u64) -> ExecutionRecord {
        let id = self.selector.choose();
        self.execute(seq, id)
    }

    /// Run a specific path, bypassing the selector.
    ///
    /// Returns `None` if `id` is not registered.
    pub fn run_path(&mut self, seq: u64, id: PathId) -> Option<ExecutionRecord> {
        self.registry.get(id)?;
        Some(self.execute(seq, id))
    }

    fn execute(&mut self, seq: u64, id: PathId) -> ExecutionRecord {
        let path = self.registry[id];
        let span = info_span!("execution", seq, path = path.name);
        let _guard = span.enter();
        info!(id = id.index(), shape = ?path.shape, "path selected");

        let started_at = Utc::now();
        let clock = Instant::now();

        let mut stack = None;
        let mut cx = PathContext::new(self.payload, self.aux, self.shape_rng.as_mut());
        if let Some(request) = &self.capture {
            match request.point {
                CapturePoint::BeforeEntry => {
                    stack = capture_stack(request.capture, request.max_frames);
                }
                CapturePoint::AtPayload => {
                    cx = cx.with_payload_capture(PayloadCapture {
                        capture: request.capture,
                        max_frames: request.max_frames,
                    });
                }
            }
        }

        (path.entry)(&mut cx);
        let trace = cx.finish();
        debug_assert_eq!(
            trace.payload_calls, 1,
            "{} delivered the payload {} times",
            path.name, trace.payload_calls
        );

        let elapsed_micros = u64::try_from(clock.elapsed().as_micros()).unwrap_or(u64::MAX);
        debug!(frames = trace.frames.len(), elapsed_micros, "path returned");

        ExecutionRecord {
            seq,
            path: id,
            path_name: path.name,
            started_at,
            elapsed_micros,
            frames: trace.frames,
            payload_calls: trace.payload_calls,
            stack: stack.or(trace.snapshot),
        }
    }
}

fn capture_stack(capture: &dyn StackCapture, max_frames: usize) -> Option<StackSnapshot> {
    match capture.capture(max_frames) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(error = %err, "stack capture unavailable; continuing");
            None
        }
    }
}
