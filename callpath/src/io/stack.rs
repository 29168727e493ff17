//! Diagnostic call-stack capture.
//!
//! The [`StackCapture`] trait decouples the execution driver from the
//! unwinder. [`BacktraceCapture`] walks the live stack with the `backtrace`
//! crate; tests substitute captures that fail on purpose.

use std::fmt;

use anyhow::{Result, bail};
use serde::Serialize;

/// One captured frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    pub index: usize,
    pub address: usize,
    /// Demangled symbol name, `None` when resolution failed.
    pub symbol: Option<String>,
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:2}] 0x{:016X} {}",
            self.index,
            self.address,
            self.symbol.as_deref().unwrap_or("<unknown>")
        )
    }
}

/// Ordered frames of the stack at the capture point, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSnapshot {
    pub frames: Vec<StackFrame>,
}

impl StackSnapshot {
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames with a resolved symbol.
    pub fn resolved(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.symbol.is_some())
            .count()
    }
}

/// Captures the current call stack.
pub trait StackCapture {
    /// Capture at most `max_frames` frames.
    fn capture(&self, max_frames: usize) -> Result<StackSnapshot>;
}

/// Capture backed by the `backtrace` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl StackCapture for BacktraceCapture {
    #[inline(never)]
    fn capture(&self, max_frames: usize) -> Result<StackSnapshot> {
        let mut frames = Vec::new();
        backtrace::trace(|frame| {
            if frames.len() >= max_frames {
                return false;
            }
            let mut symbol = None;
            backtrace::resolve_frame(frame, |resolved| {
                if symbol.is_none() {
                    symbol = resolved.name().map(|name| name.to_string());
                }
            });
            frames.push(StackFrame {
                index: frames.len(),
                address: frame.ip() as usize,
                symbol,
            });
            true
        });
        if frames.is_empty() {
            bail!("unwinder returned no frames");
        }
        Ok(StackSnapshot { frames })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_respects_frame_limit() {
        let snapshot = BacktraceCapture.capture(4).expect("capture");
        assert!(snapshot.depth() <= 4);
        assert!(snapshot.depth() > 0);
        let indices: Vec<usize> = snapshot.frames.iter().map(|frame| frame.index).collect();
        assert_eq!(indices, (0..snapshot.depth()).collect::<Vec<_>>());
    }

    #[test]
    fn zero_frame_limit_is_an_error() {
        assert!(BacktraceCapture.capture(0).is_err());
    }

    #[test]
    fn unresolved_frames_render_as_unknown() {
        let frame = StackFrame {
            index: 3,
            address: 0xdead_beef,
            symbol: None,
        };
        assert_eq!(frame.to_string(), "[ 3] 0x00000000DEADBEEF <unknown>");
    }

    #[test]
    fn resolved_counts_named_frames() {
        let snapshot = StackSnapshot {
            frames: vec![
                StackFrame {
                    index: 0,
                    address: 1,
                    symbol: Some("main".to_string()),
                },
                StackFrame {
                    index: 1,
                    address: 2,
                    symbol: None,
                },
            ],
        };
        assert_eq!(snapshot.resolved(), 1);
    }
}
