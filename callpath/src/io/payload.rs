//! Payload abstraction: the single terminal operation every path reaches.
//!
//! The [`Payload`] trait decouples path definitions from what actually happens
//! at the end of a path. Tests use a counting payload; the binary uses a
//! console notice or a tracing event.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Terminal operation invoked exactly once per execution.
pub trait Payload {
    fn deliver(&self);
}

impl<F: Fn()> Payload for F {
    fn deliver(&self) {
        self()
    }
}

/// Which built-in payload the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    /// Print a notice block to stdout.
    Console,
    /// Emit an `info` tracing event only.
    Log,
}

/// Payload that prints a notice block to stdout.
///
/// Each execution delivers exactly once, so the delivery count doubles as the
/// execution number shown in the notice.
#[derive(Debug, Clone)]
pub struct ConsoleNotice {
    title: String,
    message: String,
    delivered: Cell<u64>,
}

impl ConsoleNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            delivered: Cell::new(0),
        }
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.get()
    }

    /// Notice text for delivery number `execution`.
    pub fn render(&self, execution: u64) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n[PAYLOAD] {}\n", self.title));
        out.push_str(&format!("[PAYLOAD] execution #{execution}\n"));
        for line in self.message.lines() {
            out.push_str(&format!("[PAYLOAD]   {line}\n"));
        }
        out.push_str("[PAYLOAD] completed");
        out
    }
}

impl Payload for ConsoleNotice {
    fn deliver(&self) {
        let execution = self.delivered.get() + 1;
        self.delivered.set(execution);
        info!(title = %self.title, execution, "payload delivered");
        println!("{}", self.render(execution));
    }
}

/// Payload that only emits a tracing event.
#[derive(Debug, Clone)]
pub struct LogNotice {
    pub message: String,
}

impl Payload for LogNotice {
    fn deliver(&self) {
        info!(message = %self.message, "payload delivered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_payloads() {
        let hits = Cell::new(0);
        let payload = || hits.set(hits.get() + 1);
        payload.deliver();
        payload.deliver();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn console_notice_numbers_each_delivery() {
        let notice = ConsoleNotice::new("Payload executed", "first line\nsecond line");
        notice.deliver();
        notice.deliver();
        assert_eq!(notice.delivered(), 2);

        let text = notice.render(3);
        assert!(text.contains("[PAYLOAD] Payload executed"));
        assert!(text.contains("[PAYLOAD] execution #3"));
        assert!(text.contains("[PAYLOAD]   second line"));
        assert!(text.ends_with("[PAYLOAD] completed"));
    }

    #[test]
    fn payload_kind_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: PayloadKind,
        }
        let parsed: Wrapper = toml::from_str("kind = \"log\"").expect("parse");
        assert_eq!(parsed.kind, PayloadKind::Log);
    }
}
