//! Pacing between executions of a batch.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Called by the run controller between two executions.
pub trait Pacing {
    fn pause(&mut self, completed_seq: u64) -> Result<()>;
}

/// Runs executions back to back.
#[derive(Debug, Default)]
pub struct NoPause;

impl Pacing for NoPause {
    fn pause(&mut self, _completed_seq: u64) -> Result<()> {
        Ok(())
    }
}

/// Prompts and waits for a line on `input` before continuing.
pub struct EnterToContinue<R, W> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> EnterToContinue<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }
}

impl<R: BufRead, W: Write> Pacing for EnterToContinue<R, W> {
    fn pause(&mut self, _completed_seq: u64) -> Result<()> {
        writeln!(self.prompt, "\nPress Enter for next execution...").context("write prompt")?;
        self.prompt.flush().context("flush prompt")?;
        let mut line = String::new();
        // EOF counts as a keypress so piped input never blocks forever.
        self.input.read_line(&mut line).context("read stdin")?;
        Ok(())
    }
}
