//! Multi-execution batch controller.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::types::UsageCounters;
use crate::driver::{ExecutionDriver, ExecutionRecord};
use crate::io::config::ReseedPolicy;
use crate::io::pacing::Pacing;

/// Spacing between per-execution seeds under [`ReseedPolicy::PerExecution`].
const RESEED_STRIDE: u64 = 1000;

/// Parameters of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub runs: u32,
    pub reseed: ReseedPolicy,
    /// Base seed for per-execution reseeding.
    pub base_seed: u64,
}

/// Summary of a batch invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<ExecutionRecord>,
    pub usage: UsageCounters,
}

impl BatchOutcome {
    /// Number of distinct frame routes observed across the batch.
    pub fn distinct_routes(&self) -> usize {
        let mut routes: Vec<&[&'static str]> = self
            .records
            .iter()
            .map(|record| record.frames.as_slice())
            .collect();
        routes.sort_unstable();
        routes.dedup();
        routes.len()
    }
}

/// Seed used before execution `seq` under per-execution reseeding.
pub fn execution_seed(base_seed: u64, seq: u64) -> u64 {
    base_seed.wrapping_add(seq.wrapping_mul(RESEED_STRIDE))
}

/// Run `options.runs` executions with sequence numbers `1..=runs`.
///
/// Usage counters are taken from the records themselves, so they always
/// agree with the paths that actually ran. `pacing` is consulted between
/// executions, never after the last one.
pub fn run_batch<P: Pacing + ?Sized, F: FnMut(&ExecutionRecord)>(
    driver: &mut ExecutionDriver<'_>,
    options: &BatchOptions,
    pacing: &mut P,
    mut on_execution: F,
) -> Result<BatchOutcome> {
    let mut usage = UsageCounters::new(driver.registry().count());
    let mut records = Vec::with_capacity(options.runs as usize);
    info!(runs = options.runs, reseed = ?options.reseed, "batch started");

    for seq in 1..=u64::from(options.runs) {
        if options.reseed == ReseedPolicy::PerExecution {
            let seed = execution_seed(options.base_seed, seq);
            debug!(seq, seed, "reseeding");
            driver.reseed(seed);
        }

        let record = driver.run_once(seq);
        usage.record(record.path);
        on_execution(&record);
        records.push(record);

        if seq < u64::from(options.runs) {
            pacing
                .pause(seq)
                .with_context(|| format!("pause after execution {seq}"))?;
        }
    }

    info!(executions = records.len(), "batch finished");
    Ok(BatchOutcome { records, usage })
}
